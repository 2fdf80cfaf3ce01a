pub mod close_pending_charge;
pub mod initialize;
pub mod issue_quota;
pub mod mint_credits;
pub mod pre_charge;
pub mod revert_charge;
pub mod set_config;
pub mod set_quota_limit;
pub mod settle;

pub use close_pending_charge::*;
pub use initialize::*;
pub use issue_quota::*;
pub use mint_credits::*;
pub use pre_charge::*;
pub use revert_charge::*;
pub use set_config::*;
pub use set_quota_limit::*;
pub use settle::*;
