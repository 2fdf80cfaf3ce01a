pub mod cfg;
pub mod credit_balance;
pub mod gas_quota;
pub mod pending_charge;

pub use cfg::*;
pub use credit_balance::*;
pub use gas_quota::*;
pub use pending_charge::*;
