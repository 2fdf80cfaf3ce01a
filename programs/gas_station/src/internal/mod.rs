pub mod charge;
pub mod fee_curve;
pub mod mint_state;
pub mod window;

pub use charge::*;
pub use fee_curve::*;
pub use mint_state::*;
pub use window::*;
