pub use buyer::*;
pub use config::*;
pub use contact::*;
pub use draw_result::*;
pub use draw_session::*;
pub use raffle::*;
pub use vendor::*;

pub mod buyer;
pub mod config;
pub mod contact;
pub mod draw_result;
pub mod draw_session;
pub mod raffle;
pub mod vendor;
