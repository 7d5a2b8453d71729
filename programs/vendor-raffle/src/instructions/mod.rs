pub mod create_raffle;
pub mod draw_next_prize;
pub mod finalize_draw;
pub mod init_config;
pub mod record_result;
pub mod register_vendor;
pub mod reveal_winner;
pub mod sell_numbers;
pub mod start_draw;
pub mod update_config;
pub mod update_raffle;
pub mod update_vendor_contact;

pub use create_raffle::*;
pub use draw_next_prize::*;
pub use finalize_draw::*;
pub use init_config::*;
pub use record_result::*;
pub use register_vendor::*;
pub use reveal_winner::*;
pub use sell_numbers::*;
pub use start_draw::*;
pub use update_config::*;
pub use update_raffle::*;
pub use update_vendor_contact::*;
