pub mod draw;
pub mod notification;
pub mod randomness;
