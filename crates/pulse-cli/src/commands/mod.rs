pub mod analyze;
pub mod config;
pub mod dispatch;
pub mod effectiveness;
pub mod recommend;
pub mod shared;
