//! Command implementations for recograph

pub mod algo;
pub mod dispatch;
pub mod marathon;
pub mod playlist;
pub mod rank;
pub mod recommend;
pub mod trending;

mod output;
