pub mod feed;
pub mod performance;
