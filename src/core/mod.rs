pub mod dashboard;
pub mod feed;
pub mod logging;
pub mod performance;
pub mod report;
pub mod tally;
pub mod threat;
