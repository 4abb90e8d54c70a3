// Data models for one analysis session
pub mod channel;
pub mod report;
pub mod session;
