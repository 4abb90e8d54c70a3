// Pipeline stages built on top of the API clients
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod summary;
