// Utility functions module
pub mod config;
pub mod formatters;
pub mod helvetica;
pub mod pdf_report;
