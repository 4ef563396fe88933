pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod provision;
pub mod report;
