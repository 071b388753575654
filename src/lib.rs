pub mod config;
pub mod engine;
pub mod model;
pub mod observability;
pub mod report;
pub mod schema;
pub mod snapshot;
