pub mod add;
pub mod ingest;
pub mod query;
pub mod report;
