pub mod add;
pub mod config;
pub mod export;
pub mod ingest;
pub mod init;
pub mod list;
pub mod report;
