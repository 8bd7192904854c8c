pub mod cli;
pub mod config;
pub mod detector;
pub mod domain;
pub mod errors;
pub mod mock_source;
pub mod scheduler;
pub mod services;
pub mod sources;
pub mod storage;
