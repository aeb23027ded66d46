pub mod config;
pub mod executor;
pub mod interpreter;
pub mod sink;
pub mod storage;
pub mod types;
pub mod utils;
