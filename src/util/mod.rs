pub mod colors;
pub mod config;
pub mod hook;
pub mod log;
pub mod task;
