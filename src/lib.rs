pub mod app;
pub mod core;
pub mod scanner;
pub mod service;
pub mod storage;
