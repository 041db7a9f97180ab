pub mod app;
pub mod error;
