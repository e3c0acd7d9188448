pub mod config;
pub mod error;
pub mod handlers;
pub mod startup;
pub mod sync;
