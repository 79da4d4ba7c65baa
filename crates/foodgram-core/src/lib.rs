pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod tracing;
