// HTTP routes
pub mod admin;
pub mod health;
pub mod services;

pub use health::*;
pub use services::*;
