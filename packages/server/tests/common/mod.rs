// Common test utilities

pub mod fixtures;
pub mod harness;
pub mod http;

#[allow(unused_imports)]
pub use fixtures::*;
pub use harness::*;
#[allow(unused_imports)]
pub use http::*;
