//! Authentication facade library modules.
//!
//! The facade accepts login and registration requests over HTTP and
//! delegates record storage to a downstream user service.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
