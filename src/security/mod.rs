//! Security Module
//!
//! The service has no authentication; this module only carries the
//! response-hardening middleware.

pub mod middleware;

pub use middleware::security_headers_middleware;
