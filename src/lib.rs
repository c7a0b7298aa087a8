//! Host allow-list middleware for axum.
//!
//! Validates the host a request claims to be addressed to against an
//! operator-defined allow-list before the request reaches the inner
//! handler, guarding against Host-header injection and DNS-rebinding
//! attacks.
//!
//! # Data Flow
//! ```text
//! Configuration time:
//!     specs ("example.com", "*.example.com", "example.com.")
//!         → pattern.rs (compile to label-matcher sequences)
//!         → gate.rs (ordered, deduplicated pattern set)
//!
//! Request time:
//!     incoming request
//!         → middleware.rs (extract Host header / server name)
//!         → gate.rs (evaluate candidates against the pattern set)
//!             → match: forward to the inner handler untouched
//!             → no match: fixed 403 response, handler never runs
//! ```

pub mod config;
pub mod gate;
pub mod middleware;
pub mod pattern;

pub use config::{load_config, ConfigError, GateConfig};
pub use gate::HostGate;
pub use middleware::{forbidden_response, host_gate_middleware, HostGateState, FORBIDDEN_BODY};
pub use pattern::HostPattern;
