//! Application layer - producing domain values from the outside world.
//!
//! This layer connects the pure rate model to its collaborators:
//! - Clock port (wall-clock time source)
//! - Hit recorder (stamps hits with the current time and defaults)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod ports;
pub mod recorder;
