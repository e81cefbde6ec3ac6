//! Port definitions
//!
//! Ports are interfaces that define how the application layer interacts
//! with external systems. Adapters in the infrastructure layer implement
//! these ports.

pub mod event_log;
pub mod lead_gateway;
pub mod progress;
pub mod wizard_event;
