//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Analyst` - Port for the search-augmented analysis capability

mod analyst;

pub use analyst::{Analysis, Analyst, AnalystError};
