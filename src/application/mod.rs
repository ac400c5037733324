// Application layer - orchestration over the domain types.
// The service owns the categories; the CLI and the io module go through it.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
