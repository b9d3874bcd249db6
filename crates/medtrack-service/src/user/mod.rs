//! User profile service.

pub mod service;

pub use service::{UserInput, UserService};
