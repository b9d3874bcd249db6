//! Request and response DTOs.
//!
//! All wire field names are camelCase, preserving the upstream API
//! contract. Request DTOs are validated by the explicit functions in
//! [`validate`] before any mutation.

pub mod request;
pub mod response;
pub mod validate;
