//! # medtrack-auth
//!
//! Authentication subsystem for MedTrack:
//!
//! - [`jwt`] — stateless HS256 access tokens (issue, verify, subject
//!   extraction)
//! - [`password`] — Argon2id hashing and verification
//! - [`session`] — durable refresh-token records with rotation and
//!   revocation, the auth manager orchestrating register/login/refresh/
//!   logout, and the expired-token cleanup task

pub mod jwt;
pub mod password;
pub mod session;
