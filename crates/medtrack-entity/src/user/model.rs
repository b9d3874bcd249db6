//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user/patient in the MedTrack system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Email address — the login key, unique.
    pub email: String,
    /// National identity number (11 digits, optional, unique when present).
    pub national_id: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Phone number (digits only).
    pub phone: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Full display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// National identity number (optional).
    pub national_id: Option<String>,
    /// Birth date (optional).
    pub birth_date: Option<NaiveDate>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Phone number (optional).
    pub phone: Option<String>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: Uuid,
    /// New full name.
    pub full_name: String,
    /// New email address.
    pub email: String,
    /// New national identity number.
    pub national_id: Option<String>,
    /// New birth date.
    pub birth_date: Option<NaiveDate>,
    /// New password hash — only set when the caller submitted a password.
    pub password_hash: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}
