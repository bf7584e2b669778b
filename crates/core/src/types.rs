//! Shared type aliases used across the workspace.

/// Database primary key type (BIGSERIAL).
pub type DbId = i64;

/// Timestamp type for `created_at` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
