use serde::{Deserialize, Serialize};

/// Unique identifier for a user
pub type UserId = i64;

/// A learner and their running XP total
///
/// `total_xp` is never written directly; see [`crate::progress::Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub total_xp: u32,
    /// Milliseconds since epoch
    pub created_at: i64,
}
