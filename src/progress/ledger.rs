//! Reward ledger: the per-user running XP total

use rusqlite::{Connection, OptionalExtension};

use crate::domain::UserId;

/// Reads and credits `users.total_xp`.
///
/// Crediting takes an unsigned amount, so the total can only grow.
/// It is only called from the completion flows, inside the transaction
/// that inserts the matching completion row.
pub struct Ledger;

impl Ledger {
    /// Current XP total, or `None` if the user does not exist
    pub fn total_xp(conn: &Connection, user_id: UserId) -> rusqlite::Result<Option<u32>> {
        conn.query_row(
            "SELECT total_xp FROM users WHERE id = ?1",
            [user_id],
            |r| r.get(0),
        )
        .optional()
    }

    /// Add `amount` to the user's total. Returns the new total.
    pub(crate) fn credit(conn: &Connection, user_id: UserId, amount: u32) -> rusqlite::Result<u32> {
        conn.query_row(
            "UPDATE users SET total_xp = total_xp + ?1 WHERE id = ?2 RETURNING total_xp",
            (amount, user_id),
            |r| r.get(0),
        )
    }
}
