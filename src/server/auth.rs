//! Request authentication
//!
//! Callers identify themselves with a session token in the
//! `X-EcoQuest-Session` header. Tokens are issued by `ecoquest user add`
//! and `ecoquest user login`.

use anyhow::Result;

use crate::domain::UserId;
use crate::store::StoreDb;

pub const SESSION_HEADER: &str = "X-EcoQuest-Session";

/// Resolves a presented credential to a user
pub trait Authenticator: Send + Sync {
    /// `Ok(None)` means the credential is unknown
    fn authenticate(&self, token: &str) -> Result<Option<UserId>>;
}

/// Looks tokens up in the store's `sessions` table
pub struct SessionAuthenticator {
    db: StoreDb,
}

impl SessionAuthenticator {
    pub fn new(db: StoreDb) -> Self {
        Self { db }
    }
}

impl Authenticator for SessionAuthenticator {
    fn authenticate(&self, token: &str) -> Result<Option<UserId>> {
        self.db.session_user(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_authenticator() {
        let db = StoreDb::open_in_memory().unwrap();
        let user = db.insert_user("ana", "ana@example.org").unwrap();
        let token = db.create_session(user.id).unwrap();

        let auth = SessionAuthenticator::new(db);
        assert_eq!(auth.authenticate(&token).unwrap(), Some(user.id));
        assert_eq!(auth.authenticate("forged").unwrap(), None);
    }
}
