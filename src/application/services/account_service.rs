//! User account registration and authentication.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::access_gate::CycleGate;
use crate::domain::entities::UserAccount;
use crate::domain::repositories::SnapshotStore;
use crate::error::AppError;
use crate::utils::code_generator::generate_id;
use crate::utils::password::{PasswordError, hash_password, verify_password};

/// Service for the `users_table` of the snapshot.
///
/// Password hashing and verification are CPU-bound and run on the blocking
/// thread pool so they never stall the async workers.
pub struct AccountService<S: SnapshotStore + ?Sized> {
    store: Arc<S>,
    gate: CycleGate,
}

impl<S: SnapshotStore + ?Sized> AccountService<S> {
    pub fn new(store: Arc<S>, gate: CycleGate) -> Self {
        Self { store, gate }
    }

    /// Creates a user with a freshly hashed password.
    ///
    /// Usernames are compared exactly. The check runs once before hashing and
    /// again on a fresh snapshot right before the save, inside the gate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UsernameTaken`] if the username exists.
    /// Returns [`AppError::Persistence`] on store failures.
    pub async fn register_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserAccount, AppError> {
        if self.store.load().await?.find_user(username).is_some() {
            return Err(AppError::username_taken(username));
        }

        let password = password.to_string();
        let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(join_failure)?
            .map_err(password_failure)?;

        let _guard = self.gate.enter().await;
        let mut snapshot = self.store.load().await?;

        if snapshot.find_user(username).is_some() {
            warn!(username, "Username claimed concurrently");
            return Err(AppError::username_taken(username));
        }

        let account = UserAccount::new(generate_id(), username.to_string(), hashed_password);
        snapshot.users_table.push(account.clone());
        self.store.save(&snapshot).await?;

        info!(user_id = %account.id, username, "Registered account");

        Ok(account)
    }

    /// Checks a username and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotFound`] for an unknown username and
    /// [`AppError::InvalidPassword`] for a wrong password. A stored hash that
    /// cannot be parsed yields [`AppError::Internal`].
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserAccount, AppError> {
        let account = self
            .store
            .load()
            .await?
            .find_user(username)
            .cloned()
            .ok_or(AppError::UserNotFound)?;

        let password = password.to_string();
        let hash = account.hashed_password.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(join_failure)?
            .map_err(|e| {
                error!(user_id = %account.id, error = %e, "Stored password hash is unusable");
                password_failure(e)
            })?;

        if !matches {
            return Err(AppError::InvalidPassword);
        }

        Ok(account)
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store cannot be read.
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<UserAccount>, AppError> {
        Ok(self
            .store
            .load()
            .await?
            .users_table
            .into_iter()
            .find(|u| u.id == user_id))
    }
}

fn join_failure(e: tokio::task::JoinError) -> AppError {
    AppError::internal("Password task failed", json!({ "reason": e.to_string() }))
}

fn password_failure(e: PasswordError) -> AppError {
    AppError::internal("Password processing failed", json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Snapshot;
    use crate::domain::repositories::MockSnapshotStore;
    use crate::infrastructure::persistence::MemoryStore;

    fn service(store: MemoryStore) -> AccountService<MemoryStore> {
        AccountService::new(Arc::new(store), CycleGate::default())
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service(MemoryStore::new());

        let created = service.register_account("alice", "s3cret").await.unwrap();
        assert_eq!(created.username, "alice");
        assert_ne!(created.hashed_password, "s3cret");

        let account = service.authenticate("alice", "s3cret").await.unwrap();
        assert_eq!(account.id, created.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let service = service(MemoryStore::new());

        service.register_account("alice", "one").await.unwrap();
        let result = service.register_account("alice", "two").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::UsernameTaken { username } if username == "alice"
        ));
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let service = service(MemoryStore::new());

        service.register_account("alice", "one").await.unwrap();

        assert!(service.register_account("Alice", "two").await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service(MemoryStore::new());
        service.register_account("alice", "right").await.unwrap();

        let result = service.authenticate("alice", "wrong").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let service = service(MemoryStore::new());

        let result = service.authenticate("nobody", "pw").await;

        assert!(matches!(result.unwrap_err(), AppError::UserNotFound));
    }

    #[tokio::test]
    async fn test_authenticate_legacy_bcrypt_account() {
        let snapshot = Snapshot {
            users_table: vec![UserAccount::new(
                "u1".to_string(),
                "alice".to_string(),
                "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW".to_string(),
            )],
            links_table: vec![],
        };
        let service = service(MemoryStore::with_snapshot(snapshot));

        let account = service.authenticate("alice", "U*U").await.unwrap();
        assert_eq!(account.id, "u1");

        let result = service.authenticate("alice", "wrong").await;
        assert!(matches!(result.unwrap_err(), AppError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_authenticate_unparseable_hash_is_internal() {
        let snapshot = Snapshot {
            users_table: vec![UserAccount::new(
                "u1".to_string(),
                "legacy".to_string(),
                "not-a-phc-hash".to_string(),
            )],
            links_table: vec![],
        };
        let service = service(MemoryStore::with_snapshot(snapshot));

        let result = service.authenticate("legacy", "pw").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_register_rechecks_before_save() {
        let mut mock_store = MockSnapshotStore::new();
        let mut seq = mockall::Sequence::new();

        mock_store
            .expect_load()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Snapshot::default()));
        mock_store
            .expect_load()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Ok(Snapshot {
                    users_table: vec![UserAccount::new(
                        "u1".to_string(),
                        "alice".to_string(),
                        "hash".to_string(),
                    )],
                    links_table: vec![],
                })
            });
        mock_store.expect_save().times(0);

        let service = AccountService::new(Arc::new(mock_store), CycleGate::default());
        let result = service.register_account("alice", "pw").await;

        assert!(matches!(result.unwrap_err(), AppError::UsernameTaken { .. }));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let service = service(MemoryStore::new());
        let created = service.register_account("alice", "pw").await.unwrap();

        let found = service.find_by_id(&created.id).await.unwrap();

        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));
        assert!(service.find_by_id("missing").await.unwrap().is_none());
    }
}
