use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::errors::StudioError;
use crate::domain::ports::{SessionRepository, TokenStore, UserRepository};

// Account lookups and self-service account deletion.
pub struct AccountUseCase {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub tokens: Arc<dyn TokenStore>,
}

impl AccountUseCase {
    pub async fn find(&self, id: u64) -> Result<User, StudioError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("user"))
    }

    // Only the account owner may delete an account, admins included.
    pub async fn delete(&self, id: u64, caller_id: u64) -> Result<(), StudioError> {
        self.find(id).await?;
        if id != caller_id {
            return Err(StudioError::NotAccountOwner);
        }

        // Delete the user first so a join racing this call fails its user
        // lookup instead of re-adding the id after the sweep.
        self.users
            .delete(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?;
        self.sessions
            .remove_user_everywhere(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?;

        let revoked = self
            .tokens
            .revoke_user(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?;
        tracing::info!(user_id = id, revoked, "account deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccessToken;
    use crate::interface_adapters::memory::{InMemorySessions, InMemoryUsers};
    use crate::use_cases::test_support::{
        RecordingTokens, seeded_sessions, seeded_users,
    };

    struct Fixture {
        users: InMemoryUsers,
        sessions: InMemorySessions,
        tokens: RecordingTokens,
        use_case: AccountUseCase,
    }

    fn fixture() -> Fixture {
        let users = seeded_users();
        let sessions = seeded_sessions();
        let tokens = RecordingTokens::new();
        let use_case = AccountUseCase {
            users: Arc::new(users.clone()),
            sessions: Arc::new(sessions.clone()),
            tokens: Arc::new(tokens.clone()),
        };
        Fixture {
            users,
            sessions,
            tokens,
            use_case,
        }
    }

    #[tokio::test]
    async fn when_user_exists_then_find_returns_profile() {
        let fixture = fixture();

        let user = fixture.use_case.find(2).await.expect("expected user");

        assert_eq!(user.email, "test@test.com");
        assert!(!user.admin);
    }

    #[tokio::test]
    async fn when_user_is_missing_then_find_returns_not_found() {
        let fixture = fixture();

        let result = fixture.use_case.find(9999).await;

        assert_eq!(result.err(), Some(StudioError::NotFound("user")));
    }

    #[tokio::test]
    async fn when_owner_deletes_account_then_user_participation_and_tokens_are_gone() {
        let fixture = fixture();
        fixture.tokens.insert_test_token(
            "token-2",
            AccessToken {
                user_id: 2,
                email: "test@test.com".to_string(),
                expires_at: u64::MAX,
            },
        );

        fixture
            .use_case
            .delete(2, 2)
            .await
            .expect("expected delete to succeed");

        assert!(
            fixture
                .users
                .find_by_id(2)
                .await
                .expect("lookup should succeed")
                .is_none()
        );
        let session = fixture
            .sessions
            .find_by_id(1)
            .await
            .expect("lookup should succeed")
            .expect("session should still exist");
        assert!(session.users.is_empty());
        assert!(fixture.tokens.get_test_token("token-2").is_none());
    }

    #[tokio::test]
    async fn when_caller_deletes_another_account_then_returns_not_account_owner() {
        let fixture = fixture();

        let result = fixture.use_case.delete(2, 1).await;

        assert_eq!(result.err(), Some(StudioError::NotAccountOwner));
        assert!(
            fixture
                .users
                .find_by_id(2)
                .await
                .expect("lookup should succeed")
                .is_some()
        );
    }

    #[tokio::test]
    async fn when_admin_deletes_own_account_then_delete_succeeds() {
        let fixture = fixture();

        fixture
            .use_case
            .delete(1, 1)
            .await
            .expect("expected admin to delete own account");

        assert!(
            fixture
                .users
                .find_by_email("yoga@studio.com")
                .await
                .expect("lookup should succeed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn when_account_is_missing_then_delete_returns_not_found() {
        let fixture = fixture();

        let result = fixture.use_case.delete(9999, 9999).await;

        assert_eq!(result.err(), Some(StudioError::NotFound("user")));
    }
}
