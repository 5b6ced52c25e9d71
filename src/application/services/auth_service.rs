//! Authentication service for bearer token validation.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::Principal;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, session_key};
use crate::utils::jwt::JwtSigner;

/// Service for issuing tokens and resolving them into a [`Principal`].
///
/// Resolved principals are cached under `user_{username}` with the store
/// default TTL, so repeated requests within that window skip the user lookup.
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    cache: Arc<dyn CacheService>,
    signer: JwtSigner,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: Arc<U>, cache: Arc<dyn CacheService>, signer: JwtSigner) -> Self {
        Self {
            users,
            cache,
            signer,
        }
    }

    /// Issues a token whose subject is `username`.
    pub fn create_token(&self, username: &str) -> String {
        self.signer.sign(username)
    }

    /// Resolves a bearer token into the principal it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token is malformed, badly signed or expired
    /// - Token subject no longer exists locally
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let claims = self.signer.verify(token).map_err(|e| {
            AppError::unauthorized("Unauthorized", json!({ "reason": e.to_string() }))
        })?;
        let key = session_key(&claims.sub);

        if let Some(raw) = self.cache.get(&key).await? {
            match serde_json::from_str::<Principal>(&raw) {
                Ok(principal) => {
                    debug!(username = %principal.username, "Session cache hit");
                    return Ok(principal);
                }
                Err(e) => warn!(key = %key, error = %e, "Discarding undecodable session entry"),
            }
        }

        debug!(username = %claims.sub, "Session cache miss");
        let user = self
            .users
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({ "reason": "Unknown user" }))
            })?;

        let principal = Principal::from(&user);
        let encoded = serde_json::to_string(&principal).map_err(|e| {
            AppError::internal("Failed to encode session", json!({ "reason": e.to_string() }))
        })?;
        self.cache.set(&key, &encoded, None).await?;

        Ok(principal)
    }

    /// Drops the cached principal for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the cache rejects the operation.
    pub async fn invalidate_session(&self, username: &str) -> Result<(), AppError> {
        self.cache.invalidate(&session_key(username)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::cache::MemoryCache;

    fn signer() -> JwtSigner {
        JwtSigner::new("test-jwt-secret", 3600)
    }

    fn bret() -> User {
        User {
            id: 1,
            username: "bret".to_string(),
            password: "$argon2id$hash".to_string(),
            name: "Leanne Graham".to_string(),
            phone: "1-770-736-8031".to_string(),
        }
    }

    fn service(repo: MockUserRepository) -> (AuthService<MockUserRepository>, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::default());
        (AuthService::new(Arc::new(repo), cache.clone(), signer()), cache)
    }

    #[tokio::test]
    async fn test_authenticate_caches_principal() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_username()
            .withf(|username| username == "bret")
            .times(1)
            .returning(|_| Ok(Some(bret())));

        let (service, cache) = service(mock_repo);
        let token = service.create_token("bret");

        let first = service.authenticate(&token).await.unwrap();
        let second = service.authenticate(&token).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.name, "Leanne Graham");
        assert!(cache.get("user_bret").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let (service, cache) = service(mock_repo);
        let token = service.create_token("ghost");

        let result = service.authenticate(&token).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
        assert_eq!(cache.get("user_ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_foreign_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_username().times(0);

        let (service, _) = service(mock_repo);
        let token = JwtSigner::new("other-secret", 3600).sign("bret");

        let result = service.authenticate(&token).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_malformed_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_username().times(0);

        let (service, _) = service(mock_repo);

        let result = service.authenticate("not-a-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_invalidate_session_forces_lookup() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_username()
            .times(2)
            .returning(|_| Ok(Some(bret())));

        let (service, cache) = service(mock_repo);
        let token = service.create_token("bret");

        service.authenticate(&token).await.unwrap();
        service.invalidate_session("bret").await.unwrap();
        assert_eq!(cache.get("user_bret").await.unwrap(), None);
        service.authenticate(&token).await.unwrap();
    }
}
