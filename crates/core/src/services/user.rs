//! User service: resolves the identity provider's tokens into user rows.
//!
//! The identity provider is an external collaborator; this service only
//! verifies its signed tokens and maintains the local user records keyed by
//! the email claim.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use virasat_common::{AppError, AppResult, IdGenerator};
use virasat_db::entities::user::{self, Role};
use virasat_db::repositories::UserRepository;
use sea_orm::Set;

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Provider-side subject identifier.
    pub sub: String,
    /// Verified email address.
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Role claim; seeds the user row on first sight only.
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
}

/// Verifier for identity-provider tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the shared secret and optional issuer.
    #[must_use]
    pub fn new(secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return its claims.
    ///
    /// Every failure mode (bad signature, expiry, wrong issuer, garbage)
    /// collapses into `Unauthorized`.
    pub fn verify(&self, token: &str) -> AppResult<IdentityClaims> {
        jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

/// User service for caller identity resolution.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    verifier: TokenVerifier,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, verifier: TokenVerifier) -> Self {
        Self {
            user_repo,
            verifier,
            id_gen: IdGenerator::new(),
        }
    }

    /// Resolve a bearer token to a user row, creating the row on first sight.
    ///
    /// The token's role claim only seeds the created row; afterwards the row
    /// is authoritative, so a stale claim cannot demote or promote anyone.
    pub async fn authenticate_token(&self, token: &str) -> AppResult<user::Model> {
        let claims = self.verifier.verify(token)?;

        if let Some(existing) = self.user_repo.find_by_email(&claims.email).await? {
            return Ok(existing);
        }

        let role = claims
            .role
            .as_deref()
            .map_or(Role::User, |raw| match raw {
                "admin" => Role::Admin,
                "member" => Role::Member,
                _ => Role::User,
            });

        let id = self.id_gen.generate();
        tracing::info!(email = %claims.email, "Creating user on first authenticated request");

        self.user_repo
            .create(user::ActiveModel {
                id: Set(id),
                name: Set(claims.name),
                email: Set(Some(claims.email)),
                image: Set(claims.picture),
                role: Set(role),
                created_at: Set(chrono::Utc::now().into()),
            })
            .await
    }

    /// Look up a user by id, failing with `NotFound` when absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    const SECRET: &str = "test-secret";

    fn issue_token(email: &str, role: Option<&str>) -> String {
        let claims = IdentityClaims {
            sub: "subject-1".to_string(),
            email: email.to_string(),
            name: Some("Asha".to_string()),
            picture: None,
            role: role.map(ToString::to_string),
            exp: (Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn create_test_user(id: &str, email: &str, role: Role) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: Some("Asha".to_string()),
            email: Some(email.to_string()),
            image: None,
            role,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_existing_user_keeps_row_role() {
        // Token claims admin, but the stored row says user; the row wins.
        let existing = create_test_user("user1", "asha@example.com", Role::User);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = UserService::new(
            UserRepository::new(db),
            TokenVerifier::new(SECRET, None),
        );

        let token = issue_token("asha@example.com", Some("admin"));
        let user = service.authenticate_token(&token).await.unwrap();

        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_authenticate_creates_user_with_claimed_role() {
        let created = create_test_user("user2", "new@example.com", Role::Admin);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .append_query_results([[created]])
                .into_connection(),
        );

        let service = UserService::new(
            UserRepository::new(db),
            TokenVerifier::new(SECRET, None),
        );

        let token = issue_token("new@example.com", Some("admin"));
        let user = service.authenticate_token(&token).await.unwrap();

        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_signature() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(
            UserRepository::new(db),
            TokenVerifier::new("other-secret", None),
        );

        let token = issue_token("asha@example.com", None);
        let result = service.authenticate_token(&token).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let verifier = TokenVerifier::new(SECRET, None);
        assert!(matches!(
            verifier.verify("not-a-token"),
            Err(AppError::Unauthorized)
        ));
    }
}
