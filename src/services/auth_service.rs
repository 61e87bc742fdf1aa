use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, UserStore};

use super::ServiceError;

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
}

/// Credential checks and bearer-token resolution.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub async fn signup(&self, input: SignupInput) -> Result<AccessToken, ServiceError> {
        let hash = hash_password(&input.password)?;
        let new_user = NewUser {
            email: input.email,
            hash,
            first_name: input.first_name,
            last_name: input.last_name,
        };

        let user = match self.users.insert_user(new_user).await {
            Ok(user) => user,
            Err(DatabaseError::Conflict(_)) => return Err(ServiceError::CredentialsTaken),
            Err(e) => return Err(e.into()),
        };

        info!("Registered user {}", user.id);
        self.token_for(&user)
    }

    pub async fn signin(&self, input: SigninInput) -> Result<AccessToken, ServiceError> {
        let Some(user) = self.users.find_user_by_email(&input.email).await? else {
            warn!("Sign-in failed: unknown email");
            return Err(ServiceError::CredentialsIncorrect);
        };

        if !verify_password(&input.password, &user.hash)? {
            warn!("Sign-in failed: wrong password for user {}", user.id);
            return Err(ServiceError::CredentialsIncorrect);
        }

        self.token_for(&user)
    }

    /// Resolve a bearer token to the user it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<User, ServiceError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(|e| ServiceError::Unauthenticated(e.to_string()))?;

        let user = self
            .users
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::Unauthenticated("User no longer exists".to_string()))?;

        debug!("Authenticated user {}", user.id);
        Ok(user)
    }

    fn token_for(&self, user: &User) -> Result<AccessToken, ServiceError> {
        Ok(AccessToken {
            access_token: self.tokens.issue(user)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), TokenIssuer::new("secret", 15))
    }

    fn signup_input(email: &str, password: &str) -> SignupInput {
        SignupInput {
            email: email.to_string(),
            password: password.to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        }
    }

    fn signin_input(email: &str, password: &str) -> SigninInput {
        SigninInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn signup_then_authenticate() {
        let auth = service();
        let token = auth.signup(signup_input("a@x.com", "pw")).await.unwrap();

        let user = auth.authenticate(&token.access_token).await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_ne!(user.hash, "pw");
    }

    #[tokio::test]
    async fn duplicate_signup_is_credentials_taken() {
        let auth = service();
        auth.signup(signup_input("a@x.com", "pw")).await.unwrap();

        let err = auth.signup(signup_input("a@x.com", "other")).await.unwrap_err();
        assert!(matches!(err, ServiceError::CredentialsTaken));
    }

    #[tokio::test]
    async fn signin_checks_password() {
        let auth = service();
        auth.signup(signup_input("a@x.com", "pw")).await.unwrap();

        let token = auth.signin(signin_input("a@x.com", "pw")).await.unwrap();
        assert!(auth.authenticate(&token.access_token).await.is_ok());

        assert!(matches!(
            auth.signin(signin_input("a@x.com", "wrong")).await,
            Err(ServiceError::CredentialsIncorrect)
        ));
        assert!(matches!(
            auth.signin(signin_input("b@x.com", "pw")).await,
            Err(ServiceError::CredentialsIncorrect)
        ));
    }

    #[tokio::test]
    async fn invalid_token_is_unauthenticated() {
        let auth = service();
        assert!(matches!(
            auth.authenticate("garbage").await,
            Err(ServiceError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_unauthenticated() {
        // Valid signature, but issued against a different store
        let issuer = TokenIssuer::new("secret", 15);
        let other = service();
        let token = other.signup(signup_input("a@x.com", "pw")).await.unwrap();

        let auth = AuthService::new(Arc::new(MemoryStore::new()), issuer);
        assert!(matches!(
            auth.authenticate(&token.access_token).await,
            Err(ServiceError::Unauthenticated(_))
        ));
    }
}
