//! Authentication and caller identity
//!
//! The transport layer owns authentication: a session token (the wallet
//! stand-in) carries the caller's account address as its subject. The
//! registry core only ever sees the resolved [`CallerIdentity`].

use chrono::{Duration, Utc};
use core_kernel::AccountAddress;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller's 0x-hex account address
    pub sub: String,
    /// Caller's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// The authenticated caller, resolved from validated claims
///
/// Inserted into request extensions by the auth middleware and passed
/// explicitly into every registry operation that needs an account.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub account: AccountAddress,
    pub roles: Vec<String>,
}

impl CallerIdentity {
    /// Returns true if the caller has the role (admins have every role)
    pub fn has_role(&self, required: &str) -> bool {
        self.roles.iter().any(|r| r == required || r == roles::ADMIN)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Subject is not a valid account address")]
    InvalidSubject,
}

/// Creates a new session token for an account
///
/// # Arguments
///
/// * `account` - The caller's account address
/// * `roles` - The caller's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    account: &AccountAddress,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: account.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a session token and resolves the caller identity
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<CallerIdentity, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    let account = token_data
        .claims
        .sub
        .parse::<AccountAddress>()
        .map_err(|_| AuthError::InvalidSubject)?;

    Ok(CallerIdentity {
        account,
        roles: token_data.claims.roles,
    })
}

/// Role definitions
pub mod roles {
    /// May deactivate catalog policies
    pub const ADMIN: &str = "admin";
    /// Default role for registered wallets
    pub const POLICYHOLDER: &str = "policyholder";
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn address() -> AccountAddress {
        "0xcf7ed3acca5a467e9e704c703e8d87f634fb0fc9".parse().unwrap()
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_token(
            &address(),
            vec![roles::POLICYHOLDER.to_string()],
            SECRET,
            3600,
        )
        .unwrap();

        let caller = validate_token(&token, SECRET).unwrap();
        assert_eq!(caller.account, address());
        assert!(caller.has_role(roles::POLICYHOLDER));
        assert!(!caller.has_role(roles::ADMIN));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            create_token(&address(), vec![], SECRET, 3600).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_admin_implies_every_role() {
        let caller = CallerIdentity {
            account: address(),
            roles: vec![roles::ADMIN.to_string()],
        };
        assert!(caller.has_role(roles::POLICYHOLDER));
    }
}
