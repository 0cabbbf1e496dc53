//! JWT Token Service
//! Mission: Issue and verify signed, time-limited identity tokens

use crate::auth::models::Claims;
use crate::employees::models::Employee;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Stateless token service. Verification is a pure function of
/// (token, secret, clock); rotating the secret invalidates every
/// outstanding token.
pub struct TokenService {
    secret: String,
    login_ttl_days: i64,
    register_ttl_days: i64,
}

impl TokenService {
    pub fn new(secret: String, login_ttl_days: i64, register_ttl_days: i64) -> Self {
        Self {
            secret,
            login_ttl_days,
            register_ttl_days,
        }
    }

    /// Issue a long-lived token after a successful login.
    pub fn issue_login(&self, employee: &Employee) -> Result<String> {
        self.issue(employee, self.login_ttl_days)
    }

    /// Issue a short-lived token on registration.
    pub fn issue_registration(&self, employee: &Employee) -> Result<String> {
        self.issue(employee, self.register_ttl_days)
    }

    fn issue(&self, employee: &Employee, ttl_days: i64) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::days(ttl_days))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: employee.id.to_string(),
            role: employee.role,
            exp: expiration,
        };

        debug!(
            "Issuing JWT for employee {} ({}), expires in {}d",
            employee.email, employee.id, ttl_days
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to issue JWT")
    }

    /// Verify a token and extract its claims. Fails on a bad signature, a
    /// malformed token, or an elapsed expiry. Never fails open.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::models::{Domain, Gender, Role};
    use uuid::Uuid;

    fn create_test_employee(role: Role) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Test Person".to_string(),
            email: "test@example.com".to_string(),
            gender: Gender::Other,
            domain: Domain::Backend,
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now().to_rfc3339(),
            updated_at: Utc::now().to_rfc3339(),
        }
    }

    fn test_service() -> TokenService {
        TokenService::new("test-secret-key-12345".to_string(), 30, 1)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = test_service();
        let employee = create_test_employee(Role::Employee);

        let token = service.issue_login(&employee).unwrap();
        assert!(!token.is_empty());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, employee.id.to_string());
        assert_eq!(claims.role, Role::Employee);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_registration_token_verifies_too() {
        let service = test_service();
        let employee = create_test_employee(Role::Admin);

        let token = service.issue_registration(&employee).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = test_service();
        assert!(service.verify("invalid.token.here").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let service1 = TokenService::new("secret1".to_string(), 30, 1);
        let service2 = TokenService::new("secret2".to_string(), 30, 1);
        let employee = create_test_employee(Role::Employee);

        let token = service1.issue_login(&employee).unwrap();
        assert!(service2.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // A negative TTL puts the expiry in the past.
        let expired_issuer = TokenService::new("test-secret-key-12345".to_string(), -1, -1);
        let employee = create_test_employee(Role::Employee);

        let token = expired_issuer.issue_login(&employee).unwrap();
        assert!(test_service().verify(&token).is_err());
    }
}
