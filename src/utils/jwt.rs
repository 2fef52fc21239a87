use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // user id
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    /// Issues an access token valid for `expiry_minutes`.
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
        expiry_minutes: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_secret(
            Self::get_secret(),
            user_id,
            role,
            chrono::Duration::minutes(expiry_minutes),
        )
    }

    pub fn generate_token_with_secret(
        secret: &str,
        user_id: i64,
        role: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn verify_token_with_secret(
        token: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        // HS256 with `exp` required, 60s leeway
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = JwtUtils::generate_token_with_secret(
            SECRET,
            42,
            "teacher",
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify_token_with_secret(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "teacher");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::generate_token_with_secret(
            SECRET,
            1,
            "student",
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        let err = JwtUtils::verify_token_with_secret(&token, SECRET).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = JwtUtils::generate_token_with_secret(
            "someone-else",
            1,
            "admin",
            chrono::Duration::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify_token_with_secret(&token, SECRET).is_err());
    }
}
