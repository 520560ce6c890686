use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::config_loader;

#[derive(Debug, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String,
    pub aud: String,
    pub role: String,
    pub email: Option<String>,
    pub exp: usize,
}

/// Authenticated reseller extracted from the Supabase access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub role: String,
}

pub fn validate_supabase_jwt(token: &str, secret: &str) -> anyhow::Result<SupabaseClaims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.set_audience(&["authenticated", "service_role"]);

    let token_data = decode::<SupabaseClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let auth_str = auth_header.to_str().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            )
        })?;

        if !auth_str.starts_with("Bearer ") {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_str[7..];

        let config = config_loader::load().map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load config: {}", e),
            )
        })?;

        let claims = validate_supabase_jwt(token, &config.supabase.jwt_secret)
            .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid user ID in token".to_string(),
            )
        })?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "supersecretjwtsecretforunittesting123";

    fn claims(exp: usize) -> SupabaseClaims {
        SupabaseClaims {
            sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            aud: "authenticated".to_string(),
            role: "authenticated".to_string(),
            email: Some("test@example.com".to_string()),
            exp,
        }
    }

    fn sign(claims: &SupabaseClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_passes() {
        let my_claims = claims(9999999999);
        let token = sign(&my_claims, SECRET);

        let decoded = validate_supabase_jwt(&token, SECRET).expect("Valid token should pass");
        assert_eq!(decoded.sub, my_claims.sub);
        assert_eq!(decoded.email, my_claims.email);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(&claims(1), SECRET);
        assert!(validate_supabase_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_signature_is_rejected() {
        let token = sign(&claims(9999999999), "wrongsecret");
        assert!(validate_supabase_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let mut my_claims = claims(9999999999);
        my_claims.aud = "anon".to_string();
        let token = sign(&my_claims, SECRET);
        assert!(validate_supabase_jwt(&token, SECRET).is_err());
    }
}
