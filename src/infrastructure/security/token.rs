// src/infrastructure/security/token.rs
use crate::application::{
    AuthError,
    commands::auth::claims::parse_timestamp,
    dto::{Claims, claim_keys},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenProvider,
};
use crate::domain::{session::TokenType, user::UserId};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;
use std::{collections::HashSet, sync::Arc, time::Duration};
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// HS256 JWTs signed with a single shared secret.
#[derive(Clone)]
pub struct JwtTokenProvider {
    keys: Arc<Keys>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtTokenProvider {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            access_ttl,
            refresh_ttl,
        }
    }

    fn canonical_claims(&self, user_id: UserId, token_type: TokenType, ttl: Duration) -> Claims {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let subject = user_id.to_string();

        let mut claims = Claims::new();
        claims.insert(claim_keys::USER_ID.into(), Value::String(subject.clone()));
        claims.insert(claim_keys::SUBJECT.into(), Value::String(subject));
        claims.insert(claim_keys::ISSUED_AT.into(), now.into());
        claims.insert(
            claim_keys::EXPIRES_AT.into(),
            now.saturating_add(ttl_secs).into(),
        );
        claims.insert(
            claim_keys::TOKEN_ID.into(),
            Value::String(Uuid::new_v4().to_string()),
        );
        claims.insert(
            claim_keys::TOKEN_TYPE.into(),
            Value::String(token_type.as_str().to_owned()),
        );
        claims
    }

    fn sign(&self, claims: &Claims) -> ApplicationResult<String> {
        encode(&Header::new(ALGORITHM), claims, &self.keys.encoding)
            .map_err(|err| ApplicationError::infrastructure_with("error to sign token", err))
    }

    // Signature and algorithm only; `exp` is checked by hand so that the
    // string and float forms are accepted as well.
    fn validation() -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.algorithms = vec![ALGORITHM];
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation
    }
}

#[async_trait]
impl TokenProvider for JwtTokenProvider {
    async fn generate(&self, user_id: UserId) -> ApplicationResult<String> {
        self.generate_with_claims(user_id, Claims::new()).await
    }

    async fn generate_with_claims(
        &self,
        user_id: UserId,
        extra: Claims,
    ) -> ApplicationResult<String> {
        let mut claims = self.canonical_claims(user_id, TokenType::Access, self.access_ttl);
        claims.extend(extra);
        self.sign(&claims)
    }

    async fn generate_refresh(&self, user_id: UserId) -> ApplicationResult<String> {
        let claims = self.canonical_claims(user_id, TokenType::Refresh, self.refresh_ttl);
        self.sign(&claims)
    }

    async fn verify(&self, token: &str) -> ApplicationResult<Claims> {
        let data = decode::<Claims>(token, &self.keys.decoding, &Self::validation()).map_err(
            |err| {
                tracing::debug!(error = %err, "token rejected");
                AuthError::InvalidToken
            },
        )?;

        let claims = data.claims;
        let exp = claims
            .get(claim_keys::EXPIRES_AT)
            .and_then(parse_timestamp)
            .ok_or(AuthError::InvalidToken)?;
        if exp <= Utc::now().timestamp() {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use serde_json::json;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn provider() -> JwtTokenProvider {
        JwtTokenProvider::new(
            SECRET,
            Duration::from_secs(3600),
            Duration::from_secs(7200),
        )
    }

    fn uid(id: u64) -> UserId {
        UserId::new(id).expect("valid id")
    }

    fn extra(value: Value) -> Claims {
        match value {
            Value::Object(map) => map,
            _ => panic!("claims must be an object"),
        }
    }

    fn assert_invalid_token(result: ApplicationResult<Claims>) {
        let err = result.expect_err("token must be rejected");
        assert_eq!(err.auth_kind(), Some(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn access_token_carries_canonical_claims() {
        let provider = provider();
        let token = provider.generate(uid(42)).await.expect("generate");
        let claims = provider.verify(&token).await.expect("verify");

        assert_eq!(claims[claim_keys::USER_ID], json!("42"));
        assert_eq!(claims[claim_keys::SUBJECT], json!("42"));
        assert_eq!(claims[claim_keys::TOKEN_TYPE], json!("access"));
        let iat = claims[claim_keys::ISSUED_AT].as_i64().expect("iat");
        let exp = claims[claim_keys::EXPIRES_AT].as_i64().expect("exp");
        assert_eq!(exp - iat, 3600);
        assert!(claims[claim_keys::TOKEN_ID].as_str().is_some());
    }

    #[tokio::test]
    async fn refresh_token_uses_refresh_ttl() {
        let provider = provider();
        let token = provider.generate_refresh(uid(7)).await.expect("generate");
        let claims = provider.verify(&token).await.expect("verify");

        assert_eq!(claims[claim_keys::TOKEN_TYPE], json!("refresh"));
        let iat = claims[claim_keys::ISSUED_AT].as_i64().expect("iat");
        let exp = claims[claim_keys::EXPIRES_AT].as_i64().expect("exp");
        assert_eq!(exp - iat, 7200);
    }

    #[tokio::test]
    async fn tokens_issued_back_to_back_differ() {
        let provider = provider();
        let a = provider.generate(uid(1)).await.expect("a");
        let b = provider.generate(uid(1)).await.expect("b");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn extra_claims_are_merged_and_win() {
        let provider = provider();
        let token = provider
            .generate_with_claims(uid(5), extra(json!({"roles": ["user"], "name": "Alice"})))
            .await
            .expect("generate");
        let claims = provider.verify(&token).await.expect("verify");
        assert_eq!(claims[claim_keys::ROLES], json!(["user"]));
        assert_eq!(claims[claim_keys::NAME], json!("Alice"));
        assert_eq!(claims[claim_keys::USER_ID], json!("5"));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let provider = provider();
        let past = Utc::now().timestamp() - 10;
        let token = provider
            .generate_with_claims(uid(5), extra(json!({"exp": past})))
            .await
            .expect("generate");
        assert_invalid_token(provider.verify(&token).await);
    }

    #[tokio::test]
    async fn string_and_float_exp_are_accepted() {
        let provider = provider();
        let future = Utc::now().timestamp() + 600;

        let as_string = provider
            .generate_with_claims(uid(5), extra(json!({"exp": future.to_string()})))
            .await
            .expect("generate");
        provider.verify(&as_string).await.expect("string exp");

        let as_float = provider
            .generate_with_claims(uid(5), extra(json!({"exp": future as f64 + 0.5})))
            .await
            .expect("generate");
        provider.verify(&as_float).await.expect("float exp");
    }

    #[tokio::test]
    async fn unparsable_exp_is_rejected() {
        let provider = provider();
        let token = provider
            .generate_with_claims(uid(5), extra(json!({"exp": "tomorrow"})))
            .await
            .expect("generate");
        assert_invalid_token(provider.verify(&token).await);
    }

    #[tokio::test]
    async fn tampered_signature_is_rejected() {
        let provider = provider();
        let token = provider.generate(uid(9)).await.expect("generate");
        let (head, signature) = token.rsplit_once('.').expect("three segments");
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", chars.into_iter().collect::<String>());
        assert_invalid_token(provider.verify(&tampered).await);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let other = JwtTokenProvider::new(
            b"another-secret-another-secret-xx",
            Duration::from_secs(3600),
            Duration::from_secs(3600),
        );
        let token = other.generate(uid(9)).await.expect("generate");
        assert_invalid_token(provider().verify(&token).await);
    }

    #[tokio::test]
    async fn alg_none_is_rejected() {
        let exp = Utc::now().timestamp() + 600;
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({"user_id": "9", "sub": "9", "exp": exp}).to_string(),
        );
        let token = format!("{header}.{payload}.");
        assert_invalid_token(provider().verify(&token).await);
    }

    #[tokio::test]
    async fn other_hmac_algorithm_is_rejected() {
        let exp = Utc::now().timestamp() + 600;
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({"user_id": "9", "sub": "9", "exp": exp}),
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode");
        assert_invalid_token(provider().verify(&token).await);
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        assert_invalid_token(provider().verify("not.a.jwt").await);
        assert_invalid_token(provider().verify("").await);
    }
}
