// src/application/commands/auth/claims.rs
//
// Claim values reach us through different decode paths, so the subject and
// timestamps may be strings, integers or floats. Everything that reads them
// goes through these helpers.
use crate::application::{
    AuthError,
    dto::{Claims, claim_keys},
};
use crate::domain::user::UserId;
use serde_json::Value;
use std::time::Duration;

const BEARER_PREFIX: &str = "Bearer ";

// Largest integer an f64 represents exactly.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Trim whitespace and drop a case-insensitive `Bearer ` prefix.
pub fn sanitize_bearer(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => {
            trimmed[BEARER_PREFIX.len()..].trim()
        }
        _ => trimmed,
    }
}

/// Read the user id from `user_id`, falling back to `sub`.
pub fn extract_user_id(claims: &Claims) -> Result<UserId, AuthError> {
    claims
        .get(claim_keys::USER_ID)
        .or_else(|| claims.get(claim_keys::SUBJECT))
        .ok_or(AuthError::InvalidSubjectClaim)
        .and_then(parse_user_id)
}

/// Accepts a decimal string, an unsigned integer or an integral float.
pub fn parse_user_id(value: &Value) -> Result<UserId, AuthError> {
    let raw = match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(exact_u64)),
        _ => None,
    };

    raw.and_then(|id| UserId::new(id).ok())
        .ok_or(AuthError::InvalidSubjectClaim)
}

/// Unix seconds from a numeric or string claim value.
pub fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < MAX_EXACT_F64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn expires_at(claims: &Claims) -> Option<i64> {
    claims.get(claim_keys::EXPIRES_AT).and_then(parse_timestamp)
}

/// Remaining lifetime according to the `exp` claim. `None` when the claim is
/// missing or already in the past.
pub fn ttl_until(claims: &Claims, now_unix: i64) -> Option<Duration> {
    let remaining = expires_at(claims)?.checked_sub(now_unix)?;
    u64::try_from(remaining)
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

fn exact_u64(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= MAX_EXACT_F64 {
        Some(f as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn sanitize_strips_prefix_in_any_case() {
        assert_eq!(sanitize_bearer("  Bearer abc.def "), "abc.def");
        assert_eq!(sanitize_bearer("bearer abc"), "abc");
        assert_eq!(sanitize_bearer("BEARER   abc"), "abc");
        assert_eq!(sanitize_bearer("abc"), "abc");
        assert_eq!(sanitize_bearer("Bearerabc"), "Bearerabc");
        assert_eq!(sanitize_bearer("é"), "é");
    }

    #[test]
    fn user_id_accepts_string_integer_and_float() {
        assert_eq!(parse_user_id(&json!("42")).unwrap().get(), 42);
        assert_eq!(parse_user_id(&json!(" 42 ")).unwrap().get(), 42);
        assert_eq!(parse_user_id(&json!(42)).unwrap().get(), 42);
        assert_eq!(parse_user_id(&json!(42.0)).unwrap().get(), 42);
        assert_eq!(
            parse_user_id(&json!("18446744073709551615")).unwrap().get(),
            u64::MAX
        );
    }

    #[test]
    fn user_id_fails_closed() {
        for bad in [
            json!(-1),
            json!(1.5),
            json!("abc"),
            json!(""),
            json!(0),
            json!(null),
            json!(true),
            json!([1]),
            json!(1e300),
        ] {
            assert_eq!(
                parse_user_id(&bad),
                Err(AuthError::InvalidSubjectClaim),
                "{bad}"
            );
        }
    }

    #[test]
    fn extract_prefers_user_id_over_sub() {
        let c = claims(json!({ "user_id": "7", "sub": "9" }));
        assert_eq!(extract_user_id(&c).unwrap().get(), 7);

        let c = claims(json!({ "sub": "9" }));
        assert_eq!(extract_user_id(&c).unwrap().get(), 9);

        let c = claims(json!({ "exp": 1 }));
        assert_eq!(extract_user_id(&c), Err(AuthError::InvalidSubjectClaim));
    }

    #[test]
    fn timestamps_in_every_shape() {
        assert_eq!(parse_timestamp(&json!(1_700_000_000)), Some(1_700_000_000));
        assert_eq!(parse_timestamp(&json!(1_700_000_000.9)), Some(1_700_000_000));
        assert_eq!(parse_timestamp(&json!("1700000000")), Some(1_700_000_000));
        assert_eq!(parse_timestamp(&json!("soon")), None);
        assert_eq!(parse_timestamp(&json!({})), None);
    }

    #[test]
    fn ttl_is_remaining_lifetime() {
        let c = claims(json!({ "exp": 1_000 }));
        assert_eq!(ttl_until(&c, 400), Some(Duration::from_secs(600)));
        assert_eq!(ttl_until(&c, 1_000), None);
        assert_eq!(ttl_until(&c, 2_000), None);
        assert_eq!(ttl_until(&claims(json!({})), 0), None);
    }
}
