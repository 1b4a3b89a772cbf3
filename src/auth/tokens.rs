//! Session record and embedded token claims

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session: bearer token, client-side watermark, optional refresh token.
///
/// A refresh token can only exist alongside an access token, so clearing
/// the record never leaves refresh-only state behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: Option<String>,
}

impl SessionRecord {
    /// Watermark is `now + hours_valid`, saturating at the latest
    /// representable instant.
    pub fn new(
        access_token: String,
        hours_valid: u32,
        refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = Duration::try_hours(i64::from(hours_valid))
            .and_then(|valid| now.checked_add_signed(valid))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            access_token,
            expires_at,
            refresh_token,
        }
    }

    /// True once the client-computed watermark has passed.
    pub fn watermark_passed(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Expiry as claimed by the token itself.
    pub fn claim_expiry(&self) -> ClaimExpiry {
        claim_expiry(&self.access_token)
    }

    /// The embedded `exp` claim is canonical; the watermark is checked
    /// first because it needs no decoding. Either one passing expires
    /// the session.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if self.watermark_passed(now) {
            return true;
        }
        match self.claim_expiry() {
            ClaimExpiry::At(exp) => now >= exp,
            ClaimExpiry::Absent => false,
            ClaimExpiry::Unreadable => true,
        }
    }
}

/// Tokens handed out by the login and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTokens {
    #[serde(alias = "token", alias = "access_token")]
    pub access_token: String,
    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

/// Result of reading the `exp` claim out of a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimExpiry {
    At(DateTime<Utc>),
    /// Payload decoded but carries no `exp`.
    Absent,
    /// Not a three-part JWT, or the payload is not base64url JSON.
    Unreadable,
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<f64>,
}

/// Decode the JWT payload (no signature check) and pull out `exp`.
pub fn claim_expiry(token: &str) -> ClaimExpiry {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return ClaimExpiry::Unreadable,
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return ClaimExpiry::Unreadable;
    };
    let Ok(claims) = serde_json::from_slice::<Claims>(&bytes) else {
        return ClaimExpiry::Unreadable;
    };

    match claims.exp {
        Some(exp) => DateTime::<Utc>::from_timestamp(exp as i64, 0)
            .map_or(ClaimExpiry::Unreadable, ClaimExpiry::At),
        None => ClaimExpiry::Absent,
    }
}

/// Build an unsigned JWT carrying the given `exp`.
#[cfg(test)]
pub(crate) fn test_jwt(exp: Option<DateTime<Utc>>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = match exp {
        Some(exp) => serde_json::json!({ "sub": "user-1", "exp": exp.timestamp() }),
        None => serde_json::json!({ "sub": "user-1" }),
    };
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_claim_expiry_reads_exp() {
        let exp = t0() + Duration::minutes(30);
        assert_eq!(claim_expiry(&test_jwt(Some(exp))), ClaimExpiry::At(exp));
    }

    #[test]
    fn test_claim_expiry_without_exp() {
        assert_eq!(claim_expiry(&test_jwt(None)), ClaimExpiry::Absent);
    }

    #[test]
    fn test_claim_expiry_garbage() {
        assert_eq!(claim_expiry("opaque-token"), ClaimExpiry::Unreadable);
        assert_eq!(claim_expiry("a.!!!.c"), ClaimExpiry::Unreadable);
        assert_eq!(claim_expiry("a.b.c.d"), ClaimExpiry::Unreadable);
    }

    #[test]
    fn test_claim_expiry_padded_payload() {
        let exp = t0();
        let token = test_jwt(Some(exp));
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[1].push_str("==");
        assert_eq!(claim_expiry(&parts.join(".")), ClaimExpiry::At(exp));
    }

    #[test]
    fn test_watermark_from_hours() {
        let record = SessionRecord::new("t".into(), 2, None, t0());
        assert_eq!(record.expires_at, t0() + Duration::hours(2));
        assert!(!record.watermark_passed(t0() + Duration::minutes(119)));
        assert!(record.watermark_passed(t0() + Duration::hours(2)));
    }

    #[test]
    fn test_huge_hours_saturate_watermark() {
        let record = SessionRecord::new(test_jwt(None), u32::MAX, None, t0());
        assert_eq!(record.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!record.is_expired(t0()));
    }

    #[test]
    fn test_expiry_takes_stricter_source() {
        // Claim earlier than watermark
        let token = test_jwt(Some(t0() + Duration::minutes(10)));
        let record = SessionRecord::new(token, 1, None, t0());
        assert!(!record.is_expired(t0() + Duration::minutes(9)));
        assert!(record.is_expired(t0() + Duration::minutes(10)));

        // Watermark earlier than claim
        let token = test_jwt(Some(t0() + Duration::hours(5)));
        let record = SessionRecord::new(token, 1, None, t0());
        assert!(record.is_expired(t0() + Duration::hours(1)));
    }

    #[test]
    fn test_zero_hours_is_expired() {
        let token = test_jwt(Some(t0() + Duration::hours(1)));
        let record = SessionRecord::new(token, 0, None, t0());
        assert!(record.is_expired(t0()));
    }

    #[test]
    fn test_unreadable_token_is_expired() {
        let record = SessionRecord::new("opaque".into(), 1, None, t0());
        assert!(record.is_expired(t0()));
    }

    #[test]
    fn test_issued_tokens_aliases() {
        let issued: IssuedTokens =
            serde_json::from_str(r#"{"token":"abc","refresh_token":"def"}"#).unwrap();
        assert_eq!(issued.access_token, "abc");
        assert_eq!(issued.refresh_token.as_deref(), Some("def"));

        let issued: IssuedTokens = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(issued.refresh_token, None);
    }
}
