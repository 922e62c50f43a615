// Hand-rolled HMAC-signed bearer tokens for the super-admin surface.
//
// The token is JWT-shaped (header.payload.signature, base64url without
// padding) but issued and verified manually so that every check is
// explicit: segment count, byte-for-byte signature comparison, payload
// decode, expiry. Verification never panics and never propagates an
// error past this module; every failure collapses to a `VerifyError`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Subject claim carried by every super-admin token.
pub const SUPER_ADMIN_SUBJECT: &str = "super_admin";

/// Fixed token lifetime: 24 hours.
pub const TOKEN_TTL_SECS: i64 = 86_400;

#[derive(Debug, Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header { alg: "HS256", typ: "JWT" };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Claims for a freshly authenticated super-admin. Email is stored
    /// lowercased regardless of how the login request spelled it.
    pub fn super_admin(email: &str, now: i64) -> Self {
        Self {
            sub: SUPER_ADMIN_SUBJECT.to_string(),
            email: email.to_lowercase(),
            iat: now,
            exp: Some(now + TOKEN_TTL_SECS),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.sub == SUPER_ADMIN_SUBJECT
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("signing secret is empty")]
    EmptySecret,
    #[error("failed to serialize token claims: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a token was rejected. Kept internal for logging; the HTTP
/// boundary collapses every variant into one generic 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// Not exactly three dot-separated segments, or a segment failed
    /// base64 decoding.
    Malformed,
    /// Recomputed signature does not match the third segment.
    BadSignature,
    /// Payload segment is not valid claims JSON.
    BadPayload,
    /// Payload carried an `exp` in the past.
    Expired,
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            VerifyError::Malformed => "malformed token",
            VerifyError::BadSignature => "signature mismatch",
            VerifyError::BadPayload => "undecodable payload",
            VerifyError::Expired => "token expired",
        };
        write!(f, "{}", reason)
    }
}

/// Serialize and sign claims into a three-segment token string.
pub fn sign(claims: &Claims, secret: &str) -> Result<String, SignError> {
    if secret.is_empty() {
        return Err(SignError::EmptySecret);
    }

    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&HEADER)?);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{}.{}", header, payload);
    let signature = hmac_sha256(secret.as_bytes(), signing_input.as_bytes());

    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}

/// Verify a token string against the signing secret at time `now`
/// (Unix seconds). Fails closed: any malformed input is a rejection,
/// never a panic.
pub fn verify(token: &str, secret: &str, now: i64) -> Result<Claims, VerifyError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(VerifyError::Malformed);
    }

    let signing_input = format!("{}.{}", parts[0], parts[1]);
    let expected = hmac_sha256(secret.as_bytes(), signing_input.as_bytes());
    let presented = decode_segment(parts[2]).map_err(|_| VerifyError::Malformed)?;

    // Constant-time comparison; length mismatch compares unequal.
    if !bool::from(expected.as_slice().ct_eq(presented.as_slice())) {
        return Err(VerifyError::BadSignature);
    }

    let payload = decode_segment(parts[1]).map_err(|_| VerifyError::Malformed)?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| VerifyError::BadPayload)?;

    if let Some(exp) = claims.exp {
        if exp < now {
            return Err(VerifyError::Expired);
        }
    }

    Ok(claims)
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Decode a base64url segment, tolerating restored padding.
fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "k";
    const NOW: i64 = 1_700_000_000;

    fn issue() -> String {
        sign(&Claims::super_admin("admin@x.com", NOW), SECRET).unwrap()
    }

    #[test]
    fn issue_then_verify_round_trip() {
        let token = issue();
        let claims = verify(&token, SECRET, NOW).unwrap();
        assert_eq!(claims.sub, SUPER_ADMIN_SUBJECT);
        assert_eq!(claims.email, "admin@x.com");
        assert_eq!(claims.exp, Some(claims.iat + TOKEN_TTL_SECS));
    }

    #[test]
    fn email_is_lowercased_in_claims() {
        let token = sign(&Claims::super_admin("ADMIN@X.COM", NOW), SECRET).unwrap();
        let claims = verify(&token, SECRET, NOW).unwrap();
        assert_eq!(claims.email, "admin@x.com");
    }

    #[test]
    fn tampered_signature_fails() {
        let token = issue();
        let (head, sig) = token.rsplit_once('.').unwrap();

        // Flip each character of the signature segment in turn.
        for i in 0..sig.len() {
            let mut bytes = sig.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let mutated = format!("{}.{}", head, String::from_utf8(bytes).unwrap());
            assert!(
                verify(&mutated, SECRET, NOW).is_err(),
                "mutation at index {} was accepted",
                i
            );
        }
    }

    #[test]
    fn wrong_secret_fails() {
        let token = issue();
        assert_eq!(verify(&token, "other", NOW).unwrap_err(), VerifyError::BadSignature);
    }

    #[test]
    fn correctly_resigned_expired_token_still_fails() {
        let mut claims = Claims::super_admin("admin@x.com", NOW);
        claims.exp = Some(NOW - 1);
        let token = sign(&claims, SECRET).unwrap();
        match verify(&token, SECRET, NOW) {
            Err(VerifyError::Expired) => {}
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn missing_exp_is_accepted() {
        let mut claims = Claims::super_admin("admin@x.com", NOW);
        claims.exp = None;
        let token = sign(&claims, SECRET).unwrap();
        assert!(verify(&token, SECRET, NOW + TOKEN_TTL_SECS * 10).is_ok());
    }

    #[test]
    fn wrong_segment_count_fails_without_panicking() {
        let cases = [
            "",
            "one",
            "one.two",
            "one.two.three.four",
            "one.two.three.four.five",
            "...",
        ];
        for token in cases {
            match verify(token, SECRET, NOW) {
                Err(VerifyError::Malformed) | Err(VerifyError::BadSignature) => {}
                other => panic!("token {:?} produced {:?}", token, other),
            }
        }
    }

    #[test]
    fn padded_signature_segment_is_accepted() {
        let token = issue();
        let verified = verify(&format!("{}==", token), SECRET, NOW);
        assert!(verified.is_ok());
    }

    #[test]
    fn garbage_payload_fails_closed() {
        let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
        let payload = URL_SAFE_NO_PAD.encode(b"not json at all");
        let signing_input = format!("{}.{}", header, payload);
        let sig = URL_SAFE_NO_PAD.encode(hmac_sha256(SECRET.as_bytes(), signing_input.as_bytes()));
        let token = format!("{}.{}", signing_input, sig);
        assert_eq!(verify(&token, SECRET, NOW).unwrap_err(), VerifyError::BadPayload);
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let err = sign(&Claims::super_admin("admin@x.com", NOW), "").unwrap_err();
        assert!(matches!(err, SignError::EmptySecret));
    }
}
