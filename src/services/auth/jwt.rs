/*
 * Responsibility
 * - 自己完結トークンの発行と検証 (HS256, 共有シークレット)
 * - expiry は注入された Clock に対して判定する (leeway なし、hard boundary)
 */
use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::extractors::principal::{Principal, RoleClass};

/// Time source for issuance and expiry checks.
///
/// Injected the same way the directory backends are, so tests can move time
/// without touching the system clock.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally not a token we issued (segments, base64, claims shape).
    #[error("malformed token")]
    Malformed,

    /// Structure is fine but the signature does not match our secret.
    #[error("invalid signature")]
    InvalidSignature,

    /// Past its hard expiry boundary.
    #[error("token expired")]
    Expired,

    /// Signing-side failure. Should not occur under valid configuration.
    #[error("token encoding failed")]
    Encoding,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies the service's bearer tokens.
///
/// Pure over (secret, claims, clock): verifying the same unexpired token any
/// number of times yields the same principal and has no side effects.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenAuthority")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenAuthority {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced below against the injected clock, with no leeway.
        // jsonwebtoken's own exp check (system clock + default leeway) stays off.
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Build and sign a token for `subject` with the given role and lifetime.
    ///
    /// `ttl` must be strictly positive.
    pub fn issue(&self, subject: &str, role: RoleClass, ttl: Duration) -> Result<String, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::Encoding);
        }

        let iat = self.clock.now_unix();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.as_str().to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!(error = %e, "failed to sign token");
                TokenError::Encoding
            },
        )
    }

    /// Verify a presented token and rebuild the principal it encodes.
    ///
    /// Expiry is a hard boundary: the token is dead at `exp`, not after it.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        let claims = data.claims;
        if self.clock.now_unix() >= claims.exp {
            return Err(TokenError::Expired);
        }

        let role = RoleClass::parse(&claims.role).ok_or(TokenError::Malformed)?;
        Ok(Principal::new(claims.sub, role))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;

    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn at(epoch: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(epoch)))
        }

        fn advance(&self, seconds: i64) {
            self.0.fetch_add(seconds, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_unix(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    const SECRET: &[u8] = b"unit-test-secret-0123456789abcdef";

    fn authority(clock: Arc<ManualClock>) -> TokenAuthority {
        TokenAuthority::new(SECRET, clock)
    }

    #[test]
    fn round_trip_preserves_subject_and_role() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock);

        let token = auth
            .issue("google_12345", RoleClass::User, Duration::seconds(3600))
            .unwrap();
        let principal = auth.verify(&token).unwrap();

        assert_eq!(principal.id, "google_12345");
        assert_eq!(principal.role, RoleClass::User);
    }

    #[test]
    fn expiry_is_a_hard_boundary() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock.clone());
        let token = auth
            .issue("root", RoleClass::Admin, Duration::seconds(60))
            .unwrap();

        clock.advance(59);
        assert!(auth.verify(&token).is_ok());

        // Dead at exp itself, not one second later.
        clock.advance(1);
        assert_eq!(auth.verify(&token), Err(TokenError::Expired));

        clock.advance(1000);
        assert_eq!(auth.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn any_payload_mutation_invalidates_the_signature() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock);
        let token = auth
            .issue("root", RoleClass::Admin, Duration::seconds(3600))
            .unwrap();

        let (head, rest) = token.split_once('.').unwrap();
        let (payload, sig) = rest.split_once('.').unwrap();

        for i in 0..payload.len() {
            let mut bytes = payload.as_bytes().to_vec();
            // Swap within the base64 alphabet so the mutation stays structural.
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = format!("{head}.{}.{sig}", String::from_utf8(bytes).unwrap());
            if tampered == token {
                continue;
            }

            let outcome = auth.verify(&tampered);
            assert!(
                matches!(
                    outcome,
                    Err(TokenError::InvalidSignature) | Err(TokenError::Malformed)
                ),
                "tampered byte {i} was accepted: {outcome:?}"
            );
        }
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let clock = ManualClock::at(1_700_000_000);
        let ours = authority(clock.clone());
        let theirs = TokenAuthority::new(b"some-other-secret-material-------", clock);

        let token = theirs
            .issue("root", RoleClass::Admin, Duration::seconds(3600))
            .unwrap();
        assert_eq!(ours.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_is_malformed_not_a_signature_failure() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock);

        assert_eq!(auth.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(auth.verify(""), Err(TokenError::Malformed));
        assert_eq!(auth.verify("a.b"), Err(TokenError::Malformed));
    }

    #[test]
    fn unknown_role_claim_is_malformed() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock.clone());

        // Sign a structurally valid token whose role is outside the enum.
        let claims = serde_json::json!({
            "sub": "root",
            "role": "SUPERUSER",
            "iat": clock.now_unix(),
            "exp": clock.now_unix() + 3600,
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(auth.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn verification_is_idempotent() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock);
        let token = auth
            .issue("root", RoleClass::Admin, Duration::seconds(3600))
            .unwrap();

        let first = auth.verify(&token).unwrap();
        let second = auth.verify(&token).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.role, second.role);
    }

    #[test]
    fn non_positive_ttl_is_refused() {
        let clock = ManualClock::at(1_700_000_000);
        let auth = authority(clock);

        assert_eq!(
            auth.issue("root", RoleClass::Admin, Duration::zero()),
            Err(TokenError::Encoding)
        );
        assert_eq!(
            auth.issue("root", RoleClass::Admin, Duration::seconds(-5)),
            Err(TokenError::Encoding)
        );
    }
}
