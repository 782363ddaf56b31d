/*
 * Responsibility
 * - パスワードの one-way hash と照合 (Argon2id, PHC string)
 * - 照合は primitive 側の constant-time 比較に委譲する
 */
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

/// Hash a secret into a PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String, password_hash::Error> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| password_hash::Error::Crypto)?;
    let salt = SaltString::encode_b64(&salt_bytes)?;

    let argon2 = Argon2::default();
    Ok(argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a presented secret against a stored PHC string.
/// An unparseable stored hash counts as a mismatch.
pub fn verify(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let phc = hash("hunter2").unwrap();
        assert!(verify(&phc, "hunter2"));
        assert!(!verify(&phc, "hunter3"));
    }

    #[test]
    fn bad_stored_hash_never_matches() {
        assert!(!verify("not-a-phc-string", "hunter2"));
        assert!(!verify("", "hunter2"));
    }
}
