use sha2::{Digest, Sha256};
use uuid::Uuid;

pub fn new_salt() -> String {
    Uuid::now_v7().simple().to_string()
}

pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    let actual = hash_password(salt, password);
    // Constant-time over the digest bytes.
    actual.len() == expected_hash.len()
        && actual
            .bytes()
            .zip(expected_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

pub fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let salt = new_salt();
        let other_salt = new_salt();
        let hash = hash_password(&salt, "hunter2");
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, "hunter2");
        assert_ne!(hash, hash_password(&other_salt, "hunter2"));
        assert!(verify_password(&salt, "hunter2", &hash));
        assert!(!verify_password(&salt, "hunter3", &hash));
        assert!(!verify_password(&salt, "hunter2", "short"));
    }

    #[test]
    fn email_helpers() {
        assert_eq!(normalize_email("  Sari@Example.COM "), "sari@example.com");
        assert!(looks_like_email("sari@example.com"));
        assert!(!looks_like_email("sari.example.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("sari@"));
        assert!(!looks_like_email("a@b@c"));
    }
}
