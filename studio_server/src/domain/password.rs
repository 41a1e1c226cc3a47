//! Salted SHA-256 password hashing.
//!
//! Stored form is `<salt>$<hex digest of salt || password>`.

use sha2::{Digest, Sha256};
use uuid::Uuid;

const SEPARATOR: char = '$';

pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest_hex(&salt, password);
    format!("{salt}{SEPARATOR}{digest}")
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once(SEPARATOR) else {
        return false;
    };
    let actual = digest_hex(salt, password);

    // Compare every byte so timing does not depend on the first mismatch.
    actual.len() == expected.len()
        && actual
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
