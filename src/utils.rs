use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, RngCore, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::PkceChallenge;

/// Returns base64url of 32 random bytes, 43 characters without padding.
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_pkce() -> PkceChallenge {
    let verifier = generate_code_verifier();
    let challenge = generate_code_challenge(&verifier);
    PkceChallenge {
        verifier,
        challenge,
    }
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Keeps the first `keep` characters of a secret and elides the rest.
pub fn mask(secret: &str, keep: usize) -> String {
    if secret.chars().count() <= keep {
        return "*".repeat(secret.chars().count());
    }
    let prefix: String = secret.chars().take(keep).collect();
    format!("{prefix}...")
}
