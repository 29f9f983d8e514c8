use spotnow::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // 32 random bytes, base64url without padding
    assert_eq!(verifier.len(), 43);
    assert!(
        verifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );

    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let challenge = generate_code_challenge("test_verifier_123");
    assert_eq!(challenge, "HGfpffSApehaWh1OQoi0h-f-k3IZ1CickraFS3UbMvk");

    // deterministic
    assert_eq!(challenge, generate_code_challenge("test_verifier_123"));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));
}

#[test]
fn test_code_challenge_is_url_safe() {
    for _ in 0..64 {
        let challenge = generate_code_challenge(&generate_code_verifier());
        assert_eq!(challenge.len(), 43);
        assert!(!challenge.contains('+'));
        assert!(!challenge.contains('/'));
        assert!(!challenge.contains('='));
    }
}

#[test]
fn test_generate_pkce_pairs_match() {
    let pkce = generate_pkce();
    assert_eq!(pkce.challenge, generate_code_challenge(&pkce.verifier));
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_mask() {
    assert_eq!(mask("AQDxyz1234567890", 10), "AQDxyz1234...");
    assert_eq!(mask("short", 10), "*****");
    assert_eq!(mask("", 10), "");
}
