mod verifier;

pub use verifier::KEYED_VERIFIER_TTL;
pub use verifier::VerifierStore;
