use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::config::StateMode;

/// How long a keyed verifier stays valid.
pub const KEYED_VERIFIER_TTL: Duration = Duration::from_secs(10 * 60);

/// Holds pending PKCE verifiers between the authorize redirect and the callback.
///
/// In single-slot mode there is one process-wide verifier and the `state`
/// argument is ignored: a second authorization silently replaces the first.
/// Keyed mode stores one verifier per OAuth `state` value until it expires.
#[derive(Debug)]
pub enum VerifierStore {
    Single(Mutex<Option<String>>),
    Keyed {
        ttl: Duration,
        entries: Mutex<HashMap<String, (String, Instant)>>,
    },
}

impl VerifierStore {
    pub fn new(mode: StateMode) -> Self {
        match mode {
            StateMode::Single => Self::single(),
            StateMode::Keyed => Self::keyed(KEYED_VERIFIER_TTL),
        }
    }

    pub fn single() -> Self {
        VerifierStore::Single(Mutex::new(None))
    }

    pub fn keyed(ttl: Duration) -> Self {
        VerifierStore::Keyed {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, VerifierStore::Keyed { .. })
    }

    pub async fn store(&self, state: Option<&str>, verifier: String) {
        match self {
            VerifierStore::Single(slot) => {
                *slot.lock().await = Some(verifier);
            }
            VerifierStore::Keyed { ttl, entries } => {
                let Some(state) = state else {
                    return;
                };
                let mut entries = entries.lock().await;
                let now = Instant::now();
                entries.retain(|_, (_, created)| now.duration_since(*created) < *ttl);
                entries.insert(state.to_string(), (verifier, now));
            }
        }
    }

    /// Returns the pending verifier without consuming it.
    pub async fn get(&self, state: Option<&str>) -> Option<String> {
        match self {
            VerifierStore::Single(slot) => slot.lock().await.clone(),
            VerifierStore::Keyed { ttl, entries } => {
                let state = state?;
                let mut entries = entries.lock().await;
                let expired = match entries.get(state) {
                    Some((verifier, created)) if created.elapsed() < *ttl => {
                        return Some(verifier.clone());
                    }
                    Some(_) => true,
                    None => false,
                };
                if expired {
                    entries.remove(state);
                }
                None
            }
        }
    }

    /// Drops the verifier if it is still the one that was used.
    ///
    /// A newer authorization may have replaced the slot in the meantime; that
    /// one stays pending.
    pub async fn consume(&self, state: Option<&str>, verifier: &str) {
        match self {
            VerifierStore::Single(slot) => {
                let mut slot = slot.lock().await;
                if slot.as_deref() == Some(verifier) {
                    *slot = None;
                }
            }
            VerifierStore::Keyed { entries, .. } => {
                let Some(state) = state else {
                    return;
                };
                let mut entries = entries.lock().await;
                if entries.get(state).is_some_and(|(stored, _)| stored == verifier) {
                    entries.remove(state);
                }
            }
        }
    }
}
