//! In-process single-slot credential cache.

use std::sync::RwLock;

use chrono::Utc;

use crate::domain::AccessCredential;
use crate::ports::CredentialStore;

/// Single-slot, last-write-wins credential cache.
///
/// The slot holds at most one credential for the process lifetime; nothing is
/// persisted across restarts. Replacement swaps the whole `Option`, so
/// concurrent readers see either the previous credential or the new one.
/// There is deliberately no guard around the caller's check-then-issue
/// sequence: concurrent callers that both observe an expired slot may both
/// issue and overwrite, which is tolerated (at-least-one issuance, not
/// exactly-one).
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: RwLock<Option<AccessCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Option<AccessCredential> {
        self.slot
            .read()
            .expect("credential slot lock poisoned")
            .clone()
            .filter(|credential| credential.is_valid_at(Utc::now()))
    }

    fn store(&self, credential: AccessCredential) {
        *self.slot.write().expect("credential slot lock poisoned") = Some(credential);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_credential(token: &str) -> AccessCredential {
        AccessCredential::new(token, Utc::now() + Duration::minutes(30))
    }

    fn expired_credential(token: &str) -> AccessCredential {
        AccessCredential::new(token, Utc::now() - Duration::seconds(1))
    }

    #[test]
    fn empty_store_reads_as_absent() {
        let store = InMemoryCredentialStore::new();
        assert!(store.get().is_none());
    }

    #[test]
    fn stored_valid_credential_is_returned() {
        let store = InMemoryCredentialStore::new();
        store.store(valid_credential("T1"));

        let cached = store.get().expect("valid credential should be cached");
        assert_eq!(cached.token(), "T1");
    }

    #[test]
    fn expired_credential_reads_as_absent() {
        let store = InMemoryCredentialStore::new();
        store.store(expired_credential("stale"));

        assert!(store.get().is_none());
    }

    #[test]
    fn store_replaces_unconditionally() {
        let store = InMemoryCredentialStore::new();
        store.store(valid_credential("T1"));
        store.store(valid_credential("T2"));

        assert_eq!(store.get().unwrap().token(), "T2");
    }

    #[test]
    fn replacement_can_overwrite_with_an_expired_value() {
        // Last write wins even when the newcomer is already expired; the next
        // read simply observes an absent slot.
        let store = InMemoryCredentialStore::new();
        store.store(valid_credential("T1"));
        store.store(expired_credential("T2"));

        assert!(store.get().is_none());
    }

    #[test]
    fn concurrent_readers_observe_whole_values() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryCredentialStore::new());
        store.store(valid_credential("seed"));

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    store.store(valid_credential(&format!("tok-{i}")));
                }
            })
        };

        for _ in 0..200 {
            if let Some(credential) = store.get() {
                let token = credential.token();
                assert!(token == "seed" || token.starts_with("tok-"));
            }
        }

        writer.join().unwrap();
    }
}
