//! Credential store port - the single-slot credential cache.

use crate::domain::AccessCredential;

/// Port for the one-slot credential cache.
///
/// The cache is an explicitly owned value cell injected into the broker, not a
/// process-wide static, which keeps it trivially testable and swappable.
///
/// # Contract
///
/// - `get` returns the cached credential only while it is still valid; an
///   absent or expired slot reads as `None`. It never triggers issuance.
/// - `store` replaces any existing value unconditionally (last write wins).
/// - Replacement is atomic: concurrent readers observe either the old or the
///   new credential, never a partial one. No further synchronization is
///   required; redundant concurrent issuance is tolerated upstream.
///
/// Reads and writes are synchronous: the cache never suspends.
pub trait CredentialStore: Send + Sync {
    /// Return the cached credential if one is present and still valid.
    fn get(&self) -> Option<AccessCredential>;

    /// Replace the cached credential unconditionally.
    fn store(&self, credential: AccessCredential);
}
