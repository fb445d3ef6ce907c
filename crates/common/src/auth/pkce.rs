//! PKCE (Proof Key for Code Exchange) implementation for OAuth 2.0
//!
//! Implements RFC 7636 for a public client with no secret. The verifier is a
//! 128-character string over the unreserved alphabet; the challenge is
//! `BASE64URL(SHA256(ASCII(verifier)))` without padding.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use gymreview_domain::constants::{
    PKCE_METHOD_S256, PKCE_VERIFIER_LENGTH, SESSION_KEY_CODE_VERIFIER,
};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::error::AuthError;
use crate::storage::KeyValueStore;

/// RFC 7636 unreserved characters (`A-Z a-z 0-9 - . _ ~`)
const UNRESERVED: &[u8; 66] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Largest multiple of 66 that fits in a byte; bytes at or above it are
/// rejected so every symbol is equally likely.
const ACCEPT_BELOW: u8 = 198;

const MIN_VERIFIER_LENGTH: usize = 43;

/// A PKCE code verifier
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct PkceVerifier(String);

impl PkceVerifier {
    /// Draw a fresh verifier from the OS random source
    ///
    /// # Errors
    /// `CryptoUnavailable` if the OS random source fails
    pub fn generate() -> Result<Self, AuthError> {
        Self::generate_with(&mut OsRng)
    }

    /// Draw a fresh verifier from `rng`
    ///
    /// # Errors
    /// `CryptoUnavailable` if `rng` fails to produce bytes
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, AuthError> {
        let mut out = String::with_capacity(PKCE_VERIFIER_LENGTH);
        let mut buf = [0u8; 64];

        while out.len() < PKCE_VERIFIER_LENGTH {
            rng.try_fill_bytes(&mut buf)
                .map_err(|e| AuthError::CryptoUnavailable(e.to_string()))?;

            for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
                if out.len() == PKCE_VERIFIER_LENGTH {
                    break;
                }
                out.push(char::from(UNRESERVED[usize::from(byte % 66)]));
            }
        }

        Ok(Self(out))
    }

    /// Validate an externally supplied verifier
    ///
    /// Returns `None` unless the value is 43-128 unreserved characters.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let len_ok = (MIN_VERIFIER_LENGTH..=PKCE_VERIFIER_LENGTH).contains(&value.len());
        let chars_ok = value.bytes().all(|b| UNRESERVED.contains(&b));
        (len_ok && chars_ok).then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// S256 challenge for this verifier
    #[must_use]
    pub fn challenge(&self) -> PkceChallenge {
        let hash = Sha256::digest(self.0.as_bytes());
        PkceChallenge(URL_SAFE_NO_PAD.encode(hash))
    }
}

impl fmt::Debug for PkceVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkceVerifier").field("len", &self.0.len()).finish_non_exhaustive()
    }
}

/// S256 code challenge, safe to put on the authorization redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceChallenge(String);

impl PkceChallenge {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Always `"S256"`
    #[must_use]
    pub const fn method(&self) -> &'static str {
        PKCE_METHOD_S256
    }
}

impl fmt::Display for PkceChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verifier together with its challenge
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: PkceVerifier,
    pub challenge: PkceChallenge,
}

impl PkcePair {
    fn from_verifier(verifier: PkceVerifier) -> Self {
        let challenge = verifier.challenge();
        Self { verifier, challenge }
    }
}

/// Session-scoped slot holding the one outstanding verifier
///
/// Built without storage (non-browser context) it still generates pairs but
/// persists nothing and never finds a verifier.
#[derive(Clone)]
pub struct PkceStore {
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl PkceStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage: Some(storage) }
    }

    #[must_use]
    pub const fn detached() -> Self {
        Self { storage: None }
    }

    /// Generate a pair and overwrite the stored verifier
    ///
    /// # Errors
    /// `CryptoUnavailable` or `Storage`
    pub fn generate(&self) -> Result<PkcePair, AuthError> {
        self.store(PkcePair::from_verifier(PkceVerifier::generate()?))
    }

    /// Same as [`generate`](Self::generate) with a caller-supplied RNG
    ///
    /// # Errors
    /// `CryptoUnavailable` or `Storage`
    pub fn generate_with<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<PkcePair, AuthError> {
        self.store(PkcePair::from_verifier(PkceVerifier::generate_with(rng)?))
    }

    fn store(&self, pair: PkcePair) -> Result<PkcePair, AuthError> {
        if let Some(storage) = &self.storage {
            storage.set_item(SESSION_KEY_CODE_VERIFIER, pair.verifier.as_str())?;
            debug!(len = pair.verifier.as_str().len(), "Stored PKCE verifier");
        }
        Ok(pair)
    }

    /// Stored verifier, if present and well-formed
    ///
    /// # Errors
    /// `Storage` when the slot cannot be read
    pub fn load(&self) -> Result<Option<PkceVerifier>, AuthError> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };

        let Some(raw) = storage.get_item(SESSION_KEY_CODE_VERIFIER)? else {
            return Ok(None);
        };

        let verifier = PkceVerifier::parse(&raw);
        if verifier.is_none() {
            warn!(len = raw.len(), "Ignoring malformed stored PKCE verifier");
        }
        Ok(verifier)
    }

    /// Delete the stored verifier
    ///
    /// # Errors
    /// `Storage` when the slot cannot be written
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Some(storage) = &self.storage {
            storage.remove_item(SESSION_KEY_CODE_VERIFIER)?;
            debug!("Cleared PKCE verifier");
        }
        Ok(())
    }
}

impl fmt::Debug for PkceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkceStore").field("attached", &self.storage.is_some()).finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::pkce.
    use super::*;
    use crate::storage::MemoryStorage;

    struct FailingRng;

    /// Repeats a fixed byte pattern
    struct PatternRng(Vec<u8>);

    impl RngCore for PatternRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for (slot, byte) in dest.iter_mut().zip(self.0.iter().cycle()) {
                *slot = *byte;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("no entropy")))
        }
    }

    /// Validates `PkceVerifier::generate` behavior for the verifier shape
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms the verifier is exactly 128 characters.
    /// - Ensures every character belongs to the unreserved alphabet.
    #[test]
    fn test_verifier_length_and_alphabet() {
        for _ in 0..20 {
            let verifier = PkceVerifier::generate().unwrap();
            assert_eq!(verifier.as_str().len(), 128);
            assert!(verifier.as_str().bytes().all(|b| UNRESERVED.contains(&b)));
        }
    }

    /// Validates `PkceVerifier::generate` behavior for the uniqueness scenario.
    ///
    /// Assertions:
    /// - Confirms two verifiers differ.
    #[test]
    fn test_unique_verifiers() {
        let a = PkceVerifier::generate().unwrap();
        let b = PkceVerifier::generate().unwrap();
        assert_ne!(a, b);
    }

    /// Validates `PkceVerifier::challenge` behavior for the RFC 7636 appendix B
    /// vector scenario.
    ///
    /// Assertions:
    /// - Confirms the challenge equals the published S256 value.
    #[test]
    fn test_rfc7636_challenge_vector() {
        let verifier = PkceVerifier::parse("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk").unwrap();
        assert_eq!(verifier.challenge().as_str(), "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
        assert_eq!(verifier.challenge().method(), "S256");
    }

    /// Validates `PkceVerifier::challenge` behavior for the encoding scenario.
    ///
    /// Assertions:
    /// - Ensures the challenge is 43 characters with no padding or `+`/`/`.
    #[test]
    fn test_challenge_is_base64url_without_padding() {
        let challenge = PkceVerifier::generate().unwrap().challenge();
        let s = challenge.as_str();
        assert_eq!(s.len(), 43);
        assert!(!s.contains('=') && !s.contains('+') && !s.contains('/'));
    }

    #[test]
    fn test_rejection_sampling_skips_high_bytes() {
        // 250 is rejected, 5 is accepted
        let mut rng = PatternRng(vec![250, 5]);
        let verifier = PkceVerifier::generate_with(&mut rng).unwrap();
        assert_eq!(verifier.as_str(), "F".repeat(128));
    }

    #[test]
    fn test_failing_rng_reports_crypto_unavailable() {
        let result = PkceVerifier::generate_with(&mut FailingRng);
        assert!(matches!(result, Err(AuthError::CryptoUnavailable(_))));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(PkceVerifier::parse(&"a".repeat(42)).is_none());
        assert!(PkceVerifier::parse(&"a".repeat(129)).is_none());
        assert!(PkceVerifier::parse(&format!("{}+", "a".repeat(50))).is_none());
        assert!(PkceVerifier::parse(&"a".repeat(43)).is_some());
        assert!(PkceVerifier::parse(&"~".repeat(128)).is_some());
    }

    #[test]
    fn test_debug_hides_value() {
        let verifier = PkceVerifier::parse(&"z".repeat(50)).unwrap();
        let printed = format!("{verifier:?}");
        assert!(!printed.contains("zzzz"));
    }

    #[test]
    fn test_store_overwrites_and_clears() {
        let storage = Arc::new(MemoryStorage::new());
        let store = PkceStore::new(storage.clone());

        let first = store.generate().unwrap();
        let second = store.generate().unwrap();
        assert_ne!(first.verifier, second.verifier);
        assert_eq!(store.load().unwrap(), Some(second.verifier));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_malformed_stored_verifier_is_missing() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(SESSION_KEY_CODE_VERIFIER, "short").unwrap();
        let store = PkceStore::new(storage);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_detached_store_persists_nothing() {
        let store = PkceStore::detached();
        let pair = store.generate().unwrap();
        assert_eq!(pair.verifier.as_str().len(), 128);
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }
}
