//! State Hashing for Verification
//!
//! Provides deterministic hashing of game state for:
//! - Replay validation
//! - Cross-build determinism checks

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 behind a domain separator. Fields are fed as raw bytes
/// with no framing, so two callers agree on a hash only if they update
/// the same fields in the same order.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for session state.
    pub fn for_session_state() -> Self {
        Self::new(b"TILE_MERGE_STATE_V1")
    }

    /// Create hasher for a recorded input log.
    pub fn for_input_log() -> Self {
        Self::new(b"TILE_MERGE_INPUTS_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a session state hash.
///
/// Turn and the initial seed pair are always hashed first; `add_state`
/// appends the rest in a fixed order.
pub fn compute_state_hash<F>(turn: u32, seed: [u8; 2], add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_session_state();

    hasher.update_u32(turn);
    hasher.update_bytes(&seed);

    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_determinism() {
        let mut h1 = StateHasher::for_session_state();
        h1.update_u32(42);
        h1.update_u8(7);

        let mut h2 = StateHasher::for_session_state();
        h2.update_u32(42);
        h2.update_u8(7);

        assert_eq!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_domain_separation() {
        let mut state = StateHasher::for_session_state();
        state.update_u8(1);
        let mut inputs = StateHasher::for_input_log();
        inputs.update_u8(1);

        assert_ne!(state.finalize(), inputs.finalize());
    }

    #[test]
    fn test_compute_state_hash() {
        let hash = compute_state_hash(100, [0xde, 0xad], |hasher| {
            hasher.update_bytes(&[1, 2, 3]);
            hasher.update_bool(true);
        });

        let hash2 = compute_state_hash(100, [0xde, 0xad], |hasher| {
            hasher.update_bytes(&[1, 2, 3]);
            hasher.update_bool(true);
        });
        assert_eq!(hash, hash2);

        let hash3 = compute_state_hash(101, [0xde, 0xad], |hasher| {
            hasher.update_bytes(&[1, 2, 3]);
            hasher.update_bool(true);
        });
        assert_ne!(hash, hash3);
    }
}
