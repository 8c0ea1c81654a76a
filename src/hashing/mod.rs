//! BLAKE3 hashing for claim keys.
//!
//! Hashes are used for fast indexing only (L1 exact-match keys and vector
//! point ids), never for verification, so 64-bit truncation is acceptable:
//! at practical cache sizes (millions of claims) the birthday-bound collision
//! probability is negligible, and a collision degrades to a cache miss or a
//! point overwrite rather than data corruption.

/// Full 256-bit hash of a sentence.
#[inline]
pub fn hash_sentence(sentence: &str) -> [u8; 32] {
    *blake3::hash(sentence.as_bytes()).as_bytes()
}

/// 64-bit truncation of a BLAKE3 hash.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Stable vector point id for a sentence.
#[inline]
pub fn claim_point_id(sentence: &str) -> u64 {
    hash_to_u64(sentence.as_bytes())
}
