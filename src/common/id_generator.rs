// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., U_K7NP3X for users)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - ~1 billion combinations per entity type (32^6)
//! - Easy to read, type, and communicate verbally

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
    /// Review (R_)
    Review,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Review => "R",
        }
    }
}

/// Generate a prefixed ID with the default length of 6 characters
pub fn generate_id(prefix: EntityPrefix) -> String {
    generate_id_with_length(prefix, 6)
}

/// Generate a prefixed ID with a custom length
pub fn generate_id_with_length(prefix: EntityPrefix, length: usize) -> String {
    format!("{}_{}", prefix.as_str(), generate_raw_id(length))
}

/// Generate a raw Crockford Base32 string without any prefix
pub fn generate_raw_id(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CROCKFORD_ALPHABET.len());
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a user ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

/// Generate a review ID (R_XXXXXX)
pub fn generate_review_id() -> String {
    generate_id(EntityPrefix::Review)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_prefix() {
        let user_id = generate_user_id();
        let review_id = generate_review_id();

        assert!(user_id.starts_with("U_"));
        assert!(review_id.starts_with("R_"));
        assert_eq!(user_id.len(), 8); // "U_" + 6 chars
        assert_eq!(review_id.len(), 8);
    }

    #[test]
    fn test_raw_ids_use_crockford_alphabet() {
        let id = generate_raw_id(32);
        assert_eq!(id.len(), 32);
        for c in id.bytes() {
            assert!(
                CROCKFORD_ALPHABET.contains(&c),
                "unexpected character: {}",
                c as char
            );
        }
    }

    #[test]
    fn test_custom_length() {
        let id = generate_id_with_length(EntityPrefix::Review, 10);
        assert_eq!(id.len(), 12); // "R_" + 10 chars
    }
}
