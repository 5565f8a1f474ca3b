//! # Catalog Fingerprints
//!
//! Turns an unordered collection of pack sizes into a stable identifier.
//!
//! ## How It Works
//! ```text
//! [5000, 250, 2000, 500, 1000]
//!      │  sort ascending (duplicates kept)
//!      ▼
//! [250, 500, 1000, 2000, 5000]
//!      │  "250," "500," "1000," "2000," "5000,"
//!      ▼
//! SHA-256 ──► hex ──► first 16 chars ──► "415a075d1196b695"
//! ```
//!
//! Any reordering of the same multiset yields the same fingerprint. The
//! empty input hashes the empty stream and is not an error.

use sha2::{Digest, Sha256};

use crate::types::PackSize;

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 16;

/// Computes the order-independent fingerprint of a size multiset.
///
/// ## Example
/// ```rust
/// use packulator_core::fingerprint::canonicalize;
///
/// assert_eq!(canonicalize(&[3, 1, 2]), canonicalize(&[1, 2, 3]));
/// assert_ne!(canonicalize(&[1, 2]), canonicalize(&[1, 1, 2]));
/// assert_eq!(canonicalize(&[]), "e3b0c44298fc1c14");
/// ```
pub fn canonicalize(sizes: &[PackSize]) -> String {
    let mut sorted = sizes.to_vec();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    for size in &sorted {
        hasher.update(format!("{size},").as_bytes());
    }

    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// True when `value` has the shape of a fingerprint (16 lowercase hex chars).
pub fn is_fingerprint(value: &str) -> bool {
    value.len() == FINGERPRINT_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(canonicalize(&[]), "e3b0c44298fc1c14");
        assert_eq!(canonicalize(&[1]), "e9586b616536950f");
        assert_eq!(canonicalize(&[1, 2, 3]), "07554f8f9b9f49ed");
        assert_eq!(canonicalize(&[1, 1, 2]), "ca71396973e56056");
        assert_eq!(
            canonicalize(&[250, 500, 1000, 2000, 5000]),
            "415a075d1196b695"
        );
    }

    #[test]
    fn test_permutation_invariance() {
        let orderings: [&[PackSize]; 4] = [
            &[250, 500, 1000, 2000, 5000],
            &[5000, 2000, 1000, 500, 250],
            &[1000, 250, 5000, 500, 2000],
            &[500, 5000, 250, 2000, 1000],
        ];
        for sizes in orderings {
            assert_eq!(canonicalize(sizes), "415a075d1196b695");
        }

        assert_eq!(canonicalize(&[2, 1, 1]), canonicalize(&[1, 2, 1]));
    }

    #[test]
    fn test_distinct_multisets_differ() {
        let multisets: [&[PackSize]; 7] = [
            &[],
            &[1],
            &[1, 1],
            &[1, 2],
            &[12],
            &[1, 2, 3],
            &[123],
        ];
        let hashes: std::collections::HashSet<String> =
            multisets.iter().map(|sizes| canonicalize(sizes)).collect();
        assert_eq!(hashes.len(), multisets.len());
    }

    #[test]
    fn test_is_fingerprint() {
        assert!(is_fingerprint("415a075d1196b695"));
        assert!(is_fingerprint(&canonicalize(&[7, 11])));
        assert!(!is_fingerprint(""));
        assert!(!is_fingerprint("415A075D1196B695"));
        assert!(!is_fingerprint("415a075d1196b69"));
        assert!(!is_fingerprint("415a075d1196b69z"));
    }
}
