//! Name checksums used to accelerate routing-table lookups.
//!
//! Every named node in the routing tree stores a 32-bit checksum of its name
//! next to the name itself. Lookups compare checksums first and only fall
//! back to a full string comparison when the checksums match, which keeps
//! the common miss case to a single integer compare.
//!
//! The checksum is FNV-1a (32-bit). It is deterministic within a process
//! run, but callers must never treat a checksum match as equality on its
//! own: collisions are tolerated and are always resolved by the string
//! comparison that follows.

const FNV_32_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_32_PRIME: u32 = 16_777_619;

/// Computes the case-sensitive checksum of `data`.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hash = FNV_32_OFFSET_BASIS;
    for byte in data {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_32_PRIME);
    }
    hash
}

/// Computes the case-insensitive checksum of `data`.
///
/// Two byte sequences that differ only by ASCII case produce identical
/// output. Used for directory and host names, which match without regard
/// to case.
pub fn checksum_ignore_case(data: &[u8]) -> u32 {
    let mut hash = FNV_32_OFFSET_BASIS;
    for byte in data {
        hash ^= u32::from(byte.to_ascii_lowercase());
        hash = hash.wrapping_mul(FNV_32_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(checksum(b"images"), checksum(b"images"));
        assert_eq!(checksum_ignore_case(b"images"), checksum_ignore_case(b"images"));
    }

    #[test]
    fn case_sensitive_variant_distinguishes_case() {
        assert_ne!(checksum(b"Images"), checksum(b"images"));
    }

    #[test]
    fn case_insensitive_variant_folds_ascii_case() {
        assert_eq!(checksum_ignore_case(b"Images"), checksum_ignore_case(b"images"));
        assert_eq!(checksum_ignore_case(b"EXAMPLE.COM"), checksum_ignore_case(b"example.com"));
    }

    #[test]
    fn distinct_names_usually_differ() {
        assert_ne!(checksum(b"logo"), checksum(b"icon"));
        assert_ne!(checksum_ignore_case(b"logo"), checksum_ignore_case(b"icon"));
    }

    // "costarring" and "liquid" are a known colliding pair for 32-bit
    // FNV-1a. Routing code relies on the string comparison behind the
    // checksum to keep such pairs apart.
    #[test]
    fn known_collision_pair_collides() {
        assert_eq!(checksum(b"costarring"), checksum(b"liquid"));
        assert_ne!(b"costarring" as &[u8], b"liquid" as &[u8]);
    }

    #[test]
    fn empty_input_is_offset_basis() {
        assert_eq!(checksum(b""), FNV_32_OFFSET_BASIS);
        assert_eq!(checksum_ignore_case(b""), FNV_32_OFFSET_BASIS);
    }
}
