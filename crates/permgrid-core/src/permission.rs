//! The permission mask and its text codec.
//!
//! A [`PermissionSet`] is a 3-bit mask over {owner, read, write}. The text
//! form uses one letter per bit (`o`, `r`, `w`); encoding is canonical,
//! decoding is order- and duplicate-tolerant.

use serde::{Deserialize, Serialize};
use std::fmt;

const OWNER_BIT: u8 = 0b100;
const READ_BIT: u8 = 0b010;
const WRITE_BIT: u8 = 0b001;

/// A 3-bit permission mask over {owner, read, write}.
///
/// Operations take and return masks by value. The empty mask means
/// "no permissions" and is never a legal steady state for a stored entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PermissionSet(u8);

impl PermissionSet {
    /// The empty mask.
    pub const EMPTY: Self = Self(0);

    /// Owner permission only.
    pub const OWNER: Self = Self(OWNER_BIT);

    /// Read permission only.
    pub const READ: Self = Self(READ_BIT);

    /// Write permission only.
    pub const WRITE: Self = Self(WRITE_BIT);

    /// All three permissions.
    pub const ALL: Self = Self(OWNER_BIT | READ_BIT | WRITE_BIT);

    /// Decode permission text into a mask.
    ///
    /// Each `o`, `r`, or `w` character contributes its bit; every other
    /// character is silently skipped. The result is order-independent and
    /// duplicate-tolerant: `"rr"` decodes the same as `"r"`.
    pub fn decode(text: &str) -> Self {
        let mut mask = 0;
        for c in text.chars() {
            match c {
                'o' => mask |= OWNER_BIT,
                'r' => mask |= READ_BIT,
                'w' => mask |= WRITE_BIT,
                _ => {}
            }
        }
        Self(mask)
    }

    /// Render the mask as canonical permission text.
    ///
    /// Letters always appear in `o`, `r`, `w` order, each at most once.
    /// `decode(encode(p)) == p` for every mask, but encode canonicalizes,
    /// so arbitrary input text does not round-trip through decode.
    pub fn encode(&self) -> String {
        let mut text = String::with_capacity(3);
        if self.0 & OWNER_BIT != 0 {
            text.push('o');
        }
        if self.0 & READ_BIT != 0 {
            text.push('r');
        }
        if self.0 & WRITE_BIT != 0 {
            text.push('w');
        }
        text
    }

    /// Bitwise OR of two masks.
    pub const fn merge(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove `other`'s bits from this mask (`self AND NOT other`).
    pub const fn subtract(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// True iff no bit is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this mask satisfies a requested mask.
    ///
    /// The check is textual: true iff the canonical encoding of `required`
    /// is a substring of this mask's canonical encoding. With the fixed
    /// `orw` alphabet this grants any single-letter request covered by the
    /// mask, but a non-contiguous request such as `ow` is NOT granted by
    /// `orw`. An empty request is granted by any mask.
    pub fn grants(&self, required: Self) -> bool {
        self.encode().contains(&required.encode())
    }

    /// The raw mask bits (low 3 bits).
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Build a mask from raw bits; anything above the low 3 bits is dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b111)
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermissionSet({})", self.encode())
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_single_letters() {
        assert_eq!(PermissionSet::decode("o"), PermissionSet::OWNER);
        assert_eq!(PermissionSet::decode("r"), PermissionSet::READ);
        assert_eq!(PermissionSet::decode("w"), PermissionSet::WRITE);
        assert_eq!(PermissionSet::decode("orw"), PermissionSet::ALL);
    }

    #[test]
    fn test_decode_skips_unrecognized() {
        assert_eq!(PermissionSet::decode("x"), PermissionSet::EMPTY);
        assert_eq!(PermissionSet::decode("rx w"), PermissionSet::decode("rw"));
        assert_eq!(PermissionSet::decode(""), PermissionSet::EMPTY);
    }

    #[test]
    fn test_decode_order_and_duplicates() {
        assert_eq!(PermissionSet::decode("wro"), PermissionSet::ALL);
        assert_eq!(PermissionSet::decode("rr"), PermissionSet::READ);
        assert_eq!(PermissionSet::decode("wow"), PermissionSet::decode("ow"));
    }

    #[test]
    fn test_encode_canonical_order() {
        assert_eq!(PermissionSet::decode("wr").encode(), "rw");
        assert_eq!(PermissionSet::decode("wo").encode(), "ow");
        assert_eq!(PermissionSet::ALL.encode(), "orw");
        assert_eq!(PermissionSet::EMPTY.encode(), "");
    }

    #[test]
    fn test_merge_and_subtract() {
        let rw = PermissionSet::READ.merge(PermissionSet::WRITE);
        assert_eq!(rw.encode(), "rw");
        assert_eq!(rw.subtract(PermissionSet::WRITE), PermissionSet::READ);
        assert_eq!(rw.subtract(rw), PermissionSet::EMPTY);
        // Subtracting bits that are not set is a no-op.
        assert_eq!(rw.subtract(PermissionSet::OWNER), rw);
        // Subtracting the empty mask is a no-op.
        assert_eq!(rw.subtract(PermissionSet::EMPTY), rw);
    }

    #[test]
    fn test_grants_single_letters() {
        let orw = PermissionSet::ALL;
        assert!(orw.grants(PermissionSet::OWNER));
        assert!(orw.grants(PermissionSet::READ));
        assert!(orw.grants(PermissionSet::WRITE));
        assert!(orw.grants(PermissionSet::decode("rw")));
        assert!(orw.grants(orw));
    }

    #[test]
    fn test_grants_is_substring_not_subset() {
        // "ow" is not a substring of "orw", so the request is refused even
        // though every requested letter is held.
        let orw = PermissionSet::ALL;
        assert!(!orw.grants(PermissionSet::decode("ow")));
    }

    #[test]
    fn test_grants_empty_request() {
        assert!(PermissionSet::READ.grants(PermissionSet::EMPTY));
        assert!(PermissionSet::EMPTY.grants(PermissionSet::EMPTY));
    }

    #[test]
    fn test_grants_denied_when_missing() {
        let rw = PermissionSet::decode("rw");
        assert!(!rw.grants(PermissionSet::OWNER));
        assert!(!rw.grants(PermissionSet::ALL));
    }

    proptest! {
        #[test]
        fn test_decode_encode_roundtrip(bits in 0u8..8) {
            let mask = PermissionSet::from_bits(bits);
            prop_assert_eq!(PermissionSet::decode(&mask.encode()), mask);
        }

        #[test]
        fn test_decode_permutation_invariant(text in "[orwx]{0,6}") {
            let mut reversed: Vec<char> = text.chars().collect();
            reversed.reverse();
            let reversed: String = reversed.into_iter().collect();
            prop_assert_eq!(
                PermissionSet::decode(&text),
                PermissionSet::decode(&reversed)
            );
        }

        #[test]
        fn test_decode_duplicate_invariant(text in "[orw]{0,4}") {
            let doubled: String = text.chars().flat_map(|c| [c, c]).collect();
            prop_assert_eq!(
                PermissionSet::decode(&text),
                PermissionSet::decode(&doubled)
            );
        }

        #[test]
        fn test_merge_is_union(a in 0u8..8, b in 0u8..8) {
            let merged = PermissionSet::from_bits(a).merge(PermissionSet::from_bits(b));
            prop_assert_eq!(merged.bits(), a | b);
        }
    }
}
