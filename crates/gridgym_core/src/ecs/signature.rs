//! # Component Signatures
//!
//! A signature is a fixed-width bitset recording which component kinds an
//! entity owns. Bit `i` is set iff the entity has a component whose
//! [`Component::KIND`](super::Component::KIND) is `i`.
//!
//! Systems declare a required signature; an entity belongs to a system iff
//! its signature is a superset of the requirement.

/// Maximum number of distinct component kinds.
///
/// This is the width of [`Signature`]; kind indices must be below it.
pub const MAX_COMPONENT_KINDS: usize = 16;

/// Fixed-width bitset over component kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Signature(u16);

impl Signature {
    /// The empty signature (no component kinds).
    pub const EMPTY: Self = Self(0);

    /// Creates a signature from raw bits.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns this signature with the given kind's bit set.
    #[inline]
    #[must_use]
    pub const fn with(self, kind: u8) -> Self {
        Self(self.0 | (1 << kind))
    }

    /// Returns this signature with the given kind's bit cleared.
    #[inline]
    #[must_use]
    pub const fn without(self, kind: u8) -> Self {
        Self(self.0 & !(1 << kind))
    }

    /// Checks whether the given kind's bit is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, kind: u8) -> bool {
        (self.0 & (1 << kind)) != 0
    }

    /// Checks whether every bit of `required` is set in `self`.
    ///
    /// This is the membership test systems run on every signature change.
    #[inline]
    #[must_use]
    pub const fn is_superset_of(self, required: Self) -> bool {
        (self.0 & required.0) == required.0
    }

    /// Checks whether no bits are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_roundtrip() {
        let sig = Signature::EMPTY.with(3);
        assert!(sig.contains(3));
        assert!(!sig.contains(2));

        let sig = sig.without(3);
        assert!(!sig.contains(3));
        assert!(sig.is_empty());
    }

    #[test]
    fn test_superset() {
        let required = Signature::EMPTY.with(0).with(2);

        assert!(Signature::EMPTY.with(0).with(1).with(2).is_superset_of(required));
        assert!(!Signature::EMPTY.with(0).is_superset_of(required));
        // Everything satisfies the empty requirement.
        assert!(Signature::EMPTY.is_superset_of(Signature::EMPTY));
    }
}
