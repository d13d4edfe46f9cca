//! Pick filter bitmask

use bitflags::bitflags;

bitflags! {
    /// Which scene-object categories a pick may intersect.
    ///
    /// The registry only carries the mask; its semantics belong to the
    /// engine's intersection capability. Unknown bits are preserved so
    /// hosts can extend the category set without touching this crate.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct PickFilter: u32 {
        const ENTITIES = 1 << 0;
        const OVERLAYS = 1 << 1;
        const AVATARS = 1 << 2;
        const HUD = 1 << 3;
        const COARSE = 1 << 4;
        const INCLUDE_INVISIBLE = 1 << 5;
        const INCLUDE_NONCOLLIDABLE = 1 << 6;
        const ALL_INTERSECTIONS = 1 << 7;
    }
}

impl PickFilter {
    /// Build a filter from a raw property value, keeping unknown bits.
    pub fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_nothing() {
        assert!(PickFilter::default().is_empty());
    }

    #[test]
    fn test_from_raw_keeps_unknown_bits() {
        let filter = PickFilter::from_raw(1 << 20 | PickFilter::ENTITIES.bits());
        assert!(filter.contains(PickFilter::ENTITIES));
        assert_eq!(filter.bits(), 1 << 20 | 1);
    }
}
