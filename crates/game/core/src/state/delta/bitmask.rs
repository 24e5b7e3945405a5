use bitflags::bitflags;

bitflags! {
    /// Tracks which parts of an [`RpgState`](crate::state::RpgState) an action touched.
    ///
    /// Each bit represents one area of the state. Deltas report their own bits
    /// and the simulator unions them into the report of the action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ChangeSet: u16 {
        const POSITION  = 1 << 0;
        const HP        = 1 << 1;
        const MP        = 1 << 2;
        const XP        = 1 << 3;
        const INVENTORY = 1 << 4;
        const GOLD      = 1 << 5;
        const COMBAT    = 1 << 6;
        const DIALOGUE  = 1 << 7;
        const WORLD     = 1 << 8;
        const STATUS    = 1 << 9;
        const FLAGS     = 1 << 10;
        const ZONE      = 1 << 11;
    }
}
