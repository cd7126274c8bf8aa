/// The low bits of a hash kept in a slot's metadata, checked before comparing keys.
pub(crate) const BLOOM_MASK: u8 = 0b0011_1111;

const STATE_SHIFT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum SlotState {
    Empty = 0,
    HasValue = 1,
    Tombstone = 2,
}

/// One byte per slot: the state in the top two bits and the bloom bits below it.
///
/// A zeroed byte is an empty slot, so a freshly zeroed metadata array describes an empty table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct SlotMetadata(u8);

impl SlotMetadata {
    pub(crate) const EMPTY: SlotMetadata = SlotMetadata(0);

    pub(crate) const TOMBSTONE: SlotMetadata =
        SlotMetadata((SlotState::Tombstone as u8) << STATE_SHIFT);

    pub(crate) const fn occupied(hash: u64) -> SlotMetadata {
        SlotMetadata(((SlotState::HasValue as u8) << STATE_SHIFT) | (hash as u8 & BLOOM_MASK))
    }

    pub(crate) const fn state(self) -> SlotState {
        match self.0 >> STATE_SHIFT {
            0 => SlotState::Empty,
            1 => SlotState::HasValue,
            _ => SlotState::Tombstone,
        }
    }

    pub(crate) const fn is_live(self) -> bool {
        matches!(self.state(), SlotState::HasValue)
    }

    pub(crate) const fn is_empty(self) -> bool {
        matches!(self.state(), SlotState::Empty)
    }

    pub(crate) const fn bloom_matches(self, hash: u64) -> bool {
        self.0 & BLOOM_MASK == hash as u8 & BLOOM_MASK
    }
}
