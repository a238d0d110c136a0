use bitflags::bitflags;
use ironrdp_core::{ensure_size, DecodeResult, ReadCursor};

bitflags! {
    /// Control byte leading every drawing order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ControlFlags: u8 {
        const STANDARD = 0x01;
        const SECONDARY = 0x02;
        const BOUNDS = 0x04;
        const TYPE_CHANGE = 0x08;
        const DELTA_COORDINATES = 0x10;
        const ZERO_BOUNDS_DELTAS = 0x20;
        const ZERO_FIELD_BYTE_BIT0 = 0x40;
        const ZERO_FIELD_BYTE_BIT1 = 0x80;
    }
}

/// Which optional fields of a primary order follow on the wire.
///
/// Bit `i` set means field `i` is present.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldPresence(u32);

impl FieldPresence {
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Number of presence bytes actually transmitted for an order type announcing `class_width` bytes.
    pub fn byte_width(class_width: usize, flags: ControlFlags) -> usize {
        let mut width = class_width;

        if flags.contains(ControlFlags::ZERO_FIELD_BYTE_BIT0) {
            width = width.saturating_sub(1);
        }

        if flags.contains(ControlFlags::ZERO_FIELD_BYTE_BIT1) {
            width = width.saturating_sub(2);
        }

        width
    }

    pub(crate) fn decode(src: &mut ReadCursor<'_>, width: usize) -> DecodeResult<Self> {
        ensure_size!(in: src, size: width);

        let bits = src
            .read_slice(width)
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, byte)| acc | (u32::from(*byte) << (i * 8)));

        Ok(Self(bits))
    }

    pub const fn has(self, mask: u32) -> bool {
        self.0 & mask != 0
    }

    /// Presence bits of a nested structure (brush, pen) starting at bit `offset`.
    #[must_use]
    pub const fn shifted(self, offset: u32) -> Self {
        Self(self.0 >> offset)
    }
}
