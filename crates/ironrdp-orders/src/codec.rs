use ironrdp_core::{ensure_size, DecodeResult, ReadCursor};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle handed to the renderer, in origin + extent form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Clip rectangle shared by all primary orders, in inclusive edge form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl Bounds {
    const LEFT: u8 = 0x01;
    const TOP: u8 = 0x02;
    const RIGHT: u8 = 0x04;
    const BOTTOM: u8 = 0x08;
    const DELTA_LEFT: u8 = 0x10;
    const DELTA_TOP: u8 = 0x20;
    const DELTA_RIGHT: u8 = 0x40;
    const DELTA_BOTTOM: u8 = 0x80;

    /// Updates the sides announced by the leading description byte, keeping the others.
    pub(crate) fn decode_fields(&mut self, src: &mut ReadCursor<'_>) -> DecodeResult<()> {
        ensure_size!(in: src, size: 1);
        let description = src.read_u8();

        let sides = [
            (&mut self.left, Self::LEFT, Self::DELTA_LEFT),
            (&mut self.top, Self::TOP, Self::DELTA_TOP),
            (&mut self.right, Self::RIGHT, Self::DELTA_RIGHT),
            (&mut self.bottom, Self::BOTTOM, Self::DELTA_BOTTOM),
        ];

        for (side, absolute, delta) in sides {
            if description & absolute != 0 {
                read_coord(src, side, false)?;
            } else if description & delta != 0 {
                read_coord(src, side, true)?;
            }
        }

        Ok(())
    }

    pub fn clip_rect(&self) -> Rect {
        Rect::new(
            i32::from(self.left),
            i32::from(self.top),
            i32::from(self.right) - i32::from(self.left) + 1,
            i32::from(self.bottom) - i32::from(self.top) + 1,
        )
    }
}

/// Reads either an absolute 16-bit coordinate or a signed 8-bit delta applied to the previous value.
pub(crate) fn read_coord(src: &mut ReadCursor<'_>, coord: &mut i16, delta: bool) -> DecodeResult<()> {
    if delta {
        ensure_size!(in: src, size: 1);
        let change = i8::from_le_bytes(src.read_array::<1>());
        *coord = coord.wrapping_add(i16::from(change));
    } else {
        ensure_size!(in: src, size: 2);
        *coord = src.read_i16();
    }

    Ok(())
}

/// Reads a 24-bit colour, lowest byte first.
pub(crate) fn read_color(src: &mut ReadCursor<'_>) -> DecodeResult<u32> {
    ensure_size!(in: src, size: 3);
    let [low, middle, high] = src.read_array::<3>();

    Ok(u32::from(low) | (u32::from(middle) << 8) | (u32::from(high) << 16))
}

pub(crate) fn read_u8(src: &mut ReadCursor<'_>) -> DecodeResult<u8> {
    ensure_size!(in: src, size: 1);
    Ok(src.read_u8())
}

pub(crate) fn read_u16(src: &mut ReadCursor<'_>) -> DecodeResult<u16> {
    ensure_size!(in: src, size: 2);
    Ok(src.read_u16())
}

pub(crate) fn read_u32(src: &mut ReadCursor<'_>) -> DecodeResult<u32> {
    ensure_size!(in: src, size: 4);
    Ok(src.read_u32())
}

pub(crate) fn read_i16(src: &mut ReadCursor<'_>) -> DecodeResult<i16> {
    ensure_size!(in: src, size: 2);
    Ok(src.read_i16())
}

pub(crate) fn read_slice<'a>(src: &mut ReadCursor<'a>, len: usize) -> DecodeResult<&'a [u8]> {
    ensure_size!(in: src, size: len);
    Ok(src.read_slice(len))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn delta_matches_wrapping_add(start in any::<i16>(), change in any::<i8>()) {
            let mut coord = start;
            let encoded = change.to_le_bytes();
            let mut src = ReadCursor::new(&encoded);

            read_coord(&mut src, &mut coord, true).unwrap();

            prop_assert_eq!(coord, start.wrapping_add(i16::from(change)));
            prop_assert!(src.is_empty());
        }
    }

    #[test]
    fn delta_coordinate_wraps() {
        let mut coord = i16::MAX;
        let mut src = ReadCursor::new(&[0x01]);

        read_coord(&mut src, &mut coord, true).unwrap();

        assert_eq!(coord, i16::MIN);
    }

    #[test]
    fn negative_delta() {
        let mut coord = 10;
        let mut src = ReadCursor::new(&[0xFB]);

        read_coord(&mut src, &mut coord, true).unwrap();

        assert_eq!(coord, 5);
    }

    #[test]
    fn absolute_coordinate_replaces() {
        let mut coord = 10;
        let mut src = ReadCursor::new(&[0x34, 0x12]);

        read_coord(&mut src, &mut coord, false).unwrap();

        assert_eq!(coord, 0x1234);
    }

    #[test]
    fn color_is_little_endian() {
        let mut src = ReadCursor::new(&[0xAB, 0x00, 0xCC]);

        assert_eq!(read_color(&mut src).unwrap(), 0x00CC_00AB);
    }

    #[test]
    fn bounds_mix_absolute_delta_and_unchanged() {
        let mut bounds = Bounds {
            left: 100,
            top: 200,
            right: 300,
            bottom: 400,
        };
        // left absolute, top delta (-1), right unchanged, bottom delta (+5)
        let mut src = ReadCursor::new(&[0b1010_0001, 0x0A, 0x00, 0xFF, 0x05]);

        bounds.decode_fields(&mut src).unwrap();

        assert_eq!(
            bounds,
            Bounds {
                left: 10,
                top: 199,
                right: 300,
                bottom: 405,
            }
        );
        assert!(src.is_empty());
        assert_eq!(bounds.clip_rect(), Rect::new(10, 199, 291, 207));
    }

    #[test]
    fn absolute_side_wins_over_delta() {
        let mut bounds = Bounds::default();
        let mut src = ReadCursor::new(&[0x11, 0x07, 0x00]);

        bounds.decode_fields(&mut src).unwrap();

        assert_eq!(bounds.left, 7);
        assert!(src.is_empty());
    }
}
