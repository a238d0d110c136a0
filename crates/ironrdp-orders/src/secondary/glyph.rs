use ironrdp_core::{ensure_size, DecodeResult, ReadCursor};

use crate::cache::{CachedGlyph, OrderCache};
use crate::codec::{read_slice, read_u8};
use crate::decoder::OrderContext;
use crate::renderer::OrderRenderer;

/// Size of a 1 bpp glyph bitmap: byte-aligned rows, the whole padded to 4 bytes.
fn glyph_data_size(width: u16, height: u16) -> usize {
    (usize::from(height) * usize::from(width).div_ceil(8) + 3) & !3
}

pub(super) fn process<R, C>(src: &mut ReadCursor<'_>, ctx: &mut OrderContext<'_, R, C>) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Glyph = R::Glyph>,
{
    let font = read_u8(src)?;
    let count = read_u8(src)?;

    debug!(font, count, "Font cache");

    for _ in 0..count {
        ensure_size!(in: src, size: 10);
        let character = src.read_u16();
        let offset = src.read_i16();
        let baseline = src.read_i16();
        let width = src.read_u16();
        let height = src.read_u16();

        let data = read_slice(src, glyph_data_size(width, height))?;
        let glyph = ctx.renderer.create_glyph(width, height, data);

        ctx.cache.put_font_glyph(
            font,
            character,
            CachedGlyph {
                offset,
                baseline,
                width,
                height,
                glyph,
            },
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 1, 4)]
    #[case(8, 4, 4)]
    #[case(9, 4, 8)]
    #[case(16, 3, 8)]
    #[case(7, 5, 8)]
    fn data_size_is_padded(#[case] width: u16, #[case] height: u16, #[case] expected: usize) {
        assert_eq!(glyph_data_size(width, height), expected);
    }
}
