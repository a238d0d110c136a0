use ironrdp_core::{ensure_size, DecodeResult, ReadCursor};

use crate::brush::BrushData;
use crate::cache::OrderCache;
use crate::codec::read_slice;
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::renderer::OrderRenderer;

const BRUSH_SIDE: u8 = 8;
const MONOCHROME: u8 = 1;

pub(super) fn process<R, C>(src: &mut ReadCursor<'_>, ctx: &mut OrderContext<'_, R, C>) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache,
{
    ensure_size!(in: src, size: 6);
    let cache_index = src.read_u8();
    let color_code = src.read_u8();
    let width = src.read_u8();
    let height = src.read_u8();
    let _brush_type = src.read_u8();
    let size = src.read_u8();

    debug!(cache_index, color_code, width, height, size, "Brush cache");

    let incompatible = Diagnostic::IncompatibleBrush {
        color_code,
        width,
        height,
        size,
    };

    if width != BRUSH_SIDE || height != BRUSH_SIDE {
        diagnostic::emit(ctx.renderer, incompatible);
        return Ok(());
    }

    let data = match color_code {
        MONOCHROME if size == 8 => {
            // Rows come bottom-up.
            let mut rows = read_slice(src, 8)?.to_vec();
            rows.reverse();
            rows
        }
        3..=6 => {
            let bytes_per_pixel = usize::from(color_code - 2);
            let compressed_size = 16 + 4 * bytes_per_pixel;

            if usize::from(size) == compressed_size {
                expand_compressed(read_slice(src, compressed_size)?, bytes_per_pixel)
            } else {
                read_slice(src, 64 * bytes_per_pixel)?.to_vec()
            }
        }
        _ => {
            diagnostic::emit(ctx.renderer, incompatible);
            return Ok(());
        }
    };

    ctx.cache.put_brush_data(color_code, cache_index, BrushData { color_code, data });

    Ok(())
}

/// Expands the 2 bits per pixel palette form of an 8x8 brush.
///
/// `src` holds 8 rows of 2 bytes, bottom row first, followed by 4 palette entries.
fn expand_compressed(src: &[u8], bytes_per_pixel: usize) -> Vec<u8> {
    let (indices, palette) = src.split_at(16);
    let mut out = vec![0; 64 * bytes_per_pixel];

    for (row, y) in indices.chunks_exact(2).zip((0..8usize).rev()) {
        for x in 0..8usize {
            let shift = 6 - 2 * (x % 4);
            let entry = usize::from((row[x / 4] >> shift) & 0x03) * bytes_per_pixel;
            let pixel = (y * 8 + x) * bytes_per_pixel;

            out[pixel..pixel + bytes_per_pixel].copy_from_slice(&palette[entry..entry + bytes_per_pixel]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_brush_is_expanded_bottom_up() {
        let mut src = [0u8; 20];
        src[0] = 0b00_01_10_11;
        src[1] = 0b11_10_01_00;
        src[16..].copy_from_slice(&[0xA0, 0xA1, 0xA2, 0xA3]);

        let out = expand_compressed(&src, 1);

        assert_eq!(out.len(), 64);
        assert_eq!(out[56..], [0xA0, 0xA1, 0xA2, 0xA3, 0xA3, 0xA2, 0xA1, 0xA0]);
        assert!(out[..56].iter().all(|pixel| *pixel == 0xA0));
    }

    #[test]
    fn compressed_brush_wide_palette() {
        let mut src = [0u8; 24];
        // Top row (last on the wire): first pixel uses entry 3, the rest entry 0.
        src[14] = 0b11_00_00_00;
        src[16..].copy_from_slice(&[0x00, 0x01, 0x10, 0x11, 0x20, 0x21, 0x30, 0x31]);

        let out = expand_compressed(&src, 2);

        assert_eq!(out.len(), 128);
        assert_eq!(out[..4], [0x30, 0x31, 0x00, 0x01]);
        assert_eq!(out[126..], [0x00, 0x01]);
    }
}
