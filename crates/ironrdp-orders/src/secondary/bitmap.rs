use ironrdp_core::{ensure_size, DecodeResult, ReadCursor};

use crate::cache::OrderCache;
use crate::codec::{read_slice, read_u8};
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::renderer::OrderRenderer;
use crate::scratch::ScratchArena;

/// Bitmap cache order without the compression header in front of the payload.
const NO_COMPRESSION_HEADER: u16 = 0x0400;

const V2_CACHE_ID_MASK: u16 = 0x0007;
const V2_MODE_MASK: u16 = 0x0038;
const V2_MODE_SHIFT: u16 = 3;
const V2_SQUARE: u16 = 0x0080;
const V2_PERSIST: u16 = 0x0100;
const V2_BUFSIZE_MASK: u16 = 0x3FFF;
const V2_LONG_INDEX: u8 = 0x80;

/// Header shared by the raw and compressed first revision bitmap cache orders.
#[derive(Debug)]
struct BitmapHeader {
    cache_id: u8,
    width: u8,
    height: u8,
    bytes_per_pixel: u8,
    buffer_size: u16,
    cache_index: u16,
}

impl BitmapHeader {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        ensure_size!(in: src, size: 9);

        let cache_id = src.read_u8();
        let _pad = src.read_u8();
        let width = src.read_u8();
        let height = src.read_u8();
        let bits_per_pixel = src.read_u8();
        let buffer_size = src.read_u16();
        let cache_index = src.read_u16();

        Ok(Self {
            cache_id,
            width,
            height,
            bytes_per_pixel: bits_per_pixel.div_ceil(8),
            buffer_size,
            cache_index,
        })
    }
}

fn pixel_size(width: u8, height: u8, bytes_per_pixel: u8) -> usize {
    usize::from(width) * usize::from(height) * usize::from(bytes_per_pixel)
}

/// Copies bottom-up wire rows into `dst` top-down.
fn flip_rows(src: &[u8], dst: &mut [u8], row_len: usize) {
    if row_len == 0 {
        return;
    }

    for (dst_row, src_row) in dst.chunks_exact_mut(row_len).zip(src.chunks_exact(row_len).rev()) {
        dst_row.copy_from_slice(src_row);
    }
}

fn short_payload<R: OrderRenderer>(renderer: &mut R, cache_id: u8, cache_index: u16) {
    diagnostic::emit(
        renderer,
        Diagnostic::MalformedBitmap {
            cache_id,
            cache_index,
            reason: "payload shorter than the bitmap",
        },
    );
}

pub(super) fn process_raw<R, C>(
    src: &mut ReadCursor<'_>,
    scratch: &mut ScratchArena,
    ctx: &mut OrderContext<'_, R, C>,
) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap>,
{
    let header = BitmapHeader::decode(src)?;
    let data = read_slice(src, usize::from(header.buffer_size))?;

    debug!(?header, "Raw bitmap cache");

    let size = pixel_size(header.width, header.height, header.bytes_per_pixel);

    // Exactly the pixel rows are used; the wire length may only carry more.
    let Some(rows) = data.get(..size) else {
        short_payload(ctx.renderer, header.cache_id, header.cache_index);
        return Ok(());
    };

    let pixels = scratch.bytes(size);
    flip_rows(
        rows,
        pixels,
        usize::from(header.width) * usize::from(header.bytes_per_pixel),
    );

    if let Some(bitmap) = ctx
        .renderer
        .create_bitmap(u16::from(header.width), u16::from(header.height), pixels)
    {
        ctx.cache.put_bitmap(header.cache_id, header.cache_index, bitmap);
    }

    Ok(())
}

pub(super) fn process_compressed<R, C>(
    src: &mut ReadCursor<'_>,
    flags: u16,
    scratch: &mut ScratchArena,
    ctx: &mut OrderContext<'_, R, C>,
) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap>,
{
    let header = BitmapHeader::decode(src)?;

    let size = if flags & NO_COMPRESSION_HEADER != 0 {
        header.buffer_size
    } else {
        ensure_size!(in: src, size: 8);
        let _pad = src.read_u16();
        let size = src.read_u16();
        let _row_size = src.read_u16();
        let _final_size = src.read_u16();
        size
    };

    let data = read_slice(src, usize::from(size))?;

    debug!(?header, size, "Bitmap cache");

    let pixels = scratch.bytes(pixel_size(header.width, header.height, header.bytes_per_pixel));

    if let Err(e) = ctx.decompressor.decompress(
        data,
        pixels,
        u16::from(header.width),
        u16::from(header.height),
        header.bytes_per_pixel,
    ) {
        diagnostic::emit(
            ctx.renderer,
            Diagnostic::DecompressionFailed {
                cache_id: header.cache_id,
                cache_index: header.cache_index,
                reason: e.reason,
            },
        );
        return Ok(());
    }

    if let Some(bitmap) = ctx
        .renderer
        .create_bitmap(u16::from(header.width), u16::from(header.height), pixels)
    {
        ctx.cache.put_bitmap(header.cache_id, header.cache_index, bitmap);
    }

    Ok(())
}

pub(super) fn process_v2<R, C>(
    src: &mut ReadCursor<'_>,
    flags: u16,
    compressed: bool,
    scratch: &mut ScratchArena,
    ctx: &mut OrderContext<'_, R, C>,
) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap>,
{
    let [cache_id, _] = (flags & V2_CACHE_ID_MASK).to_le_bytes();
    let [mode, _] = ((flags & V2_MODE_MASK) >> V2_MODE_SHIFT).to_le_bytes();

    let key = if flags & V2_PERSIST != 0 {
        ensure_size!(in: src, size: 8);
        Some(src.read_array::<8>())
    } else {
        None
    };

    let width = read_u8(src)?;
    let height = if flags & V2_SQUARE != 0 { width } else { read_u8(src)? };

    ensure_size!(in: src, size: 2);
    let buffer_size = src.read_u16_be() & V2_BUFSIZE_MASK;

    let mut cache_index = u16::from(read_u8(src)?);
    if cache_index & u16::from(V2_LONG_INDEX) != 0 {
        let low = read_u8(src)?;
        cache_index = ((cache_index ^ u16::from(V2_LONG_INDEX)) << 8) + u16::from(low);
    }

    let data = read_slice(src, usize::from(buffer_size))?;

    debug!(
        compressed,
        flags, width, height, cache_id, cache_index, mode, buffer_size, "Bitmap cache v2"
    );

    let Some(bytes_per_pixel) = mode.checked_sub(2).filter(|bpp| *bpp != 0) else {
        diagnostic::emit(
            ctx.renderer,
            Diagnostic::MalformedBitmap {
                cache_id,
                cache_index,
                reason: "invalid bits per pixel mode",
            },
        );
        return Ok(());
    };

    let size = pixel_size(width, height, bytes_per_pixel);
    let pixels = scratch.bytes(size);

    if compressed {
        if let Err(e) = ctx.decompressor.decompress(
            data,
            pixels,
            u16::from(width),
            u16::from(height),
            bytes_per_pixel,
        ) {
            diagnostic::emit(
                ctx.renderer,
                Diagnostic::DecompressionFailed {
                    cache_id,
                    cache_index,
                    reason: e.reason,
                },
            );
            return Ok(());
        }
    } else {
        let Some(rows) = data.get(..size) else {
            short_payload(ctx.renderer, cache_id, cache_index);
            return Ok(());
        };

        flip_rows(rows, pixels, usize::from(width) * usize::from(bytes_per_pixel));
    }

    let Some(bitmap) = ctx.renderer.create_bitmap(u16::from(width), u16::from(height), pixels) else {
        debug!(cache_id, cache_index, "Renderer declined bitmap");
        return Ok(());
    };

    ctx.cache.put_bitmap(cache_id, cache_index, bitmap);

    if let (Some(key), Some(persistent_cache)) = (key, ctx.persistent_cache.as_deref_mut()) {
        persistent_cache.save_bitmap(cache_id, cache_index, key, width, height, pixels);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_flipped() {
        let wire = [1, 2, 3, 4, 5, 6];
        let mut pixels = [0; 6];

        flip_rows(&wire, &mut pixels, 2);

        assert_eq!(pixels, [5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn empty_rows() {
        let mut pixels = [];

        flip_rows(&[], &mut pixels, 0);
    }
}
