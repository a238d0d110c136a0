//! Secondary orders: populate the resource caches referenced by later primary orders.

mod bitmap;
mod brush;
mod color_table;
mod glyph;

use bytemuck::{Pod, Zeroable};
use ironrdp_core::ReadCursor;

use crate::cache::OrderCache;
use crate::codec::{read_i16, read_u16, read_u8};
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::renderer::OrderRenderer;
use crate::scratch::ScratchArena;
use crate::{OrdersError, OrdersErrorExt as _, OrdersResult};

const RAW_BITMAP_CACHE: u8 = 0;
const COLOR_TABLE_CACHE: u8 = 1;
const BITMAP_CACHE: u8 = 2;
const FONT_CACHE: u8 = 3;
const RAW_BITMAP_CACHE_V2: u8 = 4;
const BITMAP_CACHE_V2: u8 = 5;
const BRUSH_CACHE: u8 = 7;

/// The announced length counts from this many bytes before the end of the header.
const LENGTH_BIAS: i64 = 7;

/// Palette entry of a colour table cache order.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct ColorEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub pad: u8,
}

/// Decodes one secondary order, the control byte already consumed.
///
/// Whatever the body decoder consumed, the cursor ends up where the order header says the next
/// order starts.
pub(crate) fn process_secondary<R, C>(
    src: &mut ReadCursor<'_>,
    scratch: &mut ScratchArena,
    ctx: &mut OrderContext<'_, R, C>,
) -> OrdersResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap, Glyph = R::Glyph>,
{
    // Servers compute the length so that it goes negative for very short orders.
    let length = read_i16(src).map_err(OrdersError::decode)?;
    let flags = read_u16(src).map_err(OrdersError::decode)?;
    let order_type = read_u8(src).map_err(OrdersError::decode)?;

    let target = i64::try_from(src.pos())
        .unwrap_or(i64::MAX)
        .saturating_add(i64::from(length) + LENGTH_BIAS);
    let buffer_len = src.inner().len();
    let next_order = usize::try_from(target)
        .ok()
        .filter(|next_order| *next_order <= buffer_len)
        .ok_or_else(|| OrdersError::invalid_resync(target, buffer_len))?;

    match order_type {
        RAW_BITMAP_CACHE => bitmap::process_raw(src, scratch, ctx),
        COLOR_TABLE_CACHE => color_table::process(src, scratch, ctx),
        BITMAP_CACHE => bitmap::process_compressed(src, flags, scratch, ctx),
        FONT_CACHE => glyph::process(src, ctx),
        RAW_BITMAP_CACHE_V2 => bitmap::process_v2(src, flags, false, scratch, ctx),
        BITMAP_CACHE_V2 => bitmap::process_v2(src, flags, true, scratch, ctx),
        BRUSH_CACHE => brush::process(src, ctx),
        _ => {
            diagnostic::emit(ctx.renderer, Diagnostic::UnimplementedSecondary { order_type });
            Ok(())
        }
    }
    .map_err(OrdersError::decode)?;

    let pos = src.pos();
    if next_order >= pos {
        src.advance(next_order - pos);
    } else {
        src.rewind(pos - next_order);
    }

    Ok(())
}
