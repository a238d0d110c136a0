use ironrdp_core::{DecodeResult, ReadCursor};

use super::ColorEntry;
use crate::codec::{read_slice, read_u16, read_u8};
use crate::decoder::OrderContext;
use crate::renderer::OrderRenderer;
use crate::scratch::ScratchArena;

const ENTRY_SIZE: usize = size_of::<ColorEntry>();

pub(super) fn process<R: OrderRenderer, C>(
    src: &mut ReadCursor<'_>,
    scratch: &mut ScratchArena,
    ctx: &mut OrderContext<'_, R, C>,
) -> DecodeResult<()> {
    let cache_id = read_u8(src)?;
    let count = read_u16(src)?;
    let wire = read_slice(src, usize::from(count) * ENTRY_SIZE)?;

    debug!(cache_id, count, "Colour table cache");

    let colors: &mut [ColorEntry] = bytemuck::cast_slice_mut(scratch.bytes(wire.len()));

    for (color, entry) in colors.iter_mut().zip(wire.chunks_exact(ENTRY_SIZE)) {
        *color = ColorEntry {
            blue: entry[0],
            green: entry[1],
            red: entry[2],
            pad: 0,
        };
    }

    // Table 0 is never activated.
    if cache_id != 0 {
        let colormap = ctx.renderer.create_colormap(colors);
        ctx.renderer.set_colormap(colormap);
    }

    Ok(())
}
