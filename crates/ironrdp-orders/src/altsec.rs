//! Non-standard orders managing off-screen drawing surfaces.

use ironrdp_core::{ensure_size, DecodeResult, ReadCursor};

use crate::cache::{OrderCache, SURFACE_CACHE_ID};
use crate::codec::{read_i16, read_u16};
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::field::ControlFlags;
use crate::renderer::OrderRenderer;
use crate::{OrdersError, OrdersErrorExt as _, OrdersResult};

const SWITCH_SURFACE: u8 = 0;
const CREATE_SURFACE: u8 = 1;

/// Top bit of the create-surface index announcing a list of surfaces to free.
const FREE_LIST: u16 = 0x8000;

pub(crate) fn process_altsec<R, C>(
    src: &mut ReadCursor<'_>,
    flags: ControlFlags,
    ctx: &mut OrderContext<'_, R, C>,
) -> OrdersResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap>,
{
    if !flags.contains(ControlFlags::SECONDARY) {
        return Err(OrdersError::missing_secondary_marker(flags.bits()));
    }

    let order_type = flags.bits() >> 2;

    match order_type {
        SWITCH_SURFACE => switch_surface(src, ctx),
        CREATE_SURFACE => create_surface(src, ctx),
        _ => {
            diagnostic::emit(ctx.renderer, Diagnostic::UnimplementedAlternateSecondary { order_type });
            Ok(())
        }
    }
    .map_err(OrdersError::decode)
}

fn switch_surface<R, C>(src: &mut ReadCursor<'_>, ctx: &mut OrderContext<'_, R, C>) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap>,
{
    let index = read_i16(src)?;

    debug!(index, "Switch surface");

    // Negative indices select the primary surface.
    let surface = u16::try_from(index)
        .ok()
        .and_then(|index| ctx.cache.bitmap(SURFACE_CACHE_ID, index));

    ctx.renderer.set_surface(surface);

    Ok(())
}

fn create_surface<R, C>(src: &mut ReadCursor<'_>, ctx: &mut OrderContext<'_, R, C>) -> DecodeResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap>,
{
    ensure_size!(in: src, size: 6);
    let index = src.read_u16();
    let width = src.read_u16();
    let height = src.read_u16();

    if index & FREE_LIST != 0 {
        let count = read_u16(src)?;

        for _ in 0..count {
            let freed = read_u16(src)?;

            debug!(index = freed, "Free surface");

            let surface = ctx.cache.remove_bitmap(SURFACE_CACHE_ID, freed);
            ctx.renderer.destroy_surface(surface);
        }
    }

    let index = index & !FREE_LIST;

    debug!(index, width, height, "Create surface");

    let old = ctx.cache.remove_bitmap(SURFACE_CACHE_ID, index);

    if let Some(surface) = ctx.renderer.create_surface(width, height, old) {
        ctx.cache.put_bitmap(SURFACE_CACHE_ID, index, surface);
    }

    Ok(())
}
