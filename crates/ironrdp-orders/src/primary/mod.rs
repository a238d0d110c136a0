mod blit;
mod poly;
mod shape;
mod text;

use ironrdp_core::ReadCursor;

pub use self::blit::{DstBlt, Mem3Blt, MemBlt, PatBlt, SaveBitmap, ScrBlt};
pub use self::poly::{Polygon, Polyline};
pub use self::shape::{Ellipse, LineTo, OpaqueRect};
pub use self::text::GlyphIndex;

use crate::cache::OrderCache;
use crate::codec::{read_u8, Point};
use crate::config::Config;
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::field::{ControlFlags, FieldPresence};
use crate::renderer::OrderRenderer;
use crate::scratch::ScratchArena;
use crate::state::{OrderState, PrimaryOrderType, Rop2};
use crate::{OrdersError, OrdersErrorExt as _, OrdersResult};

pub(crate) fn process_primary<R, C>(
    src: &mut ReadCursor<'_>,
    flags: ControlFlags,
    state: &mut OrderState,
    scratch: &mut ScratchArena,
    config: &Config,
    ctx: &mut OrderContext<'_, R, C>,
) -> OrdersResult<()>
where
    R: OrderRenderer,
    C: OrderCache<Bitmap = R::Bitmap, Glyph = R::Glyph>,
{
    if flags.contains(ControlFlags::TYPE_CHANGE) {
        state.order_type = read_u8(src).map_err(OrdersError::decode)?;
    }

    let width = FieldPresence::byte_width(PrimaryOrderType::presence_width(state.order_type), flags);
    let presence = FieldPresence::decode(src, width).map_err(OrdersError::decode)?;

    let Some(order_type) = PrimaryOrderType::from_u8(state.order_type) else {
        diagnostic::emit(
            ctx.renderer,
            Diagnostic::UnimplementedPrimary {
                order_type: state.order_type,
            },
        );
        return Err(OrdersError::unknown_primary_order(state.order_type));
    };

    let with_bounds = flags.contains(ControlFlags::BOUNDS);

    if with_bounds {
        if !flags.contains(ControlFlags::ZERO_BOUNDS_DELTAS) {
            state.bounds.decode_fields(src).map_err(OrdersError::decode)?;
        }

        ctx.renderer.set_clip(state.bounds.clip_rect());
    }

    let delta = flags.contains(ControlFlags::DELTA_COORDINATES);

    let result = match order_type {
        PrimaryOrderType::DstBlt => state.dst_blt.process(src, presence, delta, ctx),
        PrimaryOrderType::PatBlt => state.pat_blt.process(src, presence, delta, ctx),
        PrimaryOrderType::ScrBlt => state.scr_blt.process(src, presence, delta, ctx),
        PrimaryOrderType::LineTo => state.line_to.process(src, presence, delta, ctx),
        PrimaryOrderType::OpaqueRect => state.opaque_rect.process(src, presence, delta, ctx),
        PrimaryOrderType::SaveBitmap => state.save_bitmap.process(src, presence, delta, ctx),
        PrimaryOrderType::MemBlt => state.mem_blt.process(src, presence, delta, ctx),
        PrimaryOrderType::Mem3Blt => state.mem3_blt.process(src, presence, delta, ctx),
        PrimaryOrderType::PolygonSc => state.polygon_sc.process_sc(src, presence, delta, scratch, ctx),
        PrimaryOrderType::PolygonCb => state.polygon_cb.process_cb(src, presence, delta, scratch, ctx),
        PrimaryOrderType::Polyline => state.polyline.process(src, presence, delta, scratch, ctx),
        PrimaryOrderType::EllipseSc => state.ellipse_sc.process_sc(src, presence, delta, ctx),
        PrimaryOrderType::EllipseCb => state.ellipse_cb.process_cb(src, presence, delta, ctx),
        PrimaryOrderType::GlyphIndex => state.glyph_index.process(src, presence, config, ctx),
    };

    // The clip is released even when the order body is truncated.
    if with_bounds {
        ctx.renderer.reset_clip();
    }

    result.map_err(OrdersError::decode)
}

/// Validates a ROP2 code, reporting and rejecting values outside of 1..=16.
fn checked_rop2<R: OrderRenderer>(renderer: &mut R, order: PrimaryOrderType, rop2: u8, position: Point) -> Option<Rop2> {
    let checked = Rop2::new(rop2);

    if checked.is_none() {
        diagnostic::emit(renderer, Diagnostic::InvalidRop2 { order, rop2, position });
    }

    checked
}
