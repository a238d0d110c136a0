use ironrdp_core::ReadCursor;

use crate::altsec::process_altsec;
use crate::cache::{OrderCache, PersistentBitmapCache};
use crate::codec::read_u8;
use crate::config::Config;
use crate::decompress::BitmapDecompressor;
use crate::field::ControlFlags;
use crate::primary::process_primary;
use crate::renderer::OrderRenderer;
use crate::scratch::ScratchArena;
use crate::secondary::process_secondary;
use crate::state::OrderState;
use crate::{OrdersError, OrdersErrorExt as _, OrdersResult};

/// Collaborators an order stream is decoded against.
///
/// Borrowed for the duration of one [`OrderDecoder::process_orders`] call.
pub struct OrderContext<'a, R, C> {
    pub renderer: &'a mut R,
    pub cache: &'a mut C,
    pub decompressor: &'a mut dyn BitmapDecompressor,
    /// Receives bitmaps flagged as persistent; such bitmaps are only cached in memory when `None`.
    pub persistent_cache: Option<&'a mut dyn PersistentBitmapCache>,
}

/// Drawing order decoder for one session.
///
/// Owns the cross-order state and the scratch arena. Caches and rendering are external, see
/// [`OrderContext`].
#[derive(Debug)]
pub struct OrderDecoder {
    config: Config,
    state: OrderState,
    scratch: ScratchArena,
}

impl OrderDecoder {
    pub fn new(config: Config) -> Self {
        let scratch = ScratchArena::with_capacity(config.scratch_capacity);

        Self {
            config,
            state: OrderState::default(),
            scratch,
        }
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    /// Current size of the scratch arena, in bytes.
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Forgets every persisted order field and switches drawing back to the primary surface.
    pub fn reset<R: OrderRenderer>(&mut self, renderer: &mut R) {
        self.state.reset();
        renderer.set_surface(None);
    }

    /// Decodes and dispatches `num_orders` orders from `src`, in wire order.
    ///
    /// Recoverable conditions are reported through [`OrderRenderer::diagnostic`] and decoding
    /// goes on. An error means the stream can no longer be trusted: orders decoded before it were
    /// dispatched, the remaining ones were not.
    pub fn process_orders<R, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        num_orders: u16,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> OrdersResult<()>
    where
        R: OrderRenderer,
        C: OrderCache<Bitmap = R::Bitmap, Glyph = R::Glyph>,
    {
        for processed in 0..num_orders {
            let result = self.process_order(src, ctx);

            if let Err(error) = result {
                error!(processed, num_orders, error = %error.report(), "Order stream aborted");
                return Err(error);
            }
        }

        Ok(())
    }

    fn process_order<R, C>(&mut self, src: &mut ReadCursor<'_>, ctx: &mut OrderContext<'_, R, C>) -> OrdersResult<()>
    where
        R: OrderRenderer,
        C: OrderCache<Bitmap = R::Bitmap, Glyph = R::Glyph>,
    {
        let flags = ControlFlags::from_bits_retain(read_u8(src).map_err(OrdersError::decode)?);

        if !flags.contains(ControlFlags::STANDARD) {
            process_altsec(src, flags, ctx)
        } else if flags.contains(ControlFlags::SECONDARY) {
            process_secondary(src, &mut self.scratch, ctx)
        } else {
            process_primary(src, flags, &mut self.state, &mut self.scratch, &self.config, ctx)
        }
    }
}
