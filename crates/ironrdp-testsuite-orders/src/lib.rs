// No need to be as strict as in production libraries
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unwrap_used)]

mod recorder;
mod stream;

pub use self::recorder::{
    CopyDecompressor, DrawCall, PersistedBitmap, Recorder, RecordingPersistentCache, TestBitmap, TestGlyph,
};
pub use self::stream::OrderStream;

use ironrdp_core::ReadCursor;
use ironrdp_orders::{Config, DesktopSize, InMemoryOrderCache, OrderContext, OrderDecoder, OrdersResult};

pub const DESKTOP_SIZE: DesktopSize = DesktopSize {
    width: 1024,
    height: 768,
};

/// A decoder wired to recording collaborators.
pub struct Session {
    pub decoder: OrderDecoder,
    pub renderer: Recorder,
    pub cache: InMemoryOrderCache<TestBitmap, TestGlyph>,
    pub decompressor: CopyDecompressor,
    pub persistent_cache: RecordingPersistentCache,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::new(DESKTOP_SIZE))
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            decoder: OrderDecoder::new(config),
            renderer: Recorder::default(),
            cache: InMemoryOrderCache::new(),
            decompressor: CopyDecompressor,
            persistent_cache: RecordingPersistentCache::default(),
        }
    }

    /// Decodes `num_orders` orders, returning the cursor position reached.
    pub fn process(&mut self, data: &[u8], num_orders: u16) -> OrdersResult<usize> {
        let mut src = ReadCursor::new(data);

        let mut ctx = OrderContext {
            renderer: &mut self.renderer,
            cache: &mut self.cache,
            decompressor: &mut self.decompressor,
            persistent_cache: Some(&mut self.persistent_cache),
        };

        self.decoder.process_orders(&mut src, num_orders, &mut ctx)?;

        Ok(src.pos())
    }

    /// Recorded calls since the last invocation.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        core::mem::take(&mut self.renderer.calls)
    }
}
