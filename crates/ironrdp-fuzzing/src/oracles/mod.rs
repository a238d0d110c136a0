//! Oracles.
//!
//! Oracles take a test case and determine whether we have a bug. For example,
//! one of the simplest oracles is to take an order stream as our input test case,
//! decode it against a renderer drawing nothing, and (implicitly) check that no
//! assertions failed or segfaults happened.
//!
//! When an oracle finds a bug, it should report it to the fuzzing engine by
//! panicking.

use arbitrary::{Arbitrary as _, Unstructured};
use ironrdp_core::ReadCursor;
use ironrdp_orders::decompress::RleDecompressor;
use ironrdp_orders::{
    BitmapDecompressor as _, CachedGlyph, ColorEntry, Config, DesktopSize, InMemoryOrderCache, OrderContext,
    OrderDecoder, OrderRenderer, Pen, Point, Rect, ResolvedBrush, Rop2,
};

use crate::generators::{BitmapInput, OrderStreamInput};

/// Renderer accepting every call without drawing anything.
struct NullRenderer;

impl OrderRenderer for NullRenderer {
    type Bitmap = ();
    type Glyph = ();
    type Colormap = ();

    fn set_clip(&mut self, _: Rect) {}

    fn reset_clip(&mut self) {}

    fn dest_blt(&mut self, _: u8, _: Rect) {}

    fn pat_blt(&mut self, _: u8, _: Rect, _: &ResolvedBrush, _: u32, _: u32) {}

    fn screen_blt(&mut self, _: u8, _: Rect, _: Point) {}

    fn line(&mut self, _: Rop2, _: Point, _: Point, _: &Pen) {}

    fn rect(&mut self, _: Rect, _: u32) {}

    fn desktop_save(&mut self, _: u32, _: Rect) {}

    fn desktop_restore(&mut self, _: u32, _: Rect) {}

    fn mem_blt(&mut self, _: u8, _: Rect, _: &(), _: Point) {}

    fn tri_blt(&mut self, _: u8, _: Rect, _: &(), _: Point, _: &ResolvedBrush, _: u32, _: u32) {}

    fn polygon(&mut self, _: Rop2, _: u8, points: &[Point], _: Option<&ResolvedBrush>, _: u32, _: u32) {
        assert!(!points.is_empty());
    }

    fn polyline(&mut self, _: Rop2, points: &[Point], _: &Pen) {
        assert!(!points.is_empty());
    }

    fn ellipse(&mut self, _: Rop2, _: u8, _: Rect, _: Option<&ResolvedBrush>, _: u32, _: u32) {}

    fn start_glyphs(&mut self, _: u32, _: u32, _: &ResolvedBrush) {}

    fn draw_glyph(&mut self, _: Point, _: &CachedGlyph<()>) {}

    fn end_glyphs(&mut self, _: Rect) {}

    fn create_bitmap(&mut self, _: u16, _: u16, _: &[u8]) -> Option<()> {
        Some(())
    }

    fn create_glyph(&mut self, _: u16, _: u16, _: &[u8]) {}

    fn create_colormap(&mut self, _: &[ColorEntry]) {}

    fn set_colormap(&mut self, _: ()) {}

    fn create_surface(&mut self, _: u16, _: u16, _: Option<()>) -> Option<()> {
        Some(())
    }

    fn set_surface(&mut self, _: Option<&()>) {}

    fn destroy_surface(&mut self, _: Option<()>) {}
}

pub fn orders_process(data: &[u8]) {
    if let Ok(input) = OrderStreamInput::arbitrary_take_rest(Unstructured::new(data)) {
        orders_decode(input);
    }
}

pub fn orders_decode(input: OrderStreamInput<'_>) {
    let config = Config::new(DesktopSize {
        width: input.desktop_width,
        height: 768,
    });

    let mut decoder = OrderDecoder::new(config);
    let mut renderer = NullRenderer;
    let mut cache = InMemoryOrderCache::<(), ()>::new();
    let mut decompressor = RleDecompressor::default();

    let mut ctx = OrderContext {
        renderer: &mut renderer,
        cache: &mut cache,
        decompressor: &mut decompressor,
        persistent_cache: None,
    };

    let mut src = ReadCursor::new(input.stream);

    let _ = decoder.process_orders(&mut src, u16::from(input.num_orders), &mut ctx);

    assert!(src.pos() <= input.stream.len());
}

pub fn rle_decompress_bitmap(input: BitmapInput<'_>) {
    // 0 exercises the rejection path, 1 to 3 the supported depths.
    let bytes_per_pixel = input.bytes_per_pixel % 4;
    let mut dst = vec![0; usize::from(input.width) * usize::from(input.height) * usize::from(bytes_per_pixel)];

    let _ = RleDecompressor::default().decompress(
        input.src,
        &mut dst,
        u16::from(input.width),
        u16::from(input.height),
        bytes_per_pixel,
    );
}
