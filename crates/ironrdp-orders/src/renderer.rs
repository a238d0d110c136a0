use crate::brush::{Pen, ResolvedBrush};
use crate::cache::CachedGlyph;
use crate::codec::{Point, Rect};
use crate::diagnostic::Diagnostic;
use crate::secondary::ColorEntry;
use crate::state::Rop2;

/// Drawing backend driven by the order decoder.
///
/// Every decoded order ends up as exactly one call, in wire order. Colours are 24-bit values in
/// the session colour depth; converting them is up to the implementation.
pub trait OrderRenderer {
    type Bitmap;
    type Glyph;
    type Colormap;

    fn set_clip(&mut self, clip: Rect);

    fn reset_clip(&mut self);

    fn dest_blt(&mut self, rop3: u8, rect: Rect);

    fn pat_blt(&mut self, rop3: u8, rect: Rect, brush: &ResolvedBrush, background: u32, foreground: u32);

    fn screen_blt(&mut self, rop3: u8, rect: Rect, source: Point);

    fn line(&mut self, rop2: Rop2, start: Point, end: Point, pen: &Pen);

    fn rect(&mut self, rect: Rect, color: u32);

    fn desktop_save(&mut self, offset: u32, rect: Rect);

    fn desktop_restore(&mut self, offset: u32, rect: Rect);

    fn mem_blt(&mut self, rop3: u8, rect: Rect, bitmap: &Self::Bitmap, source: Point);

    #[expect(clippy::too_many_arguments)]
    fn tri_blt(
        &mut self,
        rop3: u8,
        rect: Rect,
        bitmap: &Self::Bitmap,
        source: Point,
        brush: &ResolvedBrush,
        background: u32,
        foreground: u32,
    );

    /// `points` are absolute; the first one is the order origin.
    fn polygon(
        &mut self,
        rop2: Rop2,
        fill_mode: u8,
        points: &[Point],
        brush: Option<&ResolvedBrush>,
        background: u32,
        foreground: u32,
    );

    /// `points` are absolute; the first one is the order origin.
    fn polyline(&mut self, rop2: Rop2, points: &[Point], pen: &Pen);

    fn ellipse(
        &mut self,
        rop2: Rop2,
        fill_mode: u8,
        rect: Rect,
        brush: Option<&ResolvedBrush>,
        background: u32,
        foreground: u32,
    );

    fn start_glyphs(&mut self, background: u32, foreground: u32, brush: &ResolvedBrush);

    fn draw_glyph(&mut self, position: Point, glyph: &CachedGlyph<Self::Glyph>);

    fn end_glyphs(&mut self, rect: Rect);

    /// `data` holds `height` rows top-down; `None` leaves the cache slot untouched.
    fn create_bitmap(&mut self, width: u16, height: u16, data: &[u8]) -> Option<Self::Bitmap>;

    /// `data` holds 1 bit per pixel rows, each padded to a byte boundary.
    fn create_glyph(&mut self, width: u16, height: u16, data: &[u8]) -> Self::Glyph;

    fn create_colormap(&mut self, colors: &[ColorEntry]) -> Self::Colormap;

    fn set_colormap(&mut self, colormap: Self::Colormap);

    /// Creates an off-screen surface, possibly reusing the one previously held by the same slot.
    fn create_surface(&mut self, width: u16, height: u16, old: Option<Self::Bitmap>) -> Option<Self::Bitmap>;

    /// `None` restores drawing to the primary surface.
    fn set_surface(&mut self, surface: Option<&Self::Bitmap>);

    fn destroy_surface(&mut self, surface: Option<Self::Bitmap>);

    /// Reports a recoverable condition; the order stream continues.
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        let _ = diagnostic;
    }
}
