//! Resource caches populated by secondary orders.

use std::collections::HashMap;
use std::rc::Rc;

use crate::brush::BrushData;

/// Bitmap cache id under which off-screen surfaces are registered.
pub const SURFACE_CACHE_ID: u8 = 255;

/// Glyph registered by a font cache order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedGlyph<G> {
    pub offset: i16,
    pub baseline: i16,
    pub width: u16,
    pub height: u16,
    pub glyph: G,
}

/// Storage for every resource a server may refer to by handle.
///
/// The cache owns the resources. Lookups return `None` on a miss and each caller decides whether
/// the order is dropped or drawn with a substitute.
pub trait OrderCache {
    type Bitmap;
    type Glyph;

    fn bitmap(&self, cache_id: u8, index: u16) -> Option<&Self::Bitmap>;

    fn put_bitmap(&mut self, cache_id: u8, index: u16, bitmap: Self::Bitmap);

    fn remove_bitmap(&mut self, cache_id: u8, index: u16) -> Option<Self::Bitmap>;

    fn brush_data(&self, color_code: u8, index: u8) -> Option<Rc<BrushData>>;

    fn put_brush_data(&mut self, color_code: u8, index: u8, data: BrushData);

    fn font_glyph(&self, font: u8, character: u16) -> Option<&CachedGlyph<Self::Glyph>>;

    fn put_font_glyph(&mut self, font: u8, character: u16, glyph: CachedGlyph<Self::Glyph>);

    fn text_run(&self, index: u8) -> Option<&[u8]>;

    fn put_text_run(&mut self, index: u8, run: &[u8]);
}

/// Disk-backed bitmap store fed by bitmap cache orders flagged as persistent.
pub trait PersistentBitmapCache {
    fn save_bitmap(&mut self, cache_id: u8, cache_index: u16, key: [u8; 8], width: u8, height: u8, data: &[u8]);
}

/// [`OrderCache`] keeping everything in hash maps.
#[derive(Debug, Clone)]
pub struct InMemoryOrderCache<B, G> {
    bitmaps: HashMap<(u8, u16), B>,
    brushes: HashMap<(u8, u8), Rc<BrushData>>,
    glyphs: HashMap<(u8, u16), CachedGlyph<G>>,
    text_runs: HashMap<u8, Vec<u8>>,
}

impl<B, G> Default for InMemoryOrderCache<B, G> {
    fn default() -> Self {
        Self {
            bitmaps: HashMap::new(),
            brushes: HashMap::new(),
            glyphs: HashMap::new(),
            text_runs: HashMap::new(),
        }
    }
}

impl<B, G> InMemoryOrderCache<B, G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bitmap_count(&self) -> usize {
        self.bitmaps.len()
    }
}

impl<B, G> OrderCache for InMemoryOrderCache<B, G> {
    type Bitmap = B;
    type Glyph = G;

    fn bitmap(&self, cache_id: u8, index: u16) -> Option<&B> {
        self.bitmaps.get(&(cache_id, index))
    }

    fn put_bitmap(&mut self, cache_id: u8, index: u16, bitmap: B) {
        self.bitmaps.insert((cache_id, index), bitmap);
    }

    fn remove_bitmap(&mut self, cache_id: u8, index: u16) -> Option<B> {
        self.bitmaps.remove(&(cache_id, index))
    }

    fn brush_data(&self, color_code: u8, index: u8) -> Option<Rc<BrushData>> {
        self.brushes.get(&(color_code, index)).map(Rc::clone)
    }

    fn put_brush_data(&mut self, color_code: u8, index: u8, data: BrushData) {
        self.brushes.insert((color_code, index), Rc::new(data));
    }

    fn font_glyph(&self, font: u8, character: u16) -> Option<&CachedGlyph<G>> {
        self.glyphs.get(&(font, character))
    }

    fn put_font_glyph(&mut self, font: u8, character: u16, glyph: CachedGlyph<G>) {
        self.glyphs.insert((font, character), glyph);
    }

    fn text_run(&self, index: u8) -> Option<&[u8]> {
        self.text_runs.get(&index).map(Vec::as_slice)
    }

    fn put_text_run(&mut self, index: u8, run: &[u8]) {
        let entry = self.text_runs.entry(index).or_default();
        entry.clear();
        entry.extend_from_slice(run);
    }
}
