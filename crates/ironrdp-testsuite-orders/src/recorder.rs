use ironrdp_orders::decompress::{BitmapDecompressor, DecompressError};
use ironrdp_orders::{
    CachedGlyph, ColorEntry, Diagnostic, OrderRenderer, Pen, PersistentBitmapCache, Point, Rect, ResolvedBrush, Rop2,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBitmap {
    pub id: u32,
    pub width: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGlyph {
    pub id: u32,
    pub width: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

/// One renderer invocation.
///
/// Bitmaps, glyphs and surfaces are referred to by the id the recorder gave them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    SetClip(Rect),
    ResetClip,
    DestBlt {
        rop3: u8,
        rect: Rect,
    },
    PatBlt {
        rop3: u8,
        rect: Rect,
        brush: ResolvedBrush,
        background: u32,
        foreground: u32,
    },
    ScreenBlt {
        rop3: u8,
        rect: Rect,
        source: Point,
    },
    Line {
        rop2: u8,
        start: Point,
        end: Point,
        pen: Pen,
    },
    Rect {
        rect: Rect,
        color: u32,
    },
    DesktopSave {
        offset: u32,
        rect: Rect,
    },
    DesktopRestore {
        offset: u32,
        rect: Rect,
    },
    MemBlt {
        rop3: u8,
        rect: Rect,
        bitmap: u32,
        source: Point,
    },
    TriBlt {
        rop3: u8,
        rect: Rect,
        bitmap: u32,
        source: Point,
        brush: ResolvedBrush,
        background: u32,
        foreground: u32,
    },
    Polygon {
        rop2: u8,
        fill_mode: u8,
        points: Vec<Point>,
        brush: Option<ResolvedBrush>,
        background: u32,
        foreground: u32,
    },
    Polyline {
        rop2: u8,
        points: Vec<Point>,
        pen: Pen,
    },
    Ellipse {
        rop2: u8,
        fill_mode: u8,
        rect: Rect,
        brush: Option<ResolvedBrush>,
        background: u32,
        foreground: u32,
    },
    StartGlyphs {
        background: u32,
        foreground: u32,
        brush: ResolvedBrush,
    },
    DrawGlyph {
        position: Point,
        glyph: u32,
    },
    EndGlyphs(Rect),
    CreateBitmap {
        id: u32,
        width: u16,
        height: u16,
    },
    CreateGlyph {
        id: u32,
        width: u16,
        height: u16,
    },
    SetColormap(Vec<ColorEntry>),
    CreateSurface {
        id: u32,
        width: u16,
        height: u16,
        old: Option<u32>,
    },
    SetSurface(Option<u32>),
    DestroySurface(Option<u32>),
    Diagnostic(Diagnostic),
}

/// Renderer recording every call it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
    /// Makes `create_bitmap` fail.
    pub decline_bitmaps: bool,
    next_id: u32,
}

impl Recorder {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Diagnostic(diagnostic) => Some(diagnostic.clone()),
                _ => None,
            })
            .collect()
    }
}

impl OrderRenderer for Recorder {
    type Bitmap = TestBitmap;
    type Glyph = TestGlyph;
    type Colormap = Vec<ColorEntry>;

    fn set_clip(&mut self, clip: Rect) {
        self.calls.push(DrawCall::SetClip(clip));
    }

    fn reset_clip(&mut self) {
        self.calls.push(DrawCall::ResetClip);
    }

    fn dest_blt(&mut self, rop3: u8, rect: Rect) {
        self.calls.push(DrawCall::DestBlt { rop3, rect });
    }

    fn pat_blt(&mut self, rop3: u8, rect: Rect, brush: &ResolvedBrush, background: u32, foreground: u32) {
        self.calls.push(DrawCall::PatBlt {
            rop3,
            rect,
            brush: brush.clone(),
            background,
            foreground,
        });
    }

    fn screen_blt(&mut self, rop3: u8, rect: Rect, source: Point) {
        self.calls.push(DrawCall::ScreenBlt { rop3, rect, source });
    }

    fn line(&mut self, rop2: Rop2, start: Point, end: Point, pen: &Pen) {
        self.calls.push(DrawCall::Line {
            rop2: rop2.value(),
            start,
            end,
            pen: *pen,
        });
    }

    fn rect(&mut self, rect: Rect, color: u32) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn desktop_save(&mut self, offset: u32, rect: Rect) {
        self.calls.push(DrawCall::DesktopSave { offset, rect });
    }

    fn desktop_restore(&mut self, offset: u32, rect: Rect) {
        self.calls.push(DrawCall::DesktopRestore { offset, rect });
    }

    fn mem_blt(&mut self, rop3: u8, rect: Rect, bitmap: &TestBitmap, source: Point) {
        self.calls.push(DrawCall::MemBlt {
            rop3,
            rect,
            bitmap: bitmap.id,
            source,
        });
    }

    fn tri_blt(
        &mut self,
        rop3: u8,
        rect: Rect,
        bitmap: &TestBitmap,
        source: Point,
        brush: &ResolvedBrush,
        background: u32,
        foreground: u32,
    ) {
        self.calls.push(DrawCall::TriBlt {
            rop3,
            rect,
            bitmap: bitmap.id,
            source,
            brush: brush.clone(),
            background,
            foreground,
        });
    }

    fn polygon(
        &mut self,
        rop2: Rop2,
        fill_mode: u8,
        points: &[Point],
        brush: Option<&ResolvedBrush>,
        background: u32,
        foreground: u32,
    ) {
        self.calls.push(DrawCall::Polygon {
            rop2: rop2.value(),
            fill_mode,
            points: points.to_vec(),
            brush: brush.cloned(),
            background,
            foreground,
        });
    }

    fn polyline(&mut self, rop2: Rop2, points: &[Point], pen: &Pen) {
        self.calls.push(DrawCall::Polyline {
            rop2: rop2.value(),
            points: points.to_vec(),
            pen: *pen,
        });
    }

    fn ellipse(
        &mut self,
        rop2: Rop2,
        fill_mode: u8,
        rect: Rect,
        brush: Option<&ResolvedBrush>,
        background: u32,
        foreground: u32,
    ) {
        self.calls.push(DrawCall::Ellipse {
            rop2: rop2.value(),
            fill_mode,
            rect,
            brush: brush.cloned(),
            background,
            foreground,
        });
    }

    fn start_glyphs(&mut self, background: u32, foreground: u32, brush: &ResolvedBrush) {
        self.calls.push(DrawCall::StartGlyphs {
            background,
            foreground,
            brush: brush.clone(),
        });
    }

    fn draw_glyph(&mut self, position: Point, glyph: &CachedGlyph<TestGlyph>) {
        self.calls.push(DrawCall::DrawGlyph {
            position,
            glyph: glyph.glyph.id,
        });
    }

    fn end_glyphs(&mut self, rect: Rect) {
        self.calls.push(DrawCall::EndGlyphs(rect));
    }

    fn create_bitmap(&mut self, width: u16, height: u16, data: &[u8]) -> Option<TestBitmap> {
        if self.decline_bitmaps {
            return None;
        }

        let id = self.next_id();
        self.calls.push(DrawCall::CreateBitmap { id, width, height });

        Some(TestBitmap {
            id,
            width,
            height,
            data: data.to_vec(),
        })
    }

    fn create_glyph(&mut self, width: u16, height: u16, data: &[u8]) -> TestGlyph {
        let id = self.next_id();
        self.calls.push(DrawCall::CreateGlyph { id, width, height });

        TestGlyph {
            id,
            width,
            height,
            data: data.to_vec(),
        }
    }

    fn create_colormap(&mut self, colors: &[ColorEntry]) -> Vec<ColorEntry> {
        colors.to_vec()
    }

    fn set_colormap(&mut self, colormap: Vec<ColorEntry>) {
        self.calls.push(DrawCall::SetColormap(colormap));
    }

    fn create_surface(&mut self, width: u16, height: u16, old: Option<TestBitmap>) -> Option<TestBitmap> {
        let id = self.next_id();
        self.calls.push(DrawCall::CreateSurface {
            id,
            width,
            height,
            old: old.map(|surface| surface.id),
        });

        Some(TestBitmap {
            id,
            width,
            height,
            data: Vec::new(),
        })
    }

    fn set_surface(&mut self, surface: Option<&TestBitmap>) {
        self.calls.push(DrawCall::SetSurface(surface.map(|surface| surface.id)));
    }

    fn destroy_surface(&mut self, surface: Option<TestBitmap>) {
        self.calls.push(DrawCall::DestroySurface(surface.map(|surface| surface.id)));
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.calls.push(DrawCall::Diagnostic(diagnostic.clone()));
    }
}

/// Treats the payload as already decompressed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyDecompressor;

impl BitmapDecompressor for CopyDecompressor {
    fn decompress(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        _width: u16,
        _height: u16,
        _bytes_per_pixel: u8,
    ) -> Result<(), DecompressError> {
        if src.len() != dst.len() {
            return Err(DecompressError::new(format!(
                "expected {} bytes, got {}",
                dst.len(),
                src.len()
            )));
        }

        dst.copy_from_slice(src);

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBitmap {
    pub cache_id: u8,
    pub cache_index: u16,
    pub key: [u8; 8],
    pub width: u8,
    pub height: u8,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct RecordingPersistentCache {
    pub saved: Vec<PersistedBitmap>,
}

impl PersistentBitmapCache for RecordingPersistentCache {
    fn save_bitmap(&mut self, cache_id: u8, cache_index: u16, key: [u8; 8], width: u8, height: u8, data: &[u8]) {
        self.saved.push(PersistedBitmap {
            cache_id,
            cache_index,
            key,
            width,
            height,
            data: data.to_vec(),
        });
    }
}
