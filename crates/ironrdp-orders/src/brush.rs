//! Brushes and pens carried by primary orders.

use std::rc::Rc;

use ironrdp_core::{DecodeResult, ReadCursor};

use crate::cache::OrderCache;
use crate::codec::{read_color, read_slice, read_u8};
use crate::diagnostic::{self, Diagnostic};
use crate::field::FieldPresence;
use crate::renderer::OrderRenderer;

/// Style bit marking a brush whose pattern lives in the brush cache.
const CACHED_STYLE: u8 = 0x80;

/// Style given to a brush once it went through the brush cache, whether the lookup hit or not.
pub const RESOLVED_STYLE: u8 = 0x03;

/// Brush attributes as persisted in the order records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Brush {
    pub x_origin: u8,
    pub y_origin: u8,
    pub style: u8,
    /// Monochrome 8x8 pattern, or cache index in the first byte for cached brushes.
    pub pattern: [u8; 8],
}

impl Brush {
    const X_ORIGIN: u32 = 0x01;
    const Y_ORIGIN: u32 = 0x02;
    const STYLE: u32 = 0x04;
    const PATTERN_HEAD: u32 = 0x08;
    const PATTERN_TAIL: u32 = 0x10;

    /// `presence` must already be shifted so that bit 0 is the brush origin.
    pub(crate) fn decode_fields(&mut self, src: &mut ReadCursor<'_>, presence: FieldPresence) -> DecodeResult<()> {
        if presence.has(Self::X_ORIGIN) {
            self.x_origin = read_u8(src)?;
        }

        if presence.has(Self::Y_ORIGIN) {
            self.y_origin = read_u8(src)?;
        }

        if presence.has(Self::STYLE) {
            self.style = read_u8(src)?;
        }

        if presence.has(Self::PATTERN_HEAD) {
            self.pattern[0] = read_u8(src)?;
        }

        if presence.has(Self::PATTERN_TAIL) {
            self.pattern[1..].copy_from_slice(read_slice(src, 7)?);
        }

        Ok(())
    }

    /// Substitutes cached pattern data for cache-indexed brushes.
    ///
    /// A cache miss yields a blank pattern and an error diagnostic; the order is still drawn.
    pub(crate) fn resolve<R, C>(&self, cache: &C, renderer: &mut R) -> ResolvedBrush
    where
        R: OrderRenderer,
        C: OrderCache,
    {
        let mut resolved = ResolvedBrush {
            x_origin: self.x_origin,
            y_origin: self.y_origin,
            style: self.style,
            pattern: self.pattern,
            data: None,
        };

        if self.style & CACHED_STYLE != 0 {
            let color_code = self.style & 0x0F;
            let index = self.pattern[0];

            match cache.brush_data(color_code, index) {
                Some(data) => resolved.data = Some(data),
                None => {
                    diagnostic::emit(
                        renderer,
                        Diagnostic::BrushCacheMiss {
                            style: self.style,
                            color_code,
                            index,
                        },
                    );
                    resolved.pattern = [0; 8];
                }
            }

            resolved.style = RESOLVED_STYLE;
        }

        resolved
    }
}

/// Brush ready for painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBrush {
    pub x_origin: u8,
    pub y_origin: u8,
    pub style: u8,
    pub pattern: [u8; 8],
    /// Cached pattern pixels, present when the brush was found in the brush cache.
    pub data: Option<Rc<BrushData>>,
}

/// 8x8 brush pattern stored by the brush cache order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushData {
    /// 1 for monochrome patterns, 3 to 6 for `color_code - 2` bytes per pixel.
    pub color_code: u8,
    /// Rows top-down.
    pub data: Vec<u8>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub style: u8,
    pub width: u8,
    pub color: u32,
}

impl Pen {
    pub(crate) fn decode_fields(&mut self, src: &mut ReadCursor<'_>, presence: FieldPresence) -> DecodeResult<()> {
        if presence.has(0x01) {
            self.style = read_u8(src)?;
        }

        if presence.has(0x02) {
            self.width = read_u8(src)?;
        }

        if presence.has(0x04) {
            self.color = read_color(src)?;
        }

        Ok(())
    }
}
