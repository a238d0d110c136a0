//! Cross-order persisted primary order fields.
//!
//! A field left out of a primary order keeps the value it had in the previous order of the same
//! type, so every record below is updated in place and survives between calls.

use crate::codec::Bounds;

pub use crate::primary::{
    DstBlt, Ellipse, GlyphIndex, LineTo, Mem3Blt, MemBlt, OpaqueRect, PatBlt, Polygon, Polyline, SaveBitmap, ScrBlt,
};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryOrderType {
    DstBlt = 0x00,
    PatBlt = 0x01,
    ScrBlt = 0x02,
    LineTo = 0x09,
    OpaqueRect = 0x0A,
    SaveBitmap = 0x0B,
    MemBlt = 0x0D,
    Mem3Blt = 0x0E,
    PolygonSc = 0x14,
    PolygonCb = 0x15,
    Polyline = 0x16,
    EllipseSc = 0x19,
    EllipseCb = 0x1A,
    GlyphIndex = 0x1B,
}

impl PrimaryOrderType {
    pub fn from_u8(value: u8) -> Option<Self> {
        let order_type = match value {
            0x00 => Self::DstBlt,
            0x01 => Self::PatBlt,
            0x02 => Self::ScrBlt,
            0x09 => Self::LineTo,
            0x0A => Self::OpaqueRect,
            0x0B => Self::SaveBitmap,
            0x0D => Self::MemBlt,
            0x0E => Self::Mem3Blt,
            0x14 => Self::PolygonSc,
            0x15 => Self::PolygonCb,
            0x16 => Self::Polyline,
            0x19 => Self::EllipseSc,
            0x1A => Self::EllipseCb,
            0x1B => Self::GlyphIndex,
            _ => return None,
        };

        Some(order_type)
    }

    #[expect(
        clippy::as_conversions,
        reason = "guarantees discriminant layout, and as is the only way to cast enum -> primitive"
    )]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Number of field presence bytes announced for an order type.
    ///
    /// Unknown types use a single byte.
    pub fn presence_width(order_type: u8) -> usize {
        match Self::from_u8(order_type) {
            Some(Self::Mem3Blt | Self::GlyphIndex) => 3,
            Some(Self::PatBlt | Self::MemBlt | Self::LineTo | Self::PolygonCb | Self::EllipseCb) => 2,
            _ => 1,
        }
    }
}

/// Binary raster operation, restricted to the 16 values defined by GDI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rop2(u8);

impl Rop2 {
    pub fn new(value: u8) -> Option<Self> {
        (1..=16).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Everything the decoder remembers between primary orders.
#[derive(Debug, Clone)]
pub struct OrderState {
    /// Raw type of the last primary order; carried over when the type-change flag is absent.
    pub order_type: u8,
    /// Last clip rectangle, reused when the zero-bounds-deltas flag is set.
    pub bounds: Bounds,
    pub dst_blt: DstBlt,
    pub pat_blt: PatBlt,
    pub scr_blt: ScrBlt,
    pub line_to: LineTo,
    pub opaque_rect: OpaqueRect,
    pub save_bitmap: SaveBitmap,
    pub mem_blt: MemBlt,
    pub mem3_blt: Mem3Blt,
    pub polygon_sc: Polygon,
    pub polygon_cb: Polygon,
    pub polyline: Polyline,
    pub ellipse_sc: Ellipse,
    pub ellipse_cb: Ellipse,
    pub glyph_index: GlyphIndex,
}

impl Default for OrderState {
    fn default() -> Self {
        Self {
            order_type: PrimaryOrderType::PatBlt.as_u8(),
            bounds: Bounds::default(),
            dst_blt: DstBlt::default(),
            pat_blt: PatBlt::default(),
            scr_blt: ScrBlt::default(),
            line_to: LineTo::default(),
            opaque_rect: OpaqueRect::default(),
            save_bitmap: SaveBitmap::default(),
            mem_blt: MemBlt::default(),
            mem3_blt: Mem3Blt::default(),
            polygon_sc: Polygon::default(),
            polygon_cb: Polygon::default(),
            polyline: Polyline::default(),
            ellipse_sc: Ellipse::default(),
            ellipse_cb: Ellipse::default(),
            glyph_index: GlyphIndex::default(),
        }
    }
}

impl OrderState {
    /// Forgets every persisted field, as on a fresh connection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
