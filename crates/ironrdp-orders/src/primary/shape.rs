use ironrdp_core::{DecodeResult, ReadCursor};

use super::checked_rop2;
use crate::brush::{Brush, Pen};
use crate::cache::OrderCache;
use crate::codec::{read_color, read_coord, read_u16, read_u8, Point, Rect};
use crate::decoder::OrderContext;
use crate::field::FieldPresence;
use crate::renderer::OrderRenderer;
use crate::state::PrimaryOrderType;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineTo {
    pub back_mode: u16,
    pub start_x: i16,
    pub start_y: i16,
    pub end_x: i16,
    pub end_y: i16,
    pub background: u32,
    pub rop2: u8,
    pub pen: Pen,
}

impl LineTo {
    pub(crate) fn process<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        if presence.has(0x0001) {
            self.back_mode = read_u16(src)?;
        }

        if presence.has(0x0002) {
            read_coord(src, &mut self.start_x, delta)?;
        }

        if presence.has(0x0004) {
            read_coord(src, &mut self.start_y, delta)?;
        }

        if presence.has(0x0008) {
            read_coord(src, &mut self.end_x, delta)?;
        }

        if presence.has(0x0010) {
            read_coord(src, &mut self.end_y, delta)?;
        }

        if presence.has(0x0020) {
            self.background = read_color(src)?;
        }

        if presence.has(0x0040) {
            self.rop2 = read_u8(src)?;
        }

        self.pen.decode_fields(src, presence.shifted(7))?;

        trace!(order = ?self, "LineTo");

        let start = Point::new(i32::from(self.start_x), i32::from(self.start_y));
        let end = Point::new(i32::from(self.end_x), i32::from(self.end_y));

        if let Some(rop2) = checked_rop2(ctx.renderer, PrimaryOrderType::LineTo, self.rop2, start) {
            ctx.renderer.line(rop2, start, end, &self.pen);
        }

        Ok(())
    }
}

/// Solid rectangle fill.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpaqueRect {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub color: u32,
}

impl OpaqueRect {
    pub(crate) fn process<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        if presence.has(0x01) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x02) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x04) {
            read_coord(src, &mut self.width, delta)?;
        }

        if presence.has(0x08) {
            read_coord(src, &mut self.height, delta)?;
        }

        // Each colour byte is a field of its own.
        if presence.has(0x10) {
            self.color = (self.color & 0xFFFF_FF00) | u32::from(read_u8(src)?);
        }

        if presence.has(0x20) {
            self.color = (self.color & 0xFFFF_00FF) | (u32::from(read_u8(src)?) << 8);
        }

        if presence.has(0x40) {
            self.color = (self.color & 0xFF00_FFFF) | (u32::from(read_u8(src)?) << 16);
        }

        trace!(order = ?self, "OpaqueRect");

        ctx.renderer.rect(
            Rect::new(
                i32::from(self.x),
                i32::from(self.y),
                i32::from(self.width),
                i32::from(self.height),
            ),
            self.color,
        );

        Ok(())
    }
}

/// Ellipse record, shared by the solid-colour and brushed variants.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ellipse {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
    pub rop2: u8,
    pub fill_mode: u8,
    /// Brushed variant only.
    pub background: u32,
    pub foreground: u32,
    /// Brushed variant only.
    pub brush: Brush,
}

impl Ellipse {
    fn decode_extent(&mut self, src: &mut ReadCursor<'_>, presence: FieldPresence, delta: bool) -> DecodeResult<()> {
        if presence.has(0x01) {
            read_coord(src, &mut self.left, delta)?;
        }

        if presence.has(0x02) {
            read_coord(src, &mut self.top, delta)?;
        }

        if presence.has(0x04) {
            read_coord(src, &mut self.right, delta)?;
        }

        if presence.has(0x08) {
            read_coord(src, &mut self.bottom, delta)?;
        }

        if presence.has(0x10) {
            self.rop2 = read_u8(src)?;
        }

        if presence.has(0x20) {
            self.fill_mode = read_u8(src)?;
        }

        Ok(())
    }

    fn rect(&self) -> Rect {
        let left = i32::from(self.left);
        let top = i32::from(self.top);

        Rect::new(left, top, i32::from(self.right) - left, i32::from(self.bottom) - top)
    }

    pub(crate) fn process_sc<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        self.decode_extent(src, presence, delta)?;

        if presence.has(0x40) {
            self.foreground = read_color(src)?;
        }

        trace!(order = ?self, "EllipseSc");

        let rect = self.rect();

        if let Some(rop2) = checked_rop2(
            ctx.renderer,
            PrimaryOrderType::EllipseSc,
            self.rop2,
            Point::new(rect.x, rect.y),
        ) {
            ctx.renderer.ellipse(rop2, self.fill_mode, rect, None, 0, self.foreground);
        }

        Ok(())
    }

    pub(crate) fn process_cb<R, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()>
    where
        R: OrderRenderer,
        C: OrderCache,
    {
        self.decode_extent(src, presence, delta)?;

        if presence.has(0x0040) {
            self.background = read_color(src)?;
        }

        if presence.has(0x0080) {
            self.foreground = read_color(src)?;
        }

        self.brush.decode_fields(src, presence.shifted(8))?;

        trace!(order = ?self, "EllipseCb");

        let rect = self.rect();

        let Some(rop2) = checked_rop2(
            ctx.renderer,
            PrimaryOrderType::EllipseCb,
            self.rop2,
            Point::new(rect.x, rect.y),
        ) else {
            return Ok(());
        };

        let brush = self.brush.resolve(&*ctx.cache, ctx.renderer);

        ctx.renderer.ellipse(
            rop2,
            self.fill_mode,
            rect,
            Some(&brush),
            self.background,
            self.foreground,
        );

        Ok(())
    }
}
