use ironrdp_core::{DecodeResult, ReadCursor};

use crate::brush::Brush;
use crate::cache::OrderCache;
use crate::codec::{read_color, read_coord, read_u16, read_u32, read_u8, Point, Rect};
use crate::decoder::OrderContext;
use crate::field::FieldPresence;
use crate::renderer::OrderRenderer;

fn rect(x: i16, y: i16, width: i16, height: i16) -> Rect {
    Rect::new(i32::from(x), i32::from(y), i32::from(width), i32::from(height))
}

fn point(x: i16, y: i16) -> Point {
    Point::new(i32::from(x), i32::from(y))
}

/// Destination-only blit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DstBlt {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub rop3: u8,
}

impl DstBlt {
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

        if presence.has(0x10) {
            self.rop3 = read_u8(src)?;
        }

        trace!(order = ?self, "DstBlt");

        ctx.renderer.dest_blt(self.rop3, rect(self.x, self.y, self.width, self.height));

        Ok(())
    }
}

/// Pattern blit using the order brush.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatBlt {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub rop3: u8,
    pub background: u32,
    pub foreground: u32,
    pub brush: Brush,
}

impl PatBlt {
    pub(crate) fn process<R, C>(
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
        if presence.has(0x0001) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x0002) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x0004) {
            read_coord(src, &mut self.width, delta)?;
        }

        if presence.has(0x0008) {
            read_coord(src, &mut self.height, delta)?;
        }

        if presence.has(0x0010) {
            self.rop3 = read_u8(src)?;
        }

        if presence.has(0x0020) {
            self.background = read_color(src)?;
        }

        if presence.has(0x0040) {
            self.foreground = read_color(src)?;
        }

        self.brush.decode_fields(src, presence.shifted(7))?;

        trace!(order = ?self, "PatBlt");

        let brush = self.brush.resolve(&*ctx.cache, ctx.renderer);

        ctx.renderer.pat_blt(
            self.rop3,
            rect(self.x, self.y, self.width, self.height),
            &brush,
            self.background,
            self.foreground,
        );

        Ok(())
    }
}

/// Screen-to-screen blit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrBlt {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub rop3: u8,
    pub src_x: i16,
    pub src_y: i16,
}

impl ScrBlt {
    pub(crate) fn process<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        if presence.has(0x0001) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x0002) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x0004) {
            read_coord(src, &mut self.width, delta)?;
        }

        if presence.has(0x0008) {
            read_coord(src, &mut self.height, delta)?;
        }

        if presence.has(0x0010) {
            self.rop3 = read_u8(src)?;
        }

        if presence.has(0x0020) {
            read_coord(src, &mut self.src_x, delta)?;
        }

        if presence.has(0x0040) {
            read_coord(src, &mut self.src_y, delta)?;
        }

        trace!(order = ?self, "ScrBlt");

        ctx.renderer.screen_blt(
            self.rop3,
            rect(self.x, self.y, self.width, self.height),
            point(self.src_x, self.src_y),
        );

        Ok(())
    }
}

/// Desktop save or restore to the server-side offscreen buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveBitmap {
    pub offset: u32,
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
    /// 0 saves, anything else restores.
    pub action: u8,
}

impl SaveBitmap {
    pub(crate) fn process<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        if presence.has(0x01) {
            self.offset = read_u32(src)?;
        }

        if presence.has(0x02) {
            read_coord(src, &mut self.left, delta)?;
        }

        if presence.has(0x04) {
            read_coord(src, &mut self.top, delta)?;
        }

        if presence.has(0x08) {
            read_coord(src, &mut self.right, delta)?;
        }

        if presence.has(0x10) {
            read_coord(src, &mut self.bottom, delta)?;
        }

        if presence.has(0x20) {
            self.action = read_u8(src)?;
        }

        trace!(order = ?self, "SaveBitmap");

        let left = i32::from(self.left);
        let top = i32::from(self.top);
        let rect = Rect::new(
            left,
            top,
            i32::from(self.right) - left + 1,
            i32::from(self.bottom) - top + 1,
        );

        if self.action == 0 {
            ctx.renderer.desktop_save(self.offset, rect);
        } else {
            ctx.renderer.desktop_restore(self.offset, rect);
        }

        Ok(())
    }
}

/// Blit from a cached bitmap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemBlt {
    pub cache_id: u8,
    pub color_table: u8,
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub rop3: u8,
    pub src_x: i16,
    pub src_y: i16,
    pub cache_index: u16,
}

impl MemBlt {
    pub(crate) fn process<R, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()>
    where
        R: OrderRenderer,
        C: OrderCache<Bitmap = R::Bitmap>,
    {
        if presence.has(0x0001) {
            self.cache_id = read_u8(src)?;
            self.color_table = read_u8(src)?;
        }

        if presence.has(0x0002) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x0004) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x0008) {
            read_coord(src, &mut self.width, delta)?;
        }

        if presence.has(0x0010) {
            read_coord(src, &mut self.height, delta)?;
        }

        if presence.has(0x0020) {
            self.rop3 = read_u8(src)?;
        }

        if presence.has(0x0040) {
            read_coord(src, &mut self.src_x, delta)?;
        }

        if presence.has(0x0080) {
            read_coord(src, &mut self.src_y, delta)?;
        }

        if presence.has(0x0100) {
            self.cache_index = read_u16(src)?;
        }

        trace!(order = ?self, "MemBlt");

        // A miss is a transient cache desync, the order is skipped.
        let Some(bitmap) = ctx.cache.bitmap(self.cache_id, self.cache_index) else {
            return Ok(());
        };

        ctx.renderer.mem_blt(
            self.rop3,
            rect(self.x, self.y, self.width, self.height),
            bitmap,
            point(self.src_x, self.src_y),
        );

        Ok(())
    }
}

/// Three-way blit combining a cached bitmap, the order brush and the destination.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Mem3Blt {
    pub cache_id: u8,
    pub color_table: u8,
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub rop3: u8,
    pub src_x: i16,
    pub src_y: i16,
    pub background: u32,
    pub foreground: u32,
    pub brush: Brush,
    pub cache_index: u16,
    pub reserved: u16,
}

impl Mem3Blt {
    pub(crate) fn process<R, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()>
    where
        R: OrderRenderer,
        C: OrderCache<Bitmap = R::Bitmap>,
    {
        if presence.has(0x00_0001) {
            self.cache_id = read_u8(src)?;
            self.color_table = read_u8(src)?;
        }

        if presence.has(0x00_0002) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x00_0004) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x00_0008) {
            read_coord(src, &mut self.width, delta)?;
        }

        if presence.has(0x00_0010) {
            read_coord(src, &mut self.height, delta)?;
        }

        if presence.has(0x00_0020) {
            self.rop3 = read_u8(src)?;
        }

        if presence.has(0x00_0040) {
            read_coord(src, &mut self.src_x, delta)?;
        }

        if presence.has(0x00_0080) {
            read_coord(src, &mut self.src_y, delta)?;
        }

        if presence.has(0x00_0100) {
            self.background = read_color(src)?;
        }

        if presence.has(0x00_0200) {
            self.foreground = read_color(src)?;
        }

        self.brush.decode_fields(src, presence.shifted(10))?;

        if presence.has(0x00_8000) {
            self.cache_index = read_u16(src)?;
        }

        if presence.has(0x01_0000) {
            self.reserved = read_u16(src)?;
        }

        trace!(order = ?self, "Mem3Blt");

        let Some(bitmap) = ctx.cache.bitmap(self.cache_id, self.cache_index) else {
            return Ok(());
        };

        let brush = self.brush.resolve(&*ctx.cache, ctx.renderer);

        ctx.renderer.tri_blt(
            self.rop3,
            rect(self.x, self.y, self.width, self.height),
            bitmap,
            point(self.src_x, self.src_y),
            &brush,
            self.background,
            self.foreground,
        );

        Ok(())
    }
}
