use ironrdp_core::{DecodeResult, ReadCursor};

use crate::brush::Brush;
use crate::cache::OrderCache;
use crate::codec::{read_color, read_i16, read_slice, read_u8, Point, Rect};
use crate::config::Config;
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::field::FieldPresence;
use crate::renderer::OrderRenderer;

const STORE_RUN: u8 = 0xFF;
const REPLAY_RUN: u8 = 0xFE;

/// Offsets apply to y instead of x.
const VERTICAL: u8 = 0x04;
/// Glyphs advance by their own width and carry no offset byte.
const IMPLICIT_X: u8 = 0x20;

const MIX_OPAQUE: u8 = 1;

/// Two-byte glyph index text record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlyphIndex {
    pub font: u8,
    pub flags: u8,
    pub rop3: u8,
    pub mix_mode: u8,
    pub foreground: u32,
    pub background: u32,
    pub clip_left: i16,
    pub clip_top: i16,
    pub clip_right: i16,
    pub clip_bottom: i16,
    pub box_left: i16,
    pub box_top: i16,
    pub box_right: i16,
    pub box_bottom: i16,
    pub brush: Brush,
    pub x: i16,
    pub y: i16,
    /// Glyph run, interleaving glyph indices, offsets and text run cache controls.
    pub text: Vec<u8>,
}

impl GlyphIndex {
    pub(crate) fn process<R, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        config: &Config,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()>
    where
        R: OrderRenderer,
        C: OrderCache<Glyph = R::Glyph>,
    {
        if presence.has(0x00_0001) {
            self.font = read_u8(src)?;
        }

        if presence.has(0x00_0002) {
            self.flags = read_u8(src)?;
        }

        if presence.has(0x00_0004) {
            self.rop3 = read_u8(src)?;
        }

        if presence.has(0x00_0008) {
            self.mix_mode = read_u8(src)?;
        }

        if presence.has(0x00_0010) {
            self.foreground = read_color(src)?;
        }

        if presence.has(0x00_0020) {
            self.background = read_color(src)?;
        }

        if presence.has(0x00_0040) {
            self.clip_left = read_i16(src)?;
        }

        if presence.has(0x00_0080) {
            self.clip_top = read_i16(src)?;
        }

        if presence.has(0x00_0100) {
            self.clip_right = read_i16(src)?;
        }

        if presence.has(0x00_0200) {
            self.clip_bottom = read_i16(src)?;
        }

        if presence.has(0x00_0400) {
            self.box_left = read_i16(src)?;
        }

        if presence.has(0x00_0800) {
            self.box_top = read_i16(src)?;
        }

        if presence.has(0x00_1000) {
            self.box_right = read_i16(src)?;
        }

        if presence.has(0x00_2000) {
            self.box_bottom = read_i16(src)?;
        }

        self.brush.decode_fields(src, presence.shifted(14))?;

        if presence.has(0x08_0000) {
            self.x = read_i16(src)?;
        }

        if presence.has(0x10_0000) {
            self.y = read_i16(src)?;
        }

        if presence.has(0x20_0000) {
            let len = read_u8(src)?;
            let text = read_slice(src, usize::from(len))?;

            self.text.clear();
            self.text.extend_from_slice(text);
        }

        trace!(order = ?self, "GlyphIndex");

        let brush = self.brush.resolve(&*ctx.cache, ctx.renderer);

        let clip = edges_to_rect(self.clip_left, self.clip_top, self.clip_right, self.clip_bottom);
        let mut glyph_box = edges_to_rect(self.box_left, self.box_top, self.box_right, self.box_bottom);

        let desktop_width = i32::from(config.desktop_size.width);
        if glyph_box.x + glyph_box.width > desktop_width {
            glyph_box.width = desktop_width - glyph_box.x;
        }

        let area = if glyph_box.width > 0 {
            ctx.renderer.rect(glyph_box, self.background);
            glyph_box
        } else {
            if self.mix_mode == MIX_OPAQUE {
                ctx.renderer.rect(clip, self.background);
            }
            clip
        };

        ctx.renderer.start_glyphs(self.background, self.foreground, &brush);

        let mut cursor = GlyphCursor {
            font: self.font,
            flags: self.flags,
            position: Point::new(i32::from(self.x), i32::from(self.y)),
        };

        if let Err(diagnostic) = cursor.draw_run(&self.text, ctx) {
            diagnostic::emit(ctx.renderer, diagnostic);
        }

        ctx.renderer.end_glyphs(area);

        Ok(())
    }
}

fn edges_to_rect(left: i16, top: i16, right: i16, bottom: i16) -> Rect {
    let left = i32::from(left);
    let top = i32::from(top);

    Rect::new(left, top, i32::from(right) - left, i32::from(bottom) - top)
}

/// Pen position while walking a glyph run.
struct GlyphCursor {
    font: u8,
    flags: u8,
    position: Point,
}

impl GlyphCursor {
    fn implicit_x(&self) -> bool {
        self.flags & IMPLICIT_X != 0
    }

    fn advance(&mut self, offset: i32) {
        if self.flags & VERTICAL != 0 {
            self.position.y += offset;
        } else {
            self.position.x += offset;
        }
    }

    /// Draws the whole run, storing and replaying cached runs along the way.
    ///
    /// Stops at the first truncated control or offset.
    fn draw_run<R, C>(&mut self, text: &[u8], ctx: &mut OrderContext<'_, R, C>) -> Result<(), Diagnostic>
    where
        R: OrderRenderer,
        C: OrderCache<Glyph = R::Glyph>,
    {
        let mut segment = text;
        let mut i = 0;

        while let Some(&byte) = segment.get(i) {
            match byte {
                STORE_RUN => {
                    if i + 3 > segment.len() {
                        return Err(Diagnostic::TruncatedTextControl {
                            control: STORE_RUN,
                            position: i,
                            length: segment.len(),
                        });
                    }

                    let slot = segment[i + 1];
                    let len = usize::from(segment[i + 2]).min(segment.len());
                    ctx.cache.put_text_run(slot, &segment[..len]);

                    segment = &segment[i + 3..];
                    i = 0;
                }
                REPLAY_RUN => {
                    let slot = *segment.get(i + 1).ok_or(Diagnostic::TruncatedTextControl {
                        control: REPLAY_RUN,
                        position: i,
                        length: segment.len(),
                    })?;
                    let nudge = segment.get(i + 2).copied();

                    if let Some(run) = ctx.cache.text_run(slot) {
                        if let Some(nudge) = nudge {
                            if run.get(1) == Some(&0) && !self.implicit_x() {
                                self.advance(i32::from(nudge));
                            }
                        }

                        let mut j = 0;
                        while j < run.len() {
                            j = self.place_glyph(run, j, &*ctx.cache, ctx.renderer)?;
                        }
                    }

                    let consumed = if nudge.is_some() { i + 3 } else { i + 2 };
                    segment = &segment[consumed..];
                    i = 0;
                }
                _ => {
                    i = self.place_glyph(segment, i, &*ctx.cache, ctx.renderer)?;
                }
            }
        }

        Ok(())
    }

    /// Draws the glyph indexed by `run[index]` and returns the index following its offset bytes.
    fn place_glyph<R, C>(&mut self, run: &[u8], index: usize, cache: &C, renderer: &mut R) -> Result<usize, Diagnostic>
    where
        R: OrderRenderer,
        C: OrderCache<Glyph = R::Glyph>,
    {
        let truncated = Diagnostic::TruncatedGlyphOffset {
            position: index,
            length: run.len(),
        };

        let character = *run.get(index).ok_or_else(|| truncated.clone())?;
        let glyph = cache.font_glyph(self.font, u16::from(character));
        let mut next = index + 1;

        if !self.implicit_x() {
            let offset = *run.get(next).ok_or_else(|| truncated.clone())?;
            next += 1;

            if offset & 0x80 != 0 {
                let wide = run.get(next..next + 2).ok_or(truncated)?;
                self.advance(i32::from(u16::from_le_bytes([wide[0], wide[1]])));
                next += 2;
            } else {
                self.advance(i32::from(offset));
            }
        }

        if let Some(glyph) = glyph {
            let position = Point::new(
                self.position.x + i32::from(glyph.offset),
                self.position.y + i32::from(glyph.baseline),
            );
            renderer.draw_glyph(position, glyph);

            if self.implicit_x() {
                self.position.x += i32::from(glyph.width);
            }
        }

        Ok(next)
    }
}
