use ironrdp_core::{DecodeResult, ReadCursor};

use super::checked_rop2;
use crate::brush::{Brush, Pen};
use crate::cache::OrderCache;
use crate::codec::{read_color, read_coord, read_slice, read_u8, Point};
use crate::decoder::OrderContext;
use crate::diagnostic::{self, Diagnostic};
use crate::field::FieldPresence;
use crate::renderer::OrderRenderer;
use crate::scratch::ScratchArena;
use crate::state::PrimaryOrderType;

/// Polygon record, shared by the solid-colour and brushed variants.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub x: i16,
    pub y: i16,
    pub rop2: u8,
    pub fill_mode: u8,
    /// Brushed variant only.
    pub background: u32,
    pub foreground: u32,
    /// Brushed variant only.
    pub brush: Brush,
    pub num_points: u8,
    /// Delta-encoded points following the origin.
    pub data: Vec<u8>,
}

impl Polygon {
    pub(crate) fn process_sc<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        scratch: &mut ScratchArena,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        if presence.has(0x01) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x02) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x04) {
            self.rop2 = read_u8(src)?;
        }

        if presence.has(0x08) {
            self.fill_mode = read_u8(src)?;
        }

        if presence.has(0x10) {
            self.foreground = read_color(src)?;
        }

        if presence.has(0x20) {
            self.num_points = read_u8(src)?;
        }

        if presence.has(0x40) {
            read_point_data(src, &mut self.data)?;
        }

        trace!(order = ?self, "PolygonSc");

        let origin = Point::new(i32::from(self.x), i32::from(self.y));

        let Some(rop2) = checked_rop2(ctx.renderer, PrimaryOrderType::PolygonSc, self.rop2, origin) else {
            return Ok(());
        };

        if let Some(points) = decode_points(
            ctx.renderer,
            PrimaryOrderType::PolygonSc,
            origin,
            self.num_points,
            &self.data,
            scratch,
        ) {
            ctx.renderer.polygon(rop2, self.fill_mode, points, None, 0, self.foreground);
        }

        Ok(())
    }

    pub(crate) fn process_cb<R, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        scratch: &mut ScratchArena,
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
            self.rop2 = read_u8(src)?;
        }

        if presence.has(0x0008) {
            self.fill_mode = read_u8(src)?;
        }

        if presence.has(0x0010) {
            self.background = read_color(src)?;
        }

        if presence.has(0x0020) {
            self.foreground = read_color(src)?;
        }

        self.brush.decode_fields(src, presence.shifted(6))?;

        if presence.has(0x0800) {
            self.num_points = read_u8(src)?;
        }

        if presence.has(0x1000) {
            read_point_data(src, &mut self.data)?;
        }

        trace!(order = ?self, "PolygonCb");

        let origin = Point::new(i32::from(self.x), i32::from(self.y));

        let Some(rop2) = checked_rop2(ctx.renderer, PrimaryOrderType::PolygonCb, self.rop2, origin) else {
            return Ok(());
        };

        let brush = self.brush.resolve(&*ctx.cache, ctx.renderer);

        if let Some(points) = decode_points(
            ctx.renderer,
            PrimaryOrderType::PolygonCb,
            origin,
            self.num_points,
            &self.data,
            scratch,
        ) {
            ctx.renderer.polygon(
                rop2,
                self.fill_mode,
                points,
                Some(&brush),
                self.background,
                self.foreground,
            );
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Polyline {
    pub x: i16,
    pub y: i16,
    pub rop2: u8,
    pub foreground: u32,
    pub num_deltas: u8,
    /// Delta-encoded points following the origin.
    pub data: Vec<u8>,
}

impl Polyline {
    pub(crate) fn process<R: OrderRenderer, C>(
        &mut self,
        src: &mut ReadCursor<'_>,
        presence: FieldPresence,
        delta: bool,
        scratch: &mut ScratchArena,
        ctx: &mut OrderContext<'_, R, C>,
    ) -> DecodeResult<()> {
        if presence.has(0x01) {
            read_coord(src, &mut self.x, delta)?;
        }

        if presence.has(0x02) {
            read_coord(src, &mut self.y, delta)?;
        }

        if presence.has(0x04) {
            self.rop2 = read_u8(src)?;
        }

        if presence.has(0x10) {
            self.foreground = read_color(src)?;
        }

        if presence.has(0x20) {
            self.num_deltas = read_u8(src)?;
        }

        if presence.has(0x40) {
            read_point_data(src, &mut self.data)?;
        }

        trace!(order = ?self, "Polyline");

        let origin = Point::new(i32::from(self.x), i32::from(self.y));

        let Some(rop2) = checked_rop2(ctx.renderer, PrimaryOrderType::Polyline, self.rop2, origin) else {
            return Ok(());
        };

        let pen = Pen {
            style: 0,
            width: 0,
            color: self.foreground,
        };

        if let Some(points) = decode_points(
            ctx.renderer,
            PrimaryOrderType::Polyline,
            origin,
            self.num_deltas,
            &self.data,
            scratch,
        ) {
            ctx.renderer.polyline(rop2, points, &pen);
        }

        Ok(())
    }
}

fn read_point_data(src: &mut ReadCursor<'_>, data: &mut Vec<u8>) -> DecodeResult<()> {
    let len = read_u8(src)?;
    let bytes = read_slice(src, usize::from(len))?;

    data.clear();
    data.extend_from_slice(bytes);

    Ok(())
}

/// Expands the point list into the scratch arena.
///
/// Returns `None` after reporting a parse error when fewer points than announced could be decoded.
fn decode_points<'a, R: OrderRenderer>(
    renderer: &mut R,
    order: PrimaryOrderType,
    origin: Point,
    count: u8,
    data: &[u8],
    scratch: &'a mut ScratchArena,
) -> Option<&'a [Point]> {
    let points = scratch.points(usize::from(count) + 1);
    let run = decode_delta_points(origin, data, points);

    if run.decoded == usize::from(count) {
        Some(points)
    } else {
        diagnostic::emit(
            renderer,
            Diagnostic::PointCountMismatch {
                order,
                declared: count,
                decoded: u8::try_from(run.decoded).unwrap_or(u8::MAX),
                position: origin,
            },
        );
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointRun {
    /// Points decoded after the origin.
    decoded: usize,
    /// Bytes of `data` consumed, flag bytes included.
    consumed: usize,
}

/// Decodes `points.len() - 1` points following `origin`.
///
/// Each point is described by two bits of a flag byte (one flag byte per four points, all flag
/// bytes first): `0x80` set omits the x delta and `0x40` set omits the y delta. Omitted
/// coordinates repeat the previous point. Decoding stops when `data` is exhausted.
fn decode_delta_points(origin: Point, data: &[u8], points: &mut [Point]) -> PointRun {
    let count = points.len().saturating_sub(1);

    let mut flag_index = 0;
    let mut data_index = count.saturating_sub(1) / 4 + 1;
    let mut flags = 0u8;
    let mut previous = origin;
    let mut next = 1;

    if let Some(first) = points.first_mut() {
        *first = origin;
    }

    while next <= count && data_index < data.len() {
        if (next - 1) % 4 == 0 {
            let Some(byte) = data.get(flag_index) else {
                break;
            };
            flags = *byte;
            flag_index += 1;
        }

        let mut point = previous;

        if flags & 0x80 == 0 {
            let Some(dx) = parse_delta(data, &mut data_index) else {
                break;
            };
            point.x = point.x.wrapping_add(dx);
        }

        if flags & 0x40 == 0 {
            let Some(dy) = parse_delta(data, &mut data_index) else {
                break;
            };
            point.y = point.y.wrapping_add(dy);
        }

        flags <<= 2;

        points[next] = point;
        previous = point;
        next += 1;
    }

    PointRun {
        decoded: next - 1,
        consumed: data_index.min(data.len()),
    }
}

/// Reads a 1 or 2 byte signed delta.
///
/// Bit 0x40 of the first byte is the sign of a 6-bit value; bit 0x80 extends it with a second byte.
fn parse_delta(data: &[u8], index: &mut usize) -> Option<i32> {
    let first = *data.get(*index)?;
    *index += 1;

    let mut value = i32::from(first);

    if first & 0x40 != 0 {
        value |= !0x3F;
    } else {
        value &= 0x3F;
    }

    if first & 0x80 != 0 {
        let second = *data.get(*index)?;
        *index += 1;
        value = (value << 8) | i32::from(second);
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_byte_deltas() {
        let mut index = 0;
        assert_eq!(parse_delta(&[0x05], &mut index), Some(5));
        assert_eq!(index, 1);

        let mut index = 0;
        assert_eq!(parse_delta(&[0x7F], &mut index), Some(-1));

        let mut index = 0;
        assert_eq!(parse_delta(&[0x40], &mut index), Some(-64));
    }

    #[test]
    fn two_byte_deltas() {
        let mut index = 0;
        assert_eq!(parse_delta(&[0x81, 0x00], &mut index), Some(0x100));
        assert_eq!(index, 2);

        let mut index = 0;
        assert_eq!(parse_delta(&[0xFF, 0xFF], &mut index), Some(-1));
    }

    #[test]
    fn truncated_two_byte_delta() {
        let mut index = 0;
        assert_eq!(parse_delta(&[0x81], &mut index), None);
    }

    #[test]
    fn omitted_coordinates_keep_previous_value() {
        // point 1: x omitted, y read; point 2: x read, y omitted; points 3 and 4: both read
        let data = [
            0b1001_0000,
            0x02, // p1.y
            0x03, // p2.x
            0x81,
            0x00, // p3.x
            0x7F, // p3.y
            0x01, // p4.x
            0x01, // p4.y
        ];
        let mut points = [Point::default(); 5];

        let run = decode_delta_points(Point::new(10, 20), &data, &mut points);

        assert_eq!(
            run,
            PointRun {
                decoded: 4,
                consumed: data.len(),
            }
        );
        assert_eq!(
            points,
            [
                Point::new(10, 20),
                Point::new(10, 22),
                Point::new(13, 22),
                Point::new(269, 21),
                Point::new(270, 22),
            ]
        );
    }

    #[test]
    fn flag_byte_per_four_points() {
        // 5 points need 2 flag bytes, all coordinates omitted except the last point's x.
        let data = [0xFF, 0b0100_0000, 0x04];
        let mut points = [Point::default(); 6];

        let run = decode_delta_points(Point::new(1, 1), &data, &mut points);

        assert_eq!(run.decoded, 5);
        assert_eq!(run.consumed, 3);
        assert_eq!(points[5], Point::new(5, 1));
    }

    #[test]
    fn exhausted_data_stops_early() {
        let data = [0x00, 0x01, 0x01];
        let mut points = [Point::default(); 3];

        let run = decode_delta_points(Point::default(), &data, &mut points);

        assert_eq!(run.decoded, 1);
    }

    #[test]
    fn no_points_only_origin() {
        let mut points = [Point::default(); 1];

        let run = decode_delta_points(Point::new(3, 4), &[], &mut points);

        assert_eq!(run.decoded, 0);
        assert_eq!(points[0], Point::new(3, 4));
    }
}
