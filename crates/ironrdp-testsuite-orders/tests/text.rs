use ironrdp_orders::{
    CachedGlyph, ControlFlags, Diagnostic, OrderCache as _, Point, PrimaryOrderType, Rect, ResolvedBrush,
};
use ironrdp_testsuite_orders::{DrawCall, OrderStream, Session, TestGlyph};

const FONT: u8 = 1;
const BACKGROUND: u32 = 0x0022_2222;
const FOREGROUND: u32 = 0x0011_1111;
const CLIP: Rect = Rect::new(0, 0, 100, 50);

const VERTICAL: u8 = 0x04;
const IMPLICIT_X: u8 = 0x20;

fn glyph_index(flags: u8, mix_mode: u8, glyph_box: [i16; 4], text: &[u8]) -> Vec<u8> {
    let mut stream = OrderStream::new()
        .primary(ControlFlags::TYPE_CHANGE, PrimaryOrderType::GlyphIndex, 0x38_3FFF)
        .u8(FONT)
        .u8(flags)
        .u8(0xCC)
        .u8(mix_mode)
        .color(FOREGROUND)
        .color(BACKGROUND)
        .i16(0)
        .i16(0)
        .i16(100)
        .i16(50);

    for edge in glyph_box {
        stream = stream.i16(edge);
    }

    stream
        .i16(10)
        .i16(20)
        .u8(u8::try_from(text.len()).unwrap())
        .bytes(text)
        .build()
}

/// Session with glyphs 1, 2 and 3 cached, 6, 7 and 8 pixels wide.
fn session_with_glyphs() -> Session {
    let mut session = Session::default();

    for (character, width) in [(1u16, 6u16), (2, 7), (3, 8)] {
        let id = 100 + u32::from(character);
        session.cache.put_font_glyph(
            FONT,
            character,
            CachedGlyph {
                offset: 0,
                baseline: -5,
                width,
                height: 8,
                glyph: TestGlyph {
                    id,
                    width,
                    height: 8,
                    data: vec![0; 8],
                },
            },
        );
    }

    session
}

fn draw(x: i32, y: i32, glyph: u32) -> DrawCall {
    DrawCall::DrawGlyph {
        position: Point::new(x, y),
        glyph,
    }
}

fn start() -> DrawCall {
    start_with(0)
}

fn start_with(style: u8) -> DrawCall {
    DrawCall::StartGlyphs {
        background: BACKGROUND,
        foreground: FOREGROUND,
        brush: ResolvedBrush {
            x_origin: 0,
            y_origin: 0,
            style,
            pattern: [0; 8],
            data: None,
        },
    }
}

fn run(session: &mut Session, data: &[u8]) -> Vec<DrawCall> {
    assert_eq!(session.process(data, 1).unwrap(), data.len());
    session.take_calls()
}

#[test]
fn explicit_offsets() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[1, 0, 2, 7, 3, 0x80, 0x00, 0x01]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            draw(10, 15, 101),
            draw(17, 15, 102),
            draw(273, 15, 103),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn implicit_advance_uses_glyph_width() {
    let mut session = session_with_glyphs();
    let data = glyph_index(IMPLICIT_X, 0, [0; 4], &[1, 2, 3]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            draw(10, 15, 101),
            draw(16, 15, 102),
            draw(23, 15, 103),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn vertical_offsets() {
    let mut session = session_with_glyphs();
    let data = glyph_index(VERTICAL, 0, [0; 4], &[1, 5, 2, 5]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            draw(10, 20, 101),
            draw(10, 25, 102),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn missing_glyph_still_advances() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[9, 4, 1, 0]);

    assert_eq!(
        run(&mut session, &data),
        [start(), draw(14, 15, 101), DrawCall::EndGlyphs(CLIP)]
    );
}

#[test]
fn stored_run_is_replayed() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[1, 0, 2, 3, 0xFF, 4, 4, 0xFE, 4, 0x0A]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            draw(10, 15, 101),
            draw(13, 15, 102),
            draw(23, 15, 101),
            draw(26, 15, 102),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
    assert_eq!(session.cache.text_run(4), Some(&[1, 0, 2, 3][..]));
}

#[test]
fn replayed_run_from_earlier_order() {
    let mut session = session_with_glyphs();
    let store = glyph_index(IMPLICIT_X, 0, [0; 4], &[1, 2, 0xFF, 7, 2]);
    let replay = glyph_index(IMPLICIT_X, 0, [0; 4], &[0xFE, 7]);

    run(&mut session, &store);

    assert_eq!(
        run(&mut session, &replay),
        [
            start(),
            draw(10, 15, 101),
            draw(16, 15, 102),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn replay_of_empty_slot_draws_nothing() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[0xFE, 9]);

    assert_eq!(run(&mut session, &data), [start(), DrawCall::EndGlyphs(CLIP)]);
}

#[test]
fn truncated_store_control() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[1, 0, 0xFF, 4]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            draw(10, 15, 101),
            DrawCall::Diagnostic(Diagnostic::TruncatedTextControl {
                control: 0xFF,
                position: 2,
                length: 4,
            }),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
    assert_eq!(session.cache.text_run(4), None);
}

#[test]
fn truncated_replay_control() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[1, 0, 0xFE]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            draw(10, 15, 101),
            DrawCall::Diagnostic(Diagnostic::TruncatedTextControl {
                control: 0xFE,
                position: 2,
                length: 3,
            }),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn truncated_wide_offset() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [0; 4], &[1, 0x80, 0x00]);

    assert_eq!(
        run(&mut session, &data),
        [
            start(),
            DrawCall::Diagnostic(Diagnostic::TruncatedGlyphOffset { position: 0, length: 3 }),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn background_box_is_clamped_to_desktop() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 0, [1000, 0, 1100, 10], &[]);
    let glyph_box = Rect::new(1000, 0, 24, 10);

    assert_eq!(
        run(&mut session, &data),
        [
            DrawCall::Rect {
                rect: glyph_box,
                color: BACKGROUND,
            },
            start(),
            DrawCall::EndGlyphs(glyph_box),
        ]
    );
}

#[test]
fn opaque_mix_fills_clip() {
    let mut session = session_with_glyphs();
    let data = glyph_index(0, 1, [0; 4], &[]);

    assert_eq!(
        run(&mut session, &data),
        [
            DrawCall::Rect {
                rect: CLIP,
                color: BACKGROUND,
            },
            start(),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}

#[test]
fn fields_persist_between_text_orders() {
    let mut session = session_with_glyphs();
    let first = glyph_index(0, 0, [0; 4], &[1, 0]);
    let second = OrderStream::new()
        .primary(ControlFlags::empty(), PrimaryOrderType::GlyphIndex, 0x08_0000)
        .i16(50)
        .build();

    run(&mut session, &first);

    assert_eq!(
        run(&mut session, &second),
        [start(), draw(50, 15, 101), DrawCall::EndGlyphs(CLIP)]
    );
}

#[test]
fn cached_brush_miss_is_reported() {
    let mut session = session_with_glyphs();
    let mut stream = OrderStream::new()
        .primary(ControlFlags::TYPE_CHANGE, PrimaryOrderType::GlyphIndex, 0x3B_3FFF)
        .u8(FONT)
        .u8(0)
        .u8(0xCC)
        .u8(0)
        .color(FOREGROUND)
        .color(BACKGROUND)
        .i16(0)
        .i16(0)
        .i16(100)
        .i16(50);

    for _ in 0..4 {
        stream = stream.i16(0);
    }

    // cached monochrome brush in slot 9, never stored
    let data = stream.u8(0x81).u8(9).i16(10).i16(20).u8(0).build();

    assert_eq!(
        run(&mut session, &data),
        [
            DrawCall::Diagnostic(Diagnostic::BrushCacheMiss {
                style: 0x81,
                color_code: 1,
                index: 9,
            }),
            start_with(0x03),
            DrawCall::EndGlyphs(CLIP),
        ]
    );
}
