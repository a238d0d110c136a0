use ironrdp_orders::{ControlFlags, Diagnostic, OrderCache as _, OrdersErrorKind, PrimaryOrderType, Rect, SURFACE_CACHE_ID};
use ironrdp_testsuite_orders::{DrawCall, OrderStream, Session};
use rstest::rstest;

const SWITCH_SURFACE: u8 = 0;
const CREATE_SURFACE: u8 = 1;

fn create(stream: OrderStream, index: u16, width: u16, height: u16) -> OrderStream {
    stream.altsec(CREATE_SURFACE).u16(index).u16(width).u16(height)
}

fn switch(stream: OrderStream, index: i16) -> OrderStream {
    stream.altsec(SWITCH_SURFACE).i16(index)
}

fn surface_id(session: &Session, index: u16) -> Option<u32> {
    session
        .cache
        .bitmap(SURFACE_CACHE_ID, index)
        .map(|surface| surface.id)
}

#[test]
fn create_and_select_surface() {
    let data = create(OrderStream::new(), 3, 64, 32);
    let data = switch(switch(switch(data, 3), -1), 9).build();
    let mut session = Session::default();

    assert_eq!(session.process(&data, 4).unwrap(), data.len());

    assert_eq!(
        session.take_calls(),
        [
            DrawCall::CreateSurface {
                id: 1,
                width: 64,
                height: 32,
                old: None,
            },
            DrawCall::SetSurface(Some(1)),
            DrawCall::SetSurface(None),
            DrawCall::SetSurface(None),
        ]
    );
}

#[test]
fn recreated_surface_receives_previous_one() {
    let data = create(create(OrderStream::new(), 3, 64, 32), 3, 128, 32).build();
    let mut session = Session::default();

    session.process(&data, 2).unwrap();

    assert_eq!(
        session.take_calls().last(),
        Some(&DrawCall::CreateSurface {
            id: 2,
            width: 128,
            height: 32,
            old: Some(1),
        })
    );
    assert_eq!(surface_id(&session, 3), Some(2));
}

#[test]
fn free_list_destroys_surfaces() {
    let data = create(create(OrderStream::new(), 3, 8, 8), 4, 8, 8)
        .altsec(CREATE_SURFACE)
        .u16(0x8005)
        .u16(16)
        .u16(16)
        .u16(2)
        .u16(3)
        .u16(7)
        .build();
    let mut session = Session::default();

    assert_eq!(session.process(&data, 3).unwrap(), data.len());

    assert_eq!(
        session.take_calls()[2..],
        [
            DrawCall::DestroySurface(Some(1)),
            DrawCall::DestroySurface(None),
            DrawCall::CreateSurface {
                id: 3,
                width: 16,
                height: 16,
                old: None,
            },
        ]
    );
    assert_eq!(surface_id(&session, 3), None);
    assert_eq!(surface_id(&session, 4), Some(2));
    assert_eq!(surface_id(&session, 5), Some(3));
}

#[rstest]
#[case(0x00)]
#[case(0x04)]
#[case(0xFC)]
fn missing_secondary_marker_is_fatal(#[case] control: u8) {
    let data = OrderStream::new().u8(control).build();
    let mut session = Session::default();

    let error = session.process(&data, 1).unwrap_err();

    assert!(matches!(
        error.kind(),
        OrdersErrorKind::MissingSecondaryMarker { flags } if *flags == control
    ));
}

#[test]
fn unknown_order_is_skipped() {
    let data = OrderStream::new()
        .altsec(5)
        .primary(ControlFlags::TYPE_CHANGE, PrimaryOrderType::DstBlt, 0)
        .build();
    let mut session = Session::default();

    assert_eq!(session.process(&data, 2).unwrap(), data.len());

    assert_eq!(
        session.take_calls(),
        [
            DrawCall::Diagnostic(Diagnostic::UnimplementedAlternateSecondary { order_type: 5 }),
            DrawCall::DestBlt {
                rop3: 0,
                rect: Rect::new(0, 0, 0, 0),
            },
        ]
    );
}

#[test]
fn reset_returns_to_primary_surface() {
    let data = switch(create(OrderStream::new(), 1, 8, 8), 1).build();
    let mut session = Session::default();
    session.process(&data, 2).unwrap();
    session.take_calls();

    session.decoder.reset(&mut session.renderer);

    assert_eq!(session.take_calls(), [DrawCall::SetSurface(None)]);
    assert_eq!(surface_id(&session, 1), Some(1));
}

#[test]
fn truncated_surface_order_is_fatal() {
    let data = OrderStream::new().altsec(CREATE_SURFACE).u16(1).u16(8).build();
    let mut session = Session::default();

    let error = session.process(&data, 1).unwrap_err();

    assert!(matches!(error.kind(), OrdersErrorKind::Decode(_)));
}
