#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

mod altsec;
mod codec;
mod config;
mod decoder;
mod field;
mod primary;
mod scratch;
mod secondary;

pub mod brush;
pub mod cache;
pub mod decompress;
pub mod diagnostic;
pub mod renderer;
pub mod state;

use core::fmt;

use ironrdp_core::DecodeError;

pub use self::brush::{Brush, BrushData, Pen, ResolvedBrush};
pub use self::cache::{CachedGlyph, InMemoryOrderCache, OrderCache, PersistentBitmapCache, SURFACE_CACHE_ID};
pub use self::codec::{Bounds, Point, Rect};
pub use self::config::{Config, DesktopSize};
pub use self::decoder::{OrderContext, OrderDecoder};
pub use self::decompress::{BitmapDecompressor, DecompressError};
pub use self::diagnostic::{Diagnostic, Severity};
pub use self::field::{ControlFlags, FieldPresence};
pub use self::renderer::OrderRenderer;
pub use self::scratch::ScratchArena;
pub use self::secondary::ColorEntry;
pub use self::state::{OrderState, PrimaryOrderType, Rop2};

pub type OrdersResult<T> = Result<T, OrdersError>;

#[non_exhaustive]
#[derive(Debug)]
pub enum OrdersErrorKind {
    /// The order stream ended before an order was complete.
    Decode(DecodeError),
    /// A non-standard order without the secondary marker bit.
    MissingSecondaryMarker { flags: u8 },
    /// A primary order type whose persisted layout is unknown.
    UnknownPrimaryOrder { order_type: u8 },
    /// The length of a secondary order points outside of the received buffer.
    InvalidResync { target: i64, buffer_len: usize },
}

impl fmt::Display for OrdersErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            OrdersErrorKind::Decode(_) => write!(f, "decode error"),
            OrdersErrorKind::MissingSecondaryMarker { flags } => {
                write!(f, "non-standard order without secondary marker (flags: {flags:#04x})")
            }
            OrdersErrorKind::UnknownPrimaryOrder { order_type } => write!(f, "unknown primary order {order_type}"),
            OrdersErrorKind::InvalidResync { target, buffer_len } => write!(
                f,
                "secondary order ends at {target}, outside of the {buffer_len}-byte buffer"
            ),
        }
    }
}

impl core::error::Error for OrdersErrorKind {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self {
            OrdersErrorKind::Decode(e) => Some(e),
            OrdersErrorKind::MissingSecondaryMarker { .. } => None,
            OrdersErrorKind::UnknownPrimaryOrder { .. } => None,
            OrdersErrorKind::InvalidResync { .. } => None,
        }
    }
}

pub type OrdersError = ironrdp_error::Error<OrdersErrorKind>;

pub trait OrdersErrorExt {
    fn decode(error: DecodeError) -> Self;
    fn missing_secondary_marker(flags: u8) -> Self;
    fn unknown_primary_order(order_type: u8) -> Self;
    fn invalid_resync(target: i64, buffer_len: usize) -> Self;
}

impl OrdersErrorExt for OrdersError {
    fn decode(error: DecodeError) -> Self {
        Self::new("invalid order", OrdersErrorKind::Decode(error))
    }

    fn missing_secondary_marker(flags: u8) -> Self {
        Self::new("non-standard order", OrdersErrorKind::MissingSecondaryMarker { flags })
    }

    fn unknown_primary_order(order_type: u8) -> Self {
        Self::new("primary order", OrdersErrorKind::UnknownPrimaryOrder { order_type })
    }

    fn invalid_resync(target: i64, buffer_len: usize) -> Self {
        Self::new("secondary order", OrdersErrorKind::InvalidResync { target, buffer_len })
    }
}
