//! Recoverable conditions met while decoding orders.
//!
//! None of these stop the order stream. Each one is logged and handed to
//! [`OrderRenderer::diagnostic`](crate::OrderRenderer::diagnostic).

use core::fmt;

use crate::codec::Point;
use crate::renderer::OrderRenderer;
use crate::state::PrimaryOrderType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Unimplemented,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The order was dropped.
    InvalidRop2 {
        order: PrimaryOrderType,
        rop2: u8,
        position: Point,
    },
    /// The point list ended before the announced count; the order was dropped.
    PointCountMismatch {
        order: PrimaryOrderType,
        declared: u8,
        decoded: u8,
        position: Point,
    },
    /// A cache control in a glyph run is missing its operands; the rest of the run was skipped.
    TruncatedTextControl { control: u8, position: usize, length: usize },
    /// A glyph offset runs past the end of the glyph run; the rest of the run was skipped.
    TruncatedGlyphOffset { position: usize, length: usize },
    /// The brush was drawn with a blank pattern.
    BrushCacheMiss { style: u8, color_code: u8, index: u8 },
    /// The brush cache order was ignored.
    IncompatibleBrush {
        color_code: u8,
        width: u8,
        height: u8,
        size: u8,
    },
    /// The bitmap was not cached.
    DecompressionFailed {
        cache_id: u8,
        cache_index: u16,
        reason: String,
    },
    /// The bitmap was not cached.
    MalformedBitmap {
        cache_id: u8,
        cache_index: u16,
        reason: &'static str,
    },
    UnimplementedPrimary { order_type: u8 },
    UnimplementedSecondary { order_type: u8 },
    UnimplementedAlternateSecondary { order_type: u8 },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::InvalidRop2 { .. }
            | Diagnostic::PointCountMismatch { .. }
            | Diagnostic::BrushCacheMiss { .. }
            | Diagnostic::MalformedBitmap { .. } => Severity::Error,
            Diagnostic::TruncatedTextControl { .. }
            | Diagnostic::TruncatedGlyphOffset { .. }
            | Diagnostic::IncompatibleBrush { .. }
            | Diagnostic::DecompressionFailed { .. } => Severity::Warning,
            Diagnostic::UnimplementedPrimary { .. }
            | Diagnostic::UnimplementedSecondary { .. }
            | Diagnostic::UnimplementedAlternateSecondary { .. } => Severity::Unimplemented,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidRop2 { order, rop2, position } => write!(
                f,
                "bad ROP2 {rop2:#04x} in {order:?} order at ({}, {})",
                position.x, position.y
            ),
            Diagnostic::PointCountMismatch {
                order,
                declared,
                decoded,
                position,
            } => write!(
                f,
                "{order:?} parse error at ({}, {}): {decoded} of {declared} points decoded",
                position.x, position.y
            ),
            Diagnostic::TruncatedTextControl {
                control,
                position,
                length,
            } => write!(f, "skipping short {control:#04x} command at {position} in {length}-byte run"),
            Diagnostic::TruncatedGlyphOffset { position, length } => {
                write!(f, "glyph offset at {position} overruns {length}-byte run")
            }
            Diagnostic::BrushCacheMiss {
                style,
                color_code,
                index,
            } => write!(
                f,
                "error getting brush data, style {style:#x} (color code {color_code}, index {index})"
            ),
            Diagnostic::IncompatibleBrush {
                color_code,
                width,
                height,
                size,
            } => write!(
                f,
                "incompatible brush, {width}x{height} color code {color_code} size {size}"
            ),
            Diagnostic::DecompressionFailed {
                cache_id,
                cache_index,
                reason,
            } => write!(f, "failed to decompress bitmap {cache_id}:{cache_index}: {reason}"),
            Diagnostic::MalformedBitmap {
                cache_id,
                cache_index,
                reason,
            } => write!(f, "malformed bitmap {cache_id}:{cache_index}: {reason}"),
            Diagnostic::UnimplementedPrimary { order_type } => write!(f, "primary order {order_type}"),
            Diagnostic::UnimplementedSecondary { order_type } => write!(f, "secondary order {order_type}"),
            Diagnostic::UnimplementedAlternateSecondary { order_type } => {
                write!(f, "non-standard order {order_type}")
            }
        }
    }
}

pub(crate) fn emit<R: OrderRenderer>(renderer: &mut R, diagnostic: Diagnostic) {
    match diagnostic.severity() {
        Severity::Error => error!(%diagnostic),
        Severity::Warning => warn!(%diagnostic),
        Severity::Unimplemented => warn!(%diagnostic, "Unimplemented"),
    }

    renderer.diagnostic(&diagnostic);
}
