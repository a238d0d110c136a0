/// Initial size of the scratch arena, in bytes.
pub(crate) const DEFAULT_SCRATCH_CAPACITY: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Size of the primary drawing surface.
    ///
    /// Glyph run background boxes extending past the right edge are clamped to this width.
    pub desktop_size: DesktopSize,
    /// Number of bytes reserved up front for transient decoding storage.
    ///
    /// The arena grows past this value on demand and never shrinks.
    pub scratch_capacity: usize,
}

impl Config {
    pub fn new(desktop_size: DesktopSize) -> Self {
        Self {
            desktop_size,
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
        }
    }
}
