//! Test case generators.
//!
//! Test case generators take raw, unstructured input from a fuzzer
//! (e.g. libFuzzer) and translate that into a structured test case (e.g. a
//! sequence of drawing orders).
//!
//! These are generally implementations of the `Arbitrary` trait, or some
//! wrapper over an external tool, such that the wrapper implements the
//! `Arbitrary` trait for the wrapped external tool.

#[derive(Arbitrary, Debug)]
pub struct OrderStreamInput<'a> {
    /// Announced number of orders, independent of what `stream` actually holds.
    pub num_orders: u8,
    pub desktop_width: u16,
    pub stream: &'a [u8],
}

#[derive(Arbitrary, Debug)]
pub struct BitmapInput<'a> {
    pub src: &'a [u8],
    pub width: u8,
    pub height: u8,
    pub bytes_per_pixel: u8,
}
