#![no_main]

use ironrdp_fuzzing::generators::BitmapInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: BitmapInput<'_>| {
    ironrdp_fuzzing::oracles::rle_decompress_bitmap(input);
});
