#![no_main]

use ironrdp_fuzzing::generators::OrderStreamInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: OrderStreamInput<'_>| {
    ironrdp_fuzzing::oracles::orders_decode(input);
});
