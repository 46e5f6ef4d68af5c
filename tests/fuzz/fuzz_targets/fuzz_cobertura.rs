#![no_main]
use covdiag::parsers::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parser must not panic on any input.
    let _ = covdiag::parsers::cobertura::CoberturaParser.parse(data);
});
