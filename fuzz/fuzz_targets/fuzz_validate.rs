#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Grammar checks and token extraction must not panic on arbitrary text
    let _ = seqidx::utils::is_header_line(data);
    let _ = seqidx::utils::first_invalid_symbol(data);
    for id in seqidx::utils::extract_identifiers(data) {
        assert!(data.contains(&id));
    }
});
