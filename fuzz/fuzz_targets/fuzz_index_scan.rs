#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every emitted offset must be a line start inside the input
    let (entries, _) = seqidx::index::build::scan_entries(data);
    for entry in entries {
        let offset = entry.offset as usize;
        assert!(offset < data.len());
        assert!(offset == 0 || data[offset - 1] == b'\n');
    }
});
