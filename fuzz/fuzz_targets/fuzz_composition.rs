#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str, bool)| {
    // Compilation either succeeds or reports a bad symbol; matching never panics
    let (pattern, body, wildcard) = input;
    if let Ok(compiled) = seqidx::query::CompositionPattern::compile(pattern, wildcard) {
        let _ = compiled.is_match(body);
    }
    if let Ok(matcher) = seqidx::query::metadata_matcher(pattern) {
        let _ = matcher.is_match(body);
    }
});
