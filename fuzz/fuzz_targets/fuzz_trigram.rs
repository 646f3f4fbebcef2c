#![no_main]

use libfuzzer_sys::fuzz_target;
use trigrep::utils::{line_trigrams, query_trigrams};

fuzz_target!(|data: &[u8]| {
    // Only text reaches the tokenizer
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for line in text.lines() {
        let count = line_trigrams(line).count();
        assert_eq!(count, line.chars().count().saturating_sub(2));

        // Query-side trigrams must be a subset of the indexed ones
        let indexed: std::collections::HashSet<_> = line_trigrams(line).collect();
        for t in query_trigrams(line) {
            assert!(indexed.contains(&t));
        }
    }
});
