use crate::index::types::Trigram;

/// Extract every trigram of a single line, left to right with step 1.
///
/// Lines shorter than 3 characters yield nothing. Repeated trigrams are
/// yielded once per occurrence; callers deduplicate as needed.
pub fn line_trigrams(line: &str) -> impl Iterator<Item = Trigram> + '_ {
    let mut chars = line.chars();
    let mut window = chars.next().zip(chars.next());
    chars.map_while(move |c| {
        let (a, b) = window?;
        window = Some((b, c));
        Some(Trigram::new(a, b, c))
    })
}

/// Extract trigrams from a query string for searching.
///
/// Uses the same window as [`line_trigrams`] so that every trigram of a
/// matching line is guaranteed to be in the index. The result is sorted and
/// deduplicated.
pub fn query_trigrams(query: &str) -> Vec<Trigram> {
    let mut trigrams: Vec<Trigram> = line_trigrams(query).collect();
    trigrams.sort_unstable();
    trigrams.dedup();
    trigrams
}
