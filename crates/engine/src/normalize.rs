//! Prompt normalization and word-boundary term matching.

/// Normalize a raw prompt: lowercase and trim, nothing else.
///
/// An empty or whitespace-only prompt normalizes to the empty string, which
/// the engine treats as "no intent."
///
/// ```
/// use sofra_engine::normalize;
///
/// assert_eq!(normalize("  Romantic Rooftop Dinner  "), "romantic rooftop dinner");
/// assert_eq!(normalize("   "), "");
/// ```
#[must_use]
pub fn normalize(prompt: &str) -> String {
    prompt.trim().to_lowercase()
}

/// True when `haystack` contains `term` bounded by non-alphanumerics.
///
/// Plain substring search would let "tea" fire inside "steak" and "wine"
/// inside "twine"; every keyword table in the scorers goes through this
/// helper instead. Multi-word terms match across their literal spacing.
#[must_use]
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(term) {
        let begin = search_from + offset;
        let end = begin + term.len();
        let bounded_before = begin == 0 || !bytes[begin - 1].is_ascii_alphanumeric();
        let bounded_after = end == haystack.len() || !bytes[end].is_ascii_alphanumeric();
        if bounded_before && bounded_after {
            return true;
        }
        // Step past the first char of this occurrence and keep looking.
        let step = haystack[begin..]
            .chars()
            .next()
            .map_or(1, |c| c.len_utf8());
        search_from = begin + step;
    }
    false
}
