//! Shared utility functions
//!
//! Name-similarity helpers behind the `did you mean` hints on unknown
//! function errors.

/// Calculate Levenshtein edit distance between two strings.
/// Single-row dynamic programming over characters.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &b_char) in b_chars.iter().enumerate() {
            let substitute = diagonal + usize::from(a_char != b_char);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(diagonal + 1).min(row[j] + 1);
        }
    }

    row[b_chars.len()]
}

/// Find the most similar name among `candidates`.
/// Returns `Some(name)` only when the distance is within `threshold`;
/// ties keep the earlier candidate.
pub fn find_similar_name<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: usize,
) -> Option<&'a str> {
    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in candidates {
        let distance = levenshtein_distance(name, candidate);
        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(candidate);
        }
    }

    best_match
}

/// Format a "did you mean" suggestion hint for an unknown name.
pub fn format_suggestion_hint(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(name) => format!("\n  hint: did you mean `{name}`?"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein_distance("filter", "filter"), 0);
    }

    #[test]
    fn test_levenshtein_single_edit() {
        assert_eq!(levenshtein_distance("fitler", "filter"), 2);
        assert_eq!(levenshtein_distance("mapp", "map"), 1);
    }

    #[test]
    fn test_levenshtein_multiple_edits() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_empty_strings() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_levenshtein_case_sensitive() {
        assert_eq!(levenshtein_distance("Add", "add"), 1);
    }

    #[test]
    fn test_find_similar_name_close() {
        assert_eq!(find_similar_name("sqtr", ["sqrt", "sin"], 2), Some("sqrt"));
    }

    #[test]
    fn test_find_similar_name_none() {
        assert_eq!(find_similar_name("xyz", ["add", "sub"], 2), None);
    }

    #[test]
    fn test_find_similar_name_prefers_closest() {
        assert_eq!(find_similar_name("so", ["sub", "s"], 2), Some("s"));
    }

    #[test]
    fn test_find_similar_name_tie_keeps_earlier() {
        assert_eq!(find_similar_name("si", ["sin", "sit"], 2), Some("sin"));
    }

    #[test]
    fn test_format_suggestion_hint_some() {
        let hint = format_suggestion_hint(Some("filter"));
        assert_eq!(hint, "\n  hint: did you mean `filter`?");
    }

    #[test]
    fn test_format_suggestion_hint_none() {
        assert_eq!(format_suggestion_hint(None), "");
    }
}
