//! Character-level text scanning
//!
//! The expression grammar is simple enough that no tokenizer is involved:
//! argument lists are split on top-level commas and placeholder indices are
//! read off a stored function body by scanning for `#` directly. Both
//! functions are pure and know nothing about the value model or the
//! registry.

/// Split an argument list on commas at parenthesis depth zero.
///
/// A comma inside nested parentheses does not split. Pieces are returned
/// untrimmed; callers trim where they consume them. A trailing empty piece
/// is dropped, so empty input yields an empty vector, while an empty piece
/// between two commas is kept.
pub fn split_arguments(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Collect the index of every `#<digits>` placeholder in `text`.
///
/// Order of appearance is preserved and duplicates are kept, which is what
/// the single-argument check relies on. A `#` followed by no digit
/// contributes nothing.
pub fn extract_placeholders(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut indices = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'#' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > start {
            if let Ok(index) = text[start..end].parse() {
                indices.push(index);
            }
        }
        i = end;
    }

    indices
}
