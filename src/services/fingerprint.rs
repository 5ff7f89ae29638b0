use crate::models::Fingerprint;

/// Content words must be longer than this many characters
const MIN_KEYWORD_LEN: usize = 3;

/// Only this many qualifying content words are counted, by position
pub const MAX_CONTENT_KEYWORDS: usize = 50;

/// Builds the keyword-frequency fingerprint for a blog
///
/// The text is lowercased and stripped of everything except ASCII letters,
/// digits, underscores and separators (see [`is_separator`]), then split on
/// runs of separators. Words longer
/// than three characters are kept, and only the first fifty of those (in
/// document order, before any counting) contribute. Every tag is then added
/// lowercased, with no length filter and no cap.
pub fn build_fingerprint(text: &str, tags: &[String]) -> Fingerprint {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || is_separator(*c))
        .collect();

    let mut fingerprint = Fingerprint::new();

    normalized
        .split(is_separator)
        .filter(|word| word.len() > MIN_KEYWORD_LEN)
        .take(MAX_CONTENT_KEYWORDS)
        .for_each(|word| fingerprint.add(word));

    for tag in tags {
        fingerprint.add(tag.to_lowercase());
    }

    fingerprint
}

/// Word separators: the ECMAScript whitespace and line terminator set
///
/// Differs from [`char::is_whitespace`]: U+FEFF separates words, while U+0085
/// does not and is stripped like other punctuation.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
