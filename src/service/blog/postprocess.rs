use crate::entities::GeneratedBlog;

/// Removes ASCII punctuation except the backslash
/// (`!"#$%&'()*+,-./:;<=>?@[]^_`{|}~`). Backslashes and non-ASCII
/// characters are kept.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| *c == '\\' || !c.is_ascii_punctuation()).collect()
}

/// Keeps the first `limit` whitespace-separated words, joined by single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace().take(limit).collect::<Vec<_>>().join(" ")
}

/// Strips punctuation and truncates to `limit` words. The reported word count
/// is taken before truncation.
pub fn postprocess(raw: &str, limit: usize) -> GeneratedBlog {
    let stripped = strip_punctuation(raw);
    let word_count = stripped.split_whitespace().count();
    GeneratedBlog { content: truncate_words(&stripped, limit), word_count }
}
