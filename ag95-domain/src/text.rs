//! Text helpers.

/// Shorten `text` to its head and tail joined by `separator` once it is
/// longer than `cut_length` characters.
///
/// Each side keeps `min(len / 2, cut_length / 2)` characters. Lengths are
/// counted in chars, so multi-byte text is never split mid-character.
///
/// # Examples
/// ```
/// # use ag95_domain::text::shorten;
/// assert_eq!(shorten("my_long_string", "...", 4), "my...ng");
/// assert_eq!(shorten("my_long_string", "...", 8), "my_l...ring");
/// assert_eq!(shorten("short", "...", 50), "short");
/// ```
pub fn shorten(text: &str, separator: &str, cut_length: usize) -> String {
    let len = text.chars().count();
    if len <= cut_length {
        return text.to_string();
    }

    let keep = (len / 2).min(cut_length / 2);
    let head: String = text.chars().take(keep).collect();
    let tail: String = text.chars().skip(len - keep).collect();

    format!("{}{}{}", head, separator, tail)
}
