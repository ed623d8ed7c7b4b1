//! Emoji shortcodes.

/// Shortcode to glyph table, applied in order with literal replacement.
pub const EMOJI_TABLE: &[(&str, &str)] = &[
    (":smile:", "😊"),
    (":tada:", "🎉"),
    (":rocket:", "🚀"),
    (":fire:", "🔥"),
    (":heart:", "❤️"),
    (":star:", "⭐"),
    (":check:", "✅"),
    (":x:", "❌"),
    (":warning:", "⚠️"),
    (":bulb:", "💡"),
    (":book:", "📚"),
    (":memo:", "📝"),
    (":computer:", "💻"),
    (":coffee:", "☕"),
    (":thumbsup:", "👍"),
    (":thumbsdown:", "👎"),
    (":eyes:", "👀"),
    (":thinking:", "🤔"),
    (":sunglasses:", "😎"),
    (":muscle:", "💪"),
];

/// Replace every known shortcode in `text`.
pub fn replace_shortcodes(text: &str) -> String {
    let mut out = text.to_string();
    for (code, glyph) in EMOJI_TABLE {
        if out.contains(code) {
            out = out.replace(code, glyph);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(replace_shortcodes("ship it :rocket::tada:"), "ship it 🚀🎉");
    }

    #[test]
    fn test_partial_codes_untouched() {
        assert_eq!(replace_shortcodes(":rocket and smile:"), ":rocket and smile:");
        assert_eq!(replace_shortcodes(":unknown:"), ":unknown:");
    }
}
