//! Text utilities for TUI rendering.

use unicode_width::UnicodeWidthChar;

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Word-wrap text with an indent prefix on every line.
///
/// Breaks at the last space that fits; words longer than the line are split.
/// Widths are display columns, not bytes.
pub fn wrap_text_indented(text: &str, width: usize, indent: &str) -> Vec<String> {
    let indent_width: usize = indent.chars().map(char_width).sum();
    let effective_width = width.saturating_sub(indent_width);

    if effective_width == 0 {
        return vec![format!("{}{}", indent, text)];
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            lines.push(indent.to_string());
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut start = 0;

        while start < chars.len() {
            // Longest prefix of chars[start..] that fits.
            let mut end = start;
            let mut used = 0;
            while end < chars.len() && used + char_width(chars[end]) <= effective_width {
                used += char_width(chars[end]);
                end += 1;
            }

            if end == chars.len() {
                let rest: String = chars[start..].iter().collect();
                lines.push(format!("{}{}", indent, rest));
                break;
            }

            // Prefer the last space inside the fitting prefix.
            let actual_end = match chars[start..end].iter().rposition(|c| *c == ' ') {
                Some(offset) if offset > 0 => start + offset,
                _ => end.max(start + 1),
            };

            let chunk: String = chars[start..actual_end].iter().collect();
            lines.push(format!("{}{}", indent, chunk.trim_end()));

            start = actual_end;
            while start < chars.len() && chars[start] == ' ' {
                start += 1;
            }
        }
    }

    if lines.is_empty() {
        lines.push(indent.to_string());
    }

    lines
}

/// Truncate a string to fit within a given width, adding ellipsis if needed.
pub fn truncate(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(char_width).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width < 3 {
        return text.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();

    for ch in text.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > max_width - 3 {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push_str("...");
    result
}

/// Animated dots for "typing" indicators, cycling with `tick`.
pub fn typing_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_indented_breaks_at_spaces() {
        let wrapped = wrap_text_indented("shipped agents to production", 14, "  ");
        assert_eq!(wrapped, vec!["  shipped", "  agents to", "  production"]);
    }

    #[test]
    fn test_wrap_indented_splits_long_words() {
        let wrapped = wrap_text_indented("abcdefgh", 6, "  ");
        assert_eq!(wrapped, vec!["  abcd", "  efgh"]);
    }

    #[test]
    fn test_wrap_indented_multibyte() {
        // Byte offsets would split inside the accented characters.
        let wrapped = wrap_text_indented("caf\u{e9} cr\u{e8}me br\u{fb}l\u{e9}e", 12, "  ");
        assert_eq!(
            wrapped,
            vec!["  caf\u{e9}", "  cr\u{e8}me", "  br\u{fb}l\u{e9}e"]
        );
    }

    #[test]
    fn test_wrap_indented_keeps_blank_lines() {
        let wrapped = wrap_text_indented("a\n\nb", 10, "> ");
        assert_eq!(wrapped, vec!["> a", "> ", "> b"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello world", 8), "Hello...");
        assert_eq!(truncate("Hi", 10), "Hi");
        assert_eq!(truncate("Hello", 5), "Hello");
    }

    #[test]
    fn test_typing_dots_cycle() {
        assert_eq!(typing_dots(0), "");
        assert_eq!(typing_dots(3), "...");
        assert_eq!(typing_dots(5), ".");
    }
}
