use crate::font::Font;
use crate::units::Pt;

/// Splits `text` into lines no wider than `max_width`.
///
/// Line breaks in `text` always start a new line, and other control
/// characters such as tabs are printed as spaces. Lines break at whitespace; a
/// word that is wider than a whole line on its own is split between
/// characters. Runs of whitespace at a break are dropped. A line that already
/// fits comes back unchanged. At least one line is returned, even for blank
/// text.
pub fn wrap_text(text: &str, font: &Font, size: Pt, max_width: Pt) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let paragraph: String = paragraph
            .chars()
            .map(|ch| if ch.is_control() { ' ' } else { ch })
            .collect();
        if paragraph.trim().is_empty() {
            continue;
        }
        wrap_paragraph(&paragraph, font, size, max_width, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(text: &str, font: &Font, size: Pt, max_width: Pt, lines: &mut Vec<String>) {
    if font.width_of_text(text, size) <= max_width {
        lines.push(text.to_string());
        return;
    }

    let space = font.width_of_text(" ", size);
    let mut line = String::new();
    let mut line_width = Pt(0.0);

    for word in text.split_whitespace() {
        let word_width = font.width_of_text(word, size);
        let gap = if line.is_empty() { Pt(0.0) } else { space };

        if line_width + gap + word_width <= max_width {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            line_width += gap + word_width;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = Pt(0.0);
        }

        if word_width <= max_width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        // no break opportunity inside the word: split between characters
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let ch_width = font.width_of_text(ch.encode_utf8(&mut buf), size);
            if !line.is_empty() && line_width + ch_width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = Pt(0.0);
            }
            line.push(ch);
            line_width += ch_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::BuiltinFont;

    fn helvetica() -> Font {
        BuiltinFont::Helvetica.into()
    }

    #[test]
    fn short_text_is_untouched() {
        let lines = wrap_text("  No smoking  ", &helvetica(), Pt(11.0), Pt(400.0));
        assert_eq!(lines, vec!["  No smoking  ".to_string()]);
    }

    #[test]
    fn line_breaks_start_new_lines() {
        let text = "No smoking\r\nNo parties\n\nQuiet\tafter 22:00";
        let lines = wrap_text(text, &helvetica(), Pt(11.0), Pt(400.0));
        assert_eq!(lines, vec!["No smoking", "No parties", "Quiet after 22:00"]);
    }

    #[test]
    fn blank_text_is_one_empty_line() {
        let font = helvetica();
        assert_eq!(wrap_text("", &font, Pt(11.0), Pt(100.0)), vec![String::new()]);
        assert_eq!(
            wrap_text(&" ".repeat(400), &font, Pt(11.0), Pt(100.0)),
            vec![String::new()]
        );
    }

    #[test]
    fn breaks_at_whitespace_and_respects_width() {
        let font = helvetica();
        let text = lipsum::lipsum(60);
        let max = Pt(200.0);
        let lines = wrap_text(&text, &font, Pt(11.0), max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(font.width_of_text(line, Pt(11.0)) <= max, "too wide: {line}");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        let rejoined = lines.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), original);
    }

    #[test]
    fn overlong_words_are_split_between_characters() {
        let font = helvetica();
        let word = "W".repeat(40);
        let max = Pt(100.0);
        let lines = wrap_text(&word, &font, Pt(11.0), max);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(font.width_of_text(line, Pt(11.0)) <= max);
        }
    }
}
