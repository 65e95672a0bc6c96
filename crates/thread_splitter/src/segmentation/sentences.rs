// src/segmentation/sentences.rs

pub struct SentenceSegmenter;

impl SentenceSegmenter {
    /// Split on terminal punctuation (`.`, `!`, `?`) followed by whitespace,
    /// and after full-width terminals (`。`, `！`, `？`) unconditionally.
    ///
    /// Trailing closing quotes and brackets stay with their sentence. Units
    /// are trimmed; empty units are dropped.
    pub fn split(text: &str) -> Vec<&str> {
        let mut units = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            let full_width = is_full_width_terminal(c);
            if !full_width && !matches!(c, '.' | '!' | '?') {
                continue;
            }

            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if matches!(next, '.' | '!' | '?') || is_full_width_terminal(next) || is_closer(next) {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let at_boundary = full_width || chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
            if at_boundary {
                push_unit(&mut units, &text[start..end]);
                start = end;
            }
        }

        push_unit(&mut units, &text[start..]);
        units
    }
}

fn push_unit<'a>(units: &mut Vec<&'a str>, unit: &'a str) {
    let unit = unit.trim();
    if !unit.is_empty() {
        units.push(unit);
    }
}

fn is_full_width_terminal(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’' | '」' | '』' | '）')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        let units = SentenceSegmenter::split("Hello world. This is a test.");
        assert_eq!(units, vec!["Hello world.", "This is a test."]);
    }

    #[test]
    fn test_mixed_terminals() {
        let units = SentenceSegmenter::split("Really?! Yes. Wow! Done");
        assert_eq!(units, vec!["Really?!", "Yes.", "Wow!", "Done"]);
    }

    #[test]
    fn test_no_split_without_whitespace() {
        let units = SentenceSegmenter::split("Version 1.5 ships at example.com today.");
        assert_eq!(units, vec!["Version 1.5 ships at example.com today."]);
    }

    #[test]
    fn test_closing_quotes_stay() {
        let units = SentenceSegmenter::split("She said \"go.\" Then left.");
        assert_eq!(units, vec!["She said \"go.\"", "Then left."]);
    }

    #[test]
    fn test_newline_after_terminal() {
        let units = SentenceSegmenter::split("First line.\nSecond line");
        assert_eq!(units, vec!["First line.", "Second line"]);
    }

    #[test]
    fn test_full_width() {
        let units = SentenceSegmenter::split("これは文です。これは別の文です。");
        assert_eq!(units, vec!["これは文です。", "これは別の文です。"]);
    }

    #[test]
    fn test_empty() {
        assert!(SentenceSegmenter::split("").is_empty());
        assert!(SentenceSegmenter::split("   ").is_empty());
    }
}
