// src/segmentation/classify.rs

//! Per-kind predicates over paragraph blocks and sentence units.

use crate::char_counter::CharCounter;

/// Longest unit still considered a title-style heading (`Key points:`).
pub const MAX_TITLE_CHARS: usize = 60;

/// ATX header line: one to six `#` followed by a space and some text.
/// A bare `#hashtag` is not a header.
pub fn is_atx_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hash_count = trimmed.bytes().take_while(|&b| b == b'#').count();

    (1..=6).contains(&hash_count)
        && trimmed[hash_count..].starts_with(' ')
        && !trimmed[hash_count..].trim().is_empty()
}

pub fn is_fence_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

pub fn is_indented_code_line(line: &str) -> bool {
    line.starts_with("    ") || line.starts_with('\t')
}

/// Fenced block, or a block whose every line is indented.
pub fn is_code_block(block: &str) -> bool {
    let mut lines = block.lines().filter(|l| !l.trim().is_empty()).peekable();

    let Some(first) = lines.peek().copied() else {
        return false;
    };
    is_fence_line(first) || lines.all(is_indented_code_line)
}

pub fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("- ")
        || trimmed.starts_with("* ")
        || trimmed.starts_with("+ ")
        || is_ordered_list(trimmed)
}

fn is_ordered_list(line: &str) -> bool {
    let mut chars = line.chars().peekable();

    // Must start with digit
    if !chars.peek().is_some_and(char::is_ascii_digit) {
        return false;
    }

    while chars.peek().is_some_and(char::is_ascii_digit) {
        chars.next();
    }

    if !matches!(chars.next(), Some('.' | ')')) {
        return false;
    }

    // Must be followed by space or end of string
    matches!(chars.next(), None | Some(' '))
}

/// Block opening with a bullet or numbered item.
pub fn is_list(block: &str) -> bool {
    block
        .lines()
        .find(|l| !l.trim().is_empty())
        .is_some_and(is_list_item)
}

pub fn is_quote(block: &str) -> bool {
    block.trim_start().starts_with('>')
}

/// Short single-line label such as `Key takeaways:`.
pub fn is_title_line(unit: &str) -> bool {
    let unit = unit.trim();
    !unit.contains('\n')
        && unit.ends_with(':')
        && unit.chars().next().is_some_and(char::is_uppercase)
        && CharCounter::graphemes(unit) <= MAX_TITLE_CHARS
}

/// ATX header or title-style label.
pub fn is_heading(unit: &str) -> bool {
    let unit = unit.trim();
    (!unit.contains('\n') && is_atx_header(unit)) || is_title_line(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atx_header() {
        assert!(is_atx_header("# Title"));
        assert!(is_atx_header("  ## Section"));
        assert!(is_atx_header("###### Deepest"));
        assert!(!is_atx_header("####### Too deep"));
        assert!(!is_atx_header("####NoSpace"));
        assert!(!is_atx_header("#hashtag"));
        assert!(!is_atx_header("#   "));
        assert!(!is_atx_header("Not a header"));
    }

    #[test]
    fn test_is_code_block() {
        assert!(is_code_block("```rust\nfn main() {}\n```"));
        assert!(is_code_block("~~~\nplain\n~~~"));
        assert!(is_code_block("    let x = 1;\n    let y = 2;"));
        assert!(is_code_block("\tindented with tab"));
        assert!(!is_code_block("    indented\nnot indented"));
        assert!(!is_code_block("code"));
        assert!(!is_code_block(""));
    }

    #[test]
    fn test_is_list() {
        assert!(is_list("- Item\n- Item two"));
        assert!(is_list("* Item"));
        assert!(is_list("+ Item"));
        assert!(is_list("1. First\n2. Second"));
        assert!(is_list("12) Twelfth"));
        assert!(!is_list("1.5 million people"));
        assert!(!is_list("-not a bullet"));
        assert!(!is_list("Not a list"));
    }

    #[test]
    fn test_is_quote() {
        assert!(is_quote("> Quote"));
        assert!(is_quote(">Quote\n> continued"));
        assert!(!is_quote("Not a quote"));
    }

    #[test]
    fn test_is_heading() {
        assert!(is_heading("# Title"));
        assert!(is_heading("### Deep section"));
        assert!(is_heading("Key takeaways:"));
        assert!(!is_heading("#rust is great."));
        assert!(!is_heading("lowercase label:"));
        assert!(!is_heading("A sentence that simply ends."));
        assert!(!is_heading(&format!("{}:", "A".repeat(MAX_TITLE_CHARS))));
    }
}
