// src/preprocess.rs

use std::borrow::Cow;

use crate::platform::PlatformProfile;
use crate::segmentation::classify::{is_fence_line, is_indented_code_line};

/// Normalize line endings and tidy hashtag/mention spacing.
///
/// Idempotent: `preprocess(preprocess(x)) == preprocess(x)`.
pub fn preprocess(text: &str, platform: &PlatformProfile) -> String {
    let normalized = normalize_line_endings(text);
    if !platform.tidy_tags {
        return normalized.into_owned();
    }

    let mut out = String::with_capacity(normalized.len());
    let mut in_fence = false;

    for (i, line) in normalized.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if is_fence_line(line) {
            in_fence = !in_fence;
            out.push_str(line);
        } else if in_fence || is_indented_code_line(line) {
            out.push_str(line);
        } else {
            tidy_tag_spacing(line, &mut out);
        }
    }

    out
}

/// Replace `\r\n` and bare `\r` with `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Length in bytes of the `#tag` / `@handle` token at the start of `rest`.
fn tag_token_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    let (_, sigil) = chars.next()?;
    if sigil != '#' && sigil != '@' {
        return None;
    }

    let mut end = None;
    for (i, c) in chars {
        if is_tag_char(c) {
            end = Some(i + c.len_utf8());
        } else {
            break;
        }
    }
    let end = end?;

    if sigil == '@' {
        return Some(end + remote_instance_len(&rest[end..]));
    }
    Some(end)
}

/// Length of an `@instance.domain` suffix on a mention, or zero.
fn remote_instance_len(rest: &str) -> usize {
    let Some(host) = rest.strip_prefix('@') else {
        return 0;
    };
    let host_len = host
        .char_indices()
        .take_while(|&(_, c)| is_tag_char(c) || c == '.' || c == '-')
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    let host = host[..host_len].trim_end_matches(['.', '-']);

    if host.contains('.') && host.chars().next().is_some_and(is_tag_char) {
        1 + host.len()
    } else {
        0
    }
}

/// Tag tokens on one line end up separated from their neighbours by single
/// spaces. Leading indentation and trailing whitespace are left alone, and a
/// sigil glued to a preceding word (`C#`, `me@host`) is not a token.
fn tidy_tag_spacing(line: &str, out: &mut String) {
    let line_start = out.len();
    let mut pos = 0;
    let mut prev: Option<char> = None;
    let mut after_token = false;

    while pos < line.len() {
        let rest = &line[pos..];
        let at_boundary = prev.map_or(true, char::is_whitespace) || after_token;

        if at_boundary {
            if let Some(len) = tag_token_len(rest) {
                // Collapse interior whitespace before the token
                let written = &out[line_start..];
                let trimmed = written.trim_end_matches(is_horizontal_space).len();
                if trimmed > 0 && trimmed < written.len() {
                    out.truncate(line_start + trimmed);
                    out.push(' ');
                } else if after_token {
                    out.push(' ');
                }

                out.push_str(&rest[..len]);
                pos += len;
                prev = rest[..len].chars().last();
                after_token = true;

                // Collapse interior whitespace after the token
                let tail = &line[pos..];
                let spaces = tail.len() - tail.trim_start_matches(is_horizontal_space).len();
                if spaces > 0 && spaces < tail.len() {
                    out.push(' ');
                    pos += spaces;
                    prev = Some(' ');
                    after_token = false;
                }
                continue;
            }
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        out.push(c);
        pos += c.len_utf8();
        prev = Some(c);
        after_token = false;
    }
}
