//! Text preprocessing for read-aloud playback.
//!
//! Strips report markup down to speakable plain text and splits it into
//! bounded-length utterance chunks.

/// Maximum character length per utterance chunk.
///
/// Platform speech engines tend to stall or truncate long utterances, so
/// reports are fed to them in pieces of at most this many characters.
pub const MAX_CHUNK_CHARS: usize = 250;

/// Strip HTML from report content, producing plain text suitable for speech.
///
/// Handles:
/// - `<script>`, `<style>` blocks and comments → removed entirely
/// - Inline tags (`<b>`, `<em>`, `<a>`, ...) → removed
/// - Other tags → replaced by a space so adjacent blocks don't run together
/// - Named and numeric character references → decoded
/// - Runs of whitespace → collapsed to one space
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let text = strip_tag_block_pair(text, "<script", "</script>");
    let text = strip_tag_block_pair(&text, "<style", "</style>");
    let text = strip_tag_block_pair(&text, "<!--", "-->");
    let text = strip_html_tags(&text);
    let text = decode_entities(&text);
    collapse_whitespace(&text)
}

/// Split text into chunks of at most `max_chars` characters.
///
/// While the remaining text is longer than `max_chars`, the next chunk ends
/// at the last `.` inside the first `max_chars` characters (the period is
/// kept), provided that period is not the very first character; otherwise
/// the chunk is cut at exactly `max_chars`. The final remainder is emitted
/// as-is. Chunks are never empty and concatenate back to `text`.
#[must_use]
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        // Byte offset of the first character past the window, if any.
        let Some((boundary, _)) = rest.char_indices().nth(max_chars) else {
            chunks.push(rest.to_string());
            break;
        };

        let cut = match rest[..boundary].rfind('.') {
            Some(pos) if pos > 0 => pos + 1,
            _ => boundary,
        };
        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    chunks
}

// ── Internal helpers ───────────────────────────────────────────────

/// Remove all occurrences of `<open_prefix…>…<close_tag>` from text,
/// matching tags case-insensitively.
fn strip_tag_block_pair(text: &str, open_prefix: &str, close_tag: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let haystack = text.to_ascii_lowercase();
    let open_lower = open_prefix.to_ascii_lowercase();
    let close_lower = close_tag.to_ascii_lowercase();

    let mut cursor = 0;

    while cursor < text.len() {
        let Some(open_start) = haystack[cursor..].find(&open_lower) else {
            result.push_str(&text[cursor..]);
            break;
        };
        let abs_open = cursor + open_start;
        let body_start = abs_open + open_prefix.len();

        if let Some(close_offset) = haystack[body_start..].find(&close_lower) {
            result.push_str(&text[cursor..abs_open]);
            result.push(' ');
            cursor = body_start + close_offset + close_tag.len();
        } else {
            // Unterminated block: drop the rest.
            result.push_str(&text[cursor..abs_open]);
            break;
        }
    }

    result
}

/// Phrasing tags that sit inside a word run and must not introduce a gap.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "cite", "code", "em", "font", "i", "mark", "q", "s", "small", "span",
    "strong", "sub", "sup", "u",
];

fn strip_html_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut tag: Option<String> = None;

    for c in text.chars() {
        if let Some(inner) = tag.as_mut() {
            if c == '>' {
                if !INLINE_TAGS.contains(&tag_name(inner).as_str()) {
                    result.push(' ');
                }
                tag = None;
            } else {
                inner.push(c);
            }
        } else if c == '<' {
            tag = Some(String::new());
        } else {
            result.push(c);
        }
    }

    result
}

/// Lowercased element name of a tag body such as `/b`, `br/` or `a href=".."`.
fn tag_name(inner: &str) -> String {
    inner
        .trim_start()
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after.find(';').filter(|&end| end <= 10).and_then(|end| {
            decode_entity(&after[..end]).map(|c| (c, end))
        });

        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &after[end + 1..];
            }
            None => {
                result.push('&');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
