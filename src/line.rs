// src/line.rs
//
// Line classification for the fold engine.
//
// Every predicate takes the raw line as read from the document, terminator
// included, and never allocates. Matching is byte-based; the only places that
// decode UTF-8 are the whitespace runs (Unicode whitespace, so U+3000 counts)
// and the full-width stop punctuation.

/// Sentence-terminating marks after which a line break is kept.
pub const STOP_PUNCTUATION: [char; 2] = ['？', '！'];

/* ============================ Utility helpers =========================== */

/// The line without its single trailing `\n`, if any.
#[inline]
pub fn strip_terminator(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

/// Decodes the UTF-8 scalar starting at `i`, if there is a valid one.
fn decode_at(s: &[u8], i: usize) -> Option<(char, usize)> {
    let width = match *s.get(i)? {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return None,
    };
    let bytes = s.get(i..i + width)?;
    let c = std::str::from_utf8(bytes).ok()?.chars().next()?;
    Some((c, width))
}

/// Index of the first non-whitespace byte at or after `i`.
fn skip_ws(s: &[u8], mut i: usize) -> usize {
    while let Some((c, w)) = decode_at(s, i) {
        if !c.is_whitespace() {
            break;
        }
        i += w;
    }
    i
}

/// Strips all trailing whitespace, terminator included.
///
/// Falls back to ASCII whitespace when the line is not valid UTF-8.
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    match std::str::from_utf8(line) {
        Ok(s) => s.trim_end().as_bytes(),
        Err(_) => line.trim_ascii_end(),
    }
}

/* ============================== Predicates ============================== */

/// `^---`
#[inline]
pub fn is_front_matter_fence(line: &[u8]) -> bool {
    line.starts_with(b"---")
}

/// ```` ^``` ````
#[inline]
pub fn is_code_fence(line: &[u8]) -> bool {
    line.starts_with(b"```")
}

/// `^\s*([0-9]+\.|[-+*])\s+`
///
/// The whitespace after the marker may be the line terminator itself, so a
/// bare `"-\n"` starts a list item.
pub fn is_list_item_start(line: &[u8]) -> bool {
    let mut i = skip_ws(line, 0);
    match line.get(i) {
        Some(b'-' | b'+' | b'*') => i += 1,
        Some(b) if b.is_ascii_digit() => {
            while line.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            if line.get(i) != Some(&b'.') {
                return false;
            }
            i += 1;
        }
        _ => return false,
    }
    skip_ws(line, i) > i
}

/// Nothing but the terminator. `"  \n"` and `"\r\n"` are not blank.
#[inline]
pub fn is_blank(line: &[u8]) -> bool {
    strip_terminator(line).is_empty()
}

/// `[？！]$`
pub fn ends_with_stop_punctuation(line: &[u8]) -> bool {
    let body = strip_terminator(line);
    let mut buf = [0u8; 4];
    STOP_PUNCTUATION
        .iter()
        .any(|c| body.ends_with(c.encode_utf8(&mut buf).as_bytes()))
}

/// Lines that seal a pending join with an inserted newline rather than being
/// concatenated onto it.
#[inline]
pub fn breaks_join(line: &[u8]) -> bool {
    is_code_fence(line) || is_blank(line) || is_list_item_start(line)
}
