// src/fold.rs
//
// The line-fold engine.
//
// A single left-to-right pass over the document's lines. Soft-wrapped prose
// lines are concatenated with their boundary whitespace removed; front matter,
// fenced code, list items, blank lines and lines ending in full-width `？`/`！`
// are written verbatim. The only lookbehind is the current `Mode`: a joinable
// line is written without its terminator and the engine waits in
// `DelayedJoin` to see whether the next line continues the paragraph.
//
// Output is append-only. Nothing is flushed at end of input, so a document
// that ends mid-join ends without a trailing newline.

use crate::line::{
    breaks_join, ends_with_stop_punctuation, is_blank, is_code_fence, is_front_matter_fence,
    is_list_item_start, trim_line_end,
};
use memchr::memchr;
use std::io::{self, Write};

/// Engine state. Created fresh per document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Before the first line; only here can front matter open.
    #[default]
    Init,
    InFrontMatter,
    InCodeBlock,
    Normal,
    /// The previous line was written without its terminator.
    DelayedJoin,
}

impl Mode {
    /// Consumes one line, appends its output to `out` and returns the next mode.
    pub fn step(self, line: &[u8], out: &mut Vec<u8>) -> Mode {
        match self {
            Mode::Init => {
                if is_front_matter_fence(line) {
                    out.extend_from_slice(line);
                    Mode::InFrontMatter
                } else {
                    step_normal(line, out)
                }
            }
            Mode::InFrontMatter => {
                out.extend_from_slice(line);
                if is_front_matter_fence(line) {
                    Mode::Normal
                } else {
                    self
                }
            }
            Mode::InCodeBlock => {
                out.extend_from_slice(line);
                if is_code_fence(line) {
                    Mode::Normal
                } else {
                    self
                }
            }
            Mode::Normal => step_normal(line, out),
            Mode::DelayedJoin => {
                if is_code_fence(line) {
                    out.push(b'\n');
                    out.extend_from_slice(line);
                    Mode::InCodeBlock
                } else if is_blank(line) || is_list_item_start(line) {
                    out.push(b'\n');
                    step_normal(line, out)
                } else if ends_with_stop_punctuation(line) {
                    // Seals the join; the mark stays on the joined line.
                    out.extend_from_slice(line);
                    Mode::Normal
                } else {
                    out.extend_from_slice(trim_line_end(line));
                    self
                }
            }
        }
    }

    /// True when a scan ending in this mode left a front-matter block or code
    /// fence open. Not an error: the rest of the document was copied verbatim.
    pub fn is_unclosed(self) -> bool {
        matches!(self, Mode::InFrontMatter | Mode::InCodeBlock)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Mode::Init => "start of document",
            Mode::InFrontMatter => "front matter",
            Mode::InCodeBlock => "fenced code block",
            Mode::Normal => "prose",
            Mode::DelayedJoin => "joined paragraph",
        }
    }
}

fn step_normal(line: &[u8], out: &mut Vec<u8>) -> Mode {
    if is_code_fence(line) {
        out.extend_from_slice(line);
        Mode::InCodeBlock
    } else if is_list_item_start(line) || is_blank(line) || ends_with_stop_punctuation(line) {
        out.extend_from_slice(line);
        Mode::Normal
    } else {
        out.extend_from_slice(trim_line_end(line));
        Mode::DelayedJoin
    }
}

/* ============================ Whole-buffer API ========================== */

/// Folds a complete document held in memory. Returns the mode the scan ended in.
pub fn fold(src: &[u8], out: &mut Vec<u8>) -> Mode {
    let mut mode = Mode::Init;
    let mut i = 0usize;
    while i < src.len() {
        let end = memchr(b'\n', &src[i..]).map_or(src.len(), |p| i + p + 1);
        mode = mode.step(&src[i..end], out);
        i = end;
    }
    mode
}

/// [`fold`] for text that is already a `String`.
pub fn fold_str(src: &str) -> String {
    let mut out = Vec::with_capacity(src.len());
    fold(src.as_bytes(), &mut out);
    // Trims land on char boundaries, so valid input stays valid.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/* ============================= Incremental API ========================== */

/// What a finished fold did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoldSummary {
    /// Input lines consumed.
    pub lines: usize,
    /// Source line breaks removed by joining.
    pub joined: usize,
    /// Mode after the last line.
    pub end_mode: Mode,
}

/// Feeds lines one at a time into a writer.
///
/// Each line's output is written through before the next line is read, so
/// memory use is bounded by the longest line.
pub struct LineFolder<W: Write> {
    sink: W,
    mode: Mode,
    scratch: Vec<u8>,
    summary: FoldSummary,
}

impl<W: Write> LineFolder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            mode: Mode::Init,
            scratch: Vec::new(),
            summary: FoldSummary::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Consumes one line, terminator included.
    pub fn push_line(&mut self, line: &[u8]) -> io::Result<()> {
        if self.mode == Mode::DelayedJoin && !breaks_join(line) {
            self.summary.joined += 1;
        }
        self.summary.lines += 1;

        self.scratch.clear();
        let next = self.mode.step(line, &mut self.scratch);
        if next != self.mode {
            log::trace!(
                "line {}: {:?} -> {:?}",
                self.summary.lines,
                self.mode,
                next
            );
        }
        self.mode = next;
        self.sink.write_all(&self.scratch)
    }

    /// Flushes the sink and hands it back with the summary.
    pub fn finish(mut self) -> io::Result<(W, FoldSummary)> {
        self.sink.flush()?;
        self.summary.end_mode = self.mode;
        Ok((self.sink, self.summary))
    }
}
