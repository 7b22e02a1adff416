//! Property-based tests for the fold engine.
//!
//! Documents are assembled from a fixed pool of representative lines so that
//! every state of the engine is visited often.

use linefold::{fold, fold_stream, Mode};
use proptest::prelude::*;
use std::io::Cursor;

const PROSE: &[&str] = &[
    "plain prose\n",
    "trailing space   \n",
    "  indented\n",
    "文章です。\n",
    "全角空白\u{3000}\n",
    "tab\t\n",
    "Really?\n",
    "   \n",
];

const SEALED: &[&str] = &[
    "本当？\n",
    "すごい！\n",
    "- item\n",
    "* star\n",
    "+ plus\n",
    "12. ordered\n",
    "\n",
];

const FENCES: &[&str] = &["```\n", "```rust\n", "---\n"];

fn arb_line() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        3 => prop::sample::select(PROSE),
        2 => prop::sample::select(SEALED),
        1 => prop::sample::select(FENCES),
    ]
}

/// Lines that open nothing: no `---`, no ```.
fn arb_plain_line() -> impl Strategy<Value = &'static str> {
    prop_oneof![prop::sample::select(PROSE), prop::sample::select(SEALED)]
}

fn arb_doc() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(arb_line(), 0..40),
        prop::option::of("[a-z？ ]{1,8}"),
    )
        .prop_map(|(lines, last)| {
            let mut doc = lines.concat();
            if let Some(last) = last {
                doc.push_str(&last);
            }
            doc
        })
}

fn run(doc: &str) -> (String, Mode) {
    let mut out = Vec::new();
    let mode = fold(doc.as_bytes(), &mut out);
    (String::from_utf8(out).unwrap(), mode)
}

proptest! {
    /// Every line from the opening `---` through the closing one is copied.
    #[test]
    fn prop_front_matter_preserved(
        body in prop::collection::vec(prop_oneof![arb_plain_line(), Just("```\n")], 0..20),
        rest in arb_doc(),
    ) {
        let front = format!("---\n{}---\n", body.concat());
        let doc = format!("{front}{rest}");
        let (out, _) = run(&doc);
        prop_assert!(out.starts_with(&front), "front matter altered: {:?}", out);
    }

    /// A fenced region opened from prose is copied through its closing fence.
    #[test]
    fn prop_code_fence_preserved(
        before in prop::collection::vec(arb_plain_line(), 0..15),
        code in prop::collection::vec(prop_oneof![arb_plain_line(), Just("---\n")], 0..15),
        after in prop::collection::vec(arb_line(), 0..15),
    ) {
        let region = format!("```\n{}```\n", code.concat());
        let doc = format!("{}{region}{}", before.concat(), after.concat());
        let (out, _) = run(&doc);
        prop_assert!(out.contains(&region), "code block altered: {:?}", out);
    }

    /// Joining only removes bytes; each inserted newline replaces a stripped one.
    #[test]
    fn prop_output_never_grows(doc in arb_doc()) {
        let (out, _) = run(&doc);
        prop_assert!(out.len() <= doc.len());
    }

    /// Only whitespace is ever removed or inserted.
    #[test]
    fn prop_visible_text_preserved(doc in arb_doc()) {
        let (out, _) = run(&doc);
        let visible = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(visible(&out), visible(&doc));
    }

    /// Documents with nothing to join come out unchanged.
    #[test]
    fn prop_sealed_lines_unchanged(
        lines in prop::collection::vec(prop::sample::select(SEALED), 0..30),
    ) {
        let doc = lines.concat();
        let (out, mode) = run(&doc);
        prop_assert_eq!(&out, &doc);
        prop_assert_ne!(mode, Mode::DelayedJoin);
    }

    /// The streaming front end agrees with the in-memory one.
    #[test]
    fn prop_stream_matches_buffer(doc in arb_doc()) {
        let (expected, mode) = run(&doc);
        let mut out = Vec::new();
        let summary = fold_stream(Cursor::new(doc.as_bytes()), &mut out).unwrap();
        prop_assert_eq!(String::from_utf8(out).unwrap(), expected);
        prop_assert_eq!(summary.end_mode, mode);
        prop_assert_eq!(summary.lines, doc.split_inclusive('\n').count());
    }
}

#[test]
fn test_blank_only_documents_unchanged() {
    for n in 0..5 {
        let doc = "\n".repeat(n);
        assert_eq!(run(&doc).0, doc);
    }
}
