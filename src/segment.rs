//! Advice-text segmentation: split a raw advice blob into narrative and
//! literal-code segments.
//!
//! The contract is strict chunk parity over the triple-backtick delimiter:
//! chunks at even index are narrative, chunks at odd index are code. An odd
//! delimiter count (an unterminated fence) is classified by the same rule;
//! the trailing chunk lands as code. Code chunks lose at most one recognized
//! language tag, from the front only.

/// One displayable piece of an advice text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Prose; embedded newlines become visual line breaks when rendered.
    Narrative(String),
    /// Literal command text, shown verbatim in a fixed-width block.
    Code(String),
}

const FENCE: &str = "```";

/// Bare language tags stripped from the front of a code chunk when they are
/// immediately followed by a newline. Unrecognized tags stay visible.
const LANGUAGE_TAGS: &[&str] = &["powershell", "bash", "cmd", "registry", "txt"];

/// Split `raw` on the triple-backtick delimiter into ordered segments.
///
/// Pure and total: any input, including the empty string (which yields one
/// empty narrative segment) and inputs with unbalanced fences.
pub fn segment(raw: &str) -> Vec<Segment> {
    raw.split(FENCE)
        .enumerate()
        .map(|(idx, chunk)| {
            if idx % 2 == 0 {
                Segment::Narrative(chunk.to_string())
            } else {
                Segment::Code(strip_language_tag(chunk).to_string())
            }
        })
        .collect()
}

/// Remove a single leading `<tag>\n` prefix if `<tag>` is recognized.
fn strip_language_tag(chunk: &str) -> &str {
    for tag in LANGUAGE_TAGS {
        if let Some(rest) = chunk.strip_prefix(tag) {
            if let Some(rest) = rest.strip_prefix('\n') {
                return rest;
            }
        }
    }
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrative(text: &str) -> Segment {
        Segment::Narrative(text.to_string())
    }

    fn code(text: &str) -> Segment {
        Segment::Code(text.to_string())
    }

    #[test]
    fn no_delimiter_is_single_narrative() {
        let raw = "Just run Disk Cleanup.\nThen reboot.";
        assert_eq!(segment(raw), vec![narrative(raw)]);
    }

    #[test]
    fn empty_input_is_single_empty_narrative() {
        assert_eq!(segment(""), vec![narrative("")]);
    }

    #[test]
    fn alternates_by_parity() {
        let raw = "Do X.\n```\nreg add foo\n```\nThen Y.";
        assert_eq!(
            segment(raw),
            vec![
                narrative("Do X.\n"),
                code("\nreg add foo\n"),
                narrative("\nThen Y."),
            ]
        );
    }

    #[test]
    fn chunk_count_is_marker_count_plus_one() {
        let raw = "a```b```c```d```e";
        let segments = segment(raw);
        assert_eq!(segments.len(), 5);
        for (idx, seg) in segments.iter().enumerate() {
            match seg {
                Segment::Narrative(_) => assert_eq!(idx % 2, 0),
                Segment::Code(_) => assert_eq!(idx % 2, 1),
            }
        }
    }

    #[test]
    fn strips_recognized_leading_tag() {
        assert_eq!(
            segment("```powershell\nGet-Item\n```"),
            vec![narrative(""), code("Get-Item\n"), narrative("")]
        );
        assert_eq!(
            segment("```registry\nreg add x\n```"),
            vec![narrative(""), code("reg add x\n"), narrative("")]
        );
    }

    #[test]
    fn tag_after_leading_newline_is_kept() {
        // The tag must be the very first thing in the chunk.
        assert_eq!(
            segment("```\npowershell\nGet-Item\n```"),
            vec![narrative(""), code("\npowershell\nGet-Item\n"), narrative("")]
        );
    }

    #[test]
    fn unrecognized_tag_is_kept() {
        assert_eq!(
            segment("```python\nprint(1)\n```"),
            vec![narrative(""), code("python\nprint(1)\n"), narrative("")]
        );
    }

    #[test]
    fn strips_at_most_one_tag() {
        assert_eq!(
            segment("```powershell\nbash\nls\n```"),
            vec![narrative(""), code("bash\nls\n"), narrative("")]
        );
    }

    #[test]
    fn tag_without_newline_is_kept() {
        // A chunk that is exactly the tag has no newline to anchor it.
        assert_eq!(
            segment("```cmd```"),
            vec![narrative(""), code("cmd"), narrative("")]
        );
    }

    #[test]
    fn odd_marker_count_classifies_trailing_chunk_as_code() {
        assert_eq!(
            segment("before```after"),
            vec![narrative("before"), code("after")]
        );
    }

    #[test]
    fn tags_inside_chunk_are_untouched() {
        assert_eq!(
            segment("```powershell\nGet-Item\ncmd\n```"),
            vec![narrative(""), code("Get-Item\ncmd\n"), narrative("")]
        );
    }
}
