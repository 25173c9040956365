//! Elided edit scripts: rebuild a file from its original lines and an
//! LLM-authored script that mixes literal lines with "existing code" markers.
//!
//! A marker is a comment line such as `# ... existing code ...` or
//! `// ... existing code ...`. Literal lines are emitted in order and never
//! consume original lines, so a script without markers is a pure insertion at
//! the top of the file. Two markers in a row mean "skip original lines up to the
//! next literal line of the script" (the anchor). After the script ends, the
//! original lines not yet passed are appended unchanged.
//!
//! ```
//! use aspen::tools::file::{apply_edit_script, EditScript};
//!
//! let original = ["a\n", "b\n", "c\n", "d\n"];
//! let script = EditScript::parse("# ... existing code ...\n# ... existing code ...\nd");
//! let out = apply_edit_script(&original, &script).unwrap();
//! assert_eq!(out.concat(), "d\n");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::FileToolError;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:#|//|--|/\*+|\*|<!--).*existing code")
        .expect("marker pattern is valid")
});

/// True if `line` stands for elided original content.
pub fn is_marker_line(line: &str) -> bool {
    MARKER.is_match(line)
}

/// One classified line of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditLine<'a> {
    Marker,
    Literal(&'a str),
}

/// Parsed edit script. Keeps the raw text for error reports.
#[derive(Debug, Clone)]
pub struct EditScript<'a> {
    text: &'a str,
    lines: Vec<EditLine<'a>>,
}

impl<'a> EditScript<'a> {
    /// Trims the whole script, splits it on `\n` and classifies each line.
    /// A trailing `\r` on a line is dropped.
    pub fn parse(text: &'a str) -> Self {
        let lines = text
            .trim()
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if is_marker_line(line) {
                    EditLine::Marker
                } else {
                    EditLine::Literal(line)
                }
            })
            .collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn lines(&self) -> &[EditLine<'a>] {
        &self.lines
    }

    /// First literal line at or after `from`, with its index.
    fn next_literal(&self, from: usize) -> Option<(usize, &'a str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(i, line)| match line {
                EditLine::Literal(text) => Some((i, *text)),
                EditLine::Marker => None,
            })
    }
}

/// Splits file content into lines, each keeping its terminator.
pub fn split_lines_keep_ends(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Line terminator used for emitted literal lines: the original's own style.
fn line_ending(original: &[&str]) -> &'static str {
    match original.iter().find(|l| l.ends_with('\n')) {
        Some(l) if l.ends_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

/// Applies `script` to `original` (lines with their endings) and returns the new lines.
///
/// # Errors
///
/// [`FileToolError::AmbiguousEdit`] when a double marker's anchor does not occur
/// (trimmed) in the original lines at or after the current position.
pub fn apply_edit_script(
    original: &[&str],
    script: &EditScript<'_>,
) -> Result<Vec<String>, FileToolError> {
    let newline = line_ending(original);
    let lines = script.lines();
    let mut out = Vec::with_capacity(original.len() + lines.len());
    let mut original_index = 0usize;
    // Script index of an anchor already matched in the original; emitting it
    // stands in for the matched original line.
    let mut pending_anchor: Option<usize> = None;

    for (edit_index, line) in lines.iter().enumerate() {
        match line {
            EditLine::Literal(text) => {
                out.push(format!("{}{}", text, newline));
                if pending_anchor == Some(edit_index) {
                    original_index += 1;
                    pending_anchor = None;
                }
            }
            EditLine::Marker => {
                if !matches!(lines.get(edit_index + 1), Some(EditLine::Marker)) {
                    continue;
                }
                match script.next_literal(edit_index + 2) {
                    Some((anchor_index, anchor)) => {
                        let anchor = anchor.trim();
                        let offset = original[original_index..]
                            .iter()
                            .position(|l| l.trim() == anchor)
                            .ok_or_else(|| FileToolError::AmbiguousEdit {
                                line: edit_index + 1,
                                script: script.text().to_string(),
                            })?;
                        original_index += offset;
                        pending_anchor = Some(anchor_index);
                    }
                    None => {
                        original_index = original.len();
                        pending_anchor = None;
                    }
                }
            }
        }
    }

    if original_index < original.len() {
        out.extend(original[original_index..].iter().map(|l| l.to_string()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: &str = "# ... existing code ...";

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| format!("{}\n", s)).collect()
    }

    fn run(original: &[&str], script: &[&str]) -> Result<Vec<String>, FileToolError> {
        let original = lines(original);
        let original: Vec<&str> = original.iter().map(String::as_str).collect();
        let text = script.join("\n");
        apply_edit_script(&original, &EditScript::parse(&text))
    }

    #[test]
    fn recognizes_common_comment_styles() {
        for line in [
            "# ... existing code ...",
            "    // ... existing code ...",
            "-- ... existing code ...",
            "/* ... existing code ... */",
            " * ... existing code ...",
            "<!-- ... existing code ... -->",
            "// ... Existing Code here ...",
        ] {
            assert!(is_marker_line(line), "{:?} should be a marker", line);
        }
        for line in ["let existing code = 1;", "fn main() {}", "", "# heading"] {
            assert!(!is_marker_line(line), "{:?} should be literal", line);
        }
    }

    #[test]
    fn single_marker_keeps_original() {
        let out = run(&["A", "B", "C"], &[M]).unwrap();
        assert_eq!(out, lines(&["A", "B", "C"]));
    }

    #[test]
    fn double_marker_skips_to_anchor() {
        let out = run(&["A", "B", "C", "D"], &[M, M, "D"]).unwrap();
        assert_eq!(out, lines(&["D"]));
    }

    #[test]
    fn double_marker_keeps_lines_after_anchor() {
        let out = run(&["A", "B", "C", "D", "E"], &[M, M, "C", "new"]).unwrap();
        assert_eq!(out, lines(&["C", "new", "D", "E"]));
    }

    #[test]
    fn anchor_match_ignores_surrounding_whitespace() {
        let out = run(&["A", "    fn f() {", "}"], &[M, M, "  fn f() {  ", M]).unwrap();
        assert_eq!(out, lines(&["  fn f() {  ", "}"]));
    }

    #[test]
    fn missing_anchor_is_ambiguous() {
        let err = run(&["A", "B"], &["top", M, M, "Z"]).unwrap_err();
        match err {
            FileToolError::AmbiguousEdit { line, script } => {
                assert_eq!(line, 2);
                assert!(script.contains("Z"));
            }
            other => panic!("expected AmbiguousEdit, got {:?}", other),
        }
    }

    #[test]
    fn anchor_before_current_position_is_ambiguous() {
        let err = run(&["A", "B", "C"], &[M, M, "C", M, M, "A"]).unwrap_err();
        assert!(matches!(err, FileToolError::AmbiguousEdit { line: 4, .. }));
    }

    #[test]
    fn trailing_double_marker_drops_rest_of_file() {
        let out = run(&["A", "B", "C"], &["X", M, M]).unwrap();
        assert_eq!(out, lines(&["X"]));
    }

    #[test]
    fn literals_are_pure_insertions() {
        let out = run(&["X", "Y"], &["NEW_LINE"]).unwrap();
        assert_eq!(out, lines(&["NEW_LINE", "X", "Y"]));
    }

    #[test]
    fn replacement_without_double_marker_inserts_and_keeps_old_block() {
        let out = run(&["a", "old", "b"], &[M, "new", M]).unwrap();
        assert_eq!(out, lines(&["new", "a", "old", "b"]));
    }

    #[test]
    fn crlf_files_keep_crlf_and_last_line_without_newline_is_kept() {
        let original = ["A\r\n", "B\r\n", "C"];
        let script = EditScript::parse("// ... existing code ...\r\n// ... existing code ...\r\nB\r\nB2");
        let out = apply_edit_script(&original, &script).unwrap();
        assert_eq!(out.concat(), "B\r\nB2\r\nC");
    }

    #[test]
    fn parse_trims_script_and_classifies_lines() {
        let script = EditScript::parse("\n\n  x\n# ... existing code ...\ny\n\n");
        assert_eq!(
            script.lines(),
            &[EditLine::Literal("x"), EditLine::Marker, EditLine::Literal("y")]
        );
    }

    #[test]
    fn split_keeps_line_endings() {
        assert_eq!(split_lines_keep_ends("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
        assert!(split_lines_keep_ends("").is_empty());
    }
}
