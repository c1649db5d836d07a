//! Line-level segmentation of a commit message.
//!
//! A message is cut into three disjoint regions: the header (line 0), the
//! body, and the trailer block. The header is handled by the grammar in
//! `parser`; everything here only decides where the other regions start and
//! end.

use crate::parser::is_trailer_like;

/// Normalize line endings, trim the whole message and split it into lines.
///
/// Both `\r\n` and a lone `\r` become `\n`, so no line ever carries a
/// carriage return.
pub(crate) fn normalize(raw: &str) -> Vec<String> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    normalized.trim().split('\n').map(str::to_owned).collect()
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Index of the first non-blank line after the header, if any.
pub(crate) fn content_start(lines: &[String]) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| !is_blank(line))
        .map(|(i, _)| i)
}

/// Where the trailer block of a content region begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// The content has no trailer block; it is all body.
    NoTrailers,
    /// A blank line separates the body from the trailers starting at this
    /// index.
    Separated(usize),
    /// Every content line is a trailer; there is no body.
    AllTrailers,
}

impl Boundary {
    /// First line of the trailer block, if there is one.
    pub(crate) fn trailer_start(self, content_start: usize) -> Option<usize> {
        match self {
            Boundary::NoTrailers => None,
            Boundary::Separated(start) => Some(start),
            Boundary::AllTrailers => Some(content_start),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ScanningTrailers,
    RunBroken,
}

/// Find the split between body and trailers with a single backward walk
/// over `lines[content_start..]`.
///
/// Walking up from the last non-blank line, every line must look like a
/// trailer until a blank line is met; that blank line is the separator. A
/// line that does not look like a trailer breaks the run and no later blank
/// line can become a separator. If the walk reaches `content_start` with
/// the run intact, the whole region is trailers.
pub(crate) fn trailer_boundary(lines: &[String], content_start: usize) -> Boundary {
    let Some(last) = lines.iter().rposition(|line| !is_blank(line)) else {
        return Boundary::NoTrailers;
    };
    if last < content_start {
        return Boundary::NoTrailers;
    }

    let mut state = ScanState::ScanningTrailers;
    for i in (content_start..=last).rev() {
        let line = lines[i].trim_end();
        state = match state {
            ScanState::ScanningTrailers if is_blank(line) => return Boundary::Separated(i + 1),
            ScanState::ScanningTrailers if is_trailer_like(line) => ScanState::ScanningTrailers,
            ScanState::ScanningTrailers => ScanState::RunBroken,
            ScanState::RunBroken => break,
        };
    }

    match state {
        ScanState::ScanningTrailers => Boundary::AllTrailers,
        ScanState::RunBroken => Boundary::NoTrailers,
    }
}

/// The line range holding the body, or `None` when the message has no body.
///
/// Blank lines directly above the trailer block are not part of the body.
pub(crate) fn body_range(
    lines: &[String],
    content_start: usize,
    trailer_start: Option<usize>,
) -> Option<std::ops::Range<usize>> {
    let mut end = trailer_start.unwrap_or(lines.len());
    while content_start < end && is_blank(&lines[end - 1]) {
        end -= 1;
    }
    (content_start < end).then_some(content_start..end)
}

/// Join body lines, dropping blank lines at either end but keeping those in
/// between.
pub(crate) fn join_body(lines: &[String]) -> String {
    let start = lines
        .iter()
        .position(|l| !is_blank(l))
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map_or(start, |i| i + 1);
    lines[start..end.max(start)].join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;

    fn lines(s: &str) -> Vec<String> {
        normalize(s)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(lines(""), vec![String::new()]);
        assert_eq!(lines("   \n\t "), vec![String::new()]);
        assert_eq!(lines("a\r\nb\rc\n"), vec!["a", "b", "c"]);
        assert_eq!(lines("\n\n  feat: x  \n\n"), vec!["feat: x"]);
        assert_eq!(lines("a\n\n  b"), vec!["a", "", "  b"]);
        assert!(lines("a\r\n\r\nb").iter().all(|l| !l.contains('\r')));
    }

    #[test]
    fn test_content_start() {
        assert_eq!(content_start(&lines("feat: x")), None);
        assert_eq!(content_start(&lines("feat: x\n\n   \n\t")), None);
        assert_eq!(content_start(&lines("feat: x\nbody")), Some(1));
        assert_eq!(content_start(&lines("feat: x\n\n  \nbody")), Some(3));
    }

    #[test]
    fn boundary_separated_by_blank_line() {
        let l = lines(indoc! {"
            fix: resolve bug

            Some body text.

            Fixes: #123
            Reviewed-by: Alice
        "});
        assert_eq!(trailer_boundary(&l, 2), Boundary::Separated(4));
        assert_eq!(Boundary::Separated(4).trailer_start(2), Some(4));
    }

    #[test]
    fn boundary_all_trailers_without_separator() {
        let l = lines("fix: resolve bug\nFixes: #123\nReviewed-by: Alice");
        assert_eq!(trailer_boundary(&l, 1), Boundary::AllTrailers);
        assert_eq!(Boundary::AllTrailers.trailer_start(1), Some(1));
    }

    #[test]
    fn boundary_all_trailers_after_blank_header_gap() {
        let l = lines("fix: resolve bug\n\nFixes: #123\nReviewed-by: Alice");
        assert_eq!(trailer_boundary(&l, 2), Boundary::AllTrailers);
    }

    #[test]
    fn boundary_run_broken_by_prose() {
        let l = lines(indoc! {"
            feat: add caching

            Improves performance.
            Fixes: #123
        "});
        assert_eq!(trailer_boundary(&l, 2), Boundary::NoTrailers);
        assert_eq!(Boundary::NoTrailers.trailer_start(2), None);
    }

    #[test]
    fn boundary_ignores_trailer_lookalike_in_body() {
        let l = lines(indoc! {"
            feat: add caching

            First paragraph.
            Note: this looks like a trailer.
            More prose.

            Last paragraph.
        "});
        assert_eq!(trailer_boundary(&l, 2), Boundary::NoTrailers);
    }

    #[test]
    fn boundary_body_with_paragraphs() {
        let l = lines(indoc! {"
            feat: add caching

            First paragraph.

            Second paragraph.

            BREAKING CHANGE: cache is on by default
            Refs: #9
        "});
        assert_eq!(trailer_boundary(&l, 2), Boundary::Separated(6));
    }

    #[test]
    fn boundary_only_blank_content() {
        let l = lines("feat: x");
        assert_eq!(trailer_boundary(&l, 1), Boundary::NoTrailers);
    }

    #[test]
    fn test_body_range() {
        let l = lines("feat: x\n\nbody\n\n\nFixes: 1");
        assert_eq!(body_range(&l, 2, Some(5)), Some(2..3));
        assert_eq!(body_range(&l, 2, None), Some(2..6));

        let l = lines("feat: x\n\nFixes: 1");
        assert_eq!(body_range(&l, 2, Some(2)), None);
    }

    #[test]
    fn test_join_body() {
        let l = lines("a\n\n  \nb\n\nc");
        assert_eq!(join_body(&l), "a\n\n  \nb\n\nc");

        let l = vec![String::new(), "  x".to_owned(), "  ".to_owned()];
        assert_eq!(join_body(&l), "  x");

        assert_eq!(join_body(&[]), "");
        assert_eq!(join_body(&[String::from("  ")]), "");
    }
}
