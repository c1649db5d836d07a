use conventional_message::{Body, Component, Message, Scope, Subject, Trailer, TrailerKey, Type};
use indoc::indoc;

const FIXTURES: &[&str] = &[
    "feat: add user authentication",
    "fix(auth)!: change authentication flow",
    "feat: add caching\n\nImproves performance significantly",
    "fix: resolve bug\n\nFixes: #123\nReviewed-by: Alice",
    "feat: add new API\n\nBREAKING CHANGE: removes old endpoint",
    "fix: resolve bug\nFixes: #123\nReviewed-by: Alice",
    "feat(api):    padded subject   \r\n\r\n\r\nBody line\r\n\r\nRefs: #1\r\n",
    "fix: x\n\nBREAKING CHANGE without colon\nRefs: #1",
    "fix: x\n\nBREAKING-CHANGE: gone\nbreaking-change: still here\nAcked-by:",
    indoc! {"
        chore(deps): bump winnow

        First paragraph.
            Indented code block.

        Note: looks like a trailer
        but is followed by prose.
    "},
    indoc! {"
        refactor!: split parser

        One.

        Two.


        Signed-off-by: Jane Doe <jane@example.com>
        Co-authored-by: John Doe <john@example.com>
        Signed-off-by: Jane Doe <jane@example.com>
    "},
    indoc! {"
        docs: explain trailers

        Trailers go last.
        Fixes: #9
    "},
];

/// None of the fixtures ends in a block of only unstored lines under a
/// trailer-like paragraph; see `unstored_footer_moves_trailer_like_body`.
#[test]
fn parse_format_parse_is_stable_for_fixtures() {
    for raw in FIXTURES {
        let parsed = Message::parse(raw).unwrap();
        let reparsed = Message::parse(&parsed.format()).unwrap();
        assert_eq!(reparsed, parsed, "{raw:?}");
    }
}

#[test]
fn format_is_a_fixed_point() {
    for raw in FIXTURES {
        let formatted = Message::parse(raw).unwrap().format();
        let reformatted = Message::parse(&formatted).unwrap().format();
        assert_eq!(reformatted, formatted, "{raw:?}");
    }
}

#[test]
fn unstored_footer_moves_trailer_like_body() {
    let cases = [
        "feat!: s\n\nRefs: #1\n\nBREAKING CHANGE: x",
        "feat!: s\n\nRefs: #1\n\nBREAKING CHANGE x",
    ];
    for raw in cases {
        let parsed = Message::parse(raw).unwrap();
        assert_eq!(parsed.body().map(|b| b.as_str()), Some("Refs: #1"), "{raw:?}");
        assert!(parsed.trailers().is_empty(), "{raw:?}");
        assert!(parsed.breaking(), "{raw:?}");

        let formatted = parsed.format();
        assert_eq!(formatted, "feat!: s\n\nRefs: #1", "{raw:?}");

        let reparsed = Message::parse(&formatted).unwrap();
        assert_eq!(reparsed.body(), None, "{raw:?}");
        assert_eq!(reparsed.trailers().len(), 1, "{raw:?}");
        assert_eq!(reparsed.trailers()[0].key(), &"Refs", "{raw:?}");
        assert_eq!(reparsed.trailers()[0].value(), "#1", "{raw:?}");
        assert!(reparsed.breaking(), "{raw:?}");
        assert_ne!(reparsed, parsed, "{raw:?}");

        assert_eq!(reparsed.format(), formatted, "{raw:?}");
    }
}

#[test]
fn built_messages_round_trip() {
    let key = |k: &str| TrailerKey::parse(k).unwrap();
    let messages = [
        Message::new(Type::Feat, Subject::parse("add login").unwrap()),
        Message::new(Type::Fix, Subject::parse("null check").unwrap())
            .with_scope(Scope::parse("core").unwrap())
            .with_breaking_marker(),
        Message::new(Type::Perf, Subject::parse("faster scan").unwrap())
            .with_body(Body::parse("Paragraph one.\n\nParagraph two.").unwrap()),
        Message::new(Type::Ci, Subject::parse("pin runner").unwrap())
            .with_trailer(Trailer::new(key("Refs"), "#1"))
            .with_trailer(Trailer::new(key("Refs"), "#1"))
            .with_trailer(Trailer::new(key("Acked-by"), "")),
        Message::new(Type::Revert, Subject::parse("undo it").unwrap())
            .with_body(Body::parse("This reverts commit abc123.").unwrap())
            .with_trailer(Trailer::new(key("BREAKING-CHANGE"), "config format")),
    ];
    for message in messages {
        let text = message.format();
        assert_eq!(Message::parse(&text).unwrap(), message, "{text:?}");
    }
}

#[test]
fn breaking_signals_combine() {
    let cases = [
        ("feat: x", false),
        ("feat!: x", true),
        ("feat: x\n\nBREAKING CHANGE: y", true),
        ("feat: x\n\nBREAKING-CHANGE: y", true),
        ("feat!: x\n\nBREAKING CHANGE: y\nBREAKING-CHANGE: z", true),
        ("feat: x\n\nBREAKING CHANGE y", false),
        ("feat: x\n\nSome prose.\nBREAKING CHANGE: y", false),
        ("feat: x\n\nbreaking change: y", false),
    ];
    for (raw, breaking) in cases {
        let message = Message::parse(raw).unwrap();
        assert_eq!(message.breaking(), breaking, "{raw:?}");
        assert_eq!(message.summary().contains('!'), breaking, "{raw:?}");
    }
}

#[test]
fn body_never_has_carriage_returns_or_edge_blank_lines() {
    for raw in FIXTURES {
        let message = Message::parse(raw).unwrap();
        if let Some(body) = message.body() {
            assert!(!body.contains('\r'), "{raw:?}");
            assert!(!body.starts_with('\n') && !body.ends_with('\n'), "{raw:?}");
            assert!(body.validate().is_ok(), "{raw:?}");
        }
    }
}
