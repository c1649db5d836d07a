use winnow::combinator::{cut_err, eof, opt, preceded, terminated, trace};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext};
use winnow::token::{one_of, take_till, take_while};
use winnow::Parser;

/// The space-spelled breaking change footer token.
pub(crate) const BREAKING_PHRASE: &str = "BREAKING CHANGE";
/// The hyphen-spelled breaking change footer token, a valid trailer key.
pub(crate) const BREAKING_ARROW: &str = "BREAKING-CHANGE";

/// The first line of a message, split into its raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header<'a> {
    pub(crate) ty: &'a str,
    pub(crate) scope: Option<&'a str>,
    pub(crate) breaking: bool,
    pub(crate) subject: &'a str,
}

/// Parse a whole header line.
pub(crate) fn parse_header(line: &str) -> Result<Header<'_>, ContextError> {
    let mut input = line;
    terminated(header, eof)
        .parse_next(&mut input)
        .map_err(into_inner)
}

/// Parse a whole `key: value` trailer line.
pub(crate) fn parse_trailer(line: &str) -> Result<(&str, &str), ContextError> {
    let mut input = line;
    terminated(trailer, eof)
        .parse_next(&mut input)
        .map_err(into_inner)
}

/// Parse a whole trailer key.
pub(crate) fn parse_key(key: &str) -> Result<&str, ContextError> {
    let mut input = key;
    terminated(trailer_key, eof)
        .parse_next(&mut input)
        .map_err(into_inner)
}

/// Whether the line would be read as part of a trailer block.
///
/// Besides the `key: value` grammar this accepts the space-spelled
/// `BREAKING CHANGE` footer, which can never be a trailer key.
pub(crate) fn is_trailer_like(line: &str) -> bool {
    is_breaking_phrase(line)
        || line
            .strip_prefix(BREAKING_PHRASE)
            .is_some_and(|rest| rest.starts_with(' '))
        || parse_trailer(line).is_ok()
}

/// Whether the line is a `BREAKING CHANGE:` footer.
pub(crate) fn is_breaking_phrase(line: &str) -> bool {
    line.strip_prefix(BREAKING_PHRASE)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// The label of the innermost grammar rule that failed.
pub(crate) fn failed_rule(err: &ContextError) -> &'static str {
    err.context()
        .find_map(|c| match c {
            StrContext::Label(label) => Some(*label),
            _ => None,
        })
        .unwrap_or("end of line")
}

fn into_inner(err: ErrMode<ContextError>) -> ContextError {
    match err {
        ErrMode::Backtrack(err) | ErrMode::Cut(err) => err,
        ErrMode::Incomplete(_) => ContextError::new(),
    }
}

// <LF>              ::= "0x000A"
// <CR>              ::= "0x000D"
fn is_line_ending(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn whitespace<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., |c: char| c.is_whitespace() && !is_line_ending(c)).parse_next(i)
}

// <header>          ::= <type>, ["(", <scope>, ")"], ["!"], ":", <whitespace>*, <subject>
fn header<'i>(i: &mut &'i str) -> ModalResult<Header<'i>> {
    trace(
        "header",
        (
            type_,
            opt(preceded('(', cut_err(terminated(scope, closing_paren)))),
            opt('!'),
            preceded((colon, whitespace), subject),
        ),
    )
    .map(|(ty, scope, bang, subject)| Header {
        ty,
        scope,
        breaking: bang.is_some(),
        subject,
    })
    .parse_next(i)
}

// <type>            ::= [a-z]+
pub(crate) fn type_<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    trace("type", take_while(1.., |c: char| c.is_ascii_lowercase()))
        .context(StrContext::Label(TYPE))
        .parse_next(i)
}

pub(crate) const TYPE: &str = "type";

// <scope>           ::= <any UTF8-octets except newline or ")">+
pub(crate) fn scope<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    trace(
        "scope",
        take_till(1.., |c: char| c == ')' || is_line_ending(c)),
    )
    .context(StrContext::Label(SCOPE))
    .parse_next(i)
}

pub(crate) const SCOPE: &str = "scope";

fn closing_paren(i: &mut &str) -> ModalResult<char> {
    ')'.context(StrContext::Label("closing parenthesis"))
        .parse_next(i)
}

fn colon(i: &mut &str) -> ModalResult<char> {
    ':'.context(StrContext::Label("colon")).parse_next(i)
}

// <subject>         ::= <any UTF8-octets except newline>+
fn subject<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    trace("subject", take_till(1.., is_line_ending))
        .context(StrContext::Label(SUBJECT))
        .parse_next(i)
}

pub(crate) const SUBJECT: &str = "subject";

// <trailer>         ::= <key>, ":", <whitespace>*, <value>
fn trailer<'i>(i: &mut &'i str) -> ModalResult<(&'i str, &'i str)> {
    trace(
        "trailer",
        (trailer_key, preceded((colon, whitespace), value)),
    )
    .parse_next(i)
}

// <key>             ::= [A-Za-z], [A-Za-z0-9-]*
fn trailer_key<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    trace(
        "key",
        (
            one_of(|c: char| c.is_ascii_alphabetic()),
            take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
        )
            .take(),
    )
    .context(StrContext::Label("key"))
    .parse_next(i)
}

// <value>           ::= <any UTF8-octets except newline>*
fn value<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    take_till(0.., is_line_ending)
        .map(str::trim_end)
        .parse_next(i)
}
