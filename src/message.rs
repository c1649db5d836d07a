//! The commit message and its assembly from raw text.

use std::fmt;
use std::str::FromStr;

use crate::component::{Body, Component, Scope, Subject, Trailer, Type};
use crate::lines;
use crate::parser::{self, failed_rule, is_breaking_phrase};
use crate::{Error, ErrorKind};

/// A parsed Conventional Commit message.
///
/// Built either by [`Message::parse`] or piece by piece from already
/// validated components. It is never modified once built.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: Type,
    scope: Option<Scope>,
    subject: Subject,
    breaking: bool,
    body: Option<Body>,
    trailers: Vec<Trailer>,
}

impl Message {
    /// Create a new message from raw commit message text.
    ///
    /// Line endings are normalized and surrounding whitespace is ignored.
    /// Trailer lines that do not follow `Key: value` are dropped.
    ///
    /// # Errors
    ///
    /// This function returns an error if the text is blank, the first line
    /// is not a `type(scope)!: subject` header, or any field fails its
    /// component's validation. No partial message is returned.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        Self::assemble(raw).map_err(|err| err.set_commit(raw))
    }

    fn assemble(raw: &str) -> Result<Self, Error> {
        if raw.trim().is_empty() {
            return Err(Error::new(ErrorKind::EmptyInput));
        }

        let lines = lines::normalize(raw);
        let header = parser::parse_header(lines[0].trim()).map_err(|err| {
            Error::new(ErrorKind::InvalidHeader)
                .set_context(format_args!("expected {}", failed_rule(&err)))
        })?;
        let ty = Type::parse(header.ty)?;
        let scope = header.scope.map(Scope::parse).transpose()?;
        let subject = Subject::parse(header.subject)?;

        let Some(content_start) = lines::content_start(&lines) else {
            return Ok(Self {
                ty,
                scope,
                subject,
                breaking: header.breaking,
                body: None,
                trailers: Vec::new(),
            });
        };

        let boundary = lines::trailer_boundary(&lines, content_start);
        tracing::debug!(?boundary, content_start, "resolved trailer boundary");
        let trailer_start = boundary.trailer_start(content_start);

        let body = match lines::body_range(&lines, content_start, trailer_start) {
            Some(range) => Some(Body::parse(&lines::join_body(&lines[range]))?),
            None => None,
        }
        .filter(|body| !body.is_empty());

        let (trailers, footer_breaking) = match trailer_start {
            Some(start) => extract_trailers(&lines[start..]),
            None => (Vec::new(), false),
        };

        Ok(Self {
            ty,
            scope,
            subject,
            breaking: header.breaking || footer_breaking,
            body,
            trailers,
        })
    }

    /// Piece together a message from validated components.
    ///
    /// The message starts out without scope, body or trailers, and not
    /// breaking.
    pub fn new(ty: Type, subject: Subject) -> Self {
        Self {
            ty,
            scope: None,
            subject,
            breaking: false,
            body: None,
            trailers: Vec::new(),
        }
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the body. An empty body leaves the message without one.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// Append a trailer. A `BREAKING-CHANGE` trailer makes the message
    /// breaking.
    pub fn with_trailer(mut self, trailer: Trailer) -> Self {
        self.breaking |= trailer.is_breaking();
        self.trailers.push(trailer);
        self
    }

    /// Mark the message breaking, as the `!` in `feat!: ...` does.
    pub fn with_breaking_marker(mut self) -> Self {
        self.breaking = true;
        self
    }

    /// The type of the commit.
    pub fn type_(&self) -> Type {
        self.ty
    }

    /// The optional scope of the commit.
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// The commit subject.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// A flag to signal that the commit contains breaking changes.
    ///
    /// This flag is set when the commit has an exclamation mark after
    /// the message type and scope, e.g.:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// Or when a `BREAKING CHANGE:` footer or a `BREAKING-CHANGE` trailer
    /// is present:
    /// ```text
    /// feat: my commit subject
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// The commit body, containing a more detailed explanation of the
    /// commit changes.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// The trailers, in the order they appeared.
    ///
    /// A `BREAKING CHANGE:` footer is not a trailer and never shows up here;
    /// it only sets [`Message::breaking`].
    pub fn trailers(&self) -> &[Trailer] {
        &self.trailers
    }

    /// Values of every trailer whose key matches `key`, ignoring case.
    pub fn trailer_values<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.trailers
            .iter()
            .filter(move |t| t.key().matches(key))
            .map(Trailer::value)
    }

    /// The version bump this commit calls for on its own.
    pub fn bump(&self) -> Bump {
        if self.breaking {
            Bump::Major
        } else if self.ty == Type::Feat {
            Bump::Minor
        } else {
            Bump::Patch
        }
    }

    /// The header line alone: type, scope, breaking marker and subject.
    ///
    /// Body and trailers are left out; they can hold free-form text and
    /// attributions that do not belong in one-line listings.
    pub fn summary(&self) -> String {
        let mut summary = String::from(self.ty.as_str());
        if let Some(scope) = &self.scope {
            summary.push('(');
            summary.push_str(scope);
            summary.push(')');
        }
        if self.breaking {
            summary.push('!');
        }
        summary.push_str(": ");
        summary.push_str(&self.subject);
        summary
    }

    /// Render the full message in canonical form.
    ///
    /// Parsing the result gives back an equal message, with one exception:
    /// when the original trailer block held only lines that are not stored
    /// (a `BREAKING CHANGE:` footer, or a dropped malformed line) and the
    /// paragraph above it looks like trailers, that paragraph is the last one
    /// in the output and reparses as trailers instead of body.
    ///
    /// ```rust
    /// use conventional_message::Message;
    ///
    /// let message = Message::parse("feat!: s\n\nRefs: #1\n\nBREAKING CHANGE: x").unwrap();
    /// assert_eq!(message.body().map(|b| b.as_str()), Some("Refs: #1"));
    ///
    /// let reparsed = Message::parse(&message.format()).unwrap();
    /// assert_eq!(reparsed.body(), None);
    /// assert_eq!(reparsed.trailers()[0].value(), "#1");
    /// ```
    pub fn format(&self) -> String {
        self.to_string()
    }
}

/// Read the trailer block, returning the trailers and whether a breaking
/// change footer was among them.
fn extract_trailers(block: &[String]) -> (Vec<Trailer>, bool) {
    let mut trailers = Vec::new();
    let mut breaking = false;
    for line in block.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        if is_breaking_phrase(line) {
            breaking = true;
            continue;
        }
        match Trailer::parse(line) {
            Ok(trailer) => {
                breaking |= trailer.is_breaking();
                trailers.push(trailer);
            }
            Err(err) => tracing::trace!(line, %err, "dropping malformed trailer line"),
        }
    }
    (trailers, breaking)
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())?;

        if let Some(body) = &self.body {
            write!(f, "\n\n{body}")?;
        }

        if !self.trailers.is_empty() {
            f.write_str("\n")?;
            for trailer in &self.trailers {
                write!(f, "\n{trailer}")?;
            }
        }

        Ok(())
    }
}

impl FromStr for Message {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s)
    }
}

/// Parse raw commit message text, see [`Message::parse`].
///
/// # Errors
///
/// Same as [`Message::parse`].
pub fn parse_message(raw: &str) -> Result<Message, Error> {
    Message::parse(raw)
}

/// The semver bump a single commit calls for.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bump {
    /// Any non-breaking, non-feature change.
    Patch,
    /// A new feature.
    Minor,
    /// A breaking change.
    Major,
}

impl Bump {
    /// Access `str` representation of the bump
    pub fn as_str(self) -> &'static str {
        match self {
            Bump::Patch => "patch",
            Bump::Minor => "minor",
            Bump::Major => "major",
        }
    }
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
