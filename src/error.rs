//! All errors related to parsing commit messages.

use std::fmt;

/// The error returned when parsing a commit message or one of its
/// components fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,

    context: Option<String>,
    commit: Option<String>,
}

impl Error {
    /// Create a new error from a `ErrorKind`.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            commit: None,
        }
    }

    pub(crate) fn set_context(mut self, context: impl fmt::Display) -> Self {
        self.context = Some(context.to_string());
        self
    }

    pub(crate) fn set_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    /// The kind of error, naming the stage of parsing that failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Why the value was rejected, if more is known than the kind.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The commit message that failed to parse, if the error came out of
    /// [`Message::parse`][crate::Message::parse].
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;
        if let Some(context) = self.context.as_ref() {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// All possible error kinds returned when parsing a commit message.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The message is empty or only whitespace.
    EmptyInput,

    /// The first line does not follow `type(scope)!: subject`.
    InvalidHeader,

    /// The commit type is not one of the known types.
    InvalidType,

    /// The scope has an invalid format.
    InvalidScope,

    /// The subject is blank, too long, or spans lines.
    InvalidSubject,

    /// The body contains characters a normalized body never has.
    InvalidBody,

    /// A trailer line does not follow `Key: value`.
    ///
    /// [`Message::parse`][crate::Message::parse] drops malformed trailer lines
    /// instead of reporting them, so this only comes out of
    /// [`Trailer::parse`][crate::Trailer::parse] and
    /// [`TrailerKey::parse`][crate::TrailerKey::parse].
    InvalidTrailer,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::EmptyInput => "empty commit message",
            ErrorKind::InvalidHeader => "invalid header format",
            ErrorKind::InvalidType => "invalid type",
            ErrorKind::InvalidScope => "invalid scope",
            ErrorKind::InvalidSubject => "invalid subject",
            ErrorKind::InvalidBody => "invalid body",
            ErrorKind::InvalidTrailer => "invalid trailer",
        };
        f.write_str(s)
    }
}
