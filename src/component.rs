//! Commit message components.
//!
//! Each field of a message is its own validated value type. They share the
//! [`Component`] contract and nothing else.

use std::fmt;
use std::ops::Deref;

use crate::parser::{self, BREAKING_ARROW};
use crate::{Error, ErrorKind};

/// Longest scope accepted, in characters.
pub const MAX_SCOPE_LEN: usize = 64;
/// Longest subject accepted, in characters.
pub const MAX_SUBJECT_LEN: usize = 100;

/// A validated piece of a commit message.
pub trait Component: fmt::Display + Sized {
    /// Parse and validate a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error whose [`ErrorKind`] names the component when the
    /// value breaks the component's rules.
    fn parse(s: &str) -> Result<Self, Error>;

    /// Check the value against the rules [`Component::parse`] enforces.
    ///
    /// Values built through `new_unchecked` skip validation; this lets a
    /// caller confirm them afterwards.
    ///
    /// # Errors
    ///
    /// Returns the same error [`Component::parse`] would.
    fn validate(&self) -> Result<(), Error>;

    /// Render the value as it appears in a commit message.
    fn format(&self) -> String {
        self.to_string()
    }
}

fn invalid(kind: ErrorKind, reason: impl fmt::Display) -> Error {
    Error::new(kind).set_context(reason)
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// The kind of change a commit makes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    /// Introduces a new feature (correlates with `minor` in semver)
    Feat,
    /// Patches a bug (correlates with `patch` in semver)
    Fix,
    /// Changes documentation.
    Docs,
    /// Changes code style.
    Style,
    /// Restructures code without changing behavior.
    Refactor,
    /// Improves performance.
    Perf,
    /// Adds or corrects tests.
    Test,
    /// Changes the build system or dependencies.
    Build,
    /// Changes continuous integration.
    Ci,
    /// Anything else.
    Chore,
    /// Reverts an earlier commit.
    Revert,
}

impl Type {
    /// Every known type, in declaration order.
    pub const ALL: [Type; 11] = [
        Type::Feat,
        Type::Fix,
        Type::Docs,
        Type::Style,
        Type::Refactor,
        Type::Perf,
        Type::Test,
        Type::Build,
        Type::Ci,
        Type::Chore,
        Type::Revert,
    ];

    /// Access `str` representation of the type
    pub const fn as_str(self) -> &'static str {
        match self {
            Type::Feat => "feat",
            Type::Fix => "fix",
            Type::Docs => "docs",
            Type::Style => "style",
            Type::Refactor => "refactor",
            Type::Perf => "perf",
            Type::Test => "test",
            Type::Build => "build",
            Type::Ci => "ci",
            Type::Chore => "chore",
            Type::Revert => "revert",
        }
    }
}

impl Deref for Type {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<&'_ str> for Type {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Component for Type {
    fn parse(s: &str) -> Result<Self, Error> {
        Type::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| invalid(ErrorKind::InvalidType, format!("unknown type {s:?}")))
    }

    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }
}

macro_rules! string_components {
    ($($(#[$meta:meta])* $ty:ident),+) => (
        $(
            $(#[$meta])*
            #[cfg_attr(feature = "serde", derive(serde::Serialize))]
            #[cfg_attr(feature = "serde", serde(transparent))]
            #[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty(String);

            impl $ty {
                /// See `Component::parse` for ensuring the data is valid.
                pub fn new_unchecked(value: impl Into<String>) -> Self {
                    $ty(value.into())
                }

                /// Access `str` representation
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl Deref for $ty {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty {
                fn eq(&self, other: &&str) -> bool {
                    self.as_str() == *other
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    )
}

string_components![
    /// The area of the codebase a commit touches, e.g. `api` in `feat(api): ...`.
    Scope,
    /// The one-line summary following the header's colon.
    Subject,
    /// The free-form text between the header and the trailers.
    Body,
    /// The key of a trailer, e.g. `Reviewed-by`.
    TrailerKey
];

impl Component for Scope {
    fn parse(s: &str) -> Result<Self, Error> {
        let scope = Scope::new_unchecked(s);
        scope.validate()?;
        Ok(scope)
    }

    fn validate(&self) -> Result<(), Error> {
        let kind = ErrorKind::InvalidScope;
        if self.trim().is_empty() {
            return Err(invalid(kind, "must not be blank"));
        }
        if has_line_break(self) {
            return Err(invalid(kind, "must be a single line"));
        }
        if self.contains(['(', ')']) {
            return Err(invalid(kind, "must not contain parentheses"));
        }
        if self.chars().count() > MAX_SCOPE_LEN {
            return Err(invalid(kind, format!("exceeds {MAX_SCOPE_LEN} characters")));
        }
        Ok(())
    }
}

impl Component for Subject {
    fn parse(s: &str) -> Result<Self, Error> {
        let subject = Subject::new_unchecked(s.trim());
        subject.validate()?;
        Ok(subject)
    }

    fn validate(&self) -> Result<(), Error> {
        let kind = ErrorKind::InvalidSubject;
        if self.is_empty() {
            return Err(invalid(kind, "must not be blank"));
        }
        if has_line_break(self) {
            return Err(invalid(kind, "must be a single line"));
        }
        if self.trim() != self.as_str() {
            return Err(invalid(kind, "must not start or end with whitespace"));
        }
        if self.chars().count() > MAX_SUBJECT_LEN {
            return Err(invalid(kind, format!("exceeds {MAX_SUBJECT_LEN} characters")));
        }
        Ok(())
    }
}

impl Body {
    /// Drop blank lines before the first line of text and whitespace after
    /// the last, keeping the first line's indentation.
    fn strip(s: &str) -> &str {
        let s = s.trim_end();
        let indent = s.len() - s.trim_start().len();
        let start = s[..indent].rfind('\n').map_or(0, |i| i + 1);
        &s[start..]
    }
}

impl Component for Body {
    fn parse(s: &str) -> Result<Self, Error> {
        let body = Body::new_unchecked(Body::strip(s));
        body.validate()?;
        Ok(body)
    }

    fn validate(&self) -> Result<(), Error> {
        let kind = ErrorKind::InvalidBody;
        if self.contains('\r') {
            return Err(invalid(kind, "must not contain carriage returns"));
        }
        if self.contains('\0') {
            return Err(invalid(kind, "must not contain NUL"));
        }
        if Body::strip(self) != self.as_str() {
            return Err(invalid(
                kind,
                "must not start or end with blank lines or whitespace",
            ));
        }
        Ok(())
    }
}

impl TrailerKey {
    /// Compare with another key the way git does, ignoring case.
    pub fn matches(&self, other: &str) -> bool {
        unicase::UniCase::new(self.as_str()) == unicase::UniCase::new(other)
    }
}

impl Component for TrailerKey {
    fn parse(s: &str) -> Result<Self, Error> {
        let key = TrailerKey::new_unchecked(s);
        key.validate()?;
        Ok(key)
    }

    fn validate(&self) -> Result<(), Error> {
        parser::parse_key(self).map_err(|_| {
            invalid(
                ErrorKind::InvalidTrailer,
                format!("{:?} is not a valid trailer key", self.as_str()),
            )
        })?;
        Ok(())
    }
}

/// A single `Key: value` trailer line.
///
/// Trailers follow the format of
/// [git trailers](https://git-scm.com/docs/git-interpret-trailers), keyed by
/// a token of ASCII letters, digits and hyphens.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trailer {
    key: TrailerKey,
    value: String,
}

impl Trailer {
    /// Piece together a trailer.
    pub fn new(key: TrailerKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// The key of the trailer.
    pub fn key(&self) -> &TrailerKey {
        &self.key
    }

    /// The value of the trailer, possibly empty.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A flag to signal that the trailer announces a breaking change.
    ///
    /// Only the exact `BREAKING-CHANGE` key counts.
    pub fn is_breaking(&self) -> bool {
        self.key.as_str() == BREAKING_ARROW
    }
}

impl fmt::Display for Trailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}:", self.key)
        } else {
            write!(f, "{}: {}", self.key, self.value)
        }
    }
}

impl Component for Trailer {
    fn parse(line: &str) -> Result<Self, Error> {
        let (key, value) = parser::parse_trailer(line.trim()).map_err(|err| {
            invalid(
                ErrorKind::InvalidTrailer,
                format!("expected {}", parser::failed_rule(&err)),
            )
        })?;
        Ok(Trailer::new(TrailerKey::new_unchecked(key), value))
    }

    fn validate(&self) -> Result<(), Error> {
        self.key.validate()?;
        if has_line_break(&self.value) {
            return Err(invalid(
                ErrorKind::InvalidTrailer,
                "value must be a single line",
            ));
        }
        if self.value.trim() != self.value {
            return Err(invalid(
                ErrorKind::InvalidTrailer,
                "value must not start or end with whitespace",
            ));
        }
        Ok(())
    }
}
