//! A parser and formatter for [Conventional Commit] messages.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! A message is split into a header (`type(scope)!: subject`), an optional
//! free-form body and an optional block of `Key: value` trailers. Whether
//! the commit is breaking is resolved from the header `!` marker, a
//! `BREAKING CHANGE:` footer and a `BREAKING-CHANGE` trailer.
//!
//! # Example
//!
//! ```rust
//! use conventional_message::{Bump, Message, Type};
//! use indoc::indoc;
//!
//! let message = indoc!("
//!     docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the parser.
//!
//!     BREAKING CHANGE: examples now compile
//!     Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
//!     Closes: #12
//! ");
//!
//! let message = Message::parse(message).unwrap();
//!
//! // You can access all components of the header.
//! assert_eq!(message.type_(), Type::Docs);
//! assert_eq!(message.scope().unwrap(), &"example");
//! assert_eq!(message.subject(), &"add tested usage example");
//!
//! // And the free-form body.
//! assert!(message.body().unwrap().contains("helps people understand"));
//!
//! // The header marker and the `BREAKING CHANGE:` footer both make the
//! // message breaking. The footer itself is not kept as a trailer.
//! assert!(message.breaking());
//! assert_eq!(message.bump(), Bump::Major);
//!
//! // Trailers keep their order and provide access to key and value.
//! assert_eq!(message.trailers().len(), 2);
//! assert_eq!(message.trailers()[0].key(), &"Co-Authored-By");
//! assert_eq!(message.trailers()[0].value(), "Lisa Simpson <lisa@simpsons.fam>");
//! assert_eq!(message.trailer_values("closes").collect::<Vec<_>>(), ["#12"]);
//!
//! // Formatting gives back canonical text that parses to the same message.
//! let text = message.format();
//! assert_eq!(Message::parse(&text).unwrap(), message);
//! assert_eq!(message.summary(), "docs(example)!: add tested usage example");
//! ```

#![warn(missing_docs)]

mod component;
mod error;
mod lines;
mod message;
mod parser;

pub use component::{
    Body, Component, Scope, Subject, Trailer, TrailerKey, Type, MAX_SCOPE_LEN, MAX_SUBJECT_LEN,
};
pub use error::{Error, ErrorKind};
pub use message::{parse_message, Bump, Message};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
