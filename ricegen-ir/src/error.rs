use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{EntityId, EntityKind};

/// Result type for library operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse library description")]
    #[diagnostic(code(ricegen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown superclass '{superclass}' for class '{class}'")]
    #[diagnostic(
        code(ricegen::unknown_superclass),
        help("superclasses are referenced by their fully qualified name, e.g. 'geo::Shape'")
    )]
    UnknownSuperclass { class: String, superclass: String },

    #[error("'{superclass}' is a {kind}, not a class, so '{class}' cannot derive from it")]
    #[diagnostic(
        code(ricegen::invalid_superclass),
        help("only classes can be named as a superclass")
    )]
    InvalidSuperclass {
        class: String,
        superclass: String,
        kind: EntityKind,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(ricegen::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("{kind} '{name}' is declared more than once")]
    #[diagnostic(code(ricegen::duplicate_name))]
    DuplicateName { kind: EntityKind, name: String },

    #[error("no entity {id} in this library")]
    #[diagnostic(code(ricegen::unknown_entity))]
    UnknownEntity { id: EntityId },

    #[error("{message}")]
    #[diagnostic(code(ricegen::validation_error))]
    Validation { message: String },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::InvalidIdentifier {
            src: NamedSource::new(filename, src.to_string()),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Validation {
            message: message.into(),
        })
    }
}
