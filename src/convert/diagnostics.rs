//! Soft-failure reports collected during a conversion run.

use std::fmt;

/// Something the converter dropped or degraded instead of failing.
///
/// Diagnostics never change the produced markup; they only describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A source element whose category the target parent does not accept.
    StructuralMismatch { tag: String, parent: String },
    /// An unrecognized element (dropped, or marked when unknown processing is on).
    UnknownElement { tag: String },
    /// An `img` without a `src` attribute.
    MissingImageSource,
    /// A URI attribute that is not an absolute http(s) URI.
    InvalidUri { attribute: String, value: String },
    /// A `colspan` / `rowspan` that is not an integer.
    InvalidSpan { attribute: String, value: String },
    /// A table without any cells.
    EmptyTable,
    /// An element nested deeper than the configured limit.
    DepthLimit { tag: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::StructuralMismatch { tag, parent } => {
                write!(f, "<{tag}> is not allowed inside {parent}; dropped")
            }
            Diagnostic::UnknownElement { tag } => write!(f, "unknown element <{tag}>"),
            Diagnostic::MissingImageSource => f.write_str("image without src; dropped"),
            Diagnostic::InvalidUri { attribute, value } => {
                write!(f, "invalid {attribute} '{value}'; attribute omitted")
            }
            Diagnostic::InvalidSpan { attribute, value } => {
                write!(f, "non-numeric {attribute} '{value}'; attribute omitted")
            }
            Diagnostic::EmptyTable => f.write_str("table without cells; dropped"),
            Diagnostic::DepthLimit { tag } => {
                write!(f, "<{tag}> exceeds the nesting limit; subtree dropped")
            }
        }
    }
}

/// Markup plus everything that was dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub markup: String,
    pub diagnostics: Vec<Diagnostic>,
}
