//! # htmlflow
//!
//! Converts HTML fragments into flow-document markup (`Section`,
//! `Paragraph`, `List`, `Table`, ...) ready for a rich-text surface.
//!
//! ## Features
//!
//! - html5ever parsing, so any real-world HTML is accepted
//! - Structural rules enforced on every append: nothing illegal reaches the output
//! - Per-element style records with built-in defaults for headings, lists and tables
//! - Table geometry resolution with clamped column and row spans
//! - Diagnostics for everything that was dropped instead of converted
//!
//! ## Quick Start
//!
//! ```
//! let markup = htmlflow::convert_html("<h1>Title</h1><p>Hello <b>world</b></p>")?;
//! assert!(markup.starts_with("<Section"));
//! assert!(markup.contains("<Bold>world</Bold>"));
//! # Ok::<(), htmlflow::Error>(())
//! ```
//!
//! ## Customizing styles
//!
//! ```
//! use htmlflow::{Color, ConversionOptions, HtmlConverter, StyleRecord};
//!
//! let mut converter = HtmlConverter::new(ConversionOptions::flow_document());
//! let markup = converter
//!     .set_style(StyleRecord::new("h2").with_font_size(28.0).with_foreground(Color::BLUE))?
//!     .set_html("<h2>Chapter</h2>")?
//!     .convert()?;
//! assert!(markup.contains("FontSize=\"28\""));
//! # Ok::<(), htmlflow::Error>(())
//! ```

pub mod clipboard;
pub mod convert;
pub mod dom;
pub mod error;
pub mod flow;
pub mod style;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use clipboard::{ClipboardHtml, PasteAction, PasteFormat, PasteOptions, PasteOutput, prepare_paste};
pub use convert::{
    Conversion, ConversionOptions, Diagnostic, HtmlConverter, RootKind, TableLayout,
};
pub use dom::{Category, classify};
pub use error::{Error, Result};
pub use flow::{FlowKind, FlowTree};
pub use style::{
    Color, FontWeight, HorizontalAlignment, MarkerStyle, Stretch, StyleRecord, StyleStore,
    TextAlignment, Thickness, ToMarkup,
};

/// Convert `html` with default options and the built-in styles.
pub fn convert_html(html: &str) -> Result<String> {
    HtmlConverter::default().convert_html(html)
}

/// Decode raw HTML bytes: UTF-8 first, then the `<meta charset>`, then Windows-1252.
pub fn decode_html(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    util::decode_text(bytes, util::extract_meta_charset(bytes))
}
