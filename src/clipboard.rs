//! Clipboard HTML payloads.
//!
//! Browsers put copied HTML on the clipboard in the `CF_HTML` format: a few
//! `Key:value` header lines followed by a document whose interesting part
//! sits between `<!--StartFragment-->` and `<!--EndFragment-->`.
//! [`ClipboardHtml::parse`] pulls those pieces apart and [`prepare_paste`]
//! turns them into whatever the paste target wants.

use quick_xml::escape::escape;

use crate::convert::HtmlConverter;
use crate::error::Result;
use crate::flow::is_navigable_uri;

const VERSION_KEY: &str = "Version:";
const SOURCE_URL_KEY: &str = "SourceURL:";
const START_FRAGMENT: &str = "<!--StartFragment-->";
const END_FRAGMENT: &str = "<!--EndFragment-->";

/// Smallest accepted value for [`PasteOptions::max_image_dimension`].
pub const MIN_IMAGE_DIMENSION: f64 = 100.0;
/// Largest accepted value for [`PasteOptions::max_image_dimension`].
pub const MAX_IMAGE_DIMENSION: f64 = 800.0;
/// Default for [`PasteOptions::max_image_dimension`].
pub const DEFAULT_IMAGE_DIMENSION: f64 = 500.0;

/// Parsed `CF_HTML` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardHtml {
    pub version: Option<String>,
    pub source_url: Option<String>,
    pub fragment: Option<String>,
}

impl ClipboardHtml {
    /// Parse a clipboard payload. Missing pieces are left as `None`.
    ///
    /// A fragment that starts and ends on a single line is preferred; if
    /// none is found the whole payload is scanned for the markers.
    pub fn parse(payload: &str) -> Self {
        let mut parsed = ClipboardHtml::default();

        for line in payload.lines() {
            if let Some(value) = strip_prefix_ignore_case(line, VERSION_KEY) {
                parsed.version = Some(value.trim().to_string());
            }
            if let Some(value) = strip_prefix_ignore_case(line, SOURCE_URL_KEY) {
                parsed.source_url = Some(value.trim().to_string());
            }
            if parsed.fragment.is_none()
                && let Some(rest) = strip_prefix_ignore_case(line, START_FRAGMENT)
                && let Some(fragment) = strip_suffix_ignore_case(rest, END_FRAGMENT)
            {
                parsed.fragment = Some(fragment.to_string());
            }
        }

        if parsed.fragment.as_deref().is_none_or(str::is_empty)
            && let Some(start) = payload.find(START_FRAGMENT)
            && let Some(end) = payload.find(END_FRAGMENT)
            && end > start
        {
            parsed.fragment = Some(payload[start + START_FRAGMENT.len()..end].to_string());
        }

        parsed.fragment = parsed.fragment.filter(|f| !f.is_empty());
        parsed
    }

    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    /// The `Pasted from` paragraph, when the source URL is an http(s) URI.
    pub fn attribution(&self) -> Option<String> {
        let url = self.source_url.as_deref().filter(|u| is_navigable_uri(u))?;
        let url = escape(url);
        Some(format!("<p>Pasted from <a href=\"{url}\">{url}</a></p>"))
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}

/// What to do with pasted HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasteAction {
    /// Leave the paste to the target's default handling.
    #[default]
    None,
    /// Paste the fragment (plus attribution) as plain text.
    ConvertToText,
    /// Convert to flow-document markup.
    ConvertToMarkup,
    /// Convert to flow-document markup, delivered as plain text.
    ConvertToMarkupText,
}

/// Settings for [`prepare_paste`].
#[derive(Debug, Clone, PartialEq)]
pub struct PasteOptions {
    pub action: PasteAction,
    /// Wrap fragments ending in `</span>` in a `<div>`.
    pub wrap_partial_fragment: bool,
    max_image_dimension: f64,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self::new(PasteAction::None)
    }
}

impl PasteOptions {
    pub fn new(action: PasteAction) -> Self {
        Self {
            action,
            wrap_partial_fragment: false,
            max_image_dimension: DEFAULT_IMAGE_DIMENSION,
        }
    }

    pub fn with_wrap_partial_fragment(mut self, wrap: bool) -> Self {
        self.wrap_partial_fragment = wrap;
        self
    }

    pub fn with_max_image_dimension(mut self, dimension: f64) -> Self {
        self.set_max_image_dimension(dimension);
        self
    }

    /// Largest edge a pasted bitmap may keep, for hosts that resize images.
    pub fn max_image_dimension(&self) -> f64 {
        self.max_image_dimension
    }

    /// Clamped to [`MIN_IMAGE_DIMENSION`]..=[`MAX_IMAGE_DIMENSION`]; NaN resets to the default.
    pub fn set_max_image_dimension(&mut self, dimension: f64) {
        self.max_image_dimension = if dimension.is_nan() {
            DEFAULT_IMAGE_DIMENSION
        } else {
            dimension.clamp(MIN_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION)
        };
    }
}

/// Clipboard format of prepared paste data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteFormat {
    Text,
    Markup,
}

/// Data to hand to the paste target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutput {
    pub format: PasteFormat,
    pub data: String,
}

/// Turn a clipboard payload into paste data.
///
/// Returns `Ok(None)` when the action is [`PasteAction::None`] or the
/// payload carries no fragment; the target should then paste normally.
pub fn prepare_paste(
    payload: &str,
    options: &PasteOptions,
    converter: &HtmlConverter,
) -> Result<Option<PasteOutput>> {
    if options.action == PasteAction::None {
        return Ok(None);
    }
    let item = ClipboardHtml::parse(payload);
    let Some(fragment) = item.fragment.as_deref() else {
        log::debug!("clipboard payload has no fragment");
        return Ok(None);
    };

    let mut html = if options.wrap_partial_fragment && ends_with_ignore_case(fragment, "</span>") {
        format!("<div>{fragment}</div>")
    } else {
        fragment.to_string()
    };
    if let Some(attribution) = item.attribution() {
        html.push_str(&attribution);
    }

    let output = match options.action {
        PasteAction::None => return Ok(None),
        PasteAction::ConvertToText => PasteOutput {
            format: PasteFormat::Text,
            data: html,
        },
        PasteAction::ConvertToMarkup => PasteOutput {
            format: PasteFormat::Markup,
            data: converter.convert_html(&html)?,
        },
        PasteAction::ConvertToMarkupText => PasteOutput {
            format: PasteFormat::Text,
            data: converter.convert_html(&html)?,
        },
    };
    Ok(Some(output))
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    strip_suffix_ignore_case(s, suffix).is_some()
}
