//! WASM bindings for in-browser conversion.
//!
//! This module exposes the converter to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{ConversionOptions, HtmlConverter, RootKind};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Convert HTML to flow-document markup with the built-in styles.
///
/// `flow_document` selects a `FlowDocument` root instead of a `Section`.
#[wasm_bindgen]
pub fn convert(html: &str, flow_document: bool, indent: bool) -> Result<String, JsValue> {
    let root = if flow_document {
        RootKind::FlowDocument
    } else {
        RootKind::Section
    };
    let options = ConversionOptions::default()
        .with_root(root)
        .with_indent(indent);
    HtmlConverter::new(options)
        .convert_html(html)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert raw bytes, sniffing the encoding first.
#[wasm_bindgen]
pub fn convert_bytes(data: &[u8]) -> Result<String, JsValue> {
    HtmlConverter::default()
        .convert_bytes(data)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
