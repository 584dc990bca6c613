//! WASM bindings for French naturalization decree parsing.
//!
//! Text extraction from the PDF happens on the JavaScript side; these
//! bindings take the flattened text and return parsed decrees.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use natdec_core::audit::{audit_entries, EntryAudit};
use natdec_core::decree::rules::normalize_department;
use natdec_core::models::config::StatsConfig;
use natdec_core::{
    decrees_stats, DecreeParser, DecreesStats, DocumentParser, ParsedDecree, SegmentationMode,
    Warning,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse the flattened text of a journal issue.
///
/// Returns the decrees with their entries; fails on documents without
/// any entry.
#[wasm_bindgen]
pub fn parse_decree_text(text: &str) -> Result<JsValue, JsValue> {
    Parser::new().parse(text)
}

/// Official name of a department code as printed after "dép.", e.g. "075" -> "Paris".
#[wasm_bindgen]
pub fn department_name(code: &str) -> Option<String> {
    let code = normalize_department(code);
    natdec_core::stats::department_name(&code).map(str::to_string)
}

#[derive(Serialize)]
struct ParseOutput {
    segmentation: SegmentationMode,
    decrees: Vec<ParsedDecree>,
    stats: DecreesStats,
    warnings: Vec<String>,
    processing_time_ms: u64,
}

#[derive(Serialize)]
struct AuditOutput {
    audit: EntryAudit,
    clean: bool,
}

/// Decree parser class for browser use.
#[wasm_bindgen(js_name = DecreeParser)]
pub struct Parser {
    parser: DecreeParser,
    stats: StatsConfig,
}

#[wasm_bindgen(js_class = DecreeParser)]
impl Parser {
    /// Create a new parser.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: DecreeParser::new(),
            stats: StatsConfig::default(),
        }
    }

    /// Configure summary page stripping.
    #[wasm_bindgen]
    pub fn set_strip_summary_page(&mut self, strip: bool) {
        self.parser = self.parser.clone().with_summary_stripping(strip);
    }

    /// Configure the characters scanned past the last "Dt." marker.
    #[wasm_bindgen]
    pub fn set_safety_padding(&mut self, padding: usize) {
        self.parser = self.parser.clone().with_safety_padding(padding);
    }

    /// Count collective-effect (EFF) entries as naturalizations.
    #[wasm_bindgen]
    pub fn set_count_collective_effect(&mut self, count: bool) {
        self.stats.count_collective_effect = count;
    }

    /// Parse a document, with statistics and warnings.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        let document = self
            .parser
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let output = ParseOutput {
            segmentation: document.segmentation,
            stats: decrees_stats(&document.decrees, &self.stats),
            warnings: document.warnings.iter().map(Warning::to_string).collect(),
            processing_time_ms: document.processing_time_ms,
            decrees: document.decrees,
        };

        serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Compare the "Dt." references of the text with what was parsed.
    #[wasm_bindgen]
    pub fn audit(&self, text: &str) -> Result<JsValue, JsValue> {
        let document = self
            .parser
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let audit = audit_entries(text, &document.decrees);

        let output = AuditOutput {
            clean: audit.is_clean(),
            audit,
        };

        serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
