//! WebAssembly bindings for gridframe-core.
//!
//! This module provides JavaScript-callable functions when compiled to
//! WASM. The API is JSON-string based so the editor's JS side can pass
//! documents through without a binding layer per type.

use wasm_bindgen::prelude::*;

use crate::links::{self, ComponentLink};
use crate::model::Schema;
use crate::normalize::normalize;
use crate::validate::validate;

/// Initialize the gridframe WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Schema engine instance for WASM.
#[wasm_bindgen]
pub struct WasmSchemaEngine {
    schema: Schema,
}

#[wasm_bindgen]
impl WasmSchemaEngine {
    /// Create an engine holding an empty schema.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
        }
    }

    /// Load a schema document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if JSON parsing fails.
    #[wasm_bindgen(js_name = loadSchema)]
    pub fn load_schema(&mut self, json: &str) -> Result<(), String> {
        self.schema = Schema::from_json(json).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Get the current schema as JSON.
    #[wasm_bindgen(js_name = getSchemaJson)]
    #[must_use]
    pub fn get_schema_json(&self) -> String {
        self.schema.to_json().unwrap_or_default()
    }

    /// Normalize the held schema in place.
    #[wasm_bindgen(js_name = normalizeSchema)]
    pub fn normalize_schema(&mut self) {
        self.schema = normalize(&self.schema);
    }

    /// Validate the held schema, returning the report as JSON.
    #[wasm_bindgen(js_name = validateSchema)]
    #[must_use]
    pub fn validate_schema(&self) -> String {
        serde_json::to_string(&validate(&self.schema)).unwrap_or_default()
    }

    /// Grid positions for one breakpoint, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string for an undeclared breakpoint name.
    #[wasm_bindgen(js_name = gridPositions)]
    pub fn grid_positions(&self, breakpoint: &str) -> Result<String, String> {
        let conversion = self
            .schema
            .grid_positions_for(breakpoint)
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&conversion).map_err(|e| e.to_string())
    }

    /// Complexity classification for one breakpoint, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string for an undeclared breakpoint name.
    #[wasm_bindgen(js_name = analyzeComplexity)]
    pub fn analyze_complexity(&self, breakpoint: &str) -> Result<String, String> {
        let report = self
            .schema
            .complexity_for(breakpoint)
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&report).map_err(|e| e.to_string())
    }

    /// Link groups for an edge list given as JSON, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the edge list fails to parse.
    #[wasm_bindgen(js_name = linkGroups)]
    pub fn link_groups(&self, edges_json: &str) -> Result<String, String> {
        let edges: Vec<ComponentLink> =
            serde_json::from_str(edges_json).map_err(|e| e.to_string())?;
        serde_json::to_string(&links::compute_groups(&edges)).map_err(|e| e.to_string())
    }

    /// Validate an edge list (JSON) against the held schema's component
    /// ids, returning the report as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the edge list fails to parse.
    #[wasm_bindgen(js_name = validateLinks)]
    pub fn validate_links(&self, edges_json: &str) -> Result<String, String> {
        let edges: Vec<ComponentLink> =
            serde_json::from_str(edges_json).map_err(|e| e.to_string())?;
        let ids: std::collections::HashSet<&str> = self.schema.component_ids().collect();
        serde_json::to_string(&links::validate_links(&edges, &ids)).map_err(|e| e.to_string())
    }
}

impl Default for WasmSchemaEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_starts_with_empty_invalid_schema() {
        let engine = WasmSchemaEngine::new();
        let report = engine.validate_schema();
        assert!(report.contains(r#""valid":false"#));
        assert!(report.contains("NO_COMPONENTS"));
    }

    #[test]
    fn load_schema_rejects_invalid_json() {
        let mut engine = WasmSchemaEngine::new();
        assert!(engine.load_schema("{ not valid json }").is_err());
    }

    #[test]
    fn schema_json_roundtrip() {
        let mut engine = WasmSchemaEngine::new();
        let json = engine.get_schema_json();
        assert!(engine.load_schema(&json).is_ok());
        assert_eq!(engine.get_schema_json(), json);
    }

    #[test]
    fn link_groups_accepts_edge_list() {
        let engine = WasmSchemaEngine::new();
        let groups = engine
            .link_groups(r#"[{"source":"a","target":"b"}]"#)
            .expect("valid edges");
        assert_eq!(groups, r#"[["a","b"]]"#);
    }
}
