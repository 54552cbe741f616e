//! WASM bindings for the radar-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Inputs and outputs are JSON strings; failures come back as a JSON
//! document with an `error` field and are echoed to the browser console.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::import::{self, ImportReport};
use crate::layout::{LayoutConfig, layout_radar};
use crate::model::RadarSnapshot;
use crate::offsets::random_offset;
use crate::output::{ErrorInfo, RadarOutput};
use crate::validate::{self, ValidationError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

const SERIALIZE_FAILED: &str = "{\"error\": {\"message\": \"Serialization error\"}}";

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| SERIALIZE_FAILED.to_string())
}

fn parse_json<T: DeserializeOwned>(what: &str, input: &str) -> Result<T, ErrorInfo> {
    serde_json::from_str(input).map_err(|e| ErrorInfo::new(format!("Invalid {}: {}", what, e)))
}

#[derive(Serialize)]
struct ErrorOutput {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ValueOutput<T: Serialize> {
    value: T,
}

#[derive(Serialize)]
struct ImportOutput<'a> {
    imported: usize,
    #[serde(flatten)]
    report: &'a ImportReport,
    message: String,
}

fn error_json(error: ErrorInfo) -> String {
    console_error(&error.message);
    to_json(&ErrorOutput { error })
}

fn validation_error(e: ValidationError) -> ErrorInfo {
    ErrorInfo { message: e.message, field: Some(e.field.to_string()) }
}

pub(crate) fn radar_layout(snapshot_json: &str, cfg: &LayoutConfig, seed: u64) -> Result<RadarOutput, ErrorInfo> {
    let snapshot: RadarSnapshot = parse_json("radar", snapshot_json)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(layout_radar(&snapshot, cfg, &mut rng))
}

pub(crate) fn csv_import(csv: &str, snapshot_json: &str, seed: u64) -> Result<String, ErrorInfo> {
    let snapshot: RadarSnapshot = parse_json("radar", snapshot_json)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let report = import::import_blips(csv, &snapshot.quadrants, &snapshot.rings, &mut rng)
        .map_err(|e| ErrorInfo::new(e.to_string()))?;
    Ok(to_json(&ImportOutput {
        imported: report.imported(),
        report: &report,
        message: report.summary(),
    }))
}

pub(crate) fn validated<F, T, O>(form_json: &str, check: F) -> Result<String, ErrorInfo>
where
    F: FnOnce(&T) -> Result<O, ValidationError>,
    T: DeserializeOwned,
    O: Serialize,
{
    let form: T = parse_json("form", form_json)?;
    let value = check(&form).map_err(validation_error)?;
    Ok(to_json(&ValueOutput { value }))
}

/// Build the full render model for one radar on a square canvas.
#[wasm_bindgen]
pub fn build_radar_layout(snapshot_json: &str, canvas_size: f64, seed: u64) -> String {
    let cfg = LayoutConfig::with_canvas_size(canvas_size);
    match radar_layout(snapshot_json, &cfg, seed) {
        Ok(output) => to_json(&output),
        Err(e) => {
            console_error(&format!("Error building layout: {}", e.message));
            to_json(&RadarOutput::from_error(e))
        }
    }
}

/// Same as `build_radar_layout` with tuning overrides; unspecified fields keep their defaults.
#[wasm_bindgen]
pub fn build_radar_layout_with_config(snapshot_json: &str, config_json: &str, seed: u64) -> String {
    let result = parse_json::<LayoutConfig>("layout config", config_json)
        .and_then(|cfg| radar_layout(snapshot_json, &cfg, seed));
    match result {
        Ok(output) => to_json(&output),
        Err(e) => {
            console_error(&format!("Error building layout: {}", e.message));
            to_json(&RadarOutput::from_error(e))
        }
    }
}

/// Import blips from CSV text against the radar's quadrants and rings.
#[wasm_bindgen]
pub fn import_blips_csv(csv: &str, snapshot_json: &str, seed: u64) -> String {
    csv_import(csv, snapshot_json, seed).unwrap_or_else(error_json)
}

/// Example CSV using the radar's own quadrant and ring names.
#[wasm_bindgen]
pub fn sample_csv(snapshot_json: &str) -> String {
    match parse_json::<RadarSnapshot>("radar", snapshot_json) {
        Ok(snapshot) => import::sample_csv(&snapshot.quadrants, &snapshot.rings),
        Err(e) => {
            console_error(&e.message);
            import::sample_csv(&[], &[])
        }
    }
}

/// Offsets for a newly created blip.
#[wasm_bindgen]
pub fn random_blip_offset(seed: u64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    to_json(&random_offset(&mut rng))
}

#[wasm_bindgen]
pub fn validate_radar(form_json: &str) -> String {
    validated(form_json, validate::validate_radar).unwrap_or_else(error_json)
}

#[wasm_bindgen]
pub fn validate_blip(form_json: &str) -> String {
    validated(form_json, validate::validate_blip).unwrap_or_else(error_json)
}

#[wasm_bindgen]
pub fn validate_quadrant(form_json: &str) -> String {
    validated(form_json, validate::validate_quadrant).unwrap_or_else(error_json)
}

#[wasm_bindgen]
pub fn validate_ring(form_json: &str) -> String {
    validated(form_json, validate::validate_ring).unwrap_or_else(error_json)
}

#[wasm_bindgen]
pub fn validate_register(form_json: &str) -> String {
    validated(form_json, validate::validate_register).unwrap_or_else(error_json)
}

#[wasm_bindgen]
pub fn validate_login(form_json: &str) -> String {
    validated(form_json, validate::validate_login).unwrap_or_else(error_json)
}

// Tests stay on the pure helpers: imported JS functions are unavailable natively.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RadarSnapshot, default_quadrants, default_rings};
    use crate::validate::{BlipForm, QuadrantForm, RegisterForm};

    fn snapshot_json() -> String {
        let snapshot = RadarSnapshot {
            quadrants: default_quadrants("r"),
            rings: default_rings("r"),
            blips: vec![],
        };
        serde_json::to_string(&snapshot).unwrap()
    }

    #[test]
    fn test_layout_from_json() {
        let input = r##"{
            "quadrants": [{"id": "q", "name": "Tools", "position": 0, "color": "#f59e0b"}],
            "rings": [{"id": "r", "name": "Adopt", "position": 0, "opacity": 1.0}],
            "blips": [{"id": "b", "name": "Vite", "quadrantId": "q", "ringId": "r",
                       "offsetX": 0.5, "offsetY": 0.5, "isNew": true}]
        }"##;
        let out = radar_layout(input, &LayoutConfig::default(), 1).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&out)).unwrap();

        assert_eq!(json["segments"].as_array().unwrap().len(), 1);
        assert!(json["segments"][0]["path"].as_str().unwrap().starts_with("M 400 400"));
        assert_eq!(json["positionedBlips"][0]["index"], 1);
        assert_eq!(json["positionedBlips"][0]["isNew"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_layout_rejects_malformed_json() {
        let err = radar_layout("{not json", &LayoutConfig::default(), 1).unwrap_err();
        assert!(err.message.starts_with("Invalid radar"));
    }

    #[test]
    fn test_csv_import_json() {
        let json = csv_import("name,quadrant,ring\nVite,tools,adopt\n,tools,adopt", &snapshot_json(), 9).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["imported"], 1);
        assert_eq!(value["blips"][0]["quadrantId"], "r-q2");
        assert_eq!(value["errors"][0]["row"], 3);
        assert_eq!(value["message"], "Imported 1 blip(s) with 1 error(s):\nRow 3: missing name");
    }

    #[test]
    fn test_csv_import_document_error() {
        let err = csv_import("name,quadrant,ring", &snapshot_json(), 9).unwrap_err();
        assert_eq!(err.message, "CSV must have a header row and at least one data row");
    }

    #[test]
    fn test_validation_json() {
        let ok = validated(r#"{"name": "Go", "quadrantId": "q", "ringId": "r"}"#, |f: &BlipForm| {
            validate::validate_blip(f)
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&ok).unwrap();
        assert_eq!(value["value"]["isNew"], true);

        let err = validated(r##"{"name": "Tools", "color": "blue"}"##, |f: &QuadrantForm| {
            validate::validate_quadrant(f)
        })
        .unwrap_err();
        assert_eq!(err.message, "Invalid color");
        assert_eq!(err.field.as_deref(), Some("color"));
    }

    #[test]
    fn test_register_validation_json() {
        let err = validated(
            r#"{"name": "Jo", "email": "jo@example.com", "password": "alllowercase1!"}"#,
            |f: &RegisterForm| validate::validate_register(f),
        )
        .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("password"));
        assert_eq!(err.message, "Password must contain at least one uppercase letter");
    }
}
