//! Schema validation helpers for the service response envelopes.

use jsonschema::JSONSchema;
use lazy_static::lazy_static;
use serde_json::Value;

lazy_static! {
    static ref FEATURE_QUERY_SCHEMA: JSONSchema = {
        // At compile-time embed the schema JSON string.
        let raw = include_str!("schema/feature_query_schema.json");
        let parsed: Value =
            serde_json::from_str(raw).expect("Feature query JSON schema must be valid JSON");
        JSONSchema::compile(&parsed).expect("valid feature query schema")
    };
    static ref PLACES_SCHEMA: JSONSchema = {
        let raw = include_str!("schema/places_schema.json");
        let parsed: Value =
            serde_json::from_str(raw).expect("Places JSON schema must be valid JSON");
        JSONSchema::compile(&parsed).expect("valid places schema")
    };
    static ref ENRICH_SCHEMA: JSONSchema = {
        let raw = include_str!("schema/enrich_schema.json");
        let parsed: Value =
            serde_json::from_str(raw).expect("Enrich JSON schema must be valid JSON");
        JSONSchema::compile(&parsed).expect("valid enrich schema")
    };
}

/// Validate a value against the feature-query response schema.
pub fn validate_feature_query(value: &Value) -> bool {
    FEATURE_QUERY_SCHEMA.validate(value).is_ok()
}

/// Validate a value against the places near-point response schema.
pub fn validate_places(value: &Value) -> bool {
    PLACES_SCHEMA.validate(value).is_ok()
}

/// Validate a value against the enrichment response schema.
pub fn validate_enrich(value: &Value) -> bool {
    ENRICH_SCHEMA.validate(value).is_ok()
}
