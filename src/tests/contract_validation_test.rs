//! Contract tests: response fixtures must satisfy the embedded schemas and
//! decode through the gateway parsers to consistent outcomes.

use crate::models::ServiceOutcome;
use crate::network::geo_client::{
    parse_demographics_outcome, parse_feature_outcome, parse_place_details_outcome,
    parse_places_outcome, parse_reverse_geocode_outcome,
};
use crate::schema_validation::{validate_enrich, validate_feature_query, validate_places};

const FEATURE_FIXTURE: &str = r#"{
    "features": [
        {"attributes": {"APN": "4224-001-001", "UseType": "Residential",
                        "TaxRateCity": "Los Angeles", "Roll_LandValue": 250000},
         "geometry": {"rings": [[[-118.3, 34.0], [-118.29, 34.0], [-118.29, 34.01]]]}}
    ]
}"#;

const PLACES_FIXTURE: &str = r#"{
    "results": [
        {"placeId": "abc123", "name": "Venice Pier", "distance": 132.4,
         "categories": [{"categoryId": "4d4b7105d754a06377d81259", "label": "Landmark"}],
         "location": {"x": -118.472, "y": 33.977},
         "icon": {"url": "https://static.example.com/icons/landmark.png"}}
    ]
}"#;

const ENRICH_FIXTURE: &str = r#"{
    "results": [
        {"value": {"FeatureSet": [
            {"features": [{"attributes": {"TOTPOP": 1352000, "TOTMALES": 650000,
                                          "TOTFEMALES": 702000, "AVGHHSZ": 2.1}}]}
        ]}}
    ]
}"#;

#[test]
fn feature_fixture_satisfies_schema_and_parses() {
    let value: serde_json::Value = serde_json::from_str(FEATURE_FIXTURE).unwrap();
    assert!(validate_feature_query(&value));
    match parse_feature_outcome(FEATURE_FIXTURE) {
        ServiceOutcome::Success(features) => assert_eq!(features.len(), 1),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn places_fixture_satisfies_schema_and_parses() {
    let value: serde_json::Value = serde_json::from_str(PLACES_FIXTURE).unwrap();
    assert!(validate_places(&value));
    match parse_places_outcome(PLACES_FIXTURE) {
        ServiceOutcome::Success(places) => {
            assert_eq!(places.len(), 1);
            assert_eq!(places[0].name, "Venice Pier");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn enrich_fixture_satisfies_schema_and_parses() {
    let value: serde_json::Value = serde_json::from_str(ENRICH_FIXTURE).unwrap();
    assert!(validate_enrich(&value));
    match parse_demographics_outcome(ENRICH_FIXTURE) {
        ServiceOutcome::Success(Some(profile)) => {
            assert_eq!(profile.total_population, Some(1_352_000));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

const REVERSE_GEOCODE_FIXTURE: &str = r#"{
    "address": {"Name": "Milan", "Region": "Lombardy", "Match_addr": "Milan, Lombardy"},
    "location": {"x": 9.19, "y": 45.4642}
}"#;

const PLACE_DETAILS_FIXTURE: &str = r#"{
    "placeDetails": {
        "name": "Venice Pier",
        "categories": [{"categoryId": "4d4b7105d754a06377d81259", "label": "Landmark"}],
        "address": {"streetAddress": "1 Pier Ave"},
        "contactInfo": {"telephone": "+1 310 555 0100", "email": null},
        "socialMedia": {"facebookId": null, "twitter": "venicepier", "instagram": null}
    }
}"#;

#[test]
fn reverse_geocode_fixture_parses_to_labelled_address() {
    match parse_reverse_geocode_outcome(REVERSE_GEOCODE_FIXTURE) {
        ServiceOutcome::Success(record) => assert_eq!(record.label, "Milan"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn place_details_fixture_parses_with_present_fields_only() {
    match parse_place_details_outcome(PLACE_DETAILS_FIXTURE, "abc123") {
        ServiceOutcome::Success(details) => {
            assert_eq!(details.place_id, "abc123");
            assert_eq!(details.telephone.as_deref(), Some("+1 310 555 0100"));
            assert!(details.email.is_none());
            assert_eq!(details.twitter.as_deref(), Some("venicepier"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn schema_rejects_shapes_the_parser_would_refuse() {
    // `features` must be an array.
    let bad: serde_json::Value = serde_json::json!({"features": "not-an-array"});
    assert!(!validate_feature_query(&bad));

    // `results` entries require placeId and name.
    let bad: serde_json::Value = serde_json::json!({"results": [{"distance": 5.0}]});
    assert!(!validate_places(&bad));
}
