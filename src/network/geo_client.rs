//! Service gateway: one outbound REST request per call, every failure
//! converted to a [`ServiceOutcome::Failure`] before it re-enters the
//! dispatch loop. Nothing here throws past its boundary.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::geometry::Point;
use crate::models::{
    AddressRecord, DemographicProfile, EnrichResponse, Feature, FeatureSet, PlaceDetails,
    PlaceDetailsResponse, PlaceSummary, PlacesResponse, ReverseGeocodeResponse,
    ServiceErrorEnvelope, ServiceFailure, ServiceOutcome,
};
use crate::query::QueryDescriptor;

/// REST client for the hosted location services.
pub struct GeoApiClient;

impl GeoApiClient {
    /// Feature-layer query (attribute and/or spatial filter).
    pub async fn query_features(
        layer_url: &str,
        descriptor: &QueryDescriptor,
    ) -> Result<String, JsValue> {
        let cfg = super::current_config();
        let url = build_feature_query_url(layer_url, descriptor, cfg.api_key());
        Self::fetch_json(&url, "GET", None).await
    }

    /// Point → address lookup against the world geocoder.
    pub async fn reverse_geocode(point: Point) -> Result<String, JsValue> {
        let cfg = super::current_config();
        let url = build_reverse_geocode_url(cfg.geocode_url(), point, cfg.api_key());
        Self::fetch_json(&url, "GET", None).await
    }

    /// Demographic study-area aggregates around a point.
    pub async fn query_demographics(point: Point) -> Result<String, JsValue> {
        let cfg = super::current_config();
        let url = build_enrich_url(cfg.enrich_url(), point, cfg.api_key());
        Self::fetch_json(&url, "GET", None).await
    }

    /// Ranked places around a point for one category.
    pub async fn query_places_near_point(descriptor: &QueryDescriptor) -> Result<String, JsValue> {
        let cfg = super::current_config();
        let url = build_places_url(cfg.places_url(), descriptor, cfg.api_key());
        Self::fetch_json(&url, "GET", None).await
    }

    /// Detail fetch for one place id, all fields.
    pub async fn fetch_place(place_id: &str) -> Result<String, JsValue> {
        let cfg = super::current_config();
        let url = build_place_details_url(cfg.places_url(), place_id, cfg.api_key());
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn fetch_json(
        url: &str,
        method: &str,
        body: Option<&str>,
    ) -> Result<String, JsValue> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        // If the page is served over HTTPS but the URL is HTTP, upgrade it to
        // HTTPS. Prevents mixed-content / CSP violations in production while
        // keeping localhost development working as-is.
        let mut effective_url = url.to_string();
        if let Some(win) = web_sys::window() {
            if let Ok(protocol) = win.location().protocol() {
                if protocol == "https:" && effective_url.starts_with("http://") {
                    effective_url = effective_url.replacen("http://", "https://", 1);
                }
            }
        }

        let opts = RequestInit::new();
        // `RequestInit` methods mutate internal JS fields via interior
        // mutability, so a `mut` binding is unnecessary.
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        if let Some(data) = body {
            let js_body = JsValue::from_str(data);
            opts.set_body(&js_body);
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&effective_url, &opts)?;

        let window = web_sys::window().expect("no global window exists");
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            // Query failures never surface as blocking UI; callers log and
            // skip rendering.
            return Err(JsValue::from_str(&format!(
                "HTTP {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        // Parse body as text – caller can decode JSON.
        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// URL construction – pure, so the request shapes are testable.
// ---------------------------------------------------------------------------

/// Minimal percent-encoding for query-string values.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn push_token(url: &mut String, token: &str) {
    if !token.is_empty() {
        url.push_str("&token=");
        url.push_str(&encode_component(token));
    }
}

pub fn build_feature_query_url(layer_url: &str, descriptor: &QueryDescriptor, token: &str) -> String {
    let mut url = format!("{}/query?f=json&returnGeometry=true", layer_url);

    let where_clause = descriptor.where_clause.as_deref().unwrap_or("1=1");
    url.push_str("&where=");
    url.push_str(&encode_component(where_clause));

    if let Some(geometry) = &descriptor.geometry {
        url.push_str("&geometry=");
        url.push_str(&encode_component(&geometry.to_service_json().to_string()));
        url.push_str("&spatialRel=esriSpatialRelIntersects");
    }

    url.push_str("&outFields=");
    url.push_str(&encode_component(&descriptor.out_fields.join(",")));

    push_token(&mut url, token);
    url
}

pub fn build_reverse_geocode_url(base: &str, point: Point, token: &str) -> String {
    let mut url = format!(
        "{}/reverseGeocode?f=json&location={},{}&outFields=*",
        base, point.lon, point.lat
    );
    push_token(&mut url, token);
    url
}

pub fn build_enrich_url(base: &str, point: Point, token: &str) -> String {
    let study_areas = serde_json::json!([{ "geometry": { "x": point.lon, "y": point.lat } }]);
    let mut url = format!(
        "{}/enrich?f=json&studyAreas={}",
        base,
        encode_component(&study_areas.to_string())
    );
    push_token(&mut url, token);
    url
}

pub fn build_places_url(base: &str, descriptor: &QueryDescriptor, token: &str) -> String {
    let point = match &descriptor.geometry {
        Some(crate::geometry::Geometry::Point(p)) => *p,
        _ => Point::new(0.0, 0.0),
    };
    let mut url = format!(
        "{}/places/near-point?f=json&x={}&y={}&radius={}&icon=png",
        base,
        point.lon,
        point.lat,
        descriptor.radius_m.unwrap_or(500.0)
    );
    if let Some(category) = &descriptor.category {
        url.push_str("&categoryIds=");
        url.push_str(&encode_component(category));
    }
    push_token(&mut url, token);
    url
}

pub fn build_place_details_url(base: &str, place_id: &str, token: &str) -> String {
    let mut url = format!(
        "{}/places/{}?f=json&requestedFields=all",
        base,
        encode_component(place_id)
    );
    push_token(&mut url, token);
    url
}

// ---------------------------------------------------------------------------
// Outcome parsing – pure, shared by the executors and the tests.
// ---------------------------------------------------------------------------

/// The hosted services report faults inside an HTTP-200 body; check that
/// envelope before decoding the expected payload.
fn service_error(raw: &str) -> Option<ServiceFailure> {
    serde_json::from_str::<ServiceErrorEnvelope>(raw)
        .ok()
        .map(|env| ServiceFailure::Service {
            code: env.error.code,
            message: env.error.message,
        })
}

fn decode_failure(err: &serde_json::Error) -> ServiceFailure {
    ServiceFailure::Service {
        code: 0,
        message: format!("undecodable response: {err}"),
    }
}

pub fn parse_feature_outcome(raw: &str) -> ServiceOutcome<Vec<Feature>> {
    if let Some(failure) = service_error(raw) {
        return ServiceOutcome::Failure(failure);
    }
    match serde_json::from_str::<FeatureSet>(raw) {
        Ok(set) => ServiceOutcome::Success(
            set.features
                .into_iter()
                .filter_map(|f| {
                    Some(Feature {
                        geometry: f.geometry?.into_geometry()?,
                        attributes: f.attributes,
                    })
                })
                .collect(),
        ),
        Err(e) => ServiceOutcome::Failure(decode_failure(&e)),
    }
}

pub fn parse_reverse_geocode_outcome(raw: &str) -> ServiceOutcome<AddressRecord> {
    if let Some(failure) = service_error(raw) {
        return ServiceOutcome::Failure(failure);
    }
    match serde_json::from_str::<ReverseGeocodeResponse>(raw) {
        Ok(resp) => match AddressRecord::from_attributes(resp.address) {
            Some(record) => ServiceOutcome::Success(record),
            None => ServiceOutcome::Failure(ServiceFailure::Service {
                code: 0,
                message: "no address at location".into(),
            }),
        },
        Err(e) => ServiceOutcome::Failure(decode_failure(&e)),
    }
}

/// `Success(None)` is the empty-FeatureSet case: the point lies outside all
/// known study areas. Distinct from any failure.
pub fn parse_demographics_outcome(raw: &str) -> ServiceOutcome<Option<DemographicProfile>> {
    if let Some(failure) = service_error(raw) {
        return ServiceOutcome::Failure(failure);
    }
    match serde_json::from_str::<EnrichResponse>(raw) {
        Ok(resp) => {
            let attributes = resp
                .results
                .into_iter()
                .next()
                .and_then(|r| r.value.feature_set.into_iter().next())
                .and_then(|set| set.features.into_iter().next())
                .map(|f| f.attributes);
            ServiceOutcome::Success(attributes.map(|a| DemographicProfile::from_attributes(&a)))
        }
        Err(e) => ServiceOutcome::Failure(decode_failure(&e)),
    }
}

pub fn parse_places_outcome(raw: &str) -> ServiceOutcome<Vec<PlaceSummary>> {
    if let Some(failure) = service_error(raw) {
        return ServiceOutcome::Failure(failure);
    }
    match serde_json::from_str::<PlacesResponse>(raw) {
        Ok(resp) => ServiceOutcome::Success(
            resp.results
                .into_iter()
                .filter_map(|p| {
                    let location = match p.location?.into_geometry()? {
                        crate::geometry::Geometry::Point(pt) => pt,
                        _ => return None,
                    };
                    Some(PlaceSummary {
                        place_id: p.place_id,
                        name: p.name,
                        distance_m: p.distance,
                        category_label: p
                            .categories
                            .first()
                            .map(|c| c.label.clone())
                            .unwrap_or_default(),
                        location,
                        icon_url: p.icon.map(|i| i.url),
                    })
                })
                .collect(),
        ),
        Err(e) => ServiceOutcome::Failure(decode_failure(&e)),
    }
}

pub fn parse_place_details_outcome(raw: &str, place_id: &str) -> ServiceOutcome<PlaceDetails> {
    if let Some(failure) = service_error(raw) {
        return ServiceOutcome::Failure(failure);
    }
    match serde_json::from_str::<PlaceDetailsResponse>(raw) {
        Ok(resp) => {
            let d = resp.place_details;
            ServiceOutcome::Success(PlaceDetails {
                place_id: place_id.to_string(),
                name: d.name,
                category_label: d
                    .categories
                    .first()
                    .map(|c| c.label.clone())
                    .unwrap_or_default(),
                street_address: d.address.street_address,
                telephone: d.contact_info.telephone,
                email: d.contact_info.email,
                facebook: d.social_media.facebook_id,
                twitter: d.social_media.twitter,
                instagram: d.social_media.instagram,
            })
        }
        Err(e) => ServiceOutcome::Failure(decode_failure(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::query;

    #[test]
    fn feature_query_url_carries_where_geometry_and_fields() {
        let descriptor = query::attribute_filter("UseType='Residential'", None).unwrap();
        let url = build_feature_query_url("https://example.com/FeatureServer/0", &descriptor, "KEY");
        assert!(url.starts_with("https://example.com/FeatureServer/0/query?f=json"));
        assert!(url.contains("where=UseType%3D%27Residential%27"));
        assert!(url.contains("outFields=APN%2CUseType%2CTaxRateCity%2CRoll_LandValue"));
        assert!(url.ends_with("&token=KEY"));
        assert!(!url.contains("spatialRel"));

        let spatial = query::spatial_filter(Geometry::Polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]));
        let url = build_feature_query_url("https://example.com/FeatureServer/0", &spatial, "");
        assert!(url.contains("spatialRel=esriSpatialRelIntersects"));
        assert!(!url.contains("token="));
    }

    #[test]
    fn error_envelope_maps_to_service_failure() {
        let raw = r#"{"error":{"code":498,"message":"Invalid token."}}"#;
        match parse_feature_outcome(raw) {
            ServiceOutcome::Failure(ServiceFailure::Service { code, message }) => {
                assert_eq!(code, 498);
                assert_eq!(message, "Invalid token.");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn feature_set_parses_records_with_geometry() {
        let raw = r#"{
            "features": [
                {"attributes": {"APN": "1"}, "geometry": {"rings": [[[0,0],[1,0],[1,1]]]}},
                {"attributes": {"APN": "2"}, "geometry": {"x": -118.0, "y": 34.0}},
                {"attributes": {"APN": "broken"}}
            ]
        }"#;
        match parse_feature_outcome(raw) {
            ServiceOutcome::Success(features) => {
                // The record without geometry is dropped, not an error.
                assert_eq!(features.len(), 2);
                assert_eq!(features[0].attribute_str("APN").as_deref(), Some("1"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn empty_feature_set_is_success_not_failure() {
        match parse_feature_outcome(r#"{"features": []}"#) {
            ServiceOutcome::Success(features) => assert!(features.is_empty()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn demographics_empty_feature_set_is_success_none() {
        let raw = r#"{"results":[{"value":{"FeatureSet":[]}}]}"#;
        assert_eq!(
            parse_demographics_outcome(raw),
            ServiceOutcome::Success(None)
        );

        let raw = r#"{"results":[]}"#;
        assert_eq!(
            parse_demographics_outcome(raw),
            ServiceOutcome::Success(None)
        );
    }

    #[test]
    fn demographics_attributes_become_profile() {
        let raw = r#"{"results":[{"value":{"FeatureSet":[{"features":[
            {"attributes":{"TOTPOP": 1000, "TOTMALES": 480, "TOTFEMALES": 520, "AVGHHSZ": 2.4}}
        ]}]}}]}"#;
        match parse_demographics_outcome(raw) {
            ServiceOutcome::Success(Some(profile)) => {
                assert_eq!(profile.total_population, Some(1000));
                assert_eq!(profile.avg_household_size, Some(2.4));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn places_parse_keeps_rank_order_and_category_label() {
        let raw = r#"{"results":[
            {"placeId":"a","name":"Pier","distance":120.5,
             "categories":[{"categoryId":"x","label":"Landmark"}],
             "location":{"x":-118.47,"y":33.98},
             "icon":{"url":"https://img/pin.png"}},
            {"placeId":"b","name":"Beach","distance":260.0,
             "categories":[],"location":{"x":-118.48,"y":33.99}}
        ]}"#;
        match parse_places_outcome(raw) {
            ServiceOutcome::Success(places) => {
                assert_eq!(places.len(), 2);
                assert_eq!(places[0].place_id, "a");
                assert_eq!(places[0].category_label, "Landmark");
                assert_eq!(places[0].icon_url.as_deref(), Some("https://img/pin.png"));
                assert_eq!(places[1].category_label, "");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_is_a_service_fault() {
        match parse_places_outcome("<html>gateway timeout</html>") {
            ServiceOutcome::Failure(ServiceFailure::Service { code, .. }) => assert_eq!(code, 0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
