//! Data model: service payloads, symbols, graphics and the declarative
//! render descriptions consumed by the DOM/canvas adapters.
//!
//! Everything here is a transient, per-interaction value. The hosted
//! services remain the source of truth; nothing is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{Geometry, Point};

// ---------------------------------------------------------------------------
// Service outcome – the gateway's uniform result-or-failure shape.
// ---------------------------------------------------------------------------

/// Uniform result of one service call. Never partially populated: either the
/// whole payload or a failure reason.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome<T> {
    Success(T),
    Failure(ServiceFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceFailure {
    /// The request never completed (fetch rejected, DNS, CORS …).
    Network(String),
    /// The request completed but the service reported a fault. `code == 0`
    /// marks a completed-but-undecodable body.
    Service { code: i32, message: String },
}

impl ServiceFailure {
    pub fn reason(&self) -> String {
        match self {
            ServiceFailure::Network(msg) => format!("network error: {msg}"),
            ServiceFailure::Service { code, message } => {
                format!("service error {code}: {message}")
            }
        }
    }
}

/// Error envelope the hosted services embed in an HTTP-200 body.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorEnvelope {
    pub error: ServiceErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Feature records
// ---------------------------------------------------------------------------

/// Wire geometry as the feature services serialize it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WireGeometry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rings: Option<Vec<Vec<[f64; 2]>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<[f64; 2]>>>,
}

impl WireGeometry {
    /// Convert into the app geometry. Only the exterior ring / first path is
    /// kept; the demo pages never render holes or multipart shapes.
    pub fn into_geometry(self) -> Option<Geometry> {
        if let (Some(x), Some(y)) = (self.x, self.y) {
            return Some(Geometry::Point(Point::new(x, y)));
        }
        if let Some(rings) = self.rings {
            let ring = rings.into_iter().next()?;
            return Some(Geometry::Polygon(
                ring.into_iter().map(|[x, y]| Point::new(x, y)).collect(),
            ));
        }
        if let Some(paths) = self.paths {
            let path = paths.into_iter().next()?;
            return Some(Geometry::Polyline(
                path.into_iter().map(|[x, y]| Point::new(x, y)).collect(),
            ));
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireFeature {
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<WireGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<WireFeature>,
}

/// A geometry + attribute record held for the current render cycle only.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub attributes: serde_json::Map<String, Value>,
}

impl Feature {
    pub fn attribute_str(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Reverse geocode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub address: serde_json::Map<String, Value>,
    pub location: Option<WireGeometry>,
}

/// The resolved address of a reverse-geocode lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub label: String,
    pub attributes: serde_json::Map<String, Value>,
}

impl AddressRecord {
    /// Label preference: Name, then Region, then City, then the match string.
    pub fn from_attributes(attributes: serde_json::Map<String, Value>) -> Option<Self> {
        let label = ["Name", "Region", "City", "Match_addr"]
            .iter()
            .find_map(|k| attributes.get(*k).and_then(|v| v.as_str()))
            .map(str::to_owned)?;
        if label.is_empty() {
            return None;
        }
        Some(Self { label, attributes })
    }
}

// ---------------------------------------------------------------------------
// Demographics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichResponse {
    #[serde(default)]
    pub results: Vec<EnrichResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichResult {
    pub value: EnrichValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichValue {
    #[serde(rename = "FeatureSet", default)]
    pub feature_set: Vec<FeatureSet>,
}

/// Aggregate attributes of the study area around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicProfile {
    pub total_population: Option<i64>,
    pub total_males: Option<i64>,
    pub total_females: Option<i64>,
    pub avg_household_size: Option<f64>,
}

impl DemographicProfile {
    pub fn from_attributes(attributes: &serde_json::Map<String, Value>) -> Self {
        Self {
            total_population: attributes.get("TOTPOP").and_then(Value::as_i64),
            total_males: attributes.get("TOTMALES").and_then(Value::as_i64),
            total_females: attributes.get("TOTFEMALES").and_then(Value::as_i64),
            avg_household_size: attributes.get("AVGHHSZ").and_then(Value::as_f64),
        }
    }
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub results: Vec<WirePlace>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePlace {
    #[serde(rename = "placeId")]
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub categories: Vec<PlaceCategory>,
    pub location: Option<WireGeometry>,
    #[serde(default)]
    pub icon: Option<PlaceIcon>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceCategory {
    #[serde(rename = "categoryId", default)]
    pub category_id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceIcon {
    pub url: String,
}

/// One ranked place result from the near-point search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub distance_m: f64,
    pub category_label: String,
    pub location: Point,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(rename = "placeDetails")]
    pub place_details: WirePlaceDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePlaceDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<PlaceCategory>,
    #[serde(default)]
    pub address: PlaceAddress,
    #[serde(rename = "contactInfo", default)]
    pub contact_info: PlaceContactInfo,
    #[serde(rename = "socialMedia", default)]
    pub social_media: PlaceSocialMedia,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceAddress {
    #[serde(rename = "streetAddress")]
    pub street_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceContactInfo {
    pub telephone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceSocialMedia {
    #[serde(rename = "facebookId")]
    pub facebook_id: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

/// Fully resolved detail record for one place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub category_label: String,
    pub street_address: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

// ---------------------------------------------------------------------------
// Symbols & graphics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8, f64)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    SimpleFill {
        fill: Rgba,
        outline: Rgba,
        outline_width: f64,
    },
    SimpleLine {
        color: Rgba,
        width: f64,
    },
    SimpleMarker {
        color: Rgba,
        outline: Rgba,
        size: f64,
    },
    PictureMarker {
        url: String,
        width: f64,
        height: f64,
    },
}

/// A drawable map graphic. Ids are client-generated so the canvas adapter
/// and hit-testing can refer to individual graphics.
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    pub id: String,
    pub geometry: Geometry,
    pub symbol: Symbol,
    pub popup_template: Option<PopupTemplate>,
    pub attributes: serde_json::Map<String, Value>,
}

impl Graphic {
    pub fn new(geometry: Geometry, symbol: Symbol) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            geometry,
            symbol,
            popup_template: None,
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_popup(mut self, template: PopupTemplate) -> Self {
        self.popup_template = Some(template);
        self
    }

    pub fn with_attributes(mut self, attributes: serde_json::Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Scopes partition the graphics so one pipeline never clears another's
/// output. Mirrors the per-purpose graphics layers of the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicsScope {
    ParcelResults,
    SearchBuffer,
    Places,
    SketchPreview,
    StaticDemo,
}

// ---------------------------------------------------------------------------
// Popup / panel render descriptions
// ---------------------------------------------------------------------------

/// Declarative popup template: a title and content with `{FIELD}`
/// placeholders resolved against a feature's attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupTemplate {
    pub title: String,
    pub content: PopupContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupContent {
    /// Free-form template string with `{FIELD}` placeholders.
    Text(String),
    /// Label/value rows resolved from the named fields.
    Fields(Vec<FieldInfo>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub field_name: String,
    pub label: String,
}

/// Substitute every `{FIELD}` placeholder with the matching attribute value.
/// Unknown fields render as an empty string, like the SDK's templates.
pub fn resolve_template(template: &str, attributes: &serde_json::Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start + 1..];
        match rest.find('}') {
            Some(end) => {
                let field = &rest[..end];
                match attributes.get(field) {
                    Some(Value::String(s)) => out.push_str(s),
                    Some(Value::Number(n)) => out.push_str(&n.to_string()),
                    Some(Value::Bool(b)) => out.push_str(&b.to_string()),
                    _ => {}
                }
                rest = &rest[end + 1..];
            }
            None => {
                out.push('{');
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

impl PopupTemplate {
    /// Resolve the template against one feature's attributes.
    pub fn resolve(&self, attributes: &serde_json::Map<String, Value>) -> (String, String) {
        let title = resolve_template(&self.title, attributes);
        let body = match &self.content {
            PopupContent::Text(t) => resolve_template(t, attributes),
            PopupContent::Fields(fields) => fields
                .iter()
                .map(|f| {
                    let value = attributes
                        .get(&f.field_name)
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .unwrap_or_default();
                    format!("<b>{}:</b> {}", f.label, value)
                })
                .collect::<Vec<_>>()
                .join("<br>"),
        };
        (title, body)
    }
}

/// A concrete popup instance anchored at a map point.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupDescription {
    pub location: Point,
    pub title: String,
    pub body: String,
}

/// One entry of the results list panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemDescription {
    pub place_id: String,
    pub label: String,
    pub description: String,
}

/// An attribute row of the detail panel; absent values are skipped entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBlock {
    pub heading: String,
    pub icon: String,
    pub value: String,
}

/// The detail flow panel for a selected place.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanelDescription {
    pub place_id: String,
    pub heading: String,
    pub description: String,
    pub blocks: Vec<AttributeBlock>,
}

// ---------------------------------------------------------------------------
// Layer registry
// ---------------------------------------------------------------------------

/// A registered feature layer: endpoint, requested fields, popup template
/// and the server-side definition expression applied to its queries.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerConfig {
    pub id: String,
    pub url: String,
    pub out_fields: Vec<String>,
    pub popup_template: Option<PopupTemplate>,
    pub definition_expression: Option<String>,
}

impl LayerConfig {
    pub fn new(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            out_fields: Vec::new(),
            popup_template: None,
            definition_expression: None,
        }
    }

    pub fn with_out_fields(mut self, fields: &[&str]) -> Self {
        self.out_fields = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_popup(mut self, template: PopupTemplate) -> Self {
        self.popup_template = Some(template);
        self
    }
}

/// Lookup helper used by reducers and tests.
pub fn layer_by_id<'a>(layers: &'a [LayerConfig], id: &str) -> Option<&'a LayerConfig> {
    layers.iter().find(|l| l.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, Value)]) -> serde_json::Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn template_substitutes_known_fields_and_drops_unknown() {
        let a = attrs(&[
            ("APN", Value::String("1234-567".into())),
            ("Roll_LandValue", Value::Number(250000.into())),
        ]);
        let resolved = resolve_template("Parcel {APN}: {Roll_LandValue} ({MISSING})", &a);
        assert_eq!(resolved, "Parcel 1234-567: 250000 ()");
    }

    #[test]
    fn field_popup_renders_label_rows() {
        let template = PopupTemplate {
            title: "{PARK_NAME}".into(),
            content: PopupContent::Fields(vec![
                FieldInfo {
                    field_name: "AGNCY_NAME".into(),
                    label: "Agency".into(),
                },
                FieldInfo {
                    field_name: "GIS_ACRES".into(),
                    label: "Acres".into(),
                },
            ]),
        };
        let a = attrs(&[
            ("PARK_NAME", Value::String("Topanga".into())),
            ("AGNCY_NAME", Value::String("State Parks".into())),
            ("GIS_ACRES", Value::Number(11000.into())),
        ]);
        let (title, body) = template.resolve(&a);
        assert_eq!(title, "Topanga");
        assert_eq!(body, "<b>Agency:</b> State Parks<br><b>Acres:</b> 11000");
    }

    #[test]
    fn wire_geometry_converts_point_and_ring() {
        let p = WireGeometry {
            x: Some(-118.0),
            y: Some(34.0),
            ..Default::default()
        };
        assert!(matches!(p.into_geometry(), Some(Geometry::Point(_))));

        let ring = WireGeometry {
            rings: Some(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]),
            ..Default::default()
        };
        match ring.into_geometry() {
            Some(Geometry::Polygon(pts)) => assert_eq!(pts.len(), 3),
            other => panic!("unexpected geometry: {other:?}"),
        }
    }

    #[test]
    fn address_label_prefers_name_over_region() {
        let rec = AddressRecord::from_attributes(attrs(&[
            ("Region", Value::String("Lombardy".into())),
            ("Name", Value::String("Milan".into())),
        ]))
        .unwrap();
        assert_eq!(rec.label, "Milan");

        let rec = AddressRecord::from_attributes(attrs(&[(
            "Region",
            Value::String("Lombardy".into()),
        )]))
        .unwrap();
        assert_eq!(rec.label, "Lombardy");

        assert!(AddressRecord::from_attributes(attrs(&[])).is_none());
    }

    #[test]
    fn demographic_profile_reads_expected_attributes() {
        let a = attrs(&[
            ("TOTPOP", Value::Number(1_352_000.into())),
            ("TOTMALES", Value::Number(650_000.into())),
            ("TOTFEMALES", Value::Number(702_000.into())),
            (
                "AVGHHSZ",
                Value::Number(serde_json::Number::from_f64(2.1).unwrap()),
            ),
        ]);
        let profile = DemographicProfile::from_attributes(&a);
        assert_eq!(profile.total_population, Some(1_352_000));
        assert_eq!(profile.avg_household_size, Some(2.1));
    }
}
