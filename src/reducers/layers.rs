//! Layer/basemap reducer plus the feature-layer registry helpers.

use crate::constants::{
    EMPTY_DEFINITION_EXPRESSION, OPENSPACES_LAYER_URL, PARCEL_LAYER_URL, POINTS_LAYER_URL,
    TRAILHEADS_LAYER_URL, TRAILS_LAYER_URL,
};
use crate::messages::{Command, Message};
use crate::models::{FieldInfo, LayerConfig, PopupContent, PopupTemplate};
use crate::state::AppState;
use crate::update::refresh_ui;

pub const FILTERED_PARCEL_LAYER_ID: &str = "parcel-filter";

/// Returns `true` when the message was handled by the layers reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::BasemapChanged(basemap) => {
            state.basemap = basemap.clone();
            cmds.push(Command::SaveUiPrefs);
            cmds.push(refresh_ui());
            true
        }
        _ => false,
    }
}

/// Feature layers registered once the view is ready: the styled trailheads /
/// trails / open-spaces trio plus the plain points layer.
pub fn builtin_layers() -> Vec<LayerConfig> {
    let trailheads_popup = PopupTemplate {
        title: "Trailhead".into(),
        content: PopupContent::Text(
            "<b>Trail:</b> {TRL_NAME}<br><b>City:</b> {CITY_JUR}<br><b>Cross Street:</b> \
             {X_STREET}<br><b>Parking:</b> {PARKING}<br><b>Elevation:</b> {ELEV_FT} ft"
                .into(),
        ),
    };

    let trails_popup = PopupTemplate {
        title: "Trail Information".into(),
        content: PopupContent::Fields(vec![
            FieldInfo {
                field_name: "ELEV_MIN".into(),
                label: "Elevation Minimum".into(),
            },
            FieldInfo {
                field_name: "ELEV_MAX".into(),
                label: "Elevation Maximum".into(),
            },
        ]),
    };

    let openspaces_popup = PopupTemplate {
        title: "{PARK_NAME}".into(),
        content: PopupContent::Fields(vec![
            FieldInfo {
                field_name: "AGNCY_NAME".into(),
                label: "Agency".into(),
            },
            FieldInfo {
                field_name: "TYPE".into(),
                label: "Type".into(),
            },
            FieldInfo {
                field_name: "ACCESS_TYP".into(),
                label: "Access".into(),
            },
            FieldInfo {
                field_name: "GIS_ACRES".into(),
                label: "Acres".into(),
            },
        ]),
    };

    vec![
        LayerConfig::new("trailheads", TRAILHEADS_LAYER_URL)
            .with_out_fields(&["TRL_NAME", "CITY_JUR", "X_STREET", "PARKING", "ELEV_FT"])
            .with_popup(trailheads_popup),
        LayerConfig::new("trails", TRAILS_LAYER_URL)
            .with_out_fields(&["TRL_NAME", "ELEV_GAIN"])
            .with_popup(trails_popup),
        LayerConfig::new("openspaces", OPENSPACES_LAYER_URL)
            .with_out_fields(&[
                "TYPE",
                "PARK_NAME",
                "AGNCY_NAME",
                "ACCESS_TYP",
                "GIS_ACRES",
                "TRLS_MI",
                "TOTAL_GOOD",
                "TOTAL_FAIR",
                "TOTAL_POOR",
            ])
            .with_popup(openspaces_popup),
        LayerConfig::new("points", POINTS_LAYER_URL),
    ]
}

/// Register the server-side-filtered parcel layer, hidden until a filter
/// expression is chosen.
pub fn ensure_filtered_parcel_layer(state: &mut AppState) {
    if state.layers.iter().any(|l| l.id == FILTERED_PARCEL_LAYER_ID) {
        return;
    }
    let popup = PopupTemplate {
        title: "{UseType}".into(),
        content: PopupContent::Text(
            "Description: {UseDescription}. Land value: {Roll_LandValue}".into(),
        ),
    };
    let mut layer = LayerConfig::new(FILTERED_PARCEL_LAYER_ID, PARCEL_LAYER_URL)
        .with_out_fields(&["*"])
        .with_popup(popup);
    layer.definition_expression = Some(EMPTY_DEFINITION_EXPRESSION.to_string());
    state.layers.push(layer);
}

/// Apply a server-side filter expression to the registered parcel layer.
pub fn set_parcel_definition_expression(state: &mut AppState, expression: &str) {
    ensure_filtered_parcel_layer(state);
    if let Some(layer) = state
        .layers
        .iter_mut()
        .find(|l| l.id == FILTERED_PARCEL_LAYER_ID)
    {
        layer.definition_expression = Some(expression.to_string());
    }
}
