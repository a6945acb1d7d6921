// src/messages.rs
//
// The events that can occur in the UI plus the side-effect commands the
// reducers hand back to the dispatch loop.
//
use crate::geometry::{Geometry, Point};
use crate::models::{
    AddressRecord, DemographicProfile, Feature, PlaceDetails, PlaceSummary, ServiceOutcome,
};
use crate::query::QueryDescriptor;
use crate::state::QueryMode;

/// Phase of a sketch interaction. Only the stop/complete phases trigger an
/// authoritative re-render; `Start` is a best-effort preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchPhase {
    Start,
    MoveStop,
    ScaleStop,
    ReshapeStop,
    Complete,
}

impl SketchPhase {
    /// Whether this phase should issue an authoritative query.
    pub fn is_stop(&self) -> bool {
        matches!(
            self,
            SketchPhase::MoveStop | SketchPhase::ScaleStop | SketchPhase::ReshapeStop
        )
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // -- Interaction events ------------------------------------------------
    /// The map view finished loading and can render.
    ViewReady,
    /// Click on the map, already unprojected to lon/lat.
    MapClicked {
        point: Point,
    },
    /// The search widget resolved a result (name + geometry).
    SearchResultSelected {
        label: String,
        point: Point,
    },
    /// Mode selector change – the router's only mode transition trigger.
    QueryModeChanged(QueryMode),
    /// SQL select change in attribute / definition-expression modes.
    WhereClauseChanged(String),
    /// Sketch geometry event with its phase.
    SketchUpdated {
        phase: SketchPhase,
        geometry: Geometry,
    },
    /// Places category combobox change.
    CategoryChanged(String),
    /// Basemap style combobox change.
    BasemapChanged(String),
    /// A place entry in the results list was clicked.
    PlaceSelected {
        place_id: String,
    },
    /// Back navigation from the place detail panel.
    PlaceDetailBack,

    // -- Service outcomes (generation-tagged) ------------------------------
    ParcelQueryCompleted {
        generation: u32,
        outcome: ServiceOutcome<Vec<Feature>>,
    },
    ReverseGeocodeCompleted {
        generation: u32,
        point: Point,
        outcome: ServiceOutcome<AddressRecord>,
    },
    /// `Success(None)` is the empty-FeatureSet case: a no-render success.
    DemographicsCompleted {
        generation: u32,
        label: String,
        point: Point,
        outcome: ServiceOutcome<Option<DemographicProfile>>,
    },
    PlacesQueryCompleted {
        generation: u32,
        outcome: ServiceOutcome<Vec<PlaceSummary>>,
    },
    PlaceDetailsCompleted {
        place_id: String,
        location: Point,
        outcome: ServiceOutcome<PlaceDetails>,
    },
}

/// Side effects returned by `update()`. Executed by the dispatch loop after
/// the state borrow is dropped.
pub enum Command {
    /// Feature-layer query against the parcel layer.
    QueryParcels {
        generation: u32,
        descriptor: QueryDescriptor,
    },
    /// Point → address lookup, first leg of the demographics chain.
    ReverseGeocode {
        generation: u32,
        point: Point,
    },
    /// Demographic enrichment at a point.
    QueryDemographics {
        generation: u32,
        label: String,
        point: Point,
    },
    /// Places near-point search.
    QueryPlaces {
        generation: u32,
        descriptor: QueryDescriptor,
    },
    /// Detail fetch for a selected place.
    FetchPlaceDetails {
        place_id: String,
        location: Point,
    },
    /// Re-dispatch another message after this update completes.
    SendMessage(Message),
    /// Run a UI closure outside the state borrow.
    UpdateUI(Box<dyn FnOnce()>),
    /// Persist the current UI preferences.
    SaveUiPrefs,
    /// Represents no side effect.
    NoOp,
}

impl Command {
    /// Helper to create a SendMessage command
    #[allow(dead_code)]
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(msg)
    }

    /// Helper to create a NoOp command
    #[allow(dead_code)]
    pub fn none() -> Self {
        Command::NoOp
    }

    /// Helper to create an UpdateUI command
    #[allow(dead_code)]
    pub fn update_ui<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Command::UpdateUI(Box::new(f))
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::QueryParcels { generation, .. } => {
                write!(f, "QueryParcels(gen={generation})")
            }
            Command::ReverseGeocode { generation, .. } => {
                write!(f, "ReverseGeocode(gen={generation})")
            }
            Command::QueryDemographics { generation, .. } => {
                write!(f, "QueryDemographics(gen={generation})")
            }
            Command::QueryPlaces { generation, .. } => {
                write!(f, "QueryPlaces(gen={generation})")
            }
            Command::FetchPlaceDetails { place_id, .. } => {
                write!(f, "FetchPlaceDetails({place_id})")
            }
            Command::SendMessage(msg) => write!(f, "SendMessage({msg:?})"),
            Command::UpdateUI(_) => write!(f, "UpdateUI(..)"),
            Command::SaveUiPrefs => write!(f, "SaveUiPrefs"),
            Command::NoOp => write!(f, "NoOp"),
        }
    }
}
