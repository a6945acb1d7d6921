//! Executes the network commands produced by the reducers. Each command
//! issues exactly one request; the outcome – success or failure – re-enters
//! the dispatch loop as a message. Nothing escapes as an exception.

use crate::constants::PARCEL_LAYER_URL;
use crate::messages::{Command, Message};
use crate::models::{ServiceFailure, ServiceOutcome};
use crate::network::geo_client::{
    parse_demographics_outcome, parse_feature_outcome, parse_place_details_outcome,
    parse_places_outcome, parse_reverse_geocode_outcome,
};
use crate::network::GeoApiClient;
use crate::state::dispatch_global_message;

fn network_failure<T>(e: wasm_bindgen::JsValue) -> ServiceOutcome<T> {
    ServiceOutcome::Failure(ServiceFailure::Network(format!("{e:?}")))
}

pub fn execute_query_command(cmd: Command) {
    match cmd {
        Command::QueryParcels {
            generation,
            descriptor,
        } => {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match GeoApiClient::query_features(PARCEL_LAYER_URL, &descriptor).await
                {
                    Ok(raw) => parse_feature_outcome(&raw),
                    Err(e) => network_failure(e),
                };
                dispatch_global_message(Message::ParcelQueryCompleted {
                    generation,
                    outcome,
                });
            });
        }

        Command::ReverseGeocode { generation, point } => {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match GeoApiClient::reverse_geocode(point).await {
                    Ok(raw) => parse_reverse_geocode_outcome(&raw),
                    Err(e) => network_failure(e),
                };
                dispatch_global_message(Message::ReverseGeocodeCompleted {
                    generation,
                    point,
                    outcome,
                });
            });
        }

        Command::QueryDemographics {
            generation,
            label,
            point,
        } => {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match GeoApiClient::query_demographics(point).await {
                    Ok(raw) => parse_demographics_outcome(&raw),
                    Err(e) => network_failure(e),
                };
                dispatch_global_message(Message::DemographicsCompleted {
                    generation,
                    label,
                    point,
                    outcome,
                });
            });
        }

        Command::QueryPlaces {
            generation,
            descriptor,
        } => {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match GeoApiClient::query_places_near_point(&descriptor).await {
                    Ok(raw) => parse_places_outcome(&raw),
                    Err(e) => network_failure(e),
                };
                dispatch_global_message(Message::PlacesQueryCompleted {
                    generation,
                    outcome,
                });
            });
        }

        Command::FetchPlaceDetails { place_id, location } => {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match GeoApiClient::fetch_place(&place_id).await {
                    Ok(raw) => parse_place_details_outcome(&raw, &place_id),
                    Err(e) => network_failure(e),
                };
                dispatch_global_message(Message::PlaceDetailsCompleted {
                    place_id,
                    location,
                    outcome,
                });
            });
        }

        other => {
            crate::debug_log!("execute_query_command: unexpected command {:?}", other);
        }
    }
}
