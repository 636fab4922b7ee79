//! Itinerary geometry fetch.

use tracing::debug;
use url::Url;

use crate::{
    Result,
    api::errors::ApiError,
    config::ConfigStore,
    geometry::FeatureCollection,
    network::{NetworkClient, RequestOptions},
};

/// Fetch the itinerary geometry for a voyage.
///
/// Issues `GET {itineraries_endpoint}/{ship_id}/itinerary` with
/// `start_date` (unix seconds) and `duration` (seconds) query parameters
/// through the retrying network layer, and parses the body as a
/// [`FeatureCollection`]. Errors propagate to the caller; the renderer is
/// responsible for folding them into its boolean outcome.
pub async fn fetch_itinerary(
    network: &NetworkClient,
    config: &ConfigStore,
    ship_id: i64,
    start_date: i64,
    duration: i64,
) -> Result<FeatureCollection> {
    let endpoints = config.endpoints()?;

    let mut url =
        Url::parse(&endpoints.itineraries_endpoint).map_err(|e| ApiError::InvalidEndpoint {
            url: endpoints.itineraries_endpoint.clone(),
            reason: e.to_string(),
        })?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidEndpoint {
            url: endpoints.itineraries_endpoint.clone(),
            reason: "endpoint cannot be a base URL".to_string(),
        })?
        .push(&ship_id.to_string())
        .push("itinerary");
    url.query_pairs_mut()
        .append_pair("start_date", &start_date.to_string())
        .append_pair("duration", &duration.to_string());

    debug!(ship_id, start_date, duration, url = %url, "fetching itinerary geometry");

    let response = network
        .fetch_with_retry(url.as_str(), RequestOptions::default())
        .await?;
    let collection: FeatureCollection =
        response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse {
                reason: e.to_string(),
            })?;

    Ok(collection)
}
