use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, trace, warn};

use crate::domain::types::Coordinate;
use crate::error::DistanceError;
use crate::utils::convert_meters_to_miles;

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
}

/// Driving distance from an OSRM `route` service
#[derive(Debug, Clone)]
pub struct OsrmRouter {
    client: Client,
    base_url: String,
    user_agent: Option<String>,
    timeout: Duration,
}

impl OsrmRouter {
    pub fn new(
        base_url: &str,
        contact_email: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, DistanceError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let is_public_osrm = base_url.contains("router.project-osrm.org");

        // The public demo server blocks clients without an identifying User-Agent.
        let user_agent = if is_public_osrm {
            let agent = contact_email
                .map(|email| format!("Delivery-Estimator/1.0 ({})", email.trim()))
                .unwrap_or_else(|| {
                    "Delivery-Estimator/1.0 (no-email-configured@example.com)".to_string()
                });
            info!("Using public OSRM with User-Agent: {}", agent);
            Some(agent)
        } else {
            info!("Using self-hosted OSRM at {}", base_url);
            None
        };

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_agent,
            timeout,
        })
    }

    pub fn route_url(&self, pickup: Coordinate, delivery: Coordinate) -> String {
        // OSRM wants lon,lat pairs
        format!(
            "{}/{},{};{},{}?overview=false",
            self.base_url, pickup.longitude, pickup.latitude, delivery.longitude, delivery.latitude
        )
    }

    pub async fn route_miles(
        &self,
        pickup: Coordinate,
        delivery: Coordinate,
    ) -> Result<f64, DistanceError> {
        let url = self.route_url(pickup, delivery);
        debug!("Built OSRM URL: {}", url);

        let mut request_builder = self.client.get(&url);
        if let Some(agent) = &self.user_agent {
            request_builder = request_builder.header("User-Agent", agent);
        }

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("OSRM request timed out after {:?}", self.timeout);
                DistanceError::Timeout(self.timeout)
            } else {
                error!("OSRM request failed: {}", e);
                DistanceError::Http(e)
            }
        })?;

        let status = response.status();
        let text = response.text().await?;
        trace!("OSRM response: HTTP {} ({} bytes)", status, text.len());

        if !status.is_success() {
            // OSRM reports unroutable pairs as a 400 with code "NoRoute"
            if let Ok(body) = serde_json::from_str::<OsrmRouteResponse>(&text) {
                if body.code == "NoRoute" {
                    return Err(DistanceError::NoRoute);
                }
            }
            error!(
                "OSRM returned HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(DistanceError::Status(status.as_u16()));
        }

        parse_route_response(&text)
    }
}

/// Read `routes[0].distance` (meters) and convert it to miles
pub fn parse_route_response(text: &str) -> Result<f64, DistanceError> {
    let body: OsrmRouteResponse = serde_json::from_str(text).map_err(|e| {
        error!(
            "Failed to parse OSRM JSON: {} (first 200 chars: {})",
            e,
            text.chars().take(200).collect::<String>()
        );
        DistanceError::Malformed(e.to_string())
    })?;

    match body.code.as_str() {
        "Ok" => {}
        "NoRoute" => return Err(DistanceError::NoRoute),
        other => {
            return Err(DistanceError::Malformed(format!(
                "code {}: {}",
                other,
                body.message.unwrap_or_default()
            )))
        }
    }

    let route = body.routes.first().ok_or(DistanceError::NoRoute)?;
    if !route.distance.is_finite() || route.distance < 0.0 {
        return Err(DistanceError::Malformed(format!(
            "invalid route distance {}",
            route.distance
        )));
    }
    Ok(convert_meters_to_miles(route.distance))
}
