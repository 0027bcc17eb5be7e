//! OSRM HTTP adapter for fetching route geometry to feed the overlay.

use serde::Deserialize;
use tracing::debug;

use crate::error::RouteFetchError;
use crate::markers::Waypoint;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

/// A routed path between waypoints, as returned by OSRM.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Polyline-encoded geometry (precision 1e5).
    pub encoded_path: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn route_url(&self, stops: &[Waypoint]) -> String {
        let coords = stops
            .iter()
            .map(|stop| format!("{:.6},{:.6}", stop.longitude, stop.latitude))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=polyline",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    /// Fetch the road route visiting `stops` in order.
    pub fn route(&self, stops: &[Waypoint]) -> Result<RouteGeometry, RouteFetchError> {
        if stops.len() < 2 {
            return Err(RouteFetchError::TooFewStops(stops.len()));
        }

        let body = self
            .client
            .get(self.route_url(stops))
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        let geometry = route_from_response(body)?;
        debug!(
            stops = stops.len(),
            distance = geometry.distance_meters,
            "fetched route from osrm"
        );
        Ok(geometry)
    }
}

fn route_from_response(body: OsrmRouteResponse) -> Result<RouteGeometry, RouteFetchError> {
    if body.code != "Ok" {
        return Err(RouteFetchError::NoRoute(body.code));
    }
    body.routes
        .into_iter()
        .next()
        .map(|route| RouteGeometry {
            encoded_path: route.geometry,
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
        .ok_or_else(|| RouteFetchError::NoRoute(body.code))
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<Waypoint> {
        vec![
            Waypoint::new("a", "Start", 38.5, -120.2),
            Waypoint::new("b", "End", 40.7, -120.95),
        ]
    }

    #[test]
    fn test_route_url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://osrm.local/".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.route_url(&stops()),
            "http://osrm.local/route/v1/car/-120.200000,38.500000;-120.950000,40.700000?overview=full&geometries=polyline"
        );
    }

    #[test]
    fn test_too_few_stops() {
        let client = OsrmClient::new(OsrmConfig::default()).unwrap();
        let err = client.route(&stops()[..1]).unwrap_err();
        assert!(matches!(err, RouteFetchError::TooFewStops(1)));
    }

    #[test]
    fn test_response_ok() {
        let body: OsrmRouteResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"geometry":"_p~iF~ps|U_ulLnnqC","distance":1200.5,"duration":90.0}]}"#,
        )
        .unwrap();
        let geometry = route_from_response(body).unwrap();
        assert_eq!(geometry.encoded_path, "_p~iF~ps|U_ulLnnqC");
        assert_eq!(geometry.distance_meters, 1200.5);
    }

    #[test]
    fn test_response_no_route() {
        let body: OsrmRouteResponse =
            serde_json::from_str(r#"{"code":"NoRoute","message":"Impossible route"}"#).unwrap();
        assert!(matches!(
            route_from_response(body),
            Err(RouteFetchError::NoRoute(code)) if code == "NoRoute"
        ));
    }
}
