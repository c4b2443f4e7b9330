//! Polygon area job - computes the geodesic area of a GeoJSON polygon.

use async_trait::async_trait;
use geo::GeodesicArea;
use geojson::{GeoJson, Value as GeoValue};
use tracing::{debug, info};

use geoflow_core::Task;

use crate::{Job, JobError};

/// Computes the area of the polygon in the task's input payload.
///
/// The input must be a GeoJSON Feature whose geometry is a Polygon. The
/// output is the geodesic area in square meters, formatted as a string.
pub struct PolygonAreaJob;

#[async_trait]
impl Job for PolygonAreaJob {
    async fn run(&self, task: &Task) -> Result<String, JobError> {
        debug!(task_id = %task.id, "Running area calculation");

        let polygon = parse_polygon(&task.input)?;
        let area = polygon.geodesic_area_unsigned();

        info!(
            task_id = %task.id,
            area_sq_m = format!("{:.1}", area),
            "Computed polygon area"
        );

        Ok(area.to_string())
    }
}

/// Parse a GeoJSON Feature payload into a polygon, validating ring structure.
fn parse_polygon(input: &str) -> Result<geo::Polygon<f64>, JobError> {
    let geojson: GeoJson = input
        .parse()
        .map_err(|e| JobError::InvalidInput(format!("Malformed GeoJSON: {}", e)))?;

    let feature = match geojson {
        GeoJson::Feature(feature) => feature,
        _ => {
            return Err(JobError::InvalidInput(
                "Expected a GeoJSON Feature".to_string(),
            ))
        }
    };

    let geometry = feature
        .geometry
        .ok_or_else(|| JobError::InvalidInput("Feature has no geometry".to_string()))?;

    match &geometry.value {
        GeoValue::Polygon(rings) => validate_rings(rings)?,
        _ => {
            return Err(JobError::InvalidInput(
                "Expected a Polygon geometry".to_string(),
            ))
        }
    }

    geo::Polygon::try_from(geometry)
        .map_err(|e| JobError::InvalidInput(format!("Invalid polygon geometry: {}", e)))
}

/// Each ring must be closed and carry at least four positions.
fn validate_rings(rings: &[Vec<Vec<f64>>]) -> Result<(), JobError> {
    if rings.is_empty() {
        return Err(JobError::InvalidInput(
            "Polygon has no rings".to_string(),
        ));
    }

    for ring in rings {
        if ring.len() < 4 {
            return Err(JobError::InvalidInput(
                "Polygon ring has fewer than four positions".to_string(),
            ));
        }
        if ring.first() != ring.last() {
            return Err(JobError::InvalidInput(
                "Polygon ring is not closed".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoflow_core::WorkflowId;

    // Roughly one degree square near the equator.
    const SQUARE: &str = r#"{
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
        }
    }"#;

    fn task_with_input(input: &str) -> Task {
        Task::new(WorkflowId::generate(), "client-1", "polygon_area", 1, input)
    }

    #[tokio::test]
    async fn test_area_of_unit_square() {
        let output = PolygonAreaJob
            .run(&task_with_input(SQUARE))
            .await
            .unwrap();
        let area: f64 = output.parse().unwrap();
        // One square degree at the equator is roughly 12,300 km^2.
        assert!(area > 1.2e10 && area < 1.25e10, "area was {}", area);
    }

    #[tokio::test]
    async fn test_rejects_open_ring() {
        let open = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]
            }
        }"#;
        let err = PolygonAreaJob.run(&task_with_input(open)).await.unwrap_err();
        assert!(matches!(err, JobError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_polygon_geometry() {
        let point = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
        }"#;
        let err = PolygonAreaJob
            .run(&task_with_input(point))
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let err = PolygonAreaJob
            .run(&task_with_input("not geojson"))
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::InvalidInput(_)));
    }
}
