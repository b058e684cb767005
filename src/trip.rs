//! Trip measurement: ties two resolved places to the geodesy core.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geodesy::{self, Bounds, Distance, DistanceUnit, EarthModel, GeoCoordinate, GeoError};
use crate::location::ResolvedLocation;

/// Everything computed for one pair of places.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub from: ResolvedLocation,
    pub to: ResolvedLocation,
    pub distance: Distance,
    pub model: EarthModel,
    pub midpoint: GeoCoordinate,
    pub bounds: Bounds,
    pub generated_at: DateTime<Utc>,
}

impl TripReport {
    /// Distance between 'London' and 'New York': 5570.23 km
    pub fn summary_line(&self) -> String {
        format!(
            "Distance between '{}' and '{}': {}",
            self.from.label(),
            self.to.label(),
            self.distance
        )
    }
}

pub fn measure(
    from: &ResolvedLocation,
    to: &ResolvedLocation,
    unit: DistanceUnit,
    model: EarthModel,
) -> Result<TripReport, GeoError> {
    let a = from.coordinate();
    let b = to.coordinate();

    let distance = geodesy::distance_with_model(a, b, unit, model)?;
    let midpoint = geodesy::midpoint(a, b)?;
    log::info!("{} -> {}: {} via {}, midpoint ({})", from.name, to.name, distance, model, midpoint);

    Ok(TripReport {
        from: from.clone(),
        to: to.clone(),
        distance,
        model,
        midpoint,
        bounds: Bounds::enclosing(a, b),
        generated_at: Utc::now(),
    })
}
