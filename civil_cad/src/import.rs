//! Records handed to the scene by point importers.

use crate::geometry::Point3;

/// One surveyed point as read from a point file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointRecord {
    pub point_number: String,
    pub northing: f64,
    pub easting: f64,
    pub elevation: f64,
    #[serde(default)]
    pub description: String,
}

impl PointRecord {
    pub fn new(point_number: &str, northing: f64, easting: f64, elevation: f64, description: &str) -> Self {
        Self {
            point_number: point_number.to_string(),
            northing,
            easting,
            elevation,
            description: description.to_string(),
        }
    }

    /// Scene position: x is easting, y is northing.
    pub fn position(&self) -> Point3 {
        Point3::new(self.easting, self.northing, self.elevation)
    }

    pub fn is_finite(&self) -> bool {
        self.northing.is_finite() && self.easting.is_finite() && self.elevation.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easting_maps_to_x() {
        let r = PointRecord::new("1", 200.0, 100.0, 5.0, "IP");
        assert_eq!(r.position(), Point3::new(100.0, 200.0, 5.0));
        assert!(r.is_finite());
        assert!(!PointRecord::new("2", f64::NAN, 0.0, 0.0, "").is_finite());
    }
}
