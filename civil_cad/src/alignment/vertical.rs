/// Element of a vertical profile, stationed along the horizontal path.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VerticalElement {
    /// Constant grade between two stations.
    Grade {
        start_station: f64,
        end_station: f64,
        start_elev: f64,
        end_elev: f64,
    },
    /// Parabolic vertical curve from `start_grade` to `end_grade`.
    Parabola {
        start_station: f64,
        end_station: f64,
        start_elev: f64,
        start_grade: f64,
        end_grade: f64,
    },
}

impl VerticalElement {
    fn stations(&self) -> (f64, f64) {
        match *self {
            VerticalElement::Grade {
                start_station,
                end_station,
                ..
            }
            | VerticalElement::Parabola {
                start_station,
                end_station,
                ..
            } => (start_station, end_station),
        }
    }

    /// Elevation at `station`, clamped to the element.
    fn elevation_at(&self, station: f64) -> f64 {
        let (start, end) = self.stations();
        let x = station.clamp(start, end) - start;
        let len = end - start;
        match *self {
            VerticalElement::Grade {
                start_elev,
                end_elev,
                ..
            } => {
                if len.abs() < f64::EPSILON {
                    start_elev
                } else {
                    start_elev + x / len * (end_elev - start_elev)
                }
            }
            VerticalElement::Parabola {
                start_elev,
                start_grade,
                end_grade,
                ..
            } => {
                if len.abs() < f64::EPSILON {
                    start_elev
                } else {
                    start_elev + start_grade * x + 0.5 * (end_grade - start_grade) / len * x * x
                }
            }
        }
    }
}

/// Profile grade line of an alignment.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerticalAlignment {
    pub elements: Vec<VerticalElement>,
}

impl VerticalAlignment {
    /// Straight grades through `(station, elevation)` pairs.
    pub fn from_stations(points: &[(f64, f64)]) -> Self {
        let elements = points
            .windows(2)
            .map(|pair| VerticalElement::Grade {
                start_station: pair[0].0,
                end_station: pair[1].0,
                start_elev: pair[0].1,
                end_elev: pair[1].1,
            })
            .collect();
        Self { elements }
    }

    pub fn push(&mut self, element: VerticalElement) {
        self.elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elevation at `station`. Stations before the first element or after
    /// the last take the nearest end elevation.
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        let first = self.elements.first()?;
        if station <= first.stations().0 {
            return Some(first.elevation_at(station));
        }
        let element = self
            .elements
            .iter()
            .find(|e| {
                let (start, end) = e.stations();
                station >= start && station <= end
            })
            .or(self.elements.last())?;
        Some(element.elevation_at(station))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_interpolate() {
        let v = VerticalAlignment::from_stations(&[(0.0, 0.0), (10.0, 5.0), (20.0, 5.0)]);
        assert!((v.elevation_at(5.0).unwrap() - 2.5).abs() < 1e-9);
        assert!((v.elevation_at(15.0).unwrap() - 5.0).abs() < 1e-9);
        assert!((v.elevation_at(-4.0).unwrap()).abs() < 1e-9);
        assert!((v.elevation_at(99.0).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn parabola_ends_on_grade() {
        let mut v = VerticalAlignment::default();
        assert!(v.elevation_at(0.0).is_none());
        v.push(VerticalElement::Parabola {
            start_station: 0.0,
            end_station: 100.0,
            start_elev: 10.0,
            start_grade: 0.02,
            end_grade: -0.02,
        });
        // crest at the midpoint
        assert!((v.elevation_at(50.0).unwrap() - 10.5).abs() < 1e-9);
        assert!((v.elevation_at(100.0).unwrap() - 10.0).abs() < 1e-9);
    }
}
