use crate::error::AlignmentError;

/// Minimum curve geometry for a design speed.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DesignCriteria {
    pub speed: f64,
    /// Superelevation rate `e`.
    pub superelevation: f64,
    /// Side friction factor `f`.
    pub side_friction: f64,
    pub min_radius: f64,
    pub min_spiral_length: f64,
}

impl DesignCriteria {
    /// Criteria for design speed `speed`:
    /// `e = 0.10 - 0.001 v`, `f = 0.35 - 0.0033 v`,
    /// `R = v² / 15(e + f)`, `Ls = v³ / 46.5(e + f)`.
    pub fn for_speed(speed: f64) -> Result<Self, AlignmentError> {
        let superelevation = 0.10 - 0.001 * speed;
        let side_friction = 0.35 - 0.0033 * speed;
        let ef = superelevation + side_friction;
        if !speed.is_finite() || speed <= 0.0 || ef <= 0.0 {
            return Err(AlignmentError::InvalidDesignSpeed { speed });
        }
        Ok(Self {
            speed,
            superelevation,
            side_friction,
            min_radius: speed * speed / (15.0 * ef),
            min_spiral_length: speed.powi(3) / (46.5 * ef),
        })
    }
}
