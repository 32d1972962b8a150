//! Replaces sharp direction changes of a tangent-line path with curves.

use std::f64::consts::PI;

use super::{AlignmentPath, DesignCriteria};
use crate::error::AlignmentError;
use crate::geometry::{distance, normalize_angle, ClothoidSpiral, Point, Turn};

/// Heading changes below this angle are treated as straight.
const MIN_DEFLECTION: f64 = 0.001 * PI / 180.0;
/// Deflections this close to a reversal cannot be curved.
const MAX_DEFLECTION: f64 = PI - 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CurveType {
    #[default]
    Clothoid,
    Circular,
}

/// Builds a new path through the tangent points of `path` (its start
/// position and line end points) with every direction change replaced by a
/// curve meeting the criteria for `speed`.
///
/// A curve whose tangent length does not fit in half of either adjacent leg
/// is left as a sharp vertex.
pub fn auto_generate_curves(
    path: &AlignmentPath,
    speed: f64,
    curve_type: CurveType,
) -> Result<AlignmentPath, AlignmentError> {
    let mut points = path.tangent_points();
    points.dedup();
    if points.len() < 2 {
        return Err(AlignmentError::NotEnoughVertices {
            found: points.len(),
        });
    }
    let criteria = DesignCriteria::for_speed(speed)?;
    let mut out = AlignmentPath::with_samples(path.arc_samples(), path.spiral_samples());
    out.move_to(points[0].x, points[0].y)?;

    for i in 1..points.len() - 1 {
        let (p1, p2, p3) = (points[i - 1], points[i], points[i + 1]);
        let h1 = p1.heading_to(p2);
        let h2 = p2.heading_to(p3);
        let delta = normalize_angle(h2 - h1);
        if delta.abs() <= MIN_DEFLECTION {
            out.line_to(p2.x, p2.y)?;
            continue;
        }
        let max_tangent = 0.5 * distance(p1, p2).min(distance(p2, p3));
        let fitted = if delta.abs() >= MAX_DEFLECTION {
            false
        } else {
            match curve_type {
                CurveType::Circular => circular_fillet(&mut out, p2, h1, h2, delta, &criteria, max_tangent)?,
                CurveType::Clothoid => spiral_pair(&mut out, p2, h1, h2, delta, &criteria, max_tangent)?,
            }
        };
        if !fitted {
            log::warn!(
                "no {:?} curve fits at vertex {} ({:.3}, {:.3}), keeping the sharp angle",
                curve_type,
                i,
                p2.x,
                p2.y
            );
            out.line_to(p2.x, p2.y)?;
        }
    }

    let last = points[points.len() - 1];
    out.line_to(last.x, last.y)?;
    log::debug!(
        "generated {:?} curves at {} for {} tangent points",
        curve_type,
        speed,
        points.len()
    );
    Ok(out)
}

fn turn_of(delta: f64) -> Turn {
    if delta > 0.0 {
        Turn::Left
    } else {
        Turn::Right
    }
}

/// Circular arc of the minimum radius tangent to both legs.
fn circular_fillet(
    out: &mut AlignmentPath,
    pi: Point,
    h1: f64,
    h2: f64,
    delta: f64,
    criteria: &DesignCriteria,
    max_tangent: f64,
) -> Result<bool, AlignmentError> {
    let radius = criteria.min_radius;
    let tangent = radius * (0.5 * delta.abs()).tan();
    if tangent > max_tangent {
        return Ok(false);
    }
    let pc = pi.offset(h1, -tangent);
    let pt = pi.offset(h2, tangent);
    let center = pc.offset(h1 + delta.signum() * 0.5 * PI, radius);
    out.line_to(pc.x, pc.y)?;
    out.circular_curve_to(pc, pt, center, radius)?;
    Ok(true)
}

/// Symmetric spiral-in/spiral-out pair, each spiral turning half the
/// deflection.
fn spiral_pair(
    out: &mut AlignmentPath,
    pi: Point,
    h1: f64,
    h2: f64,
    delta: f64,
    criteria: &DesignCriteria,
    max_tangent: f64,
) -> Result<bool, AlignmentError> {
    let t_end = (delta.abs() / PI).sqrt();
    let length = criteria
        .min_spiral_length
        .max(criteria.min_radius * delta.abs() / PI.sqrt());
    let scale = length / t_end;
    let turn = turn_of(delta);

    let probe = ClothoidSpiral::new(Point::new(0.0, 0.0), 0.0, length, scale);
    let end = probe.local_at(t_end);
    let tangent = end.x + end.y * (0.5 * delta.abs()).tan();
    if tangent > max_tangent {
        return Ok(false);
    }

    let ts = pi.offset(h1, -tangent);
    let st = pi.offset(h2, tangent);
    let entry = ClothoidSpiral::new(ts, h1, length, scale).turning(turn);
    let exit_turn = match turn {
        Turn::Left => Turn::Right,
        Turn::Right => Turn::Left,
    };
    let exit = ClothoidSpiral::new(st, h2 + PI, length, scale)
        .turning(exit_turn)
        .reversed(true);
    out.line_to(ts.x, ts.y)?;
    out.spiral_to(entry)?;
    out.spiral_to(exit)?;
    Ok(true)
}
