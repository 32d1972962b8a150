//! Horizontal alignment paths built from replayable segments.
//!
//! The segment list is the only state that matters: the sampled polyline is
//! rebuilt from it by replaying every segment in order, so two paths with
//! equal segments always produce the same polyline.

pub mod curves;
pub mod design;
pub mod vertical;

pub use curves::{auto_generate_curves, CurveType};
pub use design::DesignCriteria;
pub use vertical::{VerticalAlignment, VerticalElement};

use crate::error::AlignmentError;
use crate::geometry::{arc_through, distance, sample_arc, ClothoidSpiral, Point, Polyline};

const DEFAULT_SAMPLES: usize = 100;

/// Elements of a horizontal path.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Segment {
    StartPosition(Point),
    /// Straight line to the given end point.
    Line(Point),
    CircularArc {
        start: Point,
        end: Point,
        center: Point,
        radius: f64,
    },
    ClothoidSpiral(ClothoidSpiral),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    StartPosition,
    Line,
    CircularArc,
    ClothoidSpiral,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::StartPosition(_) => SegmentKind::StartPosition,
            Segment::Line(_) => SegmentKind::Line,
            Segment::CircularArc { .. } => SegmentKind::CircularArc,
            Segment::ClothoidSpiral(_) => SegmentKind::ClothoidSpiral,
        }
    }

    fn is_valid(&self) -> bool {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        match self {
            Segment::StartPosition(p) | Segment::Line(p) => finite(p),
            Segment::CircularArc {
                start,
                end,
                center,
                radius,
            } => {
                finite(start)
                    && finite(end)
                    && finite(center)
                    && radius.is_finite()
                    && *radius > f64::EPSILON
                    && distance(*start, *end) > f64::EPSILON
            }
            Segment::ClothoidSpiral(s) => {
                finite(&s.start)
                    && s.heading.is_finite()
                    && s.length.is_finite()
                    && s.scale.is_finite()
                    && s.length > 0.0
                    && s.scale > 0.0
            }
        }
    }
}

/// Builder state of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Empty,
    Open,
}

impl PathState {
    fn name(self) -> &'static str {
        match self {
            PathState::Empty => "empty",
            PathState::Open => "open",
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PathData {
    segments: Vec<Segment>,
    #[serde(default = "default_samples")]
    arc_samples: usize,
    #[serde(default = "default_samples")]
    spiral_samples: usize,
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

/// Ordered horizontal path: one start position followed by lines, arcs and
/// spirals.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PathData", into = "PathData")]
pub struct AlignmentPath {
    segments: Vec<Segment>,
    polyline: Vec<Point>,
    arc_samples: usize,
    spiral_samples: usize,
}

impl Default for AlignmentPath {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentPath {
    pub fn new() -> Self {
        Self::with_samples(DEFAULT_SAMPLES, DEFAULT_SAMPLES)
    }

    /// Empty path sampling arcs and spirals with the given point counts.
    pub fn with_samples(arc_samples: usize, spiral_samples: usize) -> Self {
        Self {
            segments: Vec::new(),
            polyline: Vec::new(),
            arc_samples: arc_samples.max(2),
            spiral_samples: spiral_samples.max(2),
        }
    }

    /// Builds a path from an existing segment list.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, AlignmentError> {
        let mut path = Self::new();
        path.set_segments(segments)?;
        Ok(path)
    }

    /// Replaces every segment and rebuilds. The first segment must be the
    /// only start position.
    pub fn set_segments(&mut self, segments: Vec<Segment>) -> Result<(), AlignmentError> {
        if !segments.is_empty() {
            let starts = segments
                .iter()
                .filter(|s| s.kind() == SegmentKind::StartPosition)
                .count();
            if starts != 1 || segments[0].kind() != SegmentKind::StartPosition {
                return Err(AlignmentError::MissingStart);
            }
            if let Some(bad) = segments.iter().find(|s| !s.is_valid()) {
                return Err(AlignmentError::DegenerateSegment { kind: bad.kind() });
            }
        }
        self.segments = segments;
        self.rebuild();
        Ok(())
    }

    pub fn state(&self) -> PathState {
        if self.segments.is_empty() {
            PathState::Empty
        } else {
            PathState::Open
        }
    }

    fn require(&self, state: PathState, op: &'static str) -> Result<(), AlignmentError> {
        let current = self.state();
        if current == state {
            Ok(())
        } else {
            Err(AlignmentError::InvalidState {
                op,
                state: current.name(),
            })
        }
    }

    fn push(&mut self, segment: Segment) -> Result<(), AlignmentError> {
        if !segment.is_valid() {
            return Err(AlignmentError::DegenerateSegment {
                kind: segment.kind(),
            });
        }
        self.segments.push(segment);
        self.replay(&segment);
        Ok(())
    }

    /// Sets the start position of an empty path.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), AlignmentError> {
        self.require(PathState::Empty, "move_to")?;
        self.push(Segment::StartPosition(Point::new(x, y)))
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> Result<(), AlignmentError> {
        self.require(PathState::Open, "line_to")?;
        self.push(Segment::Line(Point::new(x, y)))
    }

    /// Arc from the current point to `(x, y)`, its pivot offset from the
    /// chord midpoint by `chord * curvature`. See [`arc_through`].
    pub fn arc_to(&mut self, x: f64, y: f64, curvature: f64) -> Result<(), AlignmentError> {
        self.require(PathState::Open, "arc_to")?;
        let start = self.current_point().ok_or(AlignmentError::MissingStart)?;
        let fit = arc_through(start, Point::new(x, y), curvature).ok_or(
            AlignmentError::DegenerateSegment {
                kind: SegmentKind::CircularArc,
            },
        )?;
        self.push(Segment::CircularArc {
            start: fit.start,
            end: fit.end,
            center: fit.center,
            radius: fit.radius,
        })
    }

    /// Arc given by its end points, pivot and radius.
    pub fn circular_curve_to(
        &mut self,
        start: Point,
        end: Point,
        center: Point,
        radius: f64,
    ) -> Result<(), AlignmentError> {
        self.require(PathState::Open, "circular_curve_to")?;
        self.push(Segment::CircularArc {
            start,
            end,
            center,
            radius,
        })
    }

    pub fn spiral_to(&mut self, spiral: ClothoidSpiral) -> Result<(), AlignmentError> {
        self.require(PathState::Open, "spiral_to")?;
        self.push(Segment::ClothoidSpiral(spiral))
    }

    /// Discards every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.polyline.clear();
    }

    /// Changes the sample counts and rebuilds the polyline.
    pub fn set_samples(&mut self, arc_samples: usize, spiral_samples: usize) {
        let (arc_samples, spiral_samples) = (arc_samples.max(2), spiral_samples.max(2));
        if (arc_samples, spiral_samples) != (self.arc_samples, self.spiral_samples) {
            self.arc_samples = arc_samples;
            self.spiral_samples = spiral_samples;
            self.rebuild();
        }
    }

    /// Replaces the parameters of segment `index` and rebuilds the path.
    /// The segment kind cannot change.
    ///
    /// Segments keep their own stored coordinates: an arc still starts at its
    /// stored `start` after the segment before it moves, so the polyline can
    /// jump between the two. Move the arc with its neighbour when the path
    /// must stay continuous.
    pub fn modify_segment(&mut self, index: usize, segment: Segment) -> Result<(), AlignmentError> {
        let len = self.segments.len();
        let current = self
            .segments
            .get(index)
            .ok_or(AlignmentError::IndexOutOfRange { index, len })?;
        if current.kind() != segment.kind() {
            return Err(AlignmentError::KindMismatch {
                found: current.kind(),
                given: segment.kind(),
            });
        }
        if !segment.is_valid() {
            return Err(AlignmentError::DegenerateSegment {
                kind: segment.kind(),
            });
        }
        self.segments[index] = segment;
        self.rebuild();
        Ok(())
    }

    /// Regenerates the polyline by replaying every segment from scratch.
    pub fn rebuild(&mut self) {
        self.polyline.clear();
        for i in 0..self.segments.len() {
            let segment = self.segments[i];
            self.replay(&segment);
        }
        log::debug!(
            "rebuilt alignment path: {} segments, {} vertices",
            self.segments.len(),
            self.polyline.len()
        );
    }

    fn replay(&mut self, segment: &Segment) {
        match *segment {
            Segment::StartPosition(p) | Segment::Line(p) => self.push_vertex(p),
            Segment::CircularArc {
                start,
                end,
                center,
                radius,
            } => {
                for p in sample_arc(start, end, center, radius, self.arc_samples) {
                    self.push_vertex(p);
                }
            }
            Segment::ClothoidSpiral(spiral) => {
                for p in spiral.points(self.spiral_samples) {
                    self.push_vertex(p);
                }
            }
        }
    }

    fn push_vertex(&mut self, p: Point) {
        if self.polyline.last() != Some(&p) {
            self.polyline.push(p);
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Sampled polyline vertices.
    pub fn vertices(&self) -> &[Point] {
        &self.polyline
    }

    pub fn element_count(&self) -> usize {
        self.polyline.len()
    }

    /// Polyline vertex `i`.
    pub fn coord_at(&self, i: usize) -> Option<Point> {
        self.polyline.get(i).copied()
    }

    /// Last point of the path.
    pub fn current_point(&self) -> Option<Point> {
        self.polyline.last().copied()
    }

    /// Length of the sampled polyline.
    pub fn length(&self) -> f64 {
        Polyline::new(self.polyline.clone()).length()
    }

    /// Cumulative station at every polyline vertex.
    pub fn stations(&self) -> Vec<f64> {
        Polyline::new(self.polyline.clone()).stations()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn arc_samples(&self) -> usize {
        self.arc_samples
    }

    pub fn spiral_samples(&self) -> usize {
        self.spiral_samples
    }

    /// End points of the start position and line segments, in order.
    pub fn tangent_points(&self) -> Vec<Point> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::StartPosition(p) | Segment::Line(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl TryFrom<PathData> for AlignmentPath {
    type Error = AlignmentError;

    fn try_from(data: PathData) -> Result<Self, Self::Error> {
        let mut path = AlignmentPath::with_samples(data.arc_samples, data.spiral_samples);
        path.set_segments(data.segments)?;
        Ok(path)
    }
}

impl From<AlignmentPath> for PathData {
    fn from(path: AlignmentPath) -> Self {
        PathData {
            segments: path.segments,
            arc_samples: path.arc_samples,
            spiral_samples: path.spiral_samples,
        }
    }
}

impl std::fmt::Display for PathState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
