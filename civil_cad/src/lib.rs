//! Geometry, alignment design and scene management for civil engineering
//! drawings.

pub mod alignment;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod import;
pub mod items;
pub mod render;
pub mod scene;

pub use alignment::{AlignmentPath, CurveType, PathState, Segment, SegmentKind};
pub use color::Rgba;
pub use config::SceneConfig;
pub use error::{AlignmentError, SceneError, TerrainError};
pub use geometry::{Point, Point3};
pub use import::PointRecord;
pub use items::{Item, ItemId, SceneItem};
pub use scene::{Command, PointRef, Scene};
