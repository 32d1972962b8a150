use thiserror::Error;

use crate::alignment::SegmentKind;
use crate::items::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("a surface needs at least 3 points, found {found}")]
    InsufficientPoints { found: usize },
    #[error("all points are collinear or coincident")]
    Degenerate,
    #[error("point {index} has a non-finite coordinate")]
    InvalidPoint { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignmentError {
    #[error("{op} is not allowed while the path is {state}")]
    InvalidState { op: &'static str, state: &'static str },
    #[error("segment index {index} out of range for {len} segments")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot replace a {found:?} segment with a {given:?} segment")]
    KindMismatch { found: SegmentKind, given: SegmentKind },
    #[error("{kind:?} segment has degenerate parameters")]
    DegenerateSegment { kind: SegmentKind },
    #[error("a path must start with exactly one start position")]
    MissingStart,
    #[error("curve generation needs at least 2 vertices, found {found}")]
    NotEnoughVertices { found: usize },
    #[error("design speed {speed} gives no usable curve criteria")]
    InvalidDesignSpeed { speed: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("no item with id {0}")]
    UnknownItem(ItemId),
    #[error("item {0} is already in the scene")]
    DuplicateItem(ItemId),
    #[error("item {id} is not a {expected}")]
    WrongKind { id: ItemId, expected: &'static str },
    #[error("point group {id} has no member {member}")]
    UnknownMember { id: ItemId, member: usize },
    #[error("item {id} expects a {expected} value")]
    ValueType { id: ItemId, expected: &'static str },
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}
