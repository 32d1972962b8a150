//! High level scene edits. Every edit goes through the undo stack.

use super::commands::{AlignmentGeometry, Command, PointRef};
use super::Scene;
use crate::alignment::{auto_generate_curves, AlignmentPath, CurveType, VerticalAlignment};
use crate::error::SceneError;
use crate::geometry::Point3;
use crate::import::PointRecord;
use crate::items::point::PointAttributes;
use crate::items::{
    AlignmentItem, EditableItem, EditableValue, Item, ItemId, PointGroupItem, PointItem, SceneItem, TerrainItem,
};

impl Scene {
    /// Adds a point group built from `records`. Records with non-finite
    /// coordinates are skipped.
    pub fn import_points(&mut self, name: Option<&str>, records: &[PointRecord]) -> Result<ItemId, SceneError> {
        let color = self.config.colors.point;
        let mut points = Vec::with_capacity(records.len());
        for record in records {
            if !record.is_finite() {
                log::warn!("skipping point '{}' with non-finite coordinates", record.point_number);
                continue;
            }
            let id = self.allocate_id();
            points.push(PointItem::new(
                id,
                &record.point_number,
                &record.description,
                record.position(),
                color,
            ));
        }
        let name = match name {
            Some(n) => n.to_string(),
            None => self.next_group_name(),
        };
        let id = self.allocate_id();
        log::info!("importing {} points into '{name}'", points.len());
        let group = PointGroupItem::new(id, &name, color, points);
        self.add_undo_command(Command::add_item(Item::PointGroup(group)))?;
        Ok(id)
    }

    /// Adds a triangulated surface through `points`.
    pub fn import_surface(&mut self, name: Option<&str>, points: Vec<Point3>) -> Result<ItemId, SceneError> {
        let name = match name {
            Some(n) => n.to_string(),
            None => self.next_terrain_name(),
        };
        let id = self.allocate_id();
        let terrain = TerrainItem::new(id, &name, self.config.colors.terrain, points)?;
        log::info!("surface '{name}' has {} triangles", terrain.triangles().len());
        self.add_undo_command(Command::add_item(Item::Terrain(terrain)))?;
        Ok(id)
    }

    /// Adds an alignment following `path`, sampled with the scene's arc and
    /// spiral sample counts.
    pub fn create_alignment(&mut self, name: Option<&str>, mut path: AlignmentPath) -> Result<ItemId, SceneError> {
        path.set_samples(self.config.arc_samples, self.config.spiral_samples);
        let name = match name {
            Some(n) => n.to_string(),
            None => self.next_alignment_name(),
        };
        let id = self.allocate_id();
        let item = AlignmentItem::new(id, &name, self.config.colors.alignment, path);
        self.add_undo_command(Command::add_item(Item::Alignment(item)))?;
        Ok(id)
    }

    /// Adds an editable value placed at `position`.
    pub fn add_editable(&mut self, name: &str, value: EditableValue, position: Point3) -> Result<ItemId, SceneError> {
        let id = self.allocate_id();
        let item = EditableItem::new(id, name, self.config.colors.editable, value, position);
        self.add_undo_command(Command::add_item(Item::Editable(item)))?;
        Ok(id)
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<(), SceneError> {
        self.add_undo_command(Command::remove_item(id))
    }

    /// Replaces point group `id` with a surface through its points. The new
    /// surface takes the group's place in the list.
    pub fn convert_group_to_surface(&mut self, id: ItemId) -> Result<ItemId, SceneError> {
        let positions = match self.registry.get(id) {
            Some(Item::PointGroup(g)) => g.positions(),
            Some(_) => {
                return Err(SceneError::WrongKind {
                    id,
                    expected: "point group",
                })
            }
            None => return Err(SceneError::UnknownItem(id)),
        };
        let name = self.next_terrain_name();
        let surface_id = self.allocate_id();
        let terrain = TerrainItem::new(surface_id, &name, self.config.colors.terrain, positions)?;
        self.add_undo_command(Command::points_to_surface(id, Item::Terrain(terrain)))?;
        Ok(surface_id)
    }

    /// Replaces surface `id` with a point group of its vertices, numbered
    /// from 1.
    pub fn convert_surface_to_points(&mut self, id: ItemId) -> Result<ItemId, SceneError> {
        let vertices = match self.registry.get(id) {
            Some(Item::Terrain(t)) => t.points().to_vec(),
            Some(_) => {
                return Err(SceneError::WrongKind {
                    id,
                    expected: "surface",
                })
            }
            None => return Err(SceneError::UnknownItem(id)),
        };
        let color = self.config.colors.point;
        let mut points = Vec::with_capacity(vertices.len());
        for (i, v) in vertices.into_iter().enumerate() {
            let point_id = self.allocate_id();
            points.push(PointItem::new(point_id, &(i + 1).to_string(), "", v, color));
        }
        let name = self.next_group_name();
        let group_id = self.allocate_id();
        let group = PointGroupItem::new(group_id, &name, color, points);
        self.add_undo_command(Command::surface_to_points(id, Item::PointGroup(group)))?;
        Ok(group_id)
    }

    /// Changes number, description and position of one point.
    pub fn edit_point(&mut self, target: PointRef, attributes: PointAttributes) -> Result<(), SceneError> {
        self.add_undo_command(Command::edit_point(target, attributes))
    }

    pub fn point_attributes(&self, target: PointRef) -> Result<&PointAttributes, SceneError> {
        let item = self.registry.get(target.item).ok_or(SceneError::UnknownItem(target.item))?;
        match (item, target.member) {
            (Item::Point(p), None) => Ok(p.attributes()),
            (Item::PointGroup(g), Some(member)) => g
                .point(member)
                .map(PointItem::attributes)
                .ok_or(SceneError::UnknownMember { id: target.item, member }),
            _ => Err(SceneError::WrongKind {
                id: target.item,
                expected: if target.member.is_some() { "point group" } else { "point" },
            }),
        }
    }

    /// Replaces the horizontal path of alignment `id`, keeping its profile.
    pub fn edit_alignment(&mut self, id: ItemId, mut path: AlignmentPath) -> Result<(), SceneError> {
        path.set_samples(self.config.arc_samples, self.config.spiral_samples);
        let vertical = self.alignment_geometry(id)?.vertical;
        self.add_undo_command(Command::edit_alignment(id, AlignmentGeometry { path, vertical }))
    }

    /// Sets or removes the vertical profile of alignment `id`.
    pub fn set_alignment_profile(&mut self, id: ItemId, vertical: Option<VerticalAlignment>) -> Result<(), SceneError> {
        let path = self.alignment_geometry(id)?.path;
        self.add_undo_command(Command::edit_alignment(id, AlignmentGeometry { path, vertical }))
    }

    /// Rebuilds alignment `id` with curves designed for `speed`.
    pub fn generate_curves(&mut self, id: ItemId, speed: f64, curve_type: CurveType) -> Result<(), SceneError> {
        let old = self.alignment_geometry(id)?;
        let path = auto_generate_curves(&old.path, speed, curve_type)?;
        log::info!(
            "generated {:?} curves for alignment {id} at speed {speed}: {} segments",
            curve_type,
            path.segment_count()
        );
        let new = AlignmentGeometry {
            path,
            vertical: old.vertical,
        };
        self.add_undo_command(Command::edit_alignment(id, new))
    }

    /// Stores a new value in editable item `id`. The value must have the
    /// item's input type.
    pub fn set_value(&mut self, id: ItemId, value: EditableValue) -> Result<(), SceneError> {
        let current = match self.registry.get(id) {
            Some(Item::Editable(e)) => e.input_type(),
            Some(_) => {
                return Err(SceneError::WrongKind {
                    id,
                    expected: "editable value",
                })
            }
            None => return Err(SceneError::UnknownItem(id)),
        };
        if current != value.input_type() {
            return Err(SceneError::ValueType {
                id,
                expected: current.name(),
            });
        }
        self.add_undo_command(Command::edit_value(id, value))
    }

    /// Renames item `id`. Not recorded in the undo history.
    pub fn rename_item(&mut self, id: ItemId, name: &str) -> Result<(), SceneError> {
        let item = self.registry.get_mut(id).ok_or(SceneError::UnknownItem(id))?;
        item.set_name(name);
        Ok(())
    }

    fn alignment_geometry(&self, id: ItemId) -> Result<AlignmentGeometry, SceneError> {
        match self.registry.get(id) {
            Some(Item::Alignment(a)) => Ok(AlignmentGeometry {
                path: a.path().clone(),
                vertical: a.vertical().cloned(),
            }),
            Some(_) => Err(SceneError::WrongKind {
                id,
                expected: "alignment",
            }),
            None => Err(SceneError::UnknownItem(id)),
        }
    }
}
