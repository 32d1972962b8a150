use super::{ItemId, ItemState, SceneItem, TerrainItem};
use crate::alignment::{AlignmentPath, VerticalAlignment};
use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::geometry::Point3;
use crate::render::{DrawMode, RenderContext};

/// Road alignment: a horizontal path with an optional profile.
#[derive(Debug, Clone)]
pub struct AlignmentItem {
    state: ItemState,
    path: AlignmentPath,
    vertical: Option<VerticalAlignment>,
    buffer: Vec<Point3>,
    dirty: bool,
}

impl AlignmentItem {
    pub(crate) fn new(id: ItemId, name: &str, color: Rgba, path: AlignmentPath) -> Self {
        Self {
            state: ItemState::new(id, name, color),
            path,
            vertical: None,
            buffer: Vec::new(),
            dirty: true,
        }
    }

    pub fn path(&self) -> &AlignmentPath {
        &self.path
    }

    pub fn set_path(&mut self, path: AlignmentPath) {
        self.path = path;
        self.dirty = true;
    }

    pub fn vertical(&self) -> Option<&VerticalAlignment> {
        self.vertical.as_ref()
    }

    pub fn set_vertical(&mut self, vertical: Option<VerticalAlignment>) {
        self.vertical = vertical;
        self.dirty = true;
    }

    /// 3D vertices of the path, z taken from the profile (0 without one).
    pub fn vertices_3d(&self) -> Vec<Point3> {
        let stations = self.path.stations();
        self.path
            .vertices()
            .iter()
            .zip(stations)
            .map(|(p, s)| {
                let z = self
                    .vertical
                    .as_ref()
                    .and_then(|v| v.elevation_at(s))
                    .unwrap_or(0.0);
                Point3::new(p.x, p.y, z)
            })
            .collect()
    }

    /// `(station, elevation)` of the terrain under every path vertex.
    /// Vertices off the surface are skipped.
    pub fn ground_profile(&self, terrain: &TerrainItem) -> Vec<(f64, f64)> {
        self.path
            .vertices()
            .iter()
            .zip(self.path.stations())
            .filter_map(|(p, s)| terrain.elevation_at(p.x, p.y).map(|z| (s, z)))
            .collect()
    }
}

impl SceneItem for AlignmentItem {
    fn state(&self) -> &ItemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    fn update(&mut self) {
        self.buffer = self.vertices_3d();
        self.dirty = false;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn render(&mut self, ctx: &mut dyn RenderContext, config: &SceneConfig, override_color: Option<Rgba>) {
        if !self.state.visible {
            return;
        }
        if self.dirty {
            self.update();
        }
        let color = self.state.display_color(config, override_color);
        ctx.draw(DrawMode::LineStrip, &self.buffer, color);
    }

    fn pos(&self) -> Point3 {
        self.path
            .coord_at(0)
            .map(|p| Point3::new(p.x, p.y, 0.0))
            .unwrap_or(Point3::new(0.0, 0.0, 0.0))
    }

    fn mesh_points(&self) -> Vec<Point3> {
        self.path
            .vertices()
            .iter()
            .map(|p| Point3::new(p.x, p.y, 0.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> AlignmentPath {
        let mut path = AlignmentPath::new();
        path.move_to(0.0, 5.0).unwrap();
        path.line_to(10.0, 5.0).unwrap();
        path.line_to(30.0, 5.0).unwrap();
        path
    }

    #[test]
    fn profile_drives_z() {
        let mut a = AlignmentItem::new(ItemId(1), "Alignment #1", Rgba::BLACK, straight());
        assert!(a.vertices_3d().iter().all(|p| p.z == 0.0));
        a.set_vertical(Some(VerticalAlignment::from_stations(&[(0.0, 100.0), (30.0, 103.0)])));
        let z: Vec<f64> = a.vertices_3d().iter().map(|p| p.z).collect();
        assert!((z[1] - 101.0).abs() < 1e-9);
        assert!((z[2] - 103.0).abs() < 1e-9);
    }

    #[test]
    fn ground_profile_skips_off_surface_vertices() {
        let terrain = TerrainItem::new(
            ItemId(2),
            "t",
            Rgba::BLACK,
            vec![
                Point3::new(-1.0, 0.0, 10.0),
                Point3::new(20.0, 0.0, 10.0),
                Point3::new(20.0, 10.0, 20.0),
                Point3::new(-1.0, 10.0, 20.0),
            ],
        )
        .unwrap();
        let a = AlignmentItem::new(ItemId(1), "a", Rgba::BLACK, straight());
        let profile = a.ground_profile(&terrain);
        assert_eq!(profile.len(), 2);
        assert!((profile[0].0).abs() < 1e-9);
        assert!((profile[0].1 - 15.0).abs() < 1e-9);
        assert!((profile[1].0 - 10.0).abs() < 1e-9);
    }
}
