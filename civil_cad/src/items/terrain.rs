use super::{ItemId, ItemState, SceneItem};
use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::error::TerrainError;
use crate::geometry::{Point3, Triangulation};
use crate::render::{DrawMode, RenderContext};

/// Triangulated surface over a set of sample points.
#[derive(Debug, Clone)]
pub struct TerrainItem {
    state: ItemState,
    triangulation: Triangulation,
    faces: Vec<Point3>,
    edges: Vec<Point3>,
    dirty: bool,
}

impl TerrainItem {
    /// Triangulates `points`. Fewer than three points, or points that are
    /// all collinear, cannot form a surface.
    pub(crate) fn new(id: ItemId, name: &str, color: Rgba, points: Vec<Point3>) -> Result<Self, TerrainError> {
        Ok(Self {
            state: ItemState::new(id, name, color),
            triangulation: Triangulation::new(points)?,
            faces: Vec::new(),
            edges: Vec::new(),
            dirty: true,
        })
    }

    pub fn points(&self) -> &[Point3] {
        self.triangulation.vertices()
    }

    /// Replaces the sample points, retriangulating immediately. On error the
    /// surface is left unchanged.
    pub fn set_points(&mut self, points: Vec<Point3>) -> Result<(), TerrainError> {
        self.triangulation = Triangulation::new(points)?;
        self.dirty = true;
        Ok(())
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        self.triangulation.triangles()
    }

    pub fn hull_edges(&self) -> Vec<(usize, usize)> {
        self.triangulation.hull_edges()
    }

    /// Surface elevation at `(x, y)`, `None` outside the surface.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        self.triangulation.elevation_at(x, y)
    }
}

impl SceneItem for TerrainItem {
    fn state(&self) -> &ItemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    fn update(&mut self) {
        self.faces = self.triangulation.vertex_buffer();
        let v = self.triangulation.vertices();
        self.edges = self
            .triangulation
            .triangles()
            .iter()
            .flat_map(|t| [v[t[0]], v[t[1]], v[t[1]], v[t[2]], v[t[2]], v[t[0]]])
            .collect();
        log::debug!("rebuilt terrain '{}' buffers", self.state.name);
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
        // the pick pass always fills so the whole surface is clickable
        if config.wireframe && override_color.is_none() {
            ctx.draw(DrawMode::Lines, &self.edges, color);
        } else {
            ctx.draw(DrawMode::Triangles, &self.faces, color);
        }
    }

    fn pos(&self) -> Point3 {
        self.triangulation.vertices()[0]
    }

    fn mesh_points(&self) -> Vec<Point3> {
        self.triangulation.vertices().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(10.0, 0.0, 2.0),
            Point3::new(10.0, 10.0, 3.0),
            Point3::new(0.0, 10.0, 2.0),
        ]
    }

    #[test]
    fn needs_three_points() {
        let err = TerrainItem::new(ItemId(1), "t", Rgba::BLACK, square()[..2].to_vec()).unwrap_err();
        assert_eq!(err, TerrainError::InsufficientPoints { found: 2 });
    }

    #[test]
    fn failed_update_keeps_surface() {
        let mut t = TerrainItem::new(ItemId(1), "t", Rgba::BLACK, square()).unwrap();
        assert!(t.set_points(vec![Point3::new(0.0, 0.0, 0.0)]).is_err());
        assert_eq!(t.points().len(), 4);
        assert!(t.elevation_at(5.0, 5.0).is_some());
    }

    #[test]
    fn wireframe_draws_edges() {
        let mut cfg = SceneConfig::default();
        let mut t = TerrainItem::new(ItemId(1), "t", Rgba::BLACK, square()).unwrap();
        let mut list = DrawList::default();
        t.render(&mut list, &cfg, None);
        assert_eq!(list.calls[0].mode, DrawMode::Lines);
        assert_eq!(list.calls[0].vertices.len(), t.triangles().len() * 6);

        cfg.wireframe = false;
        let mut list = DrawList::default();
        t.render(&mut list, &cfg, None);
        assert_eq!(list.calls[0].mode, DrawMode::Triangles);
    }
}
