use std::sync::Arc;

use crate::config::SceneConfig;
use crate::error::GraphicsError;
use crate::geometry::{models, StaticMesh};
use crate::shader::ShaderProgram;

use super::{Drawable, DrawableId, DrawableSet, Placement};

/// The demo scene: a tree at the origin flanked by ship instances.
#[derive(Debug, Clone)]
pub struct StandardScene {
    pub drawables: DrawableSet,
    pub tree: DrawableId,
    pub ship: DrawableId,
    /// Draw order: tree first, then one entry per ship offset.
    pub placements: Vec<Placement>,
}

/// Validates the built-in meshes and links the shared program.
pub fn standard_scene(config: &SceneConfig) -> Result<StandardScene, GraphicsError> {
    let program = Arc::new(ShaderProgram::passthrough("passthrough")?);

    let tree_mesh = Arc::new(StaticMesh::new(&models::TREE)?);
    let ship_mesh = Arc::new(StaticMesh::new(&models::SHIP)?);

    let mut drawables = DrawableSet::new();
    let tree = drawables.add(Drawable::new(
        "tree",
        tree_mesh,
        Arc::clone(&program),
        config.model_color,
    ));
    let ship = drawables.add(Drawable::new(
        "ship",
        ship_mesh,
        program,
        config.model_color,
    ));

    let placements = std::iter::once(Placement::at_origin(tree))
        .chain(config.ship_offsets.iter().map(|&o| Placement::translated(ship, o)))
        .collect();

    Ok(StandardScene {
        drawables,
        tree,
        ship,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawables_share_one_program() {
        let scene = standard_scene(&SceneConfig::default()).unwrap();
        let tree = scene.drawables.get(scene.tree).unwrap();
        let ship = scene.drawables.get(scene.ship).unwrap();
        assert!(Arc::ptr_eq(tree.program(), ship.program()));
        assert_eq!(tree.name(), "tree");
        assert_eq!(ship.name(), "ship");
    }

    #[test]
    fn placements_follow_config_order() {
        let scene = standard_scene(&SceneConfig::default()).unwrap();
        assert_eq!(scene.placements.len(), 3);
        assert_eq!(scene.placements[0], Placement::at_origin(scene.tree));
        assert_eq!(
            scene.placements[1],
            Placement::translated(scene.ship, glam::Vec3::new(0.0, 0.0, 4.0))
        );
        assert_eq!(
            scene.placements[2],
            Placement::translated(scene.ship, glam::Vec3::new(0.0, 0.0, -4.0))
        );
    }
}
