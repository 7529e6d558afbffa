/// Scene graph for the book: spine -> hinge pivots -> cover and page slabs
use nalgebra::{Matrix4, Vector3};
use tracing::debug;

use crate::geometry::Mesh;
use crate::texture::Material;
use crate::transform::Transform;

/// Gap between a cover and its inner page along the depth axis
const PAGE_LIFT: f32 = 1e-3;
/// Inset of a page from its cover on width and height
const PAGE_INSET: f32 = 0.02;

/// Handle to a node in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    position: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    mesh: Option<(Mesh, Material)>,
}

/// Index-arena scene graph with yaw/pitch node transforms
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or as a root) at a local position
    pub fn add_node(&mut self, parent: Option<NodeId>, position: Vector3<f32>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            position,
            yaw: 0.0,
            pitch: 0.0,
            parent,
            children: Vec::new(),
            mesh: None,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Assign a mesh and its material to a node. The material is owned by
    /// this node alone from here on.
    pub fn attach_mesh(&mut self, id: NodeId, mesh: Mesh, material: Material) {
        self.nodes[id.0].mesh = Some((mesh, material));
    }

    pub fn set_yaw(&mut self, id: NodeId, yaw: f32) {
        self.nodes[id.0].yaw = yaw;
    }

    pub fn yaw(&self, id: NodeId) -> f32 {
        self.nodes[id.0].yaw
    }

    pub fn set_pitch(&mut self, id: NodeId, pitch: f32) {
        self.nodes[id.0].pitch = pitch;
    }

    pub fn pitch(&self, id: NodeId) -> f32 {
        self.nodes[id.0].pitch
    }

    pub fn position(&self, id: NodeId) -> Vector3<f32> {
        self.nodes[id.0].position
    }

    fn local_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let node = &self.nodes[id.0];
        Transform::node_matrix(&node.position, node.yaw, node.pitch)
    }

    /// World matrix for a node, composed root-down
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        match self.nodes[id.0].parent {
            Some(parent) => self.world_matrix(parent) * self.local_matrix(id),
            None => self.local_matrix(id),
        }
    }

    /// Depth-first traversal yielding the world matrix, mesh, and material
    /// of every mesh-bearing node
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&Matrix4<f32>, &Mesh, &Material),
    {
        for root in &self.roots {
            self.visit_node(*root, &Matrix4::identity(), &mut f);
        }
    }

    fn visit_node<F>(&self, id: NodeId, parent_matrix: &Matrix4<f32>, f: &mut F)
    where
        F: FnMut(&Matrix4<f32>, &Mesh, &Material),
    {
        let world = parent_matrix * self.local_matrix(id);
        if let Some((mesh, material)) = &self.nodes[id.0].mesh {
            f(&world, mesh, material);
        }
        for child in &self.nodes[id.0].children {
            self.visit_node(*child, &world, f);
        }
    }
}

/// Book dimensions in scene units
#[derive(Debug, Clone, Copy)]
pub struct BookDimensions {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
}

impl Default for BookDimensions {
    fn default() -> Self {
        Self {
            width: 2.4,
            height: 1.6,
            thickness: 0.02,
        }
    }
}

/// Composited materials for the four book faces, consumed by the builder
#[derive(Debug)]
pub struct BookMaterials {
    pub cover_front: Material,
    pub cover_back: Material,
    pub page_left: Material,
    pub page_right: Material,
}

/// Handles into the built book graph
#[derive(Debug, Clone, Copy)]
pub struct BookGraph {
    pub spine: NodeId,
    pub left_pivot: NodeId,
    pub right_pivot: NodeId,
}

/// Build the fixed book hierarchy:
/// spine -> { left group -> left pivot -> cover + page,
///            right group -> right pivot -> cover + page }.
///
/// Both pivots sit at the spine origin; each half's meshes are centered a
/// quarter book-width out, so rotating a pivot swings its half around the
/// spine. The graph holds no interaction state.
pub fn build_book(scene: &mut Scene, dims: BookDimensions, materials: BookMaterials) -> BookGraph {
    let half_width = dims.width / 2.0;
    let cover_x = half_width / 2.0;

    let spine = scene.add_node(None, Vector3::zeros());

    let right_group = scene.add_node(Some(spine), Vector3::zeros());
    let right_pivot = scene.add_node(Some(right_group), Vector3::zeros());
    let left_group = scene.add_node(Some(spine), Vector3::zeros());
    let left_pivot = scene.add_node(Some(left_group), Vector3::zeros());

    let cover_mesh = Mesh::slab(half_width, dims.height, dims.thickness);
    let page_mesh = Mesh::slab(
        half_width - PAGE_INSET,
        dims.height - PAGE_INSET,
        dims.thickness / 2.0,
    );
    let page_z = dims.thickness + PAGE_LIFT;

    let right_cover = scene.add_node(Some(right_pivot), Vector3::new(cover_x, 0.0, 0.0));
    scene.attach_mesh(right_cover, cover_mesh.clone(), materials.cover_front);
    let right_page = scene.add_node(Some(right_pivot), Vector3::new(cover_x, 0.0, page_z));
    scene.attach_mesh(right_page, page_mesh.clone(), materials.page_right);

    let left_cover = scene.add_node(Some(left_pivot), Vector3::new(-cover_x, 0.0, 0.0));
    scene.attach_mesh(left_cover, cover_mesh, materials.cover_back);
    let left_page = scene.add_node(Some(left_pivot), Vector3::new(-cover_x, 0.0, page_z));
    scene.attach_mesh(left_page, page_mesh, materials.page_left);

    debug!(
        width = dims.width,
        height = dims.height,
        thickness = dims.thickness,
        "book graph built"
    );

    BookGraph {
        spine,
        left_pivot,
        right_pivot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn materials() -> BookMaterials {
        BookMaterials {
            cover_front: Material::solid([139, 0, 0, 255]),
            cover_back: Material::solid([51, 51, 51, 255]),
            page_left: Material::solid([255, 255, 255, 255]),
            page_right: Material::solid([255, 248, 225, 255]),
        }
    }

    #[test]
    fn test_pivots_sit_at_spine_origin() {
        let mut scene = Scene::new();
        let graph = build_book(&mut scene, BookDimensions::default(), materials());
        assert_eq!(scene.position(graph.left_pivot), Vector3::zeros());
        assert_eq!(scene.position(graph.right_pivot), Vector3::zeros());
        let world = scene.world_matrix(graph.right_pivot);
        assert!((world - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_halves_mirror_around_spine() {
        let mut scene = Scene::new();
        build_book(&mut scene, BookDimensions::default(), materials());

        let mut xs: Vec<f32> = Vec::new();
        scene.visit(|world, _, _| xs.push(world[(0, 3)]));
        assert_eq!(xs.len(), 4);
        // covers and pages centered a quarter book-width out on each side
        assert!(xs.iter().filter(|x| (**x - 0.6).abs() < 1e-6).count() == 2);
        assert!(xs.iter().filter(|x| (**x + 0.6).abs() < 1e-6).count() == 2);
    }

    #[test]
    fn test_pages_lift_off_their_covers() {
        let mut scene = Scene::new();
        let dims = BookDimensions::default();
        build_book(&mut scene, dims, materials());

        let mut zs: Vec<f32> = Vec::new();
        scene.visit(|world, _, _| zs.push(world[(2, 3)]));
        let lifted = zs
            .iter()
            .filter(|z| (**z - (dims.thickness + 1e-3)).abs() < 1e-6)
            .count();
        assert_eq!(lifted, 2);
    }

    #[test]
    fn test_pivot_rotation_swings_the_cover() {
        let mut scene = Scene::new();
        let graph = build_book(&mut scene, BookDimensions::default(), materials());

        scene.set_yaw(graph.right_pivot, -FRAC_PI_2);
        let mut positions = Vec::new();
        scene.visit(|world, _, _| positions.push((world[(0, 3)], world[(2, 3)])));
        // the right half rotated out of the x axis toward the viewer
        let swung = positions
            .iter()
            .filter(|(x, z)| x.abs() < 1e-6 && *z > 0.5)
            .count();
        assert!(swung >= 1, "right cover should swing toward +z");
    }

    #[test]
    fn test_spine_idle_rotation_carries_both_halves() {
        let mut scene = Scene::new();
        let graph = build_book(&mut scene, BookDimensions::default(), materials());
        scene.set_yaw(graph.spine, 0.1);
        let left = scene.world_matrix(graph.left_pivot);
        let right = scene.world_matrix(graph.right_pivot);
        assert!((left - right).norm() < 1e-6);
    }
}
