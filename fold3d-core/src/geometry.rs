/// Geometry primitives for the book meshes
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position, normal, and texture coordinates
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32, u: f32, v: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
            uv: [u, v],
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Push a quad as two triangles; vertices wind counter-clockwise
    fn add_quad(&mut self, v0: Vertex, v1: Vertex, v2: Vertex, v3: Vertex) {
        self.add_triangle(Triangle::new(v0, v1, v2));
        self.add_triangle(Triangle::new(v0, v2, v3));
    }

    /// Create an axis-aligned box centered at the origin.
    ///
    /// The front (+z) and back (-z) faces carry the full texture map, with
    /// uv (0, 0) at the top-left corner as seen head-on. The four rim faces
    /// reuse thin strips along the map edges.
    pub fn slab(width: f32, height: f32, depth: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;
        // rim faces sample a sliver of the map edge
        let rim = 0.02;

        let mut mesh = Self::with_capacity(12);

        // Front face (+z)
        mesh.add_quad(
            Vertex::new(-hw, -hh, hd, 0.0, 0.0, 1.0, 0.0, 1.0),
            Vertex::new(hw, -hh, hd, 0.0, 0.0, 1.0, 1.0, 1.0),
            Vertex::new(hw, hh, hd, 0.0, 0.0, 1.0, 1.0, 0.0),
            Vertex::new(-hw, hh, hd, 0.0, 0.0, 1.0, 0.0, 0.0),
        );

        // Back face (-z), mirrored so the map reads correctly from behind
        mesh.add_quad(
            Vertex::new(hw, -hh, -hd, 0.0, 0.0, -1.0, 0.0, 1.0),
            Vertex::new(-hw, -hh, -hd, 0.0, 0.0, -1.0, 1.0, 1.0),
            Vertex::new(-hw, hh, -hd, 0.0, 0.0, -1.0, 1.0, 0.0),
            Vertex::new(hw, hh, -hd, 0.0, 0.0, -1.0, 0.0, 0.0),
        );

        // Top face (+y)
        mesh.add_quad(
            Vertex::new(-hw, hh, hd, 0.0, 1.0, 0.0, 0.0, 0.0),
            Vertex::new(hw, hh, hd, 0.0, 1.0, 0.0, 1.0, 0.0),
            Vertex::new(hw, hh, -hd, 0.0, 1.0, 0.0, 1.0, rim),
            Vertex::new(-hw, hh, -hd, 0.0, 1.0, 0.0, 0.0, rim),
        );

        // Bottom face (-y)
        mesh.add_quad(
            Vertex::new(-hw, -hh, -hd, 0.0, -1.0, 0.0, 0.0, 1.0 - rim),
            Vertex::new(hw, -hh, -hd, 0.0, -1.0, 0.0, 1.0, 1.0 - rim),
            Vertex::new(hw, -hh, hd, 0.0, -1.0, 0.0, 1.0, 1.0),
            Vertex::new(-hw, -hh, hd, 0.0, -1.0, 0.0, 0.0, 1.0),
        );

        // Right face (+x)
        mesh.add_quad(
            Vertex::new(hw, -hh, hd, 1.0, 0.0, 0.0, 1.0 - rim, 1.0),
            Vertex::new(hw, -hh, -hd, 1.0, 0.0, 0.0, 1.0, 1.0),
            Vertex::new(hw, hh, -hd, 1.0, 0.0, 0.0, 1.0, 0.0),
            Vertex::new(hw, hh, hd, 1.0, 0.0, 0.0, 1.0 - rim, 0.0),
        );

        // Left face (-x)
        mesh.add_quad(
            Vertex::new(-hw, -hh, -hd, -1.0, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(-hw, -hh, hd, -1.0, 0.0, 0.0, rim, 1.0),
            Vertex::new(-hw, hh, hd, -1.0, 0.0, 0.0, rim, 0.0),
            Vertex::new(-hw, hh, -hd, -1.0, 0.0, 0.0, 0.0, 0.0),
        );

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
