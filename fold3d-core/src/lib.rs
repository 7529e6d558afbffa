/// Fold3D Core Library - Interactive 3D book widget
///
/// This library provides the stateless core functionality for the book
/// widget: texture composition (image + text page maps), book geometry and
/// scene graph construction, the hinge open/close state machine, and the
/// per-frame driver that couples easing to the scene transforms.

pub mod driver;
pub mod geometry;
pub mod hinge;
pub mod projection;
pub mod scene;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use driver::BookDriver;
pub use geometry::{Mesh, Triangle, Vertex};
pub use hinge::HingeState;
pub use projection::Camera;
pub use scene::{build_book, BookDimensions, BookGraph, BookMaterials, NodeId, Scene};
pub use texture::{compose, load_base_image, Material, TextureError};
pub use transform::Transform;
