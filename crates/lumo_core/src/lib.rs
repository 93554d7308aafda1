//! Lumo Core - Asset model for the lumo path tracer.
//!
//! This crate provides:
//!
//! - **Asset types**: `Mesh`, `Material`
//! - **Wavefront support**: OBJ and MTL parsing, mesh loading with a material policy
//! - **Scene descriptions**: JSON files listing meshes, camera and render settings
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::SceneDescription;
//!
//! let description = SceneDescription::load("scenes/cornell/scene.json")?;
//! let meshes = description.load_meshes()?;
//! println!("Loaded {} meshes", meshes.len());
//! ```

pub mod material;
pub mod mesh;
pub mod scene_file;
pub mod wavefront;

// Re-export commonly used types
pub use material::Material;
pub use mesh::{Face, Mesh};
pub use scene_file::{CameraDescription, RenderSettings, SceneDescription, SceneFileError};
pub use wavefront::{load_mesh, load_mesh_from_str, LoadError, LoadResult, MaterialPolicy};
