//! Wavefront OBJ/MTL ingestion.
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::wavefront::{load_mesh, MaterialPolicy};
//!
//! let mesh = load_mesh("scenes/cornell/light.obj", MaterialPolicy::Strict)?;
//! println!("{}: {} triangles", mesh.name(), mesh.triangle_count());
//! ```

mod loader;
mod mtl;
mod parser;

pub use loader::{load_material, load_mesh, load_mesh_from_str, LoadError, LoadResult, MaterialPolicy};
pub use mtl::{parse_mtl, MaterialLibrary};
pub use parser::{parse_obj, ObjModel, ObjParser, ParseError, ParseResult};
