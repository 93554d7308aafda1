//! Build `Mesh` values from OBJ files and their material libraries.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::mtl::{parse_mtl, MaterialLibrary};
use super::parser::{parse_obj, ObjModel, ParseError};
use crate::material::Material;
use crate::mesh::Mesh;

/// What to do when a mesh's material cannot be resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaterialPolicy {
    /// Missing libraries and unknown material names are load errors.
    Strict,

    /// Log a warning and bind `Material::default()` (black, non-emissive).
    #[default]
    Fallback,
}

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Material '{name}' not found in {library}")]
    MaterialNotFound { name: String, library: PathBuf },

    #[error("Material '{name}' is bound but no material library is declared")]
    MissingMaterialLibrary { name: String },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load an OBJ file into a mesh.
///
/// `mtllib` paths are resolved relative to the OBJ file's directory.
pub fn load_mesh(path: impl AsRef<Path>, policy: MaterialPolicy) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let model = parse_obj(&source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let fallback_name = path.file_stem().and_then(|s| s.to_str());

    build_mesh(model, base_dir, fallback_name, policy)
}

/// Build a mesh from OBJ text already in memory.
///
/// `base_dir` is the directory `mtllib` paths are resolved against.
pub fn load_mesh_from_str(
    source: &str,
    base_dir: impl AsRef<Path>,
    policy: MaterialPolicy,
) -> LoadResult<Mesh> {
    let model = parse_obj(source).map_err(|source| LoadError::Parse {
        path: PathBuf::from("<memory>"),
        source,
    })?;

    build_mesh(model, base_dir.as_ref(), None, policy)
}

/// Read one named material from an MTL file.
pub fn load_material(library_path: impl AsRef<Path>, name: &str) -> LoadResult<Material> {
    let library_path = library_path.as_ref();
    let library = read_library(library_path)?;

    library
        .get(name)
        .cloned()
        .ok_or_else(|| LoadError::MaterialNotFound {
            name: name.to_string(),
            library: library_path.to_path_buf(),
        })
}

fn read_library(path: &Path) -> LoadResult<MaterialLibrary> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_mtl(&source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_mesh(
    model: ObjModel,
    base_dir: &Path,
    fallback_name: Option<&str>,
    policy: MaterialPolicy,
) -> LoadResult<Mesh> {
    let name = model
        .name
        .clone()
        .or_else(|| fallback_name.map(str::to_string))
        .unwrap_or_else(|| "unnamed".to_string());

    let material = resolve_material(&model, base_dir, &name, policy)?;

    log::debug!(
        "Mesh '{}': {} vertices, {} faces, material '{}', smooth={}",
        name,
        model.vertices.len(),
        model.faces.len(),
        material.name,
        model.smooth_shading
    );
    if model.skipped_faces > 0 {
        log::warn!("Mesh '{}': {} unreadable face(s) skipped", name, model.skipped_faces);
    }

    Ok(Mesh::new(
        name,
        model.vertices,
        model.faces,
        model.smooth_shading,
        material,
    ))
}

fn resolve_material(
    model: &ObjModel,
    base_dir: &Path,
    mesh_name: &str,
    policy: MaterialPolicy,
) -> LoadResult<Material> {
    let Some(material_name) = model.material_name.as_deref() else {
        return Ok(Material::default());
    };

    let result = match model.material_library.as_deref() {
        Some(library) => load_material(base_dir.join(library), material_name),
        None => Err(LoadError::MissingMaterialLibrary {
            name: material_name.to_string(),
        }),
    };

    match (result, policy) {
        (Ok(material), _) => Ok(material),
        (Err(err), MaterialPolicy::Strict) => Err(err),
        (Err(err), MaterialPolicy::Fallback) => {
            log::warn!("Mesh '{}': {}; using default material", mesh_name, err);
            Ok(Material::default())
        }
    }
}
