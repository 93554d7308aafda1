//! JSON scene description: which meshes to load and how to render them.
//!
//! ```json
//! {
//!     "meshes": ["walls.obj", "light.obj"],
//!     "camera": { "eye": [0, 0, 5], "image_plane_z": 2, "half_width": 2 },
//!     "render": { "width": 480, "height": 480, "samples": 3, "max_bounces": 3 },
//!     "strict_materials": false
//! }
//! ```
//!
//! Only `meshes` is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::Mesh;
use crate::wavefront::{load_mesh, LoadResult, MaterialPolicy};

#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("Failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pinhole camera placement. Rays start on the plane `z = image_plane_z`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub eye: [f64; 3],
    pub image_plane_z: f64,

    /// Half the horizontal extent of the image plane
    pub half_width: f64,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            image_plane_z: 2.0,
            half_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,

    /// Paths traced per pixel
    pub samples: u32,

    /// Path length budget, counting the primary hit
    pub max_bounces: u32,

    /// Base seed for the per-pixel random streams
    pub seed: u64,

    /// Tile edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            samples: 3,
            max_bounces: 3,
            seed: 0,
            bucket_size: 64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// OBJ files, one mesh each
    pub meshes: Vec<PathBuf>,

    #[serde(default)]
    pub camera: CameraDescription,

    #[serde(default)]
    pub render: RenderSettings,

    /// Treat unresolved materials as load errors
    #[serde(default)]
    pub strict_materials: bool,
}

impl SceneDescription {
    /// Parse a description. Mesh paths are kept as written.
    pub fn from_json_str(source: &str) -> Result<Self, SceneFileError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read a description file, resolving relative mesh paths against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SceneFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut description = Self::from_json_str(&source)?;
        if let Some(base_dir) = path.parent() {
            for mesh in &mut description.meshes {
                if mesh.is_relative() {
                    *mesh = base_dir.join(&*mesh);
                }
            }
        }

        log::debug!("Scene file {}: {} mesh(es)", path.display(), description.meshes.len());
        Ok(description)
    }

    pub fn material_policy(&self) -> MaterialPolicy {
        if self.strict_materials {
            MaterialPolicy::Strict
        } else {
            MaterialPolicy::Fallback
        }
    }

    /// Load every listed mesh in order. Stops at the first failure.
    pub fn load_meshes(&self) -> LoadResult<Vec<Mesh>> {
        let policy = self.material_policy();
        self.meshes.iter().map(|path| load_mesh(path, policy)).collect()
    }
}
