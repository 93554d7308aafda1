//! Surface shading parameters.

use lumo_math::Color;

/// Per-mesh shading parameters, resolved once at load time.
///
/// `roughness` blends the bounce direction between a mirror reflection (0.0)
/// and a cosine-weighted diffuse sample (1.0). Material files store it as a
/// specular exponent `Ns` in [0, 1000].
///
/// The default material is all zeros: black, non-emissive, mirror-like.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// Material name (from `newmtl`)
    pub name: String,

    /// Ambient color (`Ka`), carried but unused by the transport
    pub ambient: Color,

    /// Diffuse color (`Kd`), the reflectance multiplied into path throughput
    pub diffuse: Color,

    /// Specular color (`Ks`), carried but unused by the transport
    pub specular: Color,

    /// Emitted radiance (`Ke`)
    pub emission: Color,

    /// 0 = mirror, 1 = fully diffuse
    pub roughness: f64,
}

impl Material {
    /// Create a new material with a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Set the emitted radiance.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Set the roughness, clamped to [0, 1].
    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Map a material-file specular exponent (`Ns`, 0..1000) to roughness.
    pub fn roughness_from_exponent(exponent: f64) -> f64 {
        (exponent / 1000.0).clamp(0.0, 1.0)
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }
}
