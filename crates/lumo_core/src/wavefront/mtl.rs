//! Wavefront MTL material library parser.
//!
//! A library holds any number of `newmtl` blocks. Within a block `Ns`,
//! `Ka`, `Kd`, `Ks` and `Ke` are read; other directives are ignored, as is
//! anything before the first `newmtl`.

use super::parser::{parse_f64, parse_vec3, strip_comment, ParseError, ParseResult};
use crate::material::Material;

/// All materials defined in one MTL source, in file order.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    /// Look up a material by its `newmtl` name. The first definition wins.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Parse MTL text.
pub fn parse_mtl(content: &str) -> ParseResult<MaterialLibrary> {
    let mut library = MaterialLibrary::default();

    for (index, raw) in content.lines().enumerate() {
        let line_num = index + 1;
        let mut tokens = strip_comment(raw).split_whitespace();

        let Some(directive) = tokens.next() else {
            continue;
        };

        if directive == "newmtl" {
            let name = tokens.next().ok_or_else(|| ParseError::Parse {
                line: line_num,
                message: "'newmtl' expects a name".to_string(),
            })?;
            library.materials.push(Material::new(name, Default::default()));
            continue;
        }

        let Some(current) = library.materials.last_mut() else {
            log::debug!("Line {}: '{}' outside any newmtl block ignored", line_num, directive);
            continue;
        };

        match directive {
            "Ns" => {
                let token = tokens.next().ok_or_else(|| ParseError::Parse {
                    line: line_num,
                    message: "'Ns' expects a value".to_string(),
                })?;
                current.roughness = Material::roughness_from_exponent(parse_f64(token, line_num)?);
            }
            "Ka" => current.ambient = parse_vec3(&mut tokens, line_num, directive)?,
            "Kd" => current.diffuse = parse_vec3(&mut tokens, line_num, directive)?,
            "Ks" => current.specular = parse_vec3(&mut tokens, line_num, directive)?,
            "Ke" => current.emission = parse_vec3(&mut tokens, line_num, directive)?,
            _ => {}
        }
    }

    Ok(library)
}
