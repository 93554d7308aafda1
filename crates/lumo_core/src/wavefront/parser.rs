//! Wavefront OBJ text parser.
//!
//! Line-oriented: one directive per line, `#` starts a comment.
//!
//! # Supported Syntax
//!
//! - `o <name>` object name
//! - `s <0|1|off|on|n>` smooth shading
//! - `mtllib <path>` material library, relative to the OBJ file
//! - `usemtl <name>` material to bind
//! - `v <x> <y> <z>` vertex position
//! - `f <i0[/..]> <i1[/..]> <i2[/..]> [..]` face, 1-based vertex indices
//!
//! Faces keep only their first three vertex tokens; polygons are not
//! triangulated. A face that cannot be read is skipped without failing the
//! file. Everything else (`vn`, `vt`, `g`, ...) is ignored.

use lumo_math::Vec3;
use thiserror::Error;

use crate::mesh::Face;

/// Errors that can occur while parsing OBJ or MTL text.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number at line {line}: {token:?}")]
    InvalidNumber { line: usize, token: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Everything read from one OBJ source. One source describes one mesh.
#[derive(Clone, Debug, Default)]
pub struct ObjModel {
    pub name: Option<String>,
    pub smooth_shading: bool,
    pub material_library: Option<String>,
    pub material_name: Option<String>,
    pub vertices: Vec<Vec3>,

    /// 0-based, not yet checked against `vertices`
    pub faces: Vec<Face>,

    /// Faces that had more than three vertex tokens
    pub truncated_faces: usize,

    /// Face lines that were dropped as unreadable
    pub skipped_faces: usize,
}

/// OBJ file parser.
pub struct ObjParser<'a> {
    content: &'a str,
    model: ObjModel,
}

impl<'a> ObjParser<'a> {
    /// Create a new parser from file contents.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            model: ObjModel::default(),
        }
    }

    /// Parse the content into an `ObjModel`.
    pub fn parse(mut self) -> ParseResult<ObjModel> {
        for (index, raw) in self.content.lines().enumerate() {
            let line_num = index + 1;
            let line = strip_comment(raw);
            let mut tokens = line.split_whitespace();

            let Some(directive) = tokens.next() else {
                continue;
            };

            match directive {
                "o" => self.model.name = rest_of_line(line, directive),
                "s" => self.model.smooth_shading = parse_smoothing(tokens.next(), line_num),
                "mtllib" => self.model.material_library = rest_of_line(line, directive),
                "usemtl" => self.model.material_name = tokens.next().map(str::to_string),
                "v" => {
                    let vertex = parse_vec3(&mut tokens, line_num, directive)?;
                    self.model.vertices.push(vertex);
                }
                "f" => self.parse_face(tokens, line_num),
                _ => {}
            }
        }

        if self.model.truncated_faces > 0 {
            log::debug!(
                "{} face(s) with more than 3 vertices truncated to triangles",
                self.model.truncated_faces
            );
        }

        Ok(self.model)
    }

    /// Parse the vertex tokens of an `f` line, skipping the face if unreadable.
    fn parse_face<'t>(&mut self, tokens: impl Iterator<Item = &'t str>, line_num: usize) {
        let tokens: Vec<&str> = tokens.collect();

        if tokens.len() < 3 {
            log::warn!(
                "Line {}: face with {} vertex token(s) skipped",
                line_num,
                tokens.len()
            );
            self.model.skipped_faces += 1;
            return;
        }

        let mut face: Face = [0; 3];
        for (slot, token) in face.iter_mut().zip(&tokens) {
            match parse_vertex_index(token) {
                Some(index) => *slot = index,
                None => {
                    log::warn!("Line {}: invalid face index {:?}, face skipped", line_num, token);
                    self.model.skipped_faces += 1;
                    return;
                }
            }
        }

        if tokens.len() > 3 {
            self.model.truncated_faces += 1;
        }
        self.model.faces.push(face);
    }
}

/// Parse OBJ text.
pub fn parse_obj(content: &str) -> ParseResult<ObjModel> {
    ObjParser::new(content).parse()
}

/// Remove a trailing `#` comment.
pub(crate) fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Everything after the directive, trimmed. `None` if empty.
pub(crate) fn rest_of_line(line: &str, directive: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(directive)?.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

pub(crate) fn parse_f64(token: &str, line: usize) -> ParseResult<f64> {
    token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Read three numbers following a directive. Extra tokens are ignored.
pub(crate) fn parse_vec3<'t>(
    tokens: &mut impl Iterator<Item = &'t str>,
    line: usize,
    directive: &str,
) -> ParseResult<Vec3> {
    let mut components = [0.0; 3];
    for component in &mut components {
        let token = tokens.next().ok_or_else(|| ParseError::Parse {
            line,
            message: format!("'{}' expects 3 numbers", directive),
        })?;
        *component = parse_f64(token, line)?;
    }
    Ok(Vec3::from_array(components))
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`; only the 1-based position index is used.
fn parse_vertex_index(token: &str) -> Option<u32> {
    let position = token.split('/').next()?;
    let index: u32 = position.parse().ok()?;
    index.checked_sub(1)
}

/// `s 0|1|off|on|<group>`. Anything unreadable falls back to flat shading.
fn parse_smoothing(value: Option<&str>, line: usize) -> bool {
    match value {
        Some("on") => true,
        Some("off") => false,
        Some(group) => match group.parse::<u32>() {
            Ok(group) => group != 0,
            Err(_) => {
                log::warn!("Line {}: invalid smoothing group {:?}, using flat shading", line, group);
                false
            }
        },
        None => {
            log::warn!("Line {}: 's' without a value, using flat shading", line);
            false
        }
    }
}
