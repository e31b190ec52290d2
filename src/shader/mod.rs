//! GPU shader program management.
//!
//! A [`ShaderProgram`] owns one linked program object, merges sources that
//! target the same stage, and caches uniform locations by name. The host
//! graphics API is reached only through the [`RenderContext`] and
//! [`ShaderCompiler`] traits.

/// Shader compiler collaborator and its GLSL implementation.
pub mod compiler;
/// Rendering context trait over the host graphics API.
pub mod context;
/// Program lifecycle: attach, link, enable, uniform lookup.
pub mod program;
/// `#version` stripping and same-stage source merging.
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

pub use compiler::{validate_glsl, GlslCompiler, ShaderCompiler};
pub use context::RenderContext;
pub use program::ShaderProgram;
pub use source::{merge_stage_sources, strip_version_directive};

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Tessellation control stage.
    TessControl,
    /// Tessellation evaluation stage.
    TessEvaluation,
    /// Per-primitive geometry stage.
    Geometry,
    /// Per-fragment stage.
    Fragment,
    /// Standalone compute stage.
    Compute,
}

impl ShaderStage {
    /// All stages, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Vertex,
        Self::TessControl,
        Self::TessEvaluation,
        Self::Geometry,
        Self::Fragment,
        Self::Compute,
    ];

    /// Lowercase name as used on the command line and in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::TessControl => "tess_control",
            Self::TessEvaluation => "tess_evaluation",
            Self::Geometry => "geometry",
            Self::Fragment => "fragment",
            Self::Compute => "compute",
        }
    }

    /// Parse a stage from its [`name`](Self::name) or a common file
    /// extension (`vert`, `frag`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vertex" | "vert" | "vs" => Some(Self::Vertex),
            "tess_control" | "tesc" => Some(Self::TessControl),
            "tess_evaluation" | "tese" => Some(Self::TessEvaluation),
            "geometry" | "geom" | "gs" => Some(Self::Geometry),
            "fragment" | "frag" | "fs" => Some(Self::Fragment),
            "compute" | "comp" | "cs" => Some(Self::Compute),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a program object. Zero is never a valid program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub NonZeroU32);

/// Name of a shader stage object. Zero is never a valid shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub NonZeroU32);

/// Location of a uniform variable inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

impl UniformLocation {
    /// Returned for uniforms the program does not expose (unknown or
    /// optimized out).
    pub const INVALID: Self = Self(-1);

    /// Whether this location refers to a live uniform.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for UniformLocation {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A value that can be uploaded to a uniform location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int` / sampler unit.
    Int(i32),
    /// `uint`.
    UInt(u32),
    /// `float`.
    Float(f32),
    /// `vec2`.
    Vec2(Vec2),
    /// `vec3`.
    Vec3(Vec3),
    /// `vec4`.
    Vec4(Vec4),
    /// `mat3`, column-major.
    Mat3(Mat3),
    /// `mat4`, column-major.
    Mat4(Mat4),
}

/// Errors produced while building a shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// The rendering context could not create a program object.
    NoProgram,
    /// The rendering context could not create a shader object.
    ShaderCreation(ShaderStage),
    /// The driver rejected a shader source.
    Compilation {
        /// Stage being compiled.
        stage: ShaderStage,
        /// Driver info log.
        log: String,
    },
    /// GLSL pre-validation rejected a shader source.
    Validation {
        /// Stage being validated.
        stage: ShaderStage,
        /// Front end or validator diagnostics.
        log: String,
    },
    /// The driver failed to link the program.
    Link {
        /// Driver info log.
        log: String,
    },
    /// A shader file could not be read.
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProgram => write!(f, "no program object could be created"),
            Self::ShaderCreation(stage) => {
                write!(f, "failed to create {stage} shader object")
            }
            Self::Compilation { stage, log } => {
                write!(f, "{stage} shader failed to compile: {log}")
            }
            Self::Validation { stage, log } => {
                write!(f, "{stage} shader failed validation: {log}")
            }
            Self::Link { log } => write!(f, "program failed to link: {log}"),
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
