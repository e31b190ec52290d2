use std::path::Path;

use naga::front::glsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ProgramId, RenderContext, ShaderError, ShaderId, ShaderStage};

/// Turns shader sources into compiled stage objects and links programs.
///
/// Failures are logged by the compiler itself; callers only see the
/// returned [`ShaderError`].
pub trait ShaderCompiler<C: RenderContext + ?Sized> {
    /// Compile `source` into a new shader object for `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if the shader object cannot be created or the
    /// source does not compile.
    fn compile_source(
        &self,
        context: &C,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderId, ShaderError>;

    /// Read `path` and compile its contents for `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`compile_source`](Self::compile_source).
    fn compile_file(
        &self,
        context: &C,
        stage: ShaderStage,
        path: &Path,
    ) -> Result<ShaderId, ShaderError> {
        let source =
            std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded {stage} shader from {}", path.display());
        self.compile_source(context, stage, &source)
    }

    /// Link `program` from its attached shaders.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Link`] with the driver log on failure.
    fn link(&self, context: &C, program: ProgramId) -> Result<(), ShaderError>;
}

/// GLSL compiler backed by the rendering context's own compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlslCompiler {
    /// Run sources through naga's GLSL front end before the driver sees
    /// them. Only vertex, fragment and compute stages are checked.
    pub validate: bool,
}

impl GlslCompiler {
    /// Compiler that hands sources straight to the driver.
    #[must_use]
    pub const fn new() -> Self {
        Self { validate: false }
    }

    /// Compiler that pre-validates sources with naga.
    #[must_use]
    pub const fn validating() -> Self {
        Self { validate: true }
    }
}

impl<C: RenderContext + ?Sized> ShaderCompiler<C> for GlslCompiler {
    fn compile_source(
        &self,
        context: &C,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderId, ShaderError> {
        if self.validate {
            validate_glsl(stage, source)?;
        }

        let shader = context
            .create_shader(stage)
            .ok_or(ShaderError::ShaderCreation(stage))?;
        context.shader_source(shader, source);
        context.compile_shader(shader);

        if context.shader_compile_status(shader) {
            Ok(shader)
        } else {
            let log = context.shader_info_log(shader);
            log::error!("{stage} shader failed to compile:\n{log}");
            context.delete_shader(shader);
            Err(ShaderError::Compilation { stage, log })
        }
    }

    fn link(&self, context: &C, program: ProgramId) -> Result<(), ShaderError> {
        context.link_program(program);

        if context.program_link_status(program) {
            Ok(())
        } else {
            let log = context.program_info_log(program);
            log::error!("program {} failed to link:\n{log}", program.0);
            Err(ShaderError::Link { log })
        }
    }
}

/// Parse and validate a GLSL source with naga.
///
/// naga's GLSL front end understands `#version 440` and later. Stages naga
/// has no notion of (geometry and tessellation) pass through unchecked.
///
/// # Errors
///
/// Returns [`ShaderError::Validation`] with the front end or validator
/// diagnostics.
pub fn validate_glsl(stage: ShaderStage, source: &str) -> Result<(), ShaderError> {
    let naga_stage = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
        ShaderStage::Compute => naga::ShaderStage::Compute,
        ShaderStage::TessControl
        | ShaderStage::TessEvaluation
        | ShaderStage::Geometry => {
            log::debug!("skipping validation of {stage} shader");
            return Ok(());
        }
    };

    let module = glsl::Frontend::default()
        .parse(&glsl::Options::from(naga_stage), source)
        .map_err(|errors| ShaderError::Validation {
            stage,
            log: errors.to_string(),
        })?;

    let _info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|error| ShaderError::Validation {
            stage,
            log: error.to_string(),
        })?;
    Ok(())
}
