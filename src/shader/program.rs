use std::path::Path;

use rustc_hash::FxHashMap;

use super::{
    merge_stage_sources, GlslCompiler, ProgramId, RenderContext,
    ShaderCompiler, ShaderError, ShaderId, ShaderStage, UniformLocation,
    UniformValue,
};
use crate::options::ShaderOptions;

/// Owner of a single GPU program object.
///
/// The program is created on the first attachment and deleted when this
/// value drops. Dropping requires `context` to still be current on the
/// calling thread. The type is move-only; [`take`](Self::take) moves the
/// program out explicitly and leaves an empty owner behind.
pub struct ShaderProgram<
    'ctx,
    C: RenderContext + ?Sized,
    S: ShaderCompiler<C> = GlslCompiler,
> {
    context: &'ctx C,
    compiler: S,
    program: Option<ProgramId>,
    uniforms: FxHashMap<String, UniformLocation>,
    clear_uniforms_on_link: bool,
}

impl<'ctx, C: RenderContext + ?Sized> ShaderProgram<'ctx, C> {
    /// Empty program compiled by the context's own GLSL compiler.
    pub fn new(context: &'ctx C) -> Self {
        Self::with_compiler(context, GlslCompiler::new())
    }

    /// Empty program configured from [`ShaderOptions`].
    pub fn from_options(context: &'ctx C, options: &ShaderOptions) -> Self {
        let compiler = GlslCompiler {
            validate: options.validate_glsl,
        };
        Self::with_compiler(context, compiler)
            .clear_uniforms_on_link(options.clear_uniforms_on_link)
    }

    /// The program currently in use on `context`.
    pub fn current_program(context: &C) -> Option<ProgramId> {
        context.current_program()
    }
}

impl<'ctx, C: RenderContext + ?Sized, S: ShaderCompiler<C>>
    ShaderProgram<'ctx, C, S>
{
    /// Empty program using a custom compiler.
    pub fn with_compiler(context: &'ctx C, compiler: S) -> Self {
        Self {
            context,
            compiler,
            program: None,
            uniforms: FxHashMap::default(),
            clear_uniforms_on_link: true,
        }
    }

    /// Whether a successful [`link`](Self::link) forgets cached uniform
    /// locations. Enabled by default.
    #[must_use]
    pub fn clear_uniforms_on_link(mut self, clear: bool) -> Self {
        self.clear_uniforms_on_link = clear;
        self
    }

    /// The owned program object, if one has been created.
    pub fn id(&self) -> Option<ProgramId> {
        self.program
    }

    /// Whether this program is the one currently in use.
    pub fn is_current(&self) -> bool {
        self.program
            .is_some_and(|p| self.context.current_program() == Some(p))
    }

    /// Compile `source` for `stage` and attach it.
    ///
    /// When a `stage` shader is already attached, the two sources are
    /// merged (see [`merge_stage_sources`]) and recompiled into a single
    /// replacement stage.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::NoProgram`] if no program could be created,
    /// or the compiler's error if the source (or merged source) does not
    /// compile. On error the attached stages are left as they were.
    pub fn attach_source(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<(), ShaderError> {
        let program = self.ensure_program()?;
        let shader = self.compiler.compile_source(self.context, stage, source)?;
        self.install(program, stage, shader)
    }

    /// Compile the file at `path` for `stage` and attach it.
    ///
    /// Merges with an already attached `stage` shader exactly like
    /// [`attach_source`](Self::attach_source).
    ///
    /// # Errors
    ///
    /// As [`attach_source`](Self::attach_source), plus
    /// [`ShaderError::Io`] if the file cannot be read.
    pub fn attach_file(
        &mut self,
        stage: ShaderStage,
        path: impl AsRef<Path>,
    ) -> Result<(), ShaderError> {
        let program = self.ensure_program()?;
        let shader =
            self.compiler
                .compile_file(self.context, stage, path.as_ref())?;
        self.install(program, stage, shader)
    }

    /// Attach an already compiled shader object as-is.
    ///
    /// No merging takes place and the caller keeps its reference to
    /// `shader`.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::NoProgram`] if no program could be created.
    pub fn attach_shader(&mut self, shader: ShaderId) -> Result<(), ShaderError> {
        let program = self.ensure_program()?;
        self.context.attach_shader(program, shader);
        Ok(())
    }

    /// Shader objects of `stage` attached to this program.
    pub fn attached_shaders(&self, stage: ShaderStage) -> Vec<ShaderId> {
        let Some(program) = self.program else {
            return Vec::new();
        };
        self.context
            .attached_shaders(program)
            .into_iter()
            .filter(|&shader| self.context.shader_stage(shader) == Some(stage))
            .collect()
    }

    /// Link the program from its attached stages.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::NoProgram`] if nothing was attached yet, or
    /// the compiler's link error. A failed link keeps the uniform cache.
    pub fn link(&mut self) -> Result<(), ShaderError> {
        let program = self.program.ok_or(ShaderError::NoProgram)?;
        self.compiler.link(self.context, program)?;

        if self.clear_uniforms_on_link && !self.uniforms.is_empty() {
            log::debug!(
                "program {} relinked, dropping {} cached uniform locations",
                program.0,
                self.uniforms.len()
            );
            self.uniforms.clear();
        }
        Ok(())
    }

    /// Location of the uniform `name`.
    ///
    /// Valid locations are cached, so repeated lookups do not reach the
    /// context. Unknown or optimized-out uniforms yield
    /// [`UniformLocation::INVALID`] and are looked up again next time.
    pub fn uniform_location(&mut self, name: &str) -> UniformLocation {
        let Some(program) = self.program else {
            return UniformLocation::INVALID;
        };
        if let Some(&location) = self.uniforms.get(name) {
            return location;
        }

        let location = self.context.uniform_location(program, name);
        if location.is_valid() {
            let _ = self.uniforms.insert(name.to_owned(), location);
        } else {
            log::debug!("uniform '{name}' not active in program {}", program.0);
        }
        location
    }

    /// Upload `value` to the uniform `name`. Returns `false` if the program
    /// does not expose it.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> bool {
        let location = self.uniform_location(name);
        match self.program {
            Some(program) if location.is_valid() => {
                self.context.program_uniform(program, location, &value);
                true
            }
            _ => false,
        }
    }

    /// Make this program current. Does nothing if no program exists.
    pub fn enable(&self) {
        if let Some(program) = self.program {
            self.context.use_program(Some(program));
        }
    }

    /// Make no program current. This affects the whole context, not just
    /// this program.
    pub fn disable(&self) {
        self.context.use_program(None);
    }

    /// Move the program and its uniform cache out, leaving `self` empty.
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        let empty = Self {
            context: self.context,
            compiler: self.compiler.clone(),
            program: None,
            uniforms: FxHashMap::default(),
            clear_uniforms_on_link: self.clear_uniforms_on_link,
        };
        std::mem::replace(self, empty)
    }

    fn ensure_program(&mut self) -> Result<ProgramId, ShaderError> {
        if let Some(program) = self.program {
            return Ok(program);
        }
        let program =
            self.context.create_program().ok_or(ShaderError::NoProgram)?;
        log::debug!("created program {}", program.0);
        self.program = Some(program);
        Ok(program)
    }

    /// Attach a freshly compiled `shader`, merging it into an existing
    /// stage of the same kind.
    fn install(
        &self,
        program: ProgramId,
        stage: ShaderStage,
        shader: ShaderId,
    ) -> Result<(), ShaderError> {
        let attached = self.attached_shaders(stage);
        let Some(&existing) = attached.first() else {
            self.context.attach_shader(program, shader);
            self.context.delete_shader(shader);
            return Ok(());
        };

        let existing_source = self.context.get_shader_source(existing);
        let addition = self.context.get_shader_source(shader);
        self.context.delete_shader(shader);

        let merged_source = merge_stage_sources(&existing_source, &addition);
        let merged =
            self.compiler
                .compile_source(self.context, stage, &merged_source)?;

        // `existing` was released when it was attached, so detaching frees it
        self.context.detach_shader(program, existing);
        self.context.attach_shader(program, merged);
        self.context.delete_shader(merged);
        log::debug!("merged {stage} shader into program {}", program.0);
        Ok(())
    }
}

impl<C: RenderContext + ?Sized, S: ShaderCompiler<C>> Drop
    for ShaderProgram<'_, C, S>
{
    fn drop(&mut self) {
        if let Some(program) = self.program.take() {
            debug_assert!(
                self.context.is_current(),
                "program {} dropped without a current context",
                program.0
            );
            self.context.delete_program(program);
        }
    }
}
