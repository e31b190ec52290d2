use super::{ProgramId, ShaderId, ShaderStage, UniformLocation, UniformValue};

/// Program and shader primitives of the active graphics context.
///
/// Mirrors the GL object model: names are created and deleted explicitly,
/// shaders are attached to programs, and one program at a time is current.
/// Every method takes `&self` because the underlying state lives in the
/// context bound to the calling thread, not in the Rust value.
///
/// Implementations must only be used from the thread the context is current
/// on.
pub trait RenderContext {
    /// Create an empty program object.
    fn create_program(&self) -> Option<ProgramId>;

    /// Delete a program object.
    fn delete_program(&self, program: ProgramId);

    /// Create an empty shader object for `stage`.
    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId>;

    /// Replace the source text of a shader object.
    fn shader_source(&self, shader: ShaderId, source: &str);

    /// Compile the current source of a shader object.
    fn compile_shader(&self, shader: ShaderId);

    /// Whether the last compile of `shader` succeeded.
    fn shader_compile_status(&self, shader: ShaderId) -> bool;

    /// Driver diagnostics from the last compile of `shader`.
    fn shader_info_log(&self, shader: ShaderId) -> String;

    /// Release a reference to a shader object. Attached shaders are freed
    /// once detached.
    fn delete_shader(&self, shader: ShaderId);

    /// Attach a compiled shader to a program.
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);

    /// Detach a shader from a program.
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);

    /// All shader objects currently attached to `program`.
    fn attached_shaders(&self, program: ProgramId) -> Vec<ShaderId>;

    /// Stage a shader object was created for.
    fn shader_stage(&self, shader: ShaderId) -> Option<ShaderStage>;

    /// Source text of a shader object.
    fn get_shader_source(&self, shader: ShaderId) -> String;

    /// Link a program from its attached shaders.
    fn link_program(&self, program: ProgramId);

    /// Whether the last link of `program` succeeded.
    fn program_link_status(&self, program: ProgramId) -> bool;

    /// Driver diagnostics from the last link of `program`.
    fn program_info_log(&self, program: ProgramId) -> String;

    /// Resolve a uniform by name. Returns [`UniformLocation::INVALID`] when
    /// the program does not expose it.
    fn uniform_location(&self, program: ProgramId, name: &str)
        -> UniformLocation;

    /// Upload a uniform value to `program` without making it current.
    fn program_uniform(
        &self,
        program: ProgramId,
        location: UniformLocation,
        value: &UniformValue,
    );

    /// Make `program` current, or no program for `None`.
    fn use_program(&self, program: Option<ProgramId>);

    /// The program that is currently in use, if any.
    fn current_program(&self) -> Option<ProgramId>;

    /// Whether this context is current on the calling thread.
    fn is_current(&self) -> bool;
}
