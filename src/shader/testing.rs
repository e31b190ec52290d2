//! In-memory [`RenderContext`] that records every call, for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroU32;

use super::{
    ProgramId, RenderContext, ShaderId, ShaderStage, UniformLocation,
    UniformValue,
};

struct ShaderState {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    delete_pending: bool,
}

#[derive(Default)]
struct State {
    next_name: u32,
    programs: HashMap<ProgramId, Vec<ShaderId>>,
    shaders: HashMap<ShaderId, ShaderState>,
    created_shaders: usize,
    current: Option<ProgramId>,
    use_calls: Vec<Option<ProgramId>>,
    deleted_programs: Vec<ProgramId>,
    link_calls: usize,
    exposed_uniforms: HashMap<String, i32>,
    uniform_queries: HashMap<String, usize>,
    uploads: Vec<(ProgramId, UniformLocation, UniformValue)>,
    failing_patterns: Vec<String>,
    next_link_failure: Option<String>,
    refuse_programs: bool,
    context_lost: bool,
}

impl State {
    fn next_name(&mut self) -> NonZeroU32 {
        self.next_name += 1;
        NonZeroU32::new(self.next_name).unwrap_or(NonZeroU32::MIN)
    }

    fn is_attached(&self, shader: ShaderId) -> bool {
        self.programs.values().any(|attached| attached.contains(&shader))
    }
}

/// Recording mock of a GL-style context that is always current.
pub(crate) struct RecordingContext {
    state: RefCell<State>,
}

impl RecordingContext {
    pub(crate) fn new() -> Self {
        Self {
            state: RefCell::new(State::default()),
        }
    }

    /// Sources containing `pattern` fail to compile.
    pub(crate) fn fail_sources_containing(&self, pattern: &str) {
        self.state.borrow_mut().failing_patterns.push(pattern.to_owned());
    }

    /// The next link fails with `log`.
    pub(crate) fn fail_next_link(&self, log: &str) {
        self.state.borrow_mut().next_link_failure = Some(log.to_owned());
    }

    /// `create_program` returns `None` from now on.
    pub(crate) fn refuse_programs(&self) {
        self.state.borrow_mut().refuse_programs = true;
    }

    /// `is_current` reports `false` from now on.
    pub(crate) fn lose_current(&self) {
        self.state.borrow_mut().context_lost = true;
    }

    /// Linked programs expose `name` at `location`.
    pub(crate) fn expose_uniform(&self, name: &str, location: i32) {
        let _ = self
            .state
            .borrow_mut()
            .exposed_uniforms
            .insert(name.to_owned(), location);
    }

    pub(crate) fn uniform_queries(&self, name: &str) -> usize {
        self.state
            .borrow()
            .uniform_queries
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn use_calls(&self) -> Vec<Option<ProgramId>> {
        self.state.borrow().use_calls.clone()
    }

    pub(crate) fn deleted_programs(&self) -> Vec<ProgramId> {
        self.state.borrow().deleted_programs.clone()
    }

    pub(crate) fn uploads(&self) -> Vec<(ProgramId, UniformLocation, UniformValue)> {
        self.state.borrow().uploads.clone()
    }

    pub(crate) fn link_calls(&self) -> usize {
        self.state.borrow().link_calls
    }

    pub(crate) fn created_shader_count(&self) -> usize {
        self.state.borrow().created_shaders
    }

    /// Shader objects that have not been freed.
    pub(crate) fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }
}

impl RenderContext for RecordingContext {
    fn create_program(&self) -> Option<ProgramId> {
        let mut state = self.state.borrow_mut();
        if state.refuse_programs {
            return None;
        }
        let program = ProgramId(state.next_name());
        let _ = state.programs.insert(program, Vec::new());
        Some(program)
    }

    fn delete_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        if let Some(attached) = state.programs.remove(&program) {
            for shader in attached {
                let pending = state
                    .shaders
                    .get(&shader)
                    .is_some_and(|s| s.delete_pending);
                if pending && !state.is_attached(shader) {
                    let _ = state.shaders.remove(&shader);
                }
            }
        }
        if state.current == Some(program) {
            state.current = None;
        }
        state.deleted_programs.push(program);
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId> {
        let mut state = self.state.borrow_mut();
        let shader = ShaderId(state.next_name());
        let _ = state.shaders.insert(
            shader,
            ShaderState {
                stage,
                source: String::new(),
                compiled: false,
                delete_pending: false,
            },
        );
        state.created_shaders += 1;
        Some(shader)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            source.clone_into(&mut s.source);
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        let State {
            shaders,
            failing_patterns,
            ..
        } = &mut *state;
        if let Some(s) = shaders.get_mut(&shader) {
            s.compiled = !failing_patterns
                .iter()
                .any(|pattern| s.source.contains(pattern.as_str()));
        }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error".to_owned()
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        if state.is_attached(shader) {
            if let Some(s) = state.shaders.get_mut(&shader) {
                s.delete_pending = true;
            }
        } else {
            let _ = state.shaders.remove(&shader);
        }
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let Some(attached) = self.state.borrow_mut().programs.get_mut(&program) {
            attached.push(shader);
        }
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        if let Some(attached) = state.programs.get_mut(&program) {
            attached.retain(|s| *s != shader);
        }
        let pending = state
            .shaders
            .get(&shader)
            .is_some_and(|s| s.delete_pending);
        if pending && !state.is_attached(shader) {
            let _ = state.shaders.remove(&shader);
        }
    }

    fn attached_shaders(&self, program: ProgramId) -> Vec<ShaderId> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .cloned()
            .unwrap_or_default()
    }

    fn shader_stage(&self, shader: ShaderId) -> Option<ShaderStage> {
        self.state.borrow().shaders.get(&shader).map(|s| s.stage)
    }

    fn get_shader_source(&self, shader: ShaderId) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.source.clone())
            .unwrap_or_default()
    }

    fn link_program(&self, _program: ProgramId) {
        self.state.borrow_mut().link_calls += 1;
    }

    fn program_link_status(&self, _program: ProgramId) -> bool {
        self.state.borrow().next_link_failure.is_none()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        self.state
            .borrow_mut()
            .next_link_failure
            .take()
            .unwrap_or_default()
    }

    fn uniform_location(
        &self,
        program: ProgramId,
        name: &str,
    ) -> UniformLocation {
        let mut state = self.state.borrow_mut();
        *state.uniform_queries.entry(name.to_owned()).or_insert(0) += 1;
        if !state.programs.contains_key(&program) {
            return UniformLocation::INVALID;
        }
        state
            .exposed_uniforms
            .get(name)
            .map_or(UniformLocation::INVALID, |&loc| UniformLocation(loc))
    }

    fn program_uniform(
        &self,
        program: ProgramId,
        location: UniformLocation,
        value: &UniformValue,
    ) {
        self.state
            .borrow_mut()
            .uploads
            .push((program, location, *value));
    }

    fn use_program(&self, program: Option<ProgramId>) {
        let mut state = self.state.borrow_mut();
        state.current = program;
        state.use_calls.push(program);
    }

    fn current_program(&self) -> Option<ProgramId> {
        self.state.borrow().current
    }

    fn is_current(&self) -> bool {
        !self.state.borrow().context_lost
    }
}
