//! In-memory `GlApi` used by the builder tests. Tracks live shader and
//! program objects so tests can assert that every failure path returns the
//! context to its baseline resource count. Sources containing an `#error`
//! line fail compilation, mirroring the GLSL preprocessor directive.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

use gl::types::{GLint, GLuint};

use super::context::{GlApi, ShaderKind};

#[derive(Debug, Default)]
struct FakeState {
    next_id: GLuint,
    live_shaders: HashSet<GLuint>,
    live_programs: HashSet<GLuint>,
    shader_kinds: HashMap<GLuint, ShaderKind>,
    shader_sources: HashMap<GLuint, String>,
    attachments: HashMap<GLuint, Vec<GLuint>>,
    compile_calls: Vec<ShaderKind>,
    programs_created: usize,
    fail_link: bool,
}

#[derive(Debug, Default)]
pub struct FakeGl {
    state: RefCell<FakeState>,
}

impl FakeGl {
    pub fn failing_link() -> FakeGl {
        let fake = FakeGl::default();
        fake.state.borrow_mut().fail_link = true;
        fake
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().live_shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().live_programs.len()
    }

    pub fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.live_shaders.len() + state.live_programs.len()
    }

    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs_created
    }

    pub fn compile_calls(&self) -> Vec<ShaderKind> {
        self.state.borrow().compile_calls.clone()
    }

    pub fn attachments_of(&self, program: GLuint) -> usize {
        self.state
            .borrow()
            .attachments
            .get(&program)
            .map_or(0, |shaders| shaders.len())
    }
}

impl GlApi for FakeGl {
    fn create_shader(&self, kind: ShaderKind) -> GLuint {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live_shaders.insert(id);
        state.shader_kinds.insert(id, kind);
        id
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        self.state
            .borrow_mut()
            .shader_sources
            .insert(shader, source.to_string_lossy().into_owned());
    }

    fn compile_shader(&self, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        let kind = state.shader_kinds[&shader];
        state.compile_calls.push(kind);
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        !self.state.borrow().shader_sources[&shader].contains("#error")
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        format!("0:1: '#error' : user defined error in shader {}", shader)
    }

    fn delete_shader(&self, shader: GLuint) {
        self.state.borrow_mut().live_shaders.remove(&shader);
    }

    fn create_program(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live_programs.insert(id);
        state.programs_created += 1;
        id
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.state
            .borrow_mut()
            .attachments
            .entry(program)
            .or_default()
            .push(shader);
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        if let Some(shaders) = self.state.borrow_mut().attachments.get_mut(&program) {
            shaders.retain(|&id| id != shader);
        }
    }

    fn link_program(&self, _program: GLuint) {}

    fn link_status(&self, _program: GLuint) -> bool {
        !self.state.borrow().fail_link
    }

    fn program_info_log(&self, _program: GLuint) -> String {
        "link failed".to_string()
    }

    fn delete_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        state.live_programs.remove(&program);
        state.attachments.remove(&program);
    }

    fn attrib_location(&self, _program: GLuint, name: &CStr) -> GLint {
        match name.to_bytes() {
            b"a_pos" => 0,
            _ => -1,
        }
    }

    fn uniform_location(&self, _program: GLuint, name: &CStr) -> GLint {
        match name.to_bytes() {
            b"u_mvp" => 0,
            b"u_proj" => 1,
            _ => -1,
        }
    }
}
