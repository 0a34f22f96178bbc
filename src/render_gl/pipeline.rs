use std::ffi::CStr;

use c_str_macro::c_str;
use gl::types::GLint;

use super::context::GlApi;
use super::shader::{Program, ShaderError};

fn default_vert_source() -> &'static CStr {
    c_str!(
        r#"#version 330 core

in vec4 a_pos;
uniform mat4 u_mvp;
uniform mat4 u_proj;

void main() {
    gl_Position = u_proj * u_mvp * a_pos;
}
"#
    )
}

fn default_frag_source() -> &'static CStr {
    c_str!(
        r#"#version 330 core

out vec4 frag_color;

void main() {
    frag_color = vec4(1.0, 1.0, 1.0, 1.0);
}
"#
    )
}

/// The built-in white pipeline with its attribute and uniform locations
/// already resolved. Ready for a draw call without further setup.
pub struct DefaultPipeline<'gl, G: GlApi> {
    pub program: Program<'gl, G>,
    pub a_pos: Option<GLint>,
    pub u_mvp: Option<GLint>,
    pub u_proj: Option<GLint>,
}

impl<'gl, G: GlApi> DefaultPipeline<'gl, G> {
    pub fn load(gl: &'gl G) -> Result<DefaultPipeline<'gl, G>, ShaderError> {
        let program = Program::from_sources(
            gl,
            "default",
            default_vert_source(),
            default_frag_source(),
        )?;
        let a_pos = program.attrib_location(c_str!("a_pos"));
        let u_mvp = program.uniform_location(c_str!("u_mvp"));
        let u_proj = program.uniform_location(c_str!("u_proj"));
        Ok(DefaultPipeline {
            program,
            a_pos,
            u_mvp,
            u_proj,
        })
    }
}
