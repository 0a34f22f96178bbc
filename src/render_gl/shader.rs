use std::ffi::CStr;

use gl::types::GLint;
use log::error;
use thiserror::Error;

use super::context::{GlApi, ShaderKind};
use crate::resources::{self, Resources};

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("resource load error: {name}")]
    ResourceLoad {
        name: String,
        source: resources::ResError,
    },
    #[error("can not determine shader kind for resource: {name}")]
    CanNotDetermineShaderKindForResource { name: String },
    #[error("{kind} shader compile error: {name}\nmessage: {message}")]
    CompileError {
        kind: ShaderKind,
        name: String,
        message: String,
    },
    #[error("shader link error: {name}\nmessage: {message}")]
    LinkError { name: String, message: String },
}

#[derive(Debug)]
pub struct Shader<'gl, G: GlApi> {
    gl: &'gl G,
    id: gl::types::GLuint,
    kind: ShaderKind,
}

impl<'gl, G: GlApi> Shader<'gl, G> {
    pub fn from_source(
        gl: &'gl G,
        source: &CStr,
        name: &str,
        kind: ShaderKind,
    ) -> Result<Shader<'gl, G>, ShaderError> {
        let id = gl.create_shader(kind);
        gl.shader_source(id, source);
        gl.compile_shader(id);
        if !gl.compile_status(id) {
            let message = gl.shader_info_log(id);
            gl.delete_shader(id);
            error!("{} shader compile failed: {}: {}", kind, name, message);
            return Err(ShaderError::CompileError {
                kind,
                name: name.to_string(),
                message,
            });
        }
        Ok(Shader { gl, id, kind })
    }

    pub fn from_vert_source(
        gl: &'gl G,
        source: &CStr,
        name: &str,
    ) -> Result<Shader<'gl, G>, ShaderError> {
        Shader::from_source(gl, source, name, ShaderKind::Vertex)
    }

    pub fn from_frag_source(
        gl: &'gl G,
        source: &CStr,
        name: &str,
    ) -> Result<Shader<'gl, G>, ShaderError> {
        Shader::from_source(gl, source, name, ShaderKind::Fragment)
    }

    pub fn from_res(gl: &'gl G, res: &Resources, name: &str) -> Result<Shader<'gl, G>, ShaderError> {
        const POSSIBLE_EXT: [(&str, ShaderKind); 2] = [
            (".vert", ShaderKind::Vertex),
            (".frag", ShaderKind::Fragment),
        ];

        let shader_kind = POSSIBLE_EXT
            .iter()
            .find(|&&(file_extension, _)| name.ends_with(file_extension))
            .map(|&(_, kind)| kind)
            .ok_or_else(|| ShaderError::CanNotDetermineShaderKindForResource {
                name: name.into(),
            })?;

        let source = res
            .load_cstring(name)
            .map_err(|e| ShaderError::ResourceLoad {
                name: name.into(),
                source: e,
            })?;

        Self::from_source(gl, &source, name, shader_kind)
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl<'gl, G: GlApi> Drop for Shader<'gl, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

#[derive(Debug)]
pub struct Program<'gl, G: GlApi> {
    gl: &'gl G,
    id: gl::types::GLuint,
}

impl<'gl, G: GlApi> Program<'gl, G> {
    /// Compiles the vertex stage, then the fragment stage, then links.
    /// Any stage failure aborts the build immediately; every shader object
    /// acquired up to that point is released before returning.
    pub fn from_sources(
        gl: &'gl G,
        name: &str,
        vert_source: &CStr,
        frag_source: &CStr,
    ) -> Result<Program<'gl, G>, ShaderError> {
        let vert = Shader::from_vert_source(gl, vert_source, name)?;
        let frag = Shader::from_frag_source(gl, frag_source, name)?;
        Program::from_shaders(gl, name, &[vert, frag])
    }

    pub fn from_shaders(
        gl: &'gl G,
        name: &str,
        shaders: &[Shader<'gl, G>],
    ) -> Result<Program<'gl, G>, ShaderError> {
        let program_id = gl.create_program();
        for shader in shaders {
            gl.attach_shader(program_id, shader.id());
        }
        gl.link_program(program_id);
        if !gl.link_status(program_id) {
            let message = gl.program_info_log(program_id);
            gl.delete_program(program_id);
            error!("program link failed: {}: {}", name, message);
            return Err(ShaderError::LinkError {
                name: name.to_string(),
                message,
            });
        }
        for shader in shaders {
            gl.detach_shader(program_id, shader.id());
        }
        Ok(Program { gl, id: program_id })
    }

    pub fn from_res(gl: &'gl G, res: &Resources, name: &str) -> Result<Program<'gl, G>, ShaderError> {
        const POSSIBLE_EXT: [&str; 2] = [".vert", ".frag"];

        let shaders = POSSIBLE_EXT
            .iter()
            .map(|file_extension| Shader::from_res(gl, res, &format!("{}{}", name, file_extension)))
            .collect::<Result<Vec<Shader<G>>, ShaderError>>()?;

        Program::from_shaders(gl, name, &shaders[..])
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    /// `None` when the named attribute is not active in the linked program.
    pub fn attrib_location(&self, name: &CStr) -> Option<GLint> {
        let loc = self.gl.attrib_location(self.id, name);
        if loc < 0 {
            None
        } else {
            Some(loc)
        }
    }

    /// `None` when the named uniform is not active in the linked program.
    pub fn uniform_location(&self, name: &CStr) -> Option<GLint> {
        let loc = self.gl.uniform_location(self.id, name);
        if loc < 0 {
            None
        } else {
            Some(loc)
        }
    }
}

impl<'gl, G: GlApi> Drop for Program<'gl, G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
