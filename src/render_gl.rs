mod context;
pub use self::context::{Gl, GlApi, ShaderKind};

mod shader;
pub use self::shader::{Program, Shader, ShaderError};

mod pipeline;
pub use self::pipeline::DefaultPipeline;

#[cfg(test)]
pub(crate) mod test_api;
