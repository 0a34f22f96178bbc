use std::ffi::CString;
use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

pub mod render_gl;
pub mod resources;

use render_gl::{DefaultPipeline, Gl, Program};
use resources::Resources;

#[derive(StructOpt, Debug)]
#[structopt(name = "shaderlink", about = "An offline GLSL shader program build checker.")]
enum Shaderlink {
    #[structopt(about = "compile and link a vertex+fragment shader pair")]
    Validate {
        #[structopt(help = "program name; <name>.vert and <name>.frag are loaded")]
        name: String,
        #[structopt(parse(from_os_str), short, long, default_value = ".", help = "shader search root")]
        root: PathBuf,
        #[structopt(short, long, help = "attribute names to resolve after linking")]
        attrib: Vec<String>,
        #[structopt(short, long, help = "uniform names to resolve after linking")]
        uniform: Vec<String>,
    },
    #[structopt(about = "build the built-in default pipeline")]
    Demo,
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Shaderlink::from_args();

    match opt {
        Shaderlink::Validate {
            name,
            root,
            attrib,
            uniform,
        } => {
            let ctx = OffscreenContext::new()?;
            let res = Resources::from_dir_path(&root);
            let program = Program::from_res(&ctx.gl, &res, &name)?;
            println!("{}: ok", name);
            for attrib_name in attrib {
                let c_name = CString::new(attrib_name.as_str())?;
                match program.attrib_location(&c_name) {
                    Some(loc) => println!("attrib {} = {}", attrib_name, loc),
                    None => println!("attrib {} is not active", attrib_name),
                }
            }
            for uniform_name in uniform {
                let c_name = CString::new(uniform_name.as_str())?;
                match program.uniform_location(&c_name) {
                    Some(loc) => println!("uniform {} = {}", uniform_name, loc),
                    None => println!("uniform {} is not active", uniform_name),
                }
            }
        }
        Shaderlink::Demo => {
            let ctx = OffscreenContext::new()?;
            let pipeline = DefaultPipeline::load(&ctx.gl)?;
            println!("default: ok (program {})", pipeline.program.id());
            println!("attrib a_pos = {:?}", pipeline.a_pos);
            println!("uniform u_mvp = {:?}", pipeline.u_mvp);
            println!("uniform u_proj = {:?}", pipeline.u_proj);

            unsafe {
                gl::ClearColor(0.0, 0.0, 0.0, 1.0);
                gl::Clear(gl::COLOR_BUFFER_BIT);
            }
            ctx.window.gl_swap_window();
        }
    }

    Ok(())
}

/// A hidden 1x1 SDL window holding the GL context the builder runs against.
/// The SDL handles are kept alive for as long as the context is in use.
struct OffscreenContext {
    gl: Gl,
    window: sdl2::video::Window,
    _gl_context: sdl2::video::GLContext,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
}

impl OffscreenContext {
    fn new() -> Result<OffscreenContext> {
        let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
        let video_subsystem = sdl.video().map_err(anyhow::Error::msg)?;
        {
            let gl_attr = video_subsystem.gl_attr();
            gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
            gl_attr.set_context_version(3, 3);
        }
        let window = video_subsystem
            .window("shaderlink", 1, 1)
            .opengl()
            .hidden()
            .build()?;
        let gl_context = window.gl_create_context().map_err(anyhow::Error::msg)?;
        gl::load_with(|s| video_subsystem.gl_get_proc_address(s) as *const std::os::raw::c_void);

        Ok(OffscreenContext {
            gl: Gl,
            window,
            _gl_context: gl_context,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
        })
    }
}
