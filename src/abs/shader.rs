//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for compiling
//! and linking the exercises' GLSL, and the [`Uniform`] trait for setting
//! uniform variables in a linked program.

use std::{fmt, sync::Arc};

use glam::Vec4;
use glow::HasContext;

/// Returns the embedded source of a shader file under `src/shaders/<exercise>/`.
#[macro_export]
macro_rules! shader_source {
    ($exercise:literal, $file:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/src/shaders/",
            $exercise,
            "/",
            $file
        ))
    };
}

/// Compiles and links the `vertex_shader.glsl`/`fragment_shader.glsl` pair of an exercise.
///
/// Evaluates to `Result<ShaderProgram, ShaderError>`.
#[macro_export]
macro_rules! shader_program {
    ($gl:expr, $exercise:literal) => {{
        (|| -> Result<$crate::abs::ShaderProgram, $crate::abs::ShaderError> {
            let vert = $crate::abs::Shader::new(
                &$gl,
                $crate::abs::ShaderStage::Vertex,
                $crate::shader_source!($exercise, "vertex_shader.glsl"),
            )?;
            let frag = $crate::abs::Shader::new(
                &$gl,
                $crate::abs::ShaderStage::Fragment,
                $crate::shader_source!($exercise, "fragment_shader.glsl"),
            )?;
            $crate::abs::ShaderProgram::new(&$gl, &[&vert, &frag])
        })()
    }};
}

/// The pipeline stage a shader is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    fn diagnostic_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }
}

/// A failed compile or link, carrying the driver's info log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    Create(String),
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Create(reason) => write!(f, "ERROR::SHADER::CREATION_FAILED\n{reason}"),
            ShaderError::Compile { stage, log } => write!(
                f,
                "ERROR::SHADER::{}::COMPILATION_FAILED\n{log}",
                stage.diagnostic_name()
            ),
            ShaderError::Link { log } => write!(f, "ERROR::PROGRAM::SHADER::LINKING_FAILED\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Represents an individual compiled OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(
        gl: &Arc<glow::Context>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile { stage, log });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }

    /// Returns the stage this shader was compiled for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_1_f32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// A successfully linked OpenGL shader program.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            log::debug!(
                "linked program from {:?}",
                shaders.iter().map(|s| s.stage()).collect::<Vec<_>>()
            );

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// The program has to be in use; unknown names are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_diagnostics_name_the_stage() {
        let vertex = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:3: syntax error".to_string(),
        };
        let fragment = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: String::new(),
        };

        assert_eq!(
            vertex.to_string(),
            "ERROR::SHADER::VERTEX::COMPILATION_FAILED\n0:3: syntax error"
        );
        assert_eq!(
            fragment.to_string(),
            "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\n"
        );
    }

    #[test]
    fn link_diagnostic() {
        let err = ShaderError::Link {
            log: "missing main".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ERROR::PROGRAM::SHADER::LINKING_FAILED\nmissing main"
        );
    }

    fn accepts_uniform<T: Uniform>(_: T) {}

    #[test]
    fn host_values_usable_as_uniforms() {
        accepts_uniform(0i32);
        accepts_uniform(0.5f32);
        accepts_uniform(Vec4::new(1.0, 0.5, 0.2, 1.0));
        accepts_uniform(&Vec4::ONE);
    }

    #[test]
    fn stages_map_to_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }
}
