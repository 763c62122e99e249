//! Two triangles side by side, each drawn with its own VAO and its own
//! program. Both programs share one compiled vertex shader.

use glow::HasContext;

use crate::{abs::*, shader_source};

pub const WINDOW: WindowConfig = WindowConfig {
    title: "Hello triangle excercise",
    width: 800,
    height: 800,
    resizable: false,
};

pub const ORANGE_VERTICES: [PositionVertex; 3] = [
    PositionVertex {
        position: [-0.5, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.0, -0.5, 0.0],
    },
    PositionVertex {
        position: [-0.25, 0.0, 0.0],
    },
];

pub const YELLOW_VERTICES: [PositionVertex; 3] = [
    PositionVertex {
        position: [0.0, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.5, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.25, 0.0, 0.0],
    },
];

pub fn run() -> Result<(), AppError> {
    let mut app = App::new(&WINDOW)?;

    let vertex = Shader::new(
        &app.gl,
        ShaderStage::Vertex,
        shader_source!("hello_triangle", "vertex_shader.glsl"),
    )?;
    let orange = Shader::new(
        &app.gl,
        ShaderStage::Fragment,
        shader_source!("hello_triangle", "orange_fragment_shader.glsl"),
    )?;
    let yellow = Shader::new(
        &app.gl,
        ShaderStage::Fragment,
        shader_source!("hello_triangle", "yellow_fragment_shader.glsl"),
    )?;
    let orange_program = ShaderProgram::new(&app.gl, &[&vertex, &orange])?;
    let yellow_program = ShaderProgram::new(&app.gl, &[&vertex, &yellow])?;
    drop((vertex, orange, yellow));

    let orange_triangle = VertexArray::new(&app.gl, &ORANGE_VERTICES)?;
    let yellow_triangle = VertexArray::new(&app.gl, &YELLOW_VERTICES)?;

    app.run(|gl| {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        orange_program.use_program();
        orange_triangle.draw();
        yellow_program.use_program();
        yellow_triangle.draw();
    });

    Ok(())
}
