//! Vertex data beyond positions: every vertex carries its own color, which
//! the rasterizer interpolates across the triangle.

use glow::HasContext;

use crate::abs::*;

pub const WINDOW: WindowConfig = WindowConfig {
    title: "Hello triangle excercise",
    width: 800,
    height: 800,
    resizable: false,
};

pub const VERTICES: [ColorVertex; 3] = [
    ColorVertex {
        position: [-0.5, -0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    ColorVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    ColorVertex {
        position: [0.0, 0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

pub fn run() -> Result<(), AppError> {
    let mut app = App::new(&WINDOW)?;
    let program = crate::shader_program!(app.gl, "shader_data")?;
    let triangle = VertexArray::new(&app.gl, &VERTICES)?;

    app.run(|gl| {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        program.use_program();
        triangle.draw();
    });

    Ok(())
}
