//! The first triangle: one orange triangle on a teal background, in a
//! window whose viewport follows its size.

use glow::HasContext;

use crate::abs::*;

pub const WINDOW: WindowConfig = WindowConfig {
    title: "LearnOpenGL",
    width: 800,
    height: 600,
    resizable: true,
};

pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

pub const VERTICES: [PositionVertex; 3] = [
    PositionVertex {
        position: [-0.5, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.5, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.0, 0.5, 0.0],
    },
];

pub fn run() -> Result<(), AppError> {
    let mut app = App::new(&WINDOW)?;
    let program = crate::shader_program!(app.gl, "practice")?;
    let triangle = VertexArray::new(&app.gl, &VERTICES)?;

    let [r, g, b, a] = CLEAR_COLOR;
    app.run(|gl| {
        unsafe {
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        program.use_program();
        triangle.draw();
    });

    Ok(())
}
