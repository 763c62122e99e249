//! Fragment color set from the host through a uniform.

use glam::Vec4;
use glow::HasContext;

use crate::abs::*;
use crate::exercises::hello_triangle::{ORANGE_VERTICES, YELLOW_VERTICES};

pub const WINDOW: WindowConfig = WindowConfig {
    title: "Hello triangle excercise",
    width: 800,
    height: 800,
    resizable: false,
};

/// Name of the fragment color uniform.
pub const COLOR_UNIFORM: &str = "color";

pub const ORANGE: Vec4 = Vec4::new(1.0, 0.5, 0.2, 1.0);
pub const YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

/// The hello-triangle pair drawn by a single program, recolored between draws.
pub fn run() -> Result<(), AppError> {
    let mut app = App::new(&WINDOW)?;
    let program = crate::shader_program!(app.gl, "uniforms")?;
    let orange_triangle = VertexArray::new(&app.gl, &ORANGE_VERTICES)?;
    let yellow_triangle = VertexArray::new(&app.gl, &YELLOW_VERTICES)?;

    app.run(|gl| {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        program.use_program();
        program.set_uniform(COLOR_UNIFORM, ORANGE);
        orange_triangle.draw();

        program.set_uniform(COLOR_UNIFORM, YELLOW);
        yellow_triangle.draw();
    });

    Ok(())
}
