//! A textured quad drawn from four vertices and six indices through an
//! element buffer.

use glow::HasContext;

use crate::abs::*;

pub const WINDOW: WindowConfig = WindowConfig {
    title: "Hello triangle excercise",
    width: 800,
    height: 800,
    resizable: false,
};

/// Image sampled by the quad, relative to the working directory.
pub const TEXTURE_PATH: &str = "assets/64x64.jpg";

pub const SAMPLER_UNIFORM: &str = "textureSampler";

pub const VERTICES: [TexturedVertex; 4] = [
    // top right
    TexturedVertex {
        position: [0.5, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
        tex_coord: [1.0, 1.0],
    },
    // bottom right
    TexturedVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
        tex_coord: [1.0, 0.0],
    },
    // bottom left
    TexturedVertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 0.0, 1.0],
        tex_coord: [0.0, 0.0],
    },
    // top left
    TexturedVertex {
        position: [-0.5, 0.5, 0.0],
        color: [1.0, 1.0, 0.0],
        tex_coord: [0.0, 1.0],
    },
];

pub const INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

/// Loads [`TEXTURE_PATH`], falling back to an empty texture the quad still samples.
fn load_wall_texture(app: &App) -> Result<Texture, TextureError> {
    match load_image(TEXTURE_PATH) {
        Ok(image) => {
            let pixels = TexturePixels::from_image(&image);
            log::info!(
                "loaded {TEXTURE_PATH}: {}x{} with {} channels",
                pixels.width,
                pixels.height,
                pixels.channels
            );
            Texture::new(&app.gl, &pixels)
        }
        Err(err) => {
            log::warn!("{err}");
            Texture::empty(&app.gl)
        }
    }
}

pub fn run() -> Result<(), AppError> {
    let mut app = App::new(&WINDOW)?;
    let program = crate::shader_program!(app.gl, "texture")?;
    let wall = load_wall_texture(&app)?;
    let quad = VertexArray::indexed(&app.gl, &VERTICES, &INDICES)?;
    log::debug!(
        "quad draws {} indices over a {}x{} texture",
        quad.count(),
        wall.width(),
        wall.height()
    );

    program.use_program();
    program.set_uniform(SAMPLER_UNIFORM, 0);

    app.run(|gl| {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        program.use_program();
        wall.bind(0);
        quad.draw();
    });

    Ok(())
}
