//! The exercises, one module each, in the order they build on each other.

use crate::abs::{AppError, WindowConfig};

pub mod hello_triangle;
pub mod practice;
pub mod shader_data;
pub mod texture;
pub mod uniforms;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    Practice,
    HelloTriangle,
    ShaderData,
    Uniforms,
    Texture,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::Practice,
        Exercise::HelloTriangle,
        Exercise::ShaderData,
        Exercise::Uniforms,
        Exercise::Texture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Exercise::Practice => "practice",
            Exercise::HelloTriangle => "hello_triangle",
            Exercise::ShaderData => "shader_data",
            Exercise::Uniforms => "uniforms",
            Exercise::Texture => "texture",
        }
    }

    pub fn window(self) -> &'static WindowConfig {
        match self {
            Exercise::Practice => &practice::WINDOW,
            Exercise::HelloTriangle => &hello_triangle::WINDOW,
            Exercise::ShaderData => &shader_data::WINDOW,
            Exercise::Uniforms => &uniforms::WINDOW,
            Exercise::Texture => &texture::WINDOW,
        }
    }

    /// Opens the exercise's window and renders until it is closed.
    pub fn run(self) -> Result<(), AppError> {
        log::info!("running exercise {}", self.name());
        match self {
            Exercise::Practice => practice::run(),
            Exercise::HelloTriangle => hello_triangle::run(),
            Exercise::ShaderData => shader_data::run(),
            Exercise::Uniforms => uniforms::run(),
            Exercise::Texture => texture::run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::validate_indices;
    use crate::shader_source;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Exercise::ALL.iter().map(|e| e.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Exercise::ALL.len());
    }

    #[test]
    fn window_sizes() {
        assert_eq!(
            (Exercise::Practice.window().width, Exercise::Practice.window().height),
            (800, 600)
        );
        for exercise in &Exercise::ALL[1..] {
            let window = exercise.window();
            assert_eq!((window.width, window.height), (800, 800));
            assert!(!window.resizable);
        }
    }

    #[test]
    fn only_the_first_triangle_resizes() {
        assert!(Exercise::Practice.window().resizable);
    }

    #[test]
    fn triangles_are_side_by_side_on_the_bottom_edge() {
        let orange = &hello_triangle::ORANGE_VERTICES;
        let yellow = &hello_triangle::YELLOW_VERTICES;

        // the orange triangle's right corner is the yellow triangle's left one
        assert_eq!(orange[1].position, yellow[0].position);
        assert!(orange.iter().all(|v| v.position[0] <= 0.0));
        assert!(yellow.iter().all(|v| v.position[0] >= 0.0));
    }

    #[test]
    fn shader_data_has_one_primary_color_per_vertex() {
        let colors: Vec<_> = shader_data::VERTICES.iter().map(|v| v.color).collect();
        assert_eq!(
            colors,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn quad_indices_form_two_triangles_over_four_vertices() {
        assert_eq!(texture::INDICES.len() % 3, 0);
        assert_eq!(
            validate_indices(&texture::INDICES, texture::VERTICES.len()),
            Ok(())
        );
        // both triangles share the diagonal from bottom right to top left
        assert_eq!(texture::INDICES[1], texture::INDICES[3]);
        assert_eq!(texture::INDICES[2], texture::INDICES[5]);
    }

    #[test]
    fn texture_coordinates_span_the_unit_square() {
        for vertex in &texture::VERTICES {
            let expected = vertex.position.map(|p| if p > 0.0 { 1.0 } else { 0.0 });
            assert_eq!(vertex.tex_coord, [expected[0], expected[1]]);
        }
    }

    #[test]
    fn shaders_target_gl_330_core() {
        let sources = [
            shader_source!("practice", "vertex_shader.glsl"),
            shader_source!("practice", "fragment_shader.glsl"),
            shader_source!("hello_triangle", "vertex_shader.glsl"),
            shader_source!("hello_triangle", "orange_fragment_shader.glsl"),
            shader_source!("hello_triangle", "yellow_fragment_shader.glsl"),
            shader_source!("shader_data", "vertex_shader.glsl"),
            shader_source!("shader_data", "fragment_shader.glsl"),
            shader_source!("uniforms", "vertex_shader.glsl"),
            shader_source!("uniforms", "fragment_shader.glsl"),
            shader_source!("texture", "vertex_shader.glsl"),
            shader_source!("texture", "fragment_shader.glsl"),
        ];
        for source in sources {
            assert!(source.starts_with("#version 330 core"));
        }
    }

    #[test]
    fn shaders_declare_what_the_host_sets() {
        let color_fragment = shader_source!("uniforms", "fragment_shader.glsl");
        assert!(color_fragment.contains(&format!("uniform vec4 {};", uniforms::COLOR_UNIFORM)));

        let sampled_fragment = shader_source!("texture", "fragment_shader.glsl");
        assert!(sampled_fragment.contains(&format!(
            "uniform sampler2D {};",
            texture::SAMPLER_UNIFORM
        )));

        let textured_vertex = shader_source!("texture", "vertex_shader.glsl");
        for location in 0..3 {
            assert!(textured_vertex.contains(&format!("layout (location = {location})")));
        }
        let colored_vertex = shader_source!("shader_data", "vertex_shader.glsl");
        assert!(colored_vertex.contains("layout (location = 1) in vec3 aColor;"));
    }
}
