//! Vertex array management.
//!
//! This module defines the [`VertexArray`] struct owning a VAO, its VBO and an
//! optional EBO. Vertices should implement the [`Vertex`] trait.

use std::{fmt, mem::offset_of, sync::Arc};

use glow::HasContext;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// A vertex carrying only its position, read at `layout (location = 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<PositionVertex>() as i32;

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
        }
    }
}

/// Position plus an RGB color at location 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for ColorVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<ColorVertex>() as i32;

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);

            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(ColorVertex, color) as i32,
            );
            gl.enable_vertex_attrib_array(1);
        }
    }
}

/// Position, color and texture coordinates at locations 0, 1 and 2.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex for TexturedVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<TexturedVertex>() as i32;

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);

            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(TexturedVertex, color) as i32,
            );
            gl.enable_vertex_attrib_array(1);

            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(TexturedVertex, tex_coord) as i32,
            );
            gl.enable_vertex_attrib_array(2);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexError {
    /// An index refers past the end of the vertex data.
    IndexOutOfBounds { index: u32, vertex_count: usize },
    Gl(String),
}

impl fmt::Display for VertexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexError::IndexOutOfBounds {
                index,
                vertex_count,
            } => write!(
                f,
                "ERROR::EBO::INDEX_OUT_OF_BOUNDS\nindex {index} with {vertex_count} vertices"
            ),
            VertexError::Gl(reason) => write!(f, "ERROR::VAO::CREATION_FAILED\n{reason}"),
        }
    }
}

impl std::error::Error for VertexError {}

/// Checks that every index addresses one of `vertex_count` vertices.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<(), VertexError> {
    match indices.iter().find(|&&i| i as usize >= vertex_count) {
        Some(&index) => Err(VertexError::IndexOutOfBounds {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

/// Creates `count` handles, releasing the ones already made if one fails.
fn create_handles<H: Copy>(
    count: usize,
    mut create: impl FnMut() -> Result<H, String>,
    mut release: impl FnMut(H),
) -> Result<Vec<H>, VertexError> {
    let mut handles = Vec::with_capacity(count);
    for _ in 0..count {
        match create() {
            Ok(handle) => handles.push(handle),
            Err(reason) => {
                handles.into_iter().for_each(&mut release);
                return Err(VertexError::Gl(reason));
            }
        }
    }
    Ok(handles)
}

/// Number of elements a draw call covers.
fn draw_count(vertex_count: usize, indices: Option<&[u32]>) -> usize {
    indices.map_or(vertex_count, <[u32]>::len)
}

fn as_bytes<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// A VAO with its vertex buffer, and an element buffer when built indexed.
pub struct VertexArray {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl VertexArray {
    /// Uploads `vertices` for drawing as a plain triangle list.
    pub fn new<V: Vertex>(gl: &Arc<glow::Context>, vertices: &[V]) -> Result<Self, VertexError> {
        Self::build(gl, vertices, None)
    }

    /// Uploads `vertices` and the `indices` drawn from them through an EBO.
    pub fn indexed<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
    ) -> Result<Self, VertexError> {
        validate_indices(indices, vertices.len())?;
        Self::build(gl, vertices, Some(indices))
    }

    fn build<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: Option<&[u32]>,
    ) -> Result<Self, VertexError> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(VertexError::Gl)?;
            let buffers = match create_handles(
                1 + usize::from(indices.is_some()),
                || gl.create_buffer(),
                |buffer| gl.delete_buffer(buffer),
            ) {
                Ok(buffers) => buffers,
                Err(err) => {
                    gl.delete_vertex_array(vao);
                    return Err(err);
                }
            };
            let vbo = buffers[0];
            let ebo = buffers.get(1).copied();

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), glow::STATIC_DRAW);

            if let (Some(ebo), Some(indices)) = (ebo, indices) {
                // the VAO records this binding
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    as_bytes(indices),
                    glow::STATIC_DRAW,
                );
            }

            V::vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            if ebo.is_some() {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                vao,
                vbo,
                ebo,
                count: draw_count(vertices.len(), indices),
            })
        }
    }

    /// Draws the vertices, or the indices when an EBO is present, as triangles.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(glow::TRIANGLES, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(glow::TRIANGLES, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }

    /// Returns the number of vertices or indices drawn.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_are_tightly_packed_floats() {
        assert_eq!(size_of::<PositionVertex>(), 3 * size_of::<f32>());
        assert_eq!(size_of::<ColorVertex>(), 6 * size_of::<f32>());
        assert_eq!(size_of::<TexturedVertex>(), 8 * size_of::<f32>());

        assert_eq!(offset_of!(ColorVertex, color), 3 * size_of::<f32>());
        assert_eq!(offset_of!(TexturedVertex, color), 3 * size_of::<f32>());
        assert_eq!(offset_of!(TexturedVertex, tex_coord), 6 * size_of::<f32>());
    }

    #[test]
    fn vertex_bytes_follow_declaration_order() {
        let vertices = [ColorVertex {
            position: [1.0, 2.0, 3.0],
            color: [4.0, 5.0, 6.0],
        }];
        let bytes = as_bytes(&vertices);

        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[12..16], &4.0f32.to_ne_bytes());
    }

    #[test]
    fn indices_within_vertex_count_pass() {
        assert_eq!(validate_indices(&[0, 1, 3, 1, 2, 3], 4), Ok(()));
        assert_eq!(validate_indices(&[], 0), Ok(()));
    }

    #[test]
    fn first_out_of_range_index_is_reported() {
        assert_eq!(
            validate_indices(&[0, 4, 7], 4),
            Err(VertexError::IndexOutOfBounds {
                index: 4,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn failed_handle_creation_releases_earlier_handles() {
        let mut next = 0;
        let mut released = Vec::new();

        let result = create_handles(
            3,
            || {
                next += 1;
                if next == 3 {
                    Err("out of names".to_string())
                } else {
                    Ok(next)
                }
            },
            |handle| released.push(handle),
        );

        assert_eq!(result, Err(VertexError::Gl("out of names".to_string())));
        assert_eq!(released, vec![1, 2]);
    }

    #[test]
    fn all_handles_created_releases_nothing() {
        let mut next = 10;
        let mut released = Vec::new();

        let handles = create_handles(
            2,
            || {
                next += 1;
                Ok(next)
            },
            |handle: u32| released.push(handle),
        );

        assert_eq!(handles, Ok(vec![11, 12]));
        assert!(released.is_empty());
    }

    #[test]
    fn indexed_draws_cover_indices_not_vertices() {
        assert_eq!(draw_count(3, None), 3);
        assert_eq!(draw_count(4, Some(&[0, 1, 3, 1, 2, 3])), 6);
    }
}
