//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU
//! texture, and [`TexturePixels`], the decoded image handed to the GPU.

use std::{fmt, path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

#[derive(Debug)]
pub enum TextureError {
    Decode(image::ImageError),
    Gl(String),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode(err) => write!(f, "Failed to load texture: {err}"),
            TextureError::Gl(reason) => write!(f, "Failed to create texture: {reason}"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode(err) => Some(err),
            TextureError::Gl(_) => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        TextureError::Decode(err)
    }
}

/// Decodes the image at `path`, format detected from its contents.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, TextureError> {
    Ok(image::ImageReader::open(path)
        .map_err(image::ImageError::IoError)?
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .decode()?)
}

/// RGB8 pixels of a decoded image, rows in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePixels {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source image before conversion.
    pub channels: u8,
    pub data: Vec<u8>,
}

impl TexturePixels {
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            channels: image.color().channel_count(),
            data: image.to_rgb8().into_raw(),
        }
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads `pixels` with repeat wrapping, trilinear minification and mipmaps.
    pub fn new(gl: &Arc<glow::Context>, pixels: &TexturePixels) -> Result<Self, TextureError> {
        let mut texture = Self::create(gl)?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture.id));
            // rows of RGB8 are not 4-byte aligned for odd widths
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGB as i32,
                pixels.width as i32,
                pixels.height as i32,
                0,
                glow::RGB,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels.data.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        texture.width = pixels.width;
        texture.height = pixels.height;
        Ok(texture)
    }

    /// Creates a texture object with the same sampling state and no image.
    pub fn empty(gl: &Arc<glow::Context>) -> Result<Self, TextureError> {
        Self::create(gl)
    }

    fn create(gl: &Arc<glow::Context>) -> Result<Self, TextureError> {
        unsafe {
            let texture = gl.create_texture().map_err(TextureError::Gl)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: 0,
                height: 0,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
