//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context every exercise renders into, and the [`AppError`]
//! type every exercise run reports through.

use std::{fmt, sync::Arc};

use glow::HasContext;
use sdl2::{event::Event, event::WindowEvent, keyboard::Keycode};

use crate::abs::{ShaderError, TextureError, VertexError};

/// Fixed window settings of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    /// Resizable windows follow the framebuffer size with the viewport.
    pub resizable: bool,
}

/// Any failure that ends an exercise run.
#[derive(Debug)]
pub enum AppError {
    WindowCreation(String),
    GlLoader(String),
    Shader(ShaderError),
    Vertex(VertexError),
    Gl(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::WindowCreation(reason) => {
                write!(f, "ERROR::WINDOW::FAILED_TO_CREATE\n{reason}")
            }
            AppError::GlLoader(reason) => write!(f, "ERROR::GL::FAILED_TO_INITIALIZE\n{reason}"),
            AppError::Shader(err) => err.fmt(f),
            AppError::Vertex(err) => err.fmt(f),
            AppError::Gl(reason) => write!(f, "ERROR::GL::OBJECT_CREATION_FAILED\n{reason}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Shader(err) => Some(err),
            AppError::Vertex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for AppError {
    fn from(err: ShaderError) -> Self {
        AppError::Shader(err)
    }
}

impl From<VertexError> for AppError {
    fn from(err: VertexError) -> Self {
        match err {
            VertexError::Gl(reason) => AppError::Gl(reason),
            other => AppError::Vertex(other),
        }
    }
}

impl From<TextureError> for AppError {
    fn from(err: TextureError) -> Self {
        AppError::Gl(err.to_string())
    }
}

/// What the render loop does with a polled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Close,
    Resize(i32, i32),
}

/// Maps an SDL event onto the render loop's reaction to it.
pub fn loop_action(event: &Event) -> LoopAction {
    match event {
        Event::Quit { .. } => LoopAction::Close,
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => LoopAction::Close,
        Event::Window {
            win_event: WindowEvent::SizeChanged(width, height),
            ..
        } => LoopAction::Resize(*width, *height),
        _ => LoopAction::Continue,
    }
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    config: WindowConfig,
}

impl App {
    /// Opens a window for the given config with a current OpenGL 3.3 core context.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::WindowCreation)?;
        let video_subsystem = sdl.video().map_err(AppError::WindowCreation)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let mut builder = video_subsystem.window(config.title, config.width, config.height);
        builder.opengl().position_centered();
        if config.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| AppError::WindowCreation(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(AppError::GlLoader)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::GlLoader)?;
        if let Err(e) = video_subsystem.gl_set_swap_interval(1) {
            log::warn!("vsync unavailable: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        if version.is_empty() {
            return Err(AppError::GlLoader(
                "no OpenGL functions could be loaded".to_string(),
            ));
        }
        log::info!("created \"{}\" with OpenGL {version}", config.title);

        let (width, height) = window.drawable_size();
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        let event_pump = sdl.event_pump().map_err(AppError::WindowCreation)?;

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
            config: *config,
        })
    }

    /// Runs the render loop until Escape is pressed or the window is closed.
    ///
    /// `frame` issues the frame's clear and draw calls; the back buffer is
    /// swapped after it returns.
    pub fn run(&mut self, mut frame: impl FnMut(&glow::Context)) {
        let mut should_close = false;
        let mut frames: u64 = 0;

        while !should_close {
            for event in self.event_pump.poll_iter() {
                match loop_action(&event) {
                    LoopAction::Close => should_close = true,
                    // the event reports window coordinates, the viewport wants pixels
                    LoopAction::Resize(..) if self.config.resizable => {
                        let (width, height) = self.window.drawable_size();
                        unsafe {
                            self.gl.viewport(0, 0, width as i32, height as i32);
                        }
                    }
                    _ => {}
                }
            }

            frame(&self.gl);
            self.window.gl_swap_window();
            frames += 1;
        }

        log::info!("closing \"{}\" after {frames} frames", self.config.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::{Mod, Scancode};

    #[test]
    fn quit_event_closes_loop() {
        assert_eq!(loop_action(&Event::Quit { timestamp: 0 }), LoopAction::Close);
    }

    fn key_down(keycode: Keycode, scancode: Scancode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: Some(scancode),
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    #[test]
    fn escape_closes_loop() {
        assert_eq!(
            loop_action(&key_down(Keycode::Escape, Scancode::Escape)),
            LoopAction::Close
        );
    }

    #[test]
    fn other_keys_keep_looping() {
        assert_eq!(
            loop_action(&key_down(Keycode::Space, Scancode::Space)),
            LoopAction::Continue
        );
        assert_eq!(
            loop_action(&Event::KeyDown {
                timestamp: 0,
                window_id: 1,
                keycode: None,
                scancode: None,
                keymod: Mod::NOMOD,
                repeat: false,
            }),
            LoopAction::Continue
        );
    }

    #[test]
    fn size_change_resizes_viewport() {
        let event = Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: WindowEvent::SizeChanged(1024, 768),
        };
        assert_eq!(loop_action(&event), LoopAction::Resize(1024, 768));
    }

    #[test]
    fn unrelated_events_keep_looping() {
        assert_eq!(
            loop_action(&Event::AppLowMemory { timestamp: 0 }),
            LoopAction::Continue
        );
    }

    #[test]
    fn window_diagnostic_keeps_fixed_prefix() {
        let err = AppError::WindowCreation("no display".to_string());
        assert_eq!(err.to_string(), "ERROR::WINDOW::FAILED_TO_CREATE\nno display");
    }

    #[test]
    fn shader_errors_convert_and_keep_source() {
        use std::error::Error;

        let err: AppError = ShaderError::Link {
            log: "bad".to_string(),
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("ERROR::PROGRAM::SHADER::LINKING_FAILED"));
    }

    #[test]
    fn vertex_gl_failures_become_gl_errors() {
        let err: AppError = VertexError::Gl("out of memory".to_string()).into();
        assert!(matches!(err, AppError::Gl(_)));
    }
}
