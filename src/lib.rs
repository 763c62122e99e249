//! OpenGL practice exercises: each opens a window, compiles a small shader
//! pair, uploads a few hardcoded vertices and renders them until Escape.

use std::process::ExitCode;

pub mod abs;
pub mod exercises;
pub mod logging;

pub use exercises::Exercise;

/// Entry point shared by every exercise binary.
pub fn launch(exercise: Exercise) -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("logger already installed: {e}");
    }

    match exercise.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
