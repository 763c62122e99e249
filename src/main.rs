use std::process::ExitCode;

use gl_practice::Exercise;

/// The exercise this binary runs; each also has its own binary under `src/bin`.
const SELECTED: Exercise = Exercise::Uniforms;

fn main() -> ExitCode {
    gl_practice::launch(SELECTED)
}
