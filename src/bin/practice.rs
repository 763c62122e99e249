fn main() -> std::process::ExitCode {
    gl_practice::launch(gl_practice::Exercise::Practice)
}
