//! GLSL shader sources and compilation helpers.
//!
//! All shaders target GLSL 3.30 core (OpenGL 3.3).

use std::path::{Path, PathBuf};

use glow::HasContext;

/// Name of the `mat4` uniform every MVP-aware vertex shader declares.
pub const MVP_UNIFORM: &str = "MVP";

/// Vertex shader for the transformed triangle.
///
/// # Uniforms
///
/// | Name  | Type   | Description                        |
/// |-------|--------|------------------------------------|
/// | `MVP` | `mat4` | Model-view-projection transform    |
pub const TRIANGLE_VERTEX_SRC: &str = r"#version 330 core

layout(location = 0) in vec3 vertexPosition_modelspace;

uniform mat4 MVP;

void main() {
    gl_Position = MVP * vec4(vertexPosition_modelspace, 1.0);
}
";

/// Fragment shader for the transformed triangle: every fragment is red.
pub const TRIANGLE_FRAGMENT_SRC: &str = r"#version 330 core

out vec3 color;

void main() {
    color = vec3(1.0, 0.0, 0.0);
}
";

/// Where a scene's shader program comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShaderSource {
    /// [`TRIANGLE_VERTEX_SRC`] and [`TRIANGLE_FRAGMENT_SRC`].
    Builtin,
    /// A vertex/fragment pair read from disk when the program is built.
    Files {
        /// Path to the vertex stage source.
        vertex: PathBuf,
        /// Path to the fragment stage source.
        fragment: PathBuf,
    },
}

impl ShaderSource {
    /// A vertex/fragment file pair, resolved relative to the working
    /// directory.
    pub fn files(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        ShaderSource::Files {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Read a shader stage from a text file.
///
/// # Errors
///
/// Returns the path and the I/O error if the file cannot be read.
pub fn read_shader_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Impossible to open {}: {e}", path.display()))
}

/// Build the program described by `source`.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns a descriptive error string if a source file cannot be read, or
/// if shader compilation or program linking fails.
pub unsafe fn load_program(
    gl: &glow::Context,
    source: &ShaderSource,
) -> Result<glow::Program, String> {
    match source {
        ShaderSource::Builtin => unsafe {
            compile_program(gl, TRIANGLE_VERTEX_SRC, TRIANGLE_FRAGMENT_SRC)
        },
        ShaderSource::Files { vertex, fragment } => {
            let vertex_src = read_shader_source(vertex)?;
            let fragment_src = read_shader_source(fragment)?;
            log::info!("compiling shader: {}", vertex.display());
            log::info!("compiling shader: {}", fragment.display());
            unsafe { compile_program(gl, &vertex_src, &fragment_src) }
        }
    }
}

/// Compile a shader program from vertex and fragment source strings.
///
/// The compiled shader objects are detached and deleted after successful
/// linking, so only the program handle needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns a descriptive error string if shader compilation or program
/// linking fails.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, String> {
    let program = unsafe { gl.create_program() }?;

    let vs = unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) }?;
    let fs = match unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) } {
        Ok(fs) => fs,
        Err(e) => {
            unsafe {
                gl.delete_shader(vs);
                gl.delete_program(program);
            }
            return Err(e);
        }
    };

    log::debug!("linking program");
    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(format!("Program link error: {log}"));
        }

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile a single shader stage (vertex or fragment) from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, String> {
    unsafe {
        let shader = gl.create_shader(shader_type)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(format!("Shader compile error: {log}"));
        }

        Ok(shader)
    }
}
