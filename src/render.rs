//! The renderer: owns the scene's GL objects and issues the per-frame draw.

use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;

use crate::{
    config::SceneConfig,
    geometry::Geometry,
    shaders,
    types::{Color, Vertex, COLOR_ATTRIBUTE, POSITION_ATTRIBUTE},
};

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. In practice, this is unreachable for
/// normal viewport dimensions.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}

/// Buffers cleared at the start of every frame.
fn clear_mask(depth_test: bool) -> u32 {
    if depth_test {
        glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT
    } else {
        glow::COLOR_BUFFER_BIT
    }
}

/// Model matrix shared by every scene: the mesh sits at the origin.
const MODEL: Mat4 = Mat4::IDENTITY;

/// The linked program and its cached `MVP` state.
struct ProgramState {
    program: glow::Program,
    /// `None` when the program has no (active) `MVP` uniform.
    mvp_location: Option<glow::UniformLocation>,
    /// Column-major, ready for `glUniformMatrix4fv`.
    mvp: [f32; 16],
}

/// Draws one static mesh every frame.
///
/// All GL objects are created once in [`new`](Self::new) and released in
/// [`destroy`](Self::destroy); nothing is allocated per frame.
///
/// # Example
///
/// ```no_run
/// # use playground::{Renderer, SceneConfig};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>) {
/// // During setup (with a current GL context):
/// let renderer = unsafe { Renderer::new(gl, &SceneConfig::cube()) }.unwrap();
///
/// // Each frame, before swapping buffers:
/// unsafe { renderer.render() };
///
/// // Once, before the context goes away:
/// unsafe { renderer.destroy() };
/// # }
/// ```
pub struct Renderer {
    /// The OpenGL context, shared via [`Arc`] with the window that owns it.
    gl: Arc<glow::Context>,

    /// The mesh being drawn.
    geometry: Geometry,
    /// Whether depth testing is enabled each frame.
    depth_test: bool,

    /// Shader program, or `None` for the fixed-function pipeline.
    program: Option<ProgramState>,

    /// Vertex array object holding the attribute layout.
    vao: glow::VertexArray,
    /// Vertex positions, attribute 0.
    vertex_buffer: glow::Buffer,
    /// Per-vertex colors, attribute 1.
    color_buffer: Option<glow::Buffer>,
}

impl Renderer {
    /// Create a new renderer.
    ///
    /// Uploads the scene's vertex (and color) data into static buffers,
    /// builds the shader program if the scene has one, and sets the clear
    /// color.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid. The caller must ensure
    /// that [`destroy`](Self::destroy) is called before the context is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error string if a shader file cannot be read, shader
    /// compilation or program linking fails, or GL object creation fails.
    pub unsafe fn new(gl: Arc<glow::Context>, scene: &SceneConfig) -> Result<Self, String> {
        let geometry = scene.geometry;

        let program = match &scene.shaders {
            Some(source) => {
                let program = unsafe { shaders::load_program(&gl, source)? };
                let mvp_location =
                    unsafe { gl.get_uniform_location(program, shaders::MVP_UNIFORM) };
                if mvp_location.is_none() {
                    log::warn!("program has no active {} uniform", shaders::MVP_UNIFORM);
                }
                let mvp = scene
                    .camera
                    .map_or(MODEL, |camera| camera.mvp(MODEL))
                    .to_cols_array();
                Some(ProgramState {
                    program,
                    mvp_location,
                    mvp,
                })
            }
            None => None,
        };

        let (vao, vertex_buffer, color_buffer) = unsafe {
            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));

            let vertex_buffer = upload_static(&gl, geometry.vertices())?;
            log::debug!(
                "uploaded {} vertices ({} bytes)",
                geometry.vertices().len(),
                std::mem::size_of_val(geometry.vertices()),
            );

            let color_buffer = match geometry.colors() {
                Some(colors) => {
                    let buffer = upload_static(&gl, colors)?;
                    log::debug!("uploaded {} colors", colors.len());
                    Some(buffer)
                }
                None => None,
            };

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            (vao, vertex_buffer, color_buffer)
        };

        let [r, g, b, a] = scene.clear_color;
        unsafe { gl.clear_color(r, g, b, a) };

        Ok(Self {
            gl,
            geometry,
            depth_test: scene.depth_test,
            program,
            vao,
            vertex_buffer,
            color_buffer,
        })
    }

    /// Draw one frame into the currently-bound framebuffer.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn render(&self) {
        let gl = &self.gl;

        unsafe {
            gl.clear(clear_mask(self.depth_test));

            if let Some(state) = &self.program {
                gl.use_program(Some(state.program));
            }

            if self.depth_test {
                // Keep the fragment closest to the camera.
                gl.enable(glow::DEPTH_TEST);
                gl.depth_func(glow::LESS);
            }

            if let Some(state) = &self.program {
                gl.uniform_matrix_4_f32_slice(state.mvp_location.as_ref(), false, &state.mvp);
            }

            gl.bind_vertex_array(Some(self.vao));

            bind_attribute::<Vertex>(gl, POSITION_ATTRIBUTE, self.vertex_buffer);
            if let Some(buffer) = self.color_buffer {
                bind_attribute::<Color>(gl, COLOR_ATTRIBUTE, buffer);
            }

            gl.draw_arrays(glow::TRIANGLES, 0, self.geometry.vertex_count());

            gl.disable_vertex_attrib_array(POSITION_ATTRIBUTE);
            if self.color_buffer.is_some() {
                gl.disable_vertex_attrib_array(COLOR_ATTRIBUTE);
            }
        }
    }

    /// Match the viewport to a new surface size.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn resize(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, gl_size(width), gl_size(height)) };
    }

    /// Clean up all GL resources owned by this renderer.
    ///
    /// # Safety
    ///
    /// Must be called with the same GL context that was used to create the
    /// renderer, and must be called exactly once.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.delete_buffer(self.vertex_buffer);
            if let Some(buffer) = self.color_buffer {
                gl.delete_buffer(buffer);
            }
            if let Some(state) = &self.program {
                gl.delete_program(state.program);
            }
            gl.delete_vertex_array(self.vao);
        }
        log::debug!("released GL objects");
    }
}

/// Create an `ARRAY_BUFFER`, leave it bound and fill it with `data`.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn upload_static<T: bytemuck::Pod>(
    gl: &glow::Context,
    data: &[T],
) -> Result<glow::Buffer, String> {
    unsafe {
        let buffer = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            glow::STATIC_DRAW,
        );
        Ok(buffer)
    }
}

/// Point attribute `index` at a tightly packed `vec3` buffer.
///
/// # Safety
///
/// Requires a valid, current OpenGL context with a vertex array bound.
unsafe fn bind_attribute<T>(gl: &glow::Context, index: u32, buffer: glow::Buffer) {
    unsafe {
        gl.enable_vertex_attrib_array(index);
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.vertex_attrib_pointer_f32(
            index,
            component_count::<T>(),
            glow::FLOAT,
            false,
            0,
            0,
        );
    }
}

/// Number of `f32` components in one `T`.
fn component_count<T>() -> i32 {
    // Vertex types are a handful of floats.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    {
        (std::mem::size_of::<T>() / std::mem::size_of::<f32>()) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_mask_includes_depth_only_when_testing() {
        assert_eq!(clear_mask(false), glow::COLOR_BUFFER_BIT);
        assert_eq!(
            clear_mask(true),
            glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT
        );
    }

    #[test]
    fn attributes_are_three_floats() {
        assert_eq!(component_count::<Vertex>(), 3);
        assert_eq!(component_count::<Color>(), 3);
    }

    #[test]
    fn gl_size_accepts_window_dimensions() {
        assert_eq!(gl_size(1024), 1024);
        assert_eq!(gl_size(768), 768);
    }

    #[test]
    #[should_panic(expected = "dimension exceeds i32::MAX")]
    fn gl_size_rejects_overflow() {
        gl_size(u32::MAX);
    }
}
