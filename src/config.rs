//! Window and scene settings, with one preset per program variant.

use glam::Vec3;

use crate::camera::Camera;
use crate::geometry::Geometry;
use crate::shaders::ShaderSource;

/// Dark blue.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.4, 0.0];

/// Window and context settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
    /// Multisample count requested for the default framebuffer.
    pub samples: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Playground".to_string(),
            width: 1024,
            height: 768,
            samples: 4,
        }
    }
}

impl WindowConfig {
    /// Default window with a different title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Width over height.
    #[expect(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// What gets drawn and how.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// The mesh uploaded once and drawn every frame.
    pub geometry: Geometry,
    /// Shader program, or `None` for the fixed-function pipeline.
    pub shaders: Option<ShaderSource>,
    /// Enable depth testing with `LESS`.
    pub depth_test: bool,
    /// Camera feeding the `MVP` uniform. Ignored without a program.
    pub camera: Option<Camera>,
    /// RGBA color the framebuffer is cleared to.
    pub clear_color: [f32; 4],
}

impl SceneConfig {
    /// One white triangle through the fixed-function pipeline.
    pub fn triangle() -> Self {
        Self {
            geometry: Geometry::Triangle,
            shaders: None,
            depth_test: false,
            camera: None,
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// One red triangle seen through a perspective camera at `(4, 3, 3)`.
    pub fn triangle_mvp() -> Self {
        Self {
            geometry: Geometry::Triangle,
            shaders: Some(ShaderSource::Builtin),
            depth_test: false,
            camera: Some(Camera::looking_at_origin(Vec3::new(4.0, 3.0, 3.0))),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// A depth-tested cube with per-vertex colors, camera at `(4, 3, -3)`,
    /// shaders read from `shaders/` under the working directory.
    pub fn cube() -> Self {
        Self {
            geometry: Geometry::Cube,
            shaders: Some(ShaderSource::files(
                "shaders/simplevertexshader.glsl",
                "shaders/simplefragmentshader.glsl",
            )),
            depth_test: true,
            camera: Some(Camera::looking_at_origin(Vec3::new(4.0, 3.0, -3.0))),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// Whether a shader program is built. Without one the context must
    /// expose the compatibility profile.
    pub fn uses_program(&self) -> bool {
        self.shaders.is_some()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::cube()
    }
}

/// Everything [`launch`](crate::launch) needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Scene settings.
    pub scene: SceneConfig,
}

impl Config {
    /// Pair a window with a scene.
    pub fn new(window: WindowConfig, scene: SceneConfig) -> Self {
        Self { window, scene }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_fixed_playground_size() {
        let window = WindowConfig::default();
        assert_eq!(window.title, "Playground");
        assert_eq!((window.width, window.height), (1024, 768));
        assert_eq!(window.samples, 4);
        assert!((window.aspect_ratio() - 4.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn default_config_is_cube() {
        let config = Config::default();
        assert_eq!(config.scene, SceneConfig::cube());
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn triangle_uses_fixed_function_pipeline() {
        let scene = SceneConfig::triangle();
        assert_eq!(scene.geometry, Geometry::Triangle);
        assert!(!scene.uses_program());
        assert!(scene.camera.is_none());
        assert!(!scene.depth_test);
    }

    #[test]
    fn triangle_mvp_uses_builtin_program() {
        let scene = SceneConfig::triangle_mvp();
        assert_eq!(scene.shaders, Some(ShaderSource::Builtin));
        assert_eq!(
            scene.camera.map(|c| c.eye),
            Some(Vec3::new(4.0, 3.0, 3.0))
        );
    }

    #[test]
    fn cube_reads_shader_files_and_tests_depth() {
        let scene = SceneConfig::cube();
        assert!(scene.depth_test);
        assert!(matches!(scene.shaders, Some(ShaderSource::Files { .. })));
        assert_eq!(
            scene.camera.map(|c| c.eye),
            Some(Vec3::new(4.0, 3.0, -3.0))
        );
        assert_eq!(scene.clear_color, [0.0, 0.0, 0.4, 0.0]);
    }

    #[test]
    fn titled_keeps_default_size() {
        let window = WindowConfig::titled("Triangle");
        assert_eq!(window.title, "Triangle");
        assert_eq!((window.width, window.height), (1024, 768));
    }
}
