//! Introductory OpenGL programs built on [glow] and [glutin].
//!
//! Each program opens a 1024×768 window, uploads one static mesh (a triangle
//! or a cube, optionally with per-vertex colors), optionally builds a shader
//! program, and then clears, draws and swaps until Escape is pressed or the
//! window is closed.
//!
//! The variants differ only in their [`SceneConfig`]:
//!
//! | Binary         | Mesh     | Program               | Depth test | Camera       |
//! |----------------|----------|-----------------------|------------|--------------|
//! | `triangle`     | triangle | none (fixed function) | no         | none         |
//! | `triangle_mvp` | triangle | built-in              | no         | `(4, 3, 3)`  |
//! | `playground`   | cube     | `shaders/*.glsl`      | yes        | `(4, 3, -3)` |
//!
//! # Safety
//!
//! [`Renderer`] issues raw GL calls; creating and using one requires a valid,
//! current OpenGL context. [`launch`] and [`run`] take care of that.
//!
//! [glow]: https://docs.rs/glow
//! [glutin]: https://docs.rs/glutin

mod app;
pub mod camera;
mod config;
mod error;
pub mod geometry;
pub mod logging;
mod render;
pub mod shaders;
mod types;

pub use app::{launch, run, wait_for_keypress};
pub use config::{Config, SceneConfig, WindowConfig, DEFAULT_CLEAR_COLOR};
pub use error::{failure_message, InitFailure};
pub use render::Renderer;
pub use types::{Color, Vertex, COLOR_ATTRIBUTE, POSITION_ATTRIBUTE};
