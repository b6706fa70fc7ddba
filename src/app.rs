//! Window, GL context and the render loop.

use std::io::Read;
use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributes, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext,
    Version,
};
use glow::HasContext as _;
use glutin::display::GetGlDisplay as _;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::config::{Config, SceneConfig};
use crate::error::{failure_message, InitFailure};
use crate::logging::{init_logging, LoggingConfig};
use crate::render::Renderer;

/// Depth buffer bits requested when the scene tests depth.
const DEPTH_BITS: u8 = 24;

/// Run a program variant to completion and return its process exit code.
///
/// Returns `0` after a normal close. On failure, prints a message to stderr,
/// waits for a keypress and returns `-1`.
pub fn launch(config: Config) -> i32 {
    init_logging(LoggingConfig::default());

    match run(config) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("{}", failure_message(&err));
            wait_for_keypress(std::io::stdin().lock());
            -1
        }
    }
}

/// Open the window, draw until Escape or close, then release everything.
///
/// # Errors
///
/// Startup failures carry an [`InitFailure`] in their chain. Shader and GL
/// object errors, and swap failures during the loop, are returned as-is.
pub fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::new().context(InitFailure::WindowSystem)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Block until one byte (or end of input) arrives.
pub fn wait_for_keypress(mut input: impl Read) {
    let mut byte = [0u8; 1];
    let _ = input.read(&mut byte);
}

/// Whether a key event ends the loop.
fn is_exit_key(key: &Key, state: ElementState) -> bool {
    state == ElementState::Pressed && *key == Key::Named(NamedKey::Escape)
}

/// GL version and profile to ask for.
///
/// Fixed-function drawing needs the compatibility profile.
fn context_request(scene: &SceneConfig) -> (Version, GlProfile) {
    if scene.uses_program() {
        (Version::new(3, 3), GlProfile::Core)
    } else {
        (Version::new(2, 1), GlProfile::Compatibility)
    }
}

fn context_attributes(scene: &SceneConfig, window: Option<RawWindowHandle>) -> ContextAttributes {
    let (version, profile) = context_request(scene);
    ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(version)))
        .with_profile(profile)
        .build(window)
}

/// Whether `candidate` samples are a better match for `wanted` than
/// `current`: the highest count not above `wanted`, else the lowest.
fn better_sample_count(current: u8, candidate: u8, wanted: u8) -> bool {
    match (current <= wanted, candidate <= wanted) {
        (true, true) => candidate > current,
        (false, true) => true,
        (true, false) => false,
        (false, false) => candidate < current,
    }
}

/// # Panics
///
/// Panics if `configs` is empty; glutin reports a config error before
/// calling the picker in that case.
fn pick_config(
    configs: Box<dyn Iterator<Item = glutin::config::Config> + '_>,
    wanted_samples: u8,
) -> glutin::config::Config {
    configs
        .reduce(|best, config| {
            if better_sample_count(best.num_samples(), config.num_samples(), wanted_samples) {
                config
            } else {
                best
            }
        })
        .expect("no GL configs to pick from")
}

/// Everything that lives exactly as long as the window.
///
/// Field order is teardown order once [`Renderer::destroy`] has run.
struct GlState {
    renderer: Renderer,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    window: Window,
}

impl GlState {
    fn create(event_loop: &ActiveEventLoop, config: &Config) -> Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(config.window.width),
                f64::from(config.window.height),
            ))
            .with_resizable(false);

        let mut template = ConfigTemplateBuilder::new();
        if config.scene.depth_test {
            template = template.with_depth_size(DEPTH_BITS);
        }

        let wanted_samples = config.window.samples;
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |configs| {
                pick_config(configs, wanted_samples)
            })
            .map_err(|e| anyhow!("{e}"))
            .context(InitFailure::Window)?;

        let window = window
            .ok_or_else(|| anyhow!("display builder returned no window"))
            .context(InitFailure::Window)?;
        log::debug!("picked GL config with {} samples", gl_config.num_samples());

        let raw_window_handle = window
            .window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| anyhow!("{e}"))
            .context(InitFailure::Window)?;

        let gl_display = gl_config.display();
        let context_attributes = context_attributes(&config.scene, Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context(InitFailure::Window)?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| anyhow!("{e}"))
            .context(InitFailure::Window)?;
        let gl_surface =
            unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
                .context(InitFailure::Window)?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .context(InitFailure::Loader)?;

        if gl_display.get_proc_address(c"glGetString").is_null() {
            return Err(anyhow!("glGetString is not exported").context(InitFailure::Loader));
        }
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };
        let version = gl.version();
        log::info!(
            "OpenGL {}.{} {}",
            version.major,
            version.minor,
            version.vendor_info
        );

        if let Err(e) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::warn!("vsync unavailable: {e}");
        }

        let renderer = unsafe { Renderer::new(Arc::new(gl), &config.scene) }
            .map_err(|e| anyhow!(e))
            .context("failed to set up the scene")?;

        Ok(Self {
            renderer,
            gl_context,
            gl_surface,
            window,
        })
    }

    fn draw_frame(&self) -> Result<()> {
        unsafe { self.renderer.render() };
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("failed to swap buffers")
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe { self.renderer.resize(size.width, size.height) };
    }

    fn teardown(self) {
        unsafe { self.renderer.destroy() };
        log::info!("window closed");
    }
}

struct App {
    config: Config,
    state: Option<GlState>,
    /// First error that stopped the loop.
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match GlState::create(event_loop, &self.config) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. }
                if is_exit_key(&event.logical_key, event.state) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(err) = state.draw_frame() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            state.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_press_exits() {
        let escape = Key::Named(NamedKey::Escape);
        assert!(is_exit_key(&escape, ElementState::Pressed));
        assert!(!is_exit_key(&escape, ElementState::Released));
        assert!(!is_exit_key(
            &Key::Named(NamedKey::Enter),
            ElementState::Pressed
        ));
    }

    #[test]
    fn program_scenes_request_core_3_3() {
        let (version, profile) = context_request(&SceneConfig::cube());
        assert_eq!((version.major, version.minor), (3, 3));
        assert!(matches!(profile, GlProfile::Core));
    }

    #[test]
    fn fixed_function_scene_requests_compatibility() {
        let (version, profile) = context_request(&SceneConfig::triangle());
        assert_eq!((version.major, version.minor), (2, 1));
        assert!(matches!(profile, GlProfile::Compatibility));
    }

    #[test]
    fn sample_count_prefers_highest_not_above_wanted() {
        assert!(better_sample_count(0, 4, 4));
        assert!(better_sample_count(2, 4, 4));
        assert!(!better_sample_count(4, 8, 4));
        assert!(!better_sample_count(4, 2, 4));
    }

    #[test]
    fn sample_count_falls_back_to_lowest_above_wanted() {
        assert!(better_sample_count(16, 8, 4));
        assert!(better_sample_count(8, 0, 4));
        assert!(!better_sample_count(8, 16, 4));
    }

    #[test]
    fn wait_for_keypress_consumes_one_byte() {
        let mut input = std::io::Cursor::new(b"\nrest".to_vec());
        wait_for_keypress(&mut input);
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn wait_for_keypress_returns_on_empty_input() {
        wait_for_keypress(std::io::empty());
    }
}
