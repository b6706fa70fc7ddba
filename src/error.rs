//! Startup failures with a fixed user-facing message.

use std::fmt;

/// A failure while bringing up the window system, the window, or the GL
/// function pointers.
///
/// These travel inside an [`anyhow::Error`] chain; [`failure_message`]
/// finds them again to pick what gets printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitFailure {
    /// The event loop could not be created.
    WindowSystem,
    /// No window or GL context with the requested attributes.
    Window,
    /// The context could not be made current or its functions loaded.
    Loader,
}

impl fmt::Display for InitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitFailure::WindowSystem => f.write_str("Failed to initialize the windowing system"),
            InitFailure::Window => f.write_str(
                "Failed to open window. If you have an Intel GPU, they are not 3.3 compatible. \
                 Try the 2.1 version of the tutorials.",
            ),
            InitFailure::Loader => f.write_str("Failed to load OpenGL function pointers"),
        }
    }
}

impl std::error::Error for InitFailure {}

/// The line printed to stderr when [`run`](crate::run) fails.
///
/// Startup failures print their fixed message, whether they were attached
/// as context or are the root cause; anything else prints the whole context
/// chain.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<InitFailure>() {
        Some(failure) => failure.to_string(),
        None => format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn init_failure_is_found_under_context() {
        let err = Err::<(), _>(anyhow::Error::new(InitFailure::Loader).context("no symbols"))
            .context("starting up")
            .unwrap_err();
        assert_eq!(
            failure_message(&err),
            "Failed to load OpenGL function pointers"
        );
    }

    #[test]
    fn init_failure_as_source_is_found() {
        let err = anyhow::Error::new(InitFailure::WindowSystem);
        assert_eq!(
            failure_message(&err),
            "Failed to initialize the windowing system"
        );
    }

    #[test]
    fn init_failure_attached_as_context_is_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no display");
        let err = Err::<(), _>(io)
            .context(InitFailure::Window)
            .context("creating window")
            .unwrap_err();
        assert_eq!(failure_message(&err), InitFailure::Window.to_string());
    }

    #[test]
    fn other_errors_print_their_chain() {
        let err = anyhow::anyhow!("Shader compile error: 0:1 syntax error")
            .context("failed to build renderer");
        assert_eq!(
            failure_message(&err),
            "failed to build renderer: Shader compile error: 0:1 syntax error"
        );
    }

    #[test]
    fn window_message_mentions_gl_version() {
        assert!(InitFailure::Window.to_string().contains("3.3"));
    }
}
