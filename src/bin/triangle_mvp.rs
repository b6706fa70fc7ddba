//! One red triangle seen through a perspective camera.

use playground::{Config, SceneConfig, WindowConfig};

fn main() {
    let config = Config::new(
        WindowConfig::titled("Triangle (MVP)"),
        SceneConfig::triangle_mvp(),
    );
    std::process::exit(playground::launch(config));
}
