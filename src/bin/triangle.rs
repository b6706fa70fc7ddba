//! One white triangle through the fixed-function pipeline.

use playground::{Config, SceneConfig, WindowConfig};

fn main() {
    let config = Config::new(WindowConfig::titled("Triangle"), SceneConfig::triangle());
    std::process::exit(playground::launch(config));
}
