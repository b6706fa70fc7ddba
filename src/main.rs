//! A depth-tested cube with per-vertex colors.

use playground::Config;

fn main() {
    std::process::exit(playground::launch(Config::default()));
}
