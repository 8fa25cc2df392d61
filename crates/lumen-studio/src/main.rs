use anyhow::{bail, Result};

use lumen_engine::core::{AppConfig, Application};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::scene::SceneRegistry;
use lumen_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let registry = SceneRegistry::builtin();
    let mut config = AppConfig::default();

    // Optional first argument: name of the scene to start in.
    if let Some(name) = std::env::args().nth(1) {
        let Some(selector) = registry.selector_by_name(&name) else {
            let known: Vec<&str> = registry.selectors().filter_map(|s| registry.name(s)).collect();
            bail!("unknown scene {name:?} (known: {})", known.join(", "));
        };
        config.initial_scene = selector;
    }

    log::info!(
        "lumen studio {} starting in scene {}",
        env!("CARGO_PKG_VERSION"),
        registry.name(config.initial_scene).unwrap_or("?"),
    );

    Runtime::run(RuntimeConfig::default(), Application::new(config, registry))
}
