// Configuration module entry point
// Resolves the effective configuration from file, environment and flags

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};

// Re-export public types
pub use state::AppState;
pub use types::{Config, OutputTarget, Overrides};

/// Name of the config file searched for in the home directory,
/// extension-less; any format the `config` crate understands matches
/// (`.diag-sink.toml`, `.diag-sink.json`, ...)
const HOME_CONFIG_NAME: &str = ".diag-sink";

impl Config {
    /// Resolve configuration with increasing precedence: built-in
    /// defaults, config file, environment (`DIAG_SINK_*`), flags.
    ///
    /// An explicitly given config file must exist; the home-directory
    /// fallback is optional.
    pub fn load(overrides: Overrides) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("listen", "localhost:2288")?
            .set_default("level", "info")?
            .set_default("out", "-")?;

        if let Some(path) = &overrides.config_file {
            // stderr, like all diagnostics: stdout may be the sink itself
            eprintln!("[CONFIG] Using config file: {}", path.display());
            builder = builder.add_source(config::File::from(path.clone()));
        } else if let Some(home) = dirs::home_dir() {
            let name = home.join(HOME_CONFIG_NAME);
            builder = builder.add_source(
                config::File::with_name(&name.display().to_string()).required(false),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("DIAG_SINK"))
            .set_override_option("listen", overrides.listen)?
            .set_override_option("level", overrides.level)?
            .set_override_option("out", overrides.out)?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve `listen` into a socket address; hostnames are allowed
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen
            .to_socket_addrs()
            .map_err(|e| format!("Invalid listen address '{}': {e}", self.listen))?
            .next()
            .ok_or_else(|| format!("Listen address '{}' resolved to nothing", self.listen))
    }

    /// Parse the `out` setting
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::parse(&self.out)
    }
}
