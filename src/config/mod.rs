use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod validator;

pub use crate::domain::RouteConfig;

use crate::cli::Cli;

/// Base name of the settings file looked up in a root directory.
pub const CONFIG_BASENAME: &str = "mockapi";

const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Filled from the settings file and `config/routes/` after the `config`
    /// crate has produced the server section.
    #[serde(default, skip_deserializing)]
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One route definition as written in a config file.
///
/// ```toml
/// [[routes]]
/// path = "/items"
/// method = "GET"
/// count = 3
/// [routes.properties]
/// id = { type = "id" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(flatten)]
    pub config: RouteConfig,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, config: RouteConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RoutesFile {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, routes directory next
    /// to it, then CLI and env overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let root = cli
            .config
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let mut settings = Self::load(&cli.config)?;
        settings.apply_cli_overrides(cli);
        settings.load_routes_from_dir(&format!("{}/config/routes", root))?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join(CONFIG_BASENAME);

        let mut settings = Self::load(&config_path)?;
        settings.load_routes_from_dir(&format!("{}/config/routes", root))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Reads the server section through the `config` crate and the route list
    /// straight from the same file, so field names in schemas keep their case.
    fn load(config_path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        if let Some(file) = resolve_config_file(config_path) {
            let routes_file: RoutesFile = parse_file(&file)?;
            settings.routes = routes_file.routes;
        }

        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Appends one route per `json`, `yaml`, `yml` or `toml` file in `path`.
    /// Files are read in name order; other extensions are ignored.
    fn load_routes_from_dir(&mut self, path: &str) -> Result<(), anyhow::Error> {
        let pattern = format!("{}/*", path);
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if has_config_extension(&path) {
                        let route: RouteEntry = parse_file(&path)?;
                        tracing::debug!("Loaded route {} from {}", route.path, path.display());
                        self.routes.push(route);
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(())
    }
}

/// The settings file actually backing `path`: the path itself when it has an
/// extension, otherwise the first `path.{toml,yaml,yml,json}` that exists.
fn resolve_config_file(path: &Path) -> Option<PathBuf> {
    if path.extension().is_some() {
        return path.is_file().then(|| path.to_path_buf());
    }
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    let parsed = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("JSON parse error in {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("TOML parse error in {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("YAML parse error in {}", path.display()))?,
        other => anyhow::bail!("Unsupported config format '{}' for {}", other, path.display()),
    };
    Ok(parsed)
}
