//! Legacy demo-server bootstrap.
//!
//! Locates a configuration file by a fixed precedence, loads it into the
//! process-wide configuration cell, and runs the web server with the fixed
//! root controller. Entirely independent of the rendering harness; the two
//! share nothing beyond the crate error type.

use std::path::{Path, PathBuf};

use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use config::{Config, File, FileFormat};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::{Error, Result};

/// Settings loaded from the resolved configuration file.
///
/// The file is an INI-style key/value list; every key has a built-in
/// default so an empty file is a valid configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Title served by the root controller
    #[serde(default = "default_site_title")]
    pub site_title: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_site_title() -> String {
    "renderproof demo".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site_title: default_site_title(),
        }
    }
}

/// Global configuration instance, set once at startup
static CONFIG: OnceCell<ServerConfig> = OnceCell::new();

/// Search locations for the configuration file, in precedence order after
/// the command-line argument.
#[derive(Debug, Clone)]
pub struct ConfigLocations {
    /// Project directory searched for `dev.cfg` during development
    pub setup_dir: PathBuf,
    /// Working directory searched for `prod.cfg` on a deployed host
    pub work_dir: PathBuf,
    /// Packaged fallback configuration file
    pub default_file: PathBuf,
}

impl ConfigLocations {
    /// Locations for the running executable: the build-time project
    /// directory, the current working directory, and the installed
    /// `config/default.cfg` one level above the binary.
    pub fn discover() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let default_file = exe
            .parent()
            .and_then(|p| p.parent())
            .map(|p| p.join("config").join("default.cfg"))
            .unwrap_or_else(|| PathBuf::from("config/default.cfg"));

        Ok(Self {
            setup_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
            work_dir: std::env::current_dir()?,
            default_file,
        })
    }
}

/// Resolve the configuration file to load.
///
/// Precedence: the explicit argument, `dev.cfg` in the project directory,
/// `prod.cfg` in the working directory, then the packaged default. Only a
/// missing packaged default produces [`Error::ConfigNotFound`].
pub fn resolve_config_file(arg: Option<&Path>, locations: &ConfigLocations) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path.to_path_buf());
    }

    let dev = locations.setup_dir.join("dev.cfg");
    if dev.exists() {
        return Ok(dev);
    }

    let prod = locations.work_dir.join("prod.cfg");
    if prod.exists() {
        return Ok(prod);
    }

    if locations.default_file.exists() {
        return Ok(locations.default_file.clone());
    }

    Err(Error::ConfigNotFound)
}

/// Parse an INI settings file into a [`ServerConfig`].
pub fn load_config(path: &Path) -> Result<ServerConfig> {
    let settings = Config::builder()
        .add_source(File::from(path).format(FileFormat::Ini))
        .build()
        .map_err(|e| Error::ConfigError(e.to_string()))?;

    settings
        .try_deserialize()
        .map_err(|e| Error::ConfigError(e.to_string()))
}

/// Load the settings file into the process-wide configuration cell.
///
/// The configuration is immutable from this point on; a second call keeps
/// the first value.
pub fn update_config(path: &Path) -> Result<&'static ServerConfig> {
    let config = load_config(path)?;
    Ok(CONFIG.get_or_init(|| config))
}

/// The global configuration; built-in defaults when nothing was loaded.
pub fn global() -> &'static ServerConfig {
    CONFIG.get_or_init(ServerConfig::default)
}

/// Router with the fixed root controller.
pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status", get(status))
}

async fn index() -> Html<String> {
    let config = global();
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n<p>The rendering service is up.</p>\n</body>\n</html>\n",
        title = config.site_title
    ))
}

async fn status() -> Json<serde_json::Value> {
    let config = global();
    Json(serde_json::json!({
        "service": "renderproof-server",
        "title": config.site_title,
        "status": "ok",
    }))
}

/// Bind the configured address and serve until the process is terminated.
pub async fn start_server() -> Result<()> {
    let config = global();
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("Serving {} on http://{}", config.site_title, addr);
    axum::serve(listener, app()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn locations(base: &Path) -> ConfigLocations {
        ConfigLocations {
            setup_dir: base.join("project"),
            work_dir: base.join("cwd"),
            default_file: base.join("packaged/default.cfg"),
        }
    }

    #[test]
    fn explicit_argument_wins() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let locs = locations(tmp.path());
        let resolved = resolve_config_file(Some(Path::new("custom.cfg")), &locs)
            .expect("explicit argument always resolves");
        assert_eq!(resolved, PathBuf::from("custom.cfg"));
    }

    #[test]
    fn dev_cfg_precedes_prod_cfg() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let locs = locations(tmp.path());
        fs::create_dir_all(&locs.setup_dir).expect("create project dir");
        fs::create_dir_all(&locs.work_dir).expect("create cwd");
        fs::write(locs.setup_dir.join("dev.cfg"), "").expect("write dev.cfg");
        fs::write(locs.work_dir.join("prod.cfg"), "").expect("write prod.cfg");

        let resolved = resolve_config_file(None, &locs).expect("resolve");
        assert_eq!(resolved, locs.setup_dir.join("dev.cfg"));
    }

    #[test]
    fn prod_cfg_precedes_packaged_default() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let locs = locations(tmp.path());
        fs::create_dir_all(&locs.work_dir).expect("create cwd");
        fs::create_dir_all(locs.default_file.parent().unwrap()).expect("create packaged dir");
        fs::write(locs.work_dir.join("prod.cfg"), "").expect("write prod.cfg");
        fs::write(&locs.default_file, "").expect("write default.cfg");

        let resolved = resolve_config_file(None, &locs).expect("resolve");
        assert_eq!(resolved, locs.work_dir.join("prod.cfg"));
    }

    #[test]
    fn packaged_default_is_last_resort() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let locs = locations(tmp.path());
        fs::create_dir_all(locs.default_file.parent().unwrap()).expect("create packaged dir");
        fs::write(&locs.default_file, "").expect("write default.cfg");

        let resolved = resolve_config_file(None, &locs).expect("resolve");
        assert_eq!(resolved, locs.default_file);
    }

    #[test]
    fn nothing_found_is_config_not_found() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let locs = locations(tmp.path());
        let err = resolve_config_file(None, &locs).expect_err("nothing to resolve");
        assert!(matches!(err, Error::ConfigNotFound));
    }

    #[test]
    fn load_config_reads_ini_keys() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("dev.cfg");
        fs::write(&path, "host = 0.0.0.0\nport = 9090\nsite_title = staging\n")
            .expect("write cfg");

        let config = load_config(&path).expect("parse cfg");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.site_title, "staging");
    }

    #[test]
    fn load_config_fills_defaults_for_missing_keys() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("empty.cfg");
        fs::write(&path, "").expect("write cfg");

        let config = load_config(&path).expect("parse cfg");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.site_title, "renderproof demo");
    }
}
