use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory fetched assets are written into
    pub lib_dir: PathBuf,

    /// API token for the forge. Resolved once at startup and passed along
    /// explicitly; never baked into the binary.
    pub token: String,
}

impl Config {
    /// Resolves the configuration from explicit arguments first, then the
    /// environment. A missing token is a setup error: nothing in this tool
    /// works unauthenticated.
    pub fn setup(lib_dir: Option<&Path>, token: Option<&str>) -> Result<Self> {
        let lib_dir = lib_dir
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("RELFETCH_DIR").map(PathBuf::from))
            .unwrap_or_else(Self::default_lib_dir);

        let token = token
            .map(str::to_owned)
            .or_else(|| std::env::var("RELFETCH_TOKEN").ok())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .context("No API token found. Pass --token or set RELFETCH_TOKEN / GITHUB_TOKEN.")?;

        Ok(Self { lib_dir, token })
    }

    pub fn default_lib_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
            .join("relfetch")
            .join("lib")
    }
}
