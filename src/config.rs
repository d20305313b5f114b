use serde::Deserialize;

use crate::library::{Denylist, Library};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub permissive_cors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    /// Storage root; its immediate subdirectories are the categories.
    pub root: String,
    /// Glob patterns matched against single entry names.
    pub denylist: Vec<String>,
    /// Chunk size used when streaming file content.
    pub stream_buffer_size: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub enable_hsts: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub csp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub library: LibraryConfig,
    pub security: Option<SecurityConfig>,
}

const DEFAULTS: &str = include_str!("../config/default.toml");

const MIN_STREAM_BUFFER: usize = 4 * 1024;
const MAX_STREAM_BUFFER: usize = 8 * 1024 * 1024;

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
        {
            Ok(app_cfg) => app_cfg,
            Err(e) => {
                eprintln!("FATAL: Failed to load default config: {}", e);
                panic!("Failed to load default config: {}", e);
            }
        }
    }
}

impl LibraryConfig {
    /// Builds the library value handed to every request.
    pub fn build(&self) -> anyhow::Result<Library> {
        let denylist = Denylist::new(&self.denylist)
            .map_err(|e| anyhow::anyhow!("invalid library.denylist pattern: {}", e))?;
        Ok(Library::new(&self.root, denylist))
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: mediashelf.toml (in CWD)
        .add_source(::config::File::with_name("mediashelf").required(false));

    if let Ok(custom_path) = std::env::var("MEDIASHELF_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(
        ::config::Environment::with_prefix("MEDIASHELF")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("library.denylist")
            .try_parsing(true),
    );

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Library
    if cfg.library.root.trim().is_empty() {
        return Err(anyhow::anyhow!("library.root must not be empty"));
    }
    if !(MIN_STREAM_BUFFER..=MAX_STREAM_BUFFER).contains(&cfg.library.stream_buffer_size) {
        return Err(anyhow::anyhow!(
            "library.stream_buffer_size must be in {}..={}",
            MIN_STREAM_BUFFER,
            MAX_STREAM_BUFFER
        ));
    }
    Denylist::new(&cfg.library.denylist)
        .map_err(|e| anyhow::anyhow!("invalid library.denylist pattern: {}", e))?;
    if !std::path::Path::new(&cfg.library.root).is_dir() {
        tracing::warn!("library.root {} is not a directory; listings will fail", cfg.library.root);
    }

    Ok(())
}
