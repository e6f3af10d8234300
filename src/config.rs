use crate::news::DEFAULT_ENDPOINT;
use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::PathBuf, time::Duration};
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Search newsapi.org from the browser.
#[derive(Debug, Parser)]
#[command(name = "news-search", version, about)]
pub struct Args {
    /// Newsapi.org access key
    #[arg(long = "apikey", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Directory served under /assets
    #[arg(long = "assets", value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Upstream search endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Path to a config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// On-disk configuration. Every key is optional; flags win over the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub assets_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Clone)]
pub struct RuntimeConfig {
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub assets_dir: PathBuf,
    pub endpoint: Url,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
    /// Upstream responses above this size are rejected.
    pub max_body_bytes: usize,
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("assets_dir", &self.assets_dir)
            .field("endpoint", &self.endpoint.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl RuntimeConfig {
    /// Defaults pointed at a custom endpoint. Handy for tests and local proxies.
    pub fn for_endpoint(api_key: &str, endpoint: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_key: api_key.to_string(),
            host: "127.0.0.1".into(),
            port: 0,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            endpoint: Url::parse(endpoint)?,
            request_timeout: None,
            user_agent: default_user_agent(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }
}

pub fn load(args: Args) -> Result<RuntimeConfig> {
    let file = read_file_config(args.config.as_ref())?;

    let api_key = args
        .api_key
        .or(file.api_key)
        .map(|k| k.trim().to_string())
        .unwrap_or_default();
    if api_key.is_empty() {
        bail!("apiKey must be set (pass --apikey or set api_key in the config file)");
    }

    let endpoint = match args.endpoint.or(file.endpoint) {
        Some(raw) => {
            Url::parse(&raw).with_context(|| format!("invalid upstream endpoint: {}", raw))?
        }
        None => default_endpoint(),
    };

    Ok(RuntimeConfig {
        api_key,
        host: args.host.or(file.host).unwrap_or_else(|| DEFAULT_HOST.into()),
        port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
        assets_dir: args
            .assets_dir
            .or(file.assets_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        endpoint,
        request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        user_agent: file.user_agent.unwrap_or_else(default_user_agent),
        max_body_bytes: file.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES),
    })
}

fn read_file_config(explicit: Option<&PathBuf>) -> Result<FileConfig> {
    // An explicit path has to exist; the default one is optional.
    let path = match explicit {
        Some(p) => p.clone(),
        None => match default_config_path() {
            Some(p) if p.is_file() => p,
            _ => return Ok(FileConfig::default()),
        },
    };
    let txt = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let parsed: FileConfig = toml::from_str(&txt)
        .with_context(|| format!("failed to parse toml: {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config file");
    Ok(parsed)
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("news-search");
        p.push("config.toml");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("news-search");
        p.push("config.toml");
        return Some(p);
    }
    None
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

fn default_user_agent() -> String {
    format!("news-search/{}", env!("CARGO_PKG_VERSION"))
}
