use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use models::ResourceKind;
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub backends: BackendsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Backend base URL per resource kind, e.g. `users = "http://127.0.0.1:4001"`.
    #[serde(default = "default_routes")]
    pub routes: BTreeMap<String, String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_gateway_port(),
            worker_threads: Some(DEFAULT_WORKER_THREADS),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            routes: default_routes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendsConfig {
    #[serde(default)]
    pub users: BackendConfig,
    #[serde(default)]
    pub orders: BackendConfig,
}

/// Listener settings of one backend resource service.
///
/// A `port` of 0 means "not configured" and is replaced by the kind's
/// default port during normalisation.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// JSON file with the records to serve; the built-in seed is used when absent.
    #[serde(default)]
    pub seed_path: Option<String>,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_gateway_port() -> u16 { 3000 }
fn default_connect_timeout_ms() -> u64 { 2_000 }
fn default_request_timeout_ms() -> u64 { 5_000 }

fn default_routes() -> BTreeMap<String, String> {
    ResourceKind::ALL
        .iter()
        .map(|kind| (kind.as_str().to_string(), format!("http://127.0.0.1:{}", default_backend_port(*kind))))
        .collect()
}

/// Well-known listener ports: users on 4001, orders on 4002.
pub fn default_backend_port(kind: ResourceKind) -> u16 {
    match kind {
        ResourceKind::Users => 4001,
        ResourceKind::Orders => 4002,
    }
}

/// Load `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    match std::fs::read_to_string(&path) {
        Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("cannot read config file {path}: {e}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (or defaults), then process environment, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.gateway.host = host;
        }
        if let Some(port) = parse_env(&lookup, "GATEWAY_PORT")? {
            self.gateway.port = port;
        }
        if let Some(ms) = parse_env(&lookup, "GATEWAY_CONNECT_TIMEOUT_MS")? {
            self.gateway.connect_timeout_ms = ms;
        }
        if let Some(ms) = parse_env(&lookup, "GATEWAY_REQUEST_TIMEOUT_MS")? {
            self.gateway.request_timeout_ms = ms;
        }
        if let Some(threads) = parse_env(&lookup, "TOKIO_WORKER_THREADS")? {
            self.gateway.worker_threads = Some(threads);
            self.backends.users.worker_threads = Some(threads);
            self.backends.orders.worker_threads = Some(threads);
        }
        for kind in ResourceKind::ALL {
            let prefix = kind.as_str().to_uppercase();
            if let Some(url) = lookup(&format!("{prefix}_URL")) {
                self.gateway.routes.insert(kind.as_str().to_string(), url);
            }
            let backend = self.backends.get_mut(kind);
            if let Some(port) = parse_env(&lookup, &format!("{prefix}_PORT"))? {
                backend.port = port;
            }
            if let Some(path) = lookup(&format!("{prefix}_SEED_PATH")) {
                backend.seed_path = Some(path);
            }
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.gateway.normalize()?;
        for kind in ResourceKind::ALL {
            self.backends.get_mut(kind).normalize(kind);
        }
        Ok(())
    }

    pub fn backend(&self, kind: ResourceKind) -> &BackendConfig {
        self.backends.get(kind)
    }
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("{key}={raw:?} is not valid: {e}")),
        None => Ok(None),
    }
}

fn normalize_threads(threads: &mut Option<usize>) {
    match threads {
        Some(0) | None => *threads = Some(DEFAULT_WORKER_THREADS),
        Some(_) => {}
    }
}

impl GatewayConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("gateway.port must be in 1..=65535"));
        }
        normalize_threads(&mut self.worker_threads);
        if self.connect_timeout_ms == 0 || self.request_timeout_ms == 0 {
            return Err(anyhow!("gateway timeouts must be positive milliseconds"));
        }
        for (key, url) in default_routes() {
            self.routes.entry(key).or_insert(url);
        }
        for (key, url) in &mut self.routes {
            key.parse::<ResourceKind>()
                .map_err(|e| anyhow!("gateway.routes: {e}"))?;
            let trimmed = url.trim().trim_end_matches('/').to_string();
            let lower = trimmed.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("gateway.routes.{key} must start with http:// or https://"));
            }
            *url = trimmed;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendsConfig {
    pub fn get(&self, kind: ResourceKind) -> &BackendConfig {
        match kind {
            ResourceKind::Users => &self.users,
            ResourceKind::Orders => &self.orders,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut BackendConfig {
        match kind {
            ResourceKind::Users => &mut self.users,
            ResourceKind::Orders => &mut self.orders,
        }
    }
}

impl BackendConfig {
    fn normalize(&mut self, kind: ResourceKind) {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            self.port = default_backend_port(kind);
        }
        normalize_threads(&mut self.worker_threads);
        if matches!(&self.seed_path, Some(p) if p.trim().is_empty()) {
            self.seed_path = None;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
