use std::collections::BTreeMap;
use std::time::Duration;

use configs::GatewayConfig;
use models::{ModelError, ResourceKind};

/// Static routing table: which backend base URL owns each resource kind.
/// Built once at startup and never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    routes: BTreeMap<ResourceKind, String>,
}

impl RoutingTable {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = (ResourceKind, S)>,
        S: Into<String>,
    {
        let routes = routes
            .into_iter()
            .map(|(kind, url)| {
                let url: String = url.into();
                (kind, url.trim_end_matches('/').to_string())
            })
            .collect();
        Self { routes }
    }

    /// Parse the `gateway.routes` section; keys must name a resource kind.
    pub fn from_config(routes: &BTreeMap<String, String>) -> Result<Self, ModelError> {
        let parsed = routes
            .iter()
            .map(|(key, url)| Ok((key.parse::<ResourceKind>()?, url.clone())))
            .collect::<Result<Vec<_>, ModelError>>()?;
        Ok(Self::new(parsed))
    }

    pub fn base_url(&self, kind: ResourceKind) -> Option<&str> {
        self.routes.get(&kind).map(String::as_str)
    }

    /// Full listing URL on the owning backend, e.g. `http://users:4001/users`.
    pub fn upstream_url(&self, kind: ResourceKind) -> Option<String> {
        self.base_url(kind).map(|base| format!("{}{}", base, kind.path()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.routes.keys().copied()
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub routes: RoutingTable,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ProxyConfig {
    pub fn from_gateway_config(cfg: &GatewayConfig) -> Result<Self, ModelError> {
        Ok(Self {
            routes: RoutingTable::from_config(&cfg.routes)?,
            connect_timeout: Duration::from_millis(cfg.connect_timeout_ms),
            request_timeout: Duration::from_millis(cfg.request_timeout_ms),
        })
    }
}
