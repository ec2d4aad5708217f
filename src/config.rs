//! Proxy configuration: the serde-facing shape and its validated, resolved form.

use serde::{Deserialize, Serialize};

use crate::error::UrlError;

/// Proxy configuration as supplied at client construction (all fields
/// optional; typically deserialized from a host application's TOML config).
///
/// `auth` is `"user:password"`. `type` is one of `http`, `http1`, `socks4`,
/// `socks4a`, `socks5`, `socks5h`; anything else falls back to plain HTTP
/// proxying.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub auth: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Application-layer protocol spoken between client and proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProxyKind {
    #[default]
    Http,
    Http1,
    Socks4,
    Socks4a,
    Socks5,
    /// SOCKS5 with hostname resolution on the proxy side.
    Socks5h,
}

impl ProxyKind {
    /// Maps a configured type name to a kind. Unrecognized or absent names
    /// fall back to plain HTTP proxying.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("http") => ProxyKind::Http,
            Some("http1") => ProxyKind::Http1,
            Some("socks4") => ProxyKind::Socks4,
            Some("socks4a") => ProxyKind::Socks4a,
            Some("socks5") => ProxyKind::Socks5,
            Some("socks5h") => ProxyKind::Socks5h,
            _ => ProxyKind::Http,
        }
    }

    pub(crate) fn as_curl(self) -> curl::easy::ProxyType {
        match self {
            ProxyKind::Http => curl::easy::ProxyType::Http,
            ProxyKind::Http1 => curl::easy::ProxyType::Http1,
            ProxyKind::Socks4 => curl::easy::ProxyType::Socks4,
            ProxyKind::Socks4a => curl::easy::ProxyType::Socks4a,
            ProxyKind::Socks5 => curl::easy::ProxyType::Socks5,
            ProxyKind::Socks5h => curl::easy::ProxyType::Socks5Hostname,
        }
    }
}

/// Resolved proxy settings, validated from a [`ProxyConfig`].
#[derive(Debug, Clone)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
    pub kind: ProxyKind,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxySettings {
    /// Validates and resolves the configuration. Host and port must both be
    /// present; `auth` is split at the first `:` into username/password (a
    /// value without `:` is treated as a bare username).
    pub fn from_config(config: &ProxyConfig) -> Result<Self, UrlError> {
        let host = match &config.host {
            Some(h) => h.clone(),
            None => return Err(UrlError::IncompleteProxyConfig),
        };
        let port = config.port.ok_or(UrlError::IncompleteProxyConfig)?;

        let (username, password) = match config.auth.as_deref() {
            Some(auth) => match auth.split_once(':') {
                Some((user, pass)) => (Some(user.to_string()), Some(pass.to_string())),
                None => (Some(auth.to_string()), None),
            },
            None => (None, None),
        };

        Ok(Self {
            host,
            port,
            kind: ProxyKind::from_name(config.kind.as_deref()),
            username,
            password,
        })
    }
}
