//! Transport option composition.
//!
//! Options are collected into an immutable [`RequestOptions`] value through
//! composable setters and applied to a `curl::easy::Easy` handle in a single
//! call, so a handle is never left partially configured.

use std::time::Duration;

use curl::easy::{Easy, List};

use crate::config::ProxySettings;

/// Connect timeout applied to every request.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Total transfer timeout applied to every request.
pub const TOTAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Fully resolved transport options for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    follow_redirect: bool,
    accept_encoding: bool,
    cookie: Option<String>,
    headers: Vec<(String, String)>,
    proxy: Option<ProxySettings>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_redirect(mut self, follow: bool) -> Self {
        self.follow_redirect = follow;
        self
    }

    /// Enables `Accept-Encoding` negotiation; libcurl then decompresses the
    /// body transparently.
    pub fn accept_encoding(mut self, negotiate: bool) -> Self {
        self.accept_encoding = negotiate;
        self
    }

    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }

    pub fn proxy(mut self, settings: ProxySettings) -> Self {
        self.proxy = Some(settings);
        self
    }

    pub fn follows_redirect(&self) -> bool {
        self.follow_redirect
    }

    pub fn uses_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    /// Applies the whole option set to `easy`. Called once per request,
    /// after `easy.url(..)`.
    pub(crate) fn apply(&self, easy: &mut Easy) -> Result<(), curl::Error> {
        easy.connect_timeout(CONNECT_TIMEOUT)?;
        easy.timeout(TOTAL_TIMEOUT)?;
        if self.follow_redirect {
            easy.follow_location(true)?;
        }
        if self.accept_encoding {
            // Empty string lets libcurl offer everything it was built with.
            easy.accept_encoding("")?;
        }
        if let Some(cookie) = &self.cookie {
            easy.cookie(cookie)?;
        }
        if !self.headers.is_empty() {
            let mut list = List::new();
            for (name, value) in &self.headers {
                list.append(&format!("{}: {}", name.trim(), value.trim()))?;
            }
            easy.http_headers(list)?;
        }
        if let Some(proxy) = &self.proxy {
            easy.proxy(&proxy.host)?;
            easy.proxy_port(proxy.port)?;
            easy.proxy_type(proxy.kind.as_curl())?;
            // Credentials go through the proxy credential options, never
            // through the protocol selector.
            if let Some(user) = &proxy.username {
                easy.proxy_username(user)?;
            }
            if let Some(pass) = &proxy.password {
                easy.proxy_password(pass)?;
            }
        }
        Ok(())
    }
}
