//! The `UrlClient` facade: status probing, downloading, header capture, and
//! transfer metadata over libcurl, plus delegating URL helpers.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use curl::easy::Easy;

use crate::config::{ProxyConfig, ProxySettings};
use crate::error::UrlError;
use crate::headers::HeaderMap;
use crate::logging::{Logger, NoopLogger};
use crate::transport::RequestOptions;
use crate::url_model::{self, UrlComponent, UrlParts};

/// Caller-facing options for [`UrlClient::download`] and
/// [`UrlClient::get_headers`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub use_proxy: bool,
    pub follow_redirect: bool,
    pub headers: Vec<(String, String)>,
    pub cookie: Option<String>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = use_proxy;
        self
    }

    pub fn follow_redirect(mut self, follow: bool) -> Self {
        self.follow_redirect = follow;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

/// Outcome of [`UrlClient::check`]. Created fresh per call; a zero `code`
/// means the request did not complete (invalid URL, DNS failure, timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// HTTP status code, or 0 when no response was obtained.
    pub code: u32,
    /// Effective URL the transfer ended at (equals the requested URL when
    /// nothing redirected). Empty when no transfer was attempted.
    pub redirect_url: String,
    /// The URL as passed in, possibly malformed.
    pub requested_url: String,
    pub used_proxy: bool,
    pub followed_redirect: bool,
}

/// Post-transfer metadata reported by libcurl, as gathered by
/// [`UrlClient::get_info`]. `Default` is the all-zero record.
#[derive(Debug, Clone, Default)]
pub struct TransferInfo {
    pub effective_url: Option<String>,
    pub response_code: u32,
    pub content_type: Option<String>,
    pub redirect_count: u32,
    pub redirect_url: Option<String>,
    pub total_time: Duration,
    pub namelookup_time: Duration,
    pub connect_time: Duration,
    pub pretransfer_time: Duration,
    pub starttransfer_time: Duration,
    pub redirect_time: Duration,
    pub download_size: f64,
    pub upload_size: f64,
    pub primary_ip: Option<String>,
}

/// Facade over URL validation, form encoding, and curl-backed fetching.
///
/// Holds only an immutable proxy configuration and a logger reference; every
/// method takes `&self`, so a client can be shared across threads. Each call
/// owns its transfer handle end-to-end and releases it on every exit path.
pub struct UrlClient {
    config: ProxyConfig,
    logger: Arc<dyn Logger>,
}

impl UrlClient {
    /// Client with the given proxy configuration and no logging.
    pub fn new(config: ProxyConfig) -> Self {
        Self::with_logger(config, Arc::new(NoopLogger))
    }

    pub fn with_logger(config: ProxyConfig, logger: Arc<dyn Logger>) -> Self {
        Self { config, logger }
    }

    /// Forwards to the injected logger. Never fails.
    pub fn log(&self, level: &str, message: &str, context: &[(&str, &str)]) {
        self.logger.log(level, message, context);
    }

    /// See [`url_model::validate`].
    pub fn validate(&self, url: &str) -> bool {
        url_model::validate(url)
    }

    /// See [`url_model::parse`].
    pub fn parse(&self, url: &str) -> Option<UrlParts> {
        url_model::parse(url)
    }

    /// Parses and returns a single component, or `None` when the URL is
    /// invalid or does not carry that component.
    pub fn parse_component(&self, url: &str, component: UrlComponent) -> Option<String> {
        url_model::parse(url).and_then(|parts| parts.component(component))
    }

    /// See [`url_model::encode`].
    pub fn encode(&self, input: &str) -> String {
        url_model::encode(input)
    }

    /// See [`url_model::decode`].
    pub fn decode(&self, input: &str) -> String {
        url_model::decode(input)
    }

    /// Probes `url` with a GET (body discarded) and reports the status code
    /// and effective URL.
    ///
    /// Proxy settings are resolved before anything else, so an incomplete
    /// proxy configuration fails even when the URL is invalid. An invalid URL
    /// yields `code = 0` with the remaining fields echoed, without touching
    /// the network. Transport failures also surface as `code = 0` rather
    /// than an error. The two info log lines are emitted on every path,
    /// including the invalid-URL one, so call auditing stays complete.
    pub fn check(
        &self,
        url: &str,
        use_proxy: bool,
        follow_redirect: bool,
    ) -> Result<CheckResult, UrlError> {
        let opts = self.base_options(use_proxy, follow_redirect)?;
        let mut result = CheckResult {
            code: 0,
            redirect_url: String::new(),
            requested_url: url.to_string(),
            used_proxy: use_proxy,
            followed_redirect: follow_redirect,
        };
        if url_model::validate(url) {
            let mut easy = Easy::new();
            easy.url(url)?;
            opts.apply(&mut easy)?;
            let outcome = {
                let mut transfer = easy.transfer();
                transfer.write_function(|data| Ok(data.len()))?;
                transfer.perform()
            };
            if let Err(e) = outcome {
                tracing::debug!("check transfer for {} did not complete: {}", url, e);
            }
            result.code = easy.response_code().unwrap_or(0);
            result.redirect_url = easy
                .effective_url()
                .ok()
                .flatten()
                .unwrap_or(url)
                .to_string();
        }

        self.logger.log(
            "info",
            &format!(
                "'{}' is called, with proxy: {}, follow redirect: {}",
                url, use_proxy, follow_redirect
            ),
            &[],
        );
        self.logger
            .log("info", &format!("'{}' gives code: {}", url, result.code), &[]);

        Ok(result)
    }

    /// Downloads `url` with a GET (content negotiation enabled, so compressed
    /// bodies are decompressed transparently).
    ///
    /// With `output` set, the file is created/truncated before any network
    /// activity, the body is streamed into it, and `Ok(None)` is returned.
    /// Without it, the body is buffered and returned. An invalid URL yields
    /// `Ok(None)` with no side effects.
    pub fn download(
        &self,
        url: &str,
        output: Option<&Path>,
        options: &FetchOptions,
    ) -> Result<Option<Vec<u8>>, UrlError> {
        if !url_model::validate(url) {
            return Ok(None);
        }
        let opts = self
            .fetch_options(options)?
            .accept_encoding(true);

        let mut easy = Easy::new();
        easy.url(url)?;
        opts.apply(&mut easy)?;

        match output {
            Some(path) => {
                let mut file = File::create(path)?;
                {
                    let mut transfer = easy.transfer();
                    transfer.write_function(|data| match file.write_all(data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            tracing::warn!("download write to file failed: {}", e);
                            Ok(0) // abort transfer
                        }
                    })?;
                    transfer.perform()?;
                }
                Ok(None)
            }
            None => {
                let mut body = Vec::new();
                {
                    let mut transfer = easy.transfer();
                    transfer.write_function(|data| {
                        body.extend_from_slice(data);
                        Ok(data.len())
                    })?;
                    transfer.perform()?;
                }
                Ok(Some(body))
            }
        }
    }

    /// Fetches `url` and returns its response headers in arrival order, with
    /// the status line under the `http_code` key.
    ///
    /// Only the first response header block is captured (a redirect's own
    /// headers, when not followed further, are what the caller sees). An
    /// invalid URL yields an empty map; a transfer that dies mid-flight
    /// yields whatever was collected.
    pub fn get_headers(&self, url: &str, options: &FetchOptions) -> Result<HeaderMap, UrlError> {
        if !url_model::validate(url) {
            return Ok(HeaderMap::new());
        }
        let opts = self.fetch_options(options)?;

        let mut easy = Easy::new();
        easy.url(url)?;
        opts.apply(&mut easy)?;

        let mut lines: Vec<String> = Vec::new();
        let mut first_block_done = false;
        let outcome = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if first_block_done {
                    return true;
                }
                if let Ok(s) = std::str::from_utf8(data) {
                    let s = s.trim_end();
                    if s.is_empty() {
                        first_block_done = true;
                    } else {
                        lines.push(s.to_string());
                    }
                }
                true
            })?;
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()
        };
        if let Err(e) = outcome {
            tracing::debug!("header fetch for {} did not complete: {}", url, e);
        }

        Ok(HeaderMap::from_lines(&lines))
    }

    /// Performs a GET (body discarded) and returns libcurl's post-transfer
    /// metadata. An invalid URL short-circuits to the all-zero record, the
    /// same way `check` short-circuits to `code = 0`.
    pub fn get_info(
        &self,
        url: &str,
        use_proxy: bool,
        follow_redirect: bool,
    ) -> Result<TransferInfo, UrlError> {
        let opts = self.base_options(use_proxy, follow_redirect)?;
        if !url_model::validate(url) {
            return Ok(TransferInfo::default());
        }

        let mut easy = Easy::new();
        easy.url(url)?;
        opts.apply(&mut easy)?;
        let outcome = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()
        };
        if let Err(e) = outcome {
            tracing::debug!("info transfer for {} did not complete: {}", url, e);
        }

        Ok(collect_info(&mut easy))
    }

    /// Base transport options. Resolving the proxy settings is the only
    /// fallible step and happens before any network or file activity.
    fn base_options(
        &self,
        use_proxy: bool,
        follow_redirect: bool,
    ) -> Result<RequestOptions, UrlError> {
        let mut opts = RequestOptions::new().follow_redirect(follow_redirect);
        if use_proxy {
            opts = opts.proxy(ProxySettings::from_config(&self.config)?);
        }
        Ok(opts)
    }

    fn fetch_options(&self, options: &FetchOptions) -> Result<RequestOptions, UrlError> {
        let mut opts = self
            .base_options(options.use_proxy, options.follow_redirect)?
            .headers(&options.headers);
        if let Some(cookie) = &options.cookie {
            opts = opts.cookie(cookie.clone());
        }
        Ok(opts)
    }
}

fn collect_info(easy: &mut Easy) -> TransferInfo {
    TransferInfo {
        effective_url: easy.effective_url().ok().flatten().map(str::to_string),
        response_code: easy.response_code().unwrap_or(0),
        content_type: easy.content_type().ok().flatten().map(str::to_string),
        redirect_count: easy.redirect_count().unwrap_or(0),
        redirect_url: easy.redirect_url().ok().flatten().map(str::to_string),
        total_time: easy.total_time().unwrap_or_default(),
        namelookup_time: easy.namelookup_time().unwrap_or_default(),
        connect_time: easy.connect_time().unwrap_or_default(),
        pretransfer_time: easy.pretransfer_time().unwrap_or_default(),
        starttransfer_time: easy.starttransfer_time().unwrap_or_default(),
        redirect_time: easy.redirect_time().unwrap_or_default(),
        download_size: easy.download_size().unwrap_or(0.0),
        upload_size: easy.upload_size().unwrap_or(0.0),
        primary_ip: easy.primary_ip().ok().flatten().map(str::to_string),
    }
}
