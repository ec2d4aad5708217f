//! Injected logger collaborator.
//!
//! The client never branches on logger presence: callers that do not care
//! get [`NoopLogger`], callers on the `tracing` stack get [`TracingLogger`].
//! Logging is fire-and-forget and must never fail a call.

/// Logging capability injected into `UrlClient`.
///
/// `level` is a lowercase name ("info", "warn", ...); `context` is a flat
/// list of key/value pairs attached to the message.
pub trait Logger: Send + Sync {
    fn log(&self, level: &str, message: &str, context: &[(&str, &str)]);
}

/// Default logger: discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: &str, _message: &str, _context: &[(&str, &str)]) {}
}

/// Forwards log calls to the `tracing` macros at the matching level.
/// Unknown level names land on `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: &str, message: &str, context: &[(&str, &str)]) {
        let rendered = render(message, context);
        match level {
            "error" => tracing::error!("{}", rendered),
            "warn" => tracing::warn!("{}", rendered),
            "debug" => tracing::debug!("{}", rendered),
            "trace" => tracing::trace!("{}", rendered),
            _ => tracing::info!("{}", rendered),
        }
    }
}

fn render(message: &str, context: &[(&str, &str)]) -> String {
    if context.is_empty() {
        return message.to_string();
    }
    let ctx: Vec<String> = context.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{} [{}]", message, ctx.join(" "))
}
