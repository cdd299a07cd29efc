use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Sink for human-readable diagnostics. Default implementation drops them.
pub trait DiagnosticLog: Send + Sync {
    fn log(&self, _message: &str) {}
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl DiagnosticLog for NoopLog {}

/// Forwards diagnostics to `tracing` under the `physics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn log(&self, message: &str) {
        tracing::debug!(target: "physics", "{message}");
    }
}

/// Handle held by every subsystem. Messages reach the sink only while the
/// debug flag is enabled.
#[derive(Clone, Default)]
pub struct Logger {
    sink: Option<Arc<dyn DiagnosticLog>>,
    enabled: bool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("has_sink", &self.sink.is_some())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Logger {
    pub fn new(sink: Arc<dyn DiagnosticLog>, enabled: bool) -> Self {
        Self { sink: Some(sink), enabled }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.sink.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn log(&self, message: &str) {
        if !self.enabled {
            return;
        }
        if let Some(sink) = &self.sink {
            sink.log(message);
        }
    }

    /// Builds the message lazily so disabled loggers cost nothing.
    pub fn log_with(&self, message: impl FnOnce() -> String) {
        if self.is_enabled() {
            self.log(&message());
        }
    }
}

/// Per-key cooldown on a caller-supplied clock (seconds).
#[derive(Debug, Clone)]
pub(crate) struct Throttle {
    cooldown: f32,
    last_emit: HashMap<&'static str, f32>,
}

impl Throttle {
    pub(crate) fn new(cooldown: f32) -> Self {
        Self { cooldown, last_emit: HashMap::new() }
    }

    /// True when `key` has not fired within the cooldown; records the emission.
    pub(crate) fn ready(&mut self, key: &'static str, now: f32) -> bool {
        match self.last_emit.get(key) {
            Some(&last) if now - last < self.cooldown => false,
            _ => {
                self.last_emit.insert(key, now);
                true
            }
        }
    }
}
