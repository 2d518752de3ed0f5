use crate::logging::DEFAULT_FILTER;

/// Configurations for the Harbor dock host
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback tracing filter, used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    /// Set the fallback tracing filter.
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set the profiling mode.
    pub fn profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling is disabled
    Off,
    /// Profiling scopes are recorded, and can be viewed using an in-process viewer
    On,
    /// Profiling scopes are recorded and served over HTTP for tools such as
    /// 'puffin_viewer'
    WithWebserver,
}
