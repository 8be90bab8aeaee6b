//! Runtime configuration for the demo.

use std::path::PathBuf;

/// Default log filter when `HUEFREE_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration for the HueFree command line.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// JSON vision set to use instead of the built-in table.
    pub visions: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            visions: std::env::var_os("HUEFREE_VISIONS").map(PathBuf::from),
            log_filter: std::env::var("HUEFREE_LOG")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}

impl DemoConfig {
    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, visions: Option<PathBuf>, log_filter: Option<String>) -> Self {
        if visions.is_some() {
            self.visions = visions;
        }
        if let Some(filter) = log_filter {
            self.log_filter = filter;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let base = DemoConfig {
            visions: Some(PathBuf::from("env.json")),
            log_filter: "warn".into(),
        };
        let cfg = base
            .clone()
            .with_overrides(Some(PathBuf::from("flag.json")), Some("debug".into()));
        assert_eq!(cfg.visions.as_deref(), Some(std::path::Path::new("flag.json")));
        assert_eq!(cfg.log_filter, "debug");

        let kept = base.with_overrides(None, None);
        assert_eq!(kept.visions.as_deref(), Some(std::path::Path::new("env.json")));
        assert_eq!(kept.log_filter, "warn");
    }
}
