use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    pub files_scanned: IntCounter,
    pub files_skipped: IntCounter,
    pub matches_found: IntCounter,
    pub cache_hits: IntCounter,
    pub cache_misses: IntCounter,
    registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter(name: &str, help: &str) -> IntCounter {
    IntCounter::with_opts(Opts::new(name, help)).expect("static counter options are valid")
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let files_scanned = counter("files_scanned", "Number of files read and matched");
        let files_skipped = counter(
            "files_skipped",
            "Number of files skipped by extension or read failure",
        );
        let matches_found = counter("matches_found", "Number of matching lines found");
        let cache_hits = counter("cache_hits", "Number of searches answered from the cache");
        let cache_misses = counter("cache_misses", "Number of searches that scanned files");

        registry.register(Box::new(files_scanned.clone())).ok();
        registry.register(Box::new(files_skipped.clone())).ok();
        registry.register(Box::new(matches_found.clone())).ok();
        registry.register(Box::new(cache_hits.clone())).ok();
        registry.register(Box::new(cache_misses.clone())).ok();

        Metrics {
            files_scanned,
            files_skipped,
            matches_found,
            cache_hits,
            cache_misses,
            registry: Arc::new(registry),
        }
    }

    /// Renders all counters in the Prometheus text exposition format.
    pub fn gather(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if TextEncoder::new().encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
