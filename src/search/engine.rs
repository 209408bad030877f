//! Core search engine implementation
use crate::error::Result;
use crate::metrics::Metrics;
use crate::processor::{
    ContextWindow, FileContents, LineMatcher, SearchMatch, has_allowed_extension, read_lines,
};
use crate::search::SearchSettings;
use crate::search::cache::{QueryKey, ResultCache};
use crate::walker::{LimitSpec, resolve};
use log::debug;
use std::path::Path;
use std::sync::Arc;

/// Searches named roots and caches whole result lists by query.
pub struct SearchEngine {
    settings: SearchSettings,
    limit: Option<LimitSpec>,
    cache: ResultCache,
    pub metrics: Arc<Metrics>,
}

impl SearchEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self::with_metrics(settings, Arc::new(Metrics::new()))
    }

    pub fn with_metrics(settings: SearchSettings, metrics: Arc<Metrics>) -> Self {
        let cache = ResultCache::new(settings.cache_size);
        Self {
            settings,
            limit: None,
            cache,
            metrics,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn limit(&self) -> Option<&LimitSpec> {
        self.limit.as_ref()
    }

    /// Restricts every subsequent search to files matching `spec` in each root.
    ///
    /// The limit is not part of the cache key, so changing it clears the cache.
    pub fn set_limit(&mut self, spec: Option<&str>) {
        let limit = spec.and_then(LimitSpec::parse);
        if limit != self.limit {
            self.cache.clear();
            self.limit = limit;
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Runs `pattern` over `roots` in order. Unknown or missing roots and unreadable
    /// files are skipped; only an invalid pattern fails the call.
    pub fn search<S: AsRef<str>>(
        &mut self,
        pattern: &str,
        roots: &[S],
        context_after: usize,
        context_before: usize,
    ) -> Result<Arc<[SearchMatch]>> {
        let window = ContextWindow::clamped(
            context_after,
            context_before,
            self.settings.max_context_lines,
        );
        let key = QueryKey::new(pattern, roots, window);

        if self.settings.cache_enabled
            && let Some(hit) = self.cache.get(&key)
        {
            debug!("Cache hit for pattern {pattern:?} ({} matches)", hit.len());
            self.metrics.cache_hits.inc();
            return Ok(hit);
        }
        self.metrics.cache_misses.inc();

        let matcher = LineMatcher::new(pattern, window)?;
        let mut results = Vec::new();

        for root in roots {
            let root = root.as_ref();
            let Some(base_dir) = self.settings.roots.get(root) else {
                debug!("Skipping unconfigured root: {root}");
                continue;
            };
            if !base_dir.is_dir() {
                debug!("Skipping missing root {root}: {}", base_dir.display());
                continue;
            }

            for path in resolve(base_dir, self.limit.as_ref()) {
                self.scan_file(&matcher, &path, &mut results);
            }
        }

        let results: Arc<[SearchMatch]> = results.into();
        if self.settings.cache_enabled {
            self.cache.put(key, Arc::clone(&results));
        }
        Ok(results)
    }

    fn scan_file(&self, matcher: &LineMatcher, path: &Path, results: &mut Vec<SearchMatch>) {
        if !has_allowed_extension(path, &self.settings.extensions) {
            self.metrics.files_skipped.inc();
            return;
        }

        match read_lines(path) {
            FileContents::Lines(lines) => {
                self.metrics.files_scanned.inc();
                let found = matcher.match_lines(path, &lines);
                self.metrics.matches_found.inc_by(found.len() as u64);
                results.extend(found);
            }
            FileContents::Undecodable => {
                debug!("Skipping undecodable file: {}", path.display());
                self.metrics.files_skipped.inc();
            }
            FileContents::Unreadable(e) => {
                debug!("Skipping unreadable file {}: {e}", path.display());
                self.metrics.files_skipped.inc();
            }
        }
    }
}
