//! Screening entry points for hosts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mcc_dictionary::{DictionaryCache, DictionarySnapshot, DictionarySource, SnapshotInfo};
use mcc_match::{Screener, ScreeningGroups};
use mcc_model::{MccCandidate, PatientDiagnosis, ScreeningConfig, validate_threshold};

use crate::error::Result;
use crate::logging::redact_value;
use crate::report::ScreeningReport;
use crate::settings::ScreeningSettings;

/// Screening calls slower than this are logged at `warn`.
pub const LATENCY_BUDGET: Duration = Duration::from_millis(500);

/// Screens patient diagnoses against a hot-reloadable dictionary.
///
/// The service is `Sync` whenever its source is; share it behind an `Arc`
/// and call it from any number of threads. Each call pins one dictionary
/// snapshot for its whole duration, so a concurrent reload never produces
/// a mixed result.
pub struct ScreeningService<S> {
    cache: DictionaryCache<S>,
    screener: Screener,
}

impl<S: DictionarySource> ScreeningService<S> {
    /// Creates a service with the default configuration.
    pub fn new(source: S) -> Self {
        Self {
            cache: DictionaryCache::new(source),
            screener: Screener::new(ScreeningConfig::default()),
        }
    }

    /// Creates a service with a validated configuration.
    pub fn with_config(source: S, config: ScreeningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache: DictionaryCache::new(source),
            screener: Screener::new(config),
        })
    }

    pub fn config(&self) -> &ScreeningConfig {
        self.screener.config()
    }

    pub fn cache(&self) -> &DictionaryCache<S> {
        &self.cache
    }

    /// Loads the dictionary ahead of the first screening call.
    pub fn load_dictionary(&self) -> Result<SnapshotInfo> {
        Ok(self.cache.load()?.info())
    }

    /// Refetches the dictionary and publishes it as a new version.
    ///
    /// On failure the previous snapshot stays in effect.
    pub fn reload_dictionary(&self) -> Result<SnapshotInfo> {
        Ok(self.cache.reload()?.info())
    }

    /// Metadata of the published snapshot, if one is loaded.
    pub fn snapshot_info(&self) -> Option<SnapshotInfo> {
        self.cache.current_snapshot().map(|s| s.info())
    }

    /// All retained candidates across the diagnoses, ranked.
    pub fn screen(&self, diagnoses: &[PatientDiagnosis]) -> Result<Vec<MccCandidate>> {
        self.screen_flat(diagnoses, None)
    }

    /// Like [`Self::screen`] with a per-call threshold.
    pub fn screen_with_threshold(
        &self,
        diagnoses: &[PatientDiagnosis],
        threshold: f64,
    ) -> Result<Vec<MccCandidate>> {
        validate_threshold(threshold)?;
        self.screen_flat(diagnoses, Some(threshold))
    }

    /// Ranked candidates per diagnosis, Top-K truncated when enabled.
    pub fn screen_grouped(&self, diagnoses: &[PatientDiagnosis]) -> Result<ScreeningGroups> {
        let (_, groups) = self.grouped(diagnoses, None)?;
        Ok(groups)
    }

    /// Like [`Self::screen_grouped`] with a per-call threshold.
    pub fn screen_grouped_with_threshold(
        &self,
        diagnoses: &[PatientDiagnosis],
        threshold: f64,
    ) -> Result<ScreeningGroups> {
        validate_threshold(threshold)?;
        let (_, groups) = self.grouped(diagnoses, Some(threshold))?;
        Ok(groups)
    }

    /// Grouped result plus summary data for one patient.
    pub fn screen_report(
        &self,
        diagnoses: &[PatientDiagnosis],
        threshold: Option<f64>,
    ) -> Result<ScreeningReport> {
        if let Some(threshold) = threshold {
            validate_threshold(threshold)?;
        }
        let (snapshot, groups) = self.grouped(diagnoses, threshold)?;
        Ok(ScreeningReport::new(
            snapshot.version(),
            self.config().effective_threshold(threshold),
            groups,
        ))
    }

    fn screen_flat(
        &self,
        diagnoses: &[PatientDiagnosis],
        threshold: Option<f64>,
    ) -> Result<Vec<MccCandidate>> {
        let snapshot = self.pinned_snapshot(diagnoses)?;
        let started = Instant::now();
        let candidates = self
            .screener
            .screen(snapshot.dictionary(), diagnoses, threshold);
        log_latency("flat", &snapshot, diagnoses.len(), started.elapsed());
        Ok(candidates)
    }

    fn grouped(
        &self,
        diagnoses: &[PatientDiagnosis],
        threshold: Option<f64>,
    ) -> Result<(Arc<DictionarySnapshot>, ScreeningGroups)> {
        let snapshot = self.pinned_snapshot(diagnoses)?;
        let started = Instant::now();
        let groups = self
            .screener
            .screen_grouped(snapshot.dictionary(), diagnoses, threshold);
        log_latency("grouped", &snapshot, diagnoses.len(), started.elapsed());
        Ok((snapshot, groups))
    }

    /// The snapshot used for an entire call.
    fn pinned_snapshot(&self, diagnoses: &[PatientDiagnosis]) -> Result<Arc<DictionarySnapshot>> {
        let snapshot = self.cache.load()?;
        if snapshot.is_empty() && !diagnoses.is_empty() {
            tracing::warn!(
                version = snapshot.version(),
                "screening against an empty dictionary"
            );
        }
        for diagnosis in diagnoses {
            tracing::trace!(
                code = diagnosis.icd_code().map(redact_value),
                name = diagnosis.diagnosis_name().map(redact_value),
                "screening diagnosis"
            );
        }
        Ok(snapshot)
    }
}

impl ScreeningService<Box<dyn DictionarySource>> {
    /// Builds a service from loaded settings.
    ///
    /// Fails if the settings carry an invalid configuration or no
    /// dictionary source. The dictionary itself is loaded lazily.
    pub fn from_settings(settings: &ScreeningSettings) -> Result<Self> {
        let config = settings.screening_config()?;
        let source = settings.dictionary_source()?;
        Self::with_config(source, config)
    }
}

impl<S> std::fmt::Debug for ScreeningService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreeningService")
            .field("cache", &self.cache)
            .field("config", self.screener.config())
            .finish()
    }
}

fn log_latency(view: &str, snapshot: &DictionarySnapshot, diagnoses: usize, elapsed: Duration) {
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    if elapsed > LATENCY_BUDGET {
        tracing::warn!(
            view,
            diagnoses,
            entries = snapshot.len(),
            version = snapshot.version(),
            elapsed_ms,
            "screening exceeded latency budget"
        );
    } else {
        tracing::debug!(
            view,
            diagnoses,
            version = snapshot.version(),
            elapsed_ms,
            "screening finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcc_dictionary::StaticDictionarySource;
    use mcc_model::{DictionaryEntry, MccType};

    fn service() -> ScreeningService<StaticDictionarySource> {
        ScreeningService::new(StaticDictionarySource::new(vec![DictionaryEntry::new(
            1,
            "I50.000",
            "心力衰竭",
            None,
            MccType::Mcc,
        )]))
    }

    #[test]
    fn first_screen_loads_lazily() {
        let service = service();
        assert!(service.snapshot_info().is_none());
        let candidates = service
            .screen(&[PatientDiagnosis::new("I50.000", "")])
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(service.snapshot_info().unwrap().version, 1);
    }

    #[test]
    fn rejects_invalid_override() {
        let service = service();
        let diagnoses = [PatientDiagnosis::new("I50.000", "心力衰竭")];
        assert!(service.screen_with_threshold(&diagnoses, -0.1).is_err());
        assert!(service.screen_grouped_with_threshold(&diagnoses, 2.0).is_err());
        assert!(service.screen_report(&diagnoses, Some(f64::NAN)).is_err());
    }

    #[test]
    fn rejects_invalid_config() {
        let source = StaticDictionarySource::new(vec![]);
        let config = ScreeningConfig::default().with_threshold(1.5);
        assert!(ScreeningService::with_config(source, config).is_err());
    }
}
