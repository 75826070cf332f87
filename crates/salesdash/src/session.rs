//! One dashboard session: the current upload, its caches and the charts

use crate::controls::FilterControls;
use crate::view::{filter_summary, DashboardView, PreviewTable, SummaryCards};
use salesdash_charts::ChartManager;
use salesdash_common::{ContentDigest, DashError, Result};
use salesdash_config::Config;
use salesdash_data::{
    CacheStats, Dataset, LoaderOptions, MemoCache, MetricsAggregator, MetricsReport, RecordLoader,
    SelectionFingerprint,
};
use salesdash_i18n::{fluent_args, Locale, Localizer};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What one run produced: a full view, or a single message.
#[derive(Debug, Clone)]
pub enum DashboardOutcome {
    /// Indicators, tables and charts of the current selection
    Ready(Box<DashboardView>),
    /// Localized error text shown in place of the dashboard
    Failed { message: String },
}

impl DashboardOutcome {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Everything derived from the configuration.
#[derive(Debug, Clone)]
struct Pipeline {
    localizer: Arc<Localizer>,
    loader: RecordLoader,
    charts: ChartManager,
}

impl Pipeline {
    fn build(config: &Config) -> Result<Self> {
        let locale = Locale::from_code(&config.data.locale).ok_or_else(|| {
            DashError::validation_field(
                format!("unsupported locale '{}'", config.data.locale),
                "data.locale",
            )
        })?;
        let localizer = Arc::new(Localizer::new(locale)?);
        let loader = RecordLoader::new(
            LoaderOptions {
                delimiter: config.data.delimiter,
                day_first: config.data.day_first,
            },
            Arc::clone(&localizer),
        );
        let charts = ChartManager::from_config(
            &config.charts,
            &localizer,
            &config.data.currency_symbol,
        )?;

        Ok(Self {
            localizer,
            loader,
            charts,
        })
    }
}

/// Runs Loader, Filter, Aggregator and charts for one user.
///
/// Loaded datasets are memoized by content digest and reports by selection
/// fingerprint. A new upload drops every cached report.
#[derive(Debug)]
pub struct DashboardSession {
    config: Config,
    pipeline: Pipeline,
    aggregator: MetricsAggregator,
    datasets: MemoCache<ContentDigest, Dataset>,
    reports: MemoCache<SelectionFingerprint, MetricsReport>,
    current: Option<ContentDigest>,
}

impl DashboardSession {
    /// Build a session for `config`
    pub fn new(config: Config) -> Result<Self> {
        let pipeline = Pipeline::build(&config)?;
        Ok(Self {
            datasets: MemoCache::new("datasets", config.cache.max_datasets),
            reports: MemoCache::new("reports", config.cache.max_reports),
            aggregator: MetricsAggregator::new(),
            current: None,
            pipeline,
            config,
        })
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub fn localizer(&self) -> &Localizer {
        &self.pipeline.localizer
    }

    /// Digest of the last accepted upload
    pub const fn current(&self) -> Option<ContentDigest> {
        self.current
    }

    /// Dataset cache counters
    pub fn dataset_stats(&self) -> CacheStats {
        self.datasets.stats()
    }

    /// Report cache counters
    pub fn report_stats(&self) -> CacheStats {
        self.reports.stats()
    }

    /// Accept the raw bytes of an upload.
    ///
    /// Identical bytes are parsed only once.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub fn upload(&mut self, bytes: &[u8]) -> Result<Arc<Dataset>> {
        let digest = ContentDigest::of(bytes);
        let loader = &self.pipeline.loader;
        let dataset = self
            .datasets
            .get_or_try_insert_with(digest, || loader.load(bytes))?;

        if self.current != Some(digest) {
            if let Some(previous) = self.current {
                debug!(previous = %previous.short(), "New upload replaces the previous one");
                self.reports.invalidate_all();
            }
            self.current = Some(digest);
        }

        info!(digest = %digest.short(), records = dataset.len(), "Upload accepted");
        Ok(dataset)
    }

    /// Filter, aggregate and render `dataset` under `controls`
    #[instrument(skip_all, fields(digest = %dataset.digest().short()))]
    pub fn render(&self, dataset: &Dataset, controls: &FilterControls) -> Result<DashboardView> {
        let localizer = self.localizer();
        let selection = controls.resolve(dataset);
        let filtered = selection.apply(dataset.records());

        let report = self
            .reports
            .get_or_try_insert_with(selection.fingerprint(dataset.digest()), || {
                self.aggregator.aggregate(filtered.iter().copied())
            })?;
        let charts = self.pipeline.charts.render_all(&report.monthly)?;
        debug!(filtered = filtered.len(), months = report.monthly.len(), "Selection rendered");

        Ok(DashboardView {
            title: localizer.message("app-title"),
            banner: localizer.message_with("upload-success", &fluent_args!["count" => dataset.len()]),
            record_count: dataset.len(),
            filter_summary: filter_summary(&selection, localizer),
            empty_notice: filtered
                .is_empty()
                .then(|| localizer.message("filter-empty")),
            cards: SummaryCards::new(&report.summary, localizer, &self.config.data.currency_symbol),
            preview: PreviewTable::new(
                filtered.iter().copied().take(self.config.data.preview_rows),
                localizer,
            ),
            selection,
            report,
            charts,
        })
    }

    /// Upload and render; any failure becomes one localized message.
    pub fn run(&mut self, bytes: &[u8], controls: &FilterControls) -> DashboardOutcome {
        match self.process(bytes, controls) {
            Ok(view) => DashboardOutcome::Ready(Box::new(view)),
            Err(e) => self.failure(&e),
        }
    }

    fn process(&mut self, bytes: &[u8], controls: &FilterControls) -> Result<DashboardView> {
        let dataset = self.upload(bytes)?;
        self.render(&dataset, controls)
    }

    /// "Erro ao processar o arquivo: ..." for `error`
    pub fn failure(&self, error: &DashError) -> DashboardOutcome {
        warn!(error = %error, input = error.is_input_error(), "Processing failed");
        DashboardOutcome::Failed {
            message: self
                .localizer()
                .message_with("processing-error", &fluent_args!["error" => error.to_string()]),
        }
    }

    /// Switch to a new configuration.
    ///
    /// Cached datasets carry localized weekday names, so every cache entry is
    /// dropped. On error the session keeps its previous configuration.
    #[instrument(skip_all)]
    pub fn reconfigure(&mut self, config: Config) -> Result<()> {
        let pipeline = Pipeline::build(&config)?;

        if config.cache == self.config.cache {
            self.datasets.invalidate_all();
            self.reports.invalidate_all();
        } else {
            self.datasets = MemoCache::new("datasets", config.cache.max_datasets);
            self.reports = MemoCache::new("reports", config.cache.max_reports);
        }
        self.current = None;
        self.pipeline = pipeline;
        self.config = config;
        info!(locale = %self.config.data.locale, "Session reconfigured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::csv_fixtures;

    fn session() -> DashboardSession {
        DashboardSession::new(Config::default()).unwrap()
    }

    #[test]
    fn test_identical_upload_is_parsed_once() {
        let mut session = session();
        session.upload(csv_fixtures::THREE_MONTHS.as_bytes()).unwrap();
        session.upload(csv_fixtures::THREE_MONTHS.as_bytes()).unwrap();

        let stats = session.dataset_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(session.report_stats().invalidations, 0);
    }

    #[test]
    fn test_new_upload_drops_reports() {
        let mut session = session();
        session.upload(csv_fixtures::THREE_MONTHS.as_bytes()).unwrap();
        session.upload(csv_fixtures::MULTI_PRODUCT.as_bytes()).unwrap();

        assert_eq!(session.report_stats().invalidations, 1);
        assert_eq!(
            session.current(),
            Some(ContentDigest::of(csv_fixtures::MULTI_PRODUCT.as_bytes()))
        );
    }

    #[test]
    fn test_failure_message_is_localized() {
        let mut session = session();
        let outcome = session.run(csv_fixtures::BAD_DATE.as_bytes(), &FilterControls::default());

        match outcome {
            DashboardOutcome::Failed { message } => {
                assert!(message.starts_with("Erro ao processar o arquivo: "));
                assert!(message.contains("Data"));
            }
            DashboardOutcome::Ready(_) => panic!("bad date must fail"),
        }
        assert!(session.current().is_none());
    }

    #[test]
    fn test_reconfigure_switches_locale() {
        let mut session = session();
        let mut config = Config::default();
        config.data.locale = "en-US".to_string();
        session.reconfigure(config).unwrap();

        assert_eq!(session.localizer().locale(), Locale::English);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_reconfigure_rejects_bad_locale() {
        let mut session = session();
        let mut config = Config::default();
        config.data.locale = "xx-YY".to_string();

        assert!(session.reconfigure(config).is_err());
        assert_eq!(session.config().data.locale, "pt-BR");
    }
}
