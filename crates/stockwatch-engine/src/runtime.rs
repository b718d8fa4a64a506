//! StockwatchRuntime: owns the ledger, engine, query service and notifier.
//!
//! Opening a runtime with a report log replays the log into a fresh ledger
//! before any submission is accepted, so a restart reproduces the state the
//! previous process had published.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockwatch_core::config::StockwatchConfig;
use stockwatch_core::errors::StockwatchResult;
use stockwatch_core::models::{ChangeEvent, EntityKey, Report, ReportSubmission, StatusView};
use stockwatch_core::traits::IReportLog;
use stockwatch_ledger::{EntityLedger, JsonlReportLog};
use stockwatch_notify::{Subscription, SubscriptionNotifier};
use stockwatch_observability::tracing_setup::events;
use stockwatch_observability::{EngineMetrics, MetricsSnapshot};

use crate::engine::{AggregationEngine, SubmitOutcome};
use crate::query::QueryService;

pub struct StockwatchRuntime {
    config: StockwatchConfig,
    ledger: Arc<EntityLedger>,
    notifier: Arc<SubscriptionNotifier>,
    metrics: Arc<EngineMetrics>,
    engine: AggregationEngine,
    query: QueryService,
    report_log: Option<Arc<dyn IReportLog>>,
}

impl StockwatchRuntime {
    /// Wire every component from `config`, replaying `report_log` if given.
    pub fn open(
        config: StockwatchConfig,
        report_log: Option<Arc<dyn IReportLog>>,
    ) -> StockwatchResult<Self> {
        config.validate()?;

        let ledger = Arc::new(EntityLedger::from_config(&config));
        let notifier = Arc::new(SubscriptionNotifier::new(config.notifier.clone()));
        let metrics = Arc::new(EngineMetrics::new());

        if let Some(log) = &report_log {
            let span = stockwatch_observability::replay_span!("report_log");
            let _entered = span.enter();
            let reports = log.load_all()?;
            let count = ledger.replay(reports)?;
            metrics.record_replayed(count);
            events::replay_completed(count, ledger.len());
        }

        let mut engine = AggregationEngine::new(
            Arc::clone(&ledger),
            Arc::clone(&notifier),
            Arc::clone(&metrics),
            &config,
        );
        if let Some(log) = &report_log {
            engine = engine.with_report_log(Arc::clone(log));
        }
        let query = QueryService::new(Arc::clone(&ledger), Arc::clone(&metrics), &config);

        Ok(Self {
            config,
            ledger,
            notifier,
            metrics,
            engine,
            query,
            report_log,
        })
    }

    /// Open with the JSON-lines log named by `storage.report_log_path`, or
    /// purely in memory when none is configured.
    pub fn open_from_config(config: StockwatchConfig) -> StockwatchResult<Self> {
        let log: Option<Arc<dyn IReportLog>> = match &config.storage.report_log_path {
            Some(path) => {
                let log: Arc<dyn IReportLog> = Arc::new(JsonlReportLog::open(path)?);
                Some(log)
            }
            None => None,
        };
        Self::open(config, log)
    }

    pub fn submit(&self, report: Report) -> StockwatchResult<SubmitOutcome> {
        self.engine.submit(report)
    }

    /// Submit a raw inbound submission, stamped with the current time if it
    /// carries none.
    pub fn submit_raw(&self, submission: ReportSubmission) -> StockwatchResult<SubmitOutcome> {
        self.engine.submit_raw(submission, Utc::now())
    }

    pub fn query(&self) -> &QueryService {
        &self.query
    }

    /// Shorthand for `query().status_of`.
    pub fn status_of(&self, key: &EntityKey, as_of: Option<DateTime<Utc>>) -> StatusView {
        self.query.status_of(key, as_of)
    }

    pub fn subscribe<P>(&self, predicate: P) -> Subscription
    where
        P: Fn(&ChangeEvent) -> bool + Send + Sync + 'static,
    {
        self.notifier.subscribe(predicate)
    }

    pub fn subscribe_all(&self) -> Subscription {
        self.notifier.subscribe_all()
    }

    pub fn notifier(&self) -> &Arc<SubscriptionNotifier> {
        &self.notifier
    }

    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &Arc<EntityLedger> {
        &self.ledger
    }

    pub fn report_log(&self) -> Option<&Arc<dyn IReportLog>> {
        self.report_log.as_ref()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn config(&self) -> &StockwatchConfig {
        &self.config
    }

    /// Close every subscription. Submissions remain possible.
    pub fn shutdown(&self) {
        self.notifier.close();
    }
}
