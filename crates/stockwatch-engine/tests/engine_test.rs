//! End-to-end behaviour of the submit path and query surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use stockwatch_core::config::{
    NotifierConfig, OverflowPolicy, PublishPolicy, ResolverStrategy, StockwatchConfig,
};
use stockwatch_core::errors::{StockwatchError, StockwatchResult, StorageError};
use stockwatch_core::models::StockStatus::{Available, Unavailable};
use stockwatch_core::models::{PublicStatus, Report, ReportSubmission};
use stockwatch_core::traits::IReportLog;
use stockwatch_engine::StockwatchRuntime;
use stockwatch_ledger::InMemoryReportLog;
use stockwatch_resolver::ResolutionKind;
use test_fixtures::{at, key, report, report_for};

fn runtime() -> StockwatchRuntime {
    StockwatchRuntime::open(StockwatchConfig::default(), None).unwrap()
}

fn runtime_with(config: StockwatchConfig) -> StockwatchRuntime {
    StockwatchRuntime::open(config, None).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Submission semantics ────────────────────────────────────────────────────

#[test]
fn first_report_is_taken_as_is() {
    let rt = runtime();
    let outcome = rt
        .submit(report_for(key("p1", "m1"), Unavailable, 0.7, 0.0, "a"))
        .unwrap();
    assert_eq!(outcome.aggregate.status, Unavailable);
    assert_eq!(outcome.aggregate.confidence, 0.7);
    assert_eq!(outcome.resolution, ResolutionKind::Initial);
    assert!(outcome.changed);
    assert!(outcome.event.is_some());
}

#[test]
fn agreeing_report_never_lowers_below_decayed_prior() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    let decayed_only = rt.status_of(&key("p1", "m1"), Some(at(30.0))).confidence;

    let outcome = rt
        .submit(report_for(key("p1", "m1"), Available, 0.2, 30.0, "b"))
        .unwrap();
    assert!(outcome.aggregate.confidence >= decayed_only);
    assert_eq!(outcome.resolution, ResolutionKind::Reinforced);
    assert!(!outcome.changed);
}

#[test]
fn immediate_conflict_does_not_flip() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    let outcome = rt.submit(report(Unavailable, 0.0, "b")).unwrap();
    assert_eq!(outcome.aggregate.status, Available);
    assert_eq!(outcome.resolution, ResolutionKind::Contested);
    // min(1.0, 1.0 × 0.6 + (1 - 1.0) × 0.4)
    assert!(close(outcome.aggregate.confidence, 0.6));
}

#[test]
fn conflict_against_decayed_prior_flips() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    // prior decays to 0.25 by 120h: 1.0 × 0.4 > 0.25 × 0.6, blended 0.15 + 0.4
    let outcome = rt.submit(report(Unavailable, 120.0, "b")).unwrap();
    assert_eq!(outcome.aggregate.status, Unavailable);
    assert_eq!(outcome.resolution, ResolutionKind::Flipped);
    assert!(close(outcome.aggregate.confidence, 0.55));
    assert!(outcome.changed);
    assert_eq!(rt.metrics().status_flips, 1);
}

#[test]
fn zero_confidence_report_does_not_flip_expired_belief() {
    let rt = runtime();
    let k = key("p1", "m1");
    rt.submit(report(Available, 0.0, "a")).unwrap();
    let outcome = rt
        .submit(report_for(k.clone(), Unavailable, 0.0, 200.0, "b"))
        .unwrap();
    assert_eq!(outcome.aggregate.status, Available);
    assert_eq!(outcome.aggregate.confidence, 0.0);
    assert_eq!(outcome.resolution, ResolutionKind::Contested);
    assert!(outcome.event.is_none());
    assert_eq!(rt.metrics().status_flips, 0);
    assert!(!rt.status_of(&k, Some(at(200.0))).visible);
}

#[test]
fn weak_disagreement_does_not_raise_stale_belief() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    // prior 0.2 at 128h
    let outcome = rt
        .submit(report_for(key("p1", "m1"), Unavailable, 0.05, 128.0, "b"))
        .unwrap();
    assert_eq!(outcome.aggregate.status, Available);
    assert!(outcome.aggregate.confidence <= 0.2 + 1e-9);
    assert!(!outcome.changed);
}

#[test]
fn day_old_conflict_scenario() {
    let rt = runtime();
    let k = key("p1", "m1");
    rt.submit(report(Available, 0.0, "a")).unwrap();

    let now = rt.status_of(&k, Some(at(0.0)));
    assert_eq!((now.status, now.confidence, now.visible), (PublicStatus::Available, 1.0, true));
    let day = rt.status_of(&k, Some(at(24.0)));
    assert!(close(day.confidence, 0.85));
    assert!(day.visible);

    let outcome = rt.submit(report(Unavailable, 24.0, "b")).unwrap();
    assert_eq!(outcome.aggregate.status, Available);
    assert!(close(outcome.aggregate.confidence, 0.51));
    assert!(!outcome.changed);
    assert!(outcome.event.is_none());
}

#[test]
fn latest_wins_replaces_belief() {
    let mut config = StockwatchConfig::default();
    config.resolver.strategy = ResolverStrategy::LatestWins;
    let rt = runtime_with(config);
    rt.submit(report(Available, 0.0, "a")).unwrap();
    let outcome = rt.submit(report(Unavailable, 24.0, "b")).unwrap();
    assert_eq!(outcome.aggregate.status, Unavailable);
    assert_eq!(outcome.aggregate.confidence, 1.0);
    assert_eq!(outcome.resolution, ResolutionKind::Replaced);
}

// ── Validation and de-duplication ───────────────────────────────────────────

#[test]
fn invalid_reports_never_reach_the_ledger() {
    let rt = runtime();
    for bad in [
        report_for(key("p1", "m1"), Available, 1.5, 0.0, "a"),
        report_for(key("p1", "m1"), Available, f64::NAN, 0.0, "a"),
        report_for(key("", "m1"), Available, 1.0, 0.0, "a"),
    ] {
        let err = rt.submit(bad).unwrap_err();
        assert!(matches!(err, StockwatchError::InvalidReport { .. }));
    }

    let raw = ReportSubmission {
        location_id: "p1".to_string(),
        item_id: "m1".to_string(),
        status: "restocking".to_string(),
        base_confidence: 1.0,
        submitted_at: None,
        submitter_token: "a".to_string(),
    };
    assert!(rt.engine().submit_raw(raw, at(0.0)).is_err());

    assert!(rt.ledger().is_empty());
    assert!(rt.query().recent_reports(10, Some(at(0.0))).is_empty());
    assert_eq!(rt.metrics().reports_invalid, 4);
}

#[test]
fn raw_submission_defaults_time_and_confidence() {
    let rt = runtime();
    let raw: ReportSubmission =
        serde_json::from_str(r#"{"location_id":"p1","item_id":"m1","status":"in_stock"}"#).unwrap();
    let outcome = rt.engine().submit_raw(raw, at(5.0)).unwrap();
    assert_eq!(outcome.aggregate.status, Available);
    assert_eq!(outcome.aggregate.confidence, 1.0);
    assert_eq!(outcome.aggregate.last_report_at, at(5.0));
}

#[test]
fn duplicate_within_cooldown_is_rejected_with_retry_after() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();

    // 180s into a 300s cooldown.
    let err = rt.submit(report(Unavailable, 0.05, "a")).unwrap_err();
    match err {
        StockwatchError::DuplicateSubmission {
            entity_key,
            retry_after_secs,
        } => {
            assert_eq!(entity_key, "p1/m1");
            assert_eq!(retry_after_secs, 120);
        }
        other => panic!("expected duplicate, got {other}"),
    }
    assert!(err_is_policy(&rt, report(Available, 0.01, "a")));

    let agg = rt.ledger().current(&key("p1", "m1")).unwrap();
    assert_eq!(agg.sample_count, 1);
    assert_eq!(rt.metrics().reports_duplicate, 2);
}

fn err_is_policy(rt: &StockwatchRuntime, r: Report) -> bool {
    rt.submit(r).is_err_and(|e| e.is_policy_rejection())
}

#[test]
fn dedup_is_per_key_and_skips_empty_tokens() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    // Same token, different key.
    rt.submit(report_for(key("p1", "m2"), Available, 1.0, 0.0, "a"))
        .unwrap();
    // Empty tokens are never de-duplicated.
    rt.submit(report(Available, 0.0, "")).unwrap();
    rt.submit(report(Available, 0.0, "")).unwrap();
    assert_eq!(rt.ledger().current(&key("p1", "m1")).unwrap().sample_count, 3);
}

#[test]
fn zero_cooldown_disables_dedup() {
    let mut config = StockwatchConfig::default();
    config.submission.dedup_cooldown_secs = 0;
    let rt = runtime_with(config);
    rt.submit(report(Available, 0.0, "a")).unwrap();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    assert_eq!(rt.ledger().current(&key("p1", "m1")).unwrap().sample_count, 2);
}

// ── Durable write-through ───────────────────────────────────────────────────

/// Log whose appends fail while `failing` is set.
#[derive(Default)]
struct FlakyLog {
    failing: AtomicBool,
    reports: Mutex<Vec<Report>>,
}

impl IReportLog for FlakyLog {
    fn append(&self, report: &Report) -> StockwatchResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "disk full".to_string(),
            }
            .into());
        }
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    fn load_all(&self) -> StockwatchResult<Vec<Report>> {
        Ok(self.reports.lock().unwrap().clone())
    }
}

#[test]
fn failed_write_through_applies_nothing() {
    let log = Arc::new(FlakyLog::default());
    let shared: Arc<dyn IReportLog> = log.clone();
    let rt = StockwatchRuntime::open(StockwatchConfig::default(), Some(shared)).unwrap();
    let sub = rt.subscribe_all();

    rt.submit(report(Available, 0.0, "a")).unwrap();
    let before = rt.ledger().current(&key("p1", "m1")).unwrap();
    assert_eq!(sub.drain().len(), 1);

    log.failing.store(true, Ordering::SeqCst);
    let err = rt.submit(report(Unavailable, 120.0, "b")).unwrap_err();
    assert!(matches!(err, StockwatchError::Storage(_)));

    assert_eq!(rt.ledger().current(&key("p1", "m1")).unwrap(), before);
    assert_eq!(rt.ledger().history(&key("p1", "m1")).unwrap().len(), 1);
    assert_eq!(rt.query().recent_reports(10, Some(at(120.0))).len(), 1);
    assert!(sub.try_recv().is_none());
    assert_eq!(rt.metrics().storage_failures, 1);

    // The refused report did not start a cooldown for its token.
    log.failing.store(false, Ordering::SeqCst);
    let outcome = rt.submit(report(Unavailable, 120.0, "b")).unwrap();
    assert_eq!(outcome.aggregate.status, Unavailable);
    assert_eq!(log.load_all().unwrap().len(), 2);
}

#[test]
fn restart_replays_log_to_identical_state() {
    let log: Arc<dyn IReportLog> = Arc::new(InMemoryReportLog::new());
    let first = StockwatchRuntime::open(StockwatchConfig::default(), Some(Arc::clone(&log))).unwrap();
    first.submit(report(Available, 0.0, "a")).unwrap();
    first.submit(report(Unavailable, 24.0, "b")).unwrap();
    first
        .submit(report_for(key("p1", "m2"), Unavailable, 0.5, 30.0, "a"))
        .unwrap();
    // Late report: submitted before the current clock.
    first.submit(report(Available, 12.0, "c")).unwrap();

    let second = StockwatchRuntime::open(StockwatchConfig::default(), Some(Arc::clone(&log))).unwrap();
    for k in [key("p1", "m1"), key("p1", "m2")] {
        assert_eq!(first.ledger().current(&k), second.ledger().current(&k));
    }
    assert_eq!(second.metrics().reports_replayed, 4);
    assert_eq!(second.metrics().reports_accepted, 0);

    // Cooldowns survive the restart.
    let err = second.submit(report(Available, 24.01, "b")).unwrap_err();
    assert!(err.is_policy_rejection());
}

#[test]
fn jsonl_log_round_trips_through_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StockwatchConfig::default();
    config.storage.report_log_path = Some(dir.path().join("reports.jsonl").display().to_string());

    let expected = {
        let rt = StockwatchRuntime::open_from_config(config.clone()).unwrap();
        rt.submit(report(Available, 0.0, "a")).unwrap();
        rt.submit(report(Unavailable, 100.0, "b")).unwrap();
        rt.ledger().current(&key("p1", "m1")).unwrap()
    };

    let rt = StockwatchRuntime::open_from_config(config).unwrap();
    assert_eq!(rt.ledger().current(&key("p1", "m1")).unwrap(), expected);
    assert_eq!(rt.report_log().unwrap().len().unwrap(), 2);
}

#[test]
fn restart_after_crash_mid_append_keeps_accepted_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.jsonl");
    let mut config = StockwatchConfig::default();
    config.storage.report_log_path = Some(path.display().to_string());

    let expected = {
        let rt = StockwatchRuntime::open_from_config(config.clone()).unwrap();
        rt.submit(report(Available, 0.0, "a")).unwrap();
        rt.ledger().current(&key("p1", "m1")).unwrap()
    };
    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    std::io::Write::write_all(&mut file, b"{\"id\":\"torn").unwrap();
    drop(file);

    let rt = StockwatchRuntime::open_from_config(config).unwrap();
    assert_eq!(rt.ledger().current(&key("p1", "m1")).unwrap(), expected);
    rt.submit(report(Available, 1.0, "b")).unwrap();
    assert_eq!(rt.report_log().unwrap().len().unwrap(), 2);
}

#[test]
fn failed_first_write_leaves_no_entity_behind() {
    let log = Arc::new(FlakyLog::default());
    log.failing.store(true, Ordering::SeqCst);
    let shared: Arc<dyn IReportLog> = log.clone();
    let rt = StockwatchRuntime::open(StockwatchConfig::default(), Some(shared)).unwrap();

    for item in ["m1", "m2", "m3"] {
        let err = rt
            .submit(report_for(key("p1", item), Available, 1.0, 0.0, "a"))
            .unwrap_err();
        assert!(matches!(err, StockwatchError::Storage(_)));
    }
    assert_eq!(rt.ledger().tracked_slots(), 0);
    assert!(rt.ledger().is_empty());
    assert!(rt.query().location_overview("p1", Some(at(0.0))).is_empty());

    log.failing.store(false, Ordering::SeqCst);
    rt.submit(report(Available, 0.0, "a")).unwrap();
    assert_eq!(rt.ledger().tracked_slots(), 1);
}

#[test]
fn open_rejects_invalid_config() {
    let mut config = StockwatchConfig::default();
    config.query.visibility_threshold = 1.5;
    assert!(matches!(
        StockwatchRuntime::open(config, None),
        Err(StockwatchError::Config(_))
    ));
}

// ── Notification ────────────────────────────────────────────────────────────

#[test]
fn visibility_change_policy_publishes_only_on_change() {
    let rt = runtime();
    let sub = rt.subscribe_all();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    rt.submit(report(Available, 1.0, "b")).unwrap();
    rt.submit(report(Unavailable, 1.0, "c")).unwrap();

    let events = sub.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, PublicStatus::Available);
    assert_eq!(events[0].sample_count, 1);
}

#[test]
fn hidden_prior_with_weak_agreement_publishes_nothing() {
    let rt = runtime();
    let sub = rt.subscribe_all();
    rt.submit(report_for(key("p1", "m1"), Available, 0.35, 0.0, "a"))
        .unwrap();
    // Prior decays to 0.1 by 40h; a weak agreeing report keeps it hidden.
    let outcome = rt
        .submit(report_for(key("p1", "m1"), Available, 0.1, 40.0, "b"))
        .unwrap();
    assert!(!outcome.changed);
    assert_eq!(sub.drain().len(), 1);
}

#[test]
fn every_update_policy_publishes_each_report() {
    let mut config = StockwatchConfig::default();
    config.submission.publish_policy = PublishPolicy::EveryUpdate;
    let rt = runtime_with(config);
    let sub = rt.subscribe_all();
    for (hours, token) in [(0.0, "a"), (1.0, "b"), (2.0, "c")] {
        rt.submit(report(Available, hours, token)).unwrap();
    }
    let seqs: Vec<u64> = sub.drain().into_iter().map(|e| e.sample_count).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
}

#[test]
fn full_subscriber_yields_warning_not_failure() {
    let mut config = StockwatchConfig::default();
    config.submission.publish_policy = PublishPolicy::EveryUpdate;
    config.notifier = NotifierConfig {
        buffer_capacity: 1,
        overflow: OverflowPolicy::Reject,
    };
    let rt = runtime_with(config);
    let _slow = rt.subscribe_all();

    assert!(rt.submit(report(Available, 0.0, "a")).unwrap().warnings.is_empty());
    let outcome = rt.submit(report(Available, 1.0, "b")).unwrap();
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.aggregate.sample_count, 2);
    assert_eq!(rt.metrics().notifications_rejected, 1);
}

#[test]
fn concurrent_submits_keep_per_key_event_order() {
    let mut config = StockwatchConfig::default();
    config.submission.publish_policy = PublishPolicy::EveryUpdate;
    config.notifier.buffer_capacity = 10_000;
    let rt = Arc::new(runtime_with(config));
    let sub = rt.subscribe_all();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let rt = Arc::clone(&rt);
            thread::spawn(move || {
                for i in 0..50 {
                    let item = format!("m{}", i % 4);
                    let token = format!("t{t}-{i}");
                    rt.submit(report_for(key("p1", &item), Available, 1.0, 0.0, &token))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let events = sub.drain();
    assert_eq!(events.len(), 400);
    for item in ["m0", "m1", "m2", "m3"] {
        let seqs: Vec<u64> = events
            .iter()
            .filter(|e| e.entity_key.item_id == item)
            .map(|e| e.sample_count)
            .collect();
        assert_eq!(seqs, (1..=100).collect::<Vec<_>>());
    }
    assert_eq!(rt.metrics().reports_accepted, 400);
}

#[tokio::test]
async fn subscriber_receives_events_asynchronously() {
    let rt = Arc::new(runtime());
    let sub = rt.notifier().subscribe_location("p1");

    let submitter = Arc::clone(&rt);
    let handle = tokio::task::spawn_blocking(move || {
        submitter
            .submit(report_for(key("p2", "m1"), Available, 1.0, 0.0, "a"))
            .unwrap();
        submitter.submit(report(Unavailable, 0.0, "a")).unwrap();
    });

    let event = sub.recv().await.unwrap();
    assert_eq!(event.entity_key, key("p1", "m1"));
    assert_eq!(event.status, PublicStatus::Unavailable);
    handle.await.unwrap();

    rt.shutdown();
    assert!(sub.recv().await.is_none());
}

// ── Queries ─────────────────────────────────────────────────────────────────

#[test]
fn unknown_keys_resolve_to_unknown_view() {
    let rt = runtime();
    rt.submit(report(Available, 0.0, "a")).unwrap();
    let views = rt
        .query()
        .status_of_many(&[key("p1", "m1"), key("p9", "zz")], Some(at(1.0)));
    assert_eq!(views[0].status, PublicStatus::Available);
    assert_eq!(views[1].status, PublicStatus::Unknown);
    assert_eq!(views[1].confidence, 0.0);
    assert!(!views[1].visible);
    assert_eq!(views[1].entity_key, key("p9", "zz"));
}

#[test]
fn threshold_gates_public_status_without_touching_storage() {
    let rt = runtime();
    rt.submit(report_for(key("p1", "m1"), Unavailable, 0.31, 0.0, "a"))
        .unwrap();
    rt.submit(report_for(key("p1", "m2"), Unavailable, 0.29, 0.0, "a"))
        .unwrap();

    let shown = rt.status_of(&key("p1", "m1"), Some(at(0.0)));
    assert_eq!(shown.status, PublicStatus::Unavailable);
    assert!(shown.visible);

    let hidden = rt.status_of(&key("p1", "m2"), Some(at(0.0)));
    assert_eq!(hidden.status, PublicStatus::Unknown);
    assert!(!hidden.visible);
    assert_eq!(
        rt.ledger().current(&key("p1", "m2")).unwrap().status,
        Unavailable
    );
}

#[test]
fn location_overview_lists_items_in_order() {
    let rt = runtime();
    rt.submit(report_for(key("p1", "m2"), Available, 1.0, 0.0, "a")).unwrap();
    rt.submit(report_for(key("p2", "m1"), Available, 1.0, 0.0, "a")).unwrap();
    rt.submit(report_for(key("p1", "m1"), Unavailable, 1.0, 0.0, "a")).unwrap();

    let overview = rt.query().location_overview("p1", Some(at(0.0)));
    let items: Vec<&str> = overview.iter().map(|v| v.entity_key.item_id.as_str()).collect();
    assert_eq!(items, vec!["m1", "m2"]);
    assert!(rt.query().location_overview("p3", None).is_empty());
}

#[test]
fn recent_reports_and_stats_use_per_report_decay() {
    let rt = runtime();
    rt.submit(report_for(key("p1", "m1"), Available, 0.9, 0.0, "a")).unwrap();
    rt.submit(report_for(key("p1", "m2"), Unavailable, 1.0, 10.0, "b")).unwrap();
    rt.submit(report_for(key("p2", "m1"), Available, 0.5, 100.0, "c")).unwrap();

    // 110h after the epoch is 14:00 on the fifth day; midnight is at 96h.
    let as_of = Some(at(110.0));
    let feed = rt.query().recent_reports(10, as_of);
    let items: Vec<String> = feed.iter().map(|e| e.report.entity_key.to_string()).collect();
    assert_eq!(items, vec!["p2/m1", "p1/m2", "p1/m1"]);
    assert!(close(feed[0].confidence, 0.4375));
    assert!(close(feed[1].confidence, 0.375));
    assert!(close(feed[2].confidence, 0.2125));
    assert_eq!(
        feed.iter().map(|e| e.reliable).collect::<Vec<_>>(),
        vec![true, true, false]
    );
    assert_eq!(rt.query().recent_reports(1, as_of).len(), 1);

    let stats = rt.query().report_stats(as_of);
    assert_eq!(stats.total_reports, 3);
    assert_eq!(stats.reports_today, 1);
    assert_eq!(stats.available_reports, 1);
    assert_eq!(stats.unavailable_reports, 1);
}

#[test]
fn late_report_does_not_push_newer_one_out_of_recent_feed() {
    let rt = runtime();
    rt.submit(report_for(key("p1", "m1"), Available, 1.0, 10.0, "a")).unwrap();
    rt.submit(report_for(key("p1", "m2"), Available, 1.0, 20.0, "b")).unwrap();
    // Arrives last but was submitted first.
    rt.submit(report_for(key("p1", "m3"), Unavailable, 1.0, 5.0, "c")).unwrap();

    let as_of = Some(at(20.0));
    let newest = rt.query().recent_reports(1, as_of);
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].report.submitted_at, at(20.0));

    let times: Vec<_> = rt
        .query()
        .recent_reports(2, as_of)
        .iter()
        .map(|e| e.report.submitted_at)
        .collect();
    assert_eq!(times, vec![at(20.0), at(10.0)]);
}

#[test]
fn queries_are_counted() {
    let rt = runtime();
    rt.status_of(&key("p1", "m1"), None);
    rt.query()
        .status_of_many(&[key("p1", "m1"), key("p1", "m2")], None);
    assert_eq!(rt.metrics().queries_served, 3);
}
