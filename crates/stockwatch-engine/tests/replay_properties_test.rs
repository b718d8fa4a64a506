//! Property tests: restarting from the report log reproduces every
//! aggregate the live engine published, and public confidence stays in range.

use std::sync::Arc;

use proptest::prelude::*;

use stockwatch_core::config::StockwatchConfig;
use stockwatch_core::models::StockStatus;
use stockwatch_core::traits::IReportLog;
use stockwatch_engine::StockwatchRuntime;
use stockwatch_ledger::InMemoryReportLog;
use test_fixtures::{at, key, report_for};

fn status() -> impl Strategy<Value = StockStatus> {
    prop_oneof![Just(StockStatus::Available), Just(StockStatus::Unavailable)]
}

/// (item index, status, base confidence in quarters, hours offset, token index)
fn step() -> impl Strategy<Value = (u8, StockStatus, u8, u16, u8)> {
    (0u8..3, status(), 0u8..=4, 0u16..400, 0u8..6)
}

proptest! {
    #[test]
    fn replay_reproduces_streamed_aggregates(steps in prop::collection::vec(step(), 1..40)) {
        let log: Arc<dyn IReportLog> = Arc::new(InMemoryReportLog::new());
        let live = StockwatchRuntime::open(StockwatchConfig::default(), Some(Arc::clone(&log))).unwrap();

        for (item, status, quarters, hours, token) in &steps {
            let report = report_for(
                key("p1", &format!("m{item}")),
                *status,
                f64::from(*quarters) / 4.0,
                f64::from(*hours),
                &format!("t{token}"),
            );
            // Duplicates are expected; they are refused before the log.
            let _ = live.submit(report);
        }

        let restarted = StockwatchRuntime::open(StockwatchConfig::default(), Some(log)).unwrap();
        for item in 0..3 {
            let k = key("p1", &format!("m{item}"));
            prop_assert_eq!(live.ledger().current(&k), restarted.ledger().current(&k));
        }
    }

    #[test]
    fn projected_confidence_stays_in_unit_interval(
        steps in prop::collection::vec(step(), 1..20),
        query_hours in 0u16..2000,
    ) {
        let rt = StockwatchRuntime::open(StockwatchConfig::default(), None).unwrap();
        for (item, status, quarters, hours, token) in &steps {
            let _ = rt.submit(report_for(
                key("p1", &format!("m{item}")),
                *status,
                f64::from(*quarters) / 4.0,
                f64::from(*hours),
                &format!("t{token}"),
            ));
        }
        for view in rt.query().location_overview("p1", Some(at(f64::from(query_hours)))) {
            prop_assert!((0.0..=1.0).contains(&view.confidence));
            prop_assert_eq!(view.visible, view.confidence >= 0.3);
        }
    }
}
