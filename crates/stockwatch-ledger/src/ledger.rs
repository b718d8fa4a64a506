//! Concurrent per-key aggregate store backed by DashMap.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, instrument};

use stockwatch_core::config::StockwatchConfig;
use stockwatch_core::errors::{StockwatchResult, StorageError};
use stockwatch_core::models::{Aggregate, EntityKey, Report};
use stockwatch_decay::DecayEngine;
use stockwatch_resolver::ConflictResolver;

use crate::fold::{self, Folded};
use crate::slot::{EntitySlot, SlotLog};

/// Thread-safe ledger of aggregates and report history.
///
/// Mutation of one key is serialized by that key's writer lock. Readers
/// (`peek`, `current`) never take the writer lock; they clone whichever
/// aggregate was last published.
pub struct EntityLedger {
    slots: DashMap<EntityKey, Arc<EntitySlot>>,
    feed: Mutex<VecDeque<Report>>,
    feed_capacity: usize,
    decay: DecayEngine,
    resolver: ConflictResolver,
}

impl EntityLedger {
    pub fn new(decay: DecayEngine, resolver: ConflictResolver, feed_capacity: usize) -> Self {
        Self {
            slots: DashMap::new(),
            feed: Mutex::new(VecDeque::with_capacity(feed_capacity)),
            feed_capacity,
            decay,
            resolver,
        }
    }

    pub fn from_config(config: &StockwatchConfig) -> Self {
        Self::new(
            DecayEngine::new(&config.decay),
            ConflictResolver::new(&config.resolver),
            config.query.recent_feed_capacity,
        )
    }

    pub fn decay(&self) -> &DecayEngine {
        &self.decay
    }

    pub fn resolver(&self) -> &ConflictResolver {
        &self.resolver
    }

    /// Run `f` with exclusive write access to `key`, creating its slot lazily.
    ///
    /// Nothing `f` prepares is visible to readers until it calls
    /// [`EntityWriter::commit`]. A slot created for a write that fails
    /// before any commit is removed again.
    pub fn with_entity<F, T>(&self, key: &EntityKey, f: F) -> StockwatchResult<T>
    where
        F: FnOnce(&mut EntityWriter<'_>) -> StockwatchResult<T>,
    {
        let slot = Arc::clone(
            self.slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(EntitySlot::new(key.clone())))
                .value(),
        );
        let result = {
            let mut log = slot.writer.lock().map_err(|e| StorageError::Unavailable {
                reason: format!("ledger slot lock poisoned for {key}: {e}"),
            })?;
            let mut writer = EntityWriter {
                ledger: self,
                slot: slot.as_ref(),
                log: &mut *log,
            };
            f(&mut writer)
        };
        if result.is_err() {
            self.discard_if_vacant(key, &slot);
        }
        result
    }

    /// Drop `slot` if it never received a commit and no other caller holds
    /// a handle to it. The map and `slot` itself account for two.
    fn discard_if_vacant(&self, key: &EntityKey, slot: &Arc<EntitySlot>) {
        let removed = self.slots.remove_if(key, |_, stored| {
            Arc::ptr_eq(stored, slot)
                && Arc::strong_count(stored) == 2
                && stored.current().is_none()
        });
        if removed.is_some() {
            debug!(entity_key = %key, "discarded empty slot after failed write");
        }
    }

    /// Fold `report` into its key's aggregate and append it to history.
    #[instrument(skip(self, report), fields(entity_key = %report.entity_key))]
    pub fn record(&self, report: Report) -> StockwatchResult<Aggregate> {
        let key = report.entity_key.clone();
        self.with_entity(&key, move |writer| {
            let folded = writer.prepare(&report);
            writer.commit(report, &folded);
            Ok(folded.aggregate)
        })
    }

    /// The stored aggregate, exactly as last written.
    pub fn current(&self, key: &EntityKey) -> Option<Aggregate> {
        let slot = self.slots.get(key).map(|s| Arc::clone(s.value()))?;
        slot.current()
    }

    /// The aggregate projected to `as_of`. Never mutates stored state.
    pub fn peek(&self, key: &EntityKey, as_of: DateTime<Utc>) -> Option<Aggregate> {
        self.current(key)
            .map(|agg| self.decay.project_aggregate(&agg, as_of))
    }

    /// Full report history for `key`, in submission order.
    pub fn history(&self, key: &EntityKey) -> StockwatchResult<Vec<Report>> {
        let Some(slot) = self.slots.get(key).map(|s| Arc::clone(s.value())) else {
            return Ok(Vec::new());
        };
        let log = slot.writer.lock().map_err(|e| StorageError::Unavailable {
            reason: format!("ledger slot lock poisoned for {key}: {e}"),
        })?;
        Ok(log.history.clone())
    }

    /// Every key that has an aggregate.
    pub fn keys(&self) -> Vec<EntityKey> {
        self.slots
            .iter()
            .filter(|entry| entry.value().current().is_some())
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Keys with an aggregate at `location_id`, sorted by item id.
    pub fn keys_at_location(&self, location_id: &str) -> Vec<EntityKey> {
        let mut keys: Vec<EntityKey> = self
            .slots
            .iter()
            .filter(|entry| entry.key().location_id == location_id)
            .filter(|entry| entry.value().current().is_some())
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Number of keys with an aggregate.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots held, including one mid-way through its first write.
    pub fn tracked_slots(&self) -> usize {
        self.slots.len()
    }

    /// Up to `limit` most recently accepted reports, newest arrival first.
    /// Arrival order, not `submitted_at` order.
    pub fn recent_reports(&self, limit: usize) -> Vec<Report> {
        let feed = self.feed.lock().unwrap_or_else(PoisonError::into_inner);
        feed.iter().rev().take(limit).cloned().collect()
    }

    /// Rebuild state by folding `reports` in order. Returns the count folded.
    #[instrument(skip(self, reports))]
    pub fn replay<I>(&self, reports: I) -> StockwatchResult<usize>
    where
        I: IntoIterator<Item = Report>,
    {
        let mut count = 0;
        for report in reports {
            let key = report.entity_key.clone();
            self.with_entity(&key, move |writer| {
                let folded = writer.prepare(&report);
                writer.commit(report, &folded);
                Ok(())
            })?;
            count += 1;
        }
        debug!(count, "ledger replay complete");
        Ok(count)
    }

    fn push_feed(&self, report: &Report) {
        if self.feed_capacity == 0 {
            return;
        }
        let mut feed = self.feed.lock().unwrap_or_else(PoisonError::into_inner);
        while feed.len() >= self.feed_capacity {
            feed.pop_front();
        }
        feed.push_back(report.clone());
    }
}

/// Exclusive write handle for one key, valid inside [`EntityLedger::with_entity`].
pub struct EntityWriter<'a> {
    ledger: &'a EntityLedger,
    slot: &'a EntitySlot,
    log: &'a mut SlotLog,
}

impl EntityWriter<'_> {
    pub fn key(&self) -> &EntityKey {
        &self.slot.key
    }

    /// Stored aggregate, not projected.
    pub fn current(&self) -> Option<Aggregate> {
        self.slot.current()
    }

    /// When `token` last had a report accepted for this key.
    pub fn last_report_by(&self, token: &str) -> Option<DateTime<Utc>> {
        self.log.last_by_submitter.get(token).copied()
    }

    /// Compute the fold of `report` without publishing it.
    pub fn prepare(&self, report: &Report) -> Folded {
        fold::fold(
            self.current().as_ref(),
            report,
            &self.ledger.decay,
            &self.ledger.resolver,
        )
    }

    /// Append `report` to history and publish `folded.aggregate` in one swap.
    pub fn commit(&mut self, report: Report, folded: &Folded) {
        debug!(
            entity_key = %self.slot.key,
            status = %folded.aggregate.status,
            confidence = folded.aggregate.confidence,
            sample_count = folded.aggregate.sample_count,
            "committing aggregate"
        );
        if !report.submitter_token.is_empty() {
            let seen = self
                .log
                .last_by_submitter
                .entry(report.submitter_token.clone())
                .or_insert(report.submitted_at);
            *seen = (*seen).max(report.submitted_at);
        }
        self.ledger.push_feed(&report);
        self.log.history.push(report);
        self.slot.publish(folded.aggregate.clone());
    }
}
