//! The filter rule table.
//!
//! An ordered, bounded table of [`FilterRule`] slots with first-fit reuse
//! of freed slots, so removal never shifts surviving entries. The table
//! owns admission: every incoming address is probed against the slots in
//! order and the first match decides, subject to the deny/allow mode flag
//! read from the settings store on each call.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::config::store::{SettingsStore, SharedSettings};

use super::events::{AdmissionEvent, AdmissionLog};
use super::rule::{address_probe, FilterError, FilterRule, FREE, MAX_FILTERS};

/// Settings key holding the space-separated ban-list export.
pub const BAN_LIST_KEY: &str = "ban_list";

/// Settings key for the filter mode flag: true/1 = deny-list (a match
/// rejects), false/0 = allow-list (only a match admits).
pub const DENY_MODE_KEY: &str = "deny_mode";

/// Admission events retained for inspection.
const EVENT_LOG_CAPACITY: usize = 1024;

/// IP admission filter.
///
/// Owns the rule slot table and the admission decision. Mutations go
/// through [`add`](Self::add) and [`remove`](Self::remove) only, each of
/// which re-serializes the ban list into the settings store under
/// [`BAN_LIST_KEY`]. The mode flag is read fresh on every
/// [`admit`](Self::admit) call, never cached.
pub struct IpFilter {
    slots: Vec<FilterRule>,
    settings: SharedSettings,
    admitted: AtomicU64,
    rejected: AtomicU64,
    events: AdmissionLog,
}

/// Snapshot of filter state for the `status` surface.
#[derive(Debug, Clone)]
pub struct FilterStats {
    pub live_rules: usize,
    pub free_slots: usize,
    pub capacity: usize,
    pub admitted: u64,
    pub rejected: u64,
    pub deny_mode: bool,
}

impl IpFilter {
    /// Create an empty filter backed by `settings`.
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            slots: Vec::new(),
            settings,
            admitted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            events: AdmissionLog::new(EVENT_LOG_CAPACITY),
        }
    }

    /// Add a filter rule parsed from `text`.
    ///
    /// Reuses the lowest free slot, appending only when none is free. A
    /// malformed address still consumes the slot as a permanent tombstone
    /// (legacy forgiving behavior) and returns
    /// [`FilterError::InvalidAddress`] so the console can report it; the
    /// table mutation and ban-list persist happen either way. Returns
    /// [`FilterError::TableFull`] (no mutation) when all `MAX_FILTERS`
    /// slots are live.
    pub fn add(&mut self, text: &str) -> Result<(), FilterError> {
        let slot = match self.slots.iter().position(FilterRule::is_free) {
            Some(i) => i,
            None => {
                if self.slots.len() >= MAX_FILTERS {
                    warn!(capacity = MAX_FILTERS, "IP filter list is full");
                    return Err(FilterError::TableFull);
                }
                self.slots.push(FilterRule::free());
                self.slots.len() - 1
            }
        };

        let result = match FilterRule::parse(text) {
            Ok(rule) => {
                debug!(slot, address = text, "filter rule added");
                self.slots[slot] = rule;
                Ok(())
            }
            Err(err) => {
                warn!(slot, address = text, "bad filter address, slot tombstoned");
                self.slots[slot] = FilterRule::free();
                Err(err)
            }
        };

        self.persist();
        result
    }

    /// Remove the first rule whose mask and compare both match `text`
    /// exactly, tombstoning its slot.
    ///
    /// A subnet rule cannot be removed by naming a single host inside it;
    /// the rule must be spelled the same way it was added. Parse failures
    /// and misses both surface as [`FilterError::RuleNotFound`] with no
    /// mutation.
    pub fn remove(&mut self, text: &str) -> Result<(), FilterError> {
        let rule = FilterRule::parse(text)
            .map_err(|_| FilterError::RuleNotFound(text.to_string()))?;

        let Some(slot) = self
            .slots
            .iter()
            .position(|s| s.mask == rule.mask && s.compare == rule.compare)
        else {
            debug!(address = text, "filter rule not found");
            return Err(FilterError::RuleNotFound(text.to_string()));
        };

        self.slots[slot].compare = FREE;
        debug!(slot, address = text, "filter rule removed");
        self.persist();
        Ok(())
    }

    /// Decide whether a connection from `address` is admitted.
    ///
    /// `address` is dotted-quad text, optionally followed by a `:port`
    /// suffix. Slots are scanned in order and the first slot where
    /// `(probe & mask) == compare` wins: under deny-list mode a match
    /// rejects, under allow-list mode a match is required to admit.
    pub fn admit(&self, address: &str) -> bool {
        let probe = address_probe(address);
        let deny_mode = self.settings.get_bool(DENY_MODE_KEY, true);

        let matched_slot = self
            .slots
            .iter()
            .position(|rule| (probe & rule.mask) == rule.compare);

        let admitted = match matched_slot {
            Some(_) => !deny_mode,
            None => deny_mode,
        };

        if admitted {
            self.admitted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }

        debug!(
            address,
            matched_slot,
            deny_mode,
            admitted,
            "admission check"
        );

        self.events.log(AdmissionEvent {
            timestamp: chrono::Utc::now(),
            address: address.to_string(),
            matched_slot,
            admitted,
        });

        admitted
    }

    /// Render all live rules as a space-joined list of dotted-quad compare
    /// values.
    ///
    /// Wildcard octets export as `0` and re-parse to the same mask pattern,
    /// so the round trip is mask-lossy but value-lossless.
    pub fn export(&self) -> String {
        self.slots
            .iter()
            .filter(|rule| !rule.is_free())
            .map(FilterRule::compare_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Seed the table from a persisted ban-list string.
    ///
    /// Splits on whitespace and adds each token; malformed tokens become
    /// tombstones and full-table errors stop nothing but the one add, all
    /// reported through logs only.
    pub fn import(&mut self, ban_list: &str) {
        for token in ban_list.split_whitespace() {
            if let Err(err) = self.add(token) {
                warn!(token, error = %err, "skipping ban list entry");
            }
        }
    }

    /// Current state snapshot.
    pub fn stats(&self) -> FilterStats {
        let free_slots = self.slots.iter().filter(|rule| rule.is_free()).count();
        FilterStats {
            live_rules: self.slots.len() - free_slots,
            free_slots,
            capacity: MAX_FILTERS,
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            deny_mode: self.settings.get_bool(DENY_MODE_KEY, true),
        }
    }

    /// Recent admission events.
    pub fn events(&self) -> &AdmissionLog {
        &self.events
    }

    /// Serialize live rules into the settings store.
    fn persist(&self) {
        if let Err(err) = self.settings.set(BAN_LIST_KEY, &self.export()) {
            // Filter state stays authoritative in memory; the next
            // successful write will catch the store up.
            warn!(store = self.settings.name(), error = %err, "failed to persist ban list");
        }
    }
}
