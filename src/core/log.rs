//! The call log: an ordered, append-only record of intercepted calls.
//!
//! A log is shared by every spy built from the same [`SpyBase`] unless a spy
//! opts into its own log. It is only ever emptied by an explicit
//! [`CallLog::clear`].
//!
//! [`SpyBase`]: crate::core::spy::SpyBase

use crate::core::record::CallRecord;
use colored::Colorize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct CallLog {
    records: Mutex<Vec<CallRecord>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    // Records are plain data, so a panic in another holder cannot leave the
    // vector half-written; recover instead of propagating the poison.
    fn lock(&self) -> MutexGuard<'_, Vec<CallRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, record: CallRecord) {
        self.lock().push(record);
    }

    /// Snapshot of every record in invocation order. Does not clear.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Human-readable summary of everything that reached a wrapped type.
    ///
    /// Each logged call is listed in order, followed by per-member counts, so
    /// a test author can see which members still need an override.
    pub fn report(&self) -> String {
        let records = self.calls();
        let mut out = String::new();

        if records.is_empty() {
            out.push_str(&format!("{}\n", "No intercepted calls.".green()));
            return out;
        }

        out.push_str(&format!(
            "{}\n",
            format!("{} intercepted call(s):", records.len()).yellow().bold()
        ));
        for (idx, record) in records.iter().enumerate() {
            out.push_str(&format!(
                "  {:>3}. {:<13} {}\n",
                idx + 1,
                record.kind().as_str().cyan(),
                record
            ));
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in &records {
            *counts
                .entry(format!("{}.{}", record.owner(), record.qualified_name()))
                .or_default() += 1;
        }
        out.push_str(&format!("{}\n", "Members reached:".bold()));
        for (name, count) in counts {
            out.push_str(&format!("  {} x{}\n", name, count));
        }
        out
    }
}
