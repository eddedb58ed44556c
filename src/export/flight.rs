//! Single-flight export gate
//!
//! At most one export runs at a time. A caller takes an [`ExportPermit`] from the
//! [`ExportGate`] before starting and the gate reopens when the permit is dropped,
//! however the export ended.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Busy flag guarding the export pipeline
#[derive(Debug, Default)]
pub struct ExportGate {
    busy: AtomicBool,
}

impl ExportGate {
    pub fn new() -> Self {
        Self { busy: AtomicBool::new(false) }
    }

    /// Whether an export currently holds the gate
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Take the gate, or `None` while another export holds it
    pub fn try_acquire(&self) -> Option<ExportPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                trace!("Export gate acquired");
                ExportPermit { gate: self }
            })
    }
}

/// Proof of holding the [`ExportGate`]; releases it on drop
#[derive(Debug)]
pub struct ExportPermit<'a> {
    gate: &'a ExportGate,
}

impl Drop for ExportPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
        trace!("Export gate released");
    }
}
