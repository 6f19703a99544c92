//! Validation and storage metrics.
//!
//! Counters for the health of the contact flows: how many documents were
//! checked, how many were rejected and why, and how often storage failed.

use crate::validation::{Rejection, RejectionKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics tracker; clones share the same counters.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    documents_validated_total: Arc<AtomicU64>,
    documents_accepted_total: Arc<AtomicU64>,
    malformed_rejections_total: Arc<AtomicU64>,
    structural_rejections_total: Arc<AtomicU64>,
    field_rejections_total: Arc<AtomicU64>,
    contacts_stored_total: Arc<AtomicU64>,
    storage_errors_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            documents_validated_total: Arc::new(AtomicU64::new(0)),
            documents_accepted_total: Arc::new(AtomicU64::new(0)),
            malformed_rejections_total: Arc::new(AtomicU64::new(0)),
            structural_rejections_total: Arc::new(AtomicU64::new(0)),
            field_rejections_total: Arc::new(AtomicU64::new(0)),
            contacts_stored_total: Arc::new(AtomicU64::new(0)),
            storage_errors_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a document that passed validation.
    pub fn track_accepted(&self, contact_count: usize) {
        self.documents_validated_total
            .fetch_add(1, Ordering::Relaxed);
        self.documents_accepted_total.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(contact_count = contact_count, "Document accepted");
    }

    /// Track a rejected document.
    pub fn track_rejection(&self, rejection: &Rejection) {
        self.documents_validated_total
            .fetch_add(1, Ordering::Relaxed);

        let counter = match rejection.kind() {
            RejectionKind::MalformedInput => &self.malformed_rejections_total,
            RejectionKind::StructuralError => &self.structural_rejections_total,
            RejectionKind::FieldError => &self.field_rejections_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(kind = rejection.kind().as_str(), "Document rejected");
    }

    /// Track contacts written to the store.
    pub fn track_stored(&self, contact_count: usize) {
        self.contacts_stored_total
            .fetch_add(contact_count as u64, Ordering::Relaxed);
    }

    /// Track a failed storage operation.
    pub fn track_storage_error(&self, operation: &str) {
        self.storage_errors_total.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(operation = %operation, "Storage operation failed");
    }

    pub fn documents_validated_total(&self) -> u64 {
        self.documents_validated_total.load(Ordering::Relaxed)
    }

    pub fn documents_accepted_total(&self) -> u64 {
        self.documents_accepted_total.load(Ordering::Relaxed)
    }

    /// Rejections of the given kind.
    pub fn rejections_total(&self, kind: RejectionKind) -> u64 {
        match kind {
            RejectionKind::MalformedInput => &self.malformed_rejections_total,
            RejectionKind::StructuralError => &self.structural_rejections_total,
            RejectionKind::FieldError => &self.field_rejections_total,
        }
        .load(Ordering::Relaxed)
    }

    pub fn contacts_stored_total(&self) -> u64 {
        self.contacts_stored_total.load(Ordering::Relaxed)
    }

    pub fn storage_errors_total(&self) -> u64 {
        self.storage_errors_total.load(Ordering::Relaxed)
    }

    /// Get the rejection rate (0.0 to 1.0).
    pub fn rejection_rate(&self) -> f64 {
        let total = self.documents_validated_total() as f64;
        let rejected = total - self.documents_accepted_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            rejected / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Documents Validated: {}\n\
             Documents Accepted: {} ({:.2}% rejected)\n\
             Malformed: {}\n\
             Structural: {}\n\
             Field: {}\n\
             Contacts Stored: {}\n\
             Storage Errors: {}",
            self.documents_validated_total(),
            self.documents_accepted_total(),
            self.rejection_rate() * 100.0,
            self.rejections_total(RejectionKind::MalformedInput),
            self.rejections_total(RejectionKind::StructuralError),
            self.rejections_total(RejectionKind::FieldError),
            self.contacts_stored_total(),
            self.storage_errors_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }

    /// Finish the timer with a specific status.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}
