//! Enrichment Progress
//!
//! Event-based progress for the enrichment loop. The enricher emits, the
//! presentation layer subscribes; nothing here renders.
//!
//! Fractions are non-decreasing within one run and every run ends with a
//! `Finished` event at 1.0.

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Progress event types
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// One candidate processed
    Advanced {
        processed: usize,
        total: usize,
        label: String,
    },
    /// Enrichment done
    Finished { total: usize, label: String },
}

impl ProgressEvent {
    /// Completed fraction in `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        match self {
            Self::Advanced { processed, total, .. } if *total > 0 => {
                (*processed as f32 / *total as f32).min(1.0)
            }
            Self::Advanced { .. } => 0.0,
            Self::Finished { .. } => 1.0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Advanced { label, .. } | Self::Finished { label, .. } => label,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// Broadcasts progress events to any number of subscribers
#[derive(Clone)]
pub struct ProgressTracker {
    sender: broadcast::Sender<ProgressEvent>,
    last_fraction: Arc<Mutex<f32>>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self {
            sender,
            last_fraction: Arc::new(Mutex::new(0.0)),
        }
    }

    /// Send an event; silently discarded when nobody is subscribed
    #[inline]
    fn emit(&self, event: ProgressEvent) {
        let mut last = self
            .last_fraction
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let fraction = event.fraction();
        if fraction < *last {
            return;
        }
        *last = fraction;
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }

    /// Reset for a new enrichment run
    pub fn start(&self) {
        *self
            .last_fraction
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = 0.0;
    }

    pub fn advance(&self, processed: usize, total: usize, name: &str) {
        self.emit(ProgressEvent::Advanced {
            processed,
            total,
            label: format!("Crawling {} ({}/{})...", name, processed, total),
        });
    }

    pub fn finish(&self, total: usize) {
        let label = if total == 0 {
            "No competitors found to crawl."
        } else {
            "Competitor crawling complete."
        };
        self.emit(ProgressEvent::Finished {
            total,
            label: label.to_string(),
        });
    }
}
