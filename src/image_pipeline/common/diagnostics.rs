//! Explicit diagnostics sinks handed to every reduction operation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// Which half of the detector an amplifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amplifier {
    Top,
    Bottom,
}

/// Bias estimate for one amplifier half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasLevel {
    pub amplifier: Amplifier,
    pub prescan: f64,
    pub overscan_row: f64,
    pub overscan_col: f64,
    /// Mean of the three band means; this is what gets subtracted.
    pub level: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    Bias(BiasLevel),
    StageTiming { name: String, duration: Duration },
    NonFiniteSamples { stage: String, count: usize },
}

pub trait DiagnosticsSink {
    fn record(&mut self, event: DiagnosticEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&mut self, _event: DiagnosticEvent) {}
}

/// Forwards every event to the `tracing` subscriber at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::Bias(b) => debug!(
                amplifier = ?b.amplifier,
                prescan = b.prescan,
                overscan_row = b.overscan_row,
                overscan_col = b.overscan_col,
                level = b.level,
                "bias level"
            ),
            DiagnosticEvent::StageTiming { name, duration } => debug!(
                stage = %name,
                ms = duration.as_secs_f64() * 1000.0,
                "stage finished"
            ),
            DiagnosticEvent::NonFiniteSamples { stage, count } => debug!(
                stage = %stage,
                count,
                "non-finite samples in output"
            ),
        }
    }
}

/// In-memory accumulator of events with a per-stage timing summary.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<DiagnosticEvent>,
    step_map: HashMap<String, Duration>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    pub fn bias_levels(&self) -> impl Iterator<Item = &BiasLevel> {
        self.events.iter().filter_map(|e| match e {
            DiagnosticEvent::Bias(b) => Some(b),
            _ => None,
        })
    }

    pub fn non_finite_count(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                DiagnosticEvent::NonFiniteSamples { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DiagnosticEvent::StageTiming { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.step_map.values().sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn print_summary(&self) {
        let total = self.total_duration();
        println!("\nReduction Timing Summary:");
        println!("{:-<60}", "");
        for event in &self.events {
            let DiagnosticEvent::StageTiming { name, duration } = event else {
                continue;
            };
            let percentage = if total.as_secs_f64() > 0.0 {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            println!(
                "{:<30} {:>12.3}ms ({:>5.1}%)",
                name,
                duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        println!("{:-<60}", "");
        println!("{:<30} {:>12.3}ms", "Total", total.as_secs_f64() * 1000.0);
    }
}

impl DiagnosticsSink for Diagnostics {
    fn record(&mut self, event: DiagnosticEvent) {
        if let DiagnosticEvent::StageTiming { name, duration } = &event {
            *self.step_map.entry(name.clone()).or_insert(Duration::ZERO) += *duration;
        }
        self.events.push(event);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> DiagnosticEvent {
        DiagnosticEvent::StageTiming {
            name: self.name,
            duration: self.start.elapsed(),
        }
    }
}
