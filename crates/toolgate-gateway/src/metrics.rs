//! Invocation metrics
//!
//! Counts tool executions by outcome and times call latency, exposed in
//! Prometheus text format. None of the repos this gateway talks to agree
//! on a metrics stack, and the recorder's needs are two series, so it is
//! a small local component rather than a full client library.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use parking_lot::Mutex;

/// Histogram bucket upper bounds, in seconds
const BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Invocation outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Backend returned a success response
    Success,
    /// Invocation failed (exhausted endpoints, transport, execution error)
    Error,
}

impl Outcome {
    /// Prometheus label value
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
struct HistogramCell {
    bucket_counts: [u64; BUCKETS.len()],
    sum: f64,
    count: u64,
}

impl HistogramCell {
    fn new() -> Self {
        Self {
            bucket_counts: [0; BUCKETS.len()],
            sum: 0.0,
            count: 0,
        }
    }

    fn observe(&mut self, seconds: f64) {
        for (i, bound) in BUCKETS.iter().enumerate() {
            if seconds <= *bound {
                self.bucket_counts[i] += 1;
            }
        }
        self.sum += seconds;
        self.count += 1;
    }
}

/// Per-tool, per-outcome counters plus a latency histogram.
///
/// Process-local, reset on restart.
pub struct MetricsRecorder {
    /// (tool, status) -> count; BTreeMap keeps exposition order stable
    executions: Mutex<BTreeMap<(String, &'static str), u64>>,
    /// tool -> latency histogram
    latency: Mutex<BTreeMap<String, HistogramCell>>,
}

impl MetricsRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self {
            executions: Mutex::new(BTreeMap::new()),
            latency: Mutex::new(BTreeMap::new()),
        }
    }

    /// Increment the execution counter for a tool/outcome pair
    pub fn record(&self, tool: &str, outcome: Outcome) {
        let mut executions = self.executions.lock();
        *executions
            .entry((tool.to_string(), outcome.as_str()))
            .or_insert(0) += 1;
    }

    /// Record the latency of one network call
    pub fn observe(&self, tool: &str, elapsed: Duration) {
        let mut latency = self.latency.lock();
        latency
            .entry(tool.to_string())
            .or_insert_with(HistogramCell::new)
            .observe(elapsed.as_secs_f64());
    }

    /// Current counter value for a tool/outcome pair
    pub fn execution_count(&self, tool: &str, outcome: Outcome) -> u64 {
        self.executions
            .lock()
            .get(&(tool.to_string(), outcome.as_str()))
            .copied()
            .unwrap_or(0)
    }

    /// Render all series in Prometheus text exposition format
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("# HELP tool_executions_total Total number of tool executions\n");
        out.push_str("# TYPE tool_executions_total counter\n");
        for ((tool, status), count) in self.executions.lock().iter() {
            let _ = writeln!(
                out,
                "tool_executions_total{{tool=\"{}\",status=\"{}\"}} {}",
                tool, status, count
            );
        }

        out.push_str("# HELP tool_execution_seconds Time spent executing tools\n");
        out.push_str("# TYPE tool_execution_seconds histogram\n");
        for (tool, cell) in self.latency.lock().iter() {
            for (i, bound) in BUCKETS.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "tool_execution_seconds_bucket{{tool=\"{}\",le=\"{}\"}} {}",
                    tool, bound, cell.bucket_counts[i]
                );
            }
            let _ = writeln!(
                out,
                "tool_execution_seconds_bucket{{tool=\"{}\",le=\"+Inf\"}} {}",
                tool, cell.count
            );
            let _ = writeln!(out, "tool_execution_seconds_sum{{tool=\"{}\"}} {}", tool, cell.sum);
            let _ = writeln!(out, "tool_execution_seconds_count{{tool=\"{}\"}} {}", tool, cell.count);
        }

        out
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_by_outcome() {
        let metrics = MetricsRecorder::new();
        for _ in 0..3 {
            metrics.record("execute_python", Outcome::Success);
        }
        metrics.record("execute_python", Outcome::Error);

        assert_eq!(metrics.execution_count("execute_python", Outcome::Success), 3);
        assert_eq!(metrics.execution_count("execute_python", Outcome::Error), 1);
        assert_eq!(metrics.execution_count("get_current_time", Outcome::Success), 0);
    }

    #[test]
    fn test_histogram_buckets_are_cumulative() {
        let metrics = MetricsRecorder::new();
        metrics.observe("t", Duration::from_millis(3));
        metrics.observe("t", Duration::from_millis(70));

        let rendered = metrics.render();
        // 3ms lands in every bucket, 70ms only from 0.1 upward
        assert!(rendered.contains("tool_execution_seconds_bucket{tool=\"t\",le=\"0.005\"} 1"));
        assert!(rendered.contains("tool_execution_seconds_bucket{tool=\"t\",le=\"0.1\"} 2"));
        assert!(rendered.contains("tool_execution_seconds_bucket{tool=\"t\",le=\"+Inf\"} 2"));
        assert!(rendered.contains("tool_execution_seconds_count{tool=\"t\"} 2"));
    }

    #[test]
    fn test_render_exposes_counter_series() {
        let metrics = MetricsRecorder::new();
        metrics.record("get_current_time", Outcome::Success);

        let rendered = metrics.render();
        assert!(rendered.contains("# TYPE tool_executions_total counter"));
        assert!(rendered
            .contains("tool_executions_total{tool=\"get_current_time\",status=\"success\"} 1"));
    }

    #[test]
    fn test_render_is_valid_without_any_data() {
        let rendered = MetricsRecorder::new().render();
        assert!(rendered.contains("# TYPE tool_executions_total counter"));
        assert!(rendered.contains("# TYPE tool_execution_seconds histogram"));
    }
}
