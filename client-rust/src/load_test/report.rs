use std::time::Duration;

/// Pass/fail gates evaluated at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// 95th percentile request duration must stay below this.
    pub p95_duration: Duration,
    /// Share of failed HTTP requests must stay below this.
    pub max_failure_rate: f64,
    /// Share of iterations recording an error must stay below this.
    pub max_error_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            p95_duration: Duration::from_millis(500),
            max_failure_rate: 0.01,
            max_error_rate: 0.01,
        }
    }
}

/// Raw samples collected while a scenario runs.
#[derive(Debug, Default, Clone)]
pub struct Metrics {
    durations: Vec<Duration>,
    failed_requests: usize,
    iterations: usize,
    iteration_errors: usize,
    checks_passed: usize,
    checks_failed: usize,
}

impl Metrics {
    pub fn record_request(&mut self, duration: Duration, ok: bool) {
        self.durations.push(duration);
        if !ok {
            self.failed_requests += 1;
        }
    }

    pub fn record_check(&mut self, passed: bool) {
        if passed {
            self.checks_passed += 1;
        } else {
            self.checks_failed += 1;
        }
    }

    pub fn record_iteration(&mut self, errored: bool) {
        self.iterations += 1;
        if errored {
            self.iteration_errors += 1;
        }
    }

    #[must_use]
    pub fn report(&self) -> LoadReport {
        LoadReport {
            requests: self.durations.len(),
            failed_requests: self.failed_requests,
            p95_duration: percentile(&self.durations, 0.95),
            iterations: self.iterations,
            iteration_errors: self.iteration_errors,
            checks_passed: self.checks_passed,
            checks_failed: self.checks_failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub requests: usize,
    pub failed_requests: usize,
    pub p95_duration: Duration,
    pub iterations: usize,
    pub iteration_errors: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub name: &'static str,
    pub passed: bool,
    pub observed: String,
}

impl LoadReport {
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        rate(self.failed_requests, self.requests)
    }

    #[must_use]
    pub fn error_rate(&self) -> f64 {
        rate(self.iteration_errors, self.iterations)
    }

    #[must_use]
    pub fn evaluate(&self, thresholds: &Thresholds) -> Vec<ThresholdResult> {
        vec![
            ThresholdResult {
                name: "http_req_duration p(95)",
                passed: self.p95_duration < thresholds.p95_duration,
                observed: format!("{}ms", self.p95_duration.as_millis()),
            },
            ThresholdResult {
                name: "http_req_failed rate",
                passed: self.failure_rate() < thresholds.max_failure_rate,
                observed: format!("{:.4}", self.failure_rate()),
            },
            ThresholdResult {
                name: "errors rate",
                passed: self.error_rate() < thresholds.max_error_rate,
                observed: format!("{:.4}", self.error_rate()),
            },
        ]
    }

    #[must_use]
    pub fn passed(&self, thresholds: &Thresholds) -> bool {
        self.evaluate(thresholds).iter().all(|result| result.passed)
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Nearest-rank percentile.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentile(samples: &[Duration], quantile: f64) -> Duration {
    if samples.is_empty() {
        return Duration::ZERO;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let rank = (quantile * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p95_uses_nearest_rank() {
        let mut metrics = Metrics::default();
        for ms in 1..=100 {
            metrics.record_request(Duration::from_millis(ms), true);
        }
        assert_eq!(metrics.report().p95_duration, Duration::from_millis(95));
    }

    #[test]
    fn thresholds_fail_on_error_rate() {
        let mut metrics = Metrics::default();
        for i in 0..50 {
            metrics.record_request(Duration::from_millis(10), true);
            metrics.record_iteration(i == 0);
        }
        let report = metrics.report();
        let results = report.evaluate(&Thresholds::default());

        assert!(results[0].passed);
        assert!(results[1].passed);
        assert!(!results[2].passed, "1 error in 50 iterations is 2%");
        assert!(!report.passed(&Thresholds::default()));
    }

    #[test]
    fn empty_run_passes() {
        let report = Metrics::default().report();
        assert_eq!(report.p95_duration, Duration::ZERO);
        assert!(report.passed(&Thresholds::default()));
    }
}
