//! Load test driving the backend's HTTP surface the way the web client does.
//!
//! Three scenarios are available: the ramped `default` run, a `smoke` health
//! check, and a `stress` run firing listing requests back to back. The
//! report is judged against [`Thresholds`].

mod report;

pub use report::{LoadReport, Metrics, ThresholdResult, Thresholds};

use crate::{
    ApiClient, ApiResult, EntryFields, HttpTransport, MemoryTokenStore, Transport,
};
use chrono::{Datelike, Duration as ChronoDuration, Local};
use rand::seq::SliceRandom;
use std::{
    future::Future,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use tokio::{sync::Mutex, task::JoinSet, time::sleep};
use tracing::{debug, info, warn};

pub const DEFAULT_LOAD_TEST_BASE_URL: &str = "http://scrummate-backend.scrummate-dev:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Default,
    Smoke,
    Stress,
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "default" => Ok(Self::Default),
            "smoke" | "smokeTest" => Ok(Self::Smoke),
            "stress" | "stressTest" => Ok(Self::Stress),
            other => Err(format!(
                "unknown scenario '{other}', expected default, smokeTest or stressTest"
            )),
        }
    }
}

/// Ramp the number of virtual users linearly to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

impl Stage {
    #[must_use]
    pub const fn new(duration_secs: u64, target: usize) -> Self {
        Self {
            duration: Duration::from_secs(duration_secs),
            target,
        }
    }
}

#[must_use]
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new(120, 10),
        Stage::new(300, 50),
        Stage::new(120, 100),
        Stage::new(300, 100),
        Stage::new(120, 0),
    ]
}

/// Number of virtual users that should be active `elapsed` into the run.
/// `None` once every stage has completed.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn target_at(stages: &[Stage], elapsed: Duration) -> Option<usize> {
    let mut from = 0usize;
    let mut stage_start = Duration::ZERO;
    for stage in stages {
        let stage_end = stage_start + stage.duration;
        if elapsed < stage_end {
            let progress = (elapsed - stage_start).as_secs_f64() / stage.duration.as_secs_f64();
            let delta = stage.target as f64 - from as f64;
            return Some((from as f64 + delta * progress).round() as usize);
        }
        from = stage.target;
        stage_start = stage_end;
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

fn fixture_users() -> Vec<Credentials> {
    ["user1@test.com", "user2@test.com", "user3@test.com"]
        .into_iter()
        .map(|email| Credentials {
            email: email.to_string(),
            password: "password123".to_string(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct LoadTestOptions {
    pub base_url: String,
    pub scenario: Scenario,
    pub stages: Vec<Stage>,
    pub thresholds: Thresholds,
    /// Multiplier applied to stage durations and think times. `1.0` runs the
    /// full schedule.
    pub time_scale: f64,
    pub users: Vec<Credentials>,
}

impl LoadTestOptions {
    #[must_use]
    pub fn new(base_url: impl Into<String>, scenario: Scenario) -> Self {
        Self {
            base_url: base_url.into(),
            scenario,
            stages: default_stages(),
            thresholds: Thresholds::default(),
            time_scale: 1.0,
            users: fixture_users(),
        }
    }

    /// Reads `BASE_URL`, falling back to the cluster-internal address.
    #[must_use]
    pub fn from_env(scenario: Scenario) -> Self {
        dotenvy::dotenv().ok();
        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_LOAD_TEST_BASE_URL.to_string());
        Self::new(base_url, scenario)
    }

    #[must_use]
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    fn scaled(&self, duration: Duration) -> Duration {
        duration.mul_f64(self.time_scale.max(0.0))
    }
}

struct VirtualUser {
    options: Arc<LoadTestOptions>,
    transport: Arc<dyn Transport>,
    metrics: Arc<Mutex<Metrics>>,
}

/// Run the scenario against a real backend.
pub async fn run(options: LoadTestOptions) -> LoadReport {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(options.base_url.clone()));
    run_with_transport(options, transport).await
}

/// Run the scenario over an arbitrary transport.
pub async fn run_with_transport(
    options: LoadTestOptions,
    transport: Arc<dyn Transport>,
) -> LoadReport {
    info!(scenario = ?options.scenario, base_url = %options.base_url, "starting load test");
    let vu = Arc::new(VirtualUser {
        options: Arc::new(options),
        transport,
        metrics: Arc::new(Mutex::new(Metrics::default())),
    });

    match vu.options.scenario {
        Scenario::Smoke => {
            let errored = vu.smoke_iteration().await;
            vu.metrics.lock().await.record_iteration(errored);
        }
        Scenario::Default | Scenario::Stress => run_stages(&vu).await,
    }

    let report = vu.metrics.lock().await.report();
    info!(
        requests = report.requests,
        failed = report.failed_requests,
        p95_ms = u64::try_from(report.p95_duration.as_millis()).unwrap_or(u64::MAX),
        "load test finished"
    );
    report
}

async fn run_stages(vu: &Arc<VirtualUser>) {
    let max_users = vu
        .options
        .stages
        .iter()
        .map(|stage| stage.target)
        .max()
        .unwrap_or(0);
    let stages: Vec<Stage> = vu
        .options
        .stages
        .iter()
        .map(|stage| Stage {
            duration: vu.options.scaled(stage.duration),
            target: stage.target,
        })
        .collect();

    let active = Arc::new(AtomicUsize::new(0));
    let done = Arc::new(AtomicBool::new(false));
    let poll = vu.options.scaled(Duration::from_millis(100)).max(Duration::from_millis(5));

    let mut workers = JoinSet::new();
    for id in 0..max_users {
        let vu = Arc::clone(vu);
        let active = Arc::clone(&active);
        let done = Arc::clone(&done);
        workers.spawn(async move {
            while !done.load(Ordering::SeqCst) {
                if id >= active.load(Ordering::SeqCst) {
                    sleep(poll).await;
                    continue;
                }
                let errored = match vu.options.scenario {
                    Scenario::Stress => vu.stress_iteration().await,
                    _ => vu.default_iteration().await,
                };
                vu.metrics.lock().await.record_iteration(errored);
            }
        });
    }

    let started = Instant::now();
    while let Some(target) = target_at(&stages, started.elapsed()) {
        if active.swap(target, Ordering::SeqCst) != target {
            debug!(target, "virtual users");
        }
        sleep(poll).await;
    }
    done.store(true, Ordering::SeqCst);

    while let Some(joined) = workers.join_next().await {
        if let Err(err) = joined {
            warn!("virtual user task failed: {err}");
        }
    }
}

impl VirtualUser {
    fn client(&self) -> ApiClient {
        ApiClient::new(Arc::clone(&self.transport), Arc::new(MemoryTokenStore::new()))
    }

    async fn timed<T, F>(&self, future: F) -> (ApiResult<T>, Duration)
    where
        F: Future<Output = ApiResult<T>>,
    {
        let started = Instant::now();
        let result = future.await;
        let elapsed = started.elapsed();
        self.metrics
            .lock()
            .await
            .record_request(elapsed, result.is_ok());
        (result, elapsed)
    }

    async fn check(&self, passed: bool) {
        self.metrics.lock().await.record_check(passed);
    }

    async fn think(&self, secs: u64) {
        sleep(self.options.scaled(Duration::from_secs(secs))).await;
    }

    /// Log in as a random fixture user. The token ends up in the client's
    /// token store.
    async fn authenticate(&self, client: &ApiClient) -> bool {
        let Some(user) = self
            .options
            .users
            .choose(&mut rand::thread_rng())
            .cloned()
        else {
            return false;
        };

        let (result, _) = self
            .timed(client.auth().login(&user.email, &user.password))
            .await;
        self.check(result.is_ok()).await;
        match result {
            Ok(auth) if !auth.token.is_empty() => {
                self.check(true).await;
                client.tokens().save(&auth.token).is_ok()
            }
            Ok(_) => {
                self.check(false).await;
                false
            }
            Err(err) => {
                debug!("login failed: {err}");
                false
            }
        }
    }

    async fn default_iteration(&self) -> bool {
        let client = self.client();
        if !self.authenticate(&client).await {
            return true;
        }

        let (entries, elapsed) = self.timed(client.entries().list()).await;
        self.check(entries.is_ok()).await;
        self.check(elapsed < Duration::from_millis(200)).await;
        self.think(1).await;

        let today = Local::now().date_naive();
        let fields = EntryFields {
            entry_date: today,
            yesterday_work: "Completed user authentication module".to_string(),
            today_plan: "Work on daily entry CRUD operations".to_string(),
            blockers: "None".to_string(),
        };
        let (created, elapsed) = self.timed(client.entries().create(&fields)).await;
        self.check(created.is_ok()).await;
        self.check(elapsed < Duration::from_millis(300)).await;
        self.think(1).await;

        let week_start =
            today - ChronoDuration::days(i64::from(today.weekday().num_days_from_monday()));
        let (summary, elapsed) = self
            .timed(client.summaries().generate_weekly(week_start))
            .await;
        self.check(summary.is_ok()).await;
        self.check(elapsed < Duration::from_millis(1000)).await;
        self.think(2).await;

        let (reports, elapsed) = self.timed(client.summaries().list_monthly()).await;
        self.check(reports.is_ok()).await;
        self.check(elapsed < Duration::from_millis(500)).await;

        let errored = entries.is_err() || created.is_err() || summary.is_err() || reports.is_err();
        self.think(1).await;
        errored
    }

    async fn smoke_iteration(&self) -> bool {
        let client = self.client();
        let (health, elapsed) = self.timed(client.health().health()).await;
        let up = health.as_ref().is_ok_and(crate::HealthStatus::is_up);
        self.check(up).await;
        self.check(elapsed < Duration::from_millis(100)).await;
        !up
    }

    async fn stress_iteration(&self) -> bool {
        let client = self.client();
        if !self.authenticate(&client).await {
            return false;
        }

        let mut errored = false;
        for _ in 0..10 {
            let (result, _) = self.timed(client.entries().list()).await;
            self.check(result.is_ok()).await;
            errored |= result.is_err();
        }
        errored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrummate_client_test::{MockResult, MockTransport};
    use serde_json::json;

    #[test]
    fn target_at_interpolates_between_stages() {
        let stages = vec![Stage::new(10, 10), Stage::new(10, 10), Stage::new(10, 0)];
        assert_eq!(target_at(&stages, Duration::ZERO), Some(0));
        assert_eq!(target_at(&stages, Duration::from_secs(5)), Some(5));
        assert_eq!(target_at(&stages, Duration::from_secs(15)), Some(10));
        assert_eq!(target_at(&stages, Duration::from_secs(25)), Some(5));
        assert_eq!(target_at(&stages, Duration::from_secs(30)), None);
    }

    #[test]
    fn scenario_names_match_the_script_entry_points() {
        assert_eq!("default".parse::<Scenario>(), Ok(Scenario::Default));
        assert_eq!("smokeTest".parse::<Scenario>(), Ok(Scenario::Smoke));
        assert_eq!("stressTest".parse::<Scenario>(), Ok(Scenario::Stress));
        assert!("soak".parse::<Scenario>().is_err());
    }

    #[tokio::test]
    async fn smoke_scenario_checks_health_once() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue(MockResult::json(json!({ "status": "UP", "database": "UP" })));

        let report = run_with_transport(
            LoadTestOptions::new("http://backend.test", Scenario::Smoke),
            transport.clone(),
        )
        .await;

        let requests = transport.tracked_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].full_path(), "/health");
        assert_eq!(report.requests, 1);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.iteration_errors, 0);
    }
}
