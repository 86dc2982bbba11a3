use scrummate_client::load_test::{self, LoadTestOptions, Scenario};
use tracing_subscriber::EnvFilter;

// cargo run --example load-test -- [default|smokeTest|stressTest] [time-scale]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let mut args = std::env::args().skip(1);
    let scenario: Scenario = args
        .next()
        .as_deref()
        .unwrap_or("default")
        .parse()
        .unwrap_or_else(|err| panic!("{err}"));
    let time_scale: f64 = args
        .next()
        .map_or(1.0, |value| value.parse().expect("time scale must be a number"));

    let options = LoadTestOptions::from_env(scenario).with_time_scale(time_scale);
    let thresholds = options.thresholds;
    let report = load_test::run(options).await;

    println!("{report:#?}");
    for result in report.evaluate(&thresholds) {
        let mark = if result.passed { "pass" } else { "FAIL" };
        println!("{mark}  {} = {}", result.name, result.observed);
    }

    if !report.passed(&thresholds) {
        std::process::exit(1);
    }
}
