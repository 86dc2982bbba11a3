use dotenvy::dotenv;
use scrummate_client::{ClientConfig, EntryFields};
use scrummate_store::{calendar, pages::Navigation, App, Resolution, Route};
use tracing_subscriber::EnvFilter;

// SCRUMMATE_EMAIL=... SCRUMMATE_PASSWORD=... RUST_LOG=scrummate=debug cargo run --example standup
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env().unwrap();
    let app = App::new(&config);

    if app.navigate(Route::Entries.path()) == Resolution::Redirect(Route::Login) {
        let mut login = app.login_page();
        login.email = std::env::var("SCRUMMATE_EMAIL").expect("SCRUMMATE_EMAIL must be set");
        login.password =
            std::env::var("SCRUMMATE_PASSWORD").expect("SCRUMMATE_PASSWORD must be set");

        if login.submit().await == Navigation::Stay {
            let view = login.view(&app.store().state());
            eprintln!("login failed: {}", view.error.unwrap_or_default());
            return;
        }
    }

    let entries = app.entries_page();
    entries.on_mount().await.unwrap();

    let today = calendar::today();
    let has_today = app
        .store()
        .select(|state| state.entries.entries.iter().any(|e| e.entry_date == today));
    if !has_today {
        app.entries()
            .create(EntryFields {
                entry_date: today,
                yesterday_work: "Reviewed pull requests".to_string(),
                today_plan: "Write the weekly summary".to_string(),
                blockers: String::new(),
            })
            .await
            .unwrap();
    }

    for row in entries.view(&app.store().state()).rows {
        println!(
            "{} | {} | {} | {}",
            row.date, row.yesterday_work, row.today_plan, row.blockers
        );
    }

    let summary = app.summaries().generate_current_week(today).await.unwrap();
    println!(
        "\nWeek of {} to {}\n{}",
        summary.week_start, summary.week_end, summary.summary_text
    );
}
