use dotenvy::dotenv;
use scrummate_client::{ApiClient, ClientConfig, FileTokenStore, HttpTransport, TokenStore};
use std::sync::Arc;

// SCRUMMATE_EMAIL=... SCRUMMATE_PASSWORD=... cargo run --example list-entries
#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = ClientConfig::from_env().unwrap();
    let client = ApiClient::new(
        Arc::new(HttpTransport::new(config.base_url)),
        Arc::new(FileTokenStore::new(config.token_path)),
    );

    if client.tokens().load().unwrap().is_none() {
        let email = std::env::var("SCRUMMATE_EMAIL").expect("SCRUMMATE_EMAIL must be set");
        let password =
            std::env::var("SCRUMMATE_PASSWORD").expect("SCRUMMATE_PASSWORD must be set");
        let auth = client.auth().login(&email, &password).await.unwrap();
        client.tokens().save(&auth.token).unwrap();
    }

    let entries = client.entries().list().await.unwrap();
    println!("{entries:#?}");
}
