use crate::{
    pages::{DashboardPage, EntriesPage, Layout, LoginPage, RegisterPage, ReportsPage},
    router::{self, Resolution},
    AuthSlice, EntriesSlice, RootState, Store, SummariesSlice,
};
use scrummate_client::{
    ApiClient, ClientConfig, FileTokenStore, HealthService, HttpTransport, TokenStore, Transport,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Composition root. Owns the store and hands the slices to the pages;
/// nothing reaches the store except through the handles built here.
#[derive(Clone)]
pub struct App {
    store: Store,
    client: ApiClient,
    auth: AuthSlice,
    entries: EntriesSlice,
    summaries: SummariesSlice,
}

impl App {
    /// HTTP transport to `config.base_url` with the token persisted at
    /// `config.token_path`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        info!(base_url = %config.base_url, "starting scrummate client");
        Self::with_parts(
            Arc::new(HttpTransport::new(config.base_url.clone())),
            Arc::new(FileTokenStore::new(config.token_path.clone())),
        )
    }

    /// The initial auth state is decided by whether `tokens` holds a token.
    pub fn with_parts(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        let token = tokens.load().unwrap_or_else(|err| {
            warn!("failed to read persisted token, starting signed out: {err}");
            None
        });
        debug!(authenticated = token.is_some(), "initial auth state");

        let store = Store::new(RootState::with_token(token));
        let client = ApiClient::new(transport, tokens.clone());
        let auth = AuthSlice::new(store.clone(), client.auth(), tokens);
        let entries = EntriesSlice::new(store.clone(), client.entries());
        let summaries = SummariesSlice::new(store.clone(), client.summaries());

        Self {
            store,
            client,
            auth,
            entries,
            summaries,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn auth(&self) -> &AuthSlice {
        &self.auth
    }

    #[must_use]
    pub fn entries(&self) -> &EntriesSlice {
        &self.entries
    }

    #[must_use]
    pub fn summaries(&self) -> &SummariesSlice {
        &self.summaries
    }

    #[must_use]
    pub fn health(&self) -> HealthService {
        self.client.health()
    }

    /// Resolve `path` against the current auth state.
    #[must_use]
    pub fn navigate(&self, path: &str) -> Resolution {
        let resolution = self.store.select(|state| router::resolve(path, &state.auth));
        debug!(path, ?resolution, "navigate");
        resolution
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.auth.clone())
    }

    #[must_use]
    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.auth.clone())
    }

    #[must_use]
    pub fn register_page(&self) -> RegisterPage {
        RegisterPage::new(self.auth.clone())
    }

    #[must_use]
    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage
    }

    #[must_use]
    pub fn entries_page(&self) -> EntriesPage {
        EntriesPage::new(self.entries.clone())
    }

    #[must_use]
    pub fn reports_page(&self) -> ReportsPage {
        ReportsPage::new(self.summaries.clone())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
