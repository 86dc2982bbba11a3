use crate::{
    auth::{self, AuthAction, AuthState},
    entries::{self, EntriesAction, EntriesState},
    opentelemetry::OperationSpan,
    summaries::{self, SummariesAction, SummariesState},
    StoreError, StoreResult,
};
use scrummate_client::ApiResult;
use std::{future::Future, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Client-side cache of server state, one independently owned slice per
/// resource group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: AuthState,
    pub entries: EntriesState,
    pub summaries: SummariesState,
}

impl RootState {
    /// Initial state given the token found in persisted storage at startup.
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            auth: AuthState::from_token(token),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Entries(EntriesAction),
    Summaries(SummariesAction),
}

impl Action {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth(action) => action.name(),
            Self::Entries(action) => action.name(),
            Self::Summaries(action) => action.name(),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<EntriesAction> for Action {
    fn from(action: EntriesAction) -> Self {
        Self::Entries(action)
    }
}

impl From<SummariesAction> for Action {
    fn from(action: SummariesAction) -> Self {
        Self::Summaries(action)
    }
}

/// Route an action to the reducer of the slice that owns it.
pub fn reduce(state: &mut RootState, action: Action) {
    match action {
        Action::Auth(action) => auth::reduce(&mut state.auth, action),
        Action::Entries(action) => entries::reduce(&mut state.entries, action),
        Action::Summaries(action) => summaries::reduce(&mut state.summaries, action),
    }
}

/// The single state container. Cloning yields another handle to the same
/// state.
///
/// Each dispatch applies one reducer under the channel's write lock, so a
/// settlement is never observed half-applied. Nothing orders settlements of
/// concurrent operations: the last one to settle wins.
#[derive(Clone)]
pub struct Store {
    sender: Arc<watch::Sender<RootState>>,
}

impl Store {
    #[must_use]
    pub fn new(initial: RootState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        debug!(action = action.name(), "dispatch");
        self.sender.send_modify(|state| reduce(state, action));
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> RootState {
        self.sender.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn select<R>(&self, selector: impl FnOnce(&RootState) -> R) -> R {
        selector(&self.sender.borrow())
    }

    /// Receiver notified after every dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.sender.subscribe()
    }

    /// Run an asynchronous operation: dispatch `pending`, await the request,
    /// then settle with `fulfilled` or `rejected`.
    pub(crate) async fn run<T, F>(
        &self,
        slice: &'static str,
        operation: &'static str,
        pending: Action,
        request: F,
        fulfilled: impl FnOnce(&T) -> Action,
        rejected: impl FnOnce(String) -> Action,
    ) -> StoreResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let span = OperationSpan::new(slice, operation);
        self.dispatch(pending);

        match span.instrument_future(request).await {
            Ok(value) => {
                span.on_fulfilled();
                self.dispatch(fulfilled(&value));
                Ok(value)
            }
            Err(err) => {
                let err = StoreError::from(err);
                warn!(slice, operation, "operation rejected: {err}");
                span.on_rejected(&err);
                self.dispatch(rejected(err.message()));
                Err(err)
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(RootState::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.sender.borrow())
            .finish()
    }
}
