mod app;
mod auth;
pub mod calendar;
mod entries;
mod errors;
mod opentelemetry;
pub mod pages;
pub mod router;
mod store;
mod summaries;

pub use app::App;
pub use auth::{AuthAction, AuthSlice, AuthState, UserProfile};
pub use entries::{EntriesAction, EntriesSlice, EntriesState};
pub use errors::{StoreError, StoreResult};
pub use router::{Resolution, Route};
pub use store::{Action, RootState, Store};
pub use summaries::{SummariesAction, SummariesSlice, SummariesState};
