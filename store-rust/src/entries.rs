use crate::{Action, Store, StoreResult};
use chrono::NaiveDate;
use scrummate_client::{DailyEntry, EntriesService, EntryFields, EntryPatch};

/// Daily entries slice. The sequence mirrors the server's, newest created
/// entries first; it is not guaranteed to stay consistent with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntriesState {
    pub entries: Vec<DailyEntry>,
    pub current_entry: Option<DailyEntry>,
    pub is_loading: bool,
    /// Recorded on rejection. Rendering it is up to the consuming view.
    pub error: Option<String>,
}

impl EntriesState {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DailyEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntriesAction {
    Pending,
    /// Replaces the whole sequence (fetch, search and filter).
    Loaded(Vec<DailyEntry>),
    Fetched(DailyEntry),
    Created(DailyEntry),
    Updated(DailyEntry),
    Deleted(String),
    Rejected(String),
    Select(Option<String>),
    ClearError,
}

impl EntriesAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "entries/pending",
            Self::Loaded(_) => "entries/fetchEntries/fulfilled",
            Self::Fetched(_) => "entries/fetchEntry/fulfilled",
            Self::Created(_) => "entries/createEntry/fulfilled",
            Self::Updated(_) => "entries/updateEntry/fulfilled",
            Self::Deleted(_) => "entries/deleteEntry/fulfilled",
            Self::Rejected(_) => "entries/rejected",
            Self::Select(_) => "entries/select",
            Self::ClearError => "entries/clearError",
        }
    }
}

pub fn reduce(state: &mut EntriesState, action: EntriesAction) {
    match action {
        EntriesAction::Pending => {
            state.is_loading = true;
            state.error = None;
        }
        EntriesAction::Loaded(entries) => {
            state.entries = entries;
            state.is_loading = false;
        }
        EntriesAction::Fetched(entry) => {
            state.current_entry = Some(entry);
            state.is_loading = false;
        }
        EntriesAction::Created(entry) => {
            // The server-assigned id is authoritative; never keep two copies.
            state.entries.retain(|existing| existing.id != entry.id);
            state.entries.insert(0, entry);
            state.is_loading = false;
        }
        EntriesAction::Updated(entry) => {
            // An update for an entry no longer held locally is dropped.
            if let Some(slot) = state.entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry.clone();
            }
            if let Some(current) = state.current_entry.as_mut().filter(|e| e.id == entry.id) {
                *current = entry;
            }
            state.is_loading = false;
        }
        EntriesAction::Deleted(id) => {
            state.entries.retain(|entry| entry.id != id);
            if state.current_entry.as_ref().is_some_and(|e| e.id == id) {
                state.current_entry = None;
            }
            state.is_loading = false;
        }
        EntriesAction::Rejected(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        EntriesAction::Select(id) => {
            state.current_entry = id.and_then(|id| state.find(&id).cloned());
        }
        EntriesAction::ClearError => state.error = None,
    }
}

/// Operations of the entries slice. None of them is optimistic: the slice
/// changes only once the server confirmed. Failures are not retried.
#[derive(Debug, Clone)]
pub struct EntriesSlice {
    store: Store,
    api: EntriesService,
}

impl EntriesSlice {
    pub fn new(store: Store, api: EntriesService) -> Self {
        Self { store, api }
    }

    /// Replace the local sequence with the server's.
    pub async fn fetch_all(&self) -> StoreResult<Vec<DailyEntry>> {
        self.store
            .run(
                "entries",
                "fetchEntries",
                EntriesAction::Pending.into(),
                self.api.list(),
                |entries| Action::Entries(EntriesAction::Loaded(entries.clone())),
                rejected,
            )
            .await
    }

    /// Load a single entry into `current_entry`.
    pub async fn fetch_one(&self, id: &str) -> StoreResult<DailyEntry> {
        self.store
            .run(
                "entries",
                "fetchEntry",
                EntriesAction::Pending.into(),
                self.api.get(id),
                |entry| Action::Entries(EntriesAction::Fetched(entry.clone())),
                rejected,
            )
            .await
    }

    pub async fn create(&self, fields: EntryFields) -> StoreResult<DailyEntry> {
        self.store
            .run(
                "entries",
                "createEntry",
                EntriesAction::Pending.into(),
                self.api.create(&fields),
                |entry| Action::Entries(EntriesAction::Created(entry.clone())),
                rejected,
            )
            .await
    }

    pub async fn update(&self, id: &str, patch: EntryPatch) -> StoreResult<DailyEntry> {
        self.store
            .run(
                "entries",
                "updateEntry",
                EntriesAction::Pending.into(),
                self.api.update(id, &patch),
                |entry| Action::Entries(EntriesAction::Updated(entry.clone())),
                rejected,
            )
            .await
    }

    /// Deleting an id that is already gone locally still settles cleanly.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let deleted = id.to_string();
        self.store
            .run(
                "entries",
                "deleteEntry",
                EntriesAction::Pending.into(),
                self.api.delete(id),
                move |_| Action::Entries(EntriesAction::Deleted(deleted)),
                rejected,
            )
            .await
    }

    /// Replace the local sequence with the entries matching `query`.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<DailyEntry>> {
        self.store
            .run(
                "entries",
                "searchEntries",
                EntriesAction::Pending.into(),
                self.api.search(query),
                |entries| Action::Entries(EntriesAction::Loaded(entries.clone())),
                rejected,
            )
            .await
    }

    /// Replace the local sequence with the entries dated within `start..=end`.
    pub async fn filter(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<Vec<DailyEntry>> {
        self.store
            .run(
                "entries",
                "filterEntries",
                EntriesAction::Pending.into(),
                self.api.filter(start, end),
                |entries| Action::Entries(EntriesAction::Loaded(entries.clone())),
                rejected,
            )
            .await
    }

    pub fn select(&self, id: Option<&str>) {
        self.store.dispatch(EntriesAction::Select(id.map(ToString::to_string)));
    }

    pub fn clear_error(&self) {
        self.store.dispatch(EntriesAction::ClearError);
    }
}

fn rejected(message: String) -> Action {
    Action::Entries(EntriesAction::Rejected(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, plan: &str) -> DailyEntry {
        DailyEntry {
            id: id.to_string(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            yesterday_work: String::new(),
            today_plan: plan.to_string(),
            blockers: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(state: &EntriesState) -> Vec<&str> {
        state.entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn created_entries_are_prepended_once() {
        let mut state = EntriesState::default();
        reduce(&mut state, EntriesAction::Loaded(vec![entry("1", "a")]));
        reduce(&mut state, EntriesAction::Created(entry("2", "b")));
        reduce(&mut state, EntriesAction::Created(entry("2", "b")));

        assert_eq!(ids(&state), vec!["2", "1"]);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut state = EntriesState::default();
        reduce(&mut state, EntriesAction::Loaded(vec![entry("1", "a")]));
        let before = state.entries.clone();

        reduce(&mut state, EntriesAction::Updated(entry("9", "z")));

        assert_eq!(state.entries, before);
    }

    #[test]
    fn update_replaces_in_place_and_refreshes_selection() {
        let mut state = EntriesState::default();
        reduce(
            &mut state,
            EntriesAction::Loaded(vec![entry("1", "a"), entry("2", "b")]),
        );
        reduce(&mut state, EntriesAction::Select(Some("2".to_string())));
        reduce(&mut state, EntriesAction::Updated(entry("2", "B")));

        assert_eq!(ids(&state), vec!["1", "2"]);
        assert_eq!(state.entries[1].today_plan, "B");
        assert_eq!(state.current_entry.as_ref().unwrap().today_plan, "B");
    }

    #[test]
    fn delete_of_absent_id_leaves_sequence() {
        let mut state = EntriesState::default();
        reduce(&mut state, EntriesAction::Loaded(vec![entry("1", "a")]));
        reduce(&mut state, EntriesAction::Deleted("42".to_string()));

        assert_eq!(ids(&state), vec!["1"]);
    }

    #[test]
    fn rejection_keeps_entries_and_records_error() {
        let mut state = EntriesState::default();
        reduce(&mut state, EntriesAction::Loaded(vec![entry("1", "a")]));
        reduce(&mut state, EntriesAction::Pending);
        reduce(&mut state, EntriesAction::Rejected("Forbidden".to_string()));

        assert_eq!(ids(&state), vec!["1"]);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Forbidden"));

        reduce(&mut state, EntriesAction::ClearError);
        assert_eq!(state.error, None);
    }

    #[test]
    fn pending_drops_the_previous_error() {
        let mut state = EntriesState::default();
        reduce(&mut state, EntriesAction::Rejected("Forbidden".to_string()));
        reduce(&mut state, EntriesAction::Pending);

        assert!(state.is_loading);
        assert_eq!(state.error, None);
    }
}
