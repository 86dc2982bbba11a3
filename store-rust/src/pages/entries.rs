use crate::{calendar, pages::Confirm, EntriesSlice, RootState, StoreResult};
use chrono::NaiveDate;
use scrummate_client::{DailyEntry, EntryFields, EntryPatch};

/// Form state of the add/edit dialog. Empty fields are submitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub entry_date: NaiveDate,
    pub yesterday_work: String,
    pub today_plan: String,
    pub blockers: String,
}

impl EntryDraft {
    #[must_use]
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            entry_date: today,
            yesterday_work: String::new(),
            today_plan: String::new(),
            blockers: String::new(),
        }
    }
}

impl From<&DailyEntry> for EntryDraft {
    fn from(entry: &DailyEntry) -> Self {
        Self {
            entry_date: entry.entry_date,
            yesterday_work: entry.yesterday_work.clone(),
            today_plan: entry.today_plan.clone(),
            blockers: entry.blockers.clone(),
        }
    }
}

impl From<EntryDraft> for EntryFields {
    fn from(draft: EntryDraft) -> Self {
        Self {
            entry_date: draft.entry_date,
            yesterday_work: draft.yesterday_work,
            today_plan: draft.today_plan,
            blockers: draft.blockers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Closed,
    Adding,
    /// Editing the entry with this id.
    Editing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: String,
    pub date: String,
    pub yesterday_work: String,
    pub today_plan: String,
    pub blockers: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesView {
    pub rows: Vec<EntryRow>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub dialog_title: Option<&'static str>,
}

pub struct EntriesPage {
    entries: EntriesSlice,
    draft: EntryDraft,
    mode: DialogMode,
    today: fn() -> NaiveDate,
}

impl EntriesPage {
    pub const DELETE_PROMPT: &'static str = "Are you sure you want to delete this entry?";

    pub fn new(entries: EntriesSlice) -> Self {
        Self::with_clock(entries, calendar::today)
    }

    /// `today` supplies the default date of new drafts.
    pub fn with_clock(entries: EntriesSlice, today: fn() -> NaiveDate) -> Self {
        Self {
            entries,
            draft: EntryDraft::empty(today()),
            mode: DialogMode::Closed,
            today,
        }
    }

    pub async fn on_mount(&self) -> StoreResult<Vec<DailyEntry>> {
        self.entries.fetch_all().await
    }

    #[must_use]
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    #[must_use]
    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn open_add(&mut self) {
        self.draft = EntryDraft::empty((self.today)());
        self.mode = DialogMode::Adding;
    }

    pub fn open_edit(&mut self, entry: &DailyEntry) {
        self.draft = EntryDraft::from(entry);
        self.mode = DialogMode::Editing(entry.id.clone());
    }

    pub fn set_entry_date(&mut self, date: NaiveDate) {
        self.draft.entry_date = date;
    }

    pub fn set_yesterday_work(&mut self, text: impl Into<String>) {
        self.draft.yesterday_work = text.into();
    }

    pub fn set_today_plan(&mut self, text: impl Into<String>) {
        self.draft.today_plan = text.into();
    }

    pub fn set_blockers(&mut self, text: impl Into<String>) {
        self.draft.blockers = text.into();
    }

    /// Create or update depending on how the dialog was opened. The dialog
    /// closes and the draft resets whatever the outcome; a failure is left
    /// in the slice's error field. With no dialog open nothing is sent and
    /// `Ok(None)` is returned.
    pub async fn submit(&mut self) -> StoreResult<Option<DailyEntry>> {
        let mode = std::mem::take(&mut self.mode);
        let draft = std::mem::replace(&mut self.draft, EntryDraft::empty((self.today)()));

        let saved = match mode {
            DialogMode::Closed => return Ok(None),
            DialogMode::Adding => self.entries.create(EntryFields::from(draft)).await?,
            DialogMode::Editing(id) => {
                let patch = EntryPatch::from(EntryFields::from(draft));
                self.entries.update(&id, patch).await?
            }
        };
        Ok(Some(saved))
    }

    pub fn cancel(&mut self) {
        self.mode = DialogMode::Closed;
        self.draft = EntryDraft::empty((self.today)());
    }

    /// Returns `Ok(false)` when the user declined and nothing was sent.
    pub async fn delete(&self, id: &str, confirm: &dyn Confirm) -> StoreResult<bool> {
        if !confirm.confirm(Self::DELETE_PROMPT) {
            return Ok(false);
        }
        self.entries.delete(id).await?;
        Ok(true)
    }

    #[must_use]
    pub fn view(&self, state: &RootState) -> EntriesView {
        let rows = state
            .entries
            .entries
            .iter()
            .map(|entry| EntryRow {
                id: entry.id.clone(),
                date: entry.entry_date.format("%Y-%m-%d").to_string(),
                yesterday_work: entry.yesterday_work.clone(),
                today_plan: entry.today_plan.clone(),
                blockers: if entry.blockers.is_empty() {
                    "None".to_string()
                } else {
                    entry.blockers.clone()
                },
            })
            .collect();

        EntriesView {
            rows,
            is_loading: state.entries.is_loading,
            error: state.entries.error.clone(),
            dialog_title: match self.mode {
                DialogMode::Closed => None,
                DialogMode::Adding => Some("Add Entry"),
                DialogMode::Editing(_) => Some("Edit Entry"),
            },
        }
    }
}

impl std::fmt::Debug for EntriesPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntriesPage")
            .field("draft", &self.draft)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
