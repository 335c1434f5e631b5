//! Application state management.
//!
//! Owns the record list, form draft, search query, and busy flag, and
//! orchestrates the remote catalog operations against a [`CatalogApi`].

use crate::catalog::{CatalogApi, Draft, Perfume};
use chrono::{DateTime, Local};
use std::cmp;

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal list view
    List,
    /// Search input mode
    Search,
    /// Add/edit form mode
    Form,
}

/// Form field currently receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Perfume name input
    Name,
    /// Brand input
    Brand,
    /// Notes input
    Notes,
}

impl FormField {
    /// Next field in Tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Brand,
            FormField::Brand => FormField::Notes,
            FormField::Notes => FormField::Name,
        }
    }

    /// Previous field in Tab order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Notes,
            FormField::Brand => FormField::Name,
            FormField::Notes => FormField::Brand,
        }
    }
}

/// Main application state.
///
/// The render loop reads these fields every frame; all mutation goes
/// through the transition methods and the async catalog operations below.
#[derive(Debug)]
pub struct App {
    /// Records mirrored from the catalog service, in server response order
    pub records: Vec<Perfume>,
    /// In-progress form fields
    pub draft: Draft,
    /// Current search input, independent of `records`
    pub query: String,
    /// True while a catalog operation is in flight
    pub busy: bool,
    /// Currently selected record index
    pub selected_index: usize,
    /// Current UI mode
    pub mode: UiMode,
    /// Record id being edited, None when the form adds a new record
    pub editing: Option<i64>,
    /// Form field receiving input
    pub focus: FormField,
    /// Status message to display
    pub status_message: Option<String>,
    /// Wall-clock time of the last successful list/search
    pub refreshed_at: Option<DateTime<Local>>,
}

impl App {
    /// Create a new application state.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            draft: Draft::default(),
            query: String::new(),
            busy: false,
            selected_index: 0,
            mode: UiMode::List,
            editing: None,
            focus: FormField::Name,
            status_message: None,
            refreshed_at: None,
        }
    }

    /// Replace the record list wholesale.
    ///
    /// # Arguments
    /// * `records` - Records in server response order
    ///
    /// # Details
    /// Clamps the selection to the new list and stamps `refreshed_at`.
    /// No local reordering or filtering happens here.
    pub fn set_records(&mut self, records: Vec<Perfume>) {
        self.records = records;
        self.selected_index = cmp::min(
            self.selected_index,
            self.records.len().saturating_sub(1),
        );
        self.refreshed_at = Some(Local::now());
    }

    /// Get the currently selected record.
    pub fn selected_record(&self) -> Option<&Perfume> {
        self.records.get(self.selected_index)
    }

    /// Move selection up, wrapping to the bottom at the top.
    pub fn move_up(&mut self) {
        if self.records.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.records.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top at the bottom.
    pub fn move_down(&mut self) {
        if self.records.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.records.len();
    }

    /// Add a character to the search query.
    ///
    /// # Details
    /// Only works in Search mode. The query is independent of `records`;
    /// nothing changes until the search is submitted.
    pub fn add_query_char(&mut self, ch: char) {
        if self.mode == UiMode::Search {
            self.query.push(ch);
        }
    }

    /// Remove the last character from the search query.
    pub fn remove_query_char(&mut self) {
        if self.mode == UiMode::Search {
            self.query.pop();
        }
    }

    /// Enter the form in add mode.
    ///
    /// # Details
    /// Keeps whatever draft is pending; a draft survives until a create
    /// succeeds.
    pub fn open_add_form(&mut self) {
        self.editing = None;
        self.focus = FormField::Name;
        self.mode = UiMode::Form;
    }

    /// Enter the form in edit mode, prefilled from the selected record.
    pub fn open_edit_form(&mut self) {
        if let Some(record) = self.selected_record() {
            let id = record.id;
            let draft = Draft::from_record(record);
            self.editing = Some(id);
            self.draft = draft;
            self.focus = FormField::Name;
            self.mode = UiMode::Form;
        }
    }

    /// Leave the form without submitting. The draft is kept.
    pub fn close_form(&mut self) {
        self.mode = UiMode::List;
    }

    /// Add a character to the focused form field.
    pub fn add_draft_char(&mut self, ch: char) {
        if self.mode != UiMode::Form {
            return;
        }
        match self.focus {
            FormField::Name => self.draft.name.push(ch),
            FormField::Brand => self.draft.brand.push(ch),
            FormField::Notes => self.draft.notes.push(ch),
        }
    }

    /// Remove the last character from the focused form field.
    pub fn remove_draft_char(&mut self) {
        if self.mode != UiMode::Form {
            return;
        }
        match self.focus {
            FormField::Name => self.draft.name.pop(),
            FormField::Brand => self.draft.brand.pop(),
            FormField::Notes => self.draft.notes.pop(),
        };
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message.
    #[allow(dead_code)] // Useful for auto-clearing status messages after timeout
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Reload the full collection from the catalog.
    ///
    /// # Arguments
    /// * `api` - Catalog transport
    ///
    /// # Details
    /// On success replaces `records` with the response sequence. On any
    /// failure the error is logged to the status surface and `records`
    /// stays as it was. `busy` is true for the duration either way.
    pub async fn refresh(&mut self, api: &dyn CatalogApi) {
        self.busy = true;
        match api.list().await {
            Ok(records) => {
                let count = records.len();
                self.set_records(records);
                self.set_status(format!("Loaded {} perfumes", count));
            }
            Err(e) => {
                self.set_status(format!("Error loading perfumes: {}", e));
            }
        }
        self.busy = false;
    }

    /// Submit the current draft as a create, or as an update when editing.
    ///
    /// # Arguments
    /// * `api` - Catalog transport
    ///
    /// # Details
    /// An invalid draft (blank name or brand after trimming) issues no
    /// request at all. On success the draft is cleared, the form closed,
    /// and the view refreshed with a follow-up list; `busy` spans the
    /// whole sequence. On failure the draft is kept for another attempt.
    pub async fn submit_draft(&mut self, api: &dyn CatalogApi) {
        let Some(payload) = self.draft.validated() else {
            self.set_status("Name and brand are required".to_string());
            return;
        };

        self.busy = true;
        let result = match self.editing {
            Some(id) => api.update(id, &payload).await,
            None => api.create(&payload).await,
        };

        match result {
            Ok(()) => {
                self.draft.clear();
                self.editing = None;
                self.mode = UiMode::List;
                self.refresh(api).await;
                self.set_status(format!("Saved: {}", payload.name));
            }
            Err(e) => {
                self.set_status(format!("Error saving perfume: {}", e));
            }
        }
        self.busy = false;
    }

    /// Delete the currently selected record.
    pub async fn delete_selected(&mut self, api: &dyn CatalogApi) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let id = record.id;
        self.remove(api, id).await;
    }

    /// Delete a record by id, then reload the collection.
    ///
    /// # Arguments
    /// * `api` - Catalog transport
    /// * `id` - Record identifier
    ///
    /// # Details
    /// The deletion's response status is not checked; whenever a response
    /// came back at all the collection is refetched. Only a transport
    /// failure skips the follow-up list, and is logged.
    pub async fn remove(&mut self, api: &dyn CatalogApi, id: i64) {
        self.busy = true;
        match api.remove(id).await {
            Ok(()) => {
                self.refresh(api).await;
            }
            Err(e) => {
                self.set_status(format!("Error deleting perfume: {}", e));
            }
        }
        self.busy = false;
    }

    /// Run a remote search with the current query.
    ///
    /// # Arguments
    /// * `api` - Catalog transport
    ///
    /// # Details
    /// A blank or whitespace-only query behaves exactly like [`App::refresh`].
    /// Otherwise the trimmed query is sent and `records` replaced with the
    /// response; failure behavior matches `refresh`.
    pub async fn run_search(&mut self, api: &dyn CatalogApi) {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            self.refresh(api).await;
            return;
        }

        self.busy = true;
        match api.search(&query).await {
            Ok(records) => {
                let count = records.len();
                self.set_records(records);
                self.set_status(format!("Found {} perfumes for \"{}\"", count, query));
            }
            Err(e) => {
                self.set_status(format!("Error searching perfumes: {}", e));
            }
        }
        self.busy = false;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, NewPerfume};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// One recorded call against the fake transport.
    #[derive(Debug, Clone, PartialEq)]
    enum ApiCall {
        List,
        Create(NewPerfume),
        Update(i64, NewPerfume),
        Remove(i64),
        Search(String),
    }

    /// In-memory catalog double that records every call in order.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<ApiCall>>,
        records: Vec<Perfume>,
        fail_list: bool,
        fail_create: bool,
        fail_search: bool,
        fail_remove: bool,
    }

    impl FakeApi {
        fn with_records(records: Vec<Perfume>) -> Self {
            Self {
                records,
                ..Self::default()
            }
        }

        fn record(&self, call: ApiCall) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<ApiCall> {
            self.calls.lock().unwrap().clone()
        }

        fn failure() -> CatalogError {
            CatalogError::Status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn list(&self) -> Result<Vec<Perfume>, CatalogError> {
            self.record(ApiCall::List);
            if self.fail_list {
                return Err(Self::failure());
            }
            Ok(self.records.clone())
        }

        async fn create(&self, perfume: &NewPerfume) -> Result<(), CatalogError> {
            self.record(ApiCall::Create(perfume.clone()));
            if self.fail_create {
                return Err(Self::failure());
            }
            Ok(())
        }

        async fn update(&self, id: i64, perfume: &NewPerfume) -> Result<(), CatalogError> {
            self.record(ApiCall::Update(id, perfume.clone()));
            Ok(())
        }

        async fn remove(&self, id: i64) -> Result<(), CatalogError> {
            self.record(ApiCall::Remove(id));
            if self.fail_remove {
                return Err(Self::failure());
            }
            Ok(())
        }

        async fn search(&self, query: &str) -> Result<Vec<Perfume>, CatalogError> {
            self.record(ApiCall::Search(query.to_string()));
            if self.fail_search {
                return Err(Self::failure());
            }
            Ok(self.records.clone())
        }
    }

    fn test_record(id: i64, name: &str, brand: &str) -> Perfume {
        Perfume {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            notes: Some(String::new()),
            price: Some(50.0),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_records_verbatim() {
        let api = FakeApi::with_records(vec![test_record(1, "Aqua", "X")]);
        let mut app = App::new();

        app.refresh(&api).await;

        assert_eq!(app.records, vec![test_record(1, "Aqua", "X")]);
        assert_eq!(api.calls(), vec![ApiCall::List]);
        assert!(!app.busy);
        assert!(app.refreshed_at.is_some());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_records() {
        let mut app = App::new();
        app.set_records(vec![test_record(1, "Aqua", "X")]);

        let api = FakeApi {
            fail_list: true,
            ..FakeApi::default()
        };
        app.refresh(&api).await;

        assert_eq!(app.records, vec![test_record(1, "Aqua", "X")]);
        assert!(!app.busy);
        assert!(
            app.status_message
                .as_deref()
                .unwrap()
                .starts_with("Error loading")
        );
    }

    #[tokio::test]
    async fn test_submit_valid_draft_creates_then_lists() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.draft = Draft {
            name: "  Aqua  ".to_string(),
            brand: " X ".to_string(),
            notes: "fresh ".to_string(),
        };
        app.mode = UiMode::Form;

        app.submit_draft(&api).await;

        let expected = NewPerfume {
            name: "Aqua".to_string(),
            brand: "X".to_string(),
            notes: "fresh".to_string(),
        };
        assert_eq!(api.calls(), vec![ApiCall::Create(expected), ApiCall::List]);
        assert!(app.draft.is_empty());
        assert_eq!(app.mode, UiMode::List);
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_submit_invalid_draft_issues_no_request() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.draft = Draft {
            name: "Aqua".to_string(),
            brand: "   ".to_string(),
            notes: String::new(),
        };

        app.submit_draft(&api).await;

        assert!(api.calls().is_empty());
        assert_eq!(app.draft.name, "Aqua");
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let api = FakeApi {
            fail_create: true,
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.draft = Draft {
            name: "Aqua".to_string(),
            brand: "X".to_string(),
            notes: String::new(),
        };

        app.submit_draft(&api).await;

        assert_eq!(api.calls().len(), 1);
        assert_eq!(app.draft.name, "Aqua");
        assert!(!app.busy);
        assert!(
            app.status_message
                .as_deref()
                .unwrap()
                .starts_with("Error saving")
        );
    }

    #[tokio::test]
    async fn test_submit_while_editing_updates_then_lists() {
        let api = FakeApi::with_records(vec![test_record(3, "Noir", "Z")]);
        let mut app = App::new();
        app.set_records(vec![test_record(3, "Noir", "Z")]);
        app.open_edit_form();
        assert_eq!(app.editing, Some(3));
        assert_eq!(app.draft.name, "Noir");

        app.submit_draft(&api).await;

        let expected = NewPerfume {
            name: "Noir".to_string(),
            brand: "Z".to_string(),
            notes: String::new(),
        };
        assert_eq!(
            api.calls(),
            vec![ApiCall::Update(3, expected), ApiCall::List]
        );
        assert_eq!(app.editing, None);
        assert!(app.draft.is_empty());
    }

    #[tokio::test]
    async fn test_remove_lists_regardless_of_delete_outcome() {
        let api = FakeApi::default();
        let mut app = App::new();

        app.remove(&api, 42).await;

        assert_eq!(api.calls(), vec![ApiCall::Remove(42), ApiCall::List]);
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_remove_transport_failure_skips_list() {
        let api = FakeApi {
            fail_remove: true,
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.set_records(vec![test_record(1, "Aqua", "X")]);

        app.remove(&api, 42).await;

        assert_eq!(api.calls(), vec![ApiCall::Remove(42)]);
        assert_eq!(app.records.len(), 1);
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_delete_selected_uses_selected_id() {
        let api = FakeApi::with_records(vec![test_record(7, "Rose", "Y")]);
        let mut app = App::new();
        app.set_records(vec![test_record(5, "Aqua", "X"), test_record(7, "Rose", "Y")]);
        app.move_down();

        app.delete_selected(&api).await;

        assert_eq!(api.calls(), vec![ApiCall::Remove(7), ApiCall::List]);
    }

    #[tokio::test]
    async fn test_blank_search_behaves_like_list() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.query = "   ".to_string();

        app.run_search(&api).await;

        assert_eq!(api.calls(), vec![ApiCall::List]);
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_search_sends_trimmed_query_and_replaces_records() {
        let api = FakeApi::with_records(vec![test_record(2, "Rose Eau", "Y")]);
        let mut app = App::new();
        app.query = " Rose ".to_string();

        app.run_search(&api).await;

        assert_eq!(api.calls(), vec![ApiCall::Search("Rose".to_string())]);
        assert_eq!(app.records, vec![test_record(2, "Rose Eau", "Y")]);
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_search_failure_keeps_records() {
        let api = FakeApi {
            fail_search: true,
            ..FakeApi::default()
        };
        let mut app = App::new();
        app.set_records(vec![test_record(1, "Aqua", "X")]);
        app.query = "Rose".to_string();

        app.run_search(&api).await;

        assert_eq!(app.records.len(), 1);
        assert!(!app.busy);
    }

    #[test]
    fn test_move_selection_wraps() {
        let mut app = App::new();
        app.set_records(vec![
            test_record(1, "Aqua", "X"),
            test_record(2, "Rose", "Y"),
            test_record(3, "Noir", "Z"),
        ]);
        assert_eq!(app.selected_index, 0);

        app.move_down();
        assert_eq!(app.selected_index, 1);

        app.move_up();
        assert_eq!(app.selected_index, 0);

        app.move_up(); // Should wrap to end
        assert_eq!(app.selected_index, 2);

        app.move_down(); // Should wrap to start
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_set_records_clamps_selection() {
        let mut app = App::new();
        app.set_records(vec![
            test_record(1, "Aqua", "X"),
            test_record(2, "Rose", "Y"),
        ]);
        app.move_down();
        assert_eq!(app.selected_index, 1);

        app.set_records(vec![test_record(1, "Aqua", "X")]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_query_editing_only_in_search_mode() {
        let mut app = App::new();
        app.add_query_char('R');
        assert!(app.query.is_empty());

        app.mode = UiMode::Search;
        app.add_query_char('R');
        app.add_query_char('o');
        assert_eq!(app.query, "Ro");

        app.remove_query_char();
        assert_eq!(app.query, "R");
    }

    #[test]
    fn test_form_input_follows_focus() {
        let mut app = App::new();
        app.open_add_form();
        app.add_draft_char('A');
        app.focus = app.focus.next();
        app.add_draft_char('X');
        app.focus = app.focus.next();
        app.add_draft_char('w');

        assert_eq!(app.draft.name, "A");
        assert_eq!(app.draft.brand, "X");
        assert_eq!(app.draft.notes, "w");

        app.remove_draft_char();
        assert!(app.draft.notes.is_empty());
    }

    #[test]
    fn test_form_focus_cycles() {
        assert_eq!(FormField::Name.next(), FormField::Brand);
        assert_eq!(FormField::Notes.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Notes);
    }

    #[test]
    fn test_open_edit_form_without_selection_is_noop() {
        let mut app = App::new();
        app.open_edit_form();
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.editing, None);
    }
}
