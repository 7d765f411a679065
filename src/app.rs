use crate::card::{self, Card, RenderedList};
use crate::catalog::{self, Criteria, GenreFilter, SortMode};
use crate::fetch::FetchFailure;
use crate::show::ShowRecord;
use crate::ui;
use tracing::{debug, info, warn};

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
    Genres,
}

/// Input mode for the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Catalog plus everything derived from it once, right after loading.
#[derive(Debug, Clone)]
pub struct Session {
    pub catalog: Vec<ShowRecord>,
    pub vocabulary: Vec<String>,
}

impl Session {
    pub fn new(catalog: Vec<ShowRecord>) -> Self {
        let vocabulary = catalog::genre_vocabulary(&catalog);
        Self {
            catalog,
            vocabulary,
        }
    }

    pub fn show(&self, id: u64) -> Option<&ShowRecord> {
        self.catalog.iter().find(|s| s.id == id)
    }
}

/// Lifecycle of the single catalog fetch.
#[derive(Debug, Clone)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Session),
    Failed { message: String },
}

impl LoadState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Loaded(session) => Some(session),
            _ => None,
        }
    }
}

/// Rows taken by header, search bar, borders and status line.
pub const LIST_OVERHEAD: u16 = 9;
/// Lines per card in the list view.
pub const CARD_HEIGHT: u16 = 3;

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,

    pub load_state: LoadState,
    pub criteria: Criteria,
    /// `None` until the catalog has loaded, and again after a failure.
    pub rendered: Option<RenderedList>,

    // List view state
    pub list_selected: usize,
    pub page_size: usize,
    pub input_mode: InputMode,

    // Genre selector state; index 0 is the "all" entry
    pub genre_selected: usize,

    // Detail view state
    pub detail_id: Option<u64>,
    pub detail_scroll: u16,

    /// Terminal size as last reported, in columns and rows.
    pub viewport: (u16, u16),
    pub status_msg: String,
}

impl App {
    pub fn new(criteria: Criteria) -> Self {
        Self {
            should_quit: false,
            view: View::List,
            show_help: false,

            load_state: LoadState::Idle,
            criteria,
            rendered: None,

            list_selected: 0,
            page_size: 5,
            input_mode: InputMode::Normal,

            genre_selected: 0,

            detail_id: None,
            detail_scroll: 0,

            viewport: (80, 24),
            status_msg: String::new(),
        }
    }

    /// `Idle -> Loading`.
    pub fn begin_loading(&mut self) {
        if matches!(self.load_state, LoadState::Idle) {
            self.load_state = LoadState::Loading;
            self.status_msg = "Loading shows...".to_string();
            debug!("state: loading");
        }
    }

    /// `Loading -> Loaded | Failed`.
    pub fn finish_loading(&mut self, result: Result<Vec<ShowRecord>, FetchFailure>) {
        match result {
            Ok(catalog) => {
                let session = Session::new(catalog);
                info!(
                    shows = session.catalog.len(),
                    genres = session.vocabulary.len(),
                    "state: loaded"
                );
                let unknown_genre = match &self.criteria.genre {
                    GenreFilter::Only(g) if !session.vocabulary.contains(g) => Some(g.clone()),
                    _ => None,
                };
                self.load_state = LoadState::Loaded(session);
                if let Some(genre) = unknown_genre {
                    warn!(genre = %genre, "requested genre not in catalog, showing all genres");
                    self.criteria.genre = GenreFilter::All;
                    self.apply_criteria();
                    self.status_msg = format!("Unknown genre \"{genre}\" | {}", self.status_msg);
                } else {
                    self.apply_criteria();
                }
            }
            Err(e) => {
                info!(error = %e, "state: failed");
                self.load_state = LoadState::Failed {
                    message: e.user_message(),
                };
                self.rendered = None;
                self.view = View::List;
                self.status_msg = "Could not load shows".to_string();
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state.session().is_some()
    }

    /// Recompute the displayed set from the full catalog.
    ///
    /// Returns `false` (and does nothing) before the catalog is loaded.
    pub fn apply_criteria(&mut self) -> bool {
        let Some(session) = self.load_state.session() else {
            return false;
        };

        let displayed = catalog::select(&session.catalog, &self.criteria);
        let rendered = card::render(&displayed);
        let total = session.catalog.len();

        self.status_msg = format!(
            "{} of {} shows | {} | {}",
            rendered.len(),
            total,
            self.criteria.genre.label(),
            self.criteria.sort.label()
        );
        debug!(
            shown = rendered.len(),
            search = %self.criteria.search_term,
            genre = self.criteria.genre.label(),
            sort = %self.criteria.sort,
            "criteria applied"
        );
        self.rendered = Some(rendered);
        self.list_selected = 0;
        true
    }

    pub fn shown_count(&self) -> usize {
        self.rendered.as_ref().map_or(0, RenderedList::len)
    }

    pub fn total_count(&self) -> usize {
        self.load_state.session().map_or(0, |s| s.catalog.len())
    }

    // ── Criteria edits ──

    pub fn push_search_char(&mut self, c: char) {
        if self.is_loaded() {
            self.criteria.search_term.push(c);
            self.apply_criteria();
        }
    }

    pub fn pop_search_char(&mut self) {
        if self.is_loaded() && self.criteria.search_term.pop().is_some() {
            self.apply_criteria();
        }
    }

    pub fn clear_search(&mut self) {
        if self.is_loaded() && !self.criteria.search_term.is_empty() {
            self.criteria.search_term.clear();
            self.apply_criteria();
        }
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        if self.is_loaded() {
            self.criteria.sort = sort;
            self.apply_criteria();
        }
    }

    pub fn cycle_sort(&mut self, forward: bool) {
        let sort = if forward {
            self.criteria.sort.next()
        } else {
            self.criteria.sort.prev()
        };
        self.set_sort(sort);
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        if self.is_loaded() {
            self.criteria.genre = genre;
            self.apply_criteria();
        }
    }

    // ── Genre selector ──

    /// Entries of the genre selector: `None` is the leading "all" option.
    pub fn genre_options(&self) -> Vec<Option<&str>> {
        let mut options = vec![None];
        if let Some(session) = self.load_state.session() {
            options.extend(session.vocabulary.iter().map(|g| Some(g.as_str())));
        }
        options
    }

    pub fn open_genre_selector(&mut self) {
        let Some(session) = self.load_state.session() else {
            return;
        };
        self.genre_selected = match &self.criteria.genre {
            GenreFilter::All => 0,
            GenreFilter::Only(g) => session
                .vocabulary
                .iter()
                .position(|v| v == g)
                .map_or(0, |i| i + 1),
        };
        self.view = View::Genres;
    }

    pub fn genre_next(&mut self) {
        if self.genre_selected + 1 < self.genre_options().len() {
            self.genre_selected += 1;
        }
    }

    pub fn genre_prev(&mut self) {
        self.genre_selected = self.genre_selected.saturating_sub(1);
    }

    pub fn confirm_genre(&mut self) {
        let genre = match self.genre_options().get(self.genre_selected) {
            Some(Some(g)) => GenreFilter::Only(g.to_string()),
            _ => GenreFilter::All,
        };
        self.view = View::List;
        self.set_genre(genre);
    }

    // ── List navigation ──

    /// Record the terminal size and derive page size and scroll bounds from it.
    pub fn update_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        let rows = height.saturating_sub(LIST_OVERHEAD) / CARD_HEIGHT;
        self.page_size = (rows as usize).max(1);
        self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
    }

    pub fn list_next(&mut self) {
        if self.list_selected + 1 < self.shown_count() {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_page_down(&mut self) {
        let last = self.shown_count().saturating_sub(1);
        self.list_selected = (self.list_selected + self.page_size).min(last);
    }

    pub fn list_page_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(self.page_size);
    }

    pub fn list_first(&mut self) {
        self.list_selected = 0;
    }

    pub fn list_last(&mut self) {
        self.list_selected = self.shown_count().saturating_sub(1);
    }

    // ── Detail view ──

    /// Open the detail view for the currently selected card.
    pub fn open_detail(&mut self) {
        let id = self
            .rendered
            .as_ref()
            .and_then(|r| r.cards().get(self.list_selected))
            .map(|c| c.id);
        if let Some(id) = id {
            self.detail_id = Some(id);
            self.detail_scroll = 0;
            self.view = View::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_id = None;
        self.view = View::List;
    }

    pub fn detail_show(&self) -> Option<&ShowRecord> {
        let id = self.detail_id?;
        self.load_state.session()?.show(id)
    }

    /// Largest scroll offset that still keeps the last summary line on screen.
    pub fn max_detail_scroll(&self) -> u16 {
        let Some(show) = self.detail_show() else {
            return 0;
        };
        let (width, height) = self.viewport;
        ui::detail::max_scroll(&Card::from_show(show).summary_text, width, height)
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1).min(self.max_detail_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(10).min(self.max_detail_scroll());
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(10);
    }
}
