//! Interactive viewer: multiplexes keyboard input and background loads.

use crate::error::SourceError;
use crate::render::{
    help_bar_line, prompt_line, root_line, rows_to_lines, status_bar_line, RenderConfig,
};
use crate::session::Session;
use crate::source::DatasetSource;
use crate::terminal::Tui;
use crate::tree::{Dataset, DisplayRow, RowMarker, Tree};
use crossbeam_channel::{select, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// What the keyboard is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    AddPattern,
    RemovePattern,
}

/// What the loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Reload,
    Quit,
}

/// Mutable state of the viewer, independent of the terminal.
pub struct AppState {
    session: Session,
    source_label: String,
    render_config: RenderConfig,
    mode: Mode,
    query: String,
    input: String,
    /// Search view of the session tree; `None` when no query is active.
    view: Option<Tree>,
    rows: Vec<DisplayRow>,
    selected: usize,
    scroll: usize,
    page: usize,
    /// Loads started but not yet applied.
    pending_loads: usize,
    message: Option<String>,
}

impl AppState {
    pub fn new(session: Session, source_label: String, render_config: RenderConfig) -> Self {
        let mut state = Self {
            session,
            source_label,
            render_config,
            mode: Mode::Browse,
            query: String::new(),
            input: String::new(),
            view: None,
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
            page: 20,
            pending_loads: 0,
            message: None,
        };
        state.refresh();
        state
    }

    /// Start with `query` already applied as the search.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self.refresh();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    /// Rows currently drawn, in order.
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn selected_row(&self) -> Option<&DisplayRow> {
        self.rows.get(self.selected)
    }

    pub fn begin_load(&mut self) {
        self.pending_loads += 1;
        self.message = Some("Loading...".to_string());
    }

    /// Apply a finished load. Results apply in arrival order, so the last
    /// one wins. A failure only sets the message; the previous tree, stats
    /// and patterns stay as they were.
    pub fn apply_load(&mut self, result: Result<Dataset, SourceError>) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match result {
            Ok(dataset) => {
                self.session.load(dataset);
                self.message = self.is_loading().then(|| "Loading...".to_string());
                self.refresh();
            }
            Err(e) => {
                tracing::error!("load failed: {}", e);
                self.message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-derive the search view and the visible rows, keeping the selection
    /// on the same path when it is still shown.
    fn refresh(&mut self) {
        let selected_path = self.selected_row().map(|r| r.path.clone());
        self.view = if self.query.is_empty() {
            None
        } else {
            Some(self.session.search(&self.query))
        };
        let tree = self.view.as_ref().unwrap_or_else(|| self.session.tree());
        let mut rows = self.session.display_rows(tree);
        rows.retain(|r| r.visible);
        self.rows = rows;

        if let Some(path) = selected_path {
            if let Some(i) = self.rows.iter().position(|r| r.path == path) {
                self.selected = i;
            }
        }
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            _ => {
                self.handle_input_key(key);
                Flow::Continue
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Flow {
        let last = self.rows.len().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('r') => return Flow::Reload,
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::PageDown => self.selected = (self.selected + self.page).min(last),
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(self.page),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('e') => {
                self.session.set_all_expanded(true);
                self.refresh();
            }
            KeyCode::Char('c') => {
                self.session.set_all_expanded(false);
                self.refresh();
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.input = self.query.clone();
            }
            KeyCode::Char('i') => {
                self.mode = Mode::AddPattern;
                self.input.clear();
            }
            KeyCode::Char('d') => {
                self.mode = Mode::RemovePattern;
                self.input.clear();
            }
            KeyCode::Esc => {
                self.query.clear();
                self.message = None;
                self.refresh();
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                self.sync_search();
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.sync_search();
            }
            KeyCode::Enter => {
                self.commit_input();
                self.mode = Mode::Browse;
            }
            KeyCode::Esc => {
                if self.mode == Mode::Search {
                    self.query.clear();
                    self.refresh();
                }
                self.input.clear();
                self.mode = Mode::Browse;
            }
            _ => {}
        }
    }

    /// Search updates live as the query is typed.
    fn sync_search(&mut self) {
        if self.mode == Mode::Search {
            self.query = self.input.clone();
            self.refresh();
        }
    }

    fn commit_input(&mut self) {
        let input = std::mem::take(&mut self.input);
        match self.mode {
            Mode::AddPattern => {
                let added = self.session.add_patterns(&input);
                self.message = Some(format!("Added {added} pattern(s)"));
                self.refresh();
            }
            Mode::RemovePattern => {
                let pattern = input.trim();
                self.message = Some(if self.session.remove_pattern(pattern) {
                    format!("Removed pattern '{pattern}'")
                } else {
                    format!("No pattern '{pattern}'")
                });
                self.refresh();
            }
            Mode::Search | Mode::Browse => {}
        }
    }

    fn toggle_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if !matches!(row.marker, RowMarker::Folder { .. }) {
            return;
        }
        let path = row.path.clone();
        self.session.toggle_folder(&path);
        self.refresh();
    }

    /// Draw one frame.
    fn draw(&mut self, frame: &mut Frame) {
        let [body, status, help] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        // One line of the body is the root heading.
        let height = (body.height as usize).saturating_sub(1).max(1);
        self.page = height;
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }

        let end = (self.scroll + height).min(self.rows.len());
        let window = &self.rows[self.scroll.min(end)..end];
        let selected = self.selected.checked_sub(self.scroll);
        let mut lines = vec![root_line(self.session.root_name(), &self.render_config)];
        lines.extend(rows_to_lines(window, &self.render_config, selected));
        frame.render_widget(Paragraph::new(lines), body);

        frame.render_widget(
            Paragraph::new(status_bar_line(
                &self.source_label,
                self.session.stats(),
                &self.query,
                self.message.as_deref(),
            )),
            status,
        );

        let bottom = match self.mode {
            Mode::Browse => help_bar_line(),
            Mode::Search => prompt_line("Search", &self.input),
            Mode::AddPattern => prompt_line("Add patterns (comma-separated)", &self.input),
            Mode::RemovePattern => prompt_line("Remove pattern", &self.input),
        };
        frame.render_widget(Paragraph::new(bottom), help);
    }
}

/// Load on a worker thread and send the result back to the loop.
fn spawn_load(source: Arc<dyn DatasetSource>, tx: Sender<Result<Dataset, SourceError>>) {
    thread::spawn(move || {
        let _ = tx.send(source.load());
    });
}

/// Run the viewer. Blocks until the user quits.
///
/// When the session has no dataset yet, the first load starts immediately
/// in the background. `query` seeds the search.
pub fn run(
    term: &mut Tui,
    source: Arc<dyn DatasetSource>,
    session: Session,
    render_config: RenderConfig,
    query: Option<&str>,
) -> anyhow::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));

    // Spawn keyboard input reader
    let (key_tx, key_rx) = crossbeam_channel::unbounded();
    let shutdown_clone = shutdown.clone();
    let input_handle = thread::spawn(move || {
        while !shutdown_clone.load(Ordering::Relaxed) {
            // Poll with a timeout so we can check the shutdown flag
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if key_tx.send(evt).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let (load_tx, load_rx) = crossbeam_channel::unbounded();
    let mut state = AppState::new(session, source.describe(), render_config)
        .with_query(query.unwrap_or_default());
    if !state.session().is_loaded() {
        state.begin_load();
        spawn_load(source.clone(), load_tx.clone());
    }

    let result = loop {
        if let Err(e) = term.draw(|frame| state.draw(frame)) {
            break Err(e.into());
        }
        select! {
            recv(key_rx) -> msg => {
                match msg {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        match state.handle_key(key) {
                            Flow::Quit => break Ok(()),
                            Flow::Reload => {
                                state.begin_load();
                                spawn_load(source.clone(), load_tx.clone());
                            }
                            Flow::Continue => {}
                        }
                    }
                    Ok(_) => {}
                    // Input thread ended
                    Err(_) => break Ok(()),
                }
            }
            recv(load_rx) -> msg => {
                if let Ok(result) = msg {
                    state.apply_load(result);
                }
            }
        }
    };

    // Signal shutdown to input thread and wait
    shutdown.store(true, Ordering::Relaxed);
    let _ = input_handle.join();

    result
}
