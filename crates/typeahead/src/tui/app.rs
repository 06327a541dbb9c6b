//! Application state and main loop

use anyhow::Result;
use arboard::Clipboard;
use crossterm::{
    cursor::SetCursorStyle,
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use typeahead_core::{CandidateSource, DisplayEntry, Outcome, Pipeline};

use super::input::{InputChange, TextInput};
use super::presentation::Presentation;
use super::ui;

const PAGE: usize = 10;
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Toast notification state
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::info(message)
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct App<S> {
    pub search_input: TextInput,
    pub pipeline: Pipeline<S>,
    /// Index 0 is the entry nearest the input (the top candidate)
    pub list_state: ListState,
    pub presentation: Presentation,
    pub should_quit: bool,
    pub toast: Option<Toast>,
    clipboard: Option<Clipboard>,
}

impl<S: CandidateSource> App<S> {
    pub fn new(source: S) -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::debug!("Clipboard unavailable: {}", e);
                None
            }
        };
        Self::with_clipboard(source, clipboard)
    }

    /// Builds the app and dispatches the empty query so the browse view loads at once
    pub fn with_clipboard(source: S, clipboard: Option<Clipboard>) -> Self {
        let mut app = Self {
            search_input: TextInput::new(),
            pipeline: Pipeline::new(source),
            list_state: ListState::default(),
            presentation: Presentation::default(),
            should_quit: false,
            toast: None,
            clipboard,
        };
        app.submit_query();
        app
    }

    fn submit_query(&mut self) {
        self.pipeline.submit(&self.search_input.text);
    }

    pub fn selected_index(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn selected_entry(&self) -> Option<&DisplayEntry> {
        self.pipeline
            .display()
            .nearest_first()
            .nth(self.selected_index())
    }

    /// Apply completions that arrived since the last frame
    pub fn poll_results(&mut self) {
        for outcome in self.pipeline.pump() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        if let Outcome::Accepted { len, .. } = outcome {
            // A fresh list always starts at the top candidate
            self.list_state = ListState::default();
            if len > 0 {
                self.list_state.select(Some(0));
            }
        }
    }

    /// Move selection away from the input (toward the alphabetical head of the list)
    fn select_further(&mut self, n: usize) {
        let len = self.pipeline.display().len();
        if len == 0 {
            return;
        }
        let new_index = self.selected_index().saturating_add(n).min(len - 1);
        self.list_state.select(Some(new_index));
    }

    /// Move selection toward the input (index 0 = top candidate)
    fn select_nearer(&mut self, n: usize) {
        if self.pipeline.display().is_empty() {
            return;
        }
        let new_index = self.selected_index().saturating_sub(n);
        self.list_state.select(Some(new_index));
    }

    /// Copy the selected candidate's name to the clipboard
    fn copy_selected(&mut self) {
        let Some(name) = self.selected_entry().map(|e| e.candidate.name.clone()) else {
            return;
        };

        self.toast = Some(match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(&name) {
                Ok(()) => Toast::info(format!("Copied: {}", name)),
                Err(e) => {
                    log::warn!("Clipboard write failed: {}", e);
                    Toast::error("Failed to copy to clipboard")
                }
            },
            None => Toast::error("Clipboard not available"),
        });
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::FocusGained => self.presentation.show_keyboard(),
            Event::FocusLost => self.presentation.hide_keyboard(),
            Event::Key(key) if key.kind == KeyEventKind::Press => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                    self.should_quit = true
                }
                (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                    self.select_further(1)
                }
                (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
                    self.select_nearer(1)
                }
                (KeyCode::PageUp, _) => self.select_further(PAGE),
                (KeyCode::PageDown, _) => self.select_nearer(PAGE),
                (KeyCode::Enter, _) => self.copy_selected(),
                _ => {
                    // Every edit is dispatched; stale responses are dropped on arrival
                    if self.search_input.handle_key(key.code, key.modifiers) == InputChange::Edited
                    {
                        self.submit_query();
                    }
                }
            },
            _ => {}
        }
    }
}

/// Run the interactive search until the user quits
pub fn run<S: CandidateSource>(source: S) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableFocusChange,
        SetCursorStyle::BlinkingBar
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source);

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<S: CandidateSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    // Target ~120Hz refresh rate
    const FRAME_TIME: Duration = Duration::from_micros(8333);

    loop {
        let frame_start = Instant::now();

        // Drain pending input before anything else
        let mut events_processed = 0usize;
        while event::poll(Duration::ZERO)? && events_processed < 100 {
            app.handle_event(event::read()?);
            events_processed += 1;
            if app.should_quit {
                break;
            }
        }

        if app.should_quit {
            break;
        }

        app.update_toast();
        app.poll_results();

        terminal.draw(|f| ui::render(f, app))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
    }

    Ok(())
}
