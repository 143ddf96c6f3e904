use crate::catalog::Catalog;
use crate::config::Options;
use crate::input::{map_event_to_action, Action};
use crate::panel::{HitMap, Panel, PanelState};
use crate::render;
use crate::search::{suggestions, Suggestions, EMPTY_LOCATION};
use crate::terminal::{MouseCapture, TerminalSession};
use crate::weather::{RandomWeather, SnapshotSource, TempUnit, WeatherSnapshot};
use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::event;
use std::time::Duration;

/// All mutable UI state. Every change goes through one of the transition
/// methods below; rendering only reads.
pub struct Dashboard {
    catalog: Catalog,
    source: Box<dyn SnapshotSource>,
    query: String,
    panel: Panel,
    input_focused: bool,
    highlight: Option<usize>,
    snapshot: WeatherSnapshot,
    temp_unit: TempUnit,
    hits: HitMap,
    should_quit: bool,
}

impl Dashboard {
    pub fn new(
        catalog: Catalog,
        mut source: Box<dyn SnapshotSource>,
        location: &str,
        now: NaiveDateTime,
    ) -> Self {
        let snapshot = source.generate(location, now);
        Self {
            catalog,
            source,
            query: String::new(),
            panel: Panel::new(),
            input_focused: false,
            highlight: None,
            snapshot,
            temp_unit: TempUnit::C,
            hits: HitMap::default(),
            should_quit: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    pub fn temp_unit(&self) -> TempUnit {
        self.temp_unit
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current panel rows. Computed even while the panel is closed.
    pub fn suggestions(&self) -> Suggestions {
        suggestions(self.catalog.names(), &self.query)
    }

    pub fn focus_input(&mut self) {
        self.input_focused = true;
        self.panel.on_focus_input();
    }

    pub fn blur_input(&mut self) {
        self.input_focused = false;
    }

    /// Replaces the query; the panel opens in the same step.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.highlight = None;
        self.panel.on_query_changed();
    }

    pub fn type_char(&mut self, ch: char) {
        let mut q = std::mem::take(&mut self.query);
        q.push(ch);
        self.set_query(q);
    }

    pub fn backspace(&mut self) {
        let mut q = std::mem::take(&mut self.query);
        q.pop();
        self.set_query(q);
    }

    pub fn toggle(&mut self) {
        if self.panel.on_toggle() == PanelState::Open {
            self.input_focused = true;
        } else {
            self.highlight = None;
        }
    }

    pub fn escape(&mut self) {
        self.panel.on_escape();
        self.highlight = None;
    }

    /// Swaps in a fresh snapshot for `name`, mirrors it in the search box
    /// and closes the panel. Free text is accepted as-is.
    pub fn apply_location(&mut self, name: &str, now: NaiveDateTime) {
        tracing::debug!(location = name, "applying location");
        self.snapshot = self.source.generate(name, now);
        self.query = name.to_string();
        self.highlight = None;
        self.panel.on_select();
    }

    /// Enter in the search box.
    pub fn submit(&mut self, now: NaiveDateTime) {
        if self.panel.is_open() {
            if let Some(i) = self.highlight {
                if self.select_row(i, now) {
                    return;
                }
            }
        }
        let name = match self.query.trim() {
            "" => EMPTY_LOCATION.to_string(),
            q => q.to_string(),
        };
        self.apply_location(&name, now);
    }

    /// Applies row `index` of the current suggestions. Disabled rows are
    /// ignored and return `false`.
    pub fn select_row(&mut self, index: usize, now: NaiveDateTime) -> bool {
        let rows = self.suggestions().rows;
        let Some(target) = rows.get(index).and_then(|r| r.target()) else {
            return false;
        };
        let target = target.to_string();
        self.apply_location(&target, now);
        true
    }

    /// Moves the keyboard highlight through selectable rows, wrapping
    /// around. Does nothing while the panel is closed.
    pub fn move_highlight(&mut self, delta: isize) {
        if !self.panel.is_open() {
            return;
        }
        let rows = self.suggestions().rows;
        let selectable: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_selectable())
            .map(|(i, _)| i)
            .collect();
        if selectable.is_empty() {
            self.highlight = None;
            return;
        }
        let n = selectable.len() as isize;
        let pos = match self.highlight.and_then(|h| selectable.iter().position(|&i| i == h)) {
            Some(p) => (p as isize + delta).rem_euclid(n),
            None if delta >= 0 => 0,
            None => n - 1,
        };
        self.highlight = Some(selectable[pos as usize]);
    }

    /// Left click at a screen cell, resolved against the last drawn frame.
    /// Element handlers run first, then the screen-wide dismiss check.
    pub fn click(&mut self, column: u16, row: u16, now: NaiveDateTime) {
        let hits = self.hits.clone();
        if hits.toggle.contains(column, row) {
            self.toggle();
        } else if let Some(i) = hits.row_at(column, row) {
            self.select_row(i, now);
        } else if hits.input.contains(column, row) {
            self.focus_input();
        }

        if self.panel.on_pointer(column, row, &hits) {
            self.input_focused = false;
            self.highlight = None;
        }
    }

    pub fn refresh(&mut self, now: NaiveDateTime) {
        let location = self.snapshot.location.clone();
        self.snapshot = self.source.generate(&location, now);
    }

    pub fn apply(&mut self, action: Action, now: NaiveDateTime) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusInput => self.focus_input(),
            Action::BlurInput => self.blur_input(),
            Action::Type(ch) => self.type_char(ch),
            Action::Backspace => self.backspace(),
            Action::Submit => self.submit(now),
            Action::Escape => self.escape(),
            Action::Toggle => self.toggle(),
            Action::HighlightNext => self.move_highlight(1),
            Action::HighlightPrev => self.move_highlight(-1),
            Action::Click { column, row } => self.click(column, row, now),
            Action::ToggleUnit => self.temp_unit = self.temp_unit.toggle(),
            Action::Refresh => self.refresh(now),
        }
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn run(opts: &Options) -> Result<()> {
    let catalog = match &opts.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let source = RandomWeather::new(opts.seed);
    let mut dash = Dashboard::new(catalog, Box::new(source), &opts.location, now());
    if opts.fahrenheit {
        dash.temp_unit = TempUnit::F;
    }

    let mut session = TerminalSession::begin()?;
    // Declared after the session so it is released first.
    let mouse = if opts.mouse {
        Some(MouseCapture::acquire()?)
    } else {
        None
    };

    let frame_timeout = Duration::from_millis(33);
    while !dash.should_quit() {
        let mut hits = HitMap::default();
        session
            .terminal
            .draw(|f| hits = render::draw(f, &dash, opts.mono))?;
        dash.hits = hits;

        if event::poll(frame_timeout)? {
            let ev = event::read()?;
            if let Some(action) = map_event_to_action(dash.input_focused(), &ev) {
                dash.apply(action, now());
            }
        }
    }

    drop(mouse);
    session.end()?;
    tracing::info!("dashboard closed");
    Ok(())
}
