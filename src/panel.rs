//! Open/closed state of the suggestion panel and the hit regions used to
//! tell clicks on the search box or panel apart from clicks elsewhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    Open,
    #[default]
    Closed,
}

#[derive(Debug, Default)]
pub struct Panel {
    state: PanelState,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    fn set(&mut self, next: PanelState, cause: &'static str) {
        if self.state != next {
            tracing::trace!(from = ?self.state, to = ?next, cause, "suggestion panel");
            self.state = next;
        }
    }

    pub fn on_focus_input(&mut self) {
        self.set(PanelState::Open, "focus");
    }

    /// The query itself is owned by the caller; this only guarantees the
    /// panel is visible for it.
    pub fn on_query_changed(&mut self) {
        self.set(PanelState::Open, "query");
    }

    /// Flips the state and returns the new one. When it comes back `Open`
    /// the caller must move focus to the search input.
    pub fn on_toggle(&mut self) -> PanelState {
        let next = match self.state {
            PanelState::Open => PanelState::Closed,
            PanelState::Closed => PanelState::Open,
        };
        self.set(next, "toggle");
        next
    }

    pub fn on_select(&mut self) {
        self.set(PanelState::Closed, "select");
    }

    pub fn on_escape(&mut self) {
        self.set(PanelState::Closed, "escape");
    }

    pub fn on_outside_interaction(&mut self) {
        self.set(PanelState::Closed, "outside");
    }

    /// Screen-wide pointer observer. Runs for every click after the
    /// targeted element handled it; closes the panel only when the click
    /// landed outside both the search box and the panel. Returns whether
    /// the click counted as outside.
    pub fn on_pointer(&mut self, column: u16, row: u16, hits: &HitMap) -> bool {
        let outside = hits.is_outside(column, row);
        if outside {
            self.on_outside_interaction();
        }
        outside
    }
}

/// Screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

/// Where the interactive parts of the last frame were drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// Whole search box: the text input plus the toggle button.
    pub search: Region,
    pub input: Region,
    pub toggle: Region,
    /// Present only while the panel is drawn.
    pub panel: Option<Region>,
    /// Visible panel rows, paired with their index into the row list.
    pub rows: Vec<(Region, usize)>,
}

impl HitMap {
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|(region, _)| region.contains(column, row))
            .map(|(_, index)| *index)
    }

    pub fn in_panel(&self, column: u16, row: u16) -> bool {
        self.panel.is_some_and(|p| p.contains(column, row))
    }

    pub fn is_outside(&self, column: u16, row: u16) -> bool {
        !self.search.contains(column, row) && !self.in_panel(column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits() -> HitMap {
        HitMap {
            search: Region::new(0, 3, 30, 3),
            input: Region::new(0, 3, 20, 3),
            toggle: Region::new(20, 3, 10, 3),
            panel: Some(Region::new(0, 6, 30, 10)),
            rows: vec![
                (Region::new(1, 7, 28, 1), 0),
                (Region::new(1, 8, 28, 1), 1),
            ],
        }
    }

    #[test]
    fn starts_closed() {
        assert_eq!(Panel::new().state(), PanelState::Closed);
    }

    #[test]
    fn focus_and_query_open() {
        let mut p = Panel::new();
        p.on_focus_input();
        assert!(p.is_open());
        p.on_focus_input();
        assert!(p.is_open());

        let mut p = Panel::new();
        p.on_query_changed();
        assert!(p.is_open());
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut p = Panel::new();
        assert_eq!(p.on_toggle(), PanelState::Open);
        assert_eq!(p.on_toggle(), PanelState::Closed);
        assert_eq!(p.state(), PanelState::Closed);
    }

    #[test]
    fn escape_and_select_close() {
        let mut p = Panel::new();
        p.on_escape();
        assert!(!p.is_open());
        p.on_focus_input();
        p.on_escape();
        assert!(!p.is_open());
        p.on_focus_input();
        p.on_select();
        assert!(!p.is_open());
    }

    #[test]
    fn region_bounds_are_half_open() {
        let r = Region::new(2, 2, 3, 1);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 2));
        assert!(!r.contains(5, 2));
        assert!(!r.contains(2, 3));
        assert!(!Region::new(0, 0, 0, 0).contains(0, 0));
        assert!(Region::new(u16::MAX - 1, 0, 1, 1).contains(u16::MAX - 1, 0));
    }

    #[test]
    fn click_far_away_dismisses() {
        let mut p = Panel::new();
        p.on_focus_input();
        assert!(p.on_pointer(60, 20, &hits()));
        assert!(!p.is_open());
    }

    #[test]
    fn clicks_on_search_box_or_panel_do_not_dismiss() {
        let h = hits();
        for (col, row) in [(5, 4), (25, 4), (0, 6), (29, 15), (10, 7), (10, 12)] {
            let mut p = Panel::new();
            p.on_focus_input();
            assert!(!p.on_pointer(col, row, &h), "({col}, {row})");
            assert!(p.is_open(), "({col}, {row})");
        }
    }

    #[test]
    fn without_panel_region_only_search_is_inside() {
        let mut h = hits();
        h.panel = None;
        assert!(h.is_outside(10, 7));
        assert!(!h.is_outside(10, 4));
    }

    #[test]
    fn rows_resolve_to_indices() {
        let h = hits();
        assert_eq!(h.row_at(3, 7), Some(0));
        assert_eq!(h.row_at(3, 8), Some(1));
        assert_eq!(h.row_at(3, 9), None);
        assert_eq!(h.row_at(0, 7), None);
    }
}
