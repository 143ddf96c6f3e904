use crate::app::Dashboard;
use crate::panel::{HitMap, PanelState, Region};
use crate::search::Row as Suggestion;
use crate::weather::format_temp;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 36;
const PLACEHOLDER: &str = "Escribe ciudad";

impl From<Rect> for Region {
    fn from(r: Rect) -> Self {
        Region::new(r.x, r.y, r.width, r.height)
    }
}

/// Draws one frame and reports where the clickable parts ended up.
pub fn draw(f: &mut Frame, d: &Dashboard, mono: bool) -> HitMap {
    let area = f.size();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    let hits = render_sidebar(f, cols[0], d, mono);
    render_main(f, cols[1], d, mono);
    hits
}

fn accent(mono: bool, color: Color) -> Style {
    Style::default().fg(if mono { Color::White } else { color })
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn render_sidebar(f: &mut Frame, area: Rect, d: &Dashboard, mono: bool) -> HitMap {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(vec![
        Span::raw("☁️  "),
        Span::styled("TECNM - Clima", bold()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(brand, rows[0]);

    let search = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(rows[1]);
    render_input(f, search[0], d, mono);

    let open = d.panel_state() == PanelState::Open;
    let button_style = if open {
        bold().add_modifier(Modifier::REVERSED)
    } else {
        bold()
    };
    f.render_widget(
        Paragraph::new("Buscar")
            .style(button_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        search[1],
    );

    let mut hits = HitMap {
        search: rows[1].into(),
        input: search[0].into(),
        toggle: search[1].into(),
        panel: None,
        rows: Vec::new(),
    };

    if open {
        render_suggestions(f, rows[2], d, mono, &mut hits);
    } else {
        render_keys(f, rows[2], mono);
    }
    hits
}

fn render_input(f: &mut Frame, area: Rect, d: &Dashboard, mono: bool) {
    let border = if d.input_focused() {
        accent(mono, Color::Cyan)
    } else {
        accent(mono, Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);

    // keep the tail of long queries visible, leaving a cell for the cursor
    let room = usize::from(inner.width.saturating_sub(1));
    let chars: Vec<char> = d.query().chars().collect();
    let visible: String = chars[chars.len().saturating_sub(room)..].iter().collect();

    let text = if d.query().is_empty() && !d.input_focused() {
        Line::from(Span::styled(PLACEHOLDER, accent(mono, Color::DarkGray)))
    } else {
        Line::from(visible.clone())
    };
    f.render_widget(Paragraph::new(text).block(block), area);

    if d.input_focused() && inner.width > 0 && inner.height > 0 {
        let x = inner.x + visible.chars().count() as u16;
        f.set_cursor(x.min(inner.right().saturating_sub(1)), inner.y);
    }
}

fn render_suggestions(f: &mut Frame, area: Rect, d: &Dashboard, mono: bool, hits: &mut HitMap) {
    let suggestions = d.suggestions();
    let wanted = suggestions.rows.len() as u16 + 2;
    let rect = Rect {
        height: wanted.min(area.height),
        ..area
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sugerencias")
        .border_style(accent(mono, Color::DarkGray));
    let inner = block.inner(rect);

    // scroll so the highlight stays in view
    let visible = usize::from(inner.height);
    let start = d
        .highlight()
        .map(|h| (h + 1).saturating_sub(visible))
        .unwrap_or(0);
    let end = (start + visible).min(suggestions.rows.len());

    let items: Vec<ListItem> = suggestions.rows[start..end]
        .iter()
        .map(|row| {
            let style = match row {
                Suggestion::NewEntry(_) => accent(mono, Color::Green).add_modifier(Modifier::ITALIC),
                Suggestion::Entry(_) => Style::default(),
                Suggestion::Empty(_) => accent(mono, Color::DarkGray).add_modifier(Modifier::ITALIC),
            };
            ListItem::new(row.label()).style(style)
        })
        .collect();

    let mut state = ListState::default();
    state.select(d.highlight().and_then(|h| h.checked_sub(start)));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, rect, &mut state);

    hits.panel = Some(rect.into());
    hits.rows = (start..end)
        .enumerate()
        .map(|(k, index)| {
            (
                Region::new(inner.x, inner.y + k as u16, inner.width, 1),
                index,
            )
        })
        .collect();
}

fn render_keys(f: &mut Frame, area: Rect, mono: bool) {
    let key = |k: &'static str| Span::styled(k, bold());
    let lines = vec![
        Line::from(vec![key("/"), Span::raw(" buscar")]),
        Line::from(vec![key("Ctrl+F"), Span::raw(" abrir/cerrar lista")]),
        Line::from(vec![key("↑/↓ Enter"), Span::raw(" elegir")]),
        Line::from(vec![key("Esc"), Span::raw(" cerrar lista")]),
        Line::from(vec![key("f"), Span::raw(" °C/°F  "), key("r"), Span::raw(" actualizar")]),
        Line::from(vec![key("q"), Span::raw(" salir")]),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .style(accent(mono, Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("Teclas"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_main(f: &mut Frame, area: Rect, d: &Dashboard, mono: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(" Pronóstico de 24 horas", bold())),
        rows[0],
    );
    render_current(f, rows[1], d, mono);
    render_hourly(f, rows[2], d, mono);
    render_cards(f, rows[3], d);
}

fn render_current(f: &mut Frame, area: Rect, d: &Dashboard, mono: bool) {
    let s = d.snapshot();
    let c = &s.current;
    let lines = vec![
        Line::from(Span::styled(
            s.location.clone(),
            bold().patch(accent(mono, Color::Cyan)),
        )),
        Line::from(Span::styled(s.updated_at.clone(), accent(mono, Color::Gray))),
        Line::from(vec![
            Span::raw("☁️  "),
            Span::styled(format_temp(c.temp_c, d.temp_unit()), bold()),
        ]),
        Line::from(c.description),
        Line::from(format!(
            "Humedad: {}%   Viento: {} km/h   Presión: {} hPa   Visibilidad: {} km",
            c.humidity_pct, c.wind_kmh, c.pressure_hpa, c.visibility_km
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Ahora"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_hourly(f: &mut Frame, area: Rect, d: &Dashboard, mono: bool) {
    let s = d.snapshot();
    let rows: Vec<Row> = s
        .hours
        .iter()
        .map(|h| {
            Row::new(vec![
                Cell::from(h.time.clone()),
                Cell::from(h.icon),
                Cell::from(format_temp(h.temp_c, d.temp_unit())),
                Cell::from(h.description),
            ])
        })
        .collect();

    let header = Row::new(vec!["Hora", "", "Temp", "Descripción"]).style(bold());

    let t = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Próximas 24 horas · {}", s.date.format("%Y-%m-%d")))
            .border_style(accent(mono, Color::DarkGray)),
    )
    .column_spacing(1);
    f.render_widget(t, area);
}

fn render_cards(f: &mut Frame, area: Rect, d: &Dashboard) {
    let x = &d.snapshot().extras;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let cards = [
        ("Salida / Puesta", format!("☀️ {} • 🌙 {}", x.sunrise, x.sunset)),
        ("Índice UV", format!("{} (UV)", x.uv_index)),
        ("Calidad del aire", format!("AQI {} — {}", x.aqi, x.air_quality)),
        ("Fase lunar", x.moon_phase.to_string()),
    ];
    for (rect, (title, body)) in cols.iter().zip(cards) {
        f.render_widget(
            Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(title)),
            *rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::weather::RandomWeather;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn dash(names: &[&str]) -> Dashboard {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        Dashboard::new(
            Catalog::from_names(names.iter().copied()),
            Box::new(RandomWeather::new(Some(5))),
            "Guadalajara",
            now,
        )
    }

    fn frame(d: &Dashboard) -> (Buffer, HitMap) {
        frame_sized(d, 120, 40)
    }

    fn frame_sized(d: &Dashboard, width: u16, height: u16) -> (Buffer, HitMap) {
        let mut term = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hits = HitMap::default();
        term.draw(|f| hits = draw(f, d, false)).unwrap();
        (term.backend().buffer().clone(), hits)
    }

    fn line(buf: &Buffer, y: u16) -> String {
        let w = usize::from(buf.area.width);
        let start = usize::from(y) * w;
        buf.content()[start..start + w]
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn text(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| line(buf, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn shows_snapshot_and_all_hours() {
        let d = dash(&["Monterrey"]);
        let (buf, hits) = frame(&d);
        let screen = text(&buf);
        assert!(screen.contains("Guadalajara"));
        assert!(screen.contains("viernes, 16 de octubre de 2026"));
        assert!(screen.contains("00:00"));
        assert!(screen.contains("23:00"));
        assert!(screen.contains("Humedad:"));
        assert!(hits.panel.is_none());
        assert!(!screen.contains("Sugerencias"));
    }

    #[test]
    fn open_panel_rows_line_up_with_hits() {
        let mut d = dash(&["Monterrey", "Morelia", "Mexico"]);
        d.focus_input();
        d.set_query("mo");
        let (buf, hits) = frame(&d);
        assert!(hits.panel.is_some());
        assert_eq!(hits.rows.len(), 3);
        let labels = ["Usar \"mo\"", "Monterrey", "Morelia"];
        for ((region, index), label) in hits.rows.iter().zip(labels) {
            assert!(line(&buf, region.y).contains(label), "row {index}");
        }
        assert!(!text(&buf).contains("Mexico"));
    }

    #[test]
    fn empty_state_row_shows_typed_text() {
        let mut d = dash(&["Monterrey", "Morelia", "Mexico"]);
        d.set_query("Atlantis");
        let (buf, hits) = frame(&d);
        assert!(text(&buf).contains("Usar \"Atlantis\""));
        assert_eq!(hits.rows.len(), 1);
    }

    #[test]
    fn search_box_covers_input_and_button() {
        let d = dash(&[]);
        let (buf, hits) = frame(&d);
        assert!(text(&buf).contains(PLACEHOLDER));
        assert!(line(&buf, hits.toggle.y + 1).contains("Buscar"));
        assert!(hits.search.contains(hits.input.x, hits.input.y));
        assert!(hits.search.contains(hits.toggle.x, hits.toggle.y));
        assert!(hits.is_outside(SIDEBAR_WIDTH + 5, 20));
    }

    #[test]
    fn highlighted_row_scrolls_into_view() {
        let names: Vec<String> = (0..30).map(|i| format!("Lugar {i:02}")).collect();
        let mut d = Dashboard::new(
            Catalog::from_names(names),
            Box::new(RandomWeather::new(Some(5))),
            "X",
            NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        d.focus_input();
        for _ in 0..30 {
            d.move_highlight(1);
        }
        assert_eq!(d.highlight(), Some(29));
        // 20 rows leave 12 visible panel lines
        let (buf, hits) = frame_sized(&d, 120, 20);
        assert_eq!(hits.rows.len(), 12);
        assert_eq!(hits.rows[0].1, 18);
        let (last, index) = *hits.rows.last().unwrap();
        assert_eq!(index, 29);
        assert!(line(&buf, last.y).contains("Lugar 29"));
    }
}
