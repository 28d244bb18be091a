use crate::app::App;
use crate::braille::{BrailleCanvas, BLANK};
use crate::library::MarkerHandle;
use crate::map::MapLayers;
use crate::terminal::{MapState, TerminalMarker};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let map = &app.session.map;
    let frame_color = map.view().style.frame;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(frame_color))
        .title(Span::styled(
            " Solar Auto Chargers ",
            Style::default().fg(frame_color).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Viewport follows the terminal size
    map.set_viewport_size(inner.width, inner.height);

    let state = map.view();
    let selected = app.selected_marker();
    frame.render_widget(MapWidget::new(&state, selected), inner);
}

/// Braille base map with pins and the popup on top
pub struct MapWidget<'a> {
    state: &'a MapState,
    layers: MapLayers,
    selected: Option<TerminalMarker>,
}

impl<'a> MapWidget<'a> {
    pub fn new(state: &'a MapState, selected: Option<TerminalMarker>) -> Self {
        let (cols, rows) = state.size();
        let layers = state
            .layers
            .render(usize::from(cols), usize::from(rows), &state.viewport);
        Self {
            state,
            layers,
            selected,
        }
    }

    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for row in 0..canvas.height().min(usize::from(area.height)) {
            let y = area.y + row as u16;
            for col in 0..canvas.width().min(usize::from(area.width)) {
                let ch = canvas.cell(col, row);
                if ch == BLANK {
                    continue;
                }
                let x = area.x + col as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }

    fn render_pin(&self, marker: &TerminalMarker, area: Rect, buf: &mut Buffer) {
        let Some(rect) = self.state.pin_rect(marker) else {
            return;
        };
        let pin = marker.pin();
        let border = Style::default().fg(pin.border);
        let body = Style::default().fg(pin.glyph_color).bg(pin.background);
        let glyph_cols = pin.glyph.width() as i32;

        for row in 0..pin.glyph.height() {
            let y = rect.y + row as i32;
            put(buf, area, rect.x, y, '▕', border);
            for col in 0..glyph_cols {
                let ch = match pin.glyph.cell(col as usize, row) {
                    BLANK => ' ',
                    ch => ch,
                };
                put(buf, area, rect.x + 1 + col, y, ch, body);
            }
            put(buf, area, rect.x + 1 + glyph_cols, y, '▏', border);
        }

        let is_selected = self.selected.as_ref().is_some_and(|s| s.same(marker));
        let stem = if is_selected {
            border.add_modifier(Modifier::REVERSED)
        } else {
            border
        };
        put(buf, area, rect.stem.0, rect.stem.1, '▼', stem);
    }

    fn render_popup(&self, area: Rect, buf: &mut Buffer) {
        let Some(popup) = &self.state.popup else {
            return;
        };

        let anchor = self.state.anchor_cell(popup.anchor);
        // Sit above the tallest pin at the anchor
        let pin_height = self
            .state
            .markers
            .iter()
            .filter(|m| m.position() == popup.anchor)
            .map(|m| i32::from(m.pin().height()))
            .max()
            .unwrap_or(1);

        let text_width = u16::try_from(popup.content.chars().count()).unwrap_or(u16::MAX);
        let width = text_width.saturating_add(4).min(area.width);
        let height = 3u16.min(area.height);
        let max_x = i32::from(area.width - width);
        let x = (anchor.0 - i32::from(width / 2)).clamp(0, max_x);
        let above = anchor.1 - pin_height - i32::from(height) + 1;
        let y = if above >= 0 { above } else { anchor.1 + 1 };
        let y = y.clamp(0, i32::from(area.height - height));

        let rect = Rect::new(area.x + x as u16, area.y + y as u16, width, height);
        Clear.render(rect, buf);
        Paragraph::new(Line::from(popup.content.as_str()))
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.state.style.frame))
                    .title(Span::styled(" x ", Style::default().fg(Color::DarkGray))),
            )
            .render(rect, buf);
    }
}

/// Write one cell if it lies inside `area`
fn put(buf: &mut Buffer, area: Rect, col: i32, row: i32, ch: char, style: Style) {
    if col < 0 || row < 0 || col >= i32::from(area.width) || row >= i32::from(area.height) {
        return;
    }
    let x = area.x + col as u16;
    let y = area.y + row as u16;
    buf[(x, y)].set_char(ch).set_style(style);
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Base layers from back to front
        let style = &self.state.style;
        Self::render_layer(&self.layers.graticule, style.graticule, area, buf);
        Self::render_layer(&self.layers.water, style.water, area, buf);
        Self::render_layer(&self.layers.boundaries, style.boundaries, area, buf);
        Self::render_layer(&self.layers.roads, style.roads, area, buf);

        // Higher stacking order is drawn later, on top
        for marker in self.state.draw_order() {
            self.render_pin(&marker, area, buf);
        }

        self.render_popup(area, buf);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
    ];

    if let Some(title) = app.selected_title() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(title, Style::default().fg(Color::Rgb(0xff, 0xd5, 0x14))));
    }

    spans.push(Span::styled(
        " | hjkl:pan +/-:zoom tab:select enter:open x:close r:reset q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
