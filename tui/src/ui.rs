use gamedata::constants::{parse_color, rarity_color, EntityType, TerrainPalette, UNKNOWN_COLOR};
use gamedata::map::ascii::{cell_glyph, terrain_glyph};
use gamedata::map::{marker_layout, CanvasGeometry};
use gamedata::types::Row;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Rectangle},
        Block, Borders, List, ListState, Paragraph, Row as TableRow, Table, TableState, Tabs,
    },
    Frame,
};

use crate::app::{App, Focus, Mode, Tab};

/// Columns taken by the row number in front of each map row
pub const ROW_LABEL_WIDTH: u16 = 4;
/// Columns taken by one map cell
pub const CELL_WIDTH: u16 = 2;

fn rgb(color: &str) -> Color {
    parse_color(color)
        .or_else(|| parse_color(UNKNOWN_COLOR))
        .map_or(Color::White, |(r, g, b)| Color::Rgb(r, g, b))
}

fn pane(title: String, focused: bool) -> Block<'static> {
    let block = Block::new().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::new().yellow())
    } else {
        block
    }
}

fn screen_areas(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(4),
    ])
    .areas(area)
}

fn map_tab_areas(body: Rect) -> [Rect; 3] {
    Layout::horizontal([
        Constraint::Length(30),
        Constraint::Min(0),
        Constraint::Length(36),
    ])
    .areas(body)
}

/// Top left screen position of the map grid when the screen covers `area`
#[must_use]
pub fn map_grid_origin(area: Rect) -> (u16, u16) {
    let [_, body, _] = screen_areas(area);
    let [_, canvas_area, _] = map_tab_areas(body);
    // inside the border
    (canvas_area.x + 1, canvas_area.y + 1)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let [tabs_area, body, footer] = screen_areas(frame.area());

    let titles: Vec<&str> = app.tabs().iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab_index())
        .block(Block::new().borders(Borders::ALL).title("ClawWorld editor"))
        .highlight_style(Style::new().bold().reversed());
    frame.render_widget(tabs, tabs_area);

    match app.current_tab() {
        Tab::Map => draw_map_tab(frame, app, body),
        Tab::Records(_) => draw_record_tab(frame, app, body),
    }
    draw_footer(frame, app, footer);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let list = List::new(app.labels())
        .block(pane(app.current_tab().title().to_string(), app.focus() == Focus::List))
        .highlight_style(Style::new().reversed())
        .highlight_symbol(">>");
    let mut state = ListState::default().with_selected(app.selected_id().map(|_| app.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_fields(frame: &mut Frame, app: &App, area: Rect) {
    let editing = match app.mode() {
        Mode::Edit { field, buffer } => Some((field.as_str(), buffer.as_str())),
        _ => None,
    };
    let rows: Vec<TableRow> = app
        .fields()
        .into_iter()
        .map(|(column, value)| {
            let value = match editing {
                Some((field, buffer)) if field == column => format!("{buffer}_"),
                _ => value,
            };
            if column == "rarity" {
                let style = Style::new().fg(rgb(rarity_color(&value)));
                return TableRow::new(vec![Span::raw(column), Span::styled(value, style)]);
            }
            TableRow::new(vec![Span::raw(column), Span::raw(value)])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .block(pane("Fields".to_string(), app.focus() == Focus::Fields))
        .highlight_style(Style::new().reversed());
    let mut state = TableState::default();
    if app.focus() == Focus::Fields {
        state.select(Some(app.field_index()));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_record_tab(frame: &mut Frame, app: &App, area: Rect) {
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);
    draw_list(frame, app, list_area);

    let links = app.links();
    if links.is_empty() {
        draw_fields(frame, app, detail_area);
        return;
    }
    let [fields_area, links_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(links.len() as u16 + 2)])
            .areas(detail_area);
    draw_fields(frame, app, fields_area);
    frame.render_widget(
        List::new(links).block(Block::new().borders(Borders::ALL).title("Linked")),
        links_area,
    );
}

fn draw_map_tab(frame: &mut Frame, app: &App, area: Rect) {
    let [left, canvas_area, cell_area] = map_tab_areas(area);
    let [list_area, fields_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(left);
    draw_list(frame, app, list_area);
    draw_fields(frame, app, fields_area);

    let Some(map_id) = app.selected_id() else {
        frame.render_widget(
            Paragraph::new("No maps, press n to create one").block(pane("Map".to_string(), false)),
            canvas_area,
        );
        return;
    };
    let db = app.runtime().database();
    let editor = app.runtime().map_editor();
    let palette = editor.palette(db);
    let title = format!(
        "{} brush: {} entity: {}",
        editor.map_name(db, &map_id),
        app.brush().unwrap_or_default(),
        app.entity_type()
    );
    let canvas_block = pane(title, app.focus() == Focus::Canvas);

    let grid = match editor.terrain_grid(db, &map_id) {
        Ok(grid) => grid,
        Err(e) => {
            frame.render_widget(
                Paragraph::new(format!("ERROR: {e}")).block(canvas_block),
                canvas_area,
            );
            return;
        }
    };
    let groups = editor.entity_groups(db, &map_id);

    let mut lines = Vec::new();
    for y in (0..grid.height()).rev() {
        let mut spans = vec![Span::raw(format!(
            "{y:>width$} ",
            width = usize::from(ROW_LABEL_WIDTH - 1)
        ))];
        for x in 0..grid.width() {
            let terrain = grid.get(x, y).unwrap_or("");
            let types: Vec<Option<EntityType>> = groups
                .get(&(x, y))
                .map(|rows| rows.iter().map(|r| entity_type_of(r)).collect())
                .unwrap_or_default();
            let glyph = cell_glyph(&types).unwrap_or_else(|| terrain_glyph(terrain));
            let mut style = Style::new().fg(Color::Black).bg(rgb(palette.color_of(terrain)));
            if app.cursor() == (x, y) && app.focus() == Focus::Canvas {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(format!("{glyph} "), style));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines).block(canvas_block), canvas_area);

    draw_cell(frame, app, &map_id, &palette, cell_area);
}

fn entity_type_of(row: &Row) -> Option<EntityType> {
    row.get("entityType").parse().ok()
}

/// Zoomed view of the cell under the cursor with its entity markers, and its details
#[allow(clippy::cast_precision_loss)]
fn draw_cell(frame: &mut Frame, app: &App, map_id: &str, palette: &TerrainPalette, area: Rect) {
    let db = app.runtime().database();
    let editor = app.runtime().map_editor();
    let (x, y) = app.cursor();
    let [zoom_area, info_area] =
        Layout::vertical([Constraint::Length(12), Constraint::Min(0)]).areas(area);

    let info = match editor.cell_info(db, map_id, x, y) {
        Ok(info) => info,
        Err(e) => {
            frame.render_widget(Paragraph::new(format!("ERROR: {e}")), info_area);
            return;
        }
    };
    let entities = editor.entities_at(db, map_id, x, y);

    let geometry = CanvasGeometry::new(1, 1);
    let (width, height) = geometry.canvas_size();
    let (center_x, center_y) = geometry.cell_center(0, 0);
    let (width, height) = (width as f64, height as f64);
    let terrain_color = rgb(palette.color_of(&info.terrain));
    let markers = marker_layout(entities.len(), geometry.cell_size);
    let colors: Vec<Color> = entities
        .iter()
        .map(|r| entity_type_of(r).map_or(Color::White, |t| rgb(t.color())))
        .collect();
    let zoom = Canvas::default()
        .block(Block::new().borders(Borders::ALL).title(format!("({x}, {y})")))
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            ctx.draw(&Rectangle {
                x: 0.0,
                y: 0.0,
                width,
                height,
                color: terrain_color,
            });
            for (marker, color) in markers.iter().zip(&colors) {
                // pixel rows grow downwards, the canvas grows upwards
                ctx.draw(&Circle {
                    x: (center_x + marker.dx) as f64,
                    y: height - (center_y + marker.dy) as f64,
                    radius: marker.radius as f64,
                    color: *color,
                });
            }
        });
    frame.render_widget(zoom, zoom_area);

    let mut lines = vec![Line::from(format!("Terrain: {}", info.terrain))];
    for (index, entity) in entities.iter().enumerate() {
        lines.push(Line::from(Span::from(format!("#{index}")).bold()));
        for (label, value) in editor.entity_details(db, entity) {
            lines.push(Line::from(format!("  {label}: {value}")));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::new().borders(Borders::ALL).title("Cell")),
        info_area,
    );
}

fn help(app: &App) -> &'static str {
    match (app.focus(), app.current_tab()) {
        (Focus::List, Tab::Map) => {
            "↑↓ select  Enter fields  c canvas  n new  d delete  s save  r reload  Tab next  q quit"
        }
        (Focus::List, _) => "↑↓ select  Enter fields  n new  d delete  s save  r reload  Tab next  q quit",
        (Focus::Fields, _) => "↑↓ field  Enter edit  Esc back  s save",
        (Focus::Canvas, _) => {
            "arrows move  space paint  t/T brush  e entity type  p place  x remove  X remove all  Esc back"
        }
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.mode() {
        Mode::Create { buffer } => vec![
            Line::from(format!("New id: {buffer}_")),
            Line::from("Enter create  Esc cancel"),
        ],
        Mode::Place {
            entity_type,
            buffer,
        } => vec![
            Line::from(format!("{entity_type} id: {buffer}_")),
            Line::from("Enter place  Esc cancel"),
        ],
        Mode::Edit { field, .. } => vec![
            Line::from(format!("Editing {field}")),
            Line::from("Enter apply  Esc cancel"),
        ],
        Mode::Browse | Mode::ConfirmDelete => {
            let unsaved = if app.has_unsaved_changes() { " [unsaved]" } else { "" };
            vec![
                Line::from(format!("{}{unsaved}", app.status())),
                Line::from(help(app)).dim(),
            ]
        }
    };
    frame.render_widget(
        Paragraph::new(lines).block(Block::new().borders(Borders::ALL)),
        area,
    );
}
