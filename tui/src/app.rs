//! State of the terminal editor and its key bindings.
use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gamedata::constants::EntityType;
use gamedata::editor::{EditorKind, NewRecord, RecordEditor};
use gamedata::error::GameDataError;
use gamedata::map::{CanvasGeometry, MapEditor, NewMap, MAP_PROPERTIES, MAP_TABLES};
use gamedata::schema::TableKind;
use gamedata::types::Row;
use gamedata::ApplicationRuntime;
use log::{debug, info, warn};

use crate::ui::{CELL_WIDTH, ROW_LABEL_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Map,
    Records(EditorKind),
}

impl Tab {
    #[must_use]
    pub fn all() -> Vec<Tab> {
        std::iter::once(Tab::Map)
            .chain(EditorKind::ALL.into_iter().map(Tab::Records))
            .collect()
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Tab::Map => "Maps",
            Tab::Records(kind) => kind.title(),
        }
    }

    fn tables(self) -> Vec<TableKind> {
        match self {
            Tab::Map => MAP_TABLES.to_vec(),
            Tab::Records(kind) => kind.tables(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Fields,
    /// Map tab only
    Canvas,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Edit { field: String, buffer: String },
    /// Typing the id of a new record or map
    Create { buffer: String },
    /// Typing the id of the entity to place under the cursor
    Place { entity_type: EntityType, buffer: String },
    ConfirmDelete,
}

pub struct App {
    runtime: ApplicationRuntime,
    tabs: Vec<Tab>,
    tab: usize,
    focus: Focus,
    selected: usize,
    field: usize,
    mode: Mode,
    status: String,
    cursor: (i64, i64),
    brush: usize,
    entity_type: usize,
    unsaved: BTreeSet<TableKind>,
    quit_requested: bool,
    quit: bool,
}

impl App {
    #[must_use]
    pub fn new(runtime: ApplicationRuntime) -> Self {
        App {
            runtime,
            tabs: Tab::all(),
            tab: 0,
            focus: Focus::List,
            selected: 0,
            field: 0,
            mode: Mode::Browse,
            status: String::from("Tab: next editor  q: quit"),
            cursor: (0, 0),
            brush: 0,
            entity_type: 0,
            unsaved: BTreeSet::new(),
            quit_requested: false,
            quit: false,
        }
    }

    #[must_use]
    pub fn runtime(&self) -> &ApplicationRuntime {
        &self.runtime
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    #[must_use]
    pub fn tab_index(&self) -> usize {
        self.tab
    }

    #[must_use]
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.tab]
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn field_index(&self) -> usize {
        self.field
    }

    #[must_use]
    pub fn cursor(&self) -> (i64, i64) {
        self.cursor
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        !self.unsaved.is_empty()
    }

    fn record_editor(&self) -> Option<RecordEditor> {
        match self.current_tab() {
            Tab::Map => None,
            Tab::Records(kind) => Some(self.runtime.editor(kind)),
        }
    }

    fn map_editor(&self) -> MapEditor {
        self.runtime.map_editor()
    }

    fn rows(&self) -> Vec<&Row> {
        let db = self.runtime.database();
        match self.record_editor() {
            Some(editor) => editor.records(db),
            None => self.map_editor().maps(db),
        }
    }

    /// Lines of the list pane
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let db = self.runtime.database();
        match self.record_editor() {
            Some(editor) => editor.labels(db),
            None => self.map_editor().labels(db),
        }
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.rows()
            .get(self.selected)
            .map(|row| row.id().to_string())
    }

    /// `(column, value)` pairs of the selected row; for maps the editable properties
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        let rows = self.rows();
        let Some(row) = rows.get(self.selected) else {
            return Vec::new();
        };
        let columns: Vec<String> = match self.record_editor() {
            Some(editor) => editor.columns(self.runtime.database()).to_vec(),
            None => MAP_PROPERTIES.iter().map(|p| (*p).to_string()).collect(),
        };
        columns
            .into_iter()
            .map(|c| {
                let value = row.get(&c).to_string();
                (c, value)
            })
            .collect()
    }

    /// Linked entries of the selected record, one line each
    #[must_use]
    pub fn links(&self) -> Vec<String> {
        let (Some(editor), Some(id)) = (self.record_editor(), self.selected_id()) else {
            return Vec::new();
        };
        editor
            .links(self.runtime.database(), &id)
            .map(|links| {
                links
                    .iter()
                    .map(|row| {
                        row.fields()
                            .map(|(k, v)| format!("{k}={v}"))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Terrain painted by the space bar
    #[must_use]
    pub fn brush(&self) -> Option<String> {
        let palette = self.map_editor().palette(self.runtime.database());
        if palette.types.is_empty() {
            None
        } else {
            Some(palette.types[self.brush % palette.types.len()].clone())
        }
    }

    /// Entity type placed by `p`
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        EntityType::ALL[self.entity_type % EntityType::ALL.len()]
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code != KeyCode::Char('q') {
            self.quit_requested = false;
        }
        match self.mode.clone() {
            Mode::Browse => self.browse(key),
            Mode::ConfirmDelete => {
                self.mode = Mode::Browse;
                if key.code == KeyCode::Char('y') {
                    self.delete_selected();
                } else {
                    self.status = "Delete cancelled".to_string();
                }
            }
            _ => self.input(key),
        }
    }

    fn browse(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Tab => self.switch_tab(self.tab + 1),
            KeyCode::BackTab => self.switch_tab(self.tab + self.tabs.len() - 1),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('r') => self.reload(),
            _ => match self.focus {
                Focus::List => self.browse_list(key.code),
                Focus::Fields => self.browse_fields(key.code),
                Focus::Canvas => self.browse_canvas(key.code),
            },
        }
    }

    fn browse_list(&mut self, code: KeyCode) {
        let count = self.rows().len();
        match code {
            KeyCode::Up if self.selected > 0 => self.select(self.selected - 1),
            KeyCode::Down if self.selected + 1 < count => self.select(self.selected + 1),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(count.saturating_sub(1)),
            KeyCode::Enter | KeyCode::Right if count > 0 => self.focus = Focus::Fields,
            KeyCode::Char('c') if count > 0 && self.current_tab() == Tab::Map => {
                self.focus = Focus::Canvas;
            }
            KeyCode::Char('n') => {
                self.mode = Mode::Create {
                    buffer: String::new(),
                };
            }
            KeyCode::Char('d') => match self.selected_id() {
                Some(id) => {
                    self.status = format!("Delete {id}? (y/n)");
                    self.mode = Mode::ConfirmDelete;
                }
                None => self.status = "Please select a row first".to_string(),
            },
            _ => {}
        }
    }

    fn browse_fields(&mut self, code: KeyCode) {
        let fields = self.fields();
        match code {
            KeyCode::Up if self.field > 0 => self.field -= 1,
            KeyCode::Down if self.field + 1 < fields.len() => self.field += 1,
            KeyCode::Esc | KeyCode::Left => self.focus = Focus::List,
            KeyCode::Char('c') if self.current_tab() == Tab::Map => self.focus = Focus::Canvas,
            KeyCode::Enter => {
                if let Some((field, value)) = fields.into_iter().nth(self.field) {
                    self.mode = Mode::Edit {
                        field,
                        buffer: value,
                    };
                }
            }
            _ => {}
        }
    }

    /// Moves the cursor to the map cell drawn at `(column, row)`, counted from the
    /// top left corner of the map grid
    pub fn click_cell(&mut self, column: u16, row: u16) {
        if self.current_tab() != Tab::Map || self.mode != Mode::Browse {
            return;
        }
        let Some(map_id) = self.selected_id() else {
            return;
        };
        let Ok((width, height)) = self.map_editor().dimensions(self.runtime.database(), &map_id)
        else {
            return;
        };
        let Some(column) = column.checked_sub(ROW_LABEL_WIDTH) else {
            return;
        };
        let geometry = CanvasGeometry::new(width, height).with_cell_size(1);
        if let Some(cell) =
            geometry.pixel_to_cell(i64::from(column / CELL_WIDTH), i64::from(row))
        {
            self.cursor = cell;
            self.focus = Focus::Canvas;
        }
    }

    fn browse_canvas(&mut self, code: KeyCode) {
        let Some(map_id) = self.selected_id() else {
            self.focus = Focus::List;
            return;
        };
        let (width, height) = match self.map_editor().dimensions(self.runtime.database(), &map_id) {
            Ok(size) => size,
            Err(e) => {
                self.report_error(&e);
                self.focus = Focus::List;
                return;
            }
        };
        let (x, y) = self.cursor;
        match code {
            KeyCode::Left if x > 0 => self.cursor.0 -= 1,
            KeyCode::Right if x + 1 < width => self.cursor.0 += 1,
            // row 0 is drawn at the bottom
            KeyCode::Up if y + 1 < height => self.cursor.1 += 1,
            KeyCode::Down if y > 0 => self.cursor.1 -= 1,
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Char('t') => self.brush = self.brush.wrapping_add(1),
            KeyCode::Char('T') => self.brush = self.brush.wrapping_add(self.palette_len().max(1) - 1),
            KeyCode::Char('e') => self.entity_type = (self.entity_type + 1) % EntityType::ALL.len(),
            KeyCode::Char(' ') => self.paint(&map_id),
            KeyCode::Char('p') => {
                self.mode = Mode::Place {
                    entity_type: self.entity_type(),
                    buffer: String::new(),
                };
            }
            KeyCode::Char('x') => {
                let result = self
                    .map_editor()
                    .delete_entity(self.runtime.database_mut(), &map_id, x, y, 0)
                    .map(|row| format!("Removed {} {}", row.get("entityType"), row.get("entityId")));
                self.apply(result);
            }
            KeyCode::Char('X') => {
                let result = self
                    .map_editor()
                    .delete_all_entities_at(self.runtime.database_mut(), &map_id, x, y)
                    .map(|n| format!("Removed {n} entities from ({x}, {y})"));
                self.apply(result);
            }
            _ => {}
        }
    }

    fn palette_len(&self) -> usize {
        self.map_editor().palette(self.runtime.database()).types.len()
    }

    fn paint(&mut self, map_id: &str) {
        let Some(terrain) = self.brush() else {
            self.status = "No terrain types defined".to_string();
            return;
        };
        let (x, y) = self.cursor;
        let result = self
            .map_editor()
            .set_terrain(self.runtime.database_mut(), map_id, x, y, &terrain)
            .map(|()| format!("({x}, {y}) is now {terrain}"));
        self.apply(result);
    }

    fn input(&mut self, key: KeyEvent) {
        let buffer = match &mut self.mode {
            Mode::Edit { buffer, .. } | Mode::Create { buffer } | Mode::Place { buffer, .. } => buffer,
            Mode::Browse | Mode::ConfirmDelete => return,
        };
        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.status = "Cancelled".to_string();
            }
            KeyCode::Enter => {
                let mode = std::mem::replace(&mut self.mode, Mode::Browse);
                self.commit(mode);
            }
            _ => {}
        }
    }

    fn commit(&mut self, mode: Mode) {
        match mode {
            Mode::Edit { field, buffer } => {
                let Some(id) = self.selected_id() else {
                    return;
                };
                let fields = [(field.clone(), buffer)];
                let result = match self.record_editor() {
                    Some(editor) => editor.update(self.runtime.database_mut(), &id, &fields),
                    None => self
                        .map_editor()
                        .update_properties(self.runtime.database_mut(), &id, &fields),
                };
                self.apply(result.map(|()| format!("{id}: {field} changed")));
            }
            Mode::Create { buffer } => self.create(&buffer),
            Mode::Place {
                entity_type,
                buffer,
            } => {
                let Some(map_id) = self.selected_id() else {
                    return;
                };
                let (x, y) = self.cursor;
                let result = self
                    .map_editor()
                    .add_entity(self.runtime.database_mut(), &map_id, x, y, entity_type, &buffer)
                    .map(|_| format!("Placed {entity_type} {} at ({x}, {y})", buffer.trim()));
                self.apply(result);
            }
            Mode::Browse | Mode::ConfirmDelete => {}
        }
    }

    fn create(&mut self, id: &str) {
        let result = match self.record_editor() {
            Some(editor) => editor.create(self.runtime.database_mut(), &NewRecord::new(id, "")),
            None => self
                .map_editor()
                .new_map(self.runtime.database_mut(), &NewMap::new(id, "")),
        };
        match result {
            Ok(row) => {
                let id = row.id().to_string();
                self.mark_unsaved();
                let index = self.rows().iter().position(|r| r.id() == id);
                if let Some(index) = index {
                    self.select(index);
                }
                self.status = format!("Created {id}");
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let result = match self.record_editor() {
            Some(editor) => editor.delete(self.runtime.database_mut(), &id),
            None => self
                .map_editor()
                .delete_map(self.runtime.database_mut(), &id)
                .map(|_| ()),
        };
        self.apply(result.map(|()| format!("Deleted {id}")));
        let count = self.rows().len();
        self.select(self.selected.min(count.saturating_sub(1)));
    }

    fn save(&mut self) {
        let db = self.runtime.database();
        let result = match self.record_editor() {
            Some(editor) => editor.save(db),
            None => self.map_editor().save(db),
        };
        match result {
            Ok(()) => {
                for table in self.current_tab().tables() {
                    self.unsaved.remove(&table);
                }
                self.status = format!("{} saved", self.current_tab().title());
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Reads the current tab's tables again, dropping their unsaved changes
    fn reload(&mut self) {
        let tables = self.current_tab().tables();
        match self.runtime.database_mut().reload_tables(&tables) {
            Ok(()) => {
                for table in &tables {
                    self.unsaved.remove(table);
                }
                let count = self.rows().len();
                self.select(self.selected.min(count.saturating_sub(1)));
                self.status = format!("{} reloaded", self.current_tab().title());
                info!("Reloaded {tables:?}");
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn request_quit(&mut self) {
        if self.has_unsaved_changes() && !self.quit_requested {
            self.quit_requested = true;
            self.status = "Unsaved changes, press q again to quit without saving".to_string();
        } else {
            self.quit = true;
        }
    }

    fn switch_tab(&mut self, index: usize) {
        self.tab = index % self.tabs.len();
        self.focus = Focus::List;
        self.mode = Mode::Browse;
        self.select(0);
        debug!("Switched to {}", self.current_tab().title());
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.cursor = (0, 0);
        }
        self.selected = index;
        self.field = 0;
    }

    fn mark_unsaved(&mut self) {
        self.unsaved.extend(self.current_tab().tables());
    }

    fn apply(&mut self, result: Result<String, GameDataError>) {
        match result {
            Ok(message) => {
                self.mark_unsaved();
                self.status = message;
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, e: &GameDataError) {
        warn!("{e}");
        self.status = format!("ERROR: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata::ApplicationRuntimeBuilder;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn test_app() -> App {
        let mut runtime = ApplicationRuntimeBuilder::new()
            .use_in_memory_store()
            .build()
            .unwrap();
        let db = runtime.database_mut();
        for (id, color) in [("GRASS", "#90EE90"), ("WATER", "#1E90FF")] {
            db.table_mut(TableKind::TerrainTypes).push(Row::from_pairs([
                ("id", id),
                ("name", id),
                ("passable", "true"),
                ("color", color),
            ]));
        }
        App::new(runtime)
    }

    fn open_tab(app: &mut App, tab: Tab) {
        while app.current_tab() != tab {
            press(app, KeyCode::Tab);
        }
    }

    #[test]
    fn tabs_cycle_through_map_and_every_editor() {
        let mut app = test_app();
        assert_eq!(app.tabs().len(), 10);
        assert_eq!(app.current_tab(), Tab::Map);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_tab(), Tab::Records(EditorKind::Terrain));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_tab(), Tab::Map);
    }

    #[test]
    fn records_are_created_and_edited_from_the_keyboard() {
        let mut app = test_app();
        open_tab(&mut app, Tab::Records(EditorKind::Enemy));

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "slime");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_id().as_deref(), Some("slime"));
        assert!(app.has_unsaved_changes());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus(), Focus::Fields);
        let name = app.fields().iter().position(|(c, _)| c == "name").unwrap();
        for _ in 0..name {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Green Slime");
        press(&mut app, KeyCode::Enter);

        let editor = app.runtime().editor(EditorKind::Enemy);
        assert_eq!(
            editor.get(app.runtime().database(), "slime").unwrap().get("name"),
            "Green Slime"
        );
    }

    #[test]
    fn duplicate_ids_are_reported_in_the_status_line() {
        let mut app = test_app();
        open_tab(&mut app, Tab::Records(EditorKind::Item));
        for _ in 0..2 {
            press(&mut app, KeyCode::Char('n'));
            type_text(&mut app, "potion");
            press(&mut app, KeyCode::Enter);
        }
        assert!(app.status().starts_with("ERROR"));
        assert_eq!(app.labels().len(), 1);
    }

    #[test]
    fn invalid_choice_is_rejected_and_row_kept() {
        let mut app = test_app();
        open_tab(&mut app, Tab::Records(EditorKind::Enemy));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "wolf");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        let tier = app.fields().iter().position(|(c, _)| c == "tier").unwrap();
        for _ in 0..tier {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "X");
        press(&mut app, KeyCode::Enter);

        assert!(app.status().starts_with("ERROR"));
        assert_eq!(app.fields()[tier].1, "NORMAL");
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut app = test_app();
        open_tab(&mut app, Tab::Records(EditorKind::Skill));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "fireball");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.labels().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.labels().is_empty());
    }

    #[test]
    fn painting_and_placing_on_the_canvas() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "village");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.focus(), Focus::Canvas);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor(), (1, 1));

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.brush().as_deref(), Some("WATER"));
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.entity_type(), EntityType::Enemy);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "slime");
        press(&mut app, KeyCode::Enter);

        let editor = app.runtime().map_editor();
        let db = app.runtime().database();
        assert_eq!(editor.terrain_at(db, "village", 1, 1).unwrap(), "WATER");
        let cell = editor.cell_info(db, "village", 1, 1).unwrap();
        assert_eq!(cell.entities.len(), 1);
        assert_eq!(cell.entities[0].instance_id, "slime_1_1_0");
    }

    #[test]
    fn cursor_stays_inside_the_map() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "tiny");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor(), (0, 0));
        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.cursor(), (9, 0));
    }

    #[test]
    fn clicking_the_grid_moves_the_cursor() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "village");
        press(&mut app, KeyCode::Enter);
        let (_, height) = app
            .runtime()
            .map_editor()
            .dimensions(app.runtime().database(), "village")
            .unwrap();

        // the row label is not a cell
        app.click_cell(ROW_LABEL_WIDTH - 1, 0);
        assert_eq!(app.focus(), Focus::List);

        app.click_cell(ROW_LABEL_WIDTH + 3 * CELL_WIDTH + 1, 0);
        assert_eq!(app.focus(), Focus::Canvas);
        assert_eq!(app.cursor(), (3, height - 1));

        app.click_cell(ROW_LABEL_WIDTH, u16::try_from(height - 1).unwrap());
        assert_eq!(app.cursor(), (0, 0));

        // below the last row
        app.click_cell(ROW_LABEL_WIDTH, u16::try_from(height).unwrap());
        assert_eq!(app.cursor(), (0, 0));
    }

    #[test]
    fn reload_drops_unsaved_changes_of_the_current_tab() {
        let mut app = test_app();
        open_tab(&mut app, Tab::Records(EditorKind::Item));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "potion");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "elixir");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.labels().len(), 2);
        assert!(app.has_unsaved_changes());

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.has_unsaved_changes());
        assert_eq!(app.labels().len(), 1);
        assert_eq!(app.selected_id().as_deref(), Some("potion"));
    }

    #[test]
    fn quitting_with_unsaved_changes_asks_twice() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "village");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
