//! Plain text rendering of a map, top row first.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::constants::EntityType;
use crate::error::GameDataError;
use crate::map::editor::MapEditor;
use crate::map::grid::TerrainGrid;
use crate::repository::database::GameDatabase;

/// Lower-cased initial of a terrain type
#[must_use]
pub fn terrain_glyph(terrain: &str) -> char {
    terrain
        .chars()
        .next()
        .map_or('?', |c| c.to_ascii_lowercase())
}

/// Glyph of a lone entity, or the number of entities sharing a cell
#[must_use]
pub fn cell_glyph(entities: &[Option<EntityType>]) -> Option<char> {
    match entities {
        [] => None,
        [single] => Some(single.map_or('?', EntityType::glyph)),
        many if many.len() < 10 => char::from_digit(u32::try_from(many.len()).unwrap_or(9), 10),
        _ => Some('+'),
    }
}

/// Draws `grid` with one character per cell: the lower-cased initial of the terrain,
/// the glyph of a lone entity, or the number of entities sharing the cell.
/// Unknown entity types are drawn as `?`.
#[must_use]
pub fn render(grid: &TerrainGrid, entities: &BTreeMap<(i64, i64), Vec<Option<EntityType>>>) -> String {
    let mut out = String::new();
    for y in (0..grid.height()).rev() {
        let _ = write!(out, "{y:>3} ");
        for x in 0..grid.width() {
            let glyph = entities
                .get(&(x, y))
                .and_then(|e| cell_glyph(e))
                .unwrap_or_else(|| terrain_glyph(grid.get(x, y).unwrap_or("")));
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }

    out.push_str("    ");
    for x in 0..grid.width() {
        let _ = write!(out, "{} ", x % 10);
    }
    out.push('\n');

    let terrains: BTreeSet<&str> = (0..grid.height())
        .flat_map(|y| (0..grid.width()).filter_map(move |x| grid.get(x, y)))
        .collect();
    let legend: Vec<String> = terrains
        .iter()
        .map(|t| format!("{}={t}", terrain_glyph(t)))
        .chain(EntityType::ALL.iter().map(|e| format!("{}={e}", e.glyph())))
        .collect();
    let _ = writeln!(out, "{}", legend.join("  "));
    out
}

/// Renders a stored map with its entities.
///
/// # Errors
/// `NotFound` for an unknown map, `InvalidValue` for a map without a usable size.
pub fn render_map(db: &GameDatabase, map_id: &str) -> Result<String, GameDataError> {
    let editor = MapEditor::new();
    let grid = editor.terrain_grid(db, map_id)?;
    let entities = editor
        .entity_groups(db, map_id)
        .into_iter()
        .map(|(cell, rows)| {
            let types = rows
                .iter()
                .map(|r| r.get("entityType").parse::<EntityType>().ok())
                .collect();
            (cell, types)
        })
        .collect();
    Ok(render(&grid, &entities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::grid::TerrainSpan;

    #[test]
    fn top_row_is_printed_first() {
        let spans = vec![TerrainSpan {
            x1: 0,
            y1: 1,
            x2: 1,
            y2: 1,
            terrain: "WATER".to_string(),
        }];
        let grid = TerrainGrid::build(3, 2, "GRASS", &spans).unwrap();
        let mut entities = BTreeMap::new();
        entities.insert((2, 0), vec![Some(EntityType::Enemy)]);
        entities.insert((0, 0), vec![Some(EntityType::Npc), None, Some(EntityType::Enemy)]);

        let text = render(&grid, &entities);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  1 w w g ");
        assert_eq!(lines[1], "  0 3 g E ");
        assert_eq!(lines[2], "    0 1 2 ");
        assert!(lines[3].starts_with("g=GRASS  w=WATER  W=WAYPOINT"));
    }

    #[test]
    fn crowded_cells_use_a_plus() {
        assert_eq!(cell_glyph(&[Some(EntityType::Campfire); 12]), Some('+'));
        assert_eq!(cell_glyph(&[None]), Some('?'));
        assert_eq!(cell_glyph(&[]), None);
    }
}
