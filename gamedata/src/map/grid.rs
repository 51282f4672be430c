//! Terrain resolution and canvas coordinates.
//!
//! Map cells are addressed with `y = 0` at the bottom row, while the canvas has its
//! origin in the top left corner, hence the Y-flip in [`CanvasGeometry`].
use crate::error::GameDataError;
use crate::types::Row;

/// Default edge length of a cell on the canvas, in pixels
pub const DEFAULT_CELL_SIZE: i64 = 30;

/// Largest width or height of a map, in cells
pub const MAX_MAP_SIZE: i64 = 1000;

/// A rectangle of cells (inclusive on both ends) overriding the map's default terrain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainSpan {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
    pub terrain: String,
}

impl TerrainSpan {
    /// Reads a `map_terrain` row. Only the first of the comma separated terrain types
    /// is used. Rows with malformed coordinates yield `None`.
    #[must_use]
    pub fn from_row(row: &Row) -> Option<Self> {
        let terrain = row
            .get("terrainTypes")
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        Some(TerrainSpan {
            x1: row.get_i64("x1")?,
            y1: row.get_i64("y1")?,
            x2: row.get_i64("x2")?,
            y2: row.get_i64("y2")?,
            terrain,
        })
    }

    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    #[must_use]
    pub fn is_single_cell(&self, x: i64, y: i64) -> bool {
        self.x1 == x && self.x2 == x && self.y1 == y && self.y2 == y
    }
}

/// Terrain of cell `(x, y)`: the last span covering the cell wins, otherwise `default`.
/// Spans without a terrain name fall back to `default` as well.
#[must_use]
pub fn terrain_at<'a>(spans: &'a [TerrainSpan], default: &'a str, x: i64, y: i64) -> &'a str {
    spans
        .iter()
        .rev()
        .find(|s| s.contains(x, y))
        .map(|s| s.terrain.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(default)
}

fn check_size(field: &str, value: i64) -> Result<i64, GameDataError> {
    if value > MAX_MAP_SIZE {
        return Err(GameDataError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            allowed: format!("at most {MAX_MAP_SIZE}"),
        });
    }
    Ok(value.max(0))
}

/// Terrain of every cell of a map, rows stored bottom (`y = 0`) first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    width: i64,
    height: i64,
    cells: Vec<String>,
}

impl TerrainGrid {
    /// Fills a `width` × `height` grid with `default` and paints the spans in order.
    /// Parts of spans outside the map are ignored.
    ///
    /// # Errors
    /// `InvalidValue` when a side is larger than [`MAX_MAP_SIZE`].
    pub fn build(
        width: i64,
        height: i64,
        default: &str,
        spans: &[TerrainSpan],
    ) -> Result<Self, GameDataError> {
        let width = check_size("width", width)?;
        let height = check_size("height", height)?;
        let count = width
            .checked_mul(height)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| GameDataError::InvalidValue {
                field: "size".to_string(),
                value: format!("{width}x{height}"),
                allowed: format!("at most {MAX_MAP_SIZE}x{MAX_MAP_SIZE}"),
            })?;
        let mut cells = vec![default.to_string(); count];

        for span in spans {
            let terrain = if span.terrain.is_empty() {
                default
            } else {
                span.terrain.as_str()
            };
            for y in span.y1.max(0)..=span.y2.min(height - 1) {
                for x in span.x1.max(0)..=span.x2.min(width - 1) {
                    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                    let index = (y * width + x) as usize;
                    cells[index] = terrain.to_string();
                }
            }
        }

        Ok(TerrainGrid {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        self.height
    }

    #[must_use]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<&str> {
        if !self.in_bounds(x, y) {
            return None;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        self.cells
            .get((y * self.width + x) as usize)
            .map(String::as_str)
    }
}

/// Pixel geometry of a map drawn with square cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub cell_size: i64,
    pub width: i64,
    pub height: i64,
}

impl CanvasGeometry {
    #[must_use]
    pub fn new(width: i64, height: i64) -> Self {
        CanvasGeometry {
            cell_size: DEFAULT_CELL_SIZE,
            width,
            height,
        }
    }

    #[must_use]
    pub fn with_cell_size(mut self, cell_size: i64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Width and height of the drawn grid in pixels
    #[must_use]
    pub fn canvas_size(&self) -> (i64, i64) {
        (self.width * self.cell_size, self.height * self.cell_size)
    }

    /// Top left pixel of cell `(x, y)`
    #[must_use]
    pub fn cell_origin(&self, x: i64, y: i64) -> (i64, i64) {
        (x * self.cell_size, (self.height - 1 - y) * self.cell_size)
    }

    #[must_use]
    pub fn cell_center(&self, x: i64, y: i64) -> (i64, i64) {
        let (px, py) = self.cell_origin(x, y);
        (px + self.cell_size / 2, py + self.cell_size / 2)
    }

    /// Cell under the pixel `(px, py)`, or `None` outside the map
    #[must_use]
    pub fn pixel_to_cell(&self, px: i64, py: i64) -> Option<(i64, i64)> {
        if self.cell_size <= 0 {
            return None;
        }
        let x = px.div_euclid(self.cell_size);
        let y = self.height - 1 - py.div_euclid(self.cell_size);
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            Some((x, y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(x1: i64, y1: i64, x2: i64, y2: i64, terrain: &str) -> TerrainSpan {
        TerrainSpan {
            x1,
            y1,
            x2,
            y2,
            terrain: terrain.to_string(),
        }
    }

    #[test]
    fn last_overlapping_span_wins() {
        let spans = vec![span(0, 0, 4, 4, "WATER"), span(2, 2, 3, 3, "SAND")];
        assert_eq!(terrain_at(&spans, "GRASS", 2, 2), "SAND");
        assert_eq!(terrain_at(&spans, "GRASS", 1, 1), "WATER");
        assert_eq!(terrain_at(&spans, "GRASS", 5, 5), "GRASS");
    }

    #[test]
    fn grid_matches_point_resolution() {
        let spans = vec![
            span(-2, -2, 1, 1, "ROCK"),
            span(1, 0, 8, 0, "WATER"),
            span(0, 0, 0, 0, "TREE"),
        ];
        let grid = TerrainGrid::build(4, 3, "GRASS", &spans).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(grid.get(x, y), Some(terrain_at(&spans, "GRASS", x, y)));
            }
        }
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, -1), None);
    }

    #[test]
    fn span_reads_first_terrain_type() {
        let row = Row::from_pairs([
            ("mapId", "town"),
            ("x1", "1"),
            ("y1", "2"),
            ("x2", "3"),
            ("y2", "4"),
            ("terrainTypes", "WATER,SAND"),
        ]);
        let parsed = TerrainSpan::from_row(&row).expect("valid span");
        assert_eq!(parsed, span(1, 2, 3, 4, "WATER"));

        let broken = Row::from_pairs([("x1", "a"), ("y1", "0"), ("x2", "0"), ("y2", "0")]);
        assert!(TerrainSpan::from_row(&broken).is_none());
    }

    #[test]
    fn empty_terrain_falls_back_to_default() {
        let spans = vec![span(0, 0, 0, 0, "")];
        assert_eq!(terrain_at(&spans, "GRASS", 0, 0), "GRASS");
        assert_eq!(TerrainGrid::build(1, 1, "GRASS", &spans).unwrap().get(0, 0), Some("GRASS"));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert!(matches!(
            TerrainGrid::build(1 << 32, 1 << 32, "GRASS", &[]),
            Err(GameDataError::InvalidValue { .. })
        ));
        assert!(TerrainGrid::build(MAX_MAP_SIZE + 1, 1, "GRASS", &[]).is_err());
        let grid = TerrainGrid::build(MAX_MAP_SIZE, 2, "GRASS", &[]).unwrap();
        assert_eq!(grid.get(MAX_MAP_SIZE - 1, 1), Some("GRASS"));
    }

    #[test]
    fn canvas_is_flipped_vertically() {
        let geometry = CanvasGeometry::new(10, 5);
        assert_eq!(geometry.cell_origin(0, 0), (0, 120));
        assert_eq!(geometry.cell_origin(2, 4), (60, 0));
        assert_eq!(geometry.cell_center(0, 0), (15, 135));
        assert_eq!(geometry.canvas_size(), (300, 150));
    }

    #[test]
    fn pixels_map_back_to_cells() {
        let geometry = CanvasGeometry::new(10, 5);
        assert_eq!(geometry.pixel_to_cell(0, 149), Some((0, 0)));
        assert_eq!(geometry.pixel_to_cell(299, 0), Some((9, 4)));
        assert_eq!(geometry.pixel_to_cell(300, 0), None);
        assert_eq!(geometry.pixel_to_cell(-1, 10), None);
        assert_eq!(geometry.pixel_to_cell(10, 150), None);

        for y in 0..5 {
            for x in 0..10 {
                let (cx, cy) = geometry.cell_center(x, y);
                assert_eq!(geometry.pixel_to_cell(cx, cy), Some((x, y)));
            }
        }
    }
}
