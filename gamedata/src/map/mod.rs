//! The map editor: terrain painting, entity placement and waypoint links, plus the
//! geometry needed to draw a map.
pub mod ascii;
pub mod editor;
pub mod grid;
pub mod layout;

pub use editor::{CellInfo, DeletedMap, MapEditor, NewMap, NewWaypoint, PlacedEntity, MAP_PROPERTIES, MAP_TABLES};
pub use grid::{terrain_at, CanvasGeometry, TerrainGrid, TerrainSpan, DEFAULT_CELL_SIZE, MAX_MAP_SIZE};
pub use layout::{marker_layout, Marker};
