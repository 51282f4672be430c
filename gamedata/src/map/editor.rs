use std::collections::BTreeMap;

use log::{debug, info};

use crate::constants::{EntityType, TerrainPalette, BOOLEANS, DEFAULT_TERRAIN};
use crate::editor::check_choice;
use crate::error::GameDataError;
use crate::map::grid::{self, TerrainGrid, TerrainSpan, MAX_MAP_SIZE};
use crate::repository::database::GameDatabase;
use crate::schema::TableKind;
use crate::types::Row;

/// Tables written when the map editor saves
pub const MAP_TABLES: [TableKind; 4] = [
    TableKind::Maps,
    TableKind::MapTerrain,
    TableKind::MapEntities,
    TableKind::Waypoints,
];

/// Map columns which may be changed after creation
pub const MAP_PROPERTIES: &[&str] = &[
    "name",
    "description",
    "width",
    "height",
    "recommendedLevel",
    "isSafe",
    "defaultTerrain",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMap {
    pub id: String,
    pub name: String,
    pub description: String,
    pub width: String,
    pub height: String,
    pub recommended_level: String,
    pub is_safe: bool,
    pub default_terrain: String,
}

impl Default for NewMap {
    fn default() -> Self {
        NewMap {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            width: "10".to_string(),
            height: "10".to_string(),
            recommended_level: "1".to_string(),
            is_safe: true,
            default_terrain: DEFAULT_TERRAIN.to_string(),
        }
    }
}

impl NewMap {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        NewMap {
            id: id.into(),
            name: name.into(),
            ..NewMap::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaypoint {
    pub id: String,
    pub map_id: String,
    pub name: String,
    pub description: String,
    pub x: i64,
    pub y: i64,
}

/// An entity placed on a cell, as listed in the cell information panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEntity {
    pub entity_type: String,
    pub entity_id: String,
    pub instance_id: String,
}

impl PlacedEntity {
    fn from_row(row: &Row) -> Self {
        PlacedEntity {
            entity_type: row.get("entityType").to_string(),
            entity_id: row.get("entityId").to_string(),
            instance_id: row.get("instanceId").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInfo {
    pub x: i64,
    pub y: i64,
    pub terrain: String,
    pub entities: Vec<PlacedEntity>,
}

/// Number of rows removed from each table when a map is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedMap {
    pub spans: usize,
    pub entities: usize,
    pub waypoints: usize,
}

/// Operations of the map editor. Coordinates are cell indices with `(0, 0)` in the
/// bottom left corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapEditor;

fn parse_dimension(field: &str, value: &str) -> Result<i64, GameDataError> {
    match value.trim().parse::<i64>() {
        Ok(v) if (1..=MAX_MAP_SIZE).contains(&v) => Ok(v),
        _ => Err(GameDataError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            allowed: format!("an integer from 1 to {MAX_MAP_SIZE}"),
        }),
    }
}

fn parse_integer(field: &str, value: &str) -> Result<i64, GameDataError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| GameDataError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            allowed: "an integer".to_string(),
        })
}

fn map_not_found(map_id: &str) -> GameDataError {
    GameDataError::NotFound {
        label: "map".to_string(),
        id: map_id.to_string(),
    }
}

fn is_at(row: &Row, map_id: &str, x: i64, y: i64) -> bool {
    row.get("mapId") == map_id && row.get_i64("x") == Some(x) && row.get_i64("y") == Some(y)
}

impl MapEditor {
    #[must_use]
    pub fn new() -> Self {
        MapEditor
    }

    #[must_use]
    pub fn maps<'d>(&self, db: &'d GameDatabase) -> Vec<&'d Row> {
        db.table(TableKind::Maps).rows.iter().collect()
    }

    /// `id - name` for every map
    #[must_use]
    pub fn labels(&self, db: &GameDatabase) -> Vec<String> {
        self.maps(db)
            .into_iter()
            .map(|r| format!("{} - {}", r.id(), r.get("name")))
            .collect()
    }

    /// # Errors
    /// `NotFound` for an unknown map.
    pub fn map<'d>(&self, db: &'d GameDatabase, map_id: &str) -> Result<&'d Row, GameDataError> {
        db.table(TableKind::Maps)
            .find(map_id)
            .ok_or_else(|| map_not_found(map_id))
    }

    /// Display name of a map, falling back to its id
    #[must_use]
    pub fn map_name(&self, db: &GameDatabase, map_id: &str) -> String {
        db.table(TableKind::Maps)
            .find(map_id)
            .map(|r| r.get("name"))
            .filter(|name| !name.is_empty())
            .unwrap_or(map_id)
            .to_string()
    }

    /// Width and height of a map.
    ///
    /// # Errors
    /// `NotFound` for an unknown map, `InvalidValue` if the stored size is not usable.
    pub fn dimensions(&self, db: &GameDatabase, map_id: &str) -> Result<(i64, i64), GameDataError> {
        let map = self.map(db, map_id)?;
        Ok((
            parse_dimension("width", map.get("width"))?,
            parse_dimension("height", map.get("height"))?,
        ))
    }

    #[must_use]
    pub fn palette(&self, db: &GameDatabase) -> TerrainPalette {
        TerrainPalette::from_table(db.table(TableKind::TerrainTypes))
    }

    fn check_terrain(&self, db: &GameDatabase, terrain: &str) -> Result<(), GameDataError> {
        let palette = self.palette(db);
        if palette.contains(terrain) {
            Ok(())
        } else {
            Err(GameDataError::InvalidValue {
                field: "terrain".to_string(),
                value: terrain.to_string(),
                allowed: palette.types.join(", "),
            })
        }
    }

    /// Map defaults are only checked once the terrain table has entries
    fn check_default_terrain(&self, db: &GameDatabase, terrain: &str) -> Result<(), GameDataError> {
        if db.table(TableKind::TerrainTypes).is_empty() {
            return Ok(());
        }
        self.check_terrain(db, terrain)
    }

    fn check_in_bounds(
        &self,
        db: &GameDatabase,
        map_id: &str,
        x: i64,
        y: i64,
    ) -> Result<(), GameDataError> {
        let (width, height) = self.dimensions(db, map_id)?;
        if (0..width).contains(&x) && (0..height).contains(&y) {
            Ok(())
        } else {
            Err(GameDataError::OutOfBounds {
                map_id: map_id.to_string(),
                x,
                y,
            })
        }
    }

    /// Validates one map property the way the property form does
    fn check_property(&self, db: &GameDatabase, field: &str, value: &str) -> Result<(), GameDataError> {
        match field {
            "width" | "height" => parse_dimension(field, value).map(|_| ()),
            "recommendedLevel" => parse_integer(field, value).map(|_| ()),
            "isSafe" => check_choice(field, value, BOOLEANS),
            "defaultTerrain" => self.check_default_terrain(db, value),
            "name" | "description" => Ok(()),
            _ => Err(GameDataError::BadInput(format!(
                "map property '{field}' cannot be edited"
            ))),
        }
    }

    /// Creates a map row.
    ///
    /// # Errors
    /// * `MissingField` for a blank id
    /// * `DuplicateId` if the id is taken
    /// * `InvalidValue` for a malformed size or level or an unknown default terrain
    pub fn new_map(&self, db: &mut GameDatabase, new: &NewMap) -> Result<Row, GameDataError> {
        let id = new.id.trim().to_string();
        if id.is_empty() {
            return Err(GameDataError::MissingField("map id".to_string()));
        }
        if db.table(TableKind::Maps).contains_id(&id) {
            return Err(GameDataError::DuplicateId {
                label: "map".to_string(),
                id,
            });
        }
        let width = parse_dimension("width", &new.width)?;
        let height = parse_dimension("height", &new.height)?;
        let level = parse_integer("recommendedLevel", &new.recommended_level)?;
        self.check_default_terrain(db, &new.default_terrain)?;

        let row = Row::from_pairs([
            ("id", id.clone()),
            ("name", new.name.clone()),
            ("description", new.description.clone()),
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("isSafe", new.is_safe.to_string()),
            ("recommendedLevel", level.to_string()),
            ("defaultTerrain", new.default_terrain.clone()),
        ]);
        db.table_mut(TableKind::Maps).push(row.clone());
        info!("Created map {id} ({width}x{height})");
        Ok(row)
    }

    /// Changes the editable properties of a map, see [`MAP_PROPERTIES`].
    ///
    /// # Errors
    /// `NotFound` for an unknown map; `BadInput` or `InvalidValue` for a field which
    /// cannot take the given value. Nothing is written unless every field is valid.
    pub fn update_properties(
        &self,
        db: &mut GameDatabase,
        map_id: &str,
        fields: &[(String, String)],
    ) -> Result<(), GameDataError> {
        self.map(db, map_id)?;
        for (field, value) in fields {
            self.check_property(db, field, value)?;
        }
        let row = db
            .table_mut(TableKind::Maps)
            .find_mut(map_id)
            .ok_or_else(|| map_not_found(map_id))?;
        for (field, value) in fields {
            let value = match field.as_str() {
                "width" | "height" | "recommendedLevel" => value.trim().to_string(),
                _ => value.clone(),
            };
            row.set(field.as_str(), value);
        }
        debug!("Updated {} properties of map {map_id}", fields.len());
        Ok(())
    }

    /// Removes a map with its terrain spans, entities and waypoints.
    ///
    /// # Errors
    /// `NotFound` for an unknown map.
    pub fn delete_map(&self, db: &mut GameDatabase, map_id: &str) -> Result<DeletedMap, GameDataError> {
        self.map(db, map_id)?;
        db.table_mut(TableKind::Maps).remove_where(|r| r.id() == map_id);
        let on_map = |r: &Row| r.get("mapId") == map_id;
        let deleted = DeletedMap {
            spans: db.table_mut(TableKind::MapTerrain).remove_where(on_map),
            entities: db.table_mut(TableKind::MapEntities).remove_where(on_map),
            waypoints: db.table_mut(TableKind::Waypoints).remove_where(on_map),
        };
        info!("Deleted map {map_id}: {deleted:?}");
        Ok(deleted)
    }

    /// Terrain spans of a map in file order; malformed rows are skipped
    #[must_use]
    pub fn spans(&self, db: &GameDatabase, map_id: &str) -> Vec<TerrainSpan> {
        db.table(TableKind::MapTerrain)
            .rows
            .iter()
            .filter(|r| r.get("mapId") == map_id)
            .filter_map(TerrainSpan::from_row)
            .collect()
    }

    fn default_terrain<'d>(&self, map: &'d Row) -> &'d str {
        let terrain = map.get("defaultTerrain");
        if terrain.is_empty() {
            DEFAULT_TERRAIN
        } else {
            terrain
        }
    }

    /// # Errors
    /// `NotFound` for an unknown map, `InvalidValue` for a map without a usable size.
    pub fn terrain_grid(&self, db: &GameDatabase, map_id: &str) -> Result<TerrainGrid, GameDataError> {
        let (width, height) = self.dimensions(db, map_id)?;
        let map = self.map(db, map_id)?;
        let spans = self.spans(db, map_id);
        TerrainGrid::build(width, height, self.default_terrain(map), &spans)
    }

    /// # Errors
    /// `NotFound` for an unknown map, `OutOfBounds` for a cell outside it.
    pub fn terrain_at(
        &self,
        db: &GameDatabase,
        map_id: &str,
        x: i64,
        y: i64,
    ) -> Result<String, GameDataError> {
        self.check_in_bounds(db, map_id, x, y)?;
        let map = self.map(db, map_id)?;
        let spans = self.spans(db, map_id);
        Ok(grid::terrain_at(&spans, self.default_terrain(map), x, y).to_string())
    }

    /// Paints a single cell: an existing one-cell span at `(x, y)` is updated,
    /// otherwise a new span is appended.
    ///
    /// # Errors
    /// * `NotFound` for an unknown map
    /// * `OutOfBounds` for a cell outside the map
    /// * `InvalidValue` for a terrain type missing from the terrain table
    pub fn set_terrain(
        &self,
        db: &mut GameDatabase,
        map_id: &str,
        x: i64,
        y: i64,
        terrain: &str,
    ) -> Result<(), GameDataError> {
        self.check_in_bounds(db, map_id, x, y)?;
        self.check_terrain(db, terrain)?;

        let table = db.table_mut(TableKind::MapTerrain);
        let existing = table.rows.iter().position(|r| {
            r.get("mapId") == map_id
                && TerrainSpan::from_row(r).is_some_and(|s| s.is_single_cell(x, y))
        });
        match existing {
            Some(index) => table.rows[index].set("terrainTypes", terrain),
            None => table.push(Row::from_pairs([
                ("mapId", map_id.to_string()),
                ("x1", x.to_string()),
                ("y1", y.to_string()),
                ("x2", x.to_string()),
                ("y2", y.to_string()),
                ("terrainTypes", terrain.to_string()),
            ])),
        }
        debug!("Set ({x}, {y}) of {map_id} to {terrain}");
        Ok(())
    }

    /// Places an entity on a cell. Enemies get an instance id made of the enemy id,
    /// the cell and a counter of the same enemies already on that cell.
    ///
    /// # Errors
    /// * `NotFound` for an unknown map
    /// * `OutOfBounds` for a cell outside the map
    /// * `MissingField` for a blank entity id
    pub fn add_entity(
        &self,
        db: &mut GameDatabase,
        map_id: &str,
        x: i64,
        y: i64,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Row, GameDataError> {
        self.check_in_bounds(db, map_id, x, y)?;
        let entity_id = entity_id.trim();
        if entity_id.is_empty() {
            return Err(GameDataError::MissingField("entity id".to_string()));
        }

        let instance_id = if entity_type == EntityType::Enemy {
            let same = db
                .table(TableKind::MapEntities)
                .rows
                .iter()
                .filter(|r| {
                    is_at(r, map_id, x, y)
                        && r.get("entityType") == entity_type.as_str()
                        && r.get("entityId") == entity_id
                })
                .count();
            format!("{entity_id}_{x}_{y}_{same}")
        } else {
            String::new()
        };

        let row = Row::from_pairs([
            ("mapId", map_id.to_string()),
            ("x", x.to_string()),
            ("y", y.to_string()),
            ("entityType", entity_type.as_str().to_string()),
            ("entityId", entity_id.to_string()),
            ("instanceId", instance_id),
        ]);
        db.table_mut(TableKind::MapEntities).push(row.clone());
        info!("Placed {entity_type} {entity_id} on {map_id} at ({x}, {y})");
        Ok(row)
    }

    /// Entity rows on a cell, in file order
    #[must_use]
    pub fn entities_at<'d>(&self, db: &'d GameDatabase, map_id: &str, x: i64, y: i64) -> Vec<&'d Row> {
        db.table(TableKind::MapEntities)
            .rows
            .iter()
            .filter(|r| is_at(r, map_id, x, y))
            .collect()
    }

    /// Entity rows of a map grouped by cell
    #[must_use]
    pub fn entity_groups<'d>(&self, db: &'d GameDatabase, map_id: &str) -> BTreeMap<(i64, i64), Vec<&'d Row>> {
        let mut groups: BTreeMap<(i64, i64), Vec<&Row>> = BTreeMap::new();
        for row in &db.table(TableKind::MapEntities).rows {
            if row.get("mapId") != map_id {
                continue;
            }
            if let (Some(x), Some(y)) = (row.get_i64("x"), row.get_i64("y")) {
                groups.entry((x, y)).or_default().push(row);
            }
        }
        groups
    }

    /// # Errors
    /// `NotFound` for an unknown map, `OutOfBounds` for a cell outside it.
    pub fn cell_info(&self, db: &GameDatabase, map_id: &str, x: i64, y: i64) -> Result<CellInfo, GameDataError> {
        let terrain = self.terrain_at(db, map_id, x, y)?;
        Ok(CellInfo {
            x,
            y,
            terrain,
            entities: self
                .entities_at(db, map_id, x, y)
                .into_iter()
                .map(PlacedEntity::from_row)
                .collect(),
        })
    }

    /// Removes the `index`-th entity of a cell, counting as [`MapEditor::entities_at`] does.
    ///
    /// # Errors
    /// `NotFound` if the cell has no entity at `index`.
    pub fn delete_entity(
        &self,
        db: &mut GameDatabase,
        map_id: &str,
        x: i64,
        y: i64,
        index: usize,
    ) -> Result<Row, GameDataError> {
        let table = db.table_mut(TableKind::MapEntities);
        let position = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| is_at(r, map_id, x, y))
            .nth(index)
            .map(|(i, _)| i)
            .ok_or_else(|| GameDataError::NotFound {
                label: "entity".to_string(),
                id: format!("#{index} at ({x}, {y}) on {map_id}"),
            })?;
        let row = table.rows.remove(position);
        info!("Removed {} {} from {map_id} at ({x}, {y})", row.get("entityType"), row.get("entityId"));
        Ok(row)
    }

    /// Removes every entity of a cell and returns how many there were.
    ///
    /// # Errors
    /// `NotFound` if the cell is empty.
    pub fn delete_all_entities_at(
        &self,
        db: &mut GameDatabase,
        map_id: &str,
        x: i64,
        y: i64,
    ) -> Result<usize, GameDataError> {
        let removed = db
            .table_mut(TableKind::MapEntities)
            .remove_where(|r| is_at(r, map_id, x, y));
        if removed == 0 {
            return Err(GameDataError::NotFound {
                label: "entity".to_string(),
                id: format!("any at ({x}, {y}) on {map_id}"),
            });
        }
        info!("Removed {removed} entities from {map_id} at ({x}, {y})");
        Ok(removed)
    }

    /// Ids which can be placed for an entity type
    #[must_use]
    pub fn entity_id_options(&self, db: &GameDatabase, entity_type: EntityType) -> Vec<String> {
        let chests_of = |size: &str| -> Vec<String> {
            db.table(TableKind::Chests)
                .rows
                .iter()
                .filter(|r| r.get("type") == size)
                .map(|r| r.id().to_string())
                .collect()
        };
        match entity_type {
            EntityType::Waypoint => db.table(TableKind::Waypoints).ids(),
            EntityType::Npc => db.table(TableKind::Npcs).ids(),
            EntityType::Enemy => db.table(TableKind::Enemies).ids(),
            EntityType::Campfire => vec!["campfire".to_string()],
            EntityType::ChestSmall => chests_of("SMALL"),
            EntityType::ChestLarge => chests_of("LARGE"),
        }
    }

    /// Label/value pairs describing a placed entity, enriched from the table it refers to
    #[must_use]
    pub fn entity_details(&self, db: &GameDatabase, entity: &Row) -> Vec<(String, String)> {
        let mut details = vec![
            ("Type".to_string(), entity.get("entityType").to_string()),
            ("ID".to_string(), entity.get("entityId").to_string()),
            (
                "Position".to_string(),
                format!("({}, {})", entity.get("x"), entity.get("y")),
            ),
        ];
        if !entity.get("instanceId").is_empty() {
            details.push(("Instance".to_string(), entity.get("instanceId").to_string()));
        }

        let id = entity.get("entityId");
        match entity.get("entityType").parse::<EntityType>() {
            Ok(EntityType::Enemy) => {
                if let Some(enemy) = db.table(TableKind::Enemies).find(id) {
                    details.push(("Name".to_string(), enemy.get("name").to_string()));
                    details.push(("Level".to_string(), enemy.get("level").to_string()));
                }
            }
            Ok(EntityType::Npc) => {
                if let Some(npc) = db.table(TableKind::Npcs).find(id) {
                    details.push(("Name".to_string(), npc.get("name").to_string()));
                }
            }
            Ok(EntityType::ChestSmall | EntityType::ChestLarge) => {
                if let Some(chest) = db.table(TableKind::Chests).find(id) {
                    details.push(("Name".to_string(), chest.get("name").to_string()));
                }
            }
            Ok(EntityType::Waypoint) => {
                if let Some(waypoint) = db.table(TableKind::Waypoints).find(id) {
                    details.push(("Name".to_string(), waypoint.get("name").to_string()));
                    details.push((
                        "Connections".to_string(),
                        waypoint.get("connectedWaypointIds").to_string(),
                    ));
                }
            }
            Ok(EntityType::Campfire) | Err(_) => {}
        }
        details
    }

    /// Registers a waypoint. Placing it on the map is a separate [`MapEditor::add_entity`].
    ///
    /// # Errors
    /// * `MissingField` for a blank id
    /// * `DuplicateId` if the id is taken
    /// * `NotFound` for an unknown map and `OutOfBounds` for a position outside it
    pub fn add_waypoint(&self, db: &mut GameDatabase, new: &NewWaypoint) -> Result<Row, GameDataError> {
        let id = new.id.trim().to_string();
        if id.is_empty() {
            return Err(GameDataError::MissingField("waypoint id".to_string()));
        }
        if db.table(TableKind::Waypoints).contains_id(&id) {
            return Err(GameDataError::DuplicateId {
                label: "waypoint".to_string(),
                id,
            });
        }
        self.check_in_bounds(db, &new.map_id, new.x, new.y)?;

        let row = Row::from_pairs([
            ("id", id.clone()),
            ("mapId", new.map_id.clone()),
            ("name", new.name.clone()),
            ("description", new.description.clone()),
            ("x", new.x.to_string()),
            ("y", new.y.to_string()),
            ("connectedWaypointIds", String::new()),
        ]);
        db.table_mut(TableKind::Waypoints).push(row.clone());
        info!("Created waypoint {id} on {}", new.map_id);
        Ok(row)
    }

    /// Waypoints reachable from `waypoint_id`.
    ///
    /// # Errors
    /// `NotFound` for an unknown waypoint.
    pub fn waypoint_connections(&self, db: &GameDatabase, waypoint_id: &str) -> Result<Vec<String>, GameDataError> {
        let waypoint = db
            .table(TableKind::Waypoints)
            .find(waypoint_id)
            .ok_or_else(|| GameDataError::NotFound {
                label: "waypoint".to_string(),
                id: waypoint_id.to_string(),
            })?;
        Ok(waypoint
            .get("connectedWaypointIds")
            .split(';')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Replaces the connections of a waypoint. A waypoint is never connected to itself
    /// and duplicates are dropped.
    ///
    /// # Errors
    /// `NotFound` for an unknown waypoint or connection target.
    pub fn set_waypoint_connections(
        &self,
        db: &mut GameDatabase,
        waypoint_id: &str,
        connections: &[String],
    ) -> Result<String, GameDataError> {
        let table = db.table(TableKind::Waypoints);
        if !table.contains_id(waypoint_id) {
            return Err(GameDataError::NotFound {
                label: "waypoint".to_string(),
                id: waypoint_id.to_string(),
            });
        }
        let mut kept: Vec<&str> = Vec::new();
        for target in connections.iter().map(|c| c.trim()) {
            if target.is_empty() || target == waypoint_id || kept.contains(&target) {
                continue;
            }
            if !table.contains_id(target) {
                return Err(GameDataError::NotFound {
                    label: "waypoint".to_string(),
                    id: target.to_string(),
                });
            }
            kept.push(target);
        }
        let joined = kept.join(";");

        if let Some(row) = db.table_mut(TableKind::Waypoints).find_mut(waypoint_id) {
            row.set("connectedWaypointIds", joined.as_str());
        }
        debug!("Waypoint {waypoint_id} connects to [{joined}]");
        Ok(joined)
    }

    /// Writes the map, terrain, entity and waypoint tables.
    ///
    /// # Errors
    /// Fails if any of the tables cannot be written.
    pub fn save(&self, db: &GameDatabase) -> Result<(), GameDataError> {
        db.save(&MAP_TABLES)?;
        info!("Map data saved");
        Ok(())
    }
}
