#[allow(dead_code)]
mod test_helpers;

use gamedata::constants::EntityType;
use gamedata::error::GameDataError;
use gamedata::map::{ascii, DeletedMap, NewMap};
use test_helpers::common::{create_sample_runtime, open_runtime};
use test_helpers::fixtures::TEST_MAP_ID;

#[test]
fn terrain_is_resolved_from_spans_and_default() -> Result<(), GameDataError> {
    let (_dir, runtime) = create_sample_runtime()?;
    let maps = runtime.map_editor();
    let db = runtime.database();

    assert_eq!(maps.terrain_at(db, TEST_MAP_ID, 0, 0)?, "SAND");
    assert_eq!(maps.terrain_at(db, TEST_MAP_ID, 4, 0)?, "WATER");
    assert_eq!(maps.terrain_at(db, TEST_MAP_ID, 5, 3)?, "WATER");
    assert_eq!(maps.terrain_at(db, TEST_MAP_ID, 3, 3)?, "GRASS");
    assert_eq!(maps.terrain_at(db, "dark_forest", 0, 0)?, "TREE");
    assert_eq!(maps.terrain_at(db, "dark_forest", 1, 1)?, "GRASS");
    assert!(matches!(
        maps.terrain_at(db, TEST_MAP_ID, 6, 0),
        Err(GameDataError::OutOfBounds { .. })
    ));

    let grid = maps.terrain_grid(db, TEST_MAP_ID)?;
    assert_eq!((grid.width(), grid.height()), (6, 4));
    assert_eq!(grid.get(4, 3), Some("WATER"));
    Ok(())
}

#[test]
fn ascii_rendering_shows_entities() -> Result<(), GameDataError> {
    let (_dir, runtime) = create_sample_runtime()?;
    let text = ascii::render_map(runtime.database(), TEST_MAP_ID)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "  3 W g g g w w ");
    assert_eq!(lines[1], "  2 g N 2 g w w ");
    assert_eq!(lines[2], "  1 g g g g w w ");
    assert_eq!(lines[3], "  0 s s s s w w ");
    assert_eq!(lines[4], "    0 1 2 3 4 5 ");
    Ok(())
}

#[test]
fn edits_survive_save_and_reload() -> Result<(), GameDataError> {
    let (dir, mut runtime) = create_sample_runtime()?;
    let maps = runtime.map_editor();

    maps.set_terrain(runtime.database_mut(), TEST_MAP_ID, 3, 3, "TREE")?;
    let slime = maps.add_entity(runtime.database_mut(), TEST_MAP_ID, 2, 2, EntityType::Enemy, "slime")?;
    assert_eq!(slime.get("instanceId"), "slime_2_2_2");
    maps.new_map(runtime.database_mut(), &NewMap::new("cave", "洞穴"))?;
    maps.save(runtime.database())?;

    let reopened = open_runtime(dir.path())?;
    let db = reopened.database();
    assert_eq!(maps.terrain_at(db, TEST_MAP_ID, 3, 3)?, "TREE");
    assert_eq!(maps.entities_at(db, TEST_MAP_ID, 2, 2).len(), 3);
    assert_eq!(maps.dimensions(db, "cave")?, (10, 10));
    assert_eq!(maps.map_name(db, "cave"), "洞穴");
    Ok(())
}

#[test]
fn cell_info_and_entity_details() -> Result<(), GameDataError> {
    let (_dir, runtime) = create_sample_runtime()?;
    let maps = runtime.map_editor();
    let db = runtime.database();

    let info = maps.cell_info(db, TEST_MAP_ID, 2, 2)?;
    assert_eq!(info.terrain, "GRASS");
    assert_eq!(info.entities.len(), 2);
    assert_eq!(info.entities[1].instance_id, "slime_2_2_1");

    let rows = maps.entities_at(db, TEST_MAP_ID, 2, 2);
    let details = maps.entity_details(db, rows[0]);
    assert!(details.contains(&("Name".to_string(), "史莱姆".to_string())));
    assert!(details.contains(&("Level".to_string(), "3".to_string())));

    let gate = maps.entities_at(db, TEST_MAP_ID, 0, 3);
    let details = maps.entity_details(db, gate[0]);
    assert!(details.contains(&("Connections".to_string(), "forest_edge".to_string())));
    Ok(())
}

#[test]
fn deleting_a_map_removes_everything_on_it() -> Result<(), GameDataError> {
    let (dir, mut runtime) = create_sample_runtime()?;
    let maps = runtime.map_editor();

    assert_eq!(maps.map_name(runtime.database(), "dark_forest"), "dark_forest");
    let deleted = maps.delete_map(runtime.database_mut(), "dark_forest")?;
    assert_eq!(
        deleted,
        DeletedMap {
            spans: 1,
            entities: 1,
            waypoints: 1
        }
    );
    maps.save(runtime.database())?;

    let reopened = open_runtime(dir.path())?;
    assert_eq!(maps.labels(reopened.database()), vec!["starter_village - 新手村"]);
    assert_eq!(
        maps.entity_id_options(reopened.database(), EntityType::Waypoint),
        vec!["village_gate"]
    );
    assert_eq!(maps.spans(reopened.database(), TEST_MAP_ID).len(), 2);
    Ok(())
}
