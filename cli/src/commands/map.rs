use gamedata::error::GameDataError;
use gamedata::map::{ascii, MapEditor, NewMap, NewWaypoint};
use gamedata::ApplicationRuntime;

use crate::cli::{Map, MapCommand, NewMapArgs};
use crate::commands::parse_fields;

impl From<NewMapArgs> for NewMap {
    fn from(args: NewMapArgs) -> Self {
        NewMap {
            id: args.id,
            name: args.name,
            description: args.description,
            width: args.width,
            height: args.height,
            recommended_level: args.level,
            is_safe: !args.unsafe_area,
            default_terrain: args.terrain,
        }
    }
}

#[allow(clippy::too_many_lines)]
pub fn execute(runtime: &mut ApplicationRuntime, map: Map) -> Result<(), GameDataError> {
    let editor = runtime.map_editor();

    match map.cmd {
        MapCommand::List => {
            for label in editor.labels(runtime.database()) {
                println!("{label}");
            }
        }
        MapCommand::Show { map } => {
            let row = editor.map(runtime.database(), &map)?;
            println!(
                "{} ({}x{}, level {}, {})",
                editor.map_name(runtime.database(), &map),
                row.get("width"),
                row.get("height"),
                row.get("recommendedLevel"),
                if row.get_bool("isSafe", true) { "safe" } else { "combat" }
            );
            print!("{}", ascii::render_map(runtime.database(), &map)?);
        }
        MapCommand::New(args) => {
            let row = editor.new_map(runtime.database_mut(), &args.into())?;
            editor.save(runtime.database())?;
            println!("Created map {}", row.id());
        }
        MapCommand::Set { map, fields } => {
            let fields = parse_fields(&fields)?;
            editor.update_properties(runtime.database_mut(), &map, &fields)?;
            editor.save(runtime.database())?;
            println!("Saved map {map}");
        }
        MapCommand::Delete { map } => {
            let deleted = editor.delete_map(runtime.database_mut(), &map)?;
            editor.save(runtime.database())?;
            println!(
                "Deleted map {map} with {} terrain spans, {} entities and {} waypoints",
                deleted.spans, deleted.entities, deleted.waypoints
            );
        }
        MapCommand::Paint { map, x, y, terrain } => {
            editor.set_terrain(runtime.database_mut(), &map, x, y, &terrain)?;
            editor.save(runtime.database())?;
            println!("({x}, {y}) is now {terrain}");
        }
        MapCommand::Place {
            map,
            x,
            y,
            entity_type,
            entity_id,
        } => {
            let row = editor.add_entity(
                runtime.database_mut(),
                &map,
                x,
                y,
                entity_type.into(),
                &entity_id,
            )?;
            editor.save(runtime.database())?;
            println!(
                "Placed {} {} at ({x}, {y})",
                row.get("entityType"),
                row.get("entityId")
            );
        }
        MapCommand::Cell { map, x, y } => print_cell(runtime, &editor, &map, x, y)?,
        MapCommand::Remove {
            map,
            x,
            y,
            index,
            all,
        } => {
            if all {
                let removed = editor.delete_all_entities_at(runtime.database_mut(), &map, x, y)?;
                println!("Removed {removed} entities from ({x}, {y})");
            } else {
                let row =
                    editor.delete_entity(runtime.database_mut(), &map, x, y, index.unwrap_or(0))?;
                println!(
                    "Removed {} {} from ({x}, {y})",
                    row.get("entityType"),
                    row.get("entityId")
                );
            }
            editor.save(runtime.database())?;
        }
        MapCommand::Options { entity_type } => {
            for option in editor.entity_id_options(runtime.database(), entity_type.into()) {
                println!("{option}");
            }
        }
        MapCommand::Waypoint(args) => {
            let new = NewWaypoint {
                id: args.id,
                map_id: args.map,
                name: args.name,
                description: args.description,
                x: args.x,
                y: args.y,
            };
            let row = editor.add_waypoint(runtime.database_mut(), &new)?;
            editor.save(runtime.database())?;
            println!("Created waypoint {}", row.id());
            println!(
                "To show it on the map: clawedit map place {} {} {} waypoint {}",
                new.map_id,
                new.x,
                new.y,
                row.id()
            );
        }
        MapCommand::Connect { waypoint, targets } => {
            let joined = editor.set_waypoint_connections(runtime.database_mut(), &waypoint, &targets)?;
            editor.save(runtime.database())?;
            if joined.is_empty() {
                println!("{waypoint} has no connections");
            } else {
                println!("{waypoint} connects to {joined}");
            }
        }
    }
    Ok(())
}

fn print_cell(
    runtime: &ApplicationRuntime,
    editor: &MapEditor,
    map: &str,
    x: i64,
    y: i64,
) -> Result<(), GameDataError> {
    let db = runtime.database();
    let info = editor.cell_info(db, map, x, y)?;
    println!("Position: ({}, {})", info.x, info.y);
    println!("Terrain: {}", info.terrain);
    if info.entities.is_empty() {
        println!("No entities");
        return Ok(());
    }
    for (index, entity) in editor.entities_at(db, map, x, y).into_iter().enumerate() {
        println!("#{index}");
        for (label, value) in editor.entity_details(db, entity) {
            println!("  {label}: {value}");
        }
    }
    Ok(())
}
