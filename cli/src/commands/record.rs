use gamedata::editor::{NewRecord, RecordEditor};
use gamedata::error::GameDataError;
use gamedata::ApplicationRuntime;
use log::debug;

use crate::cli::{Record, RecordCommand};
use crate::commands::parse_fields;

pub fn execute(runtime: &mut ApplicationRuntime, record: Record) -> Result<(), GameDataError> {
    let editor = runtime.editor(record.editor.into());
    debug!("Running {:?} on the {} editor", record.editor, editor.kind());

    match record.cmd {
        RecordCommand::List => {
            for label in editor.labels(runtime.database()) {
                println!("{label}");
            }
        }
        RecordCommand::Show { id } => show(runtime, &editor, &id)?,
        RecordCommand::New(args) => {
            let new = NewRecord {
                id: args.id,
                name: args.name,
                description: args.description,
                chest_type: args.chest_type,
                respawn_seconds: args.respawn,
            };
            let row = editor.create(runtime.database_mut(), &new)?;
            editor.save(runtime.database())?;
            println!("Created {} {}", editor.kind().label(), row.id());
        }
        RecordCommand::Set { id, fields } => {
            let fields = parse_fields(&fields)?;
            editor.update(runtime.database_mut(), &id, &fields)?;
            editor.save(runtime.database())?;
            println!("Saved {} {id}", editor.kind().label());
        }
        RecordCommand::Delete { id } => {
            editor.delete(runtime.database_mut(), &id)?;
            editor.save(runtime.database())?;
            println!("Deleted {} {id}", editor.kind().label());
        }
        RecordCommand::Link { id, item, fields } => {
            let fields = parse_fields(&fields)?;
            let row = editor.upsert_link(runtime.database_mut(), &id, &item, &fields)?;
            editor.save(runtime.database())?;
            println!("Linked {}", format_fields(row.fields()));
        }
        RecordCommand::Unlink { id, item } => {
            editor.remove_link(runtime.database_mut(), &id, &item)?;
            editor.save(runtime.database())?;
            println!("Removed {item} from {} {id}", editor.kind().label());
        }
        RecordCommand::Options => {
            for option in editor.link_options(runtime.database()) {
                println!("{option}");
            }
        }
    }
    Ok(())
}

fn show(runtime: &ApplicationRuntime, editor: &RecordEditor, id: &str) -> Result<(), GameDataError> {
    let db = runtime.database();
    let row = editor.get(db, id).ok_or_else(|| GameDataError::NotFound {
        label: editor.kind().label().to_string(),
        id: id.to_string(),
    })?;

    let columns = editor.columns(db);
    let width = columns.iter().map(String::len).max().unwrap_or(0);
    for column in columns {
        println!("{column:<width$} : {}", row.get(column));
    }

    if editor.kind().link().is_some() {
        let links = editor.links(db, id)?;
        println!();
        if links.is_empty() {
            println!("No linked entries");
        }
        for link in links {
            println!("  {}", format_fields(link.fields()));
        }
    }
    Ok(())
}

fn format_fields<'a>(fields: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    fields
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}
