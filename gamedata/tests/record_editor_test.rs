#[allow(dead_code)]
mod test_helpers;

use gamedata::editor::{EditorKind, NewRecord};
use gamedata::error::GameDataError;
use gamedata::schema::TableKind;
use std::fs;
use test_helpers::common::{create_sample_runtime, create_test_runtime, open_runtime};
use test_helpers::fixtures::TEST_ENEMY_ID;

#[test]
fn deleting_an_enemy_removes_its_loot_on_disk() -> Result<(), GameDataError> {
    let (dir, mut runtime) = create_sample_runtime()?;
    let enemies = runtime.editor(EditorKind::Enemy);

    assert_eq!(enemies.links(runtime.database(), TEST_ENEMY_ID)?.len(), 1);
    enemies.delete(runtime.database_mut(), TEST_ENEMY_ID)?;
    enemies.save(runtime.database())?;

    let reopened = open_runtime(dir.path())?;
    assert!(enemies.get(reopened.database(), TEST_ENEMY_ID).is_none());
    assert!(reopened.database().table(TableKind::EnemyLoot).is_empty());

    let loot = fs::read_to_string(dir.path().join("enemy_loot.csv"))?;
    assert_eq!(loot, "enemyId,itemId,rarity,dropRate\n");
    Ok(())
}

#[test]
fn created_rows_follow_the_header_of_the_file() -> Result<(), GameDataError> {
    let (dir, mut runtime) = create_sample_runtime()?;
    let enemies = runtime.editor(EditorKind::Enemy);

    enemies.create(runtime.database_mut(), &NewRecord::new("bat", "蝙蝠"))?;
    assert!(matches!(
        enemies.update(runtime.database_mut(), "bat", &[("mana".into(), "10".into())]),
        Err(GameDataError::BadInput(_))
    ));
    enemies.update(runtime.database_mut(), "bat", &[("level".into(), "7".into())])?;
    enemies.save(runtime.database())?;

    let reopened = open_runtime(dir.path())?;
    let bat = enemies.get(reopened.database(), "bat").expect("bat was saved");
    assert_eq!(bat.get("name"), "蝙蝠");
    assert_eq!(bat.get("level"), "7");
    assert_eq!(bat.get("tier"), "NORMAL");
    assert!(!bat.has("mana"));
    Ok(())
}

#[test]
fn gift_editor_only_lists_gifts() -> Result<(), GameDataError> {
    let (_dir, mut runtime) = create_sample_runtime()?;
    let gifts = runtime.editor(EditorKind::Gift);

    assert_eq!(gifts.labels(runtime.database()), vec!["starter_pack - 新手礼包"]);
    assert!(gifts.get(runtime.database(), "potion").is_none());

    gifts.update(
        runtime.database_mut(),
        "starter_pack",
        &[("type".into(), "MATERIAL".into()), ("basePrice".into(), "5".into())],
    )?;
    let pack = gifts.get(runtime.database(), "starter_pack").expect("still a gift");
    assert_eq!(pack.get("type"), "GIFT");
    assert_eq!(pack.get("basePrice"), "5");

    let items = runtime.editor(EditorKind::Item);
    assert_eq!(items.records(runtime.database()).len(), 3);
    Ok(())
}

#[test]
fn refresh_all_discards_unsaved_changes() -> Result<(), GameDataError> {
    let (_dir, mut runtime) = create_sample_runtime()?;
    let npcs = runtime.editor(EditorKind::Npc);

    npcs.delete(runtime.database_mut(), "merchant")?;
    assert!(npcs.records(runtime.database()).is_empty());

    runtime.refresh_all()?;
    assert_eq!(npcs.labels(runtime.database()), vec!["merchant - 商人"]);
    Ok(())
}

#[test]
fn terrain_editor_changes_the_palette() -> Result<(), GameDataError> {
    let (_dir, mut runtime) = create_sample_runtime()?;
    let terrain = runtime.editor(EditorKind::Terrain);

    terrain.create(runtime.database_mut(), &NewRecord::new(" lava ", "岩浆"))?;
    terrain.update(
        runtime.database_mut(),
        "LAVA",
        &[("passable".into(), "false".into()), ("color".into(), "#FF4500".into())],
    )?;
    assert!(terrain
        .update(runtime.database_mut(), "LAVA", &[("color".into(), "orange".into())])
        .is_err());

    let palette = runtime.map_editor().palette(runtime.database());
    assert!(palette.contains("LAVA"));
    assert!(!palette.is_passable("LAVA"));
    assert_eq!(palette.color_of("LAVA"), "#FF4500");
    Ok(())
}

#[test]
fn in_memory_runtime_saves_without_a_data_dir() -> Result<(), GameDataError> {
    let mut runtime = create_test_runtime()?;
    let skills = runtime.editor(EditorKind::Skill);
    skills.create(runtime.database_mut(), &NewRecord::new("heal", "治疗"))?;
    runtime.save_all()?;

    runtime.refresh_all()?;
    assert!(skills.get(runtime.database(), "heal").is_some());
    Ok(())
}

#[test]
fn deleting_an_owner_removes_only_its_links() -> Result<(), GameDataError> {
    let mut runtime = create_test_runtime()?;
    runtime
        .editor(EditorKind::Item)
        .create(runtime.database_mut(), &NewRecord::new("potion", "药水"))?;
    runtime
        .editor(EditorKind::Skill)
        .create(runtime.database_mut(), &NewRecord::new("slash", "斩击"))?;

    for (kind, linked, table) in [
        (EditorKind::Npc, "potion", TableKind::NpcShopItems),
        (EditorKind::Chest, "potion", TableKind::ChestLoot),
        (EditorKind::Gift, "potion", TableKind::GiftLoot),
        (EditorKind::Role, "slash", TableKind::RoleSkills),
    ] {
        let editor = runtime.editor(kind);
        for owner in ["first", "second"] {
            editor.create(runtime.database_mut(), &NewRecord::new(owner, owner))?;
            editor.upsert_link(runtime.database_mut(), owner, linked, &[])?;
        }
        assert_eq!(runtime.database().table(table).len(), 2, "{kind}");

        editor.delete(runtime.database_mut(), "first")?;
        assert!(editor.links(runtime.database(), "first")?.is_empty(), "{kind}");
        assert_eq!(editor.links(runtime.database(), "second")?.len(), 1, "{kind}");
        assert_eq!(runtime.database().table(table).len(), 1, "{kind}");
    }
    Ok(())
}
