// gamedata/tests/test_helpers/fixtures.rs

use std::fs;
use std::io;
use std::path::Path;

pub const TEST_MAP_ID: &str = "starter_village";
pub const TEST_ENEMY_ID: &str = "slime";

/// A small but complete data set: one 6 × 4 map with terrain, entities and two
/// waypoints, plus the tables the entities refer to.
pub const SAMPLE_FILES: &[(&str, &str)] = &[
    (
        "maps.csv",
        "id,name,description,width,height,isSafe,recommendedLevel,defaultTerrain\n\
         starter_village,新手村,A quiet village,6,4,true,1,GRASS\n\
         dark_forest,,Trees everywhere,3,3,false,5,TREE\n",
    ),
    (
        "map_terrain.csv",
        "mapId,x1,y1,x2,y2,terrainTypes\n\
         starter_village,0,0,5,0,SAND\n\
         starter_village,4,0,9,9,\"WATER,SAND\"\n\
         dark_forest,1,1,1,1,GRASS\n",
    ),
    (
        "map_entities.csv",
        "mapId,x,y,entityType,entityId,instanceId\n\
         starter_village,1,2,NPC,merchant,\n\
         starter_village,2,2,ENEMY,slime,slime_2_2_0\n\
         starter_village,2,2,ENEMY,slime,slime_2_2_1\n\
         starter_village,0,3,WAYPOINT,village_gate,\n\
         dark_forest,0,0,ENEMY,slime,slime_0_0_0\n",
    ),
    (
        "waypoints.csv",
        "id,mapId,name,description,x,y,connectedWaypointIds\n\
         village_gate,starter_village,村口,,0,3,forest_edge\n\
         forest_edge,dark_forest,林边,,0,2,village_gate\n",
    ),
    (
        "terrain_types.csv",
        "id,name,icon,passable,color\n\
         GRASS,草地,,true,#90EE90\n\
         SAND,沙地,,true,#F4A460\n\
         WATER,水,,false,#1E90FF\n\
         TREE,树,,false,#228B22\n",
    ),
    (
        "enemies.csv",
        "id,name,description,level,tier,health\n\
         slime,史莱姆,Wobbly,3,NORMAL,40\n",
    ),
    (
        "enemy_loot.csv",
        "enemyId,itemId,rarity,dropRate\n\
         slime,gel,COMMON,0.8\n",
    ),
    (
        "items.csv",
        "id,name,description,type,maxStack,basePrice,effect,effectValue,icon\n\
         gel,凝胶,,MATERIAL,99,2,NONE,0,\n\
         potion,药水,,CONSUMABLE,99,10,HEAL_HP,50,\n\
         starter_pack,新手礼包,一个礼包,GIFT,1,0,OPEN_GIFT,,\n",
    ),
    (
        "gift_loot.csv",
        "giftId,itemId,rarity,quantity\n\
         starter_pack,potion,COMMON,5\n",
    ),
    (
        "npcs.csv",
        "id,name,description,hasShop,hasDialogue\n\
         merchant,商人,,true,true\n",
    ),
];

/// Writes [`SAMPLE_FILES`] into `dir`
pub fn write_sample_data(dir: &Path) -> io::Result<()> {
    for (name, contents) in SAMPLE_FILES {
        fs::write(dir.join(name), contents)?;
    }
    Ok(())
}
