//! Built-in world definition.

use super::location::{Action, Location};

const MINE_DESCRIPTION: &str =
    "Rock walls echo with the sound of pickaxes. Ore veins glitter in the torchlight.";
const BANK_DESCRIPTION: &str =
    "A quiet clerk watches over rows of lockboxes. Store items and coins.";

/// Returns every location in the game.
pub fn default_locations() -> Vec<Location> {
    vec![
        // Lumbridge area
        Location::new("lumbridge", "Lumbridge", "city")
            .with_emoji("🏘️")
            .with_description(
                "A peaceful castle town by a winding river. Many adventurers start their journey here under the watchful eye of Duke Horacio.",
            )
            .with_connections(&[
                ("lumbridge_castle", 1500),
                ("lumbridge_swamp", 4000),
                ("al_kharid", 3000),
                ("draynor_village", 8000),
                ("varrock", 15000),
            ]),
        Location::new("lumbridge_castle", "Lumbridge Castle", "castle")
            .with_emoji("🏰")
            .with_description(
                "The grand stone castle of Duke Horacio. Banners hang from the walls, and guards stand watch at every corner.",
            )
            .with_parent("lumbridge")
            .with_connections(&[("lumbridge", 1500), ("lumbridge_castle_bank", 1000)]),
        Location::new("lumbridge_castle_bank", "Lumbridge Castle Bank", "bank")
            .with_emoji("🏦")
            .with_description(BANK_DESCRIPTION)
            .with_parent("lumbridge_castle")
            .with_connections(&[("lumbridge_castle", 1000)])
            .with_actions(&[Action::Bank]),
        Location::new("lumbridge_swamp", "Lumbridge Swamp", "hub")
            .with_emoji("🐸")
            .with_description(
                "Murky waters and twisted trees. Frogs croak, and more dangerous creatures lurk in the shadows.",
            )
            .with_parent("lumbridge")
            .with_connections(&[
                ("lumbridge", 4000),
                ("lumbridge_swamp_mine", 3000),
                ("draynor_manor", 5000),
                ("draynor_village", 6000),
            ])
            .with_encounters(&[("swamp_creature", 10.0), ("small_rat", 50.0)]),
        Location::new("lumbridge_swamp_mine", "Lumbridge Swamp Mine", "mine")
            .with_emoji("⛏️")
            .with_description(MINE_DESCRIPTION)
            .with_parent("lumbridge_swamp")
            .with_connections(&[("lumbridge_swamp", 3000)])
            .with_actions(&[Action::Mine])
            .with_mining_options(&["copper_ore", "tin_ore"]),
        // Varrock area
        Location::new("varrock", "Varrock", "city")
            .with_emoji("🏰")
            .with_description(
                "The bustling capital city with markets, guards, and adventure around every corner.",
            )
            .with_connections(&[
                ("grand_exchange", 3000),
                ("varrock_west_bank", 2000),
                ("varrock_east_mine", 4000),
                ("varrock_palace", 2500),
                ("edgeville", 8000),
                ("lumbridge", 15000),
                ("barbarian_village", 10000),
            ]),
        Location::new("varrock_east_mine", "Varrock East Mine", "mine")
            .with_emoji("⛏️")
            .with_description(MINE_DESCRIPTION)
            .with_parent("varrock")
            .with_connections(&[("varrock", 4000)])
            .with_actions(&[Action::Mine])
            .with_mining_options(&["iron_ore", "coal"]),
        Location::new("varrock_west_bank", "Varrock West Bank", "bank")
            .with_emoji("🏦")
            .with_description(BANK_DESCRIPTION)
            .with_parent("varrock")
            .with_connections(&[("varrock", 2000)])
            .with_actions(&[Action::Bank]),
        Location::new("varrock_palace", "Varrock Palace", "palace")
            .with_emoji("👑")
            .with_description("The grand palace where King Roald rules over Varrock.")
            .with_parent("varrock")
            .with_connections(&[("varrock", 2500)]),
        Location::new("grand_exchange", "Grand Exchange", "shop")
            .with_emoji("💰")
            .with_description(
                "The bustling marketplace where merchants trade goods from across Gielinor.",
            )
            .with_parent("varrock")
            .with_connections(&[("varrock", 3000)])
            .with_actions(&[Action::Shop]),
        // Falador area
        Location::new("falador", "Falador", "city")
            .with_emoji("🛡️")
            .with_description(
                "The majestic white walls of Falador rise before you. Knights patrol the streets, and the gleaming castle towers above the bustling city square.",
            )
            .with_connections(&[
                ("falador_bank", 1500),
                ("falador_mine", 3000),
                ("crafting_guild", 8000),
                ("barbarian_village", 12000),
                ("port_sarim", 12000),
                ("rimmington", 10000),
                ("edgeville", 15000),
            ]),
        Location::new("falador_mine", "Falador Mine", "mine")
            .with_emoji("⛏️")
            .with_description(MINE_DESCRIPTION)
            .with_parent("falador")
            .with_connections(&[("falador", 3000)])
            .with_actions(&[Action::Mine])
            .with_mining_options(&["copper_ore", "tin_ore", "iron_ore", "coal"]),
        Location::new("falador_bank", "Falador East Bank", "bank")
            .with_emoji("🏦")
            .with_description(BANK_DESCRIPTION)
            .with_parent("falador")
            .with_connections(&[("falador", 1500)])
            .with_actions(&[Action::Bank]),
        Location::new("crafting_guild", "Crafting Guild", "guild")
            .with_emoji("🔨")
            .with_description(
                "Anvils line the walls, each scarred from use. Hammer bars into gear or craft boxes to capture creatures.",
            )
            .with_parent("falador")
            .with_connections(&[("falador", 8000)])
            .with_actions(&[Action::Craft]),
        // Edgeville and the Wilderness
        Location::new("edgeville", "Edgeville", "city")
            .with_emoji("🏘️")
            .with_description(
                "A small town on the edge of civilization. The Wilderness looms to the north.",
            )
            .with_connections(&[
                ("edgeville_furnace", 1500),
                ("wilderness", 2000),
                ("varrock", 8000),
                ("barbarian_village", 5000),
                ("falador", 15000),
            ]),
        Location::new("edgeville_furnace", "Edgeville Furnace", "furnace")
            .with_emoji("🔥")
            .with_description(
                "Intense heat radiates from the furnace. This is where ores become ingots.",
            )
            .with_parent("edgeville")
            .with_connections(&[("edgeville", 1500)])
            .with_actions(&[Action::Smelt]),
        Location::new("wilderness", "Wilderness", "combat")
            .with_emoji("⚔️")
            .with_description("A dangerous wasteland where outlaws and monsters roam freely.")
            .with_parent("edgeville")
            .with_connections(&[("edgeville", 2000)])
            .with_actions(&[Action::Combat])
            .with_encounters(&[("goblin", 5.0), ("swamp_creature", 3.0), ("mad_cow", 2.0)]),
        Location::new("barbarian_village", "Barbarian Village", "village")
            .with_emoji("🪓")
            .with_description(
                "A rough settlement of fierce warriors. Longhouses dot the landscape.",
            )
            .with_connections(&[("edgeville", 5000), ("varrock", 10000), ("falador", 12000)])
            .with_encounters(&[("mad_cow", 10.0)]),
        // Al Kharid
        Location::new("al_kharid", "Al Kharid", "city")
            .with_emoji("🏜️")
            .with_description(
                "Golden dunes surround this desert palace. The heat is intense, and guards watch the palace gates carefully.",
            )
            .with_connections(&[("al_kharid_mine", 3000), ("lumbridge", 3000)]),
        Location::new("al_kharid_mine", "Al Kharid Mine", "mine")
            .with_emoji("⛏️")
            .with_description(MINE_DESCRIPTION)
            .with_parent("al_kharid")
            .with_connections(&[("al_kharid", 3000)])
            .with_actions(&[Action::Mine])
            .with_mining_options(&["copper_ore", "tin_ore", "iron_ore"]),
        // Draynor area
        Location::new("draynor_village", "Draynor Village", "village")
            .with_emoji("🏘️")
            .with_description(
                "A quiet village with a dark reputation. Strange things happen here at night.",
            )
            .with_connections(&[
                ("draynor_manor", 5000),
                ("wizards_tower", 6000),
                ("port_sarim", 7000),
                ("lumbridge_swamp", 6000),
                ("lumbridge", 8000),
            ]),
        Location::new("draynor_manor", "Draynor Manor", "combat")
            .with_emoji("🏚️")
            .with_description(
                "An eerie mansion that seems to watch you. Dark magic lingers in the air.",
            )
            .with_parent("draynor_village")
            .with_connections(&[("draynor_village", 5000), ("lumbridge_swamp", 5000)])
            .with_actions(&[Action::Combat])
            .with_encounters(&[("goblin", 10.0)]),
        Location::new("wizards_tower", "Wizards' Tower", "tower")
            .with_emoji("🔮")
            .with_description(
                "A tall tower where wizards study arcane magic. Strange lights flicker in the windows.",
            )
            .with_parent("draynor_village")
            .with_connections(&[("draynor_village", 6000)]),
        // Port Sarim and Rimmington
        Location::new("port_sarim", "Port Sarim", "port")
            .with_emoji("⛵")
            .with_description(
                "A busy port town with ships coming and going. The smell of salt and fish fills the air.",
            )
            .with_connections(&[("draynor_village", 7000), ("falador", 12000), ("rimmington", 8000)]),
        Location::new("rimmington", "Rimmington", "village")
            .with_emoji("🏘️")
            .with_description("A small mining village near the coast. Quiet and peaceful.")
            .with_connections(&[("port_sarim", 8000), ("falador", 10000)]),
    ]
}
