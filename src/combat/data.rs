use super::types::Enemy;

/// Every enemy that can appear in an encounter table.
pub fn enemy_roster() -> Vec<Enemy> {
    vec![
        Enemy::new("goblin", "Goblin", 20, 3, 2).with_loot("copper_ore", "Copper Ore", 0.3),
        Enemy::new("swamp_creature", "Swamp Creature", 25, 4, 3).with_loot("tin_ore", "Tin Ore", 0.25),
        Enemy::new("mad_cow", "Mad Cow", 30, 5, 2).with_loot("leather", "Leather", 0.5),
        Enemy::new("small_rat", "Small Rat", 5, 1, 0),
    ]
}

/// A fresh, full-health copy of the enemy with this id.
pub fn spawn_enemy(id: &str) -> Option<Enemy> {
    enemy_roster().into_iter().find(|enemy| enemy.id == id)
}
