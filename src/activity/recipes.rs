//! Production recipes: ores, ingots and crafting.
//!
//! Every recipe shares one record shape. The kind tag carries the fields that
//! only matter to one family (smelting success chance, crafting tier and
//! category).

use serde::Serialize;
use std::sync::OnceLock;

use crate::items::Inventory;
use crate::skills::SkillName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Copper,
    Tin,
    Bronze,
    Iron,
    Steel,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Copper => "Copper",
            Tier::Tin => "Tin",
            Tier::Bronze => "Bronze",
            Tier::Iron => "Iron",
            Tier::Steel => "Steel",
        }
    }

    /// Leather needed by armour and shields of this tier.
    fn leather_for_armor(self) -> u32 {
        match self {
            Tier::Copper => 1,
            Tier::Bronze => 2,
            Tier::Iron => 3,
            _ => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Shield,
    Box,
}

impl ItemCategory {
    pub fn name(self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
            ItemCategory::Shield => "Shield",
            ItemCategory::Box => "Box",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RecipeKind {
    Ore,
    Ingot { success_chance: f64 },
    Craft { tier: Tier, category: ItemCategory },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub id: &'static str,
    pub name: &'static str,
    pub quantity: u32,
}

const fn ingredient(id: &'static str, name: &'static str, quantity: u32) -> Ingredient {
    Ingredient { id, name, quantity }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: RecipeKind,
    pub base_time_ms: u64,
    pub level_req: u32,
    pub xp: u64,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// The skill that gates and is rewarded by this recipe.
    pub fn skill(&self) -> SkillName {
        match self.kind {
            RecipeKind::Ore => SkillName::Mining,
            RecipeKind::Ingot { .. } => SkillName::Smelting,
            RecipeKind::Craft { .. } => SkillName::Smithing,
        }
    }

    pub fn meets_level_requirement(&self, level: u32) -> bool {
        level >= self.level_req
    }

    pub fn has_ingredients(&self, inventory: &Inventory) -> bool {
        self.ingredients
            .iter()
            .all(|ing| inventory.has_item(ing.id, ing.quantity))
    }

    /// Chance the recipe produces output; only smelting can fail.
    pub fn success_chance(&self) -> f64 {
        match self.kind {
            RecipeKind::Ingot { success_chance } => success_chance.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    pub fn ingredient_units(&self) -> u32 {
        self.ingredients.iter().map(|i| i.quantity).sum()
    }

    fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let mut haystack = self.name.to_lowercase();
        if let RecipeKind::Craft { tier, category } = self.kind {
            haystack.push(' ');
            haystack.push_str(&tier.name().to_lowercase());
            haystack.push(' ');
            haystack.push_str(&category.name().to_lowercase());
        }
        haystack.contains(&query)
    }
}

fn ore(id: &'static str, name: &'static str, base_time_ms: u64, level_req: u32, xp: u64) -> Recipe {
    Recipe {
        id,
        name,
        kind: RecipeKind::Ore,
        base_time_ms,
        level_req,
        xp,
        ingredients: Vec::new(),
    }
}

fn ingot(
    id: &'static str,
    name: &'static str,
    (base_time_ms, level_req, xp): (u64, u32, u64),
    success_chance: f64,
    ingredients: Vec<Ingredient>,
) -> Recipe {
    Recipe {
        id,
        name,
        kind: RecipeKind::Ingot { success_chance },
        base_time_ms,
        level_req,
        xp,
        ingredients,
    }
}

fn tier_ingot(tier: Tier) -> Ingredient {
    match tier {
        Tier::Copper => ingredient("copper_ingot", "Copper Ingot", 1),
        Tier::Tin => ingredient("tin_ore", "Tin Ore", 1),
        Tier::Bronze => ingredient("bronze_ingot", "Bronze Ingot", 1),
        Tier::Iron => ingredient("iron_ingot", "Iron Ingot", 1),
        Tier::Steel => ingredient("steel_ingot", "Steel Ingot", 1),
    }
}

/// Equipment recipe whose ingredients derive from its tier: `ingots` bars,
/// plus leather for armour and shields.
fn equipment(
    id: &'static str,
    name: &'static str,
    tier: Tier,
    category: ItemCategory,
    ingots: u32,
    (level_req, xp, base_time_ms): (u32, u64, u64),
) -> Recipe {
    let mut ingredients = vec![Ingredient {
        quantity: ingots,
        ..tier_ingot(tier)
    }];
    if matches!(category, ItemCategory::Armor | ItemCategory::Shield) {
        ingredients.push(ingredient("leather", "Leather", tier.leather_for_armor()));
    }
    Recipe {
        id,
        name,
        kind: RecipeKind::Craft { tier, category },
        base_time_ms,
        level_req,
        xp,
        ingredients,
    }
}

fn crafted_box(
    id: &'static str,
    name: &'static str,
    tier: Tier,
    (level_req, xp, base_time_ms): (u32, u64, u64),
    ingredients: Vec<Ingredient>,
) -> Recipe {
    Recipe {
        id,
        name,
        kind: RecipeKind::Craft {
            tier,
            category: ItemCategory::Box,
        },
        base_time_ms,
        level_req,
        xp,
        ingredients,
    }
}

/// All recipe tables, built once.
#[derive(Debug)]
pub struct RecipeBook {
    ores: Vec<Recipe>,
    ingots: Vec<Recipe>,
    crafting: Vec<Recipe>,
}

impl RecipeBook {
    fn build() -> Self {
        use ItemCategory::{Armor, Shield, Weapon};
        use Tier::{Bronze, Copper, Iron, Steel};

        let ores = vec![
            ore("copper_ore", "Copper Ore", 4000, 1, 5),
            ore("tin_ore", "Tin Ore", 4500, 1, 6),
            ore("iron_ore", "Iron Ore", 6500, 15, 15),
            ore("coal", "Coal", 7000, 30, 25),
        ];

        let ingots = vec![
            ingot(
                "copper_ingot",
                "Copper Ingot",
                (3500, 1, 8),
                1.0,
                vec![ingredient("copper_ore", "Copper Ore", 1)],
            ),
            ingot(
                "bronze_ingot",
                "Bronze Ingot",
                (4500, 1, 12),
                1.0,
                vec![
                    ingredient("copper_ore", "Copper Ore", 1),
                    ingredient("tin_ore", "Tin Ore", 1),
                ],
            ),
            ingot(
                "iron_ingot",
                "Iron Ingot",
                (5500, 15, 20),
                0.5,
                vec![ingredient("iron_ore", "Iron Ore", 1)],
            ),
            ingot(
                "steel_ingot",
                "Steel Ingot",
                (7000, 30, 35),
                1.0,
                vec![
                    ingredient("iron_ore", "Iron Ore", 1),
                    ingredient("coal", "Coal", 2),
                ],
            ),
        ];

        let crafting = vec![
            equipment("copper_dagger", "Copper Dagger", Copper, Weapon, 1, (1, 5, 3000)),
            equipment("copper_sword", "Copper Sword", Copper, Weapon, 2, (3, 10, 4000)),
            equipment("copper_helm", "Copper Helm", Copper, Armor, 2, (4, 12, 4500)),
            equipment("copper_chainbody", "Copper Chainbody", Copper, Armor, 3, (6, 18, 5500)),
            equipment("copper_platelegs", "Copper Platelegs", Copper, Armor, 2, (5, 14, 5000)),
            equipment("copper_kiteshield", "Copper Kiteshield", Copper, Shield, 3, (7, 20, 6000)),
            equipment("copper_boots", "Copper Boots", Copper, Armor, 1, (2, 6, 3500)),
            equipment("bronze_dagger", "Bronze Dagger", Bronze, Weapon, 1, (5, 12, 4000)),
            equipment("bronze_sword", "Bronze Sword", Bronze, Weapon, 2, (8, 18, 5000)),
            equipment("bronze_helm", "Bronze Helm", Bronze, Armor, 2, (9, 20, 5500)),
            equipment("bronze_chainbody", "Bronze Chainbody", Bronze, Armor, 3, (11, 26, 6500)),
            equipment("bronze_platelegs", "Bronze Platelegs", Bronze, Armor, 2, (10, 22, 6000)),
            equipment("bronze_kiteshield", "Bronze Kiteshield", Bronze, Shield, 3, (12, 28, 7000)),
            equipment("bronze_boots", "Bronze Boots", Bronze, Armor, 1, (6, 14, 4500)),
            equipment("iron_dagger", "Iron Dagger", Iron, Weapon, 1, (15, 30, 5500)),
            equipment("iron_sword", "Iron Sword", Iron, Weapon, 2, (18, 40, 6500)),
            equipment("iron_helm", "Iron Helm", Iron, Armor, 2, (19, 42, 7000)),
            equipment("iron_chainbody", "Iron Chainbody", Iron, Armor, 3, (21, 50, 8000)),
            equipment("iron_platelegs", "Iron Platelegs", Iron, Armor, 2, (20, 46, 7500)),
            equipment("iron_kiteshield", "Iron Kiteshield", Iron, Shield, 3, (23, 55, 8500)),
            equipment("iron_boots", "Iron Boots", Iron, Armor, 1, (16, 32, 6000)),
            equipment("steel_dagger", "Steel Dagger", Steel, Weapon, 1, (30, 60, 7000)),
            equipment("steel_sword", "Steel Sword", Steel, Weapon, 2, (33, 72, 8000)),
            equipment("steel_helm", "Steel Helm", Steel, Armor, 2, (34, 75, 8500)),
            equipment("steel_chainbody", "Steel Chainbody", Steel, Armor, 3, (36, 84, 9500)),
            equipment("steel_platelegs", "Steel Platelegs", Steel, Armor, 2, (35, 80, 9000)),
            equipment("steel_kiteshield", "Steel Kiteshield", Steel, Shield, 3, (38, 90, 10000)),
            equipment("steel_boots", "Steel Boots", Steel, Armor, 1, (31, 64, 7500)),
            crafted_box(
                "box_copper",
                "Copper Box",
                Copper,
                (1, 3, 2500),
                vec![
                    ingredient("copper_ingot", "Copper Ingot", 1),
                    ingredient("leather", "Leather", 1),
                ],
            ),
            crafted_box(
                "box_tin",
                "Tin Box",
                Tier::Tin,
                (2, 3, 2500),
                vec![
                    ingredient("tin_ore", "Tin Ore", 2),
                    ingredient("leather", "Leather", 1),
                ],
            ),
            crafted_box(
                "box_bronze",
                "Bronze Box",
                Bronze,
                (5, 6, 3000),
                vec![
                    ingredient("bronze_ingot", "Bronze Ingot", 1),
                    ingredient("leather", "Leather", 1),
                ],
            ),
            crafted_box(
                "box_iron",
                "Iron Box",
                Iron,
                (15, 12, 4000),
                vec![
                    ingredient("iron_ingot", "Iron Ingot", 1),
                    ingredient("leather", "Leather", 2),
                ],
            ),
            crafted_box(
                "box_steel",
                "Steel Box",
                Steel,
                (30, 20, 5000),
                vec![
                    ingredient("steel_ingot", "Steel Ingot", 1),
                    ingredient("leather", "Leather", 3),
                ],
            ),
        ];

        Self {
            ores,
            ingots,
            crafting,
        }
    }

    pub fn ores(&self) -> &[Recipe] {
        &self.ores
    }

    pub fn ingots(&self) -> &[Recipe] {
        &self.ingots
    }

    pub fn crafting_recipes(&self) -> &[Recipe] {
        &self.crafting
    }

    pub fn ore(&self, id: &str) -> Option<&Recipe> {
        self.ores.iter().find(|r| r.id == id)
    }

    pub fn ingot(&self, id: &str) -> Option<&Recipe> {
        self.ingots.iter().find(|r| r.id == id)
    }

    pub fn crafting(&self, id: &str) -> Option<&Recipe> {
        self.crafting.iter().find(|r| r.id == id)
    }

    /// Crafting recipes whose name, tier or category contains `query`.
    pub fn search_crafting(&self, query: &str) -> Vec<&Recipe> {
        self.crafting
            .iter()
            .filter(|r| r.matches_search(query))
            .collect()
    }
}

pub fn recipe_book() -> &'static RecipeBook {
    static BOOK: OnceLock<RecipeBook> = OnceLock::new();
    BOOK.get_or_init(RecipeBook::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        let book = recipe_book();
        assert_eq!(book.ores().len(), 4);
        assert_eq!(book.ingots().len(), 4);
        assert_eq!(book.crafting_recipes().len(), 33);
    }

    #[test]
    fn test_recipe_skill_by_kind() {
        let book = recipe_book();
        assert_eq!(book.ore("coal").unwrap().skill(), SkillName::Mining);
        assert_eq!(book.ingot("steel_ingot").unwrap().skill(), SkillName::Smelting);
        assert_eq!(book.crafting("box_tin").unwrap().skill(), SkillName::Smithing);
    }

    #[test]
    fn test_iron_ingot_success_chance() {
        let book = recipe_book();
        assert_eq!(book.ingot("iron_ingot").unwrap().success_chance(), 0.5);
        assert_eq!(book.ingot("copper_ingot").unwrap().success_chance(), 1.0);
        assert_eq!(book.ore("tin_ore").unwrap().success_chance(), 1.0);
    }

    #[test]
    fn test_equipment_ingredients_derived_from_tier() {
        let book = recipe_book();

        let sword = book.crafting("bronze_sword").unwrap();
        assert_eq!(sword.ingredients, vec![ingredient("bronze_ingot", "Bronze Ingot", 2)]);

        let shield = book.crafting("iron_kiteshield").unwrap();
        assert_eq!(
            shield.ingredients,
            vec![
                ingredient("iron_ingot", "Iron Ingot", 3),
                ingredient("leather", "Leather", 3),
            ]
        );

        let legs = book.crafting("steel_platelegs").unwrap();
        assert_eq!(legs.ingredients[1], ingredient("leather", "Leather", 4));
    }

    #[test]
    fn test_has_ingredients() {
        let book = recipe_book();
        let bronze = book.ingot("bronze_ingot").unwrap();
        let mut inv = Inventory::new(20);
        inv.add_item("copper_ore", "Copper Ore", 1);
        assert!(!bronze.has_ingredients(&inv));
        inv.add_item("tin_ore", "Tin Ore", 1);
        assert!(bronze.has_ingredients(&inv));
    }

    #[test]
    fn test_search_crafting() {
        let book = recipe_book();
        assert_eq!(book.search_crafting("").len(), 33);
        assert_eq!(book.search_crafting("box").len(), 5);
        assert_eq!(book.search_crafting("STEEL").len(), 8);
        assert_eq!(book.search_crafting("shield").len(), 4);
        assert!(book.search_crafting("mithril").is_empty());
    }

    #[test]
    fn test_unknown_ids() {
        let book = recipe_book();
        assert!(book.ore("mithril_ore").is_none());
        assert!(book.ingot("copper_ore").is_none());
        assert!(book.crafting("copper_ingot").is_none());
    }
}
