//! Command rejection errors.
//!
//! Every rejected player command maps to one variant. The `Display` text is the
//! message shown to the player.

use thiserror::Error;

use crate::skills::SkillName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("You are already traveling!")]
    AlreadyTraveling,

    #[error("You are already at {0}.")]
    AlreadyThere(String),

    #[error("You can't do that while traveling!")]
    Traveling,

    #[error("You can't do that during combat!")]
    InCombat,

    #[error("Finish what you are doing first!")]
    Busy,

    #[error("You are not in combat.")]
    NotInCombat,

    #[error("Wait for the enemy to finish its turn!")]
    NotYourTurn,

    #[error("You need {skill} level {required} to {verb} {target}.")]
    LevelTooLow {
        skill: SkillName,
        required: u32,
        verb: &'static str,
        target: String,
    },

    #[error("There is nowhere to {0} here.")]
    ActionUnavailable(&'static str),

    #[error("{0} can't be mined here.")]
    OreNotHere(String),

    #[error("You don't have the materials to make {0}.")]
    MissingIngredients(String),

    #[error("Your inventory is full!")]
    InventoryFull,

    #[error("No enemies found at this location!")]
    NoEncounters,

    #[error("Item not found in inventory!")]
    NotInInventory(String),

    #[error("Item not found in bank!")]
    NotInBank(String),

    #[error("You have no gold to deposit!")]
    NoGoldToDeposit,

    #[error("No gold in bank to withdraw!")]
    NoGoldInBank,

    #[error("Enter an amount greater than zero.")]
    ZeroAmount,

    #[error("Your bank cannot hold any more {0}.")]
    BankStackFull(String),

    #[error("Unknown stance: {0}")]
    UnknownStance(String),

    #[error("Location {0} not found!")]
    UnknownLocation(String),

    #[error("Ore {0} not found!")]
    UnknownOre(String),

    #[error("Ingot {0} not found!")]
    UnknownIngot(String),

    #[error("Recipe {0} not found!")]
    UnknownRecipe(String),

    #[error("Enemy {0} not found!")]
    UnknownEnemy(String),
}

impl CommandError {
    /// True when the rejection comes from a dangling reference in the game
    /// data rather than from a player mistake.
    pub fn is_integrity_gap(&self) -> bool {
        matches!(
            self,
            CommandError::UnknownLocation(_)
                | CommandError::UnknownOre(_)
                | CommandError::UnknownIngot(_)
                | CommandError::UnknownRecipe(_)
                | CommandError::UnknownEnemy(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_player_facing() {
        assert_eq!(
            CommandError::NoGoldToDeposit.to_string(),
            "You have no gold to deposit!"
        );
        let err = CommandError::LevelTooLow {
            skill: SkillName::Mining,
            required: 15,
            verb: "mine",
            target: "Iron Ore".to_string(),
        };
        assert_eq!(err.to_string(), "You need Mining level 15 to mine Iron Ore.");
    }

    #[test]
    fn test_integrity_gap_classification() {
        assert!(CommandError::UnknownEnemy("dragon".into()).is_integrity_gap());
        assert!(CommandError::UnknownLocation("atlantis".into()).is_integrity_gap());
        assert!(!CommandError::InventoryFull.is_integrity_gap());
        assert!(!CommandError::NoGoldInBank.is_integrity_gap());
    }
}
