use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::skills::SkillName;

/// Which combat skills receive the XP from damage dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatStance {
    #[default]
    Accurate,
    Aggressive,
    Defensive,
    Controlled,
}

impl CombatStance {
    pub fn all() -> [CombatStance; 4] {
        [
            CombatStance::Accurate,
            CombatStance::Aggressive,
            CombatStance::Defensive,
            CombatStance::Controlled,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CombatStance::Accurate => "accurate",
            CombatStance::Aggressive => "aggressive",
            CombatStance::Defensive => "defensive",
            CombatStance::Controlled => "controlled",
        }
    }

    /// Skills trained by this stance.
    pub fn trained_skills(self) -> &'static [SkillName] {
        match self {
            CombatStance::Accurate => &[SkillName::Attack],
            CombatStance::Aggressive => &[SkillName::Strength],
            CombatStance::Defensive => &[SkillName::Defense],
            CombatStance::Controlled => &[SkillName::Attack, SkillName::Strength, SkillName::Defense],
        }
    }
}

impl fmt::Display for CombatStance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombatStance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        CombatStance::all()
            .into_iter()
            .find(|stance| stance.as_str() == lowered)
            .ok_or_else(|| format!("unknown stance '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootEntry {
    pub id: String,
    pub name: String,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    pub hp: i32,
    pub attack: u32,
    pub defense: u32,
    pub loot: Vec<LootEntry>,
}

impl Enemy {
    pub fn new(id: &str, name: &str, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max_hp,
            hp: max_hp as i32,
            attack,
            defense,
            loot: Vec::new(),
        }
    }

    pub fn with_loot(mut self, id: &str, name: &str, chance: f64) -> Self {
        self.loot.push(LootEntry {
            id: id.to_string(),
            name: name.to_string(),
            chance,
        });
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// HP may go negative; only `is_alive` matters.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp -= amount as i32;
    }
}

/// Whose move it is. The enemy's move is deferred until `due_at_ms` on the
/// game clock and disappears with the session when combat ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CombatPhase {
    PlayerTurn,
    EnemyTurn { due_at_ms: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatSession {
    pub enemy: Enemy,
    pub phase: CombatPhase,
}

impl CombatSession {
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            phase: CombatPhase::PlayerTurn,
        }
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == CombatPhase::PlayerTurn
    }

    /// True once a scheduled enemy turn has come due.
    pub fn enemy_turn_due(&self, now_ms: f64) -> bool {
        matches!(self.phase, CombatPhase::EnemyTurn { due_at_ms } if now_ms >= due_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stance_parse_and_display() {
        assert_eq!("Controlled".parse::<CombatStance>(), Ok(CombatStance::Controlled));
        assert_eq!(CombatStance::Aggressive.to_string(), "aggressive");
        assert!("berserk".parse::<CombatStance>().is_err());
        assert_eq!(CombatStance::default(), CombatStance::Accurate);
    }

    #[test]
    fn test_enemy_hp_can_go_negative() {
        let mut rat = Enemy::new("small_rat", "Small Rat", 5, 1, 0);
        rat.take_damage(8);
        assert_eq!(rat.hp, -3);
        assert!(!rat.is_alive());
    }

    #[test]
    fn test_enemy_turn_due() {
        let mut session = CombatSession::new(Enemy::new("goblin", "Goblin", 20, 3, 2));
        assert!(session.is_player_turn());
        assert!(!session.enemy_turn_due(1_000_000.0));

        session.phase = CombatPhase::EnemyTurn { due_at_ms: 2000.0 };
        assert!(!session.enemy_turn_due(1999.0));
        assert!(session.enemy_turn_due(2000.0));
    }
}
