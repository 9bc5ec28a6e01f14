use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::{XP_CURVE_BASE, XP_CURVE_GROWTH};

/// The eight fixed player skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillName {
    Attack,
    Strength,
    Defense,
    Hitpoints,
    Agility,
    Mining,
    Smelting,
    Smithing,
}

impl SkillName {
    pub fn all() -> [SkillName; 8] {
        [
            SkillName::Attack,
            SkillName::Strength,
            SkillName::Defense,
            SkillName::Hitpoints,
            SkillName::Agility,
            SkillName::Mining,
            SkillName::Smelting,
            SkillName::Smithing,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillName::Attack => "Attack",
            SkillName::Strength => "Strength",
            SkillName::Defense => "Defense",
            SkillName::Hitpoints => "Hitpoints",
            SkillName::Agility => "Agility",
            SkillName::Mining => "Mining",
            SkillName::Smelting => "Smelting",
            SkillName::Smithing => "Smithing",
        }
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkillName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillName::all()
            .into_iter()
            .find(|skill| skill.name() == s)
            .ok_or_else(|| format!("unknown skill '{}'", s))
    }
}

/// XP needed to advance out of `level`.
pub fn required_xp(level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as f64;
    (XP_CURVE_BASE * XP_CURVE_GROWTH.powf(exponent)).floor() as u64
}

/// A single skill. `xp` is always below `required_xp(level)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: SkillName,
    pub level: u32,
    pub xp: u64,
}

impl Skill {
    pub fn new(name: SkillName) -> Self {
        Self {
            name,
            level: 1,
            xp: 0,
        }
    }

    /// Rebuilds a skill from saved values, normalising anything the curve
    /// would not allow (level 0, xp at or above the threshold).
    pub fn restore(name: SkillName, level: u32, xp: u64) -> Self {
        let mut skill = Self {
            name,
            level: level.max(1),
            xp: 0,
        };
        skill.grant_xp(xp);
        skill
    }

    pub fn xp_for_next_level(&self) -> u64 {
        required_xp(self.level)
    }

    /// Adds XP and consumes it into as many level-ups as it covers.
    /// Returns the number of levels gained.
    pub fn grant_xp(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);

        let mut levelups = 0;
        loop {
            let needed = required_xp(self.level);
            if self.xp >= needed && needed > 0 {
                self.xp -= needed;
                self.level += 1;
                levelups += 1;
            } else {
                break;
            }
        }
        levelups
    }

    pub fn progress_ratio(&self) -> f64 {
        let required = self.xp_for_next_level();
        if required == 0 {
            return 1.0;
        }
        (self.xp as f64 / required as f64).min(1.0)
    }
}

/// Fixed set of player skills, indexed by [`SkillName`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skills {
    skills: [Skill; 8],
}

impl Default for Skills {
    fn default() -> Self {
        Self::new()
    }
}

impl Skills {
    pub fn new() -> Self {
        Self {
            skills: SkillName::all().map(Skill::new),
        }
    }

    pub fn get(&self, name: SkillName) -> &Skill {
        &self.skills[name.index()]
    }

    pub fn level(&self, name: SkillName) -> u32 {
        self.get(name).level
    }

    pub fn set(&mut self, skill: Skill) {
        let index = skill.name.index();
        self.skills[index] = skill;
    }

    /// Grants XP to one skill, returning the number of levels gained.
    pub fn grant_xp(&mut self, name: SkillName, amount: u64) -> u32 {
        self.skills[name.index()].grant_xp(amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_xp_curve_values() {
        assert_eq!(required_xp(1), 100);
        assert_eq!(required_xp(2), 114);
        assert_eq!(required_xp(3), 132);
        assert_eq!(required_xp(10), 351);
    }

    #[test]
    fn test_required_xp_strictly_increasing() {
        for level in 1..120 {
            assert!(
                required_xp(level + 1) > required_xp(level),
                "curve flattened at level {}",
                level
            );
        }
    }

    #[test]
    fn test_grant_zero_xp_is_noop() {
        let mut skill = Skill::new(SkillName::Mining);
        assert_eq!(skill.grant_xp(0), 0);
        assert_eq!(skill, Skill::new(SkillName::Mining));
    }

    #[test]
    fn test_grant_xp_below_threshold() {
        let mut skill = Skill::new(SkillName::Mining);
        assert_eq!(skill.grant_xp(99), 0);
        assert_eq!(skill.level, 1);
        assert_eq!(skill.xp, 99);
    }

    #[test]
    fn test_grant_xp_exact_threshold_levels_up() {
        let mut skill = Skill::new(SkillName::Mining);
        assert_eq!(skill.grant_xp(100), 1);
        assert_eq!(skill.level, 2);
        assert_eq!(skill.xp, 0);
    }

    #[test]
    fn test_grant_xp_multiple_levels_carries_remainder() {
        let mut skill = Skill::new(SkillName::Attack);
        // 100 + 114 + 132 = 346 covers three levels
        assert_eq!(skill.grant_xp(350), 3);
        assert_eq!(skill.level, 4);
        assert_eq!(skill.xp, 4);
    }

    #[test]
    fn test_xp_always_below_threshold_after_grants() {
        let mut skill = Skill::new(SkillName::Agility);
        for amount in [0, 1, 57, 999, 12_345, 3, 250_000] {
            skill.grant_xp(amount);
            assert!(skill.xp < skill.xp_for_next_level());
        }
    }

    #[test]
    fn test_progress_ratio() {
        let mut skill = Skill::new(SkillName::Smelting);
        assert_eq!(skill.progress_ratio(), 0.0);
        skill.grant_xp(50);
        assert!((skill.progress_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restore_normalises_overflowing_xp() {
        let skill = Skill::restore(SkillName::Defense, 0, 150);
        assert_eq!(skill.level, 2);
        assert_eq!(skill.xp, 50);
    }

    #[test]
    fn test_skill_name_parse_round_trip() {
        for name in SkillName::all() {
            assert_eq!(name.name().parse::<SkillName>(), Ok(name));
        }
        assert!("Fishing".parse::<SkillName>().is_err());
    }

    #[test]
    fn test_skills_grant_targets_single_skill() {
        let mut skills = Skills::new();
        skills.grant_xp(SkillName::Strength, 120);
        assert_eq!(skills.level(SkillName::Strength), 2);
        assert_eq!(skills.level(SkillName::Attack), 1);
        assert_eq!(skills.iter().count(), 8);
    }
}
