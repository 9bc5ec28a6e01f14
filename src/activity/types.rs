use serde::Serialize;
use std::fmt;

/// Family of a timed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Travel,
    Mining,
    Smelting,
    Crafting,
}

impl ActivityKind {
    pub fn verb_ing(self) -> &'static str {
        match self {
            ActivityKind::Travel => "traveling to",
            ActivityKind::Mining => "mining",
            ActivityKind::Smelting => "smelting",
            ActivityKind::Crafting => "crafting",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityKind::Travel => "Travel",
            ActivityKind::Mining => "Mining",
            ActivityKind::Smelting => "Smelting",
            ActivityKind::Crafting => "Crafting",
        };
        f.write_str(name)
    }
}

/// Progress towards one completion. `progress` stays in `[0, 1)` while the
/// activity is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityProgress {
    /// Ore, ingot, recipe or destination id.
    pub target_id: String,
    pub progress: f64,
    pub duration_ms: u64,
}

impl ActivityProgress {
    pub fn new(target_id: &str, duration_ms: u64) -> Self {
        Self {
            target_id: target_id.to_string(),
            progress: 0.0,
            duration_ms: duration_ms.max(1),
        }
    }

    /// Advances by `delta_ms`. Returns true once the activity completes.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        self.progress += delta_ms / self.duration_ms as f64;
        self.progress >= 1.0
    }

    pub fn remaining_ms(&self) -> f64 {
        ((1.0 - self.progress) * self.duration_ms as f64).max(0.0)
    }
}

/// The one timed activity the player is engaged in.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum CurrentActivity {
    #[default]
    Idle,
    Traveling {
        progress: ActivityProgress,
        /// Unscaled edge time; Agility XP is paid on this, not the scaled time.
        base_time_ms: u64,
    },
    Mining(ActivityProgress),
    Smelting(ActivityProgress),
    Crafting(ActivityProgress),
}

impl CurrentActivity {
    pub fn kind(&self) -> Option<ActivityKind> {
        match self {
            CurrentActivity::Idle => None,
            CurrentActivity::Traveling { .. } => Some(ActivityKind::Travel),
            CurrentActivity::Mining(_) => Some(ActivityKind::Mining),
            CurrentActivity::Smelting(_) => Some(ActivityKind::Smelting),
            CurrentActivity::Crafting(_) => Some(ActivityKind::Crafting),
        }
    }

    pub fn progress(&self) -> Option<&ActivityProgress> {
        match self {
            CurrentActivity::Idle => None,
            CurrentActivity::Traveling { progress, .. } => Some(progress),
            CurrentActivity::Mining(p) | CurrentActivity::Smelting(p) | CurrentActivity::Crafting(p) => {
                Some(p)
            }
        }
    }

    pub fn progress_mut(&mut self) -> Option<&mut ActivityProgress> {
        match self {
            CurrentActivity::Idle => None,
            CurrentActivity::Traveling { progress, .. } => Some(progress),
            CurrentActivity::Mining(p) | CurrentActivity::Smelting(p) | CurrentActivity::Crafting(p) => {
                Some(p)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, CurrentActivity::Idle)
    }

    pub fn is_traveling(&self) -> bool {
        matches!(self, CurrentActivity::Traveling { .. })
    }

    /// Mining, smelting or crafting.
    pub fn is_production(&self) -> bool {
        matches!(
            self,
            CurrentActivity::Mining(_) | CurrentActivity::Smelting(_) | CurrentActivity::Crafting(_)
        )
    }

    pub fn target_id(&self) -> Option<&str> {
        self.progress().map(|p| p.target_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_completes_at_one() {
        let mut p = ActivityProgress::new("copper_ore", 4000);
        assert!(!p.advance(2000.0));
        assert!((p.progress - 0.5).abs() < 1e-9);
        assert_eq!(p.remaining_ms(), 2000.0);
        assert!(p.advance(2000.0));
    }

    #[test]
    fn test_zero_duration_is_clamped() {
        let mut p = ActivityProgress::new("x", 0);
        assert_eq!(p.duration_ms, 1);
        assert!(p.advance(1.0));
    }

    #[test]
    fn test_activity_classification() {
        let idle = CurrentActivity::Idle;
        assert!(idle.is_idle());
        assert_eq!(idle.kind(), None);
        assert_eq!(idle.target_id(), None);

        let travel = CurrentActivity::Traveling {
            progress: ActivityProgress::new("varrock", 9000),
            base_time_ms: 9000,
        };
        assert!(travel.is_traveling());
        assert!(!travel.is_production());
        assert_eq!(travel.target_id(), Some("varrock"));

        let mining = CurrentActivity::Mining(ActivityProgress::new("tin_ore", 4500));
        assert!(mining.is_production());
        assert_eq!(mining.kind(), Some(ActivityKind::Mining));
    }
}
