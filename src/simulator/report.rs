//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Counters for one simulated playthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub ticks: u64,
    pub game_minutes: f64,
    pub ores_mined: u64,
    pub kills: u64,
    pub deaths: u64,
    pub flees: u64,
    pub bank_trips: u64,
    pub items_banked: u64,
    pub loot_drops: u64,
    pub level_ups: u64,
    /// Final level per skill, keyed by skill name.
    pub skill_levels: BTreeMap<String, u32>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub avg_game_days: f64,
    pub avg_ores_mined: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_flees: f64,
    pub avg_bank_trips: f64,
    pub avg_items_banked: f64,
    pub avg_loot_drops: f64,
    pub avg_skill_levels: BTreeMap<String, f64>,
    pub max_skill_levels: BTreeMap<String, u32>,
    pub runs: Vec<RunStats>,
}

fn average(runs: &[RunStats], field: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(field).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let mut level_sums: BTreeMap<String, f64> = BTreeMap::new();
        let mut max_skill_levels: BTreeMap<String, u32> = BTreeMap::new();
        for run in &runs {
            for (skill, &level) in &run.skill_levels {
                *level_sums.entry(skill.clone()).or_insert(0.0) += level as f64;
                let max = max_skill_levels.entry(skill.clone()).or_insert(0);
                *max = (*max).max(level);
            }
        }
        let count = runs.len().max(1) as f64;
        let avg_skill_levels = level_sums
            .into_iter()
            .map(|(skill, sum)| (skill, sum / count))
            .collect();

        Self {
            num_runs: runs.len() as u32,
            avg_game_days: average(&runs, |r| r.game_minutes / 1440.0),
            avg_ores_mined: average(&runs, |r| r.ores_mined as f64),
            avg_kills: average(&runs, |r| r.kills as f64),
            avg_deaths: average(&runs, |r| r.deaths as f64),
            avg_flees: average(&runs, |r| r.flees as f64),
            avg_bank_trips: average(&runs, |r| r.bank_trips as f64),
            avg_items_banked: average(&runs, |r| r.items_banked as f64),
            avg_loot_drops: average(&runs, |r| r.loot_drops as f64),
            avg_skill_levels,
            max_skill_levels,
            runs,
        }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs: {}\n", self.num_runs));
        report.push_str(&format!(
            "Avg game time: {:.2} days\n\n",
            self.avg_game_days
        ));

        report.push_str("── GATHERING ────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Ores Mined:      {:.1}\n", self.avg_ores_mined));
        report.push_str(&format!("  Avg Bank Trips:      {:.1}\n", self.avg_bank_trips));
        report.push_str(&format!("  Avg Items Banked:    {:.1}\n\n", self.avg_items_banked));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Kills:           {:.1}\n", self.avg_kills));
        report.push_str(&format!("  Avg Deaths:          {:.2}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Flees:           {:.2}\n", self.avg_flees));
        report.push_str(&format!("  Avg Loot Drops:      {:.1}\n\n", self.avg_loot_drops));

        report.push_str("── SKILLS (avg / max) ───────────────────────────────────────────\n");
        for (skill, avg) in &self.avg_skill_levels {
            let max = self.max_skill_levels.get(skill).copied().unwrap_or(0);
            report.push_str(&format!("  {:<12} {:>6.1} / {}\n", skill, avg, max));
        }
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
