use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Things a player can do at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Mine,
    Bank,
    Smelt,
    Craft,
    Combat,
    Shop,
}

/// One row of an encounter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub enemy_id: String,
    pub weight: f64,
}

impl Encounter {
    pub fn new(enemy_id: &str, weight: f64) -> Self {
        Self {
            enemy_id: enemy_id.to_string(),
            weight,
        }
    }
}

/// A node of the world graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Free-form type tag (city, mine, bank, ...).
    pub kind: String,
    pub description: String,
    pub emoji: String,
    /// Destination id -> base travel time in milliseconds.
    pub connections: BTreeMap<String, u64>,
    pub parent: Option<String>,
    pub actions: Vec<Action>,
    pub mining_options: Vec<String>,
    pub encounters: Vec<Encounter>,
}

impl Location {
    pub fn new(id: &str, name: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            description: String::new(),
            emoji: String::new(),
            connections: BTreeMap::new(),
            parent: None,
            actions: Vec::new(),
            mining_options: Vec::new(),
            encounters: Vec::new(),
        }
    }

    pub fn with_emoji(mut self, emoji: &str) -> Self {
        self.emoji = emoji.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_connections(mut self, connections: &[(&str, u64)]) -> Self {
        for (id, time) in connections {
            self.connections.insert(id.to_string(), *time);
        }
        self
    }

    pub fn with_actions(mut self, actions: &[Action]) -> Self {
        self.actions = actions.to_vec();
        self
    }

    pub fn with_mining_options(mut self, ores: &[&str]) -> Self {
        self.mining_options = ores.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_encounters(mut self, encounters: &[(&str, f64)]) -> Self {
        self.encounters = encounters
            .iter()
            .map(|(id, weight)| Encounter::new(id, *weight))
            .collect();
        self
    }

    pub fn has_action(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn travel_time_to(&self, destination_id: &str) -> Option<u64> {
        self.connections.get(destination_id).copied()
    }

    pub fn can_travel_to(&self, destination_id: &str) -> bool {
        self.connections.contains_key(destination_id)
    }

    pub fn offers_ore(&self, ore_id: &str) -> bool {
        self.mining_options.iter().any(|o| o == ore_id)
    }

    pub fn add_connection(&mut self, destination_id: &str, travel_time_ms: u64) {
        self.connections
            .insert(destination_id.to_string(), travel_time_ms);
    }
}
