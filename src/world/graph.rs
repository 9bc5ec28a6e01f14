use rand::Rng;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use super::location::Location;
use crate::core::constants::{DEFAULT_TRAVEL_TIME_MS, START_LOCATION_ID};

/// Result of a travel-time lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelTime {
    /// Edge stored on the origin.
    Direct(u64),
    /// Edge only stored on the destination, used in reverse.
    Reverse(u64),
    /// No edge in either direction; the default duration applies.
    Fallback(u64),
}

impl TravelTime {
    pub fn millis(self) -> u64 {
        match self {
            TravelTime::Direct(ms) | TravelTime::Reverse(ms) | TravelTime::Fallback(ms) => ms,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, TravelTime::Fallback(_))
    }
}

/// A dangling reference found while validating the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    DanglingConnection { from: String, to: String },
    DanglingParent { location: String, parent: String },
    MissingStartLocation(String),
}

/// All locations keyed by id.
#[derive(Debug, Clone)]
pub struct LocationGraph {
    locations: BTreeMap<String, Location>,
    start_location: String,
}

impl Default for LocationGraph {
    fn default() -> Self {
        Self::new(super::data::default_locations(), START_LOCATION_ID)
    }
}

impl LocationGraph {
    pub fn new(locations: Vec<Location>, start_location: &str) -> Self {
        let graph = Self {
            locations: locations
                .into_iter()
                .map(|loc| (loc.id.clone(), loc))
                .collect(),
            start_location: start_location.to_string(),
        };
        for issue in graph.validate() {
            log::warn!("location graph integrity: {:?}", issue);
        }
        graph
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    pub fn start_location(&self) -> &str {
        &self.start_location
    }

    /// Moves where new games, respawns and top-level exits land.
    pub fn with_start_location(mut self, start_location: &str) -> Self {
        if !self.locations.contains_key(start_location) {
            log::warn!("start location {} is not in the graph", start_location);
        }
        self.start_location = start_location.to_string();
        self
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Adds (or overwrites) a directed edge. Returns false if the origin
    /// does not exist.
    pub fn add_connection(&mut self, from_id: &str, to_id: &str, travel_time_ms: u64) -> bool {
        match self.locations.get_mut(from_id) {
            Some(loc) => {
                loc.add_connection(to_id, travel_time_ms);
                if !self.locations.contains_key(to_id) {
                    log::warn!("connection {} -> {} targets an unknown location", from_id, to_id);
                }
                true
            }
            None => false,
        }
    }

    /// Base travel time between two locations, trying the stored edge,
    /// then the reverse edge, then the default.
    pub fn travel_time_between(&self, from_id: &str, to_id: &str) -> TravelTime {
        if let Some(ms) = self.get(from_id).and_then(|l| l.travel_time_to(to_id)) {
            return TravelTime::Direct(ms);
        }
        if let Some(ms) = self.get(to_id).and_then(|l| l.travel_time_to(from_id)) {
            return TravelTime::Reverse(ms);
        }
        log::warn!(
            "no travel edge between {} and {}; using default {}ms",
            from_id,
            to_id,
            DEFAULT_TRAVEL_TIME_MS
        );
        TravelTime::Fallback(DEFAULT_TRAVEL_TIME_MS)
    }

    /// Where "exit" leads from a location: its parent, or the start.
    pub fn exit_target(&self, from_id: &str) -> &str {
        match self.get(from_id).and_then(|l| l.parent.as_deref()) {
            Some(parent) if self.contains(parent) => parent,
            Some(parent) => {
                log::warn!("location {} has unknown parent {}", from_id, parent);
                &self.start_location
            }
            None => &self.start_location,
        }
    }

    /// Draws an enemy id from the location's weighted encounter table.
    /// Returns `None` for unknown locations, empty tables and tables whose
    /// weights sum to zero.
    pub fn weighted_random_encounter(&self, location_id: &str, rng: &mut impl Rng) -> Option<String> {
        let location = self.get(location_id)?;
        let encounters = &location.encounters;
        let total: f64 = encounters.iter().map(|e| e.weight.max(0.0)).sum();
        if encounters.is_empty() || total <= 0.0 {
            return None;
        }

        let mut remaining = rng.gen::<f64>() * total;
        for encounter in encounters.iter().filter(|e| e.weight > 0.0) {
            remaining -= encounter.weight;
            if remaining <= 0.0 {
                return Some(encounter.enemy_id.clone());
            }
        }
        // Rounding overshoot lands on the last drawable entry.
        encounters
            .iter()
            .rev()
            .find(|e| e.weight > 0.0)
            .map(|e| e.enemy_id.clone())
    }

    /// Lists every connection or parent reference that does not resolve.
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        if !self.locations.contains_key(&self.start_location) {
            issues.push(IntegrityIssue::MissingStartLocation(
                self.start_location.clone(),
            ));
        }
        for loc in self.locations.values() {
            for to in loc.connections.keys() {
                if !self.locations.contains_key(to) {
                    issues.push(IntegrityIssue::DanglingConnection {
                        from: loc.id.clone(),
                        to: to.clone(),
                    });
                }
            }
            if let Some(parent) = &loc.parent {
                if !self.locations.contains_key(parent) {
                    issues.push(IntegrityIssue::DanglingParent {
                        location: loc.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        issues
    }

    /// Edges leaving `id` in either stored direction, to known locations.
    fn neighbors<'a>(&'a self, id: &str) -> Vec<(&'a str, u64)> {
        let mut out: Vec<(&str, u64)> = Vec::new();
        if let Some(loc) = self.get(id) {
            for (to, &ms) in &loc.connections {
                if let Some(target) = self.get(to) {
                    out.push((target.id.as_str(), ms));
                }
            }
        }
        for loc in self.locations.values() {
            if let Some(&ms) = loc.connections.get(id) {
                if !out.iter().any(|(to, _)| *to == loc.id) {
                    out.push((loc.id.as_str(), ms));
                }
            }
        }
        out
    }

    /// Cheapest chain of hops from `from_id` to `to_id` by base travel time,
    /// excluding `from_id` itself. `None` when unreachable.
    pub fn route(&self, from_id: &str, to_id: &str) -> Option<Vec<String>> {
        let start = self.get(from_id)?.id.as_str();
        let goal = self.get(to_id)?.id.as_str();

        let mut best: BTreeMap<&str, u64> = BTreeMap::new();
        let mut previous: BTreeMap<&str, &str> = BTreeMap::new();
        let mut queue = BinaryHeap::new();
        best.insert(start, 0);
        queue.push(Reverse((0u64, start)));

        while let Some(Reverse((cost, node))) = queue.pop() {
            if node == goal {
                break;
            }
            if best.get(node).is_some_and(|&b| cost > b) {
                continue;
            }
            for (next, ms) in self.neighbors(node) {
                let candidate = cost + ms;
                if best.get(next).map_or(true, |&b| candidate < b) {
                    best.insert(next, candidate);
                    previous.insert(next, node);
                    queue.push(Reverse((candidate, next)));
                }
            }
        }

        if !best.contains_key(goal) {
            return None;
        }
        let mut path = Vec::new();
        let mut node = goal;
        while node != start {
            path.push(node.to_string());
            node = *previous.get(node)?;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::location::Action;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_graph() -> LocationGraph {
        LocationGraph::new(
            vec![
                Location::new("town", "Town", "city").with_connections(&[("mine", 3000)]),
                Location::new("mine", "Mine", "mine")
                    .with_parent("town")
                    .with_actions(&[Action::Mine]),
                Location::new("field", "Field", "combat")
                    .with_encounters(&[("goblin", 5.0), ("cow", 5.0)]),
            ],
            "town",
        )
    }

    #[test]
    fn test_travel_time_direct_and_reverse() {
        let graph = small_graph();
        assert_eq!(graph.travel_time_between("town", "mine"), TravelTime::Direct(3000));
        assert_eq!(graph.travel_time_between("mine", "town"), TravelTime::Reverse(3000));
    }

    #[test]
    fn test_travel_time_fallback() {
        let graph = small_graph();
        let time = graph.travel_time_between("town", "field");
        assert!(time.is_fallback());
        assert_eq!(time.millis(), DEFAULT_TRAVEL_TIME_MS);
    }

    #[test]
    fn test_add_connection() {
        let mut graph = small_graph();
        assert!(graph.add_connection("town", "field", 2500));
        assert_eq!(graph.travel_time_between("field", "town"), TravelTime::Reverse(2500));
        assert!(!graph.add_connection("nowhere", "town", 100));
    }

    #[test]
    fn test_exit_target() {
        let graph = small_graph();
        assert_eq!(graph.exit_target("mine"), "town");
        assert_eq!(graph.exit_target("field"), "town");
        assert_eq!(graph.exit_target("unknown"), "town");
    }

    #[test]
    fn test_weighted_encounter_empty_table() {
        let graph = small_graph();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(graph.weighted_random_encounter("mine", &mut rng), None);
        assert_eq!(graph.weighted_random_encounter("missing", &mut rng), None);
    }

    #[test]
    fn test_weighted_encounter_covers_all_entries() {
        let graph = small_graph();
        let mut rng = StdRng::seed_from_u64(7);
        let mut goblins = 0;
        let mut cows = 0;
        for _ in 0..1000 {
            match graph.weighted_random_encounter("field", &mut rng).as_deref() {
                Some("goblin") => goblins += 1,
                Some("cow") => cows += 1,
                other => panic!("unexpected encounter {:?}", other),
            }
        }
        assert!(goblins > 350 && cows > 350, "goblins={} cows={}", goblins, cows);
    }

    #[test]
    fn test_zero_weight_entries_never_drawn() {
        let graph = LocationGraph::new(
            vec![Location::new("pit", "Pit", "combat")
                .with_encounters(&[("ghost", 0.0), ("rat", 1.0)])],
            "pit",
        );
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(graph.weighted_random_encounter("pit", &mut rng).as_deref(), Some("rat"));
        }
    }

    #[test]
    fn test_validate_reports_dangling_references() {
        let graph = LocationGraph::new(
            vec![Location::new("a", "A", "city")
                .with_parent("ghost_town")
                .with_connections(&[("b", 100)])],
            "start",
        );
        let issues = graph.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&IntegrityIssue::DanglingConnection {
            from: "a".to_string(),
            to: "b".to_string(),
        }));
    }

    #[test]
    fn test_route_follows_edges_both_ways() {
        let graph = LocationGraph::default();
        let path = graph
            .route("lumbridge_swamp_mine", "lumbridge_castle_bank")
            .unwrap();
        assert_eq!(
            path,
            vec![
                "lumbridge_swamp",
                "lumbridge",
                "lumbridge_castle",
                "lumbridge_castle_bank"
            ]
        );
        assert_eq!(graph.route("lumbridge", "lumbridge"), Some(Vec::new()));
    }

    #[test]
    fn test_start_location_override() {
        let graph = LocationGraph::default().with_start_location("varrock");
        assert_eq!(graph.start_location(), "varrock");
        assert_eq!(graph.exit_target("varrock"), "varrock");
        assert_eq!(graph.exit_target("varrock_west_bank"), "varrock");
    }

    #[test]
    fn test_route_unreachable() {
        let graph = small_graph();
        assert_eq!(graph.route("town", "field"), None);
        assert_eq!(graph.route("town", "nowhere"), None);
    }
}
