// Tick and timing
pub const AUTOSAVE_INTERVAL_MS: f64 = 30_000.0;
pub const ENEMY_TURN_DELAY_MS: f64 = 1_000.0;
/// One real second advances the game clock by one minute.
pub const GAME_MINUTES_PER_REAL_MS: f64 = 1.0 / 1000.0;
pub const MINUTES_PER_DAY: u64 = 1440;

// XP curve: required(L) = floor(XP_CURVE_BASE * XP_CURVE_GROWTH^(L-1))
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_GROWTH: f64 = 1.15;

// Travel
pub const DEFAULT_TRAVEL_TIME_MS: u64 = 5_000;
pub const AGILITY_SPEED_PER_LEVEL: f64 = 0.005;
pub const AGILITY_SPEED_LEVEL_CAP: u32 = 99;
pub const AGILITY_XP_PER_SECOND: f64 = 2.0;

// Combat
pub const PLAYER_MAX_HIT_ROLL: i32 = 8;
pub const COMBAT_XP_PER_DAMAGE: u64 = 4;
pub const HITPOINTS_XP_PER_DAMAGE: f64 = 1.33;
pub const DEFENSE_XP_PER_DAMAGE_TAKEN: u64 = 4;

// Fresh player
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";
pub const DEFAULT_MAX_HP: u32 = 30;
pub const DEFAULT_GOLD: u64 = 20;
pub const DEFAULT_INVENTORY_CAPACITY: u32 = 20;

// World
pub const START_LOCATION_ID: &str = "lumbridge";
pub const DEFAULT_MENU: &str = "main";

// Messages
pub const MESSAGE_LOG_CAPACITY: usize = 50;

// Persistence
pub const SAVE_VERSION: u32 = 2;
pub const SAVE_FILE_NAME: &str = "save.json";
