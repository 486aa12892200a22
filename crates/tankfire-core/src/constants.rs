//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Gravity magnitude (m/s²), acting along -y.
pub const GRAVITY: f64 = 9.81;

// --- Arena ---

/// Projectiles beyond this horizontal distance from the origin are removed.
pub const ARENA_HALF_EXTENT: f64 = 200.0;

/// Height of the ground plane.
pub const GROUND_HEIGHT: f64 = 0.0;

// --- Ballistics ---

/// `|sin(2θ)|` below this is treated as a degenerate launch angle.
pub const DEGENERATE_ANGLE_EPSILON: f64 = 1e-6;

/// Elevation substituted by callers when the solver reports a degenerate angle.
pub const MIN_LOFT_ANGLE_DEGREES: f64 = 1.0;

// --- Player tank ---

/// Forward speed at full throttle (m/s).
pub const TANK_SPEED: f64 = 12.0;

/// Hull turn rate at full steering (degrees per second).
pub const TANK_TURN_SPEED: f64 = 180.0;

/// Turret traverse rate (degrees per second).
pub const TURRET_YAW_RATE: f64 = 50.0;

/// Cannon elevation rate (degrees per second).
pub const CANNON_ELEVATION_RATE: f64 = 100.0;

/// Cannon elevation limits (degrees above the horizon).
pub const CANNON_MIN_ELEVATION: f64 = 0.0;
pub const CANNON_MAX_ELEVATION: f64 = 90.0;

/// Range the cannon solves launch speed for (meters).
pub const SHELL_MAX_RANGE: f64 = 50.0;

/// Multiplier applied to the solved launch speed.
pub const SHELL_LAUNCH_MULTIPLIER: f64 = 1.0;

/// Launch speed limits for the player cannon (m/s).
pub const SHELL_MIN_LAUNCH_SPEED: f64 = 2.0;
pub const SHELL_MAX_LAUNCH_SPEED: f64 = 30.0;

/// Reload time is `max_range / RELOAD_RANGE_DIVISOR` seconds.
pub const RELOAD_RANGE_DIVISOR: f64 = 10.0;

/// Arc preview sampling.
pub const PREVIEW_SAMPLE_COUNT: usize = 60;
pub const PREVIEW_TIME_STEP: f64 = 0.1;

/// Starting health of the player tank.
pub const PLAYER_HEALTH: u32 = 10;

// --- Enemy turrets ---

pub const DEFAULT_DETECTION_RADIUS: f64 = 30.0;
pub const DEFAULT_FIELD_OF_VIEW_DEGREES: f64 = 90.0;
pub const DEFAULT_SCAN_INTERVAL_SECS: f64 = 0.2;
pub const DEFAULT_FIRE_RATE_HZ: f64 = 2.0;
pub const DEFAULT_PROJECTILE_SPEED: f64 = 40.0;

/// Yaw sweep rate while searching (degrees per second).
pub const DEFAULT_SWEEP_RATE_DEGREES: f64 = 30.0;

/// Enemy rounds expire after this many seconds. At the default projectile
/// speed this carries a round out to the default detection radius.
pub const ENEMY_ROUND_LIFETIME_SECS: f64 = 0.75;

/// Starting health of an enemy turret.
pub const ENEMY_HEALTH: u32 = 3;

// --- Geometry ---

/// Hit sphere radius for tanks and turrets (meters).
pub const TANK_HIT_RADIUS: f64 = 1.5;

/// Height of the muzzle/sensor above the entity origin.
pub const MUZZLE_HEIGHT: f64 = 1.2;

/// Distance from the turret pivot to the muzzle.
pub const BARREL_LENGTH: f64 = 2.0;

// --- Lifecycle ---

/// Seconds a destroyed tank lingers before it is removed.
pub const DESTROY_DELAY_SECS: f64 = 2.5;

/// Seconds between player destruction and the scene reset.
pub const GAME_OVER_RESET_DELAY_SECS: f64 = 2.0;

/// Default RNG seed for scattered layouts.
pub const DEFAULT_SEED: u64 = 42;
