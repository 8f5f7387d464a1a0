// World units are pixels. The terminal renderer maps them onto cells using
// the sprite font size below.
pub const CELL_WIDTH_PX: u16 = 8;
pub const CELL_HEIGHT_PX: u16 = 16;

// Ghosts
pub const GHOST_DIAMETER: i32 = 84;
pub const GHOST_RADIUS: i32 = GHOST_DIAMETER / 2;
pub const GHOST_SPEED: f32 = 168.0;
/// Speed gained per 100 points scored
pub const GHOST_SPEED_STEP: f32 = 12.0;
pub const GHOST_MAX_SPEED: f32 = 336.0;
pub const GHOST_SPRITE_COUNT: usize = 4;

// Player
pub const PLAYER_RADIUS: i32 = 16;
pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_LIVES: u8 = 3;
pub const PLAYER_BOMBS: u8 = 1;
pub const FIRE_COOLDOWN_MS: u32 = 200;
pub const INVULNERABLE_MS: u32 = 1500;
pub const MAX_BULLETS_PER_PLAYER: usize = 8;

// Bullets
pub const BULLET_RADIUS: i32 = 6;
pub const BULLET_SPEED: f32 = 400.0;

// Frame pacing
pub const FRAME_SLEEP_MS: u64 = 8;
pub const MAX_FRAME_DELTA_MS: u32 = 100;
pub const DEFAULT_SPAWN_INTERVAL_MS: u32 = 1500;
