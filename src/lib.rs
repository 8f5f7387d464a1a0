// Library exports for testing
pub use app::App;
pub use config::GameConfig;
pub use entities::{
    Bullet, Direction, Enemy, EnemyFactory, GameState, GhostEnemy, Player, Point, Projectile,
    ProjectileSeq,
};
pub use score::ScoreManager;
pub use world::{FrameEvent, World};

pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod entities;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod sprites;
pub mod world;
