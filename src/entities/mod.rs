mod enemy;
mod factory;
mod game_state;
mod geometry;
mod ghost;
mod particle;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{Enemy, next_hit, touches};
pub use factory::EnemyFactory;
pub use game_state::GameState;
pub use geometry::{Direction, Point};
pub use ghost::GhostEnemy;
pub use particle::{Particle, create_explosion_particles};
pub use player::Player;
pub use projectile::{Bullet, Projectile, ProjectileSeq};
