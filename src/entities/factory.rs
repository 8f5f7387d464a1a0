use super::enemy::Enemy;
use super::ghost::GhostEnemy;

/// Builds enemies without exposing the concrete type
pub struct EnemyFactory;

impl EnemyFactory {
    /// Enemy with a random sprite that chases the default player
    pub fn create_enemy(start_x: f32, start_y: f32) -> Box<dyn Enemy> {
        Box::new(GhostEnemy::new(start_x, start_y))
    }

    pub fn create_enemy_with(
        start_x: f32,
        start_y: f32,
        sprite_index: usize,
        player_to_follow: usize,
    ) -> Box<dyn Enemy> {
        Box::new(GhostEnemy::with_target(
            start_x,
            start_y,
            sprite_index,
            player_to_follow,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GHOST_SPRITE_COUNT;
    use crate::sprites::SpriteId;

    #[test]
    fn test_create_enemy_defaults() {
        let enemy = EnemyFactory::create_enemy(30.0, 40.0);
        assert_eq!(enemy.x(), 30);
        assert_eq!(enemy.y(), 40);
        assert!(!enemy.is_alive());
        assert_eq!(enemy.player_to_follow(), None);
        assert!(enemy.sprite().0 < GHOST_SPRITE_COUNT);
    }

    #[test]
    fn test_create_enemy_with_explicit_parameters() {
        let enemy = EnemyFactory::create_enemy_with(30.0, 40.0, 2, 1);
        assert_eq!(enemy.x(), 30);
        assert_eq!(enemy.y(), 40);
        assert_eq!(enemy.sprite(), SpriteId(2));
        assert_eq!(enemy.player_to_follow(), Some(1));
    }
}
