use std::fmt::Debug;

use super::geometry::Point;
use super::projectile::{Projectile, ProjectileSeq};
use crate::score::ScoreManager;
use crate::sprites::{SpriteCanvas, SpriteId};

/// Everything the game loop can do with an enemy.
///
/// An enemy starts out dead, comes alive on its first `update` and dies when
/// shot, killed or removed. Dead enemies stay in their collection until the
/// owner drops them.
pub trait Enemy: Debug {
    /// Steers toward `player_position` and advances by `delta_ms` of travel.
    /// Always leaves the enemy alive.
    fn update(&mut self, player_position: Point, delta_ms: u32);

    /// Draws the enemy centered on its position. Does nothing when dead.
    fn render(&self, canvas: &mut dyn SpriteCanvas);

    /// Consumes every fired projectile touching this enemy, scoring each one.
    /// The enemy dies on the first hit.
    fn detect_collision_with_bullets(
        &mut self,
        bullets: &mut dyn ProjectileSeq,
        score: &mut ScoreManager,
    );

    /// Consumes and scores the first fired projectile touching this enemy,
    /// leaving the alive flag to the caller. Returns whether anything hit.
    fn is_colliding_with_bullets(
        &mut self,
        bullets: &mut dyn ProjectileSeq,
        score: &mut ScoreManager,
    ) -> bool;

    /// Picks one of the ghost sprites at random
    fn load_image(&mut self);

    fn load_image_at(&mut self, index: usize);

    fn is_alive(&self) -> bool;

    fn x(&self) -> i32;

    fn y(&self) -> i32;

    fn radius(&self) -> i32;

    /// Dies and awards points
    fn kill(&mut self, score: &mut ScoreManager);

    /// Dies without awarding points
    fn remove(&mut self);

    fn set_speed(&mut self, new_speed: f32);

    /// Index of the player this enemy chases, if one was assigned
    fn player_to_follow(&self) -> Option<usize>;

    fn position(&self) -> Point;

    fn velocity(&self) -> Point;

    fn speed(&self) -> f32;

    fn sprite(&self) -> SpriteId;
}

/// Circle-circle overlap on whole-pixel coordinates. Touching counts.
pub fn touches(x: i32, y: i32, radius: i32, projectile: &dyn Projectile) -> bool {
    let dx = i64::from(projectile.x()) - i64::from(x);
    let dy = i64::from(projectile.y()) - i64::from(y);
    let reach = i64::from(radius) + i64::from(projectile.radius());
    dx * dx + dy * dy <= reach * reach
}

/// Index of the first fired projectile at or after `from` that touches the
/// circle at (`x`, `y`).
pub fn next_hit(
    x: i32,
    y: i32,
    radius: i32,
    bullets: &dyn ProjectileSeq,
    from: usize,
) -> Option<usize> {
    (from..bullets.projectile_count()).find(|&index| {
        bullets
            .projectile_at(index)
            .is_some_and(|p| p.is_fired() && touches(x, y, radius, p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Bullet;

    fn fired(x: f32, y: f32) -> Bullet {
        let mut bullet = Bullet::new(x, y);
        bullet.fired = true;
        bullet
    }

    #[test]
    fn test_touches_is_boundary_inclusive() {
        // 42 + 6 apart on the x axis
        assert!(touches(0, 0, 42, &fired(48.0, 0.0)));
        assert!(!touches(0, 0, 42, &fired(49.0, 0.0)));
    }

    #[test]
    fn test_touches_diagonal() {
        // 3-4-5 triangle scaled to a distance of 50
        assert!(touches(0, 0, 44, &fired(30.0, 40.0)));
        assert!(!touches(0, 0, 43, &fired(30.0, 40.0)));
    }

    #[test]
    fn test_next_hit_skips_unfired_bullets() {
        let bullets = vec![Bullet::new(0.0, 0.0), fired(1.0, 1.0)];
        assert_eq!(next_hit(0, 0, 42, &bullets, 0), Some(1));
    }

    #[test]
    fn test_next_hit_respects_start_index() {
        let bullets = vec![fired(0.0, 0.0), fired(500.0, 500.0), fired(2.0, 2.0)];
        assert_eq!(next_hit(0, 0, 42, &bullets, 0), Some(0));
        assert_eq!(next_hit(0, 0, 42, &bullets, 1), Some(2));
        assert_eq!(next_hit(0, 0, 42, &bullets, 3), None);
    }
}
