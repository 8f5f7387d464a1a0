use rand::Rng;

use super::enemy::{Enemy, next_hit};
use super::geometry::Point;
use super::projectile::ProjectileSeq;
use crate::constants::{GHOST_RADIUS, GHOST_SPEED, GHOST_SPRITE_COUNT};
use crate::score::ScoreManager;
use crate::sprites::{SpriteCanvas, SpriteId};

/// A ghost that homes in on its player at a constant speed
#[derive(Debug, Clone)]
pub struct GhostEnemy {
    position: Point,
    alive: bool,
    /// Pixels per second
    speed: f32,
    velocity: Point,
    radius: i32,
    sprite: SpriteId,
    player_to_follow: Option<usize>,
}

impl GhostEnemy {
    /// Ghost with a random sprite and no assigned player
    pub fn new(start_x: f32, start_y: f32) -> Self {
        let mut ghost = Self::at(start_x, start_y, None);
        ghost.load_image();
        ghost
    }

    pub fn with_target(
        start_x: f32,
        start_y: f32,
        sprite_index: usize,
        player_to_follow: usize,
    ) -> Self {
        let mut ghost = Self::at(start_x, start_y, Some(player_to_follow));
        ghost.load_image_at(sprite_index);
        ghost
    }

    fn at(start_x: f32, start_y: f32, player_to_follow: Option<usize>) -> Self {
        Self {
            position: Point::new(start_x, start_y),
            alive: false,
            speed: GHOST_SPEED,
            velocity: Point::default(),
            radius: GHOST_RADIUS,
            sprite: SpriteId(0),
            player_to_follow,
        }
    }
}

impl Enemy for GhostEnemy {
    fn update(&mut self, player_position: Point, delta_ms: u32) {
        // Bearing measured from the negative y axis, so screen-up is zero
        let angle = (player_position.x - self.position.x).atan2(self.position.y - player_position.y);
        self.velocity = Point::new(angle.sin() * self.speed, -angle.cos() * self.speed);

        let dt = delta_ms as f32 / 1000.0;
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;

        self.alive = true;
    }

    fn render(&self, canvas: &mut dyn SpriteCanvas) {
        if self.alive {
            canvas.draw_centered(self.sprite, self.position.x, self.position.y);
        }
    }

    fn detect_collision_with_bullets(
        &mut self,
        bullets: &mut dyn ProjectileSeq,
        score: &mut ScoreManager,
    ) {
        if !self.alive {
            return;
        }
        let (x, y) = (self.x(), self.y());
        let mut from = 0;
        while let Some(index) = next_hit(x, y, self.radius, bullets, from) {
            self.alive = false;
            score.increment_score();
            bullets.remove_projectile(index);
            from = index;
        }
    }

    fn is_colliding_with_bullets(
        &mut self,
        bullets: &mut dyn ProjectileSeq,
        score: &mut ScoreManager,
    ) -> bool {
        if !self.alive {
            return false;
        }
        match next_hit(self.x(), self.y(), self.radius, bullets, 0) {
            Some(index) => {
                score.increment_score();
                bullets.remove_projectile(index);
                true
            }
            None => false,
        }
    }

    fn load_image(&mut self) {
        self.sprite = SpriteId(rand::rng().random_range(0..GHOST_SPRITE_COUNT));
    }

    fn load_image_at(&mut self, index: usize) {
        self.sprite = SpriteId(index);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn x(&self) -> i32 {
        self.position.x as i32
    }

    fn y(&self) -> i32 {
        self.position.y as i32
    }

    fn radius(&self) -> i32 {
        self.radius
    }

    fn kill(&mut self, score: &mut ScoreManager) {
        self.alive = false;
        score.increment_score();
    }

    fn remove(&mut self) {
        self.alive = false;
    }

    fn set_speed(&mut self, new_speed: f32) {
        self.speed = new_speed;
    }

    fn player_to_follow(&self) -> Option<usize> {
        self.player_to_follow
    }

    fn position(&self) -> Point {
        self.position
    }

    fn velocity(&self) -> Point {
        self.velocity
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn sprite(&self) -> SpriteId {
        self.sprite
    }
}
