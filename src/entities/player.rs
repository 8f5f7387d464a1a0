use std::collections::VecDeque;

use super::geometry::{Direction, Point};
use super::projectile::Bullet;
use crate::constants::{
    FIRE_COOLDOWN_MS, INVULNERABLE_MS, MAX_BULLETS_PER_PLAYER, PLAYER_BOMBS, PLAYER_LIVES,
    PLAYER_RADIUS,
};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub lives: u8,
    pub bombs: u8,
    /// Last direction moved; shots travel this way
    pub facing: Direction,
    pub fire_cooldown_ms: u32,
    pub invulnerable_ms: u32,
    pub kills: u32,
    /// Shots in flight, oldest first
    pub bullets: VecDeque<Bullet>,
}

impl Player {
    pub fn new(id: usize, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            lives: PLAYER_LIVES,
            bombs: PLAYER_BOMBS,
            facing: Direction::Up,
            fire_cooldown_ms: 0,
            invulnerable_ms: 0,
            kills: 0,
            bullets: VecDeque::new(),
        }
    }

    pub fn move_left(&mut self, distance: f32, min_x: f32) {
        self.facing = Direction::Left;
        self.x = (self.x - distance).max(min_x);
    }

    pub fn move_right(&mut self, distance: f32, max_x: f32) {
        self.facing = Direction::Right;
        self.x = (self.x + distance).min(max_x);
    }

    pub fn move_up(&mut self, distance: f32, min_y: f32) {
        self.facing = Direction::Up;
        self.y = (self.y - distance).max(min_y);
    }

    pub fn move_down(&mut self, distance: f32, max_y: f32) {
        self.facing = Direction::Down;
        self.y = (self.y + distance).min(max_y);
    }

    /// Keeps the player inside a `width` x `height` arena
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        let r = PLAYER_RADIUS as f32;
        self.x = self.x.clamp(r, (width - r).max(r));
        self.y = self.y.clamp(r, (height - r).max(r));
    }

    pub fn can_fire(&self) -> bool {
        self.is_alive() && self.fire_cooldown_ms == 0
    }

    pub fn reset_cooldown(&mut self) {
        self.fire_cooldown_ms = FIRE_COOLDOWN_MS;
    }

    pub fn update_timers(&mut self, delta_ms: u32) {
        self.fire_cooldown_ms = self.fire_cooldown_ms.saturating_sub(delta_ms);
        self.invulnerable_ms = self.invulnerable_ms.saturating_sub(delta_ms);
    }

    /// Fires one bullet in the facing direction if the cooldown allows.
    /// At the in-flight cap the oldest bullet is dropped.
    pub fn try_fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.reset_cooldown();

        let mut bullet = Bullet::new(self.x, self.y);
        bullet.fire(self.facing);
        if self.bullets.len() >= MAX_BULLETS_PER_PLAYER {
            self.bullets.pop_front();
        }
        self.bullets.push_back(bullet);
        true
    }

    /// Moves shots and drops the ones that left the arena
    pub fn update_bullets(&mut self, delta_ms: u32, width: f32, height: f32) {
        for bullet in &mut self.bullets {
            bullet.update(delta_ms);
        }
        self.bullets.retain(|b| !b.is_out_of_bounds(width, height));
    }

    /// Takes a hit from a ghost. Returns whether a life was lost.
    pub fn hit(&mut self) -> bool {
        if !self.is_alive() || self.is_flashing() {
            return false;
        }
        self.lives -= 1;
        self.invulnerable_ms = INVULNERABLE_MS;
        true
    }

    pub fn take_bomb(&mut self) -> bool {
        if !self.is_alive() || self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        true
    }

    /// Invulnerable after a hit
    pub fn is_flashing(&self) -> bool {
        self.invulnerable_ms > 0
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn radius(&self) -> i32 {
        PLAYER_RADIUS
    }

    pub fn get_sprite_lines(&self) -> [&'static str; 2] {
        match self.facing {
            Direction::Right => ["▟██▀", "▜██▄"],
            Direction::Left => ["▀██▙", "▄██▛"],
            Direction::Up => ["▙  ▟", "▜██▛"],
            Direction::Down => ["▟██▙", "▛  ▜"],
        }
    }

    pub fn get_width(&self) -> u16 {
        4
    }

    pub fn get_height(&self) -> u16 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_new() {
        let player = Player::new(0, 40.0, 20.0);
        assert_eq!(player.x, 40.0);
        assert_eq!(player.y, 20.0);
        assert_eq!(player.lives, PLAYER_LIVES);
        assert_eq!(player.bombs, PLAYER_BOMBS);
        assert_eq!(player.fire_cooldown_ms, 0);
        assert_eq!(player.facing, Direction::Up);
        assert!(player.bullets.is_empty());
    }

    #[test]
    fn test_player_movement_left() {
        let mut player = Player::new(0, 100.0, 100.0);
        player.move_left(10.0, 16.0);
        assert_eq!(player.x, 90.0);
        assert_eq!(player.facing, Direction::Left);

        // Test boundary
        player.move_left(500.0, 16.0);
        assert_eq!(player.x, 16.0);
    }

    #[test]
    fn test_player_movement_right() {
        let mut player = Player::new(0, 100.0, 100.0);
        player.move_right(10.0, 200.0);
        assert_eq!(player.x, 110.0);
        assert_eq!(player.facing, Direction::Right);

        // Test boundary
        player.move_right(500.0, 200.0);
        assert_eq!(player.x, 200.0);
    }

    #[test]
    fn test_player_movement_up_and_down() {
        let mut player = Player::new(0, 100.0, 100.0);
        player.move_up(10.0, 16.0);
        assert_eq!(player.y, 90.0);
        assert_eq!(player.facing, Direction::Up);

        player.move_down(500.0, 300.0);
        assert_eq!(player.y, 300.0);
        assert_eq!(player.facing, Direction::Down);
    }

    #[test]
    fn test_clamp_to_arena() {
        let mut player = Player::new(0, 1000.0, -5.0);
        player.clamp_to(640.0, 480.0);
        assert_eq!(player.x, 640.0 - PLAYER_RADIUS as f32);
        assert_eq!(player.y, PLAYER_RADIUS as f32);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let mut player = Player::new(0, 100.0, 100.0);
        assert!(player.try_fire());
        assert!(!player.try_fire());

        player.update_timers(FIRE_COOLDOWN_MS / 2);
        assert!(!player.can_fire());
        player.update_timers(FIRE_COOLDOWN_MS / 2);
        assert!(player.try_fire());
        assert_eq!(player.bullets.len(), 2);
    }

    #[test]
    fn test_fired_bullet_follows_facing() {
        let mut player = Player::new(0, 100.0, 100.0);
        player.move_right(0.0, 200.0);
        assert!(player.try_fire());

        let bullet = &player.bullets[0];
        assert!(bullet.fired);
        assert!(bullet.velocity_x > 0.0);
        assert_eq!(bullet.velocity_y, 0.0);
    }

    #[test]
    fn test_bullet_cap_drops_oldest() {
        let mut player = Player::new(0, 100.0, 100.0);
        for i in 0..=MAX_BULLETS_PER_PLAYER {
            player.x = i as f32;
            player.fire_cooldown_ms = 0;
            assert!(player.try_fire());
        }
        assert_eq!(player.bullets.len(), MAX_BULLETS_PER_PLAYER);
        assert_eq!(player.bullets[0].x, 1.0);
    }

    #[test]
    fn test_update_bullets_culls_out_of_bounds() {
        let mut player = Player::new(0, 100.0, 20.0);
        assert!(player.try_fire());
        player.update_bullets(100, 640.0, 480.0);
        assert!(player.bullets.is_empty());
    }

    #[test]
    fn test_hit_grants_invulnerability() {
        let mut player = Player::new(0, 100.0, 100.0);
        assert!(player.hit());
        assert_eq!(player.lives, PLAYER_LIVES - 1);
        assert!(player.is_flashing());

        // Hits while flashing are ignored
        assert!(!player.hit());
        assert_eq!(player.lives, PLAYER_LIVES - 1);

        player.update_timers(INVULNERABLE_MS);
        assert!(!player.is_flashing());
        assert!(player.hit());
    }

    #[test]
    fn test_player_dies_after_last_life() {
        let mut player = Player::new(0, 100.0, 100.0);
        for _ in 0..PLAYER_LIVES {
            assert!(player.hit());
            player.update_timers(INVULNERABLE_MS);
        }
        assert!(!player.is_alive());
        assert!(!player.hit());
        assert!(!player.try_fire());
    }

    #[test]
    fn test_take_bomb_once() {
        let mut player = Player::new(0, 100.0, 100.0);
        assert!(player.take_bomb());
        assert!(!player.take_bomb());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_within_bounds(
                moves in prop::collection::vec(
                    (prop::sample::select(vec![
                        Direction::Up, Direction::Down, Direction::Left, Direction::Right
                    ]), 0.0f32..100.0),
                    0..50
                )
            ) {
                let (min, max) = (16.0, 624.0);
                let mut player = Player::new(0, 320.0, 320.0);
                for (direction, distance) in moves {
                    match direction {
                        Direction::Left => player.move_left(distance, min),
                        Direction::Right => player.move_right(distance, max),
                        Direction::Up => player.move_up(distance, min),
                        Direction::Down => player.move_down(distance, max),
                    }
                    prop_assert!(player.x >= min && player.x <= max);
                    prop_assert!(player.y >= min && player.y <= max);
                }
            }
        }
    }
}
