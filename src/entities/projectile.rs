use std::collections::VecDeque;

use super::geometry::{Direction, Point};
use crate::constants::{BULLET_RADIUS, BULLET_SPEED};

/// Anything that can hit a ghost. Coordinates are truncated to whole pixels.
pub trait Projectile {
    fn x(&self) -> i32;
    fn y(&self) -> i32;
    fn radius(&self) -> i32;
    fn is_fired(&self) -> bool;
}

/// A sequence of projectiles that supports removal while it is being scanned.
///
/// Implemented for the collections the game keeps bullets in, so collision
/// code does not care how a caller stores its shots.
pub trait ProjectileSeq {
    fn projectile_count(&self) -> usize;
    fn projectile_at(&self, index: usize) -> Option<&dyn Projectile>;
    fn remove_projectile(&mut self, index: usize);
}

impl<P: Projectile> ProjectileSeq for Vec<P> {
    fn projectile_count(&self) -> usize {
        self.len()
    }

    fn projectile_at(&self, index: usize) -> Option<&dyn Projectile> {
        self.get(index).map(|p| p as &dyn Projectile)
    }

    fn remove_projectile(&mut self, index: usize) {
        if index < self.len() {
            self.remove(index);
        }
    }
}

impl<P: Projectile> ProjectileSeq for VecDeque<P> {
    fn projectile_count(&self) -> usize {
        self.len()
    }

    fn projectile_at(&self, index: usize) -> Option<&dyn Projectile> {
        self.get(index).map(|p| p as &dyn Projectile)
    }

    fn remove_projectile(&mut self, index: usize) {
        self.remove(index);
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub radius: i32,
    /// Holstered bullets neither move nor collide
    pub fired: bool,
}

impl Bullet {
    /// Creates a holstered bullet at the given position
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            radius: BULLET_RADIUS,
            fired: false,
        }
    }

    pub fn fire(&mut self, direction: Direction) {
        let unit = direction.unit();
        self.velocity_x = unit.x * BULLET_SPEED;
        self.velocity_y = unit.y * BULLET_SPEED;
        self.fired = true;
    }

    pub fn update(&mut self, delta_ms: u32) {
        if !self.fired {
            return;
        }
        let dt = delta_ms as f32 / 1000.0;
        self.x += self.velocity_x * dt;
        self.y += self.velocity_y * dt;
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.x < 0.0 || self.y < 0.0 || self.x >= width || self.y >= height
    }
}

impl Projectile for Bullet {
    fn x(&self) -> i32 {
        self.x as i32
    }

    fn y(&self) -> i32 {
        self.y as i32
    }

    fn radius(&self) -> i32 {
        self.radius
    }

    fn is_fired(&self) -> bool {
        self.fired
    }
}
