use super::geometry::Point;

/// Pixels per second for explosion sparks
const SPARK_SPEED: f32 = 120.0;
const SPARK_LIFETIME_MS: u32 = 300;
const FLASH_LIFETIME_MS: u32 = 200;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub lifetime_ms: u32,
    pub char: char,
}

impl Particle {
    pub fn new(x: f32, y: f32, velocity_x: f32, velocity_y: f32, lifetime_ms: u32, char: char) -> Self {
        Self {
            x,
            y,
            velocity_x,
            velocity_y,
            lifetime_ms,
            char,
        }
    }

    pub fn update(&mut self, delta_ms: u32) {
        self.lifetime_ms = self.lifetime_ms.saturating_sub(delta_ms);

        let dt = delta_ms as f32 / 1000.0;
        self.x += self.velocity_x * dt;
        self.y += self.velocity_y * dt;
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime_ms == 0
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.x < 0.0 || self.y < 0.0 || self.x >= width || self.y >= height
    }
}

/// Creates an explosion particle effect at the given position
pub fn create_explosion_particles(center: Point) -> Vec<Particle> {
    // Create particles in 8 directions (cardinal + diagonal)
    let directions: [(f32, f32); 8] = [
        (0.0, -1.0),
        (1.0, -1.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
        (-1.0, 1.0),
        (-1.0, 0.0),
        (-1.0, -1.0),
    ];

    let mut particles: Vec<Particle> = directions
        .iter()
        .map(|(dx, dy)| {
            Particle::new(
                center.x,
                center.y,
                dx * SPARK_SPEED,
                dy * SPARK_SPEED,
                SPARK_LIFETIME_MS,
                '*',
            )
        })
        .collect();

    // Add one central particle
    particles.push(Particle::new(center.x, center.y, 0.0, 0.0, FLASH_LIFETIME_MS, 'o'));

    particles
}
