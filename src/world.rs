use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{
    GHOST_MAX_SPEED, GHOST_RADIUS, GHOST_SPEED, GHOST_SPEED_STEP, GHOST_SPRITE_COUNT,
    PLAYER_RADIUS, PLAYER_SPEED,
};
use crate::entities::{
    Bullet, Direction, Enemy, EnemyFactory, GameState, Particle, Player, Point,
    create_explosion_particles,
};
use crate::score::ScoreManager;

/// Something that happened during a frame, for sound and logging
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// `by` is the player credited with the kill, if any
    GhostDestroyed { at: Point, by: Option<usize> },
    PlayerHit { player: usize, lives_left: u8 },
    GameOver { new_high_score: bool },
}

/// Ghost speed for the current score: faster every 100 points, up to a cap
pub fn ghost_speed_for(score: u32) -> f32 {
    (GHOST_SPEED + GHOST_SPEED_STEP * (score / 100) as f32).min(GHOST_MAX_SPEED)
}

/// The simulated arena: players, ghosts, shots and the score
pub struct World {
    pub state: GameState,
    pub players: Vec<Player>,
    pub enemies: Vec<Box<dyn Enemy>>,
    /// Shots of eliminated players that are still flying
    pub stray_bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub score: ScoreManager,
    /// Set when the last game ended on a new high score
    pub new_high_score: bool,
    /// Arena size in world pixels
    pub width: f32,
    pub height: f32,
    pub elapsed_ms: u64,
    player_count: usize,
    spawn_interval_ms: u32,
    spawn_timer_ms: u32,
}

impl World {
    pub fn new(config: &GameConfig, width: f32, height: f32) -> Self {
        let mut world = Self {
            state: GameState::Playing,
            players: Vec::new(),
            enemies: Vec::new(),
            stray_bullets: Vec::new(),
            particles: Vec::new(),
            score: ScoreManager::new(),
            new_high_score: false,
            width,
            height,
            elapsed_ms: 0,
            player_count: config.players,
            spawn_interval_ms: config.spawn_interval_ms,
            spawn_timer_ms: 0,
        };
        world.spawn_players();
        world
    }

    /// Starts a new game. The high score carries over.
    pub fn restart(&mut self) {
        log::info!("restarting, high score {}", self.score.high_score());
        self.score.reset_score();
        self.state = GameState::Playing;
        self.new_high_score = false;
        self.enemies.clear();
        self.stray_bullets.clear();
        self.particles.clear();
        self.elapsed_ms = 0;
        self.spawn_timer_ms = 0;
        self.spawn_players();
    }

    fn spawn_players(&mut self) {
        // Spread players evenly along the lower part of the arena
        let step = self.width / (self.player_count + 1) as f32;
        let y = self.height * 0.75;
        self.players = (0..self.player_count)
            .map(|id| {
                let mut player = Player::new(id, step * (id + 1) as f32, y);
                player.clamp_to(self.width, self.height);
                player
            })
            .collect();
    }

    /// Adopts a new arena size, pulling players back inside
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        for player in &mut self.players {
            player.clamp_to(width, height);
        }
    }

    pub fn move_player(&mut self, player: usize, direction: Direction, delta_ms: u32) {
        let (width, height) = (self.width, self.height);
        let Some(player) = self.players.get_mut(player).filter(|p| p.is_alive()) else {
            return;
        };
        let distance = PLAYER_SPEED * delta_ms as f32 / 1000.0;
        let r = PLAYER_RADIUS as f32;
        match direction {
            Direction::Left => player.move_left(distance, r),
            Direction::Right => player.move_right(distance, (width - r).max(r)),
            Direction::Up => player.move_up(distance, r),
            Direction::Down => player.move_down(distance, (height - r).max(r)),
        }
    }

    /// Returns whether a shot was fired
    pub fn fire(&mut self, player: usize) -> bool {
        self.state == GameState::Playing
            && self.players.get_mut(player).is_some_and(|p| p.try_fire())
    }

    /// Kills every live ghost, crediting `player`. Returns the events for
    /// each ghost destroyed.
    pub fn detonate_bomb(&mut self, player: usize) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Playing {
            return events;
        }
        let Some(bomber) = self.players.get_mut(player) else {
            return events;
        };
        if !bomber.take_bomb() {
            return events;
        }

        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.kill(&mut self.score);
            bomber.kills += 1;
            let at = enemy.position();
            self.particles.extend(create_explosion_particles(at));
            events.push(FrameEvent::GhostDestroyed {
                at,
                by: Some(player),
            });
        }
        log::info!("player {player} bombed {} ghosts", events.len());
        self.enemies.retain(|e| e.is_alive());
        events
    }

    /// Advances the simulation by one frame
    pub fn update<R: Rng>(&mut self, delta_ms: u32, rng: &mut R) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Playing {
            return events;
        }
        self.elapsed_ms += u64::from(delta_ms);

        let (width, height) = (self.width, self.height);
        for player in &mut self.players {
            player.update_timers(delta_ms);
            player.update_bullets(delta_ms, width, height);
        }
        for bullet in &mut self.stray_bullets {
            bullet.update(delta_ms);
        }
        self.stray_bullets
            .retain(|b| !b.is_out_of_bounds(width, height));
        for particle in &mut self.particles {
            particle.update(delta_ms);
        }
        self.particles
            .retain(|p| !p.is_dead() && !p.is_out_of_bounds(width, height));

        self.spawn_timer_ms += delta_ms;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_timer_ms -= self.spawn_interval_ms;
            self.spawn_ghost(rng);
        }

        for enemy in &mut self.enemies {
            if let Some(target) = target_for(&self.players, enemy.player_to_follow()) {
                enemy.update(target, delta_ms);
            }
        }

        self.resolve_bullet_hits(&mut events);
        self.resolve_contacts(&mut events);
        self.enemies.retain(|e| e.is_alive());

        if self.players.iter().all(|p| !p.is_alive()) {
            self.state = GameState::GameOver;
            self.new_high_score = self.score.check_new_high_score();
            log::info!(
                "game over: score {} high score {} after {} ms",
                self.score.score(),
                self.score.high_score(),
                self.elapsed_ms
            );
            events.push(FrameEvent::GameOver {
                new_high_score: self.new_high_score,
            });
        }

        events
    }

    fn spawn_ghost<R: Rng>(&mut self, rng: &mut R) {
        let r = GHOST_RADIUS as f32;
        let (x, y) = match rng.random_range(0..4) {
            0 => (rng.random_range(0.0..self.width.max(1.0)), -r),
            1 => (rng.random_range(0.0..self.width.max(1.0)), self.height + r),
            2 => (-r, rng.random_range(0.0..self.height.max(1.0))),
            _ => (self.width + r, rng.random_range(0.0..self.height.max(1.0))),
        };

        let alive: Vec<usize> = self
            .players
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.id)
            .collect();
        let mut ghost = if self.players.len() > 1 && !alive.is_empty() {
            let target = alive[rng.random_range(0..alive.len())];
            let sprite = rng.random_range(0..GHOST_SPRITE_COUNT);
            EnemyFactory::create_enemy_with(x, y, sprite, target)
        } else {
            EnemyFactory::create_enemy(x, y)
        };
        ghost.set_speed(ghost_speed_for(self.score.score()));

        log::debug!(
            "spawned ghost at ({x:.0}, {y:.0}) speed {} following {:?}",
            ghost.speed(),
            ghost.player_to_follow()
        );
        self.enemies.push(ghost);
    }

    /// Shots from active players are attributed: the first hit removes the
    /// ghost and credits the shooter once. Stray shots consume everything
    /// they touch.
    fn resolve_bullet_hits(&mut self, events: &mut Vec<FrameEvent>) {
        for enemy in &mut self.enemies {
            for player in &mut self.players {
                if enemy.is_colliding_with_bullets(&mut player.bullets, &mut self.score) {
                    enemy.remove();
                    player.kills += 1;
                    events.push(FrameEvent::GhostDestroyed {
                        at: enemy.position(),
                        by: Some(player.id),
                    });
                    break;
                }
            }

            if enemy.is_alive() {
                enemy.detect_collision_with_bullets(&mut self.stray_bullets, &mut self.score);
                if !enemy.is_alive() {
                    events.push(FrameEvent::GhostDestroyed {
                        at: enemy.position(),
                        by: None,
                    });
                }
            }

            if !enemy.is_alive() {
                self.particles
                    .extend(create_explosion_particles(enemy.position()));
            }
        }
    }

    /// A ghost touching a vulnerable player costs a life and vanishes
    /// without scoring
    fn resolve_contacts(&mut self, events: &mut Vec<FrameEvent>) {
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            for player in self.players.iter_mut().filter(|p| p.is_alive()) {
                let reach = (enemy.radius() + player.radius()) as f32;
                if enemy.position().distance_to(player.position()) > reach || !player.hit() {
                    continue;
                }
                enemy.remove();
                events.push(FrameEvent::PlayerHit {
                    player: player.id,
                    lives_left: player.lives,
                });
                log::debug!("player {} hit, {} lives left", player.id, player.lives);

                if !player.is_alive() {
                    log::info!("player {} eliminated with {} kills", player.id, player.kills);
                    self.stray_bullets.extend(player.bullets.drain(..));
                }
                break;
            }
        }
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }
}

/// Where a ghost should head: its own player while alive, otherwise the
/// first player still standing
fn target_for(players: &[Player], follow: Option<usize>) -> Option<Point> {
    follow
        .and_then(|index| players.get(index))
        .filter(|p| p.is_alive())
        .or_else(|| players.iter().find(|p| p.is_alive()))
        .map(Player::position)
}
