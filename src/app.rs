use color_eyre::Result;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::constants::{FRAME_SLEEP_MS, MAX_FRAME_DELTA_MS};
use crate::entities::GameState;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView, arena_size_px};
use crate::sprites::SpriteSheet;
use crate::world::{FrameEvent, World};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    world: World,
    /// Frames info
    last_frame_time: Instant,
    delta_ms: u32,
    fps: u32,
    rng: ThreadRng,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    sprites: SpriteSheet,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &GameConfig, key_release_supported: bool) -> Result<Self> {
        let sprites = SpriteSheet::load(&config.assets_dir)?;
        log::info!(
            "starting with {} player(s), spawn every {} ms, {} ghost sprites from {}",
            config.players,
            config.spawn_interval_ms,
            sprites.len(),
            config.assets_dir.display()
        );

        // Start with reasonable defaults, will be updated on first render
        Ok(Self {
            running: true,
            world: World::new(config, 640.0, 480.0),
            last_frame_time: Instant::now(),
            delta_ms: 0,
            fps: 0,
            rng: rand::rng(),
            input_manager: InputManager::new(config.players, key_release_supported),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::new(&config.assets_dir),
            sprites,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Calculate FPS and the frame delta
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }
            // Long stalls are clamped so ghosts don't jump across the arena
            self.delta_ms = (frame_time.as_millis() as u32).min(MAX_FRAME_DELTA_MS);

            // Update arena dimensions before rendering
            let size = terminal.size()?;
            let (width, height) = arena_size_px(Rect::new(0, 0, size.width, size.height));
            self.world.resize(width, height);

            terminal.draw(|frame| {
                let view = RenderView {
                    world: &self.world,
                    sprites: &self.sprites,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and get actions
            self.input_manager.poll_events(&self.world.state)?;
            let actions = self.input_manager.get_actions(&self.world.state);
            self.process_actions(&actions);

            let events = self.world.update(self.delta_ms, &mut self.rng);
            self.handle_events(&events);

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(FRAME_SLEEP_MS));
        }
        log::info!("quitting, high score {}", self.world.score.high_score());
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match *action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    self.world.state = GameState::Paused;
                }
                InputAction::Resume => {
                    self.world.state = GameState::Playing;
                }
                InputAction::Restart => {
                    self.world.restart();
                }
                InputAction::Move(player, direction) => {
                    self.world.move_player(player, direction, self.delta_ms);
                }
                InputAction::Fire(player) => {
                    if self.world.fire(player) {
                        self.audio_manager.play_fire_sound();
                    }
                }
                InputAction::Bomb(player) => {
                    let events = self.world.detonate_bomb(player);
                    self.handle_events(&events);
                }
            }
        }
    }

    fn handle_events(&self, events: &[FrameEvent]) {
        for event in events {
            match event {
                FrameEvent::GhostDestroyed { at, by } => {
                    log::debug!("ghost destroyed at ({:.0}, {:.0}) by {:?}", at.x, at.y, by);
                    self.audio_manager.play_ghost_death_sound();
                }
                FrameEvent::PlayerHit { .. } => {}
                FrameEvent::GameOver { new_high_score } => {
                    if *new_high_score {
                        log::info!("new high score {}", self.world.score.high_score());
                    }
                }
            }
        }
    }
}
