use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use ratatui_image::Image;

use crate::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX, GHOST_RADIUS};
use crate::entities::{GameState, Player};
use crate::sprites::{GHOST_COLORS, SpriteCanvas, SpriteId, SpriteSheet};
use crate::world::World;

const PLAYER_COLORS: [Color; 2] = [Color::Green, Color::Cyan];
const GHOST_GLYPH: &str = "ᗣ";

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub world: &'a World,
    pub sprites: &'a SpriteSheet,
    pub area: Rect,
    pub fps: u32,
}

/// The playfield inside the border, between the HUD row and the controls row
pub fn arena_inner(area: Rect) -> Rect {
    let outer = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(2),
    };
    Block::default().borders(Borders::ALL).inner(outer)
}

/// Arena size in world pixels for a terminal area
pub fn arena_size_px(area: Rect) -> (f32, f32) {
    let inner = arena_inner(area);
    (
        f32::from(inner.width) * f32::from(CELL_WIDTH_PX),
        f32::from(inner.height) * f32::from(CELL_HEIGHT_PX),
    )
}

/// Terminal cell holding a world pixel, if it lies inside the arena
fn to_cell(arena: Rect, x: f32, y: f32) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / f32::from(CELL_WIDTH_PX)) as u16;
    let row = (y / f32::from(CELL_HEIGHT_PX)) as u16;
    (col < arena.width && row < arena.height).then(|| (arena.x + col, arena.y + row))
}

/// Draws sprites from the sheet straight into the frame buffer
pub struct FrameCanvas<'a> {
    buffer: &'a mut Buffer,
    arena: Rect,
    sprites: &'a SpriteSheet,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(buffer: &'a mut Buffer, arena: Rect, sprites: &'a SpriteSheet) -> Self {
        Self {
            buffer,
            arena,
            sprites,
        }
    }
}

impl SpriteCanvas for FrameCanvas<'_> {
    fn draw_centered(&mut self, sprite: SpriteId, x: f32, y: f32) {
        let Some(protocol) = self.sprites.get(sprite) else {
            log::debug!("no sprite {:?}, skipping", sprite);
            return;
        };
        let (width, height) = self.sprites.cell_size();
        let r = GHOST_RADIUS as f32;
        let (left, top) = (x - r, y - r);
        if left >= 0.0 && top >= 0.0 {
            let col = (left / f32::from(CELL_WIDTH_PX)) as u16;
            let row = (top / f32::from(CELL_HEIGHT_PX)) as u16;
            if col.saturating_add(width) <= self.arena.width
                && row.saturating_add(height) <= self.arena.height
            {
                let target = Rect::new(self.arena.x + col, self.arena.y + row, width, height);
                Image::new(protocol).render(target, self.buffer);
                return;
            }
        }
        self.draw_clipped(sprite, x, y);
    }
}

impl FrameCanvas<'_> {
    /// A sprite straddling the arena edge is drawn as a single glyph on the
    /// nearest cell still inside
    fn draw_clipped(&mut self, sprite: SpriteId, x: f32, y: f32) {
        let r = GHOST_RADIUS as f32;
        let max_x = f32::from(self.arena.width) * f32::from(CELL_WIDTH_PX) - 1.0;
        let max_y = f32::from(self.arena.height) * f32::from(CELL_HEIGHT_PX) - 1.0;
        if max_x < 0.0 || max_y < 0.0 || x + r < 0.0 || y + r < 0.0 || x - r > max_x || y - r > max_y
        {
            return;
        }
        let Some((col, row)) = to_cell(self.arena, x.clamp(0.0, max_x), y.clamp(0.0, max_y))
        else {
            return;
        };
        let color = GHOST_COLORS
            .get(sprite.0)
            .map_or(Color::White, |c| Color::Rgb(c[0], c[1], c[2]));
        self.buffer.set_string(
            col,
            row,
            GHOST_GLYPH,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.world.state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let world = view.world;

        let outer = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let arena = block.inner(outer);
        frame.render_widget(block, outer);

        {
            let mut canvas = FrameCanvas::new(frame.buffer_mut(), arena, view.sprites);
            for enemy in &world.enemies {
                enemy.render(&mut canvas);
            }
        }

        for player in world.players.iter().filter(|p| p.is_alive()) {
            self.render_player(frame, arena, player);
        }

        let buffer = frame.buffer_mut();
        for player in &world.players {
            let color = PLAYER_COLORS[player.id % PLAYER_COLORS.len()];
            for bullet in &player.bullets {
                if let Some((x, y)) = to_cell(arena, bullet.x, bullet.y) {
                    buffer.set_string(x, y, "•", Style::default().fg(color));
                }
            }
        }
        for bullet in &world.stray_bullets {
            if let Some((x, y)) = to_cell(arena, bullet.x, bullet.y) {
                buffer.set_string(x, y, "•", Style::default().fg(Color::DarkGray));
            }
        }

        for particle in &world.particles {
            if let Some((x, y)) = to_cell(arena, particle.x, particle.y) {
                // Color particles based on their lifetime (fade effect)
                let color = if particle.lifetime_ms > 200 {
                    Color::Red
                } else if particle.lifetime_ms > 100 {
                    Color::LightRed
                } else {
                    Color::Yellow
                };
                buffer.set_string(
                    x,
                    y,
                    particle.char.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        self.render_hud(frame, view);

        // Controls hint at bottom
        let hint = if world.players.len() > 1 {
            "[P1 WASD/Space/E] [P2 Arrows/Enter/M] [P: Pause] [Q: Quit]"
        } else {
            "[WASD/Arrows: Move] [Space: Fire] [E: Bomb] [P: Pause] [Q: Quit]"
        };
        let controls = Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_player(&self, frame: &mut Frame, arena: Rect, player: &Player) {
        let sprite_lines = player.get_sprite_lines();
        let width = player.get_width();
        let height = player.get_height();
        // Flash white while invulnerable
        let color = if player.is_flashing() {
            Color::White
        } else {
            PLAYER_COLORS[player.id % PLAYER_COLORS.len()]
        };

        let Some((x, y)) = to_cell(arena, player.x, player.y) else {
            return;
        };
        // Centre the sprite on the player's cell
        let x = x.saturating_sub(width / 2).max(arena.x);
        let y = y.saturating_sub(height / 2).max(arena.y);
        if x + width > arena.x + arena.width || y + height > arena.y + arena.height {
            return;
        }

        let text: Vec<Line> = sprite_lines
            .iter()
            .map(|line| {
                Line::from(*line).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            })
            .collect();
        frame.render_widget(Paragraph::new(text), Rect::new(x, y, width, height));
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let world = view.world;
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(world.score.score().to_string(), value(Color::Yellow)),
            Span::styled("  High: ", label),
            Span::styled(world.score.high_score().to_string(), value(Color::Yellow)),
        ];
        for player in &world.players {
            let color = PLAYER_COLORS[player.id % PLAYER_COLORS.len()];
            spans.push(Span::styled(format!("  P{}: ", player.id + 1), label));
            spans.push(Span::styled(
                format!(
                    "{} {}B {}K",
                    "♥".repeat(player.lives as usize),
                    player.bombs,
                    player.kills
                ),
                value(if player.is_alive() { color } else { Color::DarkGray }),
            ));
        }
        spans.push(Span::styled("  Ghosts: ", label));
        spans.push(Span::styled(
            world.live_enemy_count().to_string(),
            value(Color::Magenta),
        ));
        spans.push(Span::styled("  FPS: ", label));
        spans.push(Span::styled(view.fps.to_string(), value(Color::White)));

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), stats_area);

        let secs = world.elapsed_ms / 1000;
        let timer = Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(format!("{:02}:{:02}", secs / 60, secs % 60), value(Color::White)),
        ]);
        frame.render_widget(
            Paragraph::new(timer).alignment(Alignment::Right),
            Rect {
                x: area.x,
                y: area.y,
                width: area.width.saturating_sub(1),
                height: 1,
            },
        );
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        if area.width < 30 || area.height < 6 {
            return;
        }
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];
        let pause_area = Rect {
            x: area.x + area.width / 2 - 15,
            y: area.y + area.height / 2 - 3,
            width: 30,
            height: 6,
        };
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let world = view.world;
        let secs = world.elapsed_ms / 1000;

        let mut lines = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER!         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", world.score.score()))
                .centered()
                .yellow()
                .bold(),
        ];
        if world.new_high_score {
            lines.push(Line::from("NEW HIGH SCORE!").centered().magenta().bold());
        } else {
            lines.push(
                Line::from(format!("High Score: {}", world.score.high_score()))
                    .centered()
                    .yellow(),
            );
        }
        lines.push(
            Line::from(format!("Time Survived: {:02}:{:02}", secs / 60, secs % 60))
                .centered()
                .cyan()
                .bold(),
        );
        if world.players.len() > 1 {
            for player in &world.players {
                lines.push(
                    Line::from(format!("P{} kills: {}", player.id + 1, player.kills)).centered(),
                );
            }
        }
        lines.extend([
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ]);

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}
