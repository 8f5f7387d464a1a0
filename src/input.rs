use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::{Direction, GameState};

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(usize, Direction),
    Fire(usize),
    Bomb(usize),
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Per-player controls a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Bomb,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default, Clone)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire: bool,
}

impl KeyState {
    fn press(&mut self, control: Control) {
        match control {
            Control::Up => {
                self.up = true;
                self.down = false;
            }
            Control::Down => {
                self.down = true;
                self.up = false;
            }
            Control::Left => {
                self.left = true;
                self.right = false;
            }
            Control::Right => {
                self.right = true;
                self.left = false;
            }
            Control::Fire => self.fire = true,
            Control::Bomb => {}
        }
    }

    fn release(&mut self, control: Control) {
        match control {
            Control::Up => self.up = false,
            Control::Down => self.down = false,
            Control::Left => self.left = false,
            Control::Right => self.right = false,
            Control::Fire => self.fire = false,
            Control::Bomb => {}
        }
    }
}

/// Which player and control a key drives. With a single player the arrow
/// keys double as WASD.
fn binding(code: KeyCode, players: usize) -> Option<(usize, Control)> {
    let arrows_player = if players > 1 { 1 } else { 0 };
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some((0, Control::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((0, Control::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some((0, Control::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some((0, Control::Right)),
        KeyCode::Char(' ') => Some((0, Control::Fire)),
        KeyCode::Char('e') | KeyCode::Char('E') => Some((0, Control::Bomb)),
        KeyCode::Up => Some((arrows_player, Control::Up)),
        KeyCode::Down => Some((arrows_player, Control::Down)),
        KeyCode::Left => Some((arrows_player, Control::Left)),
        KeyCode::Right => Some((arrows_player, Control::Right)),
        KeyCode::Enter if players > 1 => Some((1, Control::Fire)),
        KeyCode::Char('m') | KeyCode::Char('M') if players > 1 => Some((1, Control::Bomb)),
        _ => None,
    }
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_states: Vec<KeyState>,
    oneshot_actions: Vec<InputAction>,
    /// Without release events every held key is dropped at the start of the
    /// next frame and revived by the terminal's key repeat
    key_release_supported: bool,
}

impl InputManager {
    pub fn new(players: usize, key_release_supported: bool) -> Self {
        Self {
            key_states: vec![KeyState::default(); players.max(1)],
            oneshot_actions: Vec::new(),
            key_release_supported,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        self.begin_frame();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    /// Clears last frame's one-shot actions, and held keys when the terminal
    /// cannot report releases
    pub fn begin_frame(&mut self) {
        self.oneshot_actions.clear();
        if !self.key_release_supported {
            self.key_states.fill(KeyState::default());
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            KeyEventKind::Repeat => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState) {
        // Check for quit keys first (works in any state)
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let toggles_pause = matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P'));
        match game_state {
            GameState::Playing if toggles_pause => {
                self.oneshot_actions.push(InputAction::Pause);
                return;
            }
            GameState::Paused if toggles_pause => {
                self.oneshot_actions.push(InputAction::Resume);
                return;
            }
            GameState::GameOver
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) =>
            {
                self.oneshot_actions.push(InputAction::Restart);
                return;
            }
            _ => {}
        }

        if *game_state != GameState::Playing {
            return;
        }
        let Some((player, control)) = binding(key_event.code, self.key_states.len()) else {
            return;
        };
        if control == Control::Bomb {
            self.oneshot_actions.push(InputAction::Bomb(player));
        } else if let Some(state) = self.key_states.get_mut(player) {
            state.press(control);
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        let Some((player, control)) = binding(code, self.key_states.len()) else {
            return;
        };
        if let Some(state) = self.key_states.get_mut(player) {
            state.release(control);
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, game_state: &GameState) -> Vec<InputAction> {
        let mut actions = Vec::new();

        // Add one-shot actions first
        actions.extend_from_slice(&self.oneshot_actions);

        // Add continuous actions based on held keys (only in Playing state)
        if *game_state == GameState::Playing {
            for (player, keys) in self.key_states.iter().enumerate() {
                if keys.left {
                    actions.push(InputAction::Move(player, Direction::Left));
                }
                if keys.right {
                    actions.push(InputAction::Move(player, Direction::Right));
                }
                if keys.up {
                    actions.push(InputAction::Move(player, Direction::Up));
                }
                if keys.down {
                    actions.push(InputAction::Move(player, Direction::Down));
                }
                if keys.fire {
                    actions.push(InputAction::Fire(player));
                }
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_single_player_accepts_wasd_and_arrows() {
        let mut input = InputManager::new(1, true);
        input.handle_key_event(press(KeyCode::Char('a')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Up), &GameState::Playing);

        let actions = input.get_actions(&GameState::Playing);
        assert_eq!(
            actions,
            vec![
                InputAction::Move(0, Direction::Left),
                InputAction::Move(0, Direction::Up)
            ]
        );
    }

    #[test]
    fn test_two_players_split_the_keyboard() {
        let mut input = InputManager::new(2, true);
        for code in [
            KeyCode::Char('d'),
            KeyCode::Char(' '),
            KeyCode::Left,
            KeyCode::Enter,
        ] {
            input.handle_key_event(press(code), &GameState::Playing);
        }

        let actions = input.get_actions(&GameState::Playing);
        assert_eq!(
            actions,
            vec![
                InputAction::Move(0, Direction::Right),
                InputAction::Fire(0),
                InputAction::Move(1, Direction::Left),
                InputAction::Fire(1),
            ]
        );
    }

    #[test]
    fn test_bomb_is_one_shot() {
        let mut input = InputManager::new(2, true);
        input.handle_key_event(press(KeyCode::Char('m')), &GameState::Playing);
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::Bomb(1)]
        );

        input.begin_frame();
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_second_player_keys_ignored_in_single_player() {
        let mut input = InputManager::new(1, true);
        input.handle_key_event(press(KeyCode::Enter), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char('m')), &GameState::Playing);
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_opposite_direction_cancels() {
        let mut input = InputManager::new(1, true);
        input.handle_key_event(press(KeyCode::Char('w')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char('s')), &GameState::Playing);
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::Move(0, Direction::Down)]
        );
    }

    #[test]
    fn test_release_stops_movement() {
        let mut input = InputManager::new(1, true);
        input.handle_key_event(press(KeyCode::Char('w')), &GameState::Playing);
        input.begin_frame();
        assert_eq!(input.get_actions(&GameState::Playing).len(), 1);

        input.handle_key_event(release(KeyCode::Char('w')), &GameState::Playing);
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_held_keys_cleared_without_release_events() {
        let mut input = InputManager::new(1, false);
        input.handle_key_event(press(KeyCode::Char(' ')), &GameState::Playing);
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::Fire(0)]
        );

        input.begin_frame();
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_quit_works_in_any_state() {
        for state in [GameState::Playing, GameState::Paused, GameState::GameOver] {
            let mut input = InputManager::new(1, true);
            input.handle_key_event(press(KeyCode::Esc), &state);
            input.handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &state,
            );
            assert_eq!(
                input.get_actions(&state),
                vec![InputAction::Quit, InputAction::Quit]
            );
        }
    }

    #[test]
    fn test_pause_resume_and_restart_depend_on_state() {
        let mut input = InputManager::new(1, true);
        input.handle_key_event(press(KeyCode::Char('p')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char('P')), &GameState::Paused);
        input.handle_key_event(press(KeyCode::Char('r')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char('r')), &GameState::GameOver);
        assert_eq!(
            input.get_actions(&GameState::GameOver),
            vec![
                InputAction::Pause,
                InputAction::Resume,
                InputAction::Restart
            ]
        );
    }

    #[test]
    fn test_movement_ignored_while_paused() {
        let mut input = InputManager::new(1, true);
        input.handle_key_event(press(KeyCode::Char('a')), &GameState::Paused);
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }
}
