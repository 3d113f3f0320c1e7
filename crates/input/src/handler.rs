//! Keyboard as a set of switches and one button.
//!
//! Terminals deliver key presses, not levels, and many never report a
//! release. Each steering key therefore flips its direction switch, and each
//! button key queues one press that shows up as the button being down for
//! exactly one sample followed by at least one sample up. That keeps every
//! press a clean rising edge for the driver. Rotate and restart share that
//! queue but come out on separate levels, so a restart key pressed mid-game
//! reaches the driver as a restart and is ignored there.

use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::engine::{InputSample, InputSource};
use crate::map::{handle_key_event, should_quit};
use crate::types::GameAction;

/// Upper bound on presses queued between samples
const MAX_QUEUED_PRESSES: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    switches: [bool; 4],
    button_down: bool,
    queued: ArrayVec<GameAction, MAX_QUEUED_PRESSES>,
    quit: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one key event into the control state
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ignore terminal auto-repeat and releases.
        if key.kind != KeyEventKind::Press {
            return;
        }
        if should_quit(key) {
            self.quit = true;
            return;
        }
        match handle_key_event(key) {
            Some(GameAction::Steer(direction)) => {
                let switch = &mut self.switches[direction.index()];
                *switch = !*switch;
            }
            Some(action @ (GameAction::Rotate | GameAction::Restart)) => {
                // Drop presses beyond the queue rather than block.
                let _ = self.queued.try_push(action);
            }
            None => {}
        }
    }

    /// Produce the next sample from the state accumulated so far
    pub fn next_sample(&mut self) -> InputSample {
        let pressed = if self.button_down || self.queued.is_empty() {
            None
        } else {
            Some(self.queued.remove(0))
        };
        self.button_down = pressed.is_some();
        InputSample {
            rotate: pressed == Some(GameAction::Rotate),
            switches: self.switches,
            restart: pressed == Some(GameAction::Restart),
            quit: self.quit,
        }
    }
}

impl InputSource for KeyboardInput {
    fn sample(&mut self) -> io::Result<InputSample> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(self.next_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_steer_key_flips_switch() {
        let mut input = KeyboardInput::new();
        input.handle_key(press(KeyCode::Left));
        assert!(input.next_sample().switch(Direction::Left));
        assert!(input.next_sample().switch(Direction::Left));
        input.handle_key(press(KeyCode::Left));
        assert!(!input.next_sample().switch(Direction::Left));
    }

    #[test]
    fn test_button_presses_become_separate_edges() {
        let mut input = KeyboardInput::new();
        input.handle_key(press(KeyCode::Char(' ')));
        input.handle_key(press(KeyCode::Char(' ')));

        let levels: Vec<bool> = (0..5).map(|_| input.next_sample().rotate).collect();
        assert_eq!(levels, vec![true, false, true, false, false]);
    }

    #[test]
    fn test_restart_key_never_rotates() {
        let mut input = KeyboardInput::new();
        input.handle_key(press(KeyCode::Char('r')));
        input.handle_key(press(KeyCode::Enter));
        input.handle_key(press(KeyCode::Char(' ')));

        let samples: Vec<(bool, bool)> = (0..6)
            .map(|_| {
                let s = input.next_sample();
                (s.rotate, s.restart)
            })
            .collect();
        assert_eq!(
            samples,
            vec![
                (false, true),
                (false, false),
                (false, true),
                (false, false),
                (true, false),
                (false, false),
            ]
        );
    }

    #[test]
    fn test_repeat_and_release_are_ignored() {
        let mut input = KeyboardInput::new();
        input.handle_key(KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        });
        input.handle_key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        let sample = input.next_sample();
        assert!(!sample.switch(Direction::Right));
        assert!(!sample.rotate);
    }

    #[test]
    fn test_quit_sticks() {
        let mut input = KeyboardInput::new();
        input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(input.next_sample().quit);
        assert!(input.next_sample().quit);
    }
}
