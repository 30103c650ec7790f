//! Input mapping
//!
//! Translates raw key-down/key-up events into the per-tick control signals
//! the simulation consumes. Arrow keys and WASD alias each other; space
//! fires. Key-up returns the matching axis to zero, so a stuck axis can only
//! come from a missed key-up, never from the mapper itself.

use crate::sim::TickInput;

/// Logical control a raw key code maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TurnLeft,
    TurnRight,
    ThrustForward,
    ThrustReverse,
    Fire,
}

/// Map a DOM-style key code to a control, if bound
pub fn map_key(code: &str) -> Option<Control> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Control::TurnLeft),
        "ArrowRight" | "KeyD" => Some(Control::TurnRight),
        "ArrowUp" | "KeyW" => Some(Control::ThrustForward),
        "ArrowDown" | "KeyS" => Some(Control::ThrustReverse),
        "Space" => Some(Control::Fire),
        _ => None,
    }
}

/// Held state of every bound control; produces one `TickInput` per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    left: bool,
    right: bool,
    forward: bool,
    reverse: bool,
    fire: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was bound to a control
    pub fn key_down(&mut self, code: &str) -> bool {
        match map_key(code) {
            Some(control) => {
                self.set(control, true);
                true
            }
            None => false,
        }
    }

    /// Returns true if the key was bound to a control
    pub fn key_up(&mut self, code: &str) -> bool {
        match map_key(code) {
            Some(control) => {
                self.set(control, false);
                true
            }
            None => false,
        }
    }

    fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::TurnLeft => self.left = held,
            Control::TurnRight => self.right = held,
            Control::ThrustForward => self.forward = held,
            Control::ThrustReverse => self.reverse = held,
            Control::Fire => self.fire = held,
        }
    }

    /// Release every control (listeners detaching must not leave held axes)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Snapshot the held controls as the simulation's control signals
    pub fn tick_input(&self) -> TickInput {
        let turn = (self.right as i8 - self.left as i8) as f32;
        let thrust = (self.forward as i8 - self.reverse as i8) as f32;
        TickInput {
            turn,
            thrust,
            fire: self.fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_are_aliases() {
        assert_eq!(map_key("ArrowLeft"), Some(Control::TurnLeft));
        assert_eq!(map_key("KeyA"), Some(Control::TurnLeft));
        assert_eq!(map_key("ArrowUp"), Some(Control::ThrustForward));
        assert_eq!(map_key("KeyW"), Some(Control::ThrustForward));
        assert_eq!(map_key("Space"), Some(Control::Fire));
        assert_eq!(map_key("KeyQ"), None);
    }

    #[test]
    fn key_up_returns_axis_to_zero() {
        let mut mapper = InputMapper::new();
        mapper.key_down("ArrowRight");
        assert_eq!(mapper.tick_input().turn, 1.0);

        mapper.key_up("ArrowRight");
        assert_eq!(mapper.tick_input().turn, 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut mapper = InputMapper::new();
        mapper.key_down("KeyA");
        mapper.key_down("KeyD");
        assert_eq!(mapper.tick_input().turn, 0.0);

        mapper.key_up("KeyA");
        assert_eq!(mapper.tick_input().turn, 1.0);
    }

    #[test]
    fn thrust_axis_mixes_forward_and_reverse() {
        let mut mapper = InputMapper::new();
        mapper.key_down("KeyW");
        assert_eq!(mapper.tick_input().thrust, 1.0);

        mapper.key_down("KeyS");
        assert_eq!(mapper.tick_input().thrust, 0.0);

        mapper.key_up("KeyW");
        assert_eq!(mapper.tick_input().thrust, -1.0);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut mapper = InputMapper::new();
        assert!(!mapper.key_down("F13"));
        assert_eq!(mapper.tick_input(), TickInput::default());
    }

    #[test]
    fn release_all_clears_every_control() {
        let mut mapper = InputMapper::new();
        mapper.key_down("KeyW");
        mapper.key_down("KeyD");
        mapper.key_down("Space");

        mapper.release_all();
        assert_eq!(mapper.tick_input(), TickInput::default());
    }
}
