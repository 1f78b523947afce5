//! Handle different input events.

use glam::Vec2;
use hashbrown::HashMap;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::graphics::letterbox::Letterbox;

/// Any button state.
///
/// Edges are latched until the next update tick, so a press and release within a single tick are both seen.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ButtonState {
    /// Whether the button is being held down.
    is_down: bool,
    /// Whether the button went down since the previous update tick.
    pressed_since_tick: bool,
    /// Whether the button went up since the previous update tick.
    released_since_tick: bool,
}

impl ButtonState {
    /// Create a new state.
    pub(crate) const fn new(is_down: bool) -> Self {
        Self {
            is_down,
            pressed_since_tick: is_down,
            released_since_tick: false,
        }
    }

    /// Handle the state if the button is currently pressed.
    pub(crate) fn handle_event(&mut self, pressed: bool) {
        if pressed && !self.is_down {
            self.pressed_since_tick = true;
        } else if !pressed && self.is_down {
            self.released_since_tick = true;
        }

        self.is_down = pressed;
    }

    /// Handle the state changes using the update tick to respond to changes.
    pub(crate) fn update(&mut self) {
        self.pressed_since_tick = false;
        self.released_since_tick = false;
    }

    /// Whether the button is being pressed now.
    pub(crate) const fn held(&self) -> bool {
        self.is_down
    }

    /// Whether the button goes from released to pressed.
    pub(crate) const fn pressed(&self) -> bool {
        self.pressed_since_tick
    }

    /// Whether the button goes from pressed to released.
    pub(crate) const fn released(&self) -> bool {
        self.released_since_tick
    }
}

/// Manager for handling different input events.
#[derive(Debug, Default)]
pub(crate) struct Input {
    /// Mouse position in buffer pixels.
    ///
    /// `None` if not on the buffer.
    mouse: Option<Vec2>,
    /// Mouse button states.
    mouse_buttons: HashMap<MouseButton, ButtonState>,
    /// All keyboard buttons.
    keys: HashMap<KeyCode, ButtonState>,
}

impl Input {
    /// Setup the input.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Handle a winit window event.
    ///
    /// Cursor positions are mapped through the letterbox to buffer pixels.
    #[inline]
    pub(crate) fn handle_event(&mut self, event: &WindowEvent, letterbox: &Letterbox) {
        match event {
            // Handle keyboard buttons
            WindowEvent::KeyboardInput { event, .. } => {
                // Keys held down by the OS are already registered
                if event.repeat {
                    return;
                }

                if let PhysicalKey::Code(keycode) = event.physical_key {
                    self.set_key(keycode, event.state == ElementState::Pressed);
                }
            }
            // Handle mouse cursor position
            WindowEvent::CursorMoved { position, .. } => {
                // Map the coordinates to the buffer
                self.mouse =
                    letterbox.map_coordinate(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse = None;
            }
            // Handle mouse buttons
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_mouse_button(*button, *state == ElementState::Pressed);
            }
            _ => (),
        }
    }

    /// Set the state of a keyboard button.
    pub(crate) fn set_key(&mut self, key: KeyCode, is_down: bool) {
        if let Some(state) = self.keys.get_mut(&key) {
            // Key already registered, update the state
            state.handle_event(is_down);
        } else {
            // Key not found, register it
            self.keys.insert(key, ButtonState::new(is_down));
        }
    }

    /// Set the state of a mouse button.
    pub(crate) fn set_mouse_button(&mut self, mouse_button: MouseButton, is_down: bool) {
        if let Some(state) = self.mouse_buttons.get_mut(&mouse_button) {
            state.handle_event(is_down);
        } else {
            self.mouse_buttons
                .insert(mouse_button, ButtonState::new(is_down));
        }
    }

    /// Set the mouse position in buffer pixels.
    pub(crate) fn set_mouse(&mut self, mouse: Option<Vec2>) {
        self.mouse = mouse;
    }

    /// Update all registered buttons.
    ///
    /// Only allowed to be called once per update tick.
    #[inline]
    pub(crate) fn update(&mut self) {
        // Update all button states, needed to handle "pressed" and "released"
        self.mouse_buttons
            .iter_mut()
            .for_each(|(_, state)| state.update());
        self.keys.iter_mut().for_each(|(_, state)| state.update());
    }

    /// Check the mouse pressed state for a mouse button.
    #[inline]
    #[must_use]
    pub(crate) fn mouse_pressed(&self, mouse_button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&mouse_button)
            .is_some_and(ButtonState::pressed)
    }

    /// Check the mouse released state for a mouse button.
    #[inline]
    #[must_use]
    pub(crate) fn mouse_released(&self, mouse_button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&mouse_button)
            .is_some_and(ButtonState::released)
    }

    /// Check the mouse held state for a mouse button.
    #[inline]
    #[must_use]
    pub(crate) fn mouse_held(&self, mouse_button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&mouse_button)
            .is_some_and(ButtonState::held)
    }

    /// Mouse position in buffer pixels if on the buffer.
    #[inline]
    #[must_use]
    pub(crate) const fn mouse(&self) -> Option<Vec2> {
        self.mouse
    }

    /// Check the key pressed state for a keyboard button.
    #[inline]
    #[must_use]
    pub(crate) fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(ButtonState::pressed)
    }

    /// Check the key released state for a keyboard button.
    #[inline]
    #[must_use]
    pub(crate) fn key_released(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(ButtonState::released)
    }

    /// Check the key held state for a keyboard button.
    #[inline]
    #[must_use]
    pub(crate) fn key_held(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(ButtonState::held)
    }
}
