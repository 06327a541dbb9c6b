//! Where the input row sits on screen.
//!
//! The input is lifted off the bottom edge by a fraction of the screen height:
//! a small margin normally, and a larger one while the keyboard is considered
//! visible. In a terminal, "keyboard visible" follows focus: `FocusGained`
//! shows it and `FocusLost` hides it.

const HIDDEN_LIFT_PERCENT: u32 = 2;
const SHOWN_LIFT_PERCENT: u32 = 10;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    keyboard_visible: bool,
}

impl Presentation {
    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    pub fn show_keyboard(&mut self) {
        if !self.keyboard_visible {
            log::debug!("Keyboard shown");
        }
        self.keyboard_visible = true;
    }

    pub fn hide_keyboard(&mut self) {
        if self.keyboard_visible {
            log::debug!("Keyboard hidden");
        }
        self.keyboard_visible = false;
    }

    /// Rows left empty below the input for a screen of `height` rows
    pub fn input_lift(&self, height: u16) -> u16 {
        let percent = if self.keyboard_visible {
            SHOWN_LIFT_PERCENT
        } else {
            HIDDEN_LIFT_PERCENT
        };
        (u32::from(height) * percent / 100) as u16
    }
}
