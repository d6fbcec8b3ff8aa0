//! Hover/press state machine for the caption buttons.

use crate::geometry::Point;
use crate::layout::ButtonSlots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeButton {
    Minimize,
    Maximize,
    Close,
}

impl ChromeButton {
    /// Hit-test order.
    pub const ALL: [ChromeButton; 3] = [
        ChromeButton::Minimize,
        ChromeButton::Maximize,
        ChromeButton::Close,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonPhase {
    Hover,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    None,
    Active {
        button: ChromeButton,
        phase: ButtonPhase,
    },
}

impl ButtonState {
    pub fn hover(button: ChromeButton) -> Self {
        Self::Active {
            button,
            phase: ButtonPhase::Hover,
        }
    }

    pub fn pressed(button: ChromeButton) -> Self {
        Self::Active {
            button,
            phase: ButtonPhase::Pressed,
        }
    }

    /// Phase of `button`, if it is the active one.
    pub fn phase_of(&self, button: ChromeButton) -> Option<ButtonPhase> {
        match *self {
            Self::Active { button: b, phase } if b == button => Some(phase),
            _ => None,
        }
    }
}

/// The pointer event that drives a state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTrigger {
    Move,
    LeftDown,
    /// Any other button going down; classified like a hover.
    OtherDown,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Minimize,
    ToggleMaximize,
    Close,
}

impl From<ChromeButton> for ButtonAction {
    fn from(button: ChromeButton) -> Self {
        match button {
            ChromeButton::Minimize => ButtonAction::Minimize,
            ChromeButton::Maximize => ButtonAction::ToggleMaximize,
            ChromeButton::Close => ButtonAction::Close,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonTransition {
    /// The visual state differs from before; the caption needs a repaint.
    pub changed: bool,
    /// Fired when a press is released over the same button.
    pub action: Option<ButtonAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStateMachine {
    state: ButtonState,
}

impl ButtonStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn update(
        &mut self,
        slots: &ButtonSlots,
        point: Point,
        trigger: PointerTrigger,
    ) -> ButtonTransition {
        let old = self.state;
        let target = slots.button_at(point);
        let mut action = None;

        self.state = match (target, trigger) {
            (None, _) => ButtonState::None,
            (Some(button), PointerTrigger::LeftDown) => ButtonState::pressed(button),
            (Some(button), PointerTrigger::Release) => {
                if old == ButtonState::pressed(button) {
                    action = Some(ButtonAction::from(button));
                }
                ButtonState::hover(button)
            }
            (Some(button), PointerTrigger::Move | PointerTrigger::OtherDown) => {
                ButtonState::hover(button)
            }
        };

        let changed = old != self.state;
        if changed {
            tracing::trace!(from = ?old, to = ?self.state, "caption button state");
        }
        ButtonTransition { changed, action }
    }

    /// Drop any hover/press, as when the pointer leaves the window.
    pub fn reset(&mut self) -> bool {
        let changed = self.state != ButtonState::None;
        self.state = ButtonState::None;
        changed
    }
}
