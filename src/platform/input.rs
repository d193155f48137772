//! Input mapping
//!
//! Browser events are reduced to game actions before they reach the game.
//! Keys are matched on `KeyboardEvent.code` so layouts don't matter. Only
//! Space and a click or tap on the play surface are recognized; restarting
//! goes through the game-over button.

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Restart,
}

/// Key that flaps
pub const JUMP_KEY: &str = "Space";

/// Map a key code to an action
pub fn action_for_key(code: &str) -> Option<Action> {
    (code == JUMP_KEY).then_some(Action::Jump)
}

/// Click or tap on the play surface
pub fn action_for_pointer() -> Action {
    Action::Jump
}
