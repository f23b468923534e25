//! Input handling: window events, key bindings, and the pose
//! controller state machine.

pub mod controller;
pub mod event;
pub mod keybindings;
