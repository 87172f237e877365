//! Dashboard layout domain logic.
//!
//! Holds the widget data model, the static widget registry, pure layout
//! mutations, the `LayoutState` edit model, the drag gesture state machine
//! and layout validation. This crate performs no I/O; persistence and
//! presentation live in `vitalboard-client` and `vitalboard-api`.

pub mod defaults;
pub mod error;
pub mod gesture;
pub mod layout_state;
pub mod mutator;
pub mod registry;
pub mod relative_time;
pub mod types;
pub mod validation;
pub mod widget;
