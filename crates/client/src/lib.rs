//! Dashboard layout client.
//!
//! Connects the pure layout model from `vitalboard-core` to the layout
//! endpoints: a [`gateway::LayoutGateway`] abstraction with a reqwest
//! binding, the async [`store::LayoutStore`] holding canonical and draft
//! state, and the [`customize::CustomizeView`] model the customize screen
//! renders from.

pub mod config;
pub mod customize;
pub mod events;
pub mod gateway;
pub mod http;
pub mod store;
