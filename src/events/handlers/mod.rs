// src/events/handlers/mod.rs
//
// Event Handlers - INTERNAL MODULE
//
// This module contains handler implementations.
// EventHandler type is internal to the bus module and NOT exported.
//
// Handlers use closure-based subscription via EventBus::subscribe.

pub mod ad_handler;

// Only export the registration function, not handler internals
pub use ad_handler::register_ad_handlers;
