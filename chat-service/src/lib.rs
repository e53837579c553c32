//! chat-service: relays a user's chat query to a text generator.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;
