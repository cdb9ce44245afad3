//! Typed methods for each admin CRUD path family.

mod catalog;
mod commerce;
mod content;
mod inbox;

use serde::Deserialize;

/// Minimal envelope for calls whose payload we do not consume.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub ok: bool,
}
