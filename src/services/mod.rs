// Service exports
pub mod embedder;
pub mod generator;
pub mod roster;

pub use embedder::{EmbedError, Embedder, HashEmbedder, HttpEmbedder};
pub use generator::{GeminiClient, GenerateError, TextGenerator};
pub use roster::{Roster, RosterError};
