//! Gemini adapter for the model gateway port
//!
//! Talks to the `generateContent` REST endpoint over `reqwest`. Text and
//! image requests share one endpoint; image requests ask for the `IMAGE`
//! response modality and read inline data back.

mod gateway;
mod protocol;

pub use gateway::GeminiGateway;
