//! Pipeline for converting a PDF into a single narrated audio file.
//!
//! Stages: extract text ([`pdf`]), split it into normalized fixed-size
//! batches ([`text`]), synthesize each batch through a TTS backend ([`tts`],
//! [`runner`]), and concatenate the clips in batch order ([`audio`]).

pub mod audio;
pub mod config;
pub mod pdf;
pub mod runner;
pub mod text;
pub mod tts;
