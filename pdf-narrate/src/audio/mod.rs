//! Audio artifact discovery and assembly.

pub mod assembler;

pub use assembler::{
    AssemblyError, COMBINED_FILE_NAME, combine_artifacts, discover_artifacts,
    is_ffmpeg_available,
};
