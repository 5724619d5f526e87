//! Derive depth, mask, and grain visual maps from reference images.
//!
//! Creative-generation UIs often show auxiliary "visual maps" alongside an
//! uploaded style reference: a synthetic depth pass, a rough subject
//! silhouette, and a film-grain variant. This crate implements those three
//! heuristics over plain RGBA buffers: the source is downsampled to a
//! bounded working resolution, a background color is estimated from the
//! four image corners, and each map is synthesized with independent
//! per-pixel math (plus one Gaussian blur pass for depth).
//!
//! # Quick Start
//!
//! ```no_run
//! use reference_maps::{MapKind, StudioSession};
//!
//! let mut session = StudioSession::new();
//! let bytes = std::fs::read("style.png").unwrap();
//! session.set_source(bytes).unwrap();
//!
//! let depth = session.map(MapKind::Depth).unwrap();
//! println!("{}x{} depth map", depth.width(), depth.height());
//! println!("{}", depth.data_url().unwrap());
//! ```
//!
//! # Regeneration
//!
//! The session retains the original encoded bytes, so any single map can be
//! recomputed without touching the other two — useful for re-rolling the
//! non-deterministic grain:
//!
//! ```no_run
//! use reference_maps::{MapKind, StudioSession};
//!
//! let mut session = StudioSession::new();
//! session.set_source(std::fs::read("style.png").unwrap()).unwrap();
//! session.regenerate(MapKind::Noise).unwrap();
//! ```
//!
//! The heuristics are deliberate simplifications: corner sampling assumes a
//! roughly centered subject and is documented as such. There is no alpha
//! matting and no learned model.

#![deny(missing_docs)]

pub mod background;
mod engine;
pub mod error;
pub mod loader;
mod session;
pub mod synth;

pub use background::BackgroundEstimate;
pub use engine::{
    is_supported_image, map_output_path, process_directory, process_file, save_encoded,
    ProcessOptions, ProcessResult,
};
pub use error::{Error, Result};
pub use session::{ActiveMapFlags, MapArtifact, StudioSession, VisualMapSet};
pub use synth::{MapKind, DEPTH_BLUR_SIGMA, SUBJECT_THRESHOLD};
