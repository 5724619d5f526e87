//! File and directory processing orchestration.
//!
//! One call per input image: decode, downsample, synthesize the requested
//! map kinds, write one PNG per kind next to the input (or into an output
//! directory). Failures are reported per file, never panicked.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::Result;
use crate::loader;
use crate::session::MapArtifact;
use crate::synth::MapKind;

/// Options controlling map generation behavior.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Which map kinds to synthesize.
    pub kinds: Vec<MapKind>,
    /// Seed for the grain synthesizer; `None` keeps it non-deterministic.
    pub seed: Option<u64>,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            kinds: MapKind::ALL.to_vec(),
            seed: None,
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the source file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Paths of the map files written.
    pub outputs: Vec<PathBuf>,
}

impl ProcessResult {
    fn failure(path: &Path, message: String) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            message,
            outputs: Vec::new(),
        }
    }
}

/// Derive the output path for one map of `input`.
///
/// Example: `"photo.jpg"` with [`MapKind::Depth`] becomes
/// `"photo_depth.png"`, placed in `output_dir` when given, otherwise next
/// to the input.
#[must_use]
pub fn map_output_path(input: &Path, kind: MapKind, output_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")).to_path_buf());
    parent.join(format!("{stem}_{kind}.png"))
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

fn grain_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::thread_rng()),
    }
}

/// Process a single image file: load, synthesize, save one PNG per kind.
///
/// Returns a [`ProcessResult`] describing success or failure; errors are
/// captured in the result rather than returned.
#[must_use]
pub fn process_file(input: &Path, output_dir: Option<&Path>, opts: &ProcessOptions) -> ProcessResult {
    let working = match loader::load_working_buffer_from_path(input) {
        Ok(buf) => buf,
        Err(e) => return ProcessResult::failure(input, format!("Failed to load: {e}")),
    };

    if let Some(dir) = output_dir {
        if !dir.exists() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                return ProcessResult::failure(
                    input,
                    format!("Failed to create output directory: {e}"),
                );
            }
        }
    }

    let mut rng = grain_rng(opts.seed);
    let mut outputs = Vec::with_capacity(opts.kinds.len());

    for &kind in &opts.kinds {
        let artifact = MapArtifact::synthesize(kind, &working, &mut *rng);
        let path = map_output_path(input, kind, output_dir);
        if let Err(e) = artifact.save(&path) {
            return ProcessResult::failure(input, format!("Failed to save {kind} map: {e}"));
        }
        outputs.push(path);
    }

    let message = format!(
        "{}x{} working buffer, {} map(s) written",
        working.width(),
        working.height(),
        outputs.len()
    );
    ProcessResult {
        path: input.to_path_buf(),
        success: true,
        message,
        outputs,
    }
}

/// Process all supported images in a directory.
///
/// Uses parallel iteration when the `cli` feature is enabled (via rayon).
/// Returns a [`ProcessResult`] for each image found.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    opts: &ProcessOptions,
) -> Vec<ProcessResult> {
    let entries: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
        Ok(rd) => {
            let mut paths: Vec<PathBuf> = rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|e| e.path())
                .filter(|p| is_supported_image(p))
                .collect();
            paths.sort();
            paths
        }
        Err(e) => {
            return vec![ProcessResult::failure(
                input_dir,
                format!("Failed to read directory: {e}"),
            )];
        }
    };

    if !output_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            return vec![ProcessResult::failure(
                output_dir,
                format!("Failed to create output directory: {e}"),
            )];
        }
    }

    #[cfg(feature = "cli")]
    {
        use rayon::prelude::*;
        entries
            .par_iter()
            .map(|input| process_file(input, Some(output_dir), opts))
            .collect()
    }

    #[cfg(not(feature = "cli"))]
    {
        entries
            .iter()
            .map(|input| process_file(input, Some(output_dir), opts))
            .collect()
    }
}

/// Save raw encoded artifact bytes to a path.
///
/// Convenience for hosts that already hold PNG bytes from
/// [`MapArtifact::encode_png`].
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if writing fails.
pub fn save_encoded(bytes: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}
