//! Upload session state: retained source, synthesized map set, flags.
//!
//! [`StudioSession`] is the explicit context object a host (UI shell, CLI,
//! service) holds per uploaded reference image. It retains the original
//! encoded bytes so any single map can be regenerated later, keeps the
//! current [`VisualMapSet`], and tracks which kinds the host considers
//! active. All state lives here; nothing is ambient.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use rand::Rng;

use crate::error::{Error, Result};
use crate::loader;
use crate::synth::{self, MapKind};

/// One synthesized map plus its encoders.
#[derive(Debug, Clone)]
pub struct MapArtifact {
    kind: MapKind,
    image: RgbaImage,
}

impl MapArtifact {
    /// Synthesize an artifact of `kind` from a working buffer.
    pub fn synthesize<R: Rng + ?Sized>(kind: MapKind, working: &RgbaImage, rng: &mut R) -> Self {
        Self {
            kind,
            image: synth::synthesize(kind, working, rng),
        }
    }

    /// The heuristic that produced this artifact.
    #[must_use]
    pub fn kind(&self) -> MapKind {
        self.kind
    }

    /// The synthesized pixel buffer.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Buffer width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Buffer height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode the buffer as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if PNG encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    /// Encode the buffer as a `data:image/png;base64,...` URL.
    ///
    /// The result is directly consumable by an image-rendering surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if PNG encoding fails.
    pub fn data_url(&self) -> Result<String> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }

    /// Save the buffer to `path`, format inferred from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the format is unsupported or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// The three map artifacts derived from one source upload.
#[derive(Debug, Clone)]
pub struct VisualMapSet {
    depth: MapArtifact,
    mask: MapArtifact,
    noise: MapArtifact,
}

impl VisualMapSet {
    /// Generate a full set from one working buffer.
    ///
    /// The three synthesizers run sequentially over the same buffer; each
    /// pass samples its own background estimate.
    pub fn generate<R: Rng + ?Sized>(working: &RgbaImage, rng: &mut R) -> Self {
        Self {
            depth: MapArtifact::synthesize(MapKind::Depth, working, rng),
            mask: MapArtifact::synthesize(MapKind::Mask, working, rng),
            noise: MapArtifact::synthesize(MapKind::Noise, working, rng),
        }
    }

    /// The artifact for `kind`.
    #[must_use]
    pub fn get(&self, kind: MapKind) -> &MapArtifact {
        match kind {
            MapKind::Depth => &self.depth,
            MapKind::Mask => &self.mask,
            MapKind::Noise => &self.noise,
        }
    }

    fn replace(&mut self, artifact: MapArtifact) {
        match artifact.kind() {
            MapKind::Depth => self.depth = artifact,
            MapKind::Mask => self.mask = artifact,
            MapKind::Noise => self.noise = artifact,
        }
    }
}

/// Per-kind visibility/inclusion toggles, all enabled by default.
///
/// Independent of whether a map has been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMapFlags {
    /// Depth map toggle.
    pub depth: bool,
    /// Mask map toggle.
    pub mask: bool,
    /// Noise map toggle.
    pub noise: bool,
}

impl Default for ActiveMapFlags {
    fn default() -> Self {
        Self {
            depth: true,
            mask: true,
            noise: true,
        }
    }
}

impl ActiveMapFlags {
    /// Whether `kind` is currently enabled.
    #[must_use]
    pub fn is_enabled(self, kind: MapKind) -> bool {
        match kind {
            MapKind::Depth => self.depth,
            MapKind::Mask => self.mask,
            MapKind::Noise => self.noise,
        }
    }

    /// Flip the toggle for `kind`.
    pub fn toggle(&mut self, kind: MapKind) {
        match kind {
            MapKind::Depth => self.depth = !self.depth,
            MapKind::Mask => self.mask = !self.mask,
            MapKind::Noise => self.noise = !self.noise,
        }
    }

    /// The kinds currently enabled, in generation order.
    #[must_use]
    pub fn enabled_kinds(self) -> Vec<MapKind> {
        MapKind::ALL
            .into_iter()
            .filter(|&k| self.is_enabled(k))
            .collect()
    }
}

/// Session state for one reference-image upload.
///
/// # Quick Start
///
/// ```no_run
/// use reference_maps::{MapKind, StudioSession};
///
/// let mut session = StudioSession::new();
/// let bytes = std::fs::read("style.png").unwrap();
/// session.set_source(bytes).unwrap();
///
/// let depth_url = session.map(MapKind::Depth).unwrap().data_url().unwrap();
/// session.regenerate(MapKind::Noise).unwrap();
/// session.toggle_active(MapKind::Mask);
/// # let _ = depth_url;
/// ```
#[derive(Debug, Default)]
pub struct StudioSession {
    source: Option<Vec<u8>>,
    maps: Option<VisualMapSet>,
    active: ActiveMapFlags,
}

impl StudioSession {
    /// Create an empty session with all map kinds active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a source image is currently retained.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Upload a source image and synthesize the full map set.
    ///
    /// The bytes are decoded and downsampled first; only on success are the
    /// retained source and the map set replaced, so a failed upload leaves
    /// any existing state untouched. The original bytes are retained for the
    /// lifetime of the set to serve later [`regenerate`](Self::regenerate)
    /// calls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes are not a decodable image.
    pub fn set_source(&mut self, bytes: Vec<u8>) -> Result<&VisualMapSet> {
        let working = loader::load_working_buffer(&bytes)?;
        let maps = VisualMapSet::generate(&working, &mut rand::thread_rng());

        self.source = Some(bytes);
        Ok(self.maps.insert(maps))
    }

    /// Discard the retained source and its map set.
    ///
    /// Active flags are session preferences and survive the clear.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.maps = None;
    }

    /// Recompute a single map kind from the retained source.
    ///
    /// The original bytes are decoded and downsampled again, then only the
    /// targeted member of the set is replaced; the other two artifacts are
    /// left byte-identical.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSource`] when no source is retained and
    /// [`Error::Decode`] if the retained bytes no longer decode.
    pub fn regenerate(&mut self, kind: MapKind) -> Result<&MapArtifact> {
        let bytes = self
            .source
            .as_ref()
            .ok_or(Error::MissingSource { kind })?;
        let working = loader::load_working_buffer(bytes)?;
        let artifact = MapArtifact::synthesize(kind, &working, &mut rand::thread_rng());

        let maps = self
            .maps
            .as_mut()
            .ok_or(Error::MissingSource { kind })?;
        maps.replace(artifact);
        Ok(maps.get(kind))
    }

    /// The current map set, if a source has been uploaded.
    #[must_use]
    pub fn maps(&self) -> Option<&VisualMapSet> {
        self.maps.as_ref()
    }

    /// The current artifact for `kind`, if computed.
    #[must_use]
    pub fn map(&self, kind: MapKind) -> Option<&MapArtifact> {
        self.maps.as_ref().map(|m| m.get(kind))
    }

    /// Flip the active toggle for `kind`.
    pub fn toggle_active(&mut self, kind: MapKind) {
        self.active.toggle(kind);
    }

    /// Whether `kind` is currently active.
    #[must_use]
    pub fn is_active(&self, kind: MapKind) -> bool {
        self.active.is_enabled(kind)
    }

    /// The current set of active flags.
    #[must_use]
    pub fn active_flags(&self) -> ActiveMapFlags {
        self.active
    }
}
