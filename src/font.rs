use rusttype::Font;
use std::path::{Path, PathBuf};

use crate::error::{CockpitError, Result};

/// Common install locations, tried in order when no font is configured.
pub const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font_file(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path).map_err(|source| CockpitError::FontIo {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(data).ok_or_else(|| CockpitError::InvalidFont(path.to_path_buf()))
}

/// Loads `configured` if given; otherwise the first readable system font.
///
/// A configured path that fails is an error. With nothing configured and no
/// system font found the panel still runs, just without labels.
pub fn load_font(configured: Option<&Path>) -> Result<Option<Font<'static>>> {
    if let Some(path) = configured {
        let font = load_font_file(path)?;
        tracing::info!(path = %path.display(), "loaded font");
        return Ok(Some(font));
    }

    for candidate in SYSTEM_FONTS.iter().map(PathBuf::from) {
        if !candidate.is_file() {
            continue;
        }
        match load_font_file(&candidate) {
            Ok(font) => {
                tracing::info!(path = %candidate.display(), "loaded system font");
                return Ok(Some(font));
            }
            Err(err) => tracing::debug!(%err, "skipping system font"),
        }
    }

    tracing::warn!("no font found; gauge labels will not be drawn");
    Ok(None)
}
