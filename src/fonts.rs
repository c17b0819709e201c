//! Locating the title font and probing text capabilities.
//!
//! The cover font ships in a `fonts/` directory beside the binary (or the
//! source checkout during development). [`resolve_font`] searches a list of
//! roots for it; [`probe`] is the one-time startup check the CLI runs before
//! any cover is composed.
//!
//! ## Search order
//!
//! 1. `font_file` itself, when it is an absolute path
//! 2. `<root>/<font_directory>/<font_file>` for each root
//! 3. a case-insensitive walk of `<root>/<font_directory>` (nested folders)
//!
//! Default roots are the working directory, the executable's directory, and
//! the crate manifest directory.

use crate::config::TextConfig;
use crate::imaging::{CosmicTextRenderer, TextError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How deep the fallback walk descends below the font directory.
const MAX_FONT_DEPTH: usize = 3;

/// Capabilities discovered at startup.
#[derive(Debug)]
pub struct Capabilities {
    /// Complex script shaping (bidi, ligatures, feature switches). Always
    /// compiled in; there is no native library to install.
    pub complex_shaping: bool,
    /// The resolved font and its family name, or why it is unusable.
    pub font: Result<(PathBuf, String), TextError>,
}

/// Roots searched for the font directory, most specific first.
pub fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(dir);
    }
    roots.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    roots.dedup();
    roots
}

/// Find the configured font file under `roots`.
pub fn resolve_font(config: &TextConfig, roots: &[PathBuf]) -> Result<PathBuf, TextError> {
    if config.font_file.is_absolute() {
        return if config.font_file.is_file() {
            Ok(config.font_file.clone())
        } else {
            Err(not_found(&config.font_file, "font file does not exist"))
        };
    }

    for root in roots {
        let candidate = root.join(&config.font_directory).join(&config.font_file);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "resolved font");
            return Ok(candidate);
        }
    }

    let wanted = config.font_file.file_name().unwrap_or_default();
    for root in roots {
        let dir = root.join(&config.font_directory);
        if !dir.is_dir() {
            continue;
        }
        let found = WalkDir::new(&dir)
            .max_depth(MAX_FONT_DEPTH)
            .into_iter()
            .filter_map(Result::ok)
            .find(|entry| {
                entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_string_lossy()
                        .eq_ignore_ascii_case(&wanted.to_string_lossy())
            });
        if let Some(entry) = found {
            tracing::debug!(path = %entry.path().display(), "resolved font by search");
            return Ok(entry.into_path());
        }
    }

    Err(not_found(
        &config.font_directory.join(&config.font_file),
        &format!("not found under {} search root(s)", roots.len()),
    ))
}

fn not_found(path: &Path, message: &str) -> TextError {
    TextError::FontResource {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Resolve and load the font once, reporting what is available.
pub fn probe(config: &TextConfig, roots: &[PathBuf]) -> Capabilities {
    let font = resolve_font(config, roots).and_then(|path| {
        let renderer = CosmicTextRenderer::from_file(&path)?;
        let family = renderer.family().to_string();
        Ok((path, family))
    });
    Capabilities {
        complex_shaping: true,
        font,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(file: &str) -> TextConfig {
        TextConfig {
            font_file: PathBuf::from(file),
            ..TextConfig::default()
        }
    }

    #[test]
    fn finds_font_in_first_matching_root() {
        let empty = TempDir::new().unwrap();
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("fonts")).unwrap();
        std::fs::write(tmp.path().join("fonts/Title.otf"), b"font").unwrap();

        let roots = vec![empty.path().to_path_buf(), tmp.path().to_path_buf()];
        let path = resolve_font(&config_for("Title.otf"), &roots).unwrap();
        assert_eq!(path, tmp.path().join("fonts/Title.otf"));
    }

    #[test]
    fn falls_back_to_case_insensitive_nested_search() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("fonts/prima")).unwrap();
        std::fs::write(tmp.path().join("fonts/prima/PRIMA SANS BOLD.OTF"), b"font").unwrap();

        let roots = vec![tmp.path().to_path_buf()];
        let path = resolve_font(&config_for("Prima Sans Bold.otf"), &roots).unwrap();
        assert!(path.ends_with("fonts/prima/PRIMA SANS BOLD.OTF"));
    }

    #[test]
    fn absolute_font_path_is_used_directly() {
        let tmp = TempDir::new().unwrap();
        let font = tmp.path().join("custom.ttf");
        std::fs::write(&font, b"font").unwrap();

        let path = resolve_font(&config_for(font.to_str().unwrap()), &[]).unwrap();
        assert_eq!(path, font);
    }

    #[test]
    fn missing_font_is_font_resource_error() {
        let tmp = TempDir::new().unwrap();
        let roots = vec![tmp.path().to_path_buf()];
        let result = resolve_font(&config_for("Nope.otf"), &roots);
        assert!(matches!(result, Err(TextError::FontResource { .. })));
    }

    #[test]
    fn probe_reports_unloadable_font() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("fonts")).unwrap();
        std::fs::write(tmp.path().join("fonts/Broken.otf"), b"not a font").unwrap();

        let caps = probe(&config_for("Broken.otf"), &[tmp.path().to_path_buf()]);
        assert!(caps.complex_shaping);
        assert!(caps.font.is_err());
    }

    #[test]
    fn default_roots_include_manifest_dir() {
        let roots = default_search_roots();
        assert!(roots.contains(&PathBuf::from(env!("CARGO_MANIFEST_DIR"))));
    }
}
