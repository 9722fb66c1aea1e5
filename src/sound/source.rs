//! Sound source management.
//!
//! Resolves the completion sound: an explicit file, one of the desktop's
//! alert sounds, or the generated tone as a last resort.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sound file on disk.
    File {
        /// The name of the sound (the file stem, e.g. "sonar").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// The tone generated in memory.
    Tone,
}

impl SoundSource {
    /// Creates a file sound source named after the file stem.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Tone => "tone",
        }
    }

    /// Returns true if this is a sound file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path if this is a sound file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone => None,
        }
    }
}

/// Directories to search for alert sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &[
    "/usr/share/sounds/gnome/default/alerts",
    "/usr/share/sounds/freedesktop/stereo",
    "/usr/share/sounds/sound-icons",
    "/System/Library/Sounds",
];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["ogg", "oga", "wav", "flac", "mp3", "aiff"];

/// Default sound names to try, in order of preference.
const DEFAULT_SOUND_NAMES: &[&str] = &["sonar", "complete", "bell", "Glass"];

/// Discovers alert sounds installed on the system.
///
/// Returns an empty vector if none are found.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds: Vec<SoundSource> = SYSTEM_SOUND_DIRS
        .iter()
        .map(Path::new)
        .filter(|dir| dir.is_dir())
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .map(|entry| entry.path())
        .filter(|path| is_supported(path))
        .map(SoundSource::file)
        .collect();

    // Sort by name for consistent ordering
    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Gets the default sound source for the completion alert.
///
/// Prefers a known alert sound, then any discovered sound, then the tone.
#[must_use]
pub fn get_default_sound() -> SoundSource {
    let system_sounds = discover_system_sounds();

    for preferred_name in DEFAULT_SOUND_NAMES {
        if let Some(sound) = system_sounds.iter().find(|s| s.name() == *preferred_name) {
            return sound.clone();
        }
    }

    system_sounds.into_iter().next().unwrap_or(SoundSource::Tone)
}

/// Resolves the configured sound path.
///
/// # Errors
///
/// Returns `SoundError::Missing` if `path` is not a file.
pub fn resolve_sound(path: &Path) -> Result<SoundSource, SoundError> {
    if path.is_file() {
        Ok(SoundSource::file(path))
    } else {
        Err(SoundError::Missing(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_source_file() {
        let source = SoundSource::file("/usr/share/sounds/gnome/default/alerts/sonar.ogg");
        assert!(source.is_file());
        assert_eq!(source.name(), "sonar");
        assert!(source.path().is_some());
    }

    #[test]
    fn test_sound_source_tone() {
        let source = SoundSource::Tone;
        assert!(!source.is_file());
        assert_eq!(source.name(), "tone");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_sound_source_equality() {
        let s1 = SoundSource::file("/path/sonar.ogg");
        let s2 = SoundSource::file("/path/sonar.ogg");
        let s3 = SoundSource::file("/path/bell.ogg");

        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("/a/sonar.ogg")));
        assert!(is_supported(Path::new("/a/Glass.AIFF")));
        assert!(!is_supported(Path::new("/a/readme.txt")));
        assert!(!is_supported(Path::new("/a/noextension")));
    }

    #[test]
    fn test_discover_system_sounds_no_panic() {
        // Results depend on the machine; may be empty in containers.
        let sounds = discover_system_sounds();
        assert!(sounds.iter().all(SoundSource::is_file));
    }

    #[test]
    fn test_get_default_sound_returns_source() {
        let source = get_default_sound();
        assert!(!source.name().is_empty());
    }

    #[test]
    fn test_resolve_sound_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ding.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let source = resolve_sound(&path).unwrap();
        assert_eq!(source.name(), "ding");
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn test_resolve_sound_missing_file() {
        let result = resolve_sound(Path::new("/nonexistent/ding.wav"));
        match result {
            Err(SoundError::Missing(path)) => assert!(path.ends_with("ding.wav")),
            other => panic!("Expected Missing error, got {:?}", other),
        }
    }
}
