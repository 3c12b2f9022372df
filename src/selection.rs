// THEORY:
// Images for one entity sit side by side in a flat directory and are named
// `<entity>-<description>.<ext>`, e.g. `Super Mario World-boxart.png` next to
// `Super Mario World-cartridge.jpg`. Selection picks exactly those files. The entity
// name is matched literally (regex metacharacters in ROM names such as `(USA)` or
// `[!]` are escaped) and the description must be a single word.
//
// Candidates are returned sorted by file name. That order is the "enumeration
// order" every later stage sees, which keeps the brightest reducer's tie-break
// reproducible across platforms.

use crate::error::{HueError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EntityMatcher {
    entity: String,
    pattern: Regex,
}

impl EntityMatcher {
    pub fn new(entity: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"^{}-\w+\.(jpg|png)$", regex::escape(entity)))
            .map_err(|e| HueError::Usage(format!("Invalid name '{entity}': {e}")))?;
        Ok(Self {
            entity: entity.to_string(),
            pattern,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }
}

/// Lists the files in `dir` whose names match, sorted by name.
pub fn candidate_files(dir: &Path, matcher: &EntityMatcher) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(HueError::InvalidDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if matcher.matches(&file_name) && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    log::debug!(
        "{} candidate image(s) for '{}' in {}",
        files.len(),
        matcher.entity(),
        dir.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn matches_entity_dash_word_with_image_extension() {
        let matcher = EntityMatcher::new("sonic").unwrap();
        assert!(matcher.matches("sonic-boxart.png"));
        assert!(matcher.matches("sonic-cart_2.jpg"));
        assert!(!matcher.matches("sonic.png"));
        assert!(!matcher.matches("sonic-box art.png"));
        assert!(!matcher.matches("sonic-boxart.gif"));
        assert!(!matcher.matches("sonic2-boxart.png"));
        assert!(!matcher.matches("xsonic-boxart.png"));
    }

    #[test]
    fn entity_metacharacters_are_literal() {
        let matcher = EntityMatcher::new("Tetris (USA) [!]").unwrap();
        assert!(matcher.matches("Tetris (USA) [!]-boxart.png"));
        assert!(!matcher.matches("Tetris USA !-boxart.png"));

        let dotted = EntityMatcher::new("a.b").unwrap();
        assert!(!dotted.matches("axb-boxart.png"));
    }

    #[test]
    fn candidates_are_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["kirby-snap.png", "kirby-box.jpg", "kirby.png", "metroid-box.png"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("kirby-dir.png")).unwrap();

        let matcher = EntityMatcher::new("kirby").unwrap();
        let files = candidate_files(dir.path(), &matcher).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["kirby-box.jpg", "kirby-snap.png"]);
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let matcher = EntityMatcher::new("kirby").unwrap();
        let err = candidate_files(&dir.path().join("nope"), &matcher).unwrap_err();
        assert!(matches!(err, HueError::InvalidDirectory(_)));
    }
}
