use std::fs;
use std::path::Path;

use crate::{FixtureError, Result};

/// The word lists every generated record draws from.
///
/// Loaded once at startup, before any database mutation, so a missing
/// or empty list aborts the run without touching the store.
#[derive(Debug, Clone)]
pub struct WordLists {
    pub forenames: Vec<String>,
    pub surnames: Vec<String>,
    pub occupations: Vec<String>,
    pub races: Vec<String>,
    pub places: Vec<String>,
}

impl WordLists {
    /// Loads all five lists from the given fixtures directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let lists = Self {
            forenames: read_word_list(&dir.join("forenames.txt"))?,
            surnames: read_word_list(&dir.join("surnames.txt"))?,
            occupations: read_word_list(&dir.join("occupations.txt"))?,
            races: read_word_list(&dir.join("races.txt"))?,
            places: read_word_list(&dir.join("places.txt"))?,
        };
        tracing::debug!(
            forenames = lists.forenames.len(),
            surnames = lists.surnames.len(),
            occupations = lists.occupations.len(),
            races = lists.races.len(),
            places = lists.places.len(),
            "loaded word lists"
        );
        Ok(lists)
    }
}

/// One entry per line, trimmed, blank lines skipped; an empty result
/// is an error.
fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Err(FixtureError::MissingFixtureFile {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(FixtureError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let words: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if words.is_empty() {
        return Err(FixtureError::EmptyWordList {
            path: path.to_path_buf(),
        });
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_lists(dir: &Path) {
        fs::write(dir.join("forenames.txt"), "Mary\nJohn\n").unwrap();
        fs::write(dir.join("surnames.txt"), "Smith\nWilliams\n").unwrap();
        fs::write(dir.join("occupations.txt"), "Baker\n").unwrap();
        fs::write(dir.join("races.txt"), "Mixed\n").unwrap();
        fs::write(dir.join("places.txt"), "London\n").unwrap();
    }

    #[test]
    fn loads_all_five_lists() {
        let dir = tempfile::tempdir().unwrap();
        write_lists(dir.path());

        let lists = WordLists::load(dir.path()).unwrap();

        assert_eq!(lists.forenames, vec!["Mary", "John"]);
        assert_eq!(lists.surnames, vec!["Smith", "Williams"]);
        assert_eq!(lists.occupations, vec!["Baker"]);
        assert_eq!(lists.races, vec!["Mixed"]);
        assert_eq!(lists.places, vec!["London"]);
    }

    #[test]
    fn entries_are_trimmed_and_blank_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_lists(dir.path());
        fs::write(dir.path().join("places.txt"), "  London  \n\n Paris\n\n").unwrap();

        let lists = WordLists::load(dir.path()).unwrap();

        assert_eq!(lists.places, vec!["London", "Paris"]);
    }

    #[test]
    fn missing_file_is_a_fixture_error() {
        let dir = tempfile::tempdir().unwrap();
        write_lists(dir.path());
        fs::remove_file(dir.path().join("races.txt")).unwrap();

        let result = WordLists::load(dir.path());

        match result {
            Err(FixtureError::MissingFixtureFile { path }) => {
                assert!(path.ends_with("races.txt"));
            }
            other => panic!("expected MissingFixtureFile, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_lists(dir.path());
        fs::write(dir.path().join("occupations.txt"), "\n\n").unwrap();

        let result = WordLists::load(dir.path());
        assert!(matches!(result, Err(FixtureError::EmptyWordList { .. })));
    }
}
