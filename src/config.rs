//! Startup configuration for the editor.

use std::path::Path;

use anyhow::Result;

use crate::batch::{decode, read_input};
use crate::model::{AppState, Layout};

/// Settings that seed the initial [`AppState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub layout: Layout,
    pub head: String,
    pub tail: String,
    /// Initial content of the input buffer
    pub input: String,
}

impl Config {
    /// Loads the preload file, if any, into the input text.
    pub fn with_preload(mut self, path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            self.input = decode(read_input(Some(path))?)?;
        }
        Ok(self)
    }

    /// Builds the initial editor state.
    pub fn into_state(self) -> AppState {
        let mut state = AppState::new(self.layout)
            .with_input(&self.input)
            .with_affixes(&self.head, &self.tail);
        if !self.input.is_empty() {
            state.status_message = Some(format!("Loaded {} line(s)", state.input.line_count()));
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_into_state() {
        let config = Config {
            layout: Layout::InPlace,
            head: ">".to_string(),
            tail: String::new(),
            input: "ATG\nCCA".to_string(),
        };
        let state = config.into_state();
        assert_eq!(state.layout, Layout::InPlace);
        assert_eq!(state.head.text(), ">");
        assert_eq!(state.input.text(), "ATG\nCCA");
        assert_eq!(state.status_message.as_deref(), Some("Loaded 2 line(s)"));
    }

    #[test]
    fn test_preload_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.txt");
        fs::write(&path, "GATTACA\n").unwrap();

        let config = Config::default().with_preload(Some(&path)).unwrap();
        assert_eq!(config.input, "GATTACA\n");

        let bad = dir.path().join("bin");
        fs::write(&bad, [0xffu8, 0xfe]).unwrap();
        let err = Config::default().with_preload(Some(&bad)).unwrap_err();
        assert_eq!(err.to_string(), "Sequence should be string");
    }

    #[test]
    fn test_default_is_empty_split() {
        let state = Config::default().into_state();
        assert_eq!(state.layout, Layout::Split);
        assert!(state.input.is_empty());
        assert!(state.status_message.is_none());
    }
}
