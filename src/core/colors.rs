//! Color mapping for directory states in inventory listings.
//!
//! # Public API
//! - [`RepoState`]: Display classification of one [`DirectoryRecord`]
//! - [`get_state_color_style`]: Get color function for a state
//! - [`get_state_label`]: Fixed-width colored label
//!
//! # Color Scheme
//! - **Dirty**: Yellow, the repository has uncommitted changes
//! - **Clean**: Green
//! - **Unknown**: Blue, a repository whose status could not be read
//! - **Plain**: Bright black, not version-controlled

use crate::core::state::DirectoryRecord;
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Dirty,
    Clean,
    Unknown,
    Plain,
}

impl RepoState {
    pub fn of(record: &DirectoryRecord) -> Self {
        match &record.metadata {
            Some(m) if m.is_repo && m.has_uncommitted => RepoState::Dirty,
            Some(m) if m.is_repo && m.is_clean() => RepoState::Clean,
            Some(m) if m.is_repo => RepoState::Unknown,
            _ => RepoState::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoState::Dirty => "dirty",
            RepoState::Clean => "clean",
            RepoState::Unknown => "git",
            RepoState::Plain => "-",
        }
    }
}

pub fn get_state_color_style(state: RepoState) -> Box<dyn Fn(&str) -> ColoredString> {
    match state {
        RepoState::Dirty => Box::new(|text: &str| text.yellow()),
        RepoState::Clean => Box::new(|text: &str| text.green()),
        RepoState::Unknown => Box::new(|text: &str| text.blue()),
        RepoState::Plain => Box::new(|text: &str| text.bright_black()),
    }
}

/// Label padded to the widest state so listing columns line up
pub fn get_state_label(state: RepoState) -> ColoredString {
    let color_fn = get_state_color_style(state);
    color_fn(&format!("{:<5}", state.as_str()))
}
