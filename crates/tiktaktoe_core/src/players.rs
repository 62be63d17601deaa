//! Who controls each side.

use crate::types::Side;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Controller of a side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves come from the input source.
    #[default]
    Human,
    /// Moves come from the move policy.
    Computer,
}

impl PlayerKind {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Computer => "Computer",
        }
    }

    /// Toggles between `Human` and `Computer`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }
}

/// Per-side controller assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Players {
    /// Controller of X.
    pub x: PlayerKind,
    /// Controller of O.
    pub o: PlayerKind,
}

impl Players {
    /// Creates an assignment.
    pub fn new(x: PlayerKind, o: PlayerKind) -> Self {
        Self { x, o }
    }

    /// Returns the controller of `side`.
    pub fn kind(&self, side: Side) -> PlayerKind {
        match side {
            Side::X => self.x,
            Side::O => self.o,
        }
    }

    /// Sets the controller of `side`.
    pub fn set(&mut self, side: Side, kind: PlayerKind) {
        match side {
            Side::X => self.x = kind,
            Side::O => self.o = kind,
        }
    }

    /// Whether `side` is played by the computer.
    pub fn is_computer(&self, side: Side) -> bool {
        self.kind(side) == PlayerKind::Computer
    }
}
