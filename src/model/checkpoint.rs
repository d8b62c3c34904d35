//! Checkpoint types: stations (operator-selected) and steps (sequential).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A station an operator can stand at. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Station {
    /// Event entrance.
    #[serde(alias = "entrada")]
    Entrada,

    /// VIP room door. Only VIP-eligible attendees who already entered pass.
    #[serde(alias = "sala-vip")]
    SalaVip,

    /// Event exit.
    #[serde(alias = "saida")]
    Saida,
}

impl Station {
    pub const ALL: [Self; 3] = [Self::Entrada, Self::SalaVip, Self::Saida];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entrada => "ENTRADA",
            Self::SalaVip => "SALA_VIP",
            Self::Saida => "SAIDA",
        }
    }
}

/// A step in the sequential flow.
///
/// Steps are ordered; advancing past the last wraps back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Register,
    Entry,
    Vip,
    Exit,
}

impl Step {
    pub const ALL: [Self; 4] = [Self::Register, Self::Entry, Self::Vip, Self::Exit];

    /// Position of this step in [`Step::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Register => 0,
            Self::Entry => 1,
            Self::Vip => 2,
            Self::Exit => 3,
        }
    }

    /// The step after this one, wrapping `Exit` back to `Register`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Entry => "ENTRY",
            Self::Vip => "VIP",
            Self::Exit => "EXIT",
        }
    }
}

/// Either kind of checkpoint, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Station(Station),
    Step(Step),
}

/// A checkpoint name that matches none of the known stations or steps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown checkpoint: {0}")]
pub struct UnknownCheckpoint(pub String);

/// Uppercases and maps `-` to `_` so `sala-vip` and `SALA_VIP` both parse.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

impl FromStr for Station {
    type Err = UnknownCheckpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|station| station.as_str() == wanted)
            .ok_or_else(|| UnknownCheckpoint(s.to_string()))
    }
}

impl FromStr for Step {
    type Err = UnknownCheckpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == wanted)
            .ok_or_else(|| UnknownCheckpoint(s.to_string()))
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Station(station) => fmt::Display::fmt(station, f),
            Self::Step(step) => fmt::Display::fmt(step, f),
        }
    }
}
