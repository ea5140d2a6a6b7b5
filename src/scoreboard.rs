//! Scoreboard snapshot as served by the tournament feed.
//!
//! ```text
//! { "taikai": { "name": "..." },
//!   "tachi": { "index": 3, "round": 1,
//!              "participants": [ { "name": "...",
//!                                  "score": { "results": [
//!                                      { "status": "hit", "value": 1, "final": true }, ... ] } } ] } }
//! ```
//!
//! Parsing is the schema check: a body that does not deserialize, or that
//! does not fit the board it is shown on, is a [`Error::SchemaValidation`].

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultStatus {
    Hit,
    Miss,
    Unknown,
    Absent,
}

impl ResultStatus {
    pub fn parse(status: Option<&str>) -> Result<Self> {
        match status {
            None => Ok(ResultStatus::Absent),
            Some("hit") => Ok(ResultStatus::Hit),
            Some("miss") => Ok(ResultStatus::Miss),
            Some("unknown") => Ok(ResultStatus::Unknown),
            Some(other) => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ArrowResult {
    pub status: Option<String>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(rename = "final")]
    pub is_final: bool,
}

impl ArrowResult {
    pub fn status(&self) -> Result<ResultStatus> {
        ResultStatus::parse(self.status.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Score {
    pub results: Vec<ArrowResult>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Participant {
    pub name: String,
    pub score: Score,
}

impl Participant {
    pub fn results(&self) -> &[ArrowResult] {
        &self.score.results
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Tachi {
    pub index: i64,
    pub round: i64,
    #[serde(default)]
    pub participants: Option<Vec<Participant>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Taikai {
    pub name: String,
}

/// One immutable feed reading; lives for a single update cycle.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Scoreboard {
    pub taikai: Taikai,
    #[serde(default)]
    pub tachi: Option<Tachi>,
}

impl Scoreboard {
    /// Parse and validate a feed body for a board with `tachi_size` slots of
    /// `arrows` results each.
    pub fn from_json(body: &str, tachi_size: usize, arrows: usize) -> Result<Self> {
        let scoreboard: Scoreboard = serde_json::from_str(body)?;
        scoreboard.validate(tachi_size, arrows)?;
        Ok(scoreboard)
    }

    fn validate(&self, tachi_size: usize, arrows: usize) -> Result<()> {
        let participants = self.participants();
        if participants.len() > tachi_size {
            return Err(Error::SchemaValidation(format!(
                "{} participants in a tachi of {}",
                participants.len(),
                tachi_size
            )));
        }
        for participant in participants {
            if participant.results().len() > arrows {
                return Err(Error::SchemaValidation(format!(
                    "participant {:?} has {} results, at most {} allowed",
                    participant.name,
                    participant.results().len(),
                    arrows
                )));
            }
        }
        Ok(())
    }

    /// Participants of the current tachi; empty when there is none.
    pub fn participants(&self) -> &[Participant] {
        self.tachi
            .as_ref()
            .and_then(|tachi| tachi.participants.as_deref())
            .unwrap_or(&[])
    }
}
