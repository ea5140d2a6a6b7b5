use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("no placement for participant slot {participant}, arrow slot {arrow}")]
    InvalidSlot { participant: usize, arrow: usize },

    #[error("unknown result status {0:?}")]
    UnknownStatus(String),

    #[error("feed response failed validation: {0}")]
    SchemaValidation(String),

    #[error("feed unavailable: {0}")]
    Transport(String),

    #[error("invalid wiring table: {0}")]
    InvalidWiring(String),

    #[error("invalid layout table: {0}")]
    InvalidLayout(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("display error: {0}")]
    Display(String),
}

impl Error {
    /// Only an unreachable feed is worth retrying; everything else is a
    /// deployment or logic bug and stops the scoreboard.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Transport(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SchemaValidation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_retried() {
        assert!(!Error::Transport("timed out".into()).is_fatal());
        assert!(Error::Display("pixels.render() failed".into()).is_fatal());
        assert!(Error::SchemaValidation("missing field".into()).is_fatal());
        assert!(Error::Config("bad flag".into()).is_fatal());
    }
}
