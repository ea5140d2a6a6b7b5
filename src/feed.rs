use std::time::Duration;

use log::debug;
use serde_json::json;

use crate::error::{Error, Result};

/// Source of raw scoreboard bodies. Only [`Error::Transport`] is expected
/// from a fetch; validating the body is the caller's job.
pub trait Feed {
    fn fetch(&mut self) -> Result<String>;
}

pub struct HttpFeed {
    url: String,
    agent: ureq::Agent,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Feed for HttpFeed {
    fn fetch(&mut self) -> Result<String> {
        debug!("GET {}", self.url);
        let response = match self.agent.get(&self.url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(Error::Transport(format!(
                    "{} answered {} {}",
                    self.url,
                    code,
                    response.status_text()
                )))
            }
            Err(ureq::Error::Transport(err)) => return Err(Error::Transport(err.to_string())),
        };
        response
            .into_string()
            .map_err(|err| Error::Transport(format!("reading body from {}: {}", self.url, err)))
    }
}

/// Static test pattern: every participant shows hit, miss, unknown, hit,
/// repeated or cut to `arrows` results.
pub struct DemoFeed {
    participants: usize,
    arrows: usize,
}

impl DemoFeed {
    pub fn new(participants: usize, arrows: usize) -> Self {
        Self {
            participants,
            arrows,
        }
    }
}

impl Feed for DemoFeed {
    fn fetch(&mut self) -> Result<String> {
        let pattern = ["hit", "miss", "unknown", "hit"];
        let participants: Vec<_> = (0..self.participants)
            .map(|n| {
                let results: Vec<_> = pattern
                    .iter()
                    .cycle()
                    .take(self.arrows)
                    .map(|status| json!({ "status": status, "value": null, "final": false }))
                    .collect();
                json!({ "name": format!("Archer {}", n + 1), "score": { "results": results } })
            })
            .collect();
        let body = json!({
            "taikai": { "name": "Demo" },
            "tachi": { "index": 0, "round": 1, "participants": participants },
        });
        Ok(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::scoreboard::{ResultStatus, Scoreboard};

    #[test]
    fn demo_feed_is_valid() {
        let body = DemoFeed::new(9, 4).fetch().unwrap();
        let board = Scoreboard::from_json(&body, 9, 4).unwrap();
        assert_eq!(board.participants().len(), 9);
        let third = &board.participants()[8].results()[2];
        assert_eq!(third.status().unwrap(), ResultStatus::Unknown);
    }

    #[test]
    fn server_error_is_transient() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).unwrap();
            stream
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .unwrap();
        });

        let url = format!("http://{}/api/scoreboard", address);
        let mut feed = HttpFeed::new(url, Duration::from_secs(5));
        let err = feed.fetch().unwrap_err();
        server.join().unwrap();
        assert!(matches!(&err, Error::Transport(message) if message.contains("500")));
        assert!(!err.is_fatal());
    }

    #[test]
    fn unreachable_feed_is_transient() {
        // Port 9 (discard) on localhost is closed on test machines.
        let mut feed = HttpFeed::new("http://127.0.0.1:9/scoreboard", Duration::from_millis(200));
        let err = feed.fetch().unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.is_fatal());
    }
}
