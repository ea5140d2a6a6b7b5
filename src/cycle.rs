//! The fetch, validate, render, commit, wait loop.
//!
//! A feed that cannot be reached blanks the board and the loop carries on.
//! Every other error ends the loop: a body that fails validation means the
//! deployment is misconfigured, and slot, status or pixel errors are bugs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::display::Display;
use crate::error::Result;
use crate::feed::Feed;
use crate::frame::FrameBuffer;
use crate::render::Board;
use crate::scoreboard::Scoreboard;

/// Longest sleep between two shutdown checks while waiting.
pub const WAIT_SLICE: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The feed answered; `participants` results were drawn.
    Rendered { taikai: String, participants: usize },
    /// The feed was unreachable; a blank board was committed.
    Blanked,
}

pub struct UpdateCycle {
    board: Board,
    feed: Box<dyn Feed>,
    back: Option<FrameBuffer>,
}

impl UpdateCycle {
    pub fn new(board: Board, feed: Box<dyn Feed>) -> Self {
        Self {
            board,
            feed,
            back: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// One pass up to and including the commit.
    pub fn run_once<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<CycleOutcome> {
        let scoreboard = match self.feed.fetch() {
            Ok(body) => Some(Scoreboard::from_json(
                &body,
                self.board.tachi_size(),
                self.board.layout().arrows(),
            )?),
            Err(err) if !err.is_fatal() => {
                warn!("{}; blanking the board", err);
                None
            }
            Err(err) => return Err(err),
        };

        let mut frame = self
            .back
            .take()
            .unwrap_or_else(|| self.board.new_frame());
        self.board.render(&mut frame, scoreboard.as_ref())?;
        self.back = Some(display.commit(frame)?);

        let outcome = match scoreboard {
            Some(scoreboard) => {
                let participants = scoreboard.participants().len();
                match &scoreboard.tachi {
                    Some(tachi) => debug!(
                        "{}: tachi {} round {}, {} participants",
                        scoreboard.taikai.name, tachi.index, tachi.round, participants
                    ),
                    None => debug!("{}: no tachi in progress", scoreboard.taikai.name),
                }
                CycleOutcome::Rendered {
                    taikai: scoreboard.taikai.name,
                    participants,
                }
            }
            None => CycleOutcome::Blanked,
        };
        Ok(outcome)
    }

    /// Cycle until `shutdown` is raised, checking it at least every
    /// [`WAIT_SLICE`] while waiting.
    pub fn run<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
        interval: Duration,
        shutdown: &AtomicBool,
    ) -> Result<()> {
        while !shutdown.load(Ordering::Relaxed) {
            self.run_once(display)?;
            wait(interval, shutdown);
        }
        debug!("shutdown requested");
        Ok(())
    }
}

fn wait(interval: Duration, shutdown: &AtomicBool) {
    // Past the clock's range only shutdown ends the wait.
    let deadline = Instant::now().checked_add(interval);
    while !shutdown.load(Ordering::Relaxed) {
        let remaining = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return;
                }
                deadline - now
            }
            None => WAIT_SLICE,
        };
        thread::sleep(remaining.min(WAIT_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrepresentable_interval_still_honours_shutdown() {
        let started = Instant::now();
        wait(Duration::MAX, &AtomicBool::new(true));
        assert!(started.elapsed() < WAIT_SLICE);
    }
}
