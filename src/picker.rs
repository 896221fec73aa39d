// Asynchronous background-image picking. The frame loop must never block on
// the user, so the prompt runs on its own thread and the loop polls for the
// outcome once per frame.
//
// Contract: cancelling (empty line or closed stdin) changes nothing; a
// chosen path is handed back for the caller to load, and a failed load is
// the caller's problem to log, not ours to retry.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Outcome of one pick request.
#[derive(Debug, PartialEq, Eq)]
pub enum Pick {
    Chosen(PathBuf),
    Cancelled,
}

pub struct ImagePicker {
    tx: Sender<Pick>,
    rx: Receiver<Pick>,
    pending: bool,
}

impl ImagePicker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, pending: false }
    }

    /// Start a pick. Ignored while an earlier request is still open;
    /// one prompt on the terminal at a time.
    pub fn request(&mut self) {
        if self.pending {
            log::debug!("pick already in progress, ignoring request");
            return;
        }
        self.pending = true;

        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = prompt_for_path();
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(outcome);
        });
    }

    /// Non-blocking check for a finished pick. Returns at most one outcome
    /// per request.
    pub fn poll(&mut self) -> Option<Pick> {
        if !self.pending {
            return None;
        }
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.pending = false;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker died without reporting; treat as a cancel.
                self.pending = false;
                Some(Pick::Cancelled)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Default for ImagePicker {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking half: ask on the terminal, read one line.
fn prompt_for_path() -> Pick {
    print!("background image path (empty line cancels): ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => Pick::Cancelled, // stdin closed or unreadable
        Ok(_) => {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Pick::Cancelled
            } else {
                Pick::Chosen(PathBuf::from(trimmed))
            }
        }
    }
}
