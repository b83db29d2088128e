//! Key input
//!
//! The frame loop polls an [`InputSource`] once per frame with a short
//! timeout. Keys map onto [`KeyCommand`]s; unmapped keys are ignored.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::debug;

/// A raw key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
}

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A key arrived
    Key(Key),
    /// Nothing within the timeout
    Idle,
    /// The source will never produce another key
    Closed,
}

/// Studio commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Capture,
    NudgeUp,
    NudgeDown,
    NudgeLeft,
    NudgeRight,
    ResetOffsets,
    ShowRecords,
    Quit,
}

impl KeyCommand {
    /// Map a key press; letters are case-insensitive
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Enter => Some(KeyCommand::Capture),
            Key::Escape => Some(KeyCommand::Quit),
            Key::Char(c) => match c.to_ascii_lowercase() {
                ' ' | '\r' | '\n' => Some(KeyCommand::Capture),
                'w' => Some(KeyCommand::NudgeUp),
                's' => Some(KeyCommand::NudgeDown),
                'a' => Some(KeyCommand::NudgeLeft),
                'd' => Some(KeyCommand::NudgeRight),
                'r' => Some(KeyCommand::ResetOffsets),
                'i' => Some(KeyCommand::ShowRecords),
                'q' | '\u{1b}' => Some(KeyCommand::Quit),
                _ => None,
            },
        }
    }
}

/// Source of key presses
pub trait InputSource {
    /// Wait up to `timeout` for the next key
    fn poll(&mut self, timeout: Duration) -> Poll;
}

/// Fixed key sequence, one entry per poll
pub struct ScriptedInput {
    steps: VecDeque<Option<Key>>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Parse a comma-separated script.
    ///
    /// Tokens: `space`, `enter`, `esc`/`escape`, `.` (no key this frame) or a
    /// single character. Unknown tokens are skipped.
    pub fn parse(script: &str) -> Self {
        let steps = script
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| match token.to_ascii_lowercase().as_str() {
                "." => Some(None),
                "space" => Some(Some(Key::Char(' '))),
                "enter" | "return" => Some(Some(Key::Enter)),
                "esc" | "escape" => Some(Some(Key::Escape)),
                _ => {
                    let mut chars = token.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(Some(Key::Char(c))),
                        _ => {
                            debug!("Ignoring unknown key token {:?}", token);
                            None
                        }
                    }
                }
            })
            .collect::<Vec<_>>();
        Self::new(steps)
    }

    /// Steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> Poll {
        match self.steps.pop_front() {
            Some(Some(key)) => Poll::Key(key),
            Some(None) => Poll::Idle,
            None => Poll::Closed,
        }
    }
}

/// Line-buffered terminal input read on a background thread.
///
/// Each line is one batch of keys: an empty line is Enter, `esc` is Escape,
/// anything else is read character by character.
pub struct StdinInput {
    keys: Receiver<Key>,
    closed: bool,
}

impl StdinInput {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                for key in keys_from_line(&line) {
                    if tx.send(key).is_err() {
                        return;
                    }
                }
            }
        });
        Self { keys: rx, closed: false }
    }
}

fn keys_from_line(line: &str) -> Vec<Key> {
    if line.is_empty() {
        return vec![Key::Enter];
    }
    if line.trim().eq_ignore_ascii_case("esc") {
        return vec![Key::Escape];
    }
    line.chars().map(Key::Char).collect()
}

impl InputSource for StdinInput {
    fn poll(&mut self, timeout: Duration) -> Poll {
        if self.closed {
            return Poll::Idle;
        }
        match self.keys.recv_timeout(timeout) {
            Ok(key) => Poll::Key(key),
            Err(RecvTimeoutError::Timeout) => Poll::Idle,
            Err(RecvTimeoutError::Disconnected) => {
                // Stdin closed: keep running on frames alone
                debug!("Standard input closed");
                self.closed = true;
                Poll::Idle
            }
        }
    }
}
