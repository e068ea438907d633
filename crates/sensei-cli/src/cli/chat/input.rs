//! Line input for the chat loop.
//!
//! Lines are read on a dedicated OS thread and handed over through a tokio
//! channel. The async side never blocks on the terminal, so Ctrl+C is seen
//! by the signal handler at any point, including while a prompt is waiting.

use std::io::BufRead;

use tokio::sync::mpsc;

use sensei_core::chat::input::{LineEvent, LineSource};

/// Lines buffered between the reader thread and the chat loop.
const CHANNEL_CAPACITY: usize = 64;

/// [`LineSource`] fed by a background reader thread.
pub struct ThreadedLines {
    rx: mpsc::Receiver<LineEvent>,
}

impl ThreadedLines {
    /// Read from the process's standard input.
    pub fn stdin() -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    /// Read from any buffered reader.
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let spawned = std::thread::Builder::new()
            .name("sensei-input".to_string())
            .spawn(move || pump_lines(reader, tx));

        if let Err(err) = spawned {
            tracing::error!(error = %err, "failed to start input thread");
        }
        Self { rx }
    }
}

impl LineSource for ThreadedLines {
    async fn next_line(&mut self) -> LineEvent {
        self.rx.recv().await.unwrap_or(LineEvent::Closed)
    }
}

fn pump_lines<R: BufRead>(reader: R, tx: mpsc::Sender<LineEvent>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.blocking_send(LineEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "stopped reading input");
                break;
            }
        }
    }
    let _ = tx.blocking_send(LineEvent::Closed);
}
