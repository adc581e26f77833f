use std::time::Duration;

use crossterm::event::{EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::crossterm::event::KeyEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Terminal-side events for the panel loop.
#[derive(Debug, Clone)]
pub enum Event {
    /// Periodic tick for message expiry.
    Tick,
    /// Time to redraw.
    Render,
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// The input stream ended.
    Closed,
}

/// Multiplexes crossterm input with tick and render timers on a background
/// task, forwarding everything through an unbounded channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            let mut render = tokio::time::interval(render_rate);

            loop {
                let event = tokio::select! {
                    input = reader.next() => match input {
                        Some(Ok(crossterm::event::Event::Key(key)))
                            if key.kind == KeyEventKind::Press => Event::Key(key),
                        Some(Ok(crossterm::event::Event::Resize(w, h))) => Event::Resize(w, h),
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            tracing::warn!("Terminal input error: {}", e);
                            continue;
                        }
                        None => Event::Closed,
                    },
                    _ = tick.tick() => Event::Tick,
                    _ = render.tick() => Event::Render,
                };
                let closed = matches!(event, Event::Closed);
                if tx.send(event).is_err() || closed {
                    return;
                }
            }
        });

        Self { rx, task }
    }

    /// Wait for the next event. Returns `Event::Closed` once the
    /// background task has stopped.
    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Closed)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.task.abort();
    }
}
