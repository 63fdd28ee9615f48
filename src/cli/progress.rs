//! Console Progress Rendering
//!
//! Subscribes to enrichment progress events and draws a single-line bar on
//! stderr. Rendering stops at the terminal event or when the sender closes.

use console::{Term, style};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::discovery::ProgressEvent;

const BAR_WIDTH: usize = 30;

/// Console progress renderer
pub struct ConsoleRenderer {
    term: Term,
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// One progress line for an event
    pub fn render(event: &ProgressEvent) -> String {
        let fraction = event.fraction();
        format!(
            "{} {:>3}% {}",
            render_progress_bar(fraction, BAR_WIDTH),
            (fraction * 100.0).round() as u32,
            event.label()
        )
    }

    /// Draw events until the run finishes (non-blocking)
    pub fn spawn(self, mut receiver: broadcast::Receiver<ProgressEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        let _ = self.term.clear_line();
                        let line = Self::render(&event);
                        if event.is_finished() {
                            let _ = self.term.write_line(&format!("{}", style(line).green()));
                            break;
                        }
                        let _ = self.term.write_str(&line);
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => {
                        let _ = self.term.write_line("");
                        break;
                    }
                }
            }
        })
    }
}

/// Render a simple progress bar
fn render_progress_bar(fraction: f32, width: usize) -> String {
    let progress = fraction.clamp(0.0, 1.0);
    let filled = (progress * width as f32) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_render() {
        assert_eq!(render_progress_bar(0.0, 10), "[░░░░░░░░░░]");
        assert_eq!(render_progress_bar(0.5, 10), "[█████░░░░░]");
        assert_eq!(render_progress_bar(1.0, 10), "[██████████]");
        assert_eq!(render_progress_bar(1.7, 4), "[████]");
    }

    #[test]
    fn test_render_line() {
        let event = ProgressEvent::Advanced {
            processed: 1,
            total: 4,
            label: "Crawling A (1/4)...".to_string(),
        };
        let line = ConsoleRenderer::render(&event);
        assert!(line.contains(" 25% Crawling A (1/4)..."));
    }

    #[tokio::test]
    async fn test_renderer_stops_on_finish() {
        let (sender, receiver) = broadcast::channel(8);
        let handle = ConsoleRenderer::new().spawn(receiver);
        sender
            .send(ProgressEvent::Finished {
                total: 0,
                label: "done".to_string(),
            })
            .unwrap();
        handle.await.unwrap();
    }
}
