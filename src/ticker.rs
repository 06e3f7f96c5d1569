use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{ChatAction, MessageId};
use tokio::sync::watch;
use tokio::task::JoinHandle;

const CEILING: f32 = 95.0;
const TICK: Duration = Duration::from_millis(1500);
const BAR_WIDTH: usize = 20;

/// Cosmetic progress: eases towards 95% and never claims completion.
pub fn next_progress(current: f32) -> f32 {
    if current >= CEILING {
        return current;
    }
    let increment = ((CEILING - current) * 0.05).max(0.2);
    (current + increment).min(CEILING)
}

pub fn render(label: &str, percent: f32) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}\n{}{} {}%",
        label,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent.round() as u32
    )
}

/// Keeps editing the "processing" message until finished or dropped.
pub struct ProgressTicker {
    label: watch::Sender<String>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start(bot: Bot, chat_id: ChatId, message_id: MessageId, label: &str) -> Self {
        let (tx, rx) = watch::channel(label.to_string());
        let handle = tokio::spawn(async move {
            let mut progress = 0.0;
            let mut interval = tokio::time::interval(TICK);
            interval.tick().await;
            loop {
                interval.tick().await;
                progress = next_progress(progress);
                let text = render(&rx.borrow(), progress);
                // Purely cosmetic, so failed edits (rate limits, unchanged text) are ignored
                let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
                if let Err(e) = bot.edit_message_text(chat_id, message_id, text).await {
                    log::debug!("Progress edit skipped: {}", e);
                }
            }
        });
        Self { label: tx, handle }
    }

    pub fn set_label(&self, label: &str) {
        // only fails once the task is gone, which is harmless
        let _ = self.label.send(label.to_string());
    }

    pub fn finish(self) {}
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_monotonic_and_capped() {
        let mut p = 0.0;
        for _ in 0..1000 {
            let next = next_progress(p);
            assert!(next >= p);
            assert!(next <= CEILING);
            p = next;
        }
        assert_eq!(p, CEILING);
        assert_eq!(next_progress(CEILING), CEILING);
    }

    #[test]
    fn early_steps_are_proportional() {
        assert!((next_progress(0.0) - 4.75).abs() < 1e-4);
        // close to the ceiling the minimum step applies
        assert!((next_progress(94.0) - 94.2).abs() < 1e-4);
    }

    #[test]
    fn bar_rendering() {
        assert_eq!(render("Reading", 0.0), format!("Reading\n{} 0%", "░".repeat(20)));
        assert_eq!(render("x", 50.0), format!("x\n{}{} 50%", "█".repeat(10), "░".repeat(10)));
    }
}
