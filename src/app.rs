use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

use crate::config::AppConfig;
use crate::stats::snapshot::Snapshot;
use crate::stats::{Digit, Distribution};
use crate::theme::ThemeMode;

/// How long a status message stays in the info line
const STATUS_MESSAGE_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub popup: Popup,
    pub theme: ThemeMode,
    pub show_legend: bool,

    // Latest good snapshot; a failed reload keeps the previous one
    pub snapshot: Snapshot,
    pub source: Option<PathBuf>,
    source_modified: Option<SystemTime>,

    // Local override of the live digit (keys 0-9, or --digit)
    pub pinned_digit: Option<Digit>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    refresh_interval: Duration,
    last_refresh: Instant,
}

impl App {
    pub async fn new(
        config: &AppConfig,
        source: Option<PathBuf>,
        theme: ThemeMode,
        pinned_digit: Option<Digit>,
    ) -> Result<Self> {
        let mut app = Self {
            popup: Popup::None,
            theme,
            show_legend: config.show_legend,

            snapshot: Snapshot::default(),
            source,
            source_modified: None,

            pinned_digit,

            status_message: None,
            status_message_time: None,

            refresh_interval: Duration::from_millis(config.refresh_ms),
            last_refresh: Instant::now(),
        };

        if app.source.is_some() {
            app.reload().await;
        } else {
            app.set_status("No snapshot given (use --input)");
        }

        Ok(app)
    }

    /// Live digit: a local pin wins over the snapshot's
    pub fn active_digit(&self) -> Option<Digit> {
        self.pinned_digit.or(self.snapshot.current_digit)
    }

    pub fn distribution(&self) -> Distribution {
        Distribution::compute(&self.snapshot.frequencies, self.active_digit())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Re-read the snapshot file now. Returns false if the read failed.
    pub async fn reload(&mut self) -> bool {
        let Some(path) = self.source.clone() else {
            return false;
        };

        self.source_modified = modified_time(&path).await;
        match Snapshot::load(&path).await {
            Ok(snapshot) => {
                tracing::debug!(
                    "Loaded snapshot from {} ({} entries)",
                    path.display(),
                    snapshot.frequencies.len()
                );
                self.snapshot = snapshot;
                true
            }
            Err(e) => {
                tracing::warn!("Snapshot reload failed: {}", e);
                self.set_status(format!("Error: {}", e));
                false
            }
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup == Popup::Help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                tracing::info!("Switched to {} theme", self.theme.name());
                self.set_status(format!("Theme: {}", self.theme.name()));
            }
            KeyCode::Char('r') => {
                if self.source.is_some() && self.reload().await {
                    self.set_status("Reloaded");
                }
            }
            KeyCode::Char('l') => {
                self.show_legend = !self.show_legend;
            }
            KeyCode::Char('c') => {
                if self.pinned_digit.take().is_some() {
                    self.set_status("Following snapshot digit");
                }
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let digit = ch.to_digit(10).and_then(|n| Digit::new(n as u8));
                if let Some(digit) = digit {
                    self.pinned_digit = Some(digit);
                    self.set_status(format!("Pinned digit {}", digit));
                }
            }
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.popup = Popup::Help;
            }
            KeyCode::Esc => {
                self.status_message = None;
                self.status_message_time = None;
            }
            _ => {}
        }

        Ok(())
    }

    /// Periodic housekeeping: expire status messages, pick up snapshot changes
    pub async fn tick(&mut self) -> Result<()> {
        if let Some(shown_at) = self.status_message_time {
            if shown_at.elapsed() >= Duration::from_secs(STATUS_MESSAGE_SECS) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        if self.last_refresh.elapsed() < self.refresh_interval {
            return Ok(());
        }
        self.last_refresh = Instant::now();

        if let Some(path) = self.source.clone() {
            let modified = modified_time(&path).await;
            if modified.is_some() && modified != self.source_modified {
                tracing::debug!("Snapshot changed on disk, reloading");
                self.reload().await;
            }
        }

        Ok(())
    }
}

async fn modified_time(path: &std::path::Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.ok()?.modified().ok()
}
