//! Terminal rendering of the view contract.
//!
//! With ANSI enabled the status line is redrawn in place on every render,
//! including each tick. Without it (piped output) a status line is printed
//! only when something other than the remaining time changes.

use std::io::Write;

use pomocycle_core::storage::NotificationsConfig;
use pomocycle_core::view::{self, ButtonStates, View};
use pomocycle_core::{DurationPreset, Mode};

pub struct TerminalView<W: Write> {
    out: W,
    ansi: bool,
    notifications: NotificationsConfig,
    time: String,
    mode: String,
    progress: String,
    buttons: ButtonStates,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, ansi: bool, notifications: NotificationsConfig) -> Self {
        Self {
            out,
            ansi,
            notifications,
            time: String::new(),
            mode: String::new(),
            progress: String::new(),
            buttons: ButtonStates::new(false, false),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    /// Current status line without control sequences.
    pub fn status_line(&self) -> String {
        let mut hints = Vec::new();
        if self.buttons.start_enabled {
            hints.push(format!("[s] {}", self.buttons.start_label));
        }
        if self.buttons.pause_enabled {
            hints.push("[p] Pause".to_string());
        }
        if self.buttons.reset_enabled {
            hints.push("[r] Reset".to_string());
        }
        if self.buttons.presets_enabled {
            hints.push("[f/m] Preset".to_string());
        }
        format!(
            "{} | {} | {} | {}",
            self.time,
            self.mode,
            self.progress,
            hints.join(" ")
        )
    }

    /// Break out of the in-place status line before other output.
    pub fn finish_line(&mut self) {
        if self.ansi {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }

    fn redraw(&mut self) {
        let line = self.status_line();
        if self.ansi {
            let _ = write!(self.out, "\r\x1b[2K{line}");
        } else {
            let _ = writeln!(self.out, "{line}");
        }
        let _ = self.out.flush();
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render_time(&mut self, remaining_secs: u64) {
        self.time = view::format_time(remaining_secs);
        if self.ansi {
            self.redraw();
        }
    }

    fn render_progress(&mut self, cycle_index: u32, total_cycles: u32) {
        let bar: String = view::progress_slots(cycle_index, total_cycles)
            .into_iter()
            .map(|done| if done { '#' } else { '-' })
            .collect();
        self.progress = format!("[{bar}] {}", view::progress_text(cycle_index, total_cycles));
    }

    fn render_mode(&mut self, mode: Mode, preset: DurationPreset) {
        self.mode = view::mode_label(mode, preset);
    }

    fn render_buttons(&mut self, running: bool, is_resumable: bool) {
        self.buttons = ButtonStates::new(running, is_resumable);
        self.redraw();
    }

    fn notify(&mut self, message: &str) {
        if !self.notifications.enabled {
            return;
        }
        let bell = if self.notifications.bell && self.ansi { "\x07" } else { "" };
        if self.ansi {
            let _ = write!(self.out, "\r\x1b[2K");
        }
        let _ = writeln!(self.out, ">> {message}{bell}");
        let _ = self.out.flush();
    }

    fn set_page_title(&mut self, text: &str) {
        if self.ansi {
            let _ = write!(self.out, "\x1b]0;{text}\x07");
            let _ = self.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TerminalView<Vec<u8>> {
        TerminalView::new(Vec::new(), false, NotificationsConfig::default())
    }

    #[test]
    fn status_line_reflects_idle_state() {
        let mut view = plain();
        view.render_progress(2, 4);
        view.render_mode(Mode::ShortBreak, DurationPreset::Fast);
        view.render_time(65);
        view.render_buttons(false, true);
        assert_eq!(
            view.status_line(),
            "1:05 | Short Break (5 min) | [##--] Cycle 2 of 4 | [s] Resume [r] Reset [f/m] Preset"
        );
    }

    #[test]
    fn plain_output_skips_time_only_redraws() {
        let mut view = plain();
        view.render_buttons(true, false);
        view.render_time(10);
        view.render_time(9);
        let out = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn notifications_can_be_disabled() {
        let mut view = TerminalView::new(
            Vec::new(),
            false,
            NotificationsConfig {
                enabled: false,
                bell: true,
            },
        );
        view.notify("Cycle 1 complete! Time for a short break.");
        assert!(view.into_inner().is_empty());
    }

    #[test]
    fn plain_notification_has_no_bell() {
        let mut view = plain();
        view.notify("hello");
        view.set_page_title("Time to work!");
        assert_eq!(String::from_utf8(view.into_inner()).unwrap(), ">> hello\n");
    }
}
