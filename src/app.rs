use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::{Config, parse_key};
use crate::monitor::{Monitor, Phase};
use crate::system::snapshot::Report;
use crate::system::source::CounterSource;
use crate::ui::theme::Theme;

pub struct App {
    pub running: bool,
    pub monitor: Monitor,
    pub report: Option<Report>,
    pub theme: Theme,
    pub refresh_interval: Duration,
    pub quit_key: KeyCode,
}

impl App {
    pub fn new(config: &Config, source: Box<dyn CounterSource>) -> Self {
        App {
            running: true,
            monitor: Monitor::new(source),
            report: None,
            theme: Theme::from_config(&config.colors.theme),
            refresh_interval: config.general.refresh_interval(),
            quit_key: parse_key(&config.keybinds.quit).unwrap_or(KeyCode::Char('q')),
        }
    }

    /// Run one sampling pass; the last report stays on screen until a new one
    /// replaces it.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(report) = self.monitor.on_tick(now) {
            self.report = Some(report);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || key.code == self.quit_key {
            self.running = false;
        }
    }

    pub fn is_collecting_baseline(&self) -> bool {
        self.monitor.phase() == Phase::Uninitialized
    }

    pub fn quit_label(&self) -> String {
        key_label(self.quit_key)
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::sampler::{CpuTicks, NetTotals};
    use crate::system::error::SampleError;
    use crate::system::snapshot::{DiskUsage, MemoryUsage};

    /// Counters that advance by a fixed step on every read.
    struct Steady {
        step: u64,
    }

    impl CounterSource for Steady {
        fn cpu_ticks(&mut self) -> Result<CpuTicks, SampleError> {
            self.step += 1;
            Ok(CpuTicks {
                user: self.step * 30,
                idle: self.step * 70,
                ..CpuTicks::default()
            })
        }

        fn net_totals(&mut self) -> Result<NetTotals, SampleError> {
            Ok(NetTotals {
                received: self.step * 1024,
                sent: self.step * 512,
            })
        }

        fn memory(&mut self) -> Result<MemoryUsage, SampleError> {
            Ok(MemoryUsage::from_totals(100, 50, 10))
        }

        fn disk(&mut self) -> Result<DiskUsage, SampleError> {
            Ok(DiskUsage::from_space(PathBuf::from("/"), 100, 75))
        }
    }

    fn make_app(config: &Config) -> App {
        App::new(config, Box::new(Steady { step: 0 }))
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn first_tick_only_primes() {
        let mut app = make_app(&Config::default());
        assert!(app.is_collecting_baseline());

        let start = Instant::now();
        app.on_tick(start);
        assert!(app.report.is_none());
        assert!(!app.is_collecting_baseline());

        app.on_tick(start + Duration::from_secs(1));
        let report = app.report.as_ref().unwrap();
        assert!((report.cpu_percent.unwrap() - 30.0).abs() < 1e-9);
        assert_eq!(report.network.unwrap().download_kbs, 1.0);
    }

    #[test]
    fn default_quit_key_stops() {
        let mut app = make_app(&Config::default());
        app.handle_key(press(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(app.running);
        app.handle_key(press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_always_stops() {
        let mut config = Config::default();
        config.keybinds.quit = "x".to_string();
        let mut app = make_app(&config);
        app.handle_key(press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.running);
        app.handle_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = make_app(&Config::default());
        let mut key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(app.running);
    }

    #[test]
    fn quit_label_follows_keybind() {
        let mut config = Config::default();
        assert_eq!(make_app(&config).quit_label(), "q");
        config.keybinds.quit = "Esc".to_string();
        assert_eq!(make_app(&config).quit_label(), "Esc");
    }

    #[test]
    fn refresh_interval_comes_from_config() {
        let mut config = Config::default();
        config.general.refresh_rate_ms = 250;
        let app = make_app(&config);
        assert_eq!(app.refresh_interval, Duration::from_millis(250));
    }
}
