pub mod header;
pub mod panels;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let report = app.report.as_ref();

    header::render(frame, chunks[0], report, app.refresh_interval, &app.theme);
    panels::render_cpu(frame, chunks[1], report.and_then(|r| r.cpu_percent), &app.theme);
    panels::render_memory(
        frame,
        chunks[2],
        report.and_then(|r| r.memory.as_ref()),
        &app.theme,
    );
    panels::render_disk(frame, chunks[3], report.and_then(|r| r.disk.as_ref()), &app.theme);
    panels::render_network(frame, chunks[4], report.and_then(|r| r.network), &app.theme);
    statusbar::render(
        frame,
        chunks[6],
        &app.quit_label(),
        app.is_collecting_baseline(),
        &app.theme,
    );
}
