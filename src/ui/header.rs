use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::format_timestamp;
use crate::system::snapshot::Report;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    report: Option<&Report>,
    refresh_interval: Duration,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stamp = match report {
        Some(report) => format_timestamp(&report.taken_at),
        None => "collecting baseline\u{2026}".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            " sysmon ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(stamp, Style::default().fg(theme.text_primary)),
        Span::raw("  "),
        Span::styled(
            format!("every {:.1}s", refresh_interval.as_secs_f64()),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), inner);
}
