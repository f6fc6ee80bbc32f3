use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{NO_DATA, format_gb, format_rate, truncate_unicode};
use crate::sampler::NetRates;
use crate::system::snapshot::{DiskUsage, MemoryUsage};
use crate::ui::theme::Theme;

fn panel_block(title: String, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_no_data(frame: &mut Frame, area: Rect, block: Block<'static>, theme: &Theme) {
    let text = Paragraph::new(Line::from(Span::styled(
        NO_DATA,
        Style::default().fg(theme.no_data),
    )))
    .block(block);
    frame.render_widget(text, area);
}

fn render_usage_gauge(
    frame: &mut Frame,
    area: Rect,
    block: Block<'static>,
    percent: f64,
    label: String,
    theme: &Theme,
) {
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.heat_color(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

pub fn render_cpu(frame: &mut Frame, area: Rect, cpu_percent: Option<f64>, theme: &Theme) {
    let block = panel_block("CPU".to_string(), theme);
    match cpu_percent {
        Some(percent) => {
            render_usage_gauge(frame, area, block, percent, format!("{percent:.2}%"), theme)
        }
        None => render_no_data(frame, area, block, theme),
    }
}

pub fn render_memory(frame: &mut Frame, area: Rect, memory: Option<&MemoryUsage>, theme: &Theme) {
    let block = panel_block("Memory".to_string(), theme);
    match memory {
        Some(mem) => {
            let label = format!(
                "{} / {} ({:.2}%)",
                format_gb(mem.used_bytes),
                format_gb(mem.total_bytes),
                mem.percent_used()
            );
            render_usage_gauge(frame, area, block, mem.percent_used(), label, theme);
        }
        None => render_no_data(frame, area, block, theme),
    }
}

pub fn render_disk(frame: &mut Frame, area: Rect, disk: Option<&DiskUsage>, theme: &Theme) {
    match disk {
        Some(disk) => {
            // Leave room for the "Disk " prefix and the border corners.
            let max_path = (area.width as usize).saturating_sub(10);
            let path = truncate_unicode(&disk.path.display().to_string(), max_path);
            let block = panel_block(format!("Disk {path}"), theme);
            let label = format!(
                "{} / {} ({:.2}%)",
                format_gb(disk.used_bytes),
                format_gb(disk.total_bytes),
                disk.percent_used()
            );
            render_usage_gauge(frame, area, block, disk.percent_used(), label, theme);
        }
        None => render_no_data(frame, area, panel_block("Disk".to_string(), theme), theme),
    }
}

pub fn render_network(frame: &mut Frame, area: Rect, rates: Option<NetRates>, theme: &Theme) {
    let block = panel_block("Network".to_string(), theme);
    let Some(rates) = rates else {
        render_no_data(frame, area, block, theme);
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("\u{2193} Download ", Style::default().fg(theme.download)),
            Span::styled(
                format_rate(rates.download_kbs),
                Style::default().fg(theme.text_primary),
            ),
        ]),
        Line::from(vec![
            Span::styled("\u{2191} Upload   ", Style::default().fg(theme.upload)),
            Span::styled(
                format_rate(rates.upload_kbs),
                Style::default().fg(theme.text_primary),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
