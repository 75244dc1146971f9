//! Dashboard header component
//!
//! Renders the title and reload gauge

use super::super::state::DashboardState;
use crate::dashboard::ReloadPhase;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and reload progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let uptime = state.start_time.elapsed().as_secs();
    let title_text = format!(
        "{} v{} | {} | up {}m {:02}s",
        state.title.to_uppercase(),
        version,
        state.source,
        uptime / 60,
        uptime % 60
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let snapshot = &state.snapshot;
    let (progress_text, gauge_color, progress_percent) = match snapshot.phase {
        Some(phase) => {
            // Animated gauge, loops every 20 ticks
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            let text = match phase {
                ReloadPhase::LoadingLeads => "BUSY - Refreshing leads",
                _ => "BUSY - Loading dashboard",
            };
            (text.to_string(), Color::LightYellow, progress)
        }
        None if snapshot.is_model_loaded => (
            format!("READY - {} orders loaded", snapshot.order_count),
            Color::LightGreen,
            100,
        ),
        None => ("IDLE - Press [R] to load".to_string(), Color::LightBlue, 0),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
