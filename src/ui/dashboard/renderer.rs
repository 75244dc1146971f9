//! Dashboard main renderer

use super::components::{chart, footer, header, leads, logs};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(35),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    leads::render_leads_panel(f, content_chunks[0], state);
    chart::render_chart_panel(f, content_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::ReloadPhase;
    use crate::models::{Account, ChartDataPoint};
    use crate::ui::UIConfig;
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn screen_text(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state() -> DashboardState {
        DashboardState::new("Sales Dashboard", "demo data", Instant::now(), UIConfig::new(true))
    }

    #[test]
    fn test_renders_loaded_dashboard() {
        let mut state = state();
        state.snapshot.leads = vec![Account::lead("2", "A Co"), Account::lead("1", "B Co")];
        state.snapshot.chart_points = vec![
            ChartDataPoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "1 Jan", 50.0),
            ChartDataPoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "2 Jan", 100.0),
        ];
        state.snapshot.sales_average = "$75.00".to_string();
        state.snapshot.is_model_loaded = true;

        let text = screen_text(&state);
        assert!(text.contains("LEADS (2)"));
        assert!(text.contains("A Co"));
        assert!(text.contains("AVERAGE $75.00"));
        assert!(text.contains("2 Jan"));
        assert!(text.contains("READY"));
    }

    #[test]
    fn test_renders_busy_gauge() {
        let mut state = state();
        state.snapshot.phase = Some(ReloadPhase::LoadingLeads);
        let text = screen_text(&state);
        assert!(text.contains("BUSY - Refreshing leads"));
        assert!(text.contains("No leads loaded"));
        assert!(text.contains("No sales yet"));
    }
}
