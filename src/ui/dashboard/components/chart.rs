//! Dashboard sales chart component
//!
//! Renders one bar per chart point with the sales average in the title

use super::super::state::DashboardState;
use super::super::utils::format_compact_amount;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph};

const BAR_WIDTH: u16 = 7;

pub fn render_chart_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let snapshot = &state.snapshot;
    let block = Block::default()
        .title(format!("SALES BY DAY | AVERAGE {}", snapshot.sales_average))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if snapshot.chart_points.is_empty() {
        f.render_widget(Paragraph::new("No sales yet").block(block), area);
        return;
    }

    // Most recent points that fit; each bar takes its width plus a gap.
    let capacity = (area.width.saturating_sub(2) / (BAR_WIDTH + 1)).max(1) as usize;
    let skip = snapshot.chart_points.len().saturating_sub(capacity);
    let bars: Vec<Bar> = snapshot
        .chart_points
        .iter()
        .skip(skip)
        .map(|point| {
            Bar::default()
                .value(point.value.max(0.0).round() as u64)
                .text_value(format_compact_amount(point.value))
                .label(Line::from(point.label.clone()))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightGreen))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(chart, area);
}
