//! Dashboard footer component
//!
//! Renders key bindings, greyed out while their command is unavailable

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn key_hint(text: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(text, style)
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let separator = || Span::styled(" | ", Style::default().fg(Color::DarkGray));
    let line = Line::from(vec![
        key_hint("[R] Reload", state.snapshot.can_load_dashboard),
        separator(),
        key_hint("[L] Refresh leads", state.snapshot.can_load_leads),
        separator(),
        key_hint("[N] New lead", true),
        separator(),
        key_hint("[Q] Quit", true),
    ]);

    let footer = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Thick),
    );
    f.render_widget(footer, area);
}
