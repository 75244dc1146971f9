//! Dashboard leads panel component

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Padding};

/// Render the lead list in company order.
pub fn render_leads_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let leads = &state.snapshot.leads;
    let items: Vec<ListItem> = leads
        .iter()
        .map(|lead| {
            let mut spans = vec![Span::styled(
                lead.company.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            let contact = lead.display_name();
            if contact != lead.company {
                spans.push(Span::styled(
                    format!("  {}", contact),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .title(format!("LEADS ({})", leads.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let list = if items.is_empty() {
        List::new(vec![ListItem::new("No leads loaded")])
    } else {
        List::new(items)
    };
    f.render_widget(list.block(block), area);
}
