//! Categories overview component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::tui::theme::*;

pub fn render_categories(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = vec![Line::raw("")];

    for (name, count) in app.forum.categories() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("#{}", name), Style::new().fg(SECTION_ACTIVE).bold()),
            Span::styled(
                format!("  {} topic{}", count, if count == 1 { "" } else { "s" }),
                Style::new().fg(TEXT_DIM),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
