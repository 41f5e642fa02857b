//! Section bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::content::Route;
use crate::tui::theme::*;

/// Render the section tabs along the top.
pub fn render_section_bar(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.screen.route();

    let mut spans = vec![Span::styled("agora ", Style::new().fg(ACCENT_CORAL).bold())];
    for route in Route::ALL {
        let style = if active == Some(route) {
            Style::new().fg(SECTION_ACTIVE).bold()
        } else {
            Style::new().fg(SECTION_DIM)
        };
        spans.push(Span::styled(format!(" {} ", route.label()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
