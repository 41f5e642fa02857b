//! Help popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::events::Binding;
use crate::tui::theme::*;

/// Render the help popup listing the active keymap.
///
/// Built from the resolved keymap rather than the static tables, so
/// config overrides show the chords actually in effect.
pub fn render_help_popup(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate centered popup area
    let popup_width = 52u16;
    let popup_height = (app.keymap.entries().len() as u16 + 10).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(
        x,
        y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![];

    lines.push(Line::from(vec![Span::styled(
        "Keyboard Shortcuts",
        Style::new().fg(TEXT_WHITE).bold(),
    )]));
    lines.push(Line::raw(""));

    let sections: [(&str, Color, fn(&Binding) -> bool); 3] = [
        ("Navigation", SECTION_ACTIVE, |b| matches!(b, Binding::Route(_))),
        ("Actions", ACCENT_MINT, |b| matches!(b, Binding::Click(_))),
        ("Other", ACCENT_GOLD, |b| matches!(b, Binding::Handler(_))),
    ];

    for (title, color, belongs) in sections {
        lines.push(Line::styled(title, Style::new().fg(color).bold()));
        for (chord, binding) in app.keymap.entries() {
            if !belongs(binding) {
                continue;
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<9}", chord.to_string()), Style::new().fg(TEXT_WHITE)),
                Span::styled(binding.describe(), Style::new().fg(TEXT_DIM)),
            ]));
        }
        lines.push(Line::raw(""));
    }

    // Footer
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::new().fg(TEXT_DIM)),
        Span::styled("?", Style::new().fg(TEXT_WHITE)),
        Span::styled(" or ", Style::new().fg(TEXT_DIM)),
        Span::styled("Esc", Style::new().fg(TEXT_WHITE)),
        Span::styled(" to close", Style::new().fg(TEXT_DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(SECTION_ACTIVE))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}
