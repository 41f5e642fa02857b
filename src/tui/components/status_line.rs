//! Status line component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, ComposerKind, InputMode};
use crate::tui::theme::*;

/// Render the bottom status line: search input, composer state, pending
/// chord prefix, or the last status message.
pub fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.input_mode == InputMode::Search {
        Line::from(vec![
            Span::styled(" search: ", Style::new().fg(ACCENT_GOLD)),
            Span::styled(app.search_draft().to_string(), Style::new().fg(TEXT_WHITE)),
            Span::styled("▌", Style::new().fg(TEXT_WHITE)),
        ])
    } else if let Some(composer) = &app.composer {
        let label = match composer.kind {
            ComposerKind::NewTopic => "new topic".to_string(),
            ComposerKind::ReplyToTopic => "reply to topic".to_string(),
            ComposerKind::ReplyToPost(n) => format!("reply to post #{}", n),
            ComposerKind::EditPost(n) => format!("edit post #{}", n),
        };
        let mut spans = vec![Span::styled(
            format!(" composing: {}", label),
            Style::new().fg(ACCENT_MINT),
        )];
        if let Some(quoted) = &composer.quoted {
            spans.push(Span::styled(
                format!("  > {}", quoted),
                Style::new().fg(TEXT_DIM),
            ));
        }
        spans.push(Span::styled("  (esc to close)", Style::new().fg(TEXT_DIM)));
        Line::from(spans)
    } else if !app.pending_chord().is_empty() {
        let pending: Vec<String> = app
            .pending_chord()
            .iter()
            .map(|press| press.to_string())
            .collect();
        Line::from(vec![
            Span::styled(format!(" {} …", pending.join(" ")), Style::new().fg(ACCENT_GOLD)),
        ])
    } else {
        Line::from(vec![
            Span::styled(format!(" {}", app.status), Style::new().fg(TEXT_DIM)),
            Span::styled("  ? help", Style::new().fg(SECTION_DIM)),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}
