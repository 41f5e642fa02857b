//! Topic list component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, TopicListState};
use crate::content::NotifyLevel;
use crate::tui::theme::*;

/// Render one row per visible topic, scrolled by the list offset.
pub fn render_topic_list(frame: &mut Frame, area: Rect, app: &App, list: &TopicListState) {
    let mut lines: Vec<Line> = vec![];

    for (row, &topic_index) in app.visible_topics(list.route).iter().enumerate() {
        let topic = &app.forum.topics[topic_index];
        let is_selected = list.selected == Some(row);
        let cursor = if is_selected { "> " } else { "  " };

        let mut spans = vec![
            Span::raw(cursor),
            Span::styled(
                topic.title.clone(),
                if is_selected {
                    Style::new().fg(TEXT_WHITE).bold()
                } else {
                    Style::new().fg(TEXT_WHITE)
                },
            ),
            Span::styled(format!("  #{}", topic.category), Style::new().fg(TEXT_DIM)),
        ];

        if topic.is_new {
            spans.push(Span::styled(" new", Style::new().fg(ACCENT_MINT)));
        }
        if topic.unread {
            spans.push(Span::styled(" unread", Style::new().fg(ACCENT_GOLD)));
        }
        if topic.starred {
            spans.push(Span::styled(" ★", Style::new().fg(ACCENT_GOLD)));
        }
        if topic.notify == NotifyLevel::Muted {
            spans.push(Span::styled(" muted", Style::new().fg(TEXT_DIM)));
        }
        spans.push(Span::styled(
            format!("  {} posts", topic.posts.iter().filter(|p| !p.deleted).count()),
            Style::new().fg(TEXT_DIM),
        ));

        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::styled("  no topics here", Style::new().fg(TEXT_DIM)));
    }

    let scroll = list.scroll.max(0) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}
