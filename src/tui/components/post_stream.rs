//! Post stream component.
//!
//! Renders exactly the row geometry the selection navigator measures:
//! materialized posts take `post.height()` rows, cloaked posts take one
//! placeholder row. Scrolling is a plain paragraph scroll by the stream
//! offset so that the navigator's arithmetic and the screen agree.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, PostStreamState, stream_rows};
use crate::tui::theme::*;

pub fn render_post_stream(frame: &mut Frame, area: Rect, app: &App, stream: &PostStreamState) {
    let Some(topic) = app.forum.topic(stream.topic_id) else {
        frame.render_widget(
            Paragraph::new(Line::styled("  topic not found", Style::new().fg(TEXT_DIM))),
            area,
        );
        return;
    };

    let mut lines: Vec<Line> = vec![];

    for (row_index, row) in stream_rows(topic, stream.anchor).iter().enumerate() {
        let post = &topic.posts[row.post_index];
        let is_selected = stream.selected == Some(row_index);
        let cursor = if is_selected { "> " } else { "  " };

        if row.cloaked {
            lines.push(Line::from(vec![
                Span::raw(cursor),
                Span::styled(format!("· post #{} ·", post.number), Style::new().fg(TEXT_DIM)),
            ]));
            continue;
        }

        let mut header = vec![
            Span::raw(cursor),
            Span::styled(
                post.author.clone(),
                if is_selected {
                    Style::new().fg(TEXT_WHITE).bold()
                } else {
                    Style::new().fg(ACCENT_MINT)
                },
            ),
            Span::styled(format!("  #{}", post.number), Style::new().fg(TEXT_DIM)),
        ];
        if post.liked {
            header.push(Span::styled(" ♥", Style::new().fg(ACCENT_CORAL)));
        }
        if post.bookmarked {
            header.push(Span::styled(" ⚑", Style::new().fg(ACCENT_GOLD)));
        }
        if post.flagged {
            header.push(Span::styled(" flagged", Style::new().fg(ACCENT_CORAL)));
        }
        lines.push(Line::from(header));

        for body_line in &post.body {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(body_line.clone(), Style::new().fg(TEXT_WHITE)),
            ]));
        }
        lines.push(Line::raw(""));
    }

    let scroll = stream.scroll.max(0) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}
