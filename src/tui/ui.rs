use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::components::*;
use crate::app::{App, InputMode, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main vertical layout: section bar, content, status line
    let main_layout = Layout::vertical([
        Constraint::Length(1), // Section bar
        Constraint::Min(0),    // Content
        Constraint::Length(1), // Status line
    ])
    .split(area);

    render_section_bar(frame, main_layout[0], app);

    match &app.screen {
        Screen::Topics(list) => render_topic_list(frame, main_layout[1], app, list),
        Screen::Posts(stream) => render_post_stream(frame, main_layout[1], app, stream),
        Screen::Categories => render_categories(frame, main_layout[1], app),
    }

    render_status_line(frame, main_layout[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, area, app);
    }
}
