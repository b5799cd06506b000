use super::state::AppState;
use crate::demo::dom::Element;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    draw_document(f, state, chunks[1]);
    draw_logs(f, state, chunks[2]);
    draw_footer(f, chunks[3]);
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let banner = match &state.banner {
        Some(msg) => Span::styled(
            msg.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("waiting...", Style::default().fg(Color::DarkGray)),
    };
    let line = Line::from(vec![
        Span::styled(" packlab demo ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("| up "),
        Span::raw(state.uptime()),
        Span::raw(" | banner: "),
        banner,
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_document(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    render_element(&state.document.body, 0, &mut lines);
    let doc = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" document "));
    f.render_widget(doc, area);
}

/// One line per element, indented by depth, in document order.
fn render_element(el: &Element, depth: usize, out: &mut Vec<Line<'static>>) {
    let mut label = format!("{}<{}", "  ".repeat(depth), el.tag);
    if let Some(id) = &el.id {
        label.push_str(&format!(" id=\"{}\"", id));
    }
    if !el.classes.is_empty() {
        label.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
    }
    label.push('>');

    let style = if el.has_class("code") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(label, style)];
    if !el.text.is_empty() {
        // Keep the tree one line per node; element text is flattened.
        let flat = el.text.replace('\n', " ⏎ ");
        spans.push(Span::styled(
            format!(" {}", flat),
            Style::default().fg(Color::Cyan),
        ));
    }
    out.push(Line::from(spans));

    for child in &el.children {
        render_element(child, depth + 1, out);
    }
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let level_style = match entry.level.as_str() {
                "ASYNC" => Style::default().fg(Color::Green),
                "DOM" => Style::default().fg(Color::Yellow),
                _ => Style::default().fg(Color::Gray),
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("[{}] ", entry.level), level_style),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();
    let logs = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" console "));
    f.render_widget(logs, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q quit ",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(footer, area);
}
