//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListDirection, ListItem, Paragraph, StatefulWidget},
    Frame,
};
use std::time::Duration;
use typeahead_core::CandidateSource;

use super::app::App;

/// Render the entire UI
pub fn render<S: CandidateSource>(frame: &mut Frame, app: &mut App<S>) {
    let lift = app.presentation.input_lift(frame.area().height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),       // Results, growing upward from the input
            Constraint::Length(1),    // Results count + query time
            Constraint::Length(1),    // Key hints
            Constraint::Length(1),    // Toast line
            Constraint::Length(1),    // Search input
            Constraint::Length(lift), // Keyboard margin
        ])
        .split(frame.area());

    render_results(frame, app, chunks[0]);
    render_results_count(frame, app, chunks[1]);
    render_status_bar(frame, chunks[2]);
    render_toast_line(frame, app, chunks[3]);
    render_search_input(frame, app, chunks[4]);
}

/// Render the search input (minimal, thick bar on left)
fn render_search_input<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let (before, after) = app.search_input.text.split_at(app.search_input.cursor);
    let mut after_chars = after.chars();
    let cursor_char = after_chars.next();
    let after_cursor = after_chars.as_str();

    let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::Yellow))];

    if !before.is_empty() {
        spans.push(Span::styled(before, text_style));
    }

    // Block cursor over the next character, or a bar at the end
    match cursor_char {
        Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
        None => spans.push(Span::styled("█", Style::default().fg(Color::White))),
    }

    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor, text_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render candidates bottom-up: the top candidate sits directly above the input,
/// the alphabetical remainder stacks above it
fn render_results<S: CandidateSource>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let selection_bg = Color::Rgb(38, 38, 38);
    let selected_index = app.list_state.selected();
    let display = app.pipeline.display();

    let items: Vec<ListItem> = display
        .nearest_first()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = selected_index == Some(i);
            let base_style = if is_selected {
                Style::default().bg(selection_bg)
            } else {
                Style::default()
            };

            let prefix = if is_selected {
                Span::styled("▌", base_style.fg(Color::LightRed))
            } else {
                Span::styled(" ", base_style)
            };
            let name_style = if entry.is_top {
                base_style.fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                base_style.fg(Color::White).add_modifier(Modifier::BOLD)
            };

            let mut spans = vec![
                prefix,
                Span::styled(" ", base_style),
                Span::styled(entry.candidate.name.clone(), name_style),
            ];
            if let Some(annotation) = entry.candidate.annotation() {
                spans.push(Span::styled(
                    format!("  {}", annotation),
                    base_style.fg(Color::DarkGray),
                ));
            }

            let item = ListItem::new(Line::from(spans));
            if is_selected {
                item.style(base_style)
            } else {
                item
            }
        })
        .collect();

    let total = items.len();
    let list = List::new(items).direction(ListDirection::BottomToTop);

    // Reserve 1 column on the right for scrollbar
    let list_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    let scrollbar_area = Rect {
        x: area.x + area.width.saturating_sub(1),
        width: 1,
        ..area
    };

    StatefulWidget::render(list, list_area, frame.buffer_mut(), &mut app.list_state);

    let visible = scrollbar_area.height as usize;
    let max_offset = total.saturating_sub(visible);
    if max_offset > 0 && visible > 0 {
        let offset = app.list_state.offset().min(max_offset);
        let track = visible;
        let thumb_len = (visible * track / total).clamp(1, track);
        let max_start = track - thumb_len;
        // Offset 0 shows the bottom of the list, so the thumb starts at the bottom
        let start = ((max_offset - offset) * max_start + max_offset / 2) / max_offset;

        let buf = frame.buffer_mut();
        for i in 0..track {
            let in_thumb = i >= start && i < start + thumb_len;
            buf[(scrollbar_area.x, scrollbar_area.y + i as u16)]
                .set_symbol(if in_thumb { "┃" } else { "│" })
                .set_style(Style::default().fg(if in_thumb {
                    Color::Magenta
                } else {
                    Color::DarkGray
                }));
        }
    }
}

fn render_results_count<S: CandidateSource>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let dim_yellow = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::DIM);

    let count = app.pipeline.display().len();
    let mut spans = vec![Span::styled(
        format!(
            "  {} result{}",
            count,
            if count == 1 { "" } else { "s" }
        ),
        dim,
    )];

    if let Some(duration) = app.pipeline.last_duration() {
        spans.push(Span::styled(
            format!(" ({})", format_duration(duration)),
            dim_yellow,
        ));
    }

    let pending = app.pipeline.in_flight();
    if pending > 0 {
        spans.push(Span::styled(format!("  {} pending", pending), dim_yellow));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let bracket = Style::default().fg(Color::DarkGray);

    let hints = ["↑↓ select", "Enter copy", "Esc quit"];
    let mut spans = vec![Span::raw(" ")];
    for hint in hints {
        spans.extend([
            Span::styled(" [", bracket),
            Span::styled(hint, dim),
            Span::styled("]", bracket),
        ]);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toast_line<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };

    let bracket = Style::default().fg(Color::DarkGray);
    let toast_style = if toast.is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)
    };

    let spans = vec![
        Span::styled("  [", bracket),
        Span::styled(toast.message.as_str(), toast_style),
        Span::styled("]", bracket),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
