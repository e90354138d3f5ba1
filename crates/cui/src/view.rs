use crate::app::{App, FocusPane, TICKET_COLUMNS};
use rafflebox_core::{RenderView, TicketView};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

const TICKET_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, app: &App) {
    let view = app.view();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(9),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app, &view);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(root[1]);
    draw_options(frame, middle[0], app, &view);
    draw_tickets(frame, middle[1], app, &view);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(root[2]);
    draw_history(frame, bottom[0], app, &view);
    draw_events(frame, bottom[1], app, &view);

    if app.show_help {
        draw_help_popup(frame, &view);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, view: &RenderView) {
    let language_name = view
        .languages
        .iter()
        .find(|option| option.code == view.language)
        .map(|option| option.name.as_str())
        .unwrap_or(view.language.as_str());
    let summary = format!(
        "{}: {}  {}: {}  {}: {}",
        view.labels.total,
        view.total,
        view.labels.picked,
        view.picked,
        view.labels.language,
        language_name
    );
    let mut lines = vec![
        Line::from(format!("{}: {}", view.labels.result, view.result).bold()),
        Line::from(summary),
    ];
    if !app.status_line.is_empty() {
        lines.push(Line::from(app.status_line.clone().red()));
    }
    let block = Block::default().borders(Borders::ALL).title(view.labels.title.clone());
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_options(frame: &mut Frame, area: Rect, app: &App, view: &RenderView) {
    let focused = app.focus == FocusPane::Options;
    let lines: Vec<Line<'_>> = if app.options_input.is_empty() {
        vec![Line::from(view.labels.options_placeholder.clone().dark_gray())]
    } else {
        let mut lines: Vec<Line<'_>> = app
            .options_input
            .split('\n')
            .map(|line| Line::from(line.to_string()))
            .collect();
        if focused {
            if let Some(last) = lines.last_mut() {
                last.push_span("_".slow_blink());
            }
        }
        lines
    };
    let title = format!("{} [Ctrl+G {}]", view.labels.options_label, view.labels.generate);
    let block = pane_block(title, focused);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tickets(frame: &mut Frame, area: Rect, app: &App, view: &RenderView) {
    let focused = app.focus == FocusPane::Tickets;
    let title = format!(
        "{} {}/{} [d {}]",
        app.focus_label(FocusPane::Tickets),
        view.picked,
        view.total,
        view.labels.draw
    );
    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if view.tickets.is_empty() {
        return;
    }

    let visible_rows = usize::from((inner.height / TICKET_HEIGHT).max(1));
    let cursor_row = app.ticket_cursor / TICKET_COLUMNS;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);
    let rows: Vec<&[TicketView]> = view
        .tickets
        .chunks(TICKET_COLUMNS)
        .skip(first_row)
        .take(visible_rows)
        .collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(TICKET_HEIGHT); rows.len()])
        .split(inner);
    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, TICKET_COLUMNS as u32);
                TICKET_COLUMNS
            ])
            .split(*row_area);
        for (ticket, cell) in row.iter().zip(cells.iter()) {
            let selected = focused && ticket.index == app.ticket_cursor;
            draw_ticket(frame, *cell, ticket, selected);
        }
    }
}

fn draw_ticket(frame: &mut Frame, area: Rect, ticket: &TicketView, selected: bool) {
    let mut border = Style::default();
    let mut text = Style::default();
    if ticket.revealed {
        border = border.fg(Color::Green);
        text = text.fg(Color::Green).add_modifier(Modifier::BOLD);
    }
    if selected {
        border = border.fg(Color::Yellow);
    }
    let mut block = Block::default().borders(Borders::ALL).border_style(border);
    if ticket.revealed {
        block = block.title(ticket.mark.clone());
    }
    let paragraph = Paragraph::new(Line::styled(ticket.text.clone(), text))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App, view: &RenderView) {
    let items: Vec<ListItem<'_>> = view
        .history
        .iter()
        .enumerate()
        .map(|(pos, label)| ListItem::new(format!("{:>3}. {label}", view.history.len() - pos)))
        .collect();
    let block = pane_block(view.labels.history.clone(), app.focus == FocusPane::History);
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App, view: &RenderView) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view.labels.log.clone());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, view: &RenderView) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let labels = &view.labels;
    let lines = vec![
        Line::from(format!("Tab / Shift+Tab  {}", labels.options_label)),
        Line::from(format!("Ctrl+G / g  {}", labels.generate)),
        Line::from(format!("Enter / Space  {}", labels.picked)),
        Line::from(format!("d  {}", labels.draw)),
        Line::from(format!("r  {}", labels.reset)),
        Line::from(format!("l  {}", labels.language)),
        Line::from(format!("e  {}", labels.options_label)),
        Line::from(format!("q  {}", labels.quit)),
    ];
    let block = Block::default()
        .title(labels.help.clone())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pane_block<'a>(title: String, focused: bool) -> Block<'a> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
