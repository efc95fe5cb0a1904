//! UI Rendering
//!
//! Pure render functions that draw the current [`DisplayState`] onto a
//! frame. No side effects, no engine access; everything comes from the
//! latest snapshot.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use guessdex_core::RoundOutcome;

use crate::display::{DisplayState, Screen};
use crate::sprite;

/// Accent color for titles and highlights.
const ACCENT: Color = Color::Yellow;

/// Render the application.
pub fn render(frame: &mut Frame, state: &DisplayState, name_input: &str) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match state.screen() {
        Screen::Start => render_start(frame, chunks[0]),
        Screen::Game => render_game(frame, chunks[0], state),
        Screen::Result => render_result(frame, chunks[0], state, name_input),
        Screen::Leaderboard => render_leaderboard(frame, chunks[0], state),
    }

    render_status_bar(frame, chunks[1], state);
}

/// Title screen.
fn render_start(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "G U E S S D E X",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Guess the creature from its picture."),
        Line::from(""),
        Line::from(Span::styled(
            "Enter - start | l - leaderboard | Esc - quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertically_centered(area, 5));
}

/// Game screen: artwork, guess input, feedback.
fn render_game(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let snapshot = &state.snapshot;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(6),    // artwork
            Constraint::Length(3), // guess input
            Constraint::Length(1), // feedback
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Who's that creature?",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_artwork(frame, chunks[1], state);

    let input = Paragraph::new(format!("{}_", snapshot.guess)).block(
        Block::default()
            .title(" Your guess ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    frame.render_widget(input, centered_width(chunks[2], 40));

    let feedback = match snapshot.feedback {
        Some(RoundOutcome::Correct) => Line::from(Span::styled(
            "Correct! Enter - next creature",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Some(RoundOutcome::Incorrect) => Line::from(Span::styled(
            "Incorrect, try again! Enter - next creature",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "Type a name and press Enter",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(
        Paragraph::new(feedback).alignment(Alignment::Center),
        chunks[3],
    );
}

/// The creature artwork, or a placeholder while fetching / without sprite.
fn render_artwork(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let snapshot = &state.snapshot;

    let lines = if snapshot.busy {
        vec![Line::from(Span::styled(
            "Fetching a creature...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        match snapshot.creature.as_ref().and_then(|c| c.sprite.as_ref()) {
            Some(image) => sprite::sprite_lines(image, area.width, area.height),
            None => vec![Line::from(Span::styled(
                "(no artwork for this one)",
                Style::default().fg(Color::DarkGray),
            ))],
        }
    };

    let height = (lines.len() as u16).min(area.height);
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertically_centered(area, height));
}

/// Result screen: final score plus the save-name prompt.
fn render_result(frame: &mut Frame, area: Rect, state: &DisplayState, name_input: &str) {
    let snapshot = &state.snapshot;
    let final_score = snapshot.final_score.unwrap_or(snapshot.score);

    let mut lines = vec![
        Line::from(Span::styled(
            "Game over!",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "You scored {final_score} out of {} rounds.",
            snapshot.rounds
        )),
        Line::from(""),
    ];

    if snapshot.save_prompt_open {
        lines.push(Line::from(format!("Your name: {name_input}_")));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter - save score | Esc - skip",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "r - play again | l - leaderboard | Esc - quit",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let height = lines.len() as u16;
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertically_centered(area, height));
}

/// Leaderboard screen.
fn render_leaderboard(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Leaderboard",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = if state.leaderboard.is_empty() {
        vec![ListItem::new(Span::styled(
            "No scores saved yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .leaderboard
            .iter()
            .enumerate()
            .map(|(i, record)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(ACCENT)),
                    Span::raw(record.name.clone()),
                    Span::styled(
                        format!("  {} pts", record.score),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, centered_width(chunks[1], 44));
}

/// Status bar: score, rounds, busy indicator, error banner.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let snapshot = &state.snapshot;

    let (text, style) = if let Some(error) = state.error() {
        (format!(" {error}"), Style::default().fg(Color::Red))
    } else {
        let busy = if snapshot.busy { " | fetching..." } else { "" };
        (
            format!(
                " Score: {} | Rounds left: {}{busy}",
                snapshot.score, snapshot.rounds_remaining
            ),
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Center a fixed number of lines vertically inside an area.
fn vertically_centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = (area.height - height) / 2;
    Rect::new(area.x, area.y + top, area.width, height)
}

/// Shrink an area to at most `width` columns, horizontally centered.
fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let left = (area.width - width) / 2;
    Rect::new(area.x + left, area.y, width, area.height)
}
