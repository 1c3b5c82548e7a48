pub mod components;
mod header;
mod views;

use crate::app::{App, Mode};
use components::draw_command_overlay;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  header::draw_header(frame, chunks[0], app.api_url(), app.category());

  views::facts::draw_fact_list(
    frame,
    chunks[1],
    app.facts(),
    app.selected(),
    app.category(),
    app.is_fetching(),
  );

  // Draw status bar
  draw_status_bar(frame, chunks[2], app);

  // Overlays go on top of everything else
  if *app.mode() == Mode::Command {
    let suggestions = app.autocomplete_suggestions();
    draw_command_overlay(
      frame,
      chunks[1],
      app.command_input(),
      &suggestions,
      app.selected_suggestion(),
    );
  }
  app.picker().render_overlay(frame, chunks[1]);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let (content, style) = if let Some(status) = app.status() {
    let color = if status.is_error {
      Color::Red
    } else {
      Color::Green
    };
    (format!(" {}", status.text), Style::default().fg(color))
  } else {
    match app.mode() {
      Mode::Normal => {
        let hint = " Space:fetch  c:category  x:clear  :command  j/k:nav  q:quit";
        (hint.to_string(), Style::default().fg(Color::DarkGray))
      }
      Mode::Command => {
        let cmd = format!(":{}", app.command_input());
        (cmd, Style::default().fg(Color::Yellow))
      }
    }
  };

  let paragraph = Paragraph::new(content).style(style);
  frame.render_widget(paragraph, area);
}
