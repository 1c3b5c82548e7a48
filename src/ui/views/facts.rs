use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn draw_fact_list(
  frame: &mut Frame,
  area: Rect,
  facts: &[String],
  selected: usize,
  category: Option<&str>,
  fetching: bool,
) {
  let filter = category.unwrap_or("all");
  let title = if fetching {
    format!(" Facts [{}] (fetching...) ", filter)
  } else {
    format!(" Facts [{}] ({}) ", filter, facts.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  if facts.is_empty() && !fetching {
    let paragraph = Paragraph::new("No facts yet. Press Space to fetch one.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let max_width = area.width.saturating_sub(6) as usize;
  let items: Vec<ListItem> = facts
    .iter()
    .enumerate()
    .map(|(i, fact)| {
      let line = Line::from(vec![
        Span::styled(format!("{:>4} ", i + 1), Style::default().fg(Color::Cyan)),
        Span::raw(truncate(fact, max_width)),
      ]);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  let mut state = ListState::default();
  state.select(Some(selected));

  frame.render_stateful_widget(list, area, &mut state);
}

fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("short", 10), "short");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("a very long fact", 10), "a very ...");
  }
}
