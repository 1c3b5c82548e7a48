use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with logo, API host, and active filter
pub fn draw_header(frame: &mut Frame, area: Rect, api_url: &str, category: Option<&str>) {
  // Extract domain from URL
  let domain = extract_domain(api_url);

  // Build header content
  let header = Line::from(vec![
    Span::styled(" c9s ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", domain), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", category.unwrap_or("all")),
      Style::default().fg(Color::Yellow).bold(),
    ),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Extract domain from API URL
fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_domain() {
    assert_eq!(
      extract_domain("https://api.chucknorris.io"),
      "api.chucknorris.io"
    );
    assert_eq!(
      extract_domain("https://api.chucknorris.io/jokes"),
      "api.chucknorris.io"
    );
    assert_eq!(extract_domain("http://localhost:8080"), "localhost:8080");
  }
}
