use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

/// Label for the implicit no-filter entry at the top of the picker
const ALL_CATEGORIES: &str = "(all)";

/// Events emitted by the category picker that the parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPickerEvent {
  /// Category chosen (None means no filter)
  Selected(Option<String>),
  /// Picker cancelled
  Cancelled,
}

/// Overlay for choosing the category filter applied to fact fetches
#[derive(Debug, Clone, Default)]
pub struct CategoryPicker {
  active: bool,
  categories: Vec<String>,
  selected: usize,
}

impl CategoryPicker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Check if picker is currently active
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Show the picker with the given category tags
  pub fn show(&mut self, categories: Vec<String>) {
    self.active = true;
    self.categories = categories;
    self.selected = 0;
  }

  /// Hide the picker
  pub fn hide(&mut self) {
    self.active = false;
    self.categories.clear();
    self.selected = 0;
  }

  /// Number of entries including the no-filter default
  fn len(&self) -> usize {
    self.categories.len() + 1
  }

  /// Handle a key event
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<CategoryPickerEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => {
        self.hide();
        KeyResult::Event(CategoryPickerEvent::Cancelled)
      }
      KeyCode::Enter => {
        // Index 0 is the no-filter entry
        let choice = if self.selected == 0 {
          None
        } else {
          self.categories.get(self.selected - 1).cloned()
        };
        self.hide();
        KeyResult::Event(CategoryPickerEvent::Selected(choice))
      }
      KeyCode::Char('j') | KeyCode::Down => {
        self.selected = (self.selected + 1) % self.len();
        KeyResult::Handled
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.selected = if self.selected == 0 {
          self.len() - 1
        } else {
          self.selected - 1
        };
        KeyResult::Handled
      }
      _ => KeyResult::Handled,
    }
  }

  /// Render the picker overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    // Calculate overlay dimensions
    let max_name_len = self
      .categories
      .iter()
      .map(|c| c.len())
      .max()
      .unwrap_or(10)
      .max(ALL_CATEGORIES.len());
    let width = (max_name_len as u16 + 6).min(area.width - 4).max(20);
    let height = (self.len() as u16 + 2).min(area.height - 4).max(3);

    // Center the overlay
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    let overlay_area = Rect::new(x, y, width, height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    // Draw the border/block
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Category ");

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    // Draw category list with the no-filter default on top
    let items: Vec<ListItem> = std::iter::once(ALL_CATEGORIES)
      .chain(self.categories.iter().map(String::as_str))
      .map(|name| {
        let line = Line::from(vec![Span::styled(
          name.to_string(),
          Style::default().fg(Color::Cyan),
        )]);
        ListItem::new(line)
      })
      .collect();

    let list =
      List::new(items).highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default();
    state.select(Some(self.selected));

    frame.render_stateful_widget(list, inner, &mut state);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_inactive_picker_ignores_keys() {
    let mut picker = CategoryPicker::new();
    assert_eq!(picker.handle_key(key(KeyCode::Enter)), KeyResult::NotHandled);
  }

  #[test]
  fn test_default_entry_selects_no_filter() {
    let mut picker = CategoryPicker::new();
    picker.show(vec!["dev".to_string(), "movie".to_string()]);

    let result = picker.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CategoryPickerEvent::Selected(None))
    );
    assert!(!picker.is_active());
  }

  #[test]
  fn test_selects_exact_tag() {
    let mut picker = CategoryPicker::new();
    picker.show(vec!["dev".to_string(), "movie".to_string()]);

    picker.handle_key(key(KeyCode::Down));
    picker.handle_key(key(KeyCode::Down));
    let result = picker.handle_key(key(KeyCode::Enter));

    assert_eq!(
      result,
      KeyResult::Event(CategoryPickerEvent::Selected(Some("movie".to_string())))
    );
  }

  #[test]
  fn test_escape_cancels() {
    let mut picker = CategoryPicker::new();
    picker.show(vec!["dev".to_string()]);

    let result = picker.handle_key(key(KeyCode::Esc));
    assert_eq!(result, KeyResult::Event(CategoryPickerEvent::Cancelled));
    assert!(!picker.is_active());
  }

  #[test]
  fn test_selection_wraps() {
    let mut picker = CategoryPicker::new();
    picker.show(vec!["dev".to_string()]);

    // Two entries total: (all) and dev
    picker.handle_key(key(KeyCode::Char('k')));
    let result = picker.handle_key(key(KeyCode::Enter));

    assert_eq!(
      result,
      KeyResult::Event(CategoryPickerEvent::Selected(Some("dev".to_string())))
    );
  }
}
