use crate::api::client::FactsClient;
use crate::commands::{self, Command};
use crate::config::Config;
use crate::event::{ApiEvent, Event, EventHandler};
use crate::history::HistoryStore;
use crate::ui;
use crate::ui::components::{CategoryPicker, CategoryPickerEvent, KeyResult};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Command,
}

/// One-line feedback shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusLine {
  pub text: String,
  pub is_error: bool,
}

impl StatusLine {
  fn info(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_error: false,
    }
  }

  fn error(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_error: true,
    }
  }
}

/// Main application state
pub struct App {
  /// Visible fact list: replayed history plus facts fetched this session
  facts: Vec<String>,

  /// Selected fact index
  selected: usize,

  /// Category tags loaded from the API
  categories: Vec<String>,

  /// Active category filter (None means unfiltered)
  category: Option<String>,

  /// Current input mode
  mode: Mode,

  /// Command input buffer (after pressing :)
  command_input: String,

  /// Selected autocomplete suggestion index
  selected_suggestion: usize,

  /// Category picker overlay
  picker: CategoryPicker,

  /// Status bar feedback
  status: Option<StatusLine>,

  /// Single in-flight fetch guard: further fetch triggers are no-ops
  /// while a fetch is pending
  fetching: bool,

  /// Application configuration
  config: Config,

  /// API client
  client: FactsClient,

  /// Persisted fact history
  history: Arc<HistoryStore>,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub async fn new(config: Config) -> Result<Self> {
    let client = FactsClient::new(&config)?;
    let history = Arc::new(HistoryStore::open(config.history_path()?));
    info!("history file: {}", history.path().display());
    let (tx, _rx) = mpsc::unbounded_channel();

    // Replay persisted history into the view before anything is fetched
    let facts = history.load();
    let selected = facts.len().saturating_sub(1);
    let category = config.default_category.clone();

    Ok(Self {
      facts,
      selected,
      categories: Vec::new(),
      category,
      mode: Mode::Normal,
      command_input: String::new(),
      selected_suggestion: 0,
      picker: CategoryPicker::new(),
      status: None,
      fetching: false,
      config,
      client,
      history,
      event_tx: tx,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));
    self.event_tx = events.sender();

    // Initial data load
    self.load_categories();

    // Main loop
    while !self.should_quit {
      // Draw UI
      terminal.draw(|frame| ui::draw(frame, self))?;

      // Handle events
      if let Some(event) = events.next().await {
        self.handle_event(event)?;
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  fn load_categories(&self) {
    let client = self.client.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match client.categories().await {
        Ok(categories) => {
          let _ = tx.send(Event::Api(ApiEvent::CategoriesLoaded(categories)));
        }
        Err(e) => {
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn fetch_fact(&mut self) {
    if self.fetching {
      // Serialize overlapping triggers instead of racing appends
      return;
    }
    self.fetching = true;
    self.status = None;

    let client = self.client.clone();
    let category = self.category.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match client.random_fact(category.as_deref()).await {
        Ok(fact) => {
          let _ = tx.send(Event::Api(ApiEvent::FactLoaded(fact)));
        }
        Err(e) => {
          let _ = tx.send(Event::Api(ApiEvent::FactFailed(e.to_string())));
        }
      }
    });
  }

  fn clear_history(&mut self) {
    match self.history.clear() {
      Ok(()) => {
        self.facts.clear();
        self.selected = 0;
        self.status = Some(StatusLine::info("History cleared"));
        info!("fact history cleared");
      }
      Err(e) => {
        error!("failed to clear history: {}", e);
        self.status = Some(StatusLine::error(e.to_string()));
      }
    }
  }

  fn open_category_picker(&mut self) {
    if self.categories.is_empty() {
      self.status = Some(StatusLine::error("No categories loaded"));
      return;
    }
    self.picker.show(self.categories.clone());
  }

  fn handle_event(&mut self, event: Event) -> Result<()> {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {} // UI refresh happens automatically
      Event::Api(api_event) => self.handle_api_event(api_event),
      Event::Error(msg) => {
        error!("{}", msg);
        self.status = Some(StatusLine::error(msg));
      }
    }
    Ok(())
  }

  fn handle_api_event(&mut self, event: ApiEvent) {
    match event {
      ApiEvent::CategoriesLoaded(categories) => {
        info!("loaded {} categories", categories.len());
        self.categories = categories;
      }
      ApiEvent::FactLoaded(fact) => {
        self.fetching = false;
        self.facts.push(fact.text.clone());
        self.selected = self.facts.len() - 1;

        if let Err(e) = self.history.append(&fact.text) {
          error!("failed to persist fact: {}", e);
          self.status = Some(StatusLine::error(format!("Fact not saved: {}", e)));
        }
      }
      ApiEvent::FactFailed(msg) => {
        // View and history stay untouched; the user just sees why
        self.fetching = false;
        error!("fact fetch failed: {}", msg);
        self.status = Some(StatusLine::error(msg));
      }
    }
  }

  fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
    // The picker owns the keyboard while it is open
    if self.picker.is_active() {
      if let KeyResult::Event(CategoryPickerEvent::Selected(category)) =
        self.picker.handle_key(key)
      {
        self.category = category;
      }
      return;
    }

    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Command => self.handle_command_mode_key(key),
    }
  }

  fn handle_normal_mode_key(&mut self, key: crossterm::event::KeyEvent) {
    match key.code {
      // Quit
      KeyCode::Char('q') => {
        self.should_quit = true;
      }
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }

      // Navigation
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),

      // Actions
      KeyCode::Char(' ') | KeyCode::Char('f') | KeyCode::Enter => self.fetch_fact(),
      KeyCode::Char('c') => self.open_category_picker(),
      KeyCode::Char('x') => self.clear_history(),

      // Mode switches
      KeyCode::Char(':') => {
        self.mode = Mode::Command;
        self.command_input.clear();
      }

      _ => {}
    }
  }

  fn handle_command_mode_key(&mut self, key: crossterm::event::KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }
      KeyCode::Enter => {
        self.execute_command();
        self.mode = Mode::Normal;
        self.selected_suggestion = 0;
      }
      KeyCode::Tab | KeyCode::Down => {
        // Navigate autocomplete suggestions
        let suggestions = commands::get_suggestions(&self.command_input);
        if !suggestions.is_empty() {
          self.selected_suggestion = (self.selected_suggestion + 1) % suggestions.len();
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        // Navigate autocomplete suggestions backwards
        let suggestions = commands::get_suggestions(&self.command_input);
        if !suggestions.is_empty() {
          self.selected_suggestion = if self.selected_suggestion == 0 {
            suggestions.len() - 1
          } else {
            self.selected_suggestion - 1
          };
        }
      }
      KeyCode::Backspace => {
        self.command_input.pop();
        self.selected_suggestion = 0; // Reset selection on input change
      }
      KeyCode::Char(c) => {
        self.command_input.push(c);
        self.selected_suggestion = 0; // Reset selection on input change
      }
      _ => {}
    }
  }

  fn execute_command(&mut self) {
    // Get the command to execute - either from selected suggestion or direct input
    let suggestions = commands::get_suggestions(&self.command_input);
    let cmd = if !suggestions.is_empty() && self.selected_suggestion < suggestions.len() {
      suggestions[self.selected_suggestion].name.to_string()
    } else {
      self.command_input.trim().to_lowercase()
    };

    match cmd.as_str() {
      "fetch" => self.fetch_fact(),
      "categories" => self.open_category_picker(),
      "clear" => self.clear_history(),
      "quit" => {
        self.should_quit = true;
      }
      _ => {
        self.status = Some(StatusLine::error(format!("Unknown command: {}", cmd)));
      }
    }
    self.command_input.clear();
  }

  fn move_selection(&mut self, delta: i32) {
    let len = self.facts.len();
    if len > 0 {
      self.selected = (self.selected as i32 + delta).rem_euclid(len as i32) as usize;
    }
  }

  // Accessors for UI rendering
  pub fn facts(&self) -> &[String] {
    &self.facts
  }

  pub fn selected(&self) -> usize {
    self.selected
  }

  pub fn category(&self) -> Option<&str> {
    self.category.as_deref()
  }

  pub fn is_fetching(&self) -> bool {
    self.fetching
  }

  pub fn mode(&self) -> &Mode {
    &self.mode
  }

  pub fn command_input(&self) -> &str {
    &self.command_input
  }

  pub fn status(&self) -> Option<&StatusLine> {
    self.status.as_ref()
  }

  pub fn picker(&self) -> &CategoryPicker {
    &self.picker
  }

  pub fn api_url(&self) -> &str {
    &self.config.api.url
  }

  pub fn autocomplete_suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(&self.command_input)
  }

  pub fn selected_suggestion(&self) -> usize {
    self.selected_suggestion
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn temp_history(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("c9s-app-{}-{}.json", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
  }

  #[tokio::test]
  async fn test_new_replays_history_in_order() {
    let path = temp_history("replay");
    std::fs::write(&path, r#"["fact A","fact B"]"#).unwrap();

    let config = Config {
      history_file: Some(path.clone()),
      ..Config::default()
    };
    let app = App::new(config).await.unwrap();

    assert_eq!(app.facts(), ["fact A", "fact B"]);
    assert_eq!(app.selected(), 1);

    let _ = std::fs::remove_file(&path);
  }

  #[tokio::test]
  async fn test_new_with_no_history_starts_empty() {
    let config = Config {
      history_file: Some(temp_history("empty")),
      ..Config::default()
    };
    let app = App::new(config).await.unwrap();

    assert!(app.facts().is_empty());
    assert_eq!(app.selected(), 0);
    assert!(!app.is_fetching());
  }

  #[tokio::test]
  async fn test_clear_empties_view_and_file() {
    let path = temp_history("clear");
    std::fs::write(&path, r#"["fact A","fact B"]"#).unwrap();

    let config = Config {
      history_file: Some(path.clone()),
      ..Config::default()
    };
    let mut app = App::new(config).await.unwrap();
    app.clear_history();

    assert!(app.facts().is_empty());
    assert!(!path.exists());
  }

  #[tokio::test]
  async fn test_fact_loaded_appends_to_view_and_file() {
    let path = temp_history("append");

    let config = Config {
      history_file: Some(path.clone()),
      ..Config::default()
    };
    let mut app = App::new(config).await.unwrap();

    app.handle_api_event(ApiEvent::FactLoaded(crate::api::types::Fact {
      text: "fact C".to_string(),
    }));

    assert_eq!(app.facts(), ["fact C"]);
    assert_eq!(
      std::fs::read_to_string(&path).unwrap(),
      r#"["fact C"]"#
    );

    let _ = std::fs::remove_file(&path);
  }

  #[tokio::test]
  async fn test_fact_failure_leaves_state_unchanged() {
    let path = temp_history("failure");
    std::fs::write(&path, r#"["fact A"]"#).unwrap();

    let config = Config {
      history_file: Some(path.clone()),
      ..Config::default()
    };
    let mut app = App::new(config).await.unwrap();
    app.fetching = true;

    app.handle_api_event(ApiEvent::FactFailed("connection refused".to_string()));

    assert_eq!(app.facts(), ["fact A"]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"["fact A"]"#);
    assert!(!app.is_fetching());
    assert!(app.status().is_some_and(|s| s.is_error));

    let _ = std::fs::remove_file(&path);
  }
}
