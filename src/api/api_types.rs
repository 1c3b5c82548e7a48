//! Serde-deserializable types matching chucknorris.io API responses.
//!
//! These are separate from domain types so the wire format can carry fields
//! the application never keeps (id, category tags on a joke).

use serde::Deserialize;

use super::types::Fact;

/// Response shape of `GET /jokes/random`.
#[derive(Debug, Deserialize)]
pub struct ApiJoke {
  #[serde(default)]
  pub id: String,
  pub value: String,
  #[serde(default)]
  pub categories: Vec<String>,
}

impl ApiJoke {
  /// Reduce to the domain type. Only the text survives.
  pub fn into_fact(self) -> Fact {
    Fact { text: self.value }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_joke_deserializes() {
    let json = r#"{
      "id": "abc123",
      "value": "fact C",
      "categories": ["dev"],
      "icon_url": "https://api.chucknorris.io/img/avatar/chuck-norris.png"
    }"#;

    let joke: ApiJoke = serde_json::from_str(json).unwrap();
    assert_eq!(joke.id, "abc123");
    assert_eq!(joke.categories, vec!["dev"]);
    assert_eq!(joke.into_fact().text, "fact C");
  }

  #[test]
  fn test_joke_without_optional_fields() {
    let joke: ApiJoke = serde_json::from_str(r#"{"value": "fact A"}"#).unwrap();
    assert_eq!(joke.id, "");
    assert!(joke.categories.is_empty());
  }
}
