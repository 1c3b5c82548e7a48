use crate::api::api_types::ApiJoke;
use crate::api::types::Fact;
use crate::config::Config;
use color_eyre::{eyre::eyre, Result};
use std::time::Duration;
use url::Url;

/// chucknorris.io API client wrapper
#[derive(Clone)]
pub struct FactsClient {
  http: reqwest::Client,
  base: Url,
}

impl FactsClient {
  pub fn new(config: &Config) -> Result<Self> {
    let base = Url::parse(&config.api.url)
      .map_err(|e| eyre!("Invalid API base URL {}: {}", config.api.url, e))?;

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(10))
      .user_agent(concat!("c9s/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base })
  }

  /// List the category tags the service knows about
  pub async fn categories(&self) -> Result<Vec<String>> {
    let url = self.categories_url()?;

    let categories: Vec<String> = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch categories: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Category request rejected: {}", e))?
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse categories: {}", e))?;

    Ok(categories)
  }

  /// Fetch one random fact, optionally restricted to a category
  pub async fn random_fact(&self, category: Option<&str>) -> Result<Fact> {
    let url = self.random_url(category)?;

    let joke: ApiJoke = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch fact: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Fact request rejected: {}", e))?
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse fact: {}", e))?;

    tracing::debug!(id = %joke.id, categories = ?joke.categories, "fetched fact");

    Ok(joke.into_fact())
  }

  fn categories_url(&self) -> Result<Url> {
    self
      .base
      .join("/jokes/categories")
      .map_err(|e| eyre!("Failed to build categories URL: {}", e))
  }

  /// Build the random-fact URL. The category parameter is only present
  /// when a non-empty tag is given.
  fn random_url(&self, category: Option<&str>) -> Result<Url> {
    let mut url = self
      .base
      .join("/jokes/random")
      .map_err(|e| eyre!("Failed to build fact URL: {}", e))?;

    if let Some(tag) = category.filter(|t| !t.is_empty()) {
      url.query_pairs_mut().append_pair("category", tag);
    }

    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client() -> FactsClient {
    FactsClient::new(&Config::default()).unwrap()
  }

  #[test]
  fn test_random_url_without_category() {
    let url = client().random_url(None).unwrap();
    assert_eq!(url.as_str(), "https://api.chucknorris.io/jokes/random");
  }

  #[test]
  fn test_random_url_with_category() {
    let url = client().random_url(Some("dev")).unwrap();
    assert_eq!(
      url.as_str(),
      "https://api.chucknorris.io/jokes/random?category=dev"
    );
  }

  #[test]
  fn test_random_url_empty_category_is_unfiltered() {
    let url = client().random_url(Some("")).unwrap();
    assert_eq!(url.as_str(), "https://api.chucknorris.io/jokes/random");
  }

  #[test]
  fn test_categories_url() {
    let url = client().categories_url().unwrap();
    assert_eq!(url.as_str(), "https://api.chucknorris.io/jokes/categories");
  }
}
