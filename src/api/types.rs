/// A single fact returned by the remote service.
///
/// Only the joke text is kept past the fetch; the remote id and category
/// tags are dropped after logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
  pub text: String,
}
