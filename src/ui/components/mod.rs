mod category_picker;
mod command_overlay;

pub use category_picker::{CategoryPicker, CategoryPickerEvent};
pub use command_overlay::draw_command_overlay;

/// Result of offering a key event to a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Component is not active; the key should be handled elsewhere
  NotHandled,
  /// Component consumed the key
  Handled,
  /// Component consumed the key and emitted an event for the parent
  Event(T),
}
