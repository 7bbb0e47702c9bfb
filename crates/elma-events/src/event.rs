use crate::error::{EventError, Result};
use crate::finite;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

fn default_true() -> bool {
    true
}

/// Whether an [`Event`] should still be handed to the next handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Propagation {
    Propagating,
    Stopped,
}

impl Propagation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propagating => "propagating",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Propagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value emitted to watchers and handed to each event handler in turn.
///
/// Events wrap any JSON-like value:
///
/// ```
/// use elma_events::{json, Event};
///
/// let number = Event::new(2.5);
/// let greeting = Event::new("hello world");
/// let list = Event::new(json!([1, 2, 3]));
/// assert_eq!(list.value(), &json!([1, 2, 3]));
/// # let _ = (number, greeting);
/// ```
///
/// The value is fixed at construction. The only mutable state is the
/// propagation flag, which a handler clears with [`Event::stop_propagation`]
/// to keep later handlers watching the same event from running. Whoever
/// drives the handler chain checks [`Event::propagate`] after each handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    value: Value,
    #[serde(default = "default_true")]
    propagate: bool,
}

impl Event {
    /// Wrap a value as-is.
    ///
    /// `serde_json` turns NaN and infinite floats into `null` on conversion,
    /// so `Event::new(f64::NAN)` holds `Value::Null`. Use
    /// [`Event::from_serialize`] to have those rejected instead.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            propagate: true,
        }
    }

    /// Build an event from any serializable type.
    ///
    /// Fails when the type has no JSON representation, e.g. a map keyed by
    /// something other than strings, or a NaN or infinite float anywhere in it.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        finite::check(value).map_err(EventError::Encode)?;
        serde_json::to_value(value)
            .map(Self::new)
            .map_err(EventError::Encode)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Read the value back as a concrete type. The stored value is untouched.
    pub fn value_as<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.value).map_err(EventError::Decode)
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn propagate(&self) -> bool {
        self.propagate
    }

    pub fn is_stopped(&self) -> bool {
        !self.propagate
    }

    pub fn state(&self) -> Propagation {
        if self.propagate {
            Propagation::Propagating
        } else {
            Propagation::Stopped
        }
    }

    /// Prevent the event from reaching the next handler.
    ///
    /// Typically called from inside a handler. Calling it again is a no-op.
    pub fn stop_propagation(&mut self) {
        if self.propagate {
            tracing::trace!(value = %self.value, "event propagation stopped");
            self.propagate = false;
        }
    }

    /// Turn propagation back on so the same event can be emitted again.
    pub fn reset(&mut self) {
        if !self.propagate {
            tracing::trace!(value = %self.value, "event propagation reset");
            self.propagate = true;
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
