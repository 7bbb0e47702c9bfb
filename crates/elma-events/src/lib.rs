mod error;
mod event;
mod finite;

pub use error::{EventError, Result};
pub use event::{Event, Propagation};
pub use serde_json::{json, Map, Value};
