// Adapters layer: concrete implementations of the domain ports for hosts
// that do not bring their own store or presentation layer.

pub mod console;

pub use console::{ConsoleNotifier, TracingDispatch};
