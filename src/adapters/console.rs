use crate::domain::ports::{Dispatch, Notifier};
use crate::domain::signal::Signal;

/// Store stand-in that logs every signal, letting the CLI exercise the
/// gateways without a reducer behind them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatch;

impl Dispatch for TracingDispatch {
    fn dispatch(&self, signal: Signal) {
        match &signal {
            Signal::Began(op) => tracing::debug!("begin {}", op),
            Signal::Failed { op, failure } => {
                tracing::warn!("{} failed ({:?}): {}", op, failure.kind, failure.message)
            }
            other => tracing::debug!("store <- {:?}", other),
        }
    }
}

/// Prints outcome notifications to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}
