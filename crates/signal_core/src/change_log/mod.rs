//! Observability for the coordination engine.
//!
//! The engine reports what it computed to an injected [`CoordinationObserver`].
//! [`ChangeLog`] is the default observer: it owns the per-intersection caches
//! that suppress repeated log records when nothing changed. Nothing here feeds
//! back into decisions.

mod observer;
mod recorder;
#[cfg(test)]
mod tests;

pub use observer::{CoordinationObserver, NoopObserver, ObserverHandle};
pub use recorder::ChangeLog;
