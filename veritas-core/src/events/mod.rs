//! Pipeline lifecycle events: synchronous, panic-isolated dispatch.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::VeritasEventHandler;
pub use types::{
    AnalyzerFallbackEvent, DecisionReachedEvent, ErrorEvent, SignalScoredEvent,
    StateChangedEvent,
};
