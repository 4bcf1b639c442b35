//! In-process collaborator backends.
//!
//! Deterministic, offline implementations of the lookup seams. Deployments
//! with managed NLP or DNS probing swap these out behind the same traits.

pub mod lexicon;
pub mod static_domain;

pub use lexicon::LexiconNlp;
pub use static_domain::StaticDomainIntel;
