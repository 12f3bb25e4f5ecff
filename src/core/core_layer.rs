// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "documents/mod.rs"]
pub mod documents;
