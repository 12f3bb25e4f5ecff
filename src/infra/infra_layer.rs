// The infra module contains implementations of core traits.
// Each external concern goes in its own submodule.

#[path = "google_docs/mod.rs"]
pub mod google_docs;

#[path = "storage/mod.rs"]
pub mod storage;
