// Library target exists for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// harnesses can import types via `wordahead::engine::*` / `wordahead::session::*`.
// Some code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used by tests and benchmarks
pub mod client;
pub mod engine;
pub mod session;
pub mod store;

// Private: required transitively (won't compile without them)
mod app;
mod config;
mod event;
mod sample;
mod ui;
