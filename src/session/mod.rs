pub mod controller;

pub use controller::{LearnerAction, Session};
