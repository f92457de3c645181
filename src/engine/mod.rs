pub mod classify;
pub mod level;
pub mod normalize;
pub mod profile;
pub mod token;

pub use classify::Category;
