//! Test helpers shared across settings-rs crates.

pub mod env;
pub mod files;
pub mod trees;

pub use env::RecordingEnv;
pub use files::write_fixture;
pub use trees::{app_tree, flat_tree, tree};
