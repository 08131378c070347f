//! Render-ready view models for the results area

pub mod grid;
pub mod pager;

pub use grid::GridView;
pub use pager::{Edge, PagerModel};
