pub mod board_index;
pub mod grid;

pub use board_index::{BoardIndex, Slot};
pub use grid::Grid;
