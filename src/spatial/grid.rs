//! Dense row-major grid over the circuit board

use crate::core::types::{BoardSize, Position};

/// Generic 2D grid with one value per board cell
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    pub fn for_board(board: BoardSize) -> Self {
        Self::new(board.width as usize, board.height as usize)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            Some(&self.data[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            Some(&mut self.data[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    #[inline]
    pub fn at(&self, pos: Position) -> Option<&T> {
        self.get(pos.x as usize, pos.y as usize)
    }

    #[inline]
    pub fn at_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.get_mut(pos.x as usize, pos.y as usize)
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.width.max(1))
    }
}
