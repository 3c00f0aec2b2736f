//! ASCII rendering of the circuit board
//!
//! ```text
//! +-----+
//! |A...0|
//! |     |
//! +-----+
//! ```
//!
//! Emitters draw as their letter, receivers as their digit, mirrors as their
//! shape. Cells a photon has entered draw as `.` unless a component sits there.

use crate::circuit::engine::LaserCircuit;
use crate::core::types::Position;
use crate::spatial::Grid;

const EMPTY: char = ' ';
const TRAIL: char = '.';

pub fn render_board(circuit: &LaserCircuit) -> String {
    let board = circuit.board();
    let mut canvas: Grid<char> = Grid::for_board(board);

    for y in 0..board.height {
        for x in 0..board.width {
            let pos = Position::new(x, y);
            let glyph = match circuit.component_at(pos) {
                Some(component) => component.glyph(),
                None if circuit.visited(pos) => TRAIL,
                None => EMPTY,
            };
            canvas.set(x as usize, y as usize, glyph);
        }
    }

    let border = format!("+{}+", "-".repeat(board.width as usize));
    let mut out = String::with_capacity((board.width as usize + 3) * (board.height as usize + 2));
    out.push_str(&border);
    out.push('\n');
    for row in canvas.rows() {
        out.push('|');
        out.extend(row.iter());
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Emitter, EmitterSymbol, Mirror, MirrorSymbol, Pulse, Receiver, ReceiverSymbol};
    use crate::core::types::Direction;

    #[test]
    fn test_empty_board() {
        let circuit = LaserCircuit::new(3, 2).unwrap();
        assert_eq!(render_board(&circuit), "+---+\n|   |\n|   |\n+---+");
    }

    #[test]
    fn test_components_and_trail() {
        let mut circuit = LaserCircuit::new(5, 2).unwrap();
        let a = EmitterSymbol::new('A').unwrap();
        circuit.add_emitter(Emitter::new(a, Position::new(0, 0))).unwrap();
        circuit
            .add_receiver(Receiver::new(ReceiverSymbol::new(7).unwrap(), Position::new(4, 0)))
            .unwrap();
        circuit
            .add_mirror(Mirror::new(MirrorSymbol::Backslash, Position::new(2, 1)))
            .unwrap();
        circuit.set_pulse(a, Pulse::new(100, Direction::East).unwrap()).unwrap();
        circuit.emit_photons().unwrap();
        circuit.tick();
        circuit.tick();

        assert_eq!(render_board(&circuit), "+-----+\n|A.. 7|\n|  \\  |\n+-----+");
    }
}
