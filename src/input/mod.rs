//! Text and file input: line parsers, pulse sequences, TOML layouts

pub mod layout;
pub mod parser;
pub mod pulse;

pub use layout::{load_layout, CircuitLayout, LoadedLayout};
pub use parser::{parse_emitter, parse_mirror, parse_pulse_sequence, parse_receiver, parse_size, PulseDirective};
pub use pulse::{apply_pulse_line, apply_pulse_sequence, PulseLine, PulseOutcome, PulseReport};
