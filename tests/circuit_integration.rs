//! Circuit engine integration tests
//!
//! End-to-end behaviour of emission, ticking, reflection, absorption and the
//! reports built from a finished run.

use laser_circuit::circuit::{
    render_board, run_circuit, ActivationReport, CircuitEvent, CircuitPhase, EnergyReport, LaserCircuit,
};
use laser_circuit::components::{
    ComponentKind, Emitter, EmitterSymbol, Mirror, MirrorSymbol, Pulse, Receiver, ReceiverSymbol,
};
use laser_circuit::core::error::{CircuitError, PlacementError, PulseError};
use laser_circuit::core::types::{Direction, Position};
use laser_circuit::core::RunConfig;

fn emitter(letter: char, x: u32, y: u32) -> Emitter {
    Emitter::new(EmitterSymbol::new(letter).unwrap(), Position::new(x, y))
}

fn receiver(number: u8, x: u32, y: u32) -> Receiver {
    Receiver::new(ReceiverSymbol::new(number).unwrap(), Position::new(x, y))
}

fn mirror(symbol: char, x: u32, y: u32) -> Mirror {
    Mirror::new(MirrorSymbol::from_char(symbol).unwrap(), Position::new(x, y))
}

fn pulse(circuit: &mut LaserCircuit, letter: char, frequency: u32, direction: Direction) {
    let symbol = EmitterSymbol::new(letter).unwrap();
    circuit.set_pulse(symbol, Pulse::new(frequency, direction).unwrap()).unwrap();
}

// ============================================================================
// Photon travel
// ============================================================================

/// Straight shot across a 5x5 board lands on the receiver at tick 4
#[test]
fn test_straight_line_activation() {
    let mut circuit = LaserCircuit::new(5, 5).unwrap();
    circuit.add_emitter(emitter('A', 0, 2)).unwrap();
    circuit.add_receiver(receiver(0, 4, 2)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);

    assert_eq!(circuit.emit_photons().unwrap(), 1);
    for _ in 0..4 {
        circuit.tick();
    }

    let r0 = &circuit.receivers()[0];
    assert!(r0.is_activated());
    assert_eq!(r0.activation_time(), Some(4));
    assert_eq!(r0.photons_absorbed(), 1);
    assert!(circuit.is_finished());
    assert_eq!(circuit.phase(), CircuitPhase::Finished);
}

/// Photon heading east hits `\` on tick 1 and turns south
#[test]
fn test_backslash_turns_east_into_south() {
    let mut circuit = LaserCircuit::new(3, 3).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_mirror(mirror('\\', 1, 0)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);
    circuit.emit_photons().unwrap();

    let events = circuit.tick();
    let photon = &circuit.photons()[0];
    assert_eq!(photon.position(), Position::new(1, 0));
    assert_eq!(photon.direction(), Direction::South);
    assert_eq!(
        events,
        vec![CircuitEvent::PhotonReflected {
            photon: 0,
            position: Position::new(1, 0),
            mirror: MirrorSymbol::Backslash,
            direction: Direction::South,
            tick: 1,
        }]
    );

    circuit.tick();
    assert_eq!(circuit.photons()[0].position(), Position::new(1, 1));
    assert!(!circuit.is_finished());
}

/// Firing straight off the board absorbs the photon on its own cell
#[test]
fn test_photon_leaving_board_is_absorbed_in_place() {
    let mut circuit = LaserCircuit::new(3, 3).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_receiver(receiver(0, 2, 2)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::North);
    circuit.emit_photons().unwrap();

    let events = circuit.tick();
    let photon = &circuit.photons()[0];
    assert!(photon.is_absorbed());
    assert_eq!(photon.position(), Position::new(0, 0));
    assert!(!circuit.receivers()[0].is_activated());
    assert!(matches!(events[0], CircuitEvent::PhotonExited { tick: 1, .. }));
    assert!(circuit.is_finished());
}

/// A photon hitting a blind face stops on the mirror's cell
#[test]
fn test_blind_face_absorbs() {
    let mut circuit = LaserCircuit::new(4, 1).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_mirror(mirror('>', 2, 0)).unwrap();
    circuit.add_receiver(receiver(0, 3, 0)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);
    circuit.emit_photons().unwrap();

    circuit.tick();
    let events = circuit.tick();

    assert!(circuit.photons()[0].is_absorbed());
    assert_eq!(circuit.photons()[0].position(), Position::new(2, 0));
    assert!(events[0].is_absorption());
    assert!(!circuit.receivers()[0].is_activated());
}

/// Photons pass over emitters, including the one that fired them
#[test]
fn test_photon_passes_through_emitters() {
    let mut circuit = LaserCircuit::new(5, 1).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_emitter(emitter('B', 2, 0)).unwrap();
    circuit.add_receiver(receiver(3, 4, 0)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);
    circuit.emit_photons().unwrap();

    for _ in 0..4 {
        circuit.tick();
    }
    assert_eq!(circuit.receivers()[0].activation_time(), Some(4));
}

/// Two photons into one receiver: first arrival sets the time, energy sums
#[test]
fn test_receiver_accumulates() {
    let mut circuit = LaserCircuit::new(5, 3).unwrap();
    circuit.add_emitter(emitter('A', 0, 1)).unwrap();
    circuit.add_emitter(emitter('B', 2, 0)).unwrap();
    circuit.add_receiver(receiver(0, 2, 1)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);
    pulse(&mut circuit, 'B', 300, Direction::South);
    circuit.emit_photons().unwrap();

    let events = circuit.tick();
    assert!(events.contains(&CircuitEvent::ReceiverActivated {
        receiver: ReceiverSymbol::new(0).unwrap(),
        tick: 1
    }));

    circuit.tick();
    circuit.tick();
    let r0 = &circuit.receivers()[0];
    assert_eq!(r0.photons_absorbed(), 2);
    assert_eq!(r0.activation_time(), Some(1));
    // 400THz in eV
    assert!((r0.total_energy() - 400.0 * 4.135667696e-3).abs() < 1e-9);
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Once finished, tick only advances the clock
#[test]
fn test_finished_circuit_only_advances_clock() {
    let mut circuit = LaserCircuit::new(2, 1).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_receiver(receiver(0, 1, 0)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);
    circuit.emit_photons().unwrap();
    circuit.tick();
    assert!(circuit.is_finished());

    let before = circuit.clone();
    let events = circuit.tick();

    assert!(events.is_empty());
    assert_eq!(circuit.clock(), before.clock() + 1);
    assert_eq!(circuit.photons(), before.photons());
    assert_eq!(
        circuit.receivers()[0].photons_absorbed(),
        before.receivers()[0].photons_absorbed()
    );
}

/// Emission happens once; emitters without a pulse stay silent
#[test]
fn test_emission_once_and_only_configured() {
    let mut circuit = LaserCircuit::new(4, 4).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_emitter(emitter('B', 1, 1)).unwrap();
    pulse(&mut circuit, 'B', 200, Direction::South);

    assert_eq!(circuit.phase(), CircuitPhase::Idle);
    assert_eq!(circuit.emit_photons().unwrap(), 1);
    assert_eq!(circuit.phase(), CircuitPhase::Running);
    assert!(matches!(circuit.emit_photons(), Err(CircuitError::AlreadyEmitted)));
    assert_eq!(circuit.photons().len(), 1);
    assert_eq!(circuit.photons()[0].position(), Position::new(1, 1));
}

/// Empty circuits are finished from the start
#[test]
fn test_empty_circuit_is_finished() {
    let mut circuit = LaserCircuit::new(3, 3).unwrap();
    assert!(circuit.is_finished());
    assert_eq!(circuit.emit_photons().unwrap(), 0);
    assert_eq!(circuit.phase(), CircuitPhase::Finished);
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_placement_rejections_leave_state_unchanged() {
    let mut circuit = LaserCircuit::new(5, 5).unwrap();
    circuit.add_emitter(emitter('A', 1, 1)).unwrap();
    circuit.add_mirror(mirror('/', 2, 2)).unwrap();

    assert_eq!(
        circuit.add_receiver(receiver(0, 5, 0)).unwrap_err().to_string(),
        "position (5, 0) is out-of-bounds of 5x5 circuit board"
    );
    assert!(matches!(
        circuit.add_receiver(receiver(0, 2, 2)),
        Err(PlacementError::PositionTaken { kind: ComponentKind::Mirror, .. })
    ));
    assert_eq!(
        circuit.add_emitter(emitter('A', 3, 3)).unwrap_err(),
        PlacementError::SymbolTaken("A".to_string())
    );
    assert_eq!(
        circuit.add_mirror(mirror('v', 1, 1)).unwrap_err().to_string(),
        "position (1, 1) is already taken by emitter 'A'"
    );

    assert_eq!(circuit.emitters().len(), 1);
    assert!(circuit.receivers().is_empty());
    assert_eq!(circuit.mirrors().len(), 1);
    assert!(circuit.component_at(Position::new(3, 3)).is_none());
}

/// Emitters and receivers stay sorted regardless of insertion order
#[test]
fn test_symbol_order_is_kept() {
    let mut circuit = LaserCircuit::new(10, 10).unwrap();
    for (i, letter) in ['D', 'A', 'C', 'B'].into_iter().enumerate() {
        circuit.add_emitter(emitter(letter, i as u32, 0)).unwrap();
    }
    for (i, number) in [7, 2, 9].into_iter().enumerate() {
        circuit.add_receiver(receiver(number, i as u32, 1)).unwrap();
    }

    let letters: String = circuit.emitters().iter().map(|e| e.symbol().as_char()).collect();
    assert_eq!(letters, "ABCD");
    let numbers: Vec<u8> = circuit.receivers().iter().map(|r| r.symbol().number()).collect();
    assert_eq!(numbers, vec![2, 7, 9]);

    // Lookups still resolve to the right component after the shifts
    let at = circuit.component_at(Position::new(0, 0)).unwrap();
    assert_eq!(at.symbol(), "D");
    let at = circuit.component_at(Position::new(1, 1)).unwrap();
    assert_eq!(at.symbol(), "R2");
}

#[test]
fn test_pulse_rejections() {
    let mut circuit = LaserCircuit::new(3, 3).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);

    let a = EmitterSymbol::new('A').unwrap();
    let c = EmitterSymbol::new('C').unwrap();
    let again = Pulse::new(500, Direction::West).unwrap();

    assert_eq!(circuit.set_pulse(a, again), Err(PulseError::AlreadySet('A')));
    assert_eq!(circuit.set_pulse(c, again), Err(PulseError::UnknownEmitter('C')));
    let kept = circuit.emitter(a).unwrap().pulse().unwrap();
    assert_eq!((kept.frequency(), kept.direction()), (100, Direction::East));
}

// ============================================================================
// Full runs and reports
// ============================================================================

/// Receivers activated at different times and energies report in order
#[test]
fn test_full_run_reports() {
    let mut circuit = LaserCircuit::new(8, 3).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_emitter(emitter('B', 0, 2)).unwrap();
    circuit.add_receiver(receiver(1, 7, 0)).unwrap();
    circuit.add_receiver(receiver(2, 3, 2)).unwrap();
    circuit.add_receiver(receiver(5, 5, 1)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);
    pulse(&mut circuit, 'B', 900, Direction::East);

    let summary = run_circuit(&mut circuit, &RunConfig::default(), |_, _| {}).unwrap();

    assert!(summary.completed);
    assert_eq!(summary.ticks, 7);
    assert_eq!(summary.emission.to_string(), "A: 100THz, East\nB: 900THz, East\n");
    assert_eq!(summary.activation.to_string(), "R2: 3ns\nR1: 7ns\n");
    assert_eq!(summary.energy.to_string(), "R2: 3.72eV (1)\nR1: 0.41eV (1)\n");

    assert_eq!(ActivationReport::from_receivers(circuit.receivers()), summary.activation);
    assert_eq!(EnergyReport::from_receivers(circuit.receivers()), summary.energy);
}

/// Report files land in the configured directory
#[test]
fn test_run_writes_report_files() {
    let dir = std::env::temp_dir().join(format!("laser-circuit-reports-{}", std::process::id()));
    let mut circuit = LaserCircuit::new(3, 1).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_receiver(receiver(0, 2, 0)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);

    let config = RunConfig { output_dir: Some(dir.clone()), ..RunConfig::default() };
    run_circuit(&mut circuit, &config, |_, _| {}).unwrap();

    let read = |name: &str| std::fs::read_to_string(dir.join(name)).unwrap();
    assert_eq!(read("emit_photons.out"), "A: 100THz, East\n");
    assert_eq!(read("activation_times.out"), "R0: 2ns\n");
    assert_eq!(read("total_energy.out"), "R0: 0.41eV (1)\n");

    std::fs::remove_dir_all(&dir).unwrap();
}

/// The board shows the trail the photon took around a mirror
#[test]
fn test_rendered_trail() {
    let mut circuit = LaserCircuit::new(4, 3).unwrap();
    circuit.add_emitter(emitter('A', 0, 0)).unwrap();
    circuit.add_mirror(mirror('\\', 2, 0)).unwrap();
    circuit.add_receiver(receiver(4, 2, 2)).unwrap();
    pulse(&mut circuit, 'A', 100, Direction::East);

    let summary = run_circuit(&mut circuit, &RunConfig::default(), |_, _| {}).unwrap();
    assert_eq!(summary.ticks, 4);
    assert_eq!(render_board(&circuit), "+----+\n|A.\\ |\n|  . |\n|  4 |\n+----+");
}
