//! Laser Circuit - Entry Point
//!
//! Reads the board size, emitters and receivers from stdin (plus mirrors with
//! `--add-my-mirrors`), prints the board, and with `--run-my-circuit` applies
//! the pulse sequence file and runs the circuit to completion.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use laser_circuit::circuit::{render_board, run_circuit, EmissionReport, LaserCircuit};
use laser_circuit::components::Component;
use laser_circuit::core::error::{CircuitError, ParseError, Result};
use laser_circuit::core::RunConfig;
use laser_circuit::input::{
    apply_pulse_sequence, load_layout, parse_emitter, parse_mirror, parse_receiver, parse_size,
};

const BANNER: &str = "========================";

/// Laser circuit builder and photon simulator
#[derive(Parser, Debug)]
#[command(name = "laser-circuit")]
#[command(about = "Build a laser circuit and run photons through it")]
struct Args {
    /// Prompt for mirrors after the receivers
    #[arg(long)]
    add_my_mirrors: bool,

    /// Apply the pulse sequence file and run the circuit
    #[arg(long)]
    run_my_circuit: bool,

    /// Pulse sequence file, one `<symbol> <frequency> <direction>` per line
    #[arg(long, default_value = "pulse_sequence.in")]
    pulse_file: PathBuf,

    /// Load the circuit from a TOML layout instead of prompting
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Run configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write emit_photons.out, activation_times.out and total_energy.out here
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Stop the run after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Print the run summary as JSON instead of the transcript
    #[arg(long)]
    json: bool,
}

/// Prompted line reader over stdin
struct Console<R> {
    input: R,
}

impl<R: BufRead> Console<R> {
    /// `None` once input is exhausted
    fn prompt(&mut self) -> Result<Option<String>> {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("laser_circuit=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => RunConfig::load_from_toml(path)?,
        None => RunConfig::default(),
    };
    if args.output_dir.is_some() {
        config.output_dir = args.output_dir.clone();
    }
    if args.max_ticks.is_some() {
        config.max_ticks = args.max_ticks;
    }
    config.validate().map_err(CircuitError::Config)?;

    let stdin = io::stdin();
    let mut console = Console { input: stdin.lock() };

    let mut circuit = match &args.layout {
        Some(path) => {
            let loaded = load_layout(path)?;
            for rejection in &loaded.rejections {
                println!("Error: {}", rejection);
            }
            loaded.circuit
        }
        None => match initialise_circuit(&mut console, &config)? {
            Some(circuit) => circuit,
            None => {
                tracing::warn!("Input ended before a board size was given");
                return Ok(());
            }
        },
    };

    if args.add_my_mirrors {
        println!("<ADD-MY-MIRRORS FLAG DETECTED!>");
        println!();
        println!("Adding mirror(s)...");
        let count = add_components(&mut console, &mut circuit, "END MIRRORS", None, parse_mirror)?;
        println!("{} mirror(s) added.", count);
        println!();
    }

    println!("{}", render_board(&circuit));
    println!();

    if args.run_my_circuit {
        println!("<RUN-MY-CIRCUIT FLAG DETECTED!>");
        println!();

        match File::open(&args.pulse_file) {
            Ok(file) => {
                set_pulse_sequence(&mut circuit, BufReader::new(file))?;
                println!();
            }
            // A layout may carry its own pulses
            Err(e) if e.kind() == io::ErrorKind::NotFound && args.layout.is_some() => {
                tracing::info!("No pulse file at {}, using layout pulses", args.pulse_file.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                println!(
                    "Error: --run-my-circuit flag detected but {} does not exist",
                    args.pulse_file.display()
                );
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        run(&mut circuit, &config, args.json)?;
    }

    Ok(())
}

/// Board size, emitters, then receivers
fn initialise_circuit<R: BufRead>(console: &mut Console<R>, config: &RunConfig) -> Result<Option<LaserCircuit>> {
    println!("Creating circuit board...");
    let board = loop {
        let Some(line) = console.prompt()? else {
            return Ok(None);
        };
        match parse_size(&line) {
            Ok(board) => break board,
            Err(e) => println!("Error: {}", e),
        }
    };
    let mut circuit = LaserCircuit::with_board(board);
    println!("{} board created.", board);
    println!();

    println!("Adding emitter(s)...");
    let count = add_components(console, &mut circuit, "END EMITTERS", Some(config.max_emitters), parse_emitter)?;
    println!("{} emitter(s) added.", count);
    println!();

    println!("Adding receiver(s)...");
    let count = add_components(console, &mut circuit, "END RECEIVERS", Some(config.max_receivers), parse_receiver)?;
    println!("{} receiver(s) added.", count);
    println!();

    Ok(Some(circuit))
}

/// Prompt for components until `end`, end of input, or `limit` placements
fn add_components<R, T>(
    console: &mut Console<R>,
    circuit: &mut LaserCircuit,
    end: &str,
    limit: Option<usize>,
    parse: impl Fn(&str) -> std::result::Result<T, ParseError>,
) -> Result<usize>
where
    R: BufRead,
    T: Into<Component>,
{
    let mut count = 0;
    while limit.map_or(true, |limit| count < limit) {
        let Some(line) = console.prompt()? else {
            break;
        };
        if line == end {
            break;
        }

        let placed = parse(&line)
            .map_err(CircuitError::from)
            .and_then(|c| circuit.add_component(c.into()).map_err(CircuitError::from));
        match placed {
            Ok(()) => count += 1,
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(count)
}

fn set_pulse_sequence(circuit: &mut LaserCircuit, reader: impl BufRead) -> Result<()> {
    println!("Setting pulse sequence...");
    let report = apply_pulse_sequence(circuit, reader)?;
    for line in &report.lines {
        println!("{}", line);
    }
    println!("Pulse sequence set.");
    Ok(())
}

fn run(circuit: &mut LaserCircuit, config: &RunConfig, json: bool) -> Result<()> {
    if json {
        let summary = run_circuit(circuit, config, |_, _| {})?;
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    println!("{}\n   RUNNING CIRCUIT...\n{}\n", BANNER, BANNER);
    println!("0ns: Emitting photons.");
    println!("{}", EmissionReport::from_emitters(circuit.emitters()));

    let summary = run_circuit(circuit, config, |snapshot, circuit| {
        println!("{}", snapshot);
        println!("{}", render_board(circuit));
        println!();
    })?;

    if !summary.completed {
        println!("Tick budget exhausted at {}ns with photons still travelling.", summary.ticks);
        println!();
    }

    println!("Activation times:");
    println!("{}", summary.activation);
    println!("Total energy absorbed:");
    println!("{}", summary.energy);
    println!("{}\n   CIRCUIT FINISHED!\n{}", BANNER, BANNER);
    Ok(())
}
