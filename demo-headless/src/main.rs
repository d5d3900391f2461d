mod fringe;

use clap::Parser;
use fringe::{predicted_fringes, Fringe};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wave_sim_core::{Alignment, DoubleSlitConfig, DoubleSlitSimulation, FrameStats};

/// Double-slit wave simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wave-sim-demo")]
#[command(about = "Headless double-slit interference run", long_about = None)]
struct Args {
    /// JSON run configuration; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated time in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Time step in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Wave speed in m/s
    #[arg(short, long)]
    speed: Option<f64>,

    /// Source frequency in Hz
    #[arg(short, long)]
    frequency: Option<f64>,

    /// Source duration in seconds (<= 0 keeps the source on)
    #[arg(long, allow_negative_numbers = true)]
    pulse_duration: Option<f64>,

    /// Slit separation as a fraction of the domain height
    #[arg(long)]
    separation: Option<f64>,

    /// Slit aperture as a fraction of the domain height
    #[arg(long)]
    aperture: Option<f64>,

    /// Log progress every N frames
    #[arg(short, long, default_value_t = 250)]
    report_every: usize,

    /// Write the screen envelope and predictions to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn load_config(&self) -> Result<DoubleSlitConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                serde_json::from_str(&text)?
            }
            None => DoubleSlitConfig::default(),
        };

        if let Some(duration) = self.duration {
            config.total_time = duration;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(frequency) = self.frequency {
            config.pulse_frequency = frequency;
        }
        if let Some(pulse_duration) = self.pulse_duration {
            config.pulse_duration = pulse_duration;
        }
        if let Some(separation) = self.separation {
            config.slit.separation = separation;
        }
        if let Some(aperture) = self.aperture {
            config.slit.aperture = aperture;
        }

        Ok(config)
    }
}

/// Results written by `--output`
#[derive(Serialize)]
struct Report<'a> {
    config: &'a DoubleSlitConfig,
    x_nodes: usize,
    y_nodes: usize,
    courant_number: f64,
    display_cap: f64,
    final_frame: Option<FrameStats>,
    screen_positions: Vec<f64>,
    envelope: &'a [f64],
    predicted_fringes: Vec<Fringe>,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = args.load_config()?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    info!("=== Double-Slit Wave Simulation ===");
    info!(
        "Domain {:.2}x{:.2}m, speed {:.2} m/s, wavelength {:.4}m",
        config.width,
        config.height,
        config.speed,
        config.wavelength()
    );

    let mut sim = DoubleSlitSimulation::new(config)?;
    let grid = *sim.solver().grid();
    info!(
        "Grid {}x{} nodes, dx={:.5}m, dy={:.5}m, Courant number {:.3}",
        grid.x_nodes(),
        grid.y_nodes(),
        grid.dx(),
        grid.dy(),
        grid.courant_number()
    );

    let total = sim.total_steps();
    let report_every = args.report_every.max(1);
    info!("Running {} frames...", total);

    let mut last = None;
    let mut next_report = report_every;
    sim.run(total, |stats| {
        let frame = stats.step + 1;
        if frame >= next_report || frame == total {
            next_report += report_every;
            info!(
                "Simulation time: {:.3}s | Max on screen: {:.5} | Completed: {:.1}%",
                stats.time,
                stats.max_on_screen,
                stats.progress * 100.0
            );
        }
        last = Some(*stats);
    })?;

    let config = sim.config();
    let fringes = if config.screen.alignment == Alignment::Vertical {
        predicted_fringes(config)
    } else {
        warn!("Fringe prediction only applies to a vertical screen");
        Vec::new()
    };
    for fringe in &fringes {
        info!("Predicted order {:+} maximum at y={:.4}m", fringe.order, fringe.position);
    }

    info!("=== Simulation Complete ===");
    if let Some(stats) = last {
        info!(
            "Final time: {:.3}s, max on screen: {:.5} (display cap {:.5})",
            stats.time,
            stats.max_on_screen,
            config.display_cap()
        );
    }

    if let Some(path) = &args.output {
        let report = Report {
            config,
            x_nodes: grid.x_nodes(),
            y_nodes: grid.y_nodes(),
            courant_number: grid.courant_number(),
            display_cap: config.display_cap(),
            final_frame: last,
            screen_positions: sim.screen_positions(),
            envelope: sim.envelope(),
            predicted_fringes: fringes,
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
