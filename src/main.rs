//! Palaeo Curve (Kommandozeile).
//!
//! Baut aus acht Koordinaten `x0 y0 x1 y1 x2 y2 x3 y3` (Start, Steuerpunkt 1,
//! Steuerpunkt 2, Ende) ein Segment und gibt die Auswertung als JSON aus.
//!
//! Optionen:
//! - `--probes <n>`: Probe-Punkte pro Segment (überschreibt die Optionen-Datei)
//! - `--options <pfad>`: Optionen-Datei statt `palaeo_curve.toml` neben der Binary
//! - `--save-options`: wirksame Optionen in die Optionen-Datei schreiben

use anyhow::{bail, Context};
use glam::DVec2;
use palaeo_curve::{CurveAnalysis, CurveOptions, SegmentChain};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    AppRunner::run(std::env::args().skip(1).collect())
}

/// Geparste Kommandozeile
struct CliArgs {
    points: [DVec2; 4],
    probes: Option<usize>,
    options_path: PathBuf,
    save_options: bool,
}

impl CliArgs {
    fn parse(args: Vec<String>) -> anyhow::Result<Self> {
        let mut numbers = Vec::with_capacity(8);
        let mut probes = None;
        let mut options_path = None;
        let mut save_options = false;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--probes" => {
                    let value = iter.next().context("--probes erwartet einen Wert")?;
                    let count: usize = value
                        .parse()
                        .with_context(|| format!("Ungültige Probe-Anzahl: {value}"))?;
                    if count == 0 {
                        bail!("Probe-Anzahl muss größer als 0 sein");
                    }
                    probes = Some(count);
                }
                "--options" => {
                    let value = iter.next().context("--options erwartet einen Pfad")?;
                    options_path = Some(PathBuf::from(value));
                }
                "--save-options" => save_options = true,
                _ => {
                    let number: f64 = arg
                        .parse()
                        .with_context(|| format!("Ungültige Koordinate: {arg}"))?;
                    numbers.push(number);
                }
            }
        }

        if numbers.len() != 8 {
            bail!(
                "Erwartet 8 Koordinaten (x0 y0 x1 y1 x2 y2 x3 y3), erhalten: {}",
                numbers.len()
            );
        }
        let point = |i: usize| DVec2::new(numbers[2 * i], numbers[2 * i + 1]);

        Ok(Self {
            points: [point(0), point(1), point(2), point(3)],
            probes,
            options_path: options_path.unwrap_or_else(CurveOptions::config_path),
            save_options,
        })
    }
}

struct AppRunner;

impl AppRunner {
    fn run(args: Vec<String>) -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Palaeo Curve v{} startet...", env!("CARGO_PKG_VERSION"));

        let cli = CliArgs::parse(args)?;
        let mut options = CurveOptions::load_from_file(&cli.options_path);
        if let Some(probes) = cli.probes {
            options.probe_number = probes;
        }
        if cli.save_options {
            options.save_to_file(&cli.options_path)?;
        }

        let chain = Self::build_chain(&options, cli.points)?;
        let analysis = CurveAnalysis::from_chain(&chain);
        for max in analysis.visible_maxima(&options) {
            log::info!(
                "Maximale Krümmung κ = {:.5} bei ({:.2}, {:.2}) → {}",
                max.kappa,
                max.position.x,
                max.position.y,
                max.label()
            );
        }

        let json = serde_json::to_string_pretty(&analysis)
            .context("Auswertung konnte nicht serialisiert werden")?;
        println!("{json}");
        Ok(())
    }

    /// Baut das Segment über denselben Klick-Ablauf wie die interaktive Sitzung.
    fn build_chain(options: &CurveOptions, points: [DVec2; 4]) -> anyhow::Result<SegmentChain> {
        let [start, control1, control2, end] = points;
        let mut chain = SegmentChain::new(options.geometry());
        for pos in [start, control1, end, control2] {
            chain.place_point(pos);
        }
        if chain.is_empty() {
            bail!("Segment konnte nicht aufgebaut werden");
        }
        Ok(chain)
    }
}
