use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use modem_lab::config::DEFAULT_BIT_COUNT;
use modem_lab::utils::logging::init_logging;
use modem_lab::{
    aligned_bit_count, generate_bits_entropy, generate_bits_seeded, simulate, symbol_rows,
    ModulationScheme, WaveformParameters,
};

#[derive(Parser)]
#[command(author, version, about = "Modulate, add noise, and demodulate a random bit stream", long_about = None)]
struct Cli {
    /// ASK, FSK, BPSK, QPSK or QAM16
    #[arg(short, long, default_value = "BPSK")]
    scheme: ModulationScheme,
    /// Requested bit count, rounded down to whole symbols
    #[arg(short, long, default_value_t = DEFAULT_BIT_COUNT)]
    bits: usize,
    /// Seed for the bit stream; entropy when absent
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 0)]
    noise_seed: u64,
    /// JSON file with waveform parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    carrier_hz: Option<f64>,
    #[arg(long)]
    symbol_rate: Option<f64>,
    #[arg(long)]
    samples_per_symbol: Option<usize>,
    #[arg(long)]
    amplitude: Option<f64>,
    #[arg(long)]
    fsk_deviation_hz: Option<f64>,
    /// Noise standard deviation
    #[arg(short, long)]
    noise: Option<f64>,
    /// Dump the whole simulation as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn parameters(&self) -> Result<WaveformParameters, Box<dyn Error>> {
        let mut params = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => WaveformParameters::default(),
        };

        if let Some(v) = self.carrier_hz {
            params.carrier_hz = v;
        }
        if let Some(v) = self.symbol_rate {
            params.symbol_rate = v;
        }
        if let Some(v) = self.samples_per_symbol {
            params.samples_per_symbol = v;
        }
        if let Some(v) = self.amplitude {
            params.amplitude = v;
        }
        if let Some(v) = self.fsk_deviation_hz {
            params.fsk_deviation_hz = v;
        }
        if let Some(v) = self.noise {
            params.noise_std_dev = v;
        }

        params.validate()?;
        Ok(params)
    }
}

fn fmt_iq(p: Option<(f64, f64)>) -> String {
    match p {
        Some((i, q)) => format!("({:+.3}, {:+.3})", i, q),
        None => "-".to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let params = cli.parameters()?;
    let n = aligned_bit_count(cli.bits, cli.scheme);
    let bits = match cli.seed {
        Some(seed) => generate_bits_seeded(n, seed)?,
        None => generate_bits_entropy(n)?,
    };

    let sim = simulate(&bits, cli.scheme, &params, cli.noise_seed)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sim)?);
        return Ok(());
    }

    tracing::info!(
        "{}: {} bits, {} symbols, Fs={:.1} Hz, noise σ={}",
        cli.scheme,
        sim.bits.len(),
        sim.waveform.symbol_count,
        params.sample_rate(),
        params.noise_std_dev
    );

    println!("{:>4}  {:<5} {:>18} {:>18} {:>9}", "k", "bits", "ideal", "estimated", "tone Hz");
    for row in symbol_rows(&sim.bits, &sim.waveform, &sim.estimated_iq) {
        let tone = row.tone_hz.map(|f| format!("{:.1}", f)).unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<5} {:>18} {:>18} {:>9}",
            row.index,
            row.bits,
            fmt_iq(row.ideal.map(|p| p.as_tuple())),
            fmt_iq(row.estimated.map(|p| p.as_tuple())),
            tone
        );
    }

    match sim.errors {
        Some(errors) => tracing::info!(
            "bit errors {}/{} (BER {:.4}), symbol errors {}/{} (SER {:.4}), MER {:.1} dB",
            errors.bit_errors,
            errors.bits,
            errors.bit_error_rate(),
            errors.symbol_errors,
            errors.symbols,
            errors.symbol_error_rate(),
            sim.mer_db.unwrap_or(f64::INFINITY)
        ),
        None => tracing::info!("no coherent I/Q estimate for {}", cli.scheme),
    }

    Ok(())
}
