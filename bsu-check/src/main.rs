use anyhow::{Context, Result, anyhow};
use bsu::{Flags, Width, evaluate, evaluate_double};
use bsu_check::config::parse_hex;
use bsu_check::decode::parse_bytes;
use bsu_check::{Config, ShiftKind, decode_shift, sweep};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bsu-check")]
#[command(about = "Evaluate x86 shifts and rotates and cross-check them against the host CPU")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single shift, rotate or double shift
    Eval {
        /// Operand width in bits (8, 16, 32 or 64)
        #[arg(long, default_value_t = 32)]
        width: u32,

        /// Mnemonic: rol, ror, rcl, rcr, shl, shr, sal, sar, shld or shrd
        #[arg(long)]
        op: String,

        /// Destination value (hex)
        #[arg(long, default_value = "0")]
        value: String,

        /// Source value for shld/shrd (hex)
        #[arg(long, default_value = "0")]
        source: String,

        /// Raw count; masking is applied by the engine
        #[arg(long)]
        count: u64,

        /// Incoming RFLAGS image (hex)
        #[arg(long, default_value = "0")]
        flags: String,
    },

    /// Decode an encoded instruction and evaluate it
    Decode {
        /// Instruction bytes, e.g. "48 0f a4 d8 04"
        bytes: String,

        /// Destination value (hex)
        #[arg(long, default_value = "0")]
        value: String,

        /// Source register value for shld/shrd (hex)
        #[arg(long, default_value = "0")]
        source: String,

        /// CL, used when the count comes from a register
        #[arg(long, default_value_t = 0)]
        cl: u8,

        /// Incoming RFLAGS image (hex)
        #[arg(long, default_value = "0")]
        flags: String,
    },

    /// Compare the engine with native execution over the boundary number set
    Sweep {
        /// Sweep configuration (TOML); defaults cover every width and operation
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a sample sweep configuration and exit
    SampleConfig {
        /// Destination path
        path: PathBuf,
    },
}

fn setup_logging() -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("bsu_check=info".parse()?))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Eval {
            width,
            op,
            value,
            source,
            count,
            flags,
        } => {
            let width = Width::try_from(width)?;
            let kind: ShiftKind = op.parse()?;
            let value = parse_hex(&value)?;
            let source = parse_hex(&source)?;
            let mut flags = Flags::from_bits_retain(parse_hex(&flags)?);

            let result = match kind {
                ShiftKind::Single(op) => evaluate(width, op, value, count, &mut flags),
                ShiftKind::Double(direction) => {
                    evaluate_double(width, value, source, count, direction, &mut flags)
                }
            };
            print_outcome(&format!("{} {} {:#x}, {}", kind, width, value, count), result, flags);
        }
        Command::Decode {
            bytes,
            value,
            source,
            cl,
            flags,
        } => {
            let bytes = parse_bytes(&bytes)?;
            let decoded = decode_shift(&bytes)?;
            let value = parse_hex(&value)?;
            let source = parse_hex(&source)?;
            let mut flags = Flags::from_bits_retain(parse_hex(&flags)?);

            info!("Decoded: {} ({} operand)", decoded.text, decoded.width);
            let result = decoded.execute(value, source, cl, &mut flags);
            print_outcome(&decoded.text, result, flags);
        }
        Command::Sweep { config } => {
            let config = match &config {
                Some(path) => {
                    let config = Config::load_from_file(path)?;
                    info!("Loaded sweep configuration from: {:?}", path);
                    config
                }
                None => Config::default(),
            };

            let report = sweep(&config).context("Sweep could not run")?;
            println!(
                "{} cases checked, {} skipped as undefined",
                report.cases, report.skipped
            );

            if !report.passed() {
                for mismatch in &report.mismatches {
                    println!("  {}", mismatch);
                }
                if report.truncated {
                    println!("  (stopped after {} mismatches)", config.max_mismatches);
                }
                error!("{} mismatches against native execution", report.mismatches.len());
                return Err(anyhow!(
                    "{} mismatches against native execution",
                    report.mismatches.len()
                ));
            }
            println!("All defined outputs match native execution");
        }
        Command::SampleConfig { path } => {
            info!("Generating sample configuration at: {:?}", path);
            let sample_config = Config::create_sample();
            sample_config.save_to_file(&path)?;
            println!("Sample configuration saved to: {:?}", path);
        }
    }

    Ok(())
}

fn print_outcome(what: &str, result: u64, flags: Flags) {
    let flag = |f: Flags, name: &'static str| if flags.contains(f) { name } else { "-" };
    println!("{}", what);
    println!("  result = {:#x}", result);
    println!(
        "  flags  = {:#x} [{} {} {} {} {} {}]",
        flags.bits(),
        flag(Flags::OF, "OF"),
        flag(Flags::SF, "SF"),
        flag(Flags::ZF, "ZF"),
        flag(Flags::AF, "AF"),
        flag(Flags::PF, "PF"),
        flag(Flags::CF, "CF"),
    );
}
