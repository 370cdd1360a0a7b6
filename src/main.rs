use anyhow::{Context, Result};
use c25519::{
    curve25519, Curve, Curve25519, FieldBytes, MontgomeryLadder, Point, ScalarBytes, X25519Ladder,
};
use clap::{Parser, Subcommand};
use log::warn;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

/// curve25519 point arithmetic.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alternative config file location, default to ~/.config/c25519/config.toml
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether (x, y) lies on the curve.
    OnCurve { x: BigInt, y: BigInt },
    /// Add two distinct points.
    Add {
        x1: BigInt,
        y1: BigInt,
        x2: BigInt,
        y2: BigInt,
    },
    /// Double a point.
    Double { x: BigInt, y: BigInt },
    /// u-coordinate of k*(x, y); k is little-endian hex.
    Mul {
        x: BigInt,
        y: BigInt,
        scalar: String,
        /// Refuse points that are not on the curve.
        #[arg(long)]
        check: bool,
    },
    /// u-coordinate of k*G; k is little-endian hex.
    BaseMul { scalar: String },
    /// Full point for a u-coordinate.
    Recover {
        u: BigInt,
        /// Pick the odd v.
        #[arg(long)]
        odd: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LadderKind {
    #[default]
    Dalek,
    X25519,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Decimal,
    /// 32-byte little-endian hex.
    Hex,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ladder: LadderKind,
    pub format: OutputFormat,
}

fn default_config_path() -> PathBuf {
    let home_path = env::var("HOME").unwrap_or("/".to_owned());
    let full_path = Path::new(&home_path);
    #[cfg(target_os = "windows")]
    let full_path = full_path.join("c25519/");
    #[cfg(not(target_os = "windows"))]
    let full_path = full_path.join(".config/c25519/");
    full_path.join("config.toml")
}

fn load_config(path: Option<String>) -> Result<Config> {
    let full_path = match path {
        Some(p) => PathBuf::from(p),
        None => {
            let p = default_config_path();
            if !p.is_file() {
                warn!("no config at {}, using defaults", p.display());
                return Ok(Config::default());
            }
            p
        }
    };
    let config = fs::read_to_string(&full_path)
        .with_context(|| format!("failed to read {}", full_path.display()))?;
    toml::from_str(&config).with_context(|| format!("invalid config {}", full_path.display()))
}

fn parse_scalar(s: &str) -> Result<ScalarBytes> {
    let bytes = hex::decode(s).context("scalar must be hex")?;
    Ok(ScalarBytes::try_from(&bytes[..])?)
}

fn show(n: &BigInt, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Decimal => n.to_string(),
        OutputFormat::Hex => {
            let n = n.to_biguint().context("negative coordinate")?;
            hex::encode(<[u8; 32]>::from(FieldBytes::try_from(&n)?))
        }
    })
}

fn show_point(point: &Point, format: OutputFormat) -> Result<String> {
    match point.coordinates() {
        None => Ok("infinity".to_owned()),
        Some((x, y)) => Ok(format!("{} {}", show(x, format)?, show(y, format)?)),
    }
}

fn run<L: MontgomeryLadder>(
    curve: &Curve25519<L>,
    command: Command,
    format: OutputFormat,
) -> Result<String> {
    match command {
        Command::OnCurve { x, y } => Ok(curve.is_on_curve(&Point::affine(x, y)).to_string()),
        Command::Add { x1, y1, x2, y2 } => {
            let sum = curve.add(&Point::affine(x1, y1), &Point::affine(x2, y2))?;
            show_point(&sum, format)
        }
        Command::Double { x, y } => show_point(&curve.double(&Point::affine(x, y))?, format),
        Command::Mul { x, y, scalar, check } => {
            let point = Point::affine(x, y);
            let k = parse_scalar(&scalar)?;
            let out = if check {
                curve.checked_scalar_mult(&point, &k)?
            } else {
                curve.scalar_mult(&point, &k)
            };
            show(&out.u, format)
        }
        Command::BaseMul { scalar } => show(&curve.scalar_base_mult(&parse_scalar(&scalar)?).u, format),
        Command::Recover { u, odd } => show_point(&curve.recover_v(&u, odd)?, format),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config)?;
    let out = match config.ladder {
        LadderKind::Dalek => run(curve25519(), args.command, config.format)?,
        LadderKind::X25519 => run(
            &Curve25519::with_ladder(X25519Ladder)?,
            args.command,
            config.format,
        )?,
    };
    println!("{}", out);
    Ok(())
}

#[test]
fn test_config() {
    let config: Config = toml::from_str("ladder = \"x25519\"\nformat = \"hex\"").unwrap();
    assert_eq!(config.ladder, LadderKind::X25519);
    assert_eq!(config.format, OutputFormat::Hex);
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.ladder, LadderKind::Dalek);
    assert_eq!(config.format, OutputFormat::Decimal);
}

#[test]
fn test_run_commands() {
    let curve = curve25519();
    let out = run(curve, Command::BaseMul { scalar: "01".to_owned() }, OutputFormat::Decimal);
    assert_eq!(out.unwrap(), "9");
    let out = run(curve, Command::BaseMul { scalar: "01".to_owned() }, OutputFormat::Hex);
    assert_eq!(out.unwrap(), format!("09{}", "00".repeat(31)));
    let too_long = "00".repeat(33);
    assert!(run(curve, Command::BaseMul { scalar: too_long }, OutputFormat::Decimal).is_err());
    let g = curve.params().generator();
    let (x, y) = g.coordinates().unwrap();
    let out = run(curve, Command::OnCurve { x: x.clone(), y: y.clone() }, OutputFormat::Decimal);
    assert_eq!(out.unwrap(), "true");
    let out = run(curve, Command::Add { x1: x.clone(), y1: y.clone(), x2: x.clone(), y2: y.clone() }, OutputFormat::Decimal);
    assert!(out.is_err());
}
