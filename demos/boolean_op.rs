//! Runs a boolean operation on geometries read from a YAML file.
//!
//! The input file looks like
//!
//! ```yaml
//! subject:
//!   type: Polygon
//!   coordinates: [[[0, 0], [4, 0], [4, 4], [0, 4]]]
//! clippings:
//!   - type: MultiPolygon
//!     coordinates: [[[[2, 2], [6, 2], [6, 6], [2, 6]]]]
//! ```
//!
//! Set `RUST_LOG=sweepclip=debug` to see what the engine is doing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use sweepclip::{boolean_op_multi_with_config, to_bez_path, BooleanOp, Config, Geometry};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Op {
    Union,
    Intersection,
    Difference,
    Xor,
}

impl From<Op> for BooleanOp {
    fn from(op: Op) -> Self {
        match op {
            Op::Union => BooleanOp::Union,
            Op::Intersection => BooleanOp::Intersection,
            Op::Difference => BooleanOp::Difference,
            Op::Xor => BooleanOp::Xor,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum Format {
    /// The result as a YAML geometry.
    #[default]
    Yaml,
    /// The result as SVG path data.
    Svg,
}

#[derive(Parser)]
struct Cli {
    /// A YAML file with a `subject` geometry and a list of `clippings`.
    input: PathBuf,

    #[arg(long, value_enum)]
    op: Op,

    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// A YAML file overriding the default resource limits.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Input {
    subject: Geometry,
    #[serde(default)]
    clippings: Vec<Geometry>,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let input: Input = serde_yaml::from_str(&std::fs::read_to_string(&args.input)?)?;
    let config: Config = match &args.config {
        Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let op = BooleanOp::from(args.op);
    let subject = input.subject.polygons()?;
    let clippings = input
        .clippings
        .iter()
        .map(Geometry::polygons)
        .collect::<Result<Vec<_>, _>>()?;

    let result = boolean_op_multi_with_config(op, subject, &clippings, &config)?;
    tracing::info!(polygons = result.len(), "done");

    match args.format {
        Format::Yaml => match Geometry::from_result(result) {
            Some(geometry) => print!("{}", serde_yaml::to_string(&geometry)?),
            None => println!("null"),
        },
        Format::Svg => println!("{}", to_bez_path(&result).to_svg()),
    }
    Ok(())
}
