use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

mod commands;

#[derive(Parser)]
#[command(name = "incidence-cli")]
#[command(about = "Inspect point/line configurations and their matroids")]
struct Cmd {
    /// Decimals kept when grouping coincident positions
    #[arg(long, default_value_t = 1)]
    position_decimals: u32,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print matroid statistics of a compact JSON configuration
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Print what a cursor position snaps to
    Snap {
        #[arg(long)]
        input: String,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        /// Screen pixels per plane unit
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        #[arg(long)]
        point_px: Option<f64>,
        #[arg(long)]
        intersection_px: Option<f64>,
        #[arg(long)]
        line_px: Option<f64>,
    },
    /// Decode, recompute clusters and re-encode a configuration
    Normalize {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Write a random configuration
    Random {
        #[arg(long, default_value_t = 4)]
        lines: usize,
        #[arg(long, default_value_t = 8)]
        points: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let inc = incidence::IncidenceCfg {
        position_decimals: cmd.position_decimals,
        ..Default::default()
    };
    match cmd.action {
        Action::Stats { input } => {
            let report = commands::stats(&input, inc)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Action::Snap {
            input,
            x,
            y,
            scale,
            point_px,
            intersection_px,
            line_px,
        } => {
            let mut snap = incidence::api::SnapCfg::default();
            if let Some(px) = point_px {
                snap.point_px = px;
            }
            if let Some(px) = intersection_px {
                snap.intersection_px = px;
            }
            if let Some(px) = line_px {
                snap.line_px = px;
            }
            let target = commands::snap(&input, inc, x, y, scale, &snap)?;
            println!("{}", serde_json::to_string_pretty(&target)?);
        }
        Action::Normalize { input, out } => commands::normalize(&input, &out, inc)?,
        Action::Random {
            lines,
            points,
            seed,
            index,
            out,
        } => commands::random(lines, points, seed, index, &out, inc)?,
    }
    Ok(())
}
