use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use bubbleplan::designer::{aggregate_zones, zone_totals, ZoneScope};
use bubbleplan::{
    default_config_path, export_document, export_options, init_logging, load_from_file, zone_palette,
    Config, ExportFormat, BUILD_DATE, VERSION,
};
use bubbleplan_core::format_area;

#[derive(Parser, Debug)]
#[command(name = "bubbleplan", version = VERSION, about = "Bubble-diagram space planner")]
struct Cli {
    /// Configuration file (JSON or TOML); defaults to the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export one floor of a snapshot
    Export {
        snapshot: PathBuf,
        /// svg, dxf, png, jpeg, json or pdf-layout
        #[arg(short, long, default_value = "svg")]
        format: ExportFormat,
        /// Floor index; the snapshot's current floor when omitted
        #[arg(long)]
        floor: Option<usize>,
        /// Output file; derived from the snapshot name when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print zone areas of a snapshot
    Summary {
        snapshot: PathBuf,
        #[arg(long)]
        floor: Option<usize>,
        /// Count unplaced spaces too
        #[arg(long)]
        all: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => return Config::load_from_file(p).with_context(|| format!("Failed to load {}", p.display())),
        None => default_config_path().context("Failed to locate config directory")?,
    };
    Config::load_or_default(&path).with_context(|| format!("Failed to load {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!("bubbleplan {} (built {})", VERSION, BUILD_DATE);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Export {
            snapshot,
            format,
            floor,
            out,
        } => {
            let (doc, report) = load_from_file(&snapshot)?;
            if !report.is_clean() {
                warn!(
                    "Snapshot loaded with {} rejected rooms, {} dropped connections and {} settings reset",
                    report.rejected_rooms.len(),
                    report.dropped_connections,
                    report.settings_warnings.len()
                );
            }

            let options = export_options(&config.export, floor);
            let artifact = export_document(&doc, format, &options, &zone_palette(&config))?;

            let out = out.unwrap_or_else(|| {
                let stem = snapshot
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("plan");
                snapshot.with_file_name(artifact.file_name(stem))
            });
            if out == snapshot {
                bail!("Refusing to overwrite the input snapshot {}", snapshot.display());
            }
            std::fs::write(&out, &artifact.bytes)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("{}", out.display());

            config.add_recent_file(snapshot);
            if cli.config.is_none() {
                if let Err(e) = default_config_path().and_then(|p| config.save_to_file(&p)) {
                    warn!("Could not update recent files: {}", e);
                }
            }
        }
        Command::Summary {
            snapshot,
            floor,
            all,
        } => {
            let (doc, _) = load_from_file(&snapshot)?;
            let floor = floor.unwrap_or_else(|| doc.current_floor());
            let scope = if all { ZoneScope::All } else { ZoneScope::Placed };
            let zones = aggregate_zones(&doc, floor, scope);
            let totals = zone_totals(&zones);

            println!("{:<20} {:>7} {:>12} {:>12} {:>12}", "Zone", "Spaces", "Net", "Circulation", "Gross");
            for zone in &zones {
                println!(
                    "{:<20} {:>7} {:>12} {:>12} {:>12}",
                    zone.zone,
                    zone.space_ids.len(),
                    format_area(zone.net_area),
                    format_area(zone.circulation_area),
                    format_area(zone.gross_area)
                );
            }
            println!(
                "{:<20} {:>7} {:>12} {:>12} {:>12}",
                "Total",
                totals.space_count,
                format_area(totals.net_area),
                format_area(totals.circulation_area),
                format_area(totals.gross_area)
            );
        }
    }

    Ok(())
}
