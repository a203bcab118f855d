use clap::Parser;
use log::{error, info};
use sorted_export::{ExportFormat, ExporterConfig, PackExporter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "sorted-export",
    version,
    about = "Export your Sorted recipe packs into a Paprika recipe archive"
)]
struct Args {
    /// Your sorted.club username
    #[arg(long, env = "SORTED_USERNAME")]
    username: String,

    /// Your sorted.club password
    #[arg(long, env = "SORTED_PASSWORD", hide_env_values = true)]
    password: String,

    /// Destination folder for the recipe archive
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Serving count to export quantities and steps for
    #[arg(long)]
    servings: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => {
            info!("Sorted export finished successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ExporterConfig::load()?;

    let mut builder = PackExporter::builder()
        .config(config)
        .username(args.username)
        .password(args.password);
    if let Some(dest) = args.dest {
        builder = builder.destination(dest);
    }
    if let Some(format) = args.format {
        builder = builder.format(format);
    }
    if let Some(servings) = args.servings {
        builder = builder.target_servings(servings);
    }

    let summary = builder.build()?.run()?;
    info!(
        "Exported {} recipes from {} packs",
        summary.recipes, summary.packs
    );
    println!("{}", summary.archive.display());
    Ok(())
}
