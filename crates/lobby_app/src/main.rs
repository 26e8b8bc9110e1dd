mod cli;
mod config;
mod render;
mod runner;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use lobby_core::AppState;
use lobby_engine::EngineHandle;
use lobby_logging::log::LevelFilter;
use lobby_logging::{lobby_debug, LogDestination};
use render::GalleryJson;
use runner::GalleryRunner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    lobby_logging::initialize(destination, level);

    let file_config = config::load_config(cli.config.as_deref())?;
    let timeline = file_config.timeline();

    match cli.command {
        Commands::Timeline => {
            print!("{}", render::render_timeline(&timeline));
            Ok(())
        }
        Commands::Gallery {
            years,
            all,
            limit,
            omdb_key,
            json,
        } => {
            let years: Vec<i32> = if all {
                timeline.decades().collect()
            } else if years.is_empty() {
                vec![timeline.start()]
            } else {
                years
            };
            if let Some(year) = years.iter().find(|year| !timeline.contains(**year)) {
                bail!(
                    "{year} is not a decade on the timeline ({}-{} every {} years)",
                    timeline.start(),
                    timeline.end(),
                    timeline.step()
                );
            }

            let engine_config = file_config.engine_config(omdb_key, limit);
            let engine = EngineHandle::new(engine_config).context("failed to start engine")?;
            let mut runner = GalleryRunner::new(engine, AppState::with_timeline(timeline));

            let mut views = Vec::with_capacity(years.len());
            for year in years {
                let view = runner.select_year(year)?;
                if view.dirty {
                    views.push(view);
                } else {
                    lobby_debug!("Gallery {} already shown", year);
                }
            }

            if json {
                let galleries: Vec<GalleryJson> =
                    views.iter().filter_map(GalleryJson::from_view).collect();
                println!("{}", serde_json::to_string_pretty(&galleries)?);
            } else {
                for view in &views {
                    println!("{}", render::render_gallery(view));
                }
            }
            Ok(())
        }
    }
}
