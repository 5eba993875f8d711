use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sketchboard::Config;
use sketchboard::export::{self, ExportDestination, FileSaveConfig};
use sketchboard::input::InputState;
use sketchboard::script::{ReplayOptions, Script};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version, about = "Raster whiteboard with undo history and brush stamps")]
struct Cli {
    /// Use this config file instead of ~/.config/sketchboard/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded input script onto a fresh canvas
    Replay {
        /// TOML script with [[events]]
        script: PathBuf,

        /// Write the final canvas to this PNG file
        #[arg(long, short = 'o', value_name = "PNG")]
        output: Option<PathBuf>,

        /// Save the final canvas into the configured export directory
        #[arg(long, action = ArgAction::SetTrue)]
        save: bool,

        /// Copy the final canvas to the clipboard
        #[arg(long, action = ArgAction::SetTrue)]
        copy: bool,

        /// Accept every confirmation prompt (reset, exit) automatically
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,

        /// Override the canvas width
        #[arg(long, value_name = "PX")]
        width: Option<i32>,

        /// Override the canvas height
        #[arg(long, value_name = "PX")]
        height: Option<i32>,

        /// Keep transparency instead of flattening onto the export background
        #[arg(long, action = ArgAction::SetTrue)]
        transparent: bool,
    },
    /// Write the documented default config file
    InitConfig,
    /// Print the effective configuration as TOML
    PrintConfig,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            script,
            output,
            save,
            copy,
            yes,
            width,
            height,
            transparent,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            let script = Script::load(&script)?;

            script.apply_canvas_overrides(&mut config);
            if let Some(width) = width {
                config.canvas.width = width;
            }
            if let Some(height) = height {
                config.canvas.height = height;
            }
            if transparent {
                config.canvas.transparent_export = true;
            }
            config.validate_and_clamp();

            let mut state =
                InputState::from_config(&config).context("Failed to start drawing session")?;
            let summary = script.apply(&mut state, ReplayOptions { auto_confirm: yes });

            for png in &summary.copy_requests {
                if let Err(err) = export::clipboard::copy_to_clipboard(png) {
                    log::warn!("Copy image failed: {err}");
                }
            }

            if let Some(pending) = state.pending_confirmation() {
                log::warn!("Script ended with an unanswered {pending:?} confirmation");
            }

            println!(
                "Replayed {} events: {} history entries",
                summary.events_applied,
                state.history().len()
            );

            let destination = ExportDestination::from_flags(copy, save);
            if output.is_none() && destination.is_none() {
                if state.has_unsaved_history() {
                    log::warn!(
                        "Discarding {} unsaved history entries; pass --output, --save or --copy to keep the drawing",
                        state.history().len()
                    );
                }
                return Ok(());
            }

            let png = state
                .export_png()
                .context("Failed to encode canvas as PNG")?;

            if let Some(path) = output {
                export::file::write_png(&png, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Saved {}", path.display());
            }

            if let Some(destination) = destination {
                let file_config = FileSaveConfig::from(&config.export);
                match export::export_png(&png, destination, &file_config) {
                    Ok(result) => {
                        if let Some(path) = result.saved_path {
                            println!("Saved {}", path.display());
                        }
                        if result.copied_to_clipboard {
                            println!("Copied image to clipboard");
                        }
                    }
                    Err(err) => log::error!("Export failed: {err}"),
                }
            }
        }
        Command::InitConfig => {
            let path = Config::create_default_file()?;
            println!("Wrote default config to {}", path.display());
        }
        Command::PrintConfig => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
