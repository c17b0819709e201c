use clap::{CommandFactory, Parser, Subcommand};
use library_cover::imaging::{BlendWeights, CosmicTextRenderer, RustBackend};
use library_cover::{config, cover, fonts, logging, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "library-cover")]
#[command(about = "Generate Jellyfin/Emby-style library cover images")]
#[command(long_about = "\
Generate Jellyfin/Emby-style library cover images

Each cover is the source photo stretched to 960x540, darkened with a black
overlay, and titled in the center with the library name. Covers are written
next to the source as '<name> (Cover).<ext>' unless --destination is given.

Example:

  library-cover cover create --image movies.jpg shows.png --title Movies Shows

Run 'library-cover gen-config' to generate a documented library-cover.toml.")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ./library-cover.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Library cover commands
    Cover {
        #[command(subcommand)]
        action: Option<CoverCommand>,
    },
    /// Check that the title font loads and text shaping is available
    Check,
    /// Print a stock library-cover.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum CoverCommand {
    /// Create covers from image/title pairs
    Create(CreateArgs),
}

#[derive(clap::Args)]
struct CreateArgs {
    /// Background images, one per title
    #[arg(long, num_args = 1.., required = true)]
    image: Vec<PathBuf>,

    /// Library titles, one per image, in the same order
    #[arg(long, num_args = 1.., required = true)]
    title: Vec<String>,

    /// Directory for the covers (default: next to each image)
    #[arg(long)]
    destination: Option<PathBuf>,

    /// Overlay darkness from 0 to 1; the photo keeps the remaining weight
    #[arg(long, allow_negative_numbers = true)]
    shadow: Option<f32>,
}

/// Help screens reachable without a runnable command.
enum HelpTopic {
    Root,
    Cover,
}

fn print_help(topic: HelpTopic) -> std::io::Result<()> {
    let mut root = Cli::command();
    root.build();
    match topic {
        HelpTopic::Root => root.print_help(),
        HelpTopic::Cover => match root.find_subcommand_mut("cover") {
            Some(cmd) => cmd.print_help(),
            None => root.print_help(),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Encountered an error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        None => print_help(HelpTopic::Root)?,
        Some(Command::Cover { action: None }) => print_help(HelpTopic::Cover)?,
        Some(Command::Cover {
            action: Some(CoverCommand::Create(args)),
        }) => {
            // Pairing and naming are checked before any file is read.
            let jobs = cover::plan_covers(&args.image, &args.title, args.destination.as_deref())?;

            let config = load_config(cli.config)?;
            let weights = match args.shadow {
                Some(shadow) => {
                    BlendWeights::from_foreground(shadow).with_bias(config.overlay.bias)
                }
                None => config.blend_weights(),
            };

            let font = fonts::resolve_font(&config.text, &fonts::default_search_roots())?;
            let mut renderer = CosmicTextRenderer::from_file(&font)?;

            cover::create_covers(
                &RustBackend::new(),
                &mut renderer,
                &jobs,
                weights,
                &config,
                output::print_cover_event,
            )?;
        }
        Some(Command::Check) => {
            let config = load_config(cli.config)?;
            let caps = fonts::probe(&config.text, &fonts::default_search_roots());
            output::print_capabilities(&caps);
            if let Err(e) = caps.font {
                return Err(e.into());
            }
        }
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<config::CoverConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    Ok(config::load_config(path.as_deref(), &cwd)?)
}
