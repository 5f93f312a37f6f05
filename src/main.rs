use clap::{Parser, Subcommand};
use zypper_docker::commands::*;
use zypper_docker::core::{error::Result, print_error};
use std::env;

#[derive(Parser)]
#[command(name = "zypper-docker")]
#[command(about = "Patch and update SUSE based docker images with zypper")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all the SUSE based images
    Images {
        /// Ignore the cache and probe every image again
        #[arg(short, long)]
        force: bool,
    },
    /// List all the available updates for the given image
    #[command(name = "list-updates", visible_alias = "lu")]
    ListUpdates {
        /// Image to inspect
        image: String,
    },
    /// List all the available patches for the given image
    #[command(name = "list-patches", visible_alias = "lp")]
    ListPatches {
        /// Image to inspect
        image: String,
        #[command(flatten)]
        filters: PatchFilters,
    },
    /// Install all the available updates and commit the result as a new image
    #[command(visible_alias = "up")]
    Update(UpgradeArgs),
    /// Install all the available patches and commit the result as a new image
    Patch {
        #[command(flatten)]
        args: UpgradeArgs,
        #[command(flatten)]
        filters: PatchFilters,
    },
    /// List running containers based on images that have been upgraded since
    Ps,
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag, RUST_LOG wins when set
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.command) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Images { force } => execute_images(force),
        Commands::ListUpdates { image } => execute_list_updates(&image),
        Commands::ListPatches { image, filters } => execute_list_patches(&image, &filters),
        Commands::Update(args) => execute_update(&args),
        Commands::Patch { args, filters } => execute_patch(&args, &filters),
        Commands::Ps => execute_ps(),
    }
}
