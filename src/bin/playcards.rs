use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "playcards", version)]
struct Cli {
    /// Log debug details.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render cards, histogram and box art from a playlist JSON.
    Generate(GenerateArgs),
    /// Build a playlist JSON from saved Spotify playlist-track pages.
    Import(ImportArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input playlist JSON.
    #[arg(long, default_value = "./playlist.json")]
    playlist_json: PathBuf,

    /// Output directory.
    #[arg(long, default_value = "./build")]
    output_directory: PathBuf,

    /// Render config JSON (colors, sizes, fonts).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file; overrides the config's font_source.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Delete the output directory and everything in it before rendering.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Render cards in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Saved Spotify API response (playlist object or tracks page), in playlist order.
    #[arg(long = "page", required = true)]
    pages: Vec<PathBuf>,

    /// Playlist name; defaults to the name in the first full playlist object.
    #[arg(long)]
    name: Option<String>,

    /// Output playlist JSON.
    #[arg(long, default_value = "./playlist.json")]
    playlist_json: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Import(args) => cmd_import(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &GenerateArgs) -> anyhow::Result<playcards::RenderConfig> {
    let mut def = match &args.config {
        Some(path) => playcards::RenderConfigDef::from_path(path)
            .with_context(|| format!("load render config '{}'", path.display()))?,
        None => playcards::RenderConfigDef::default(),
    };
    if let Some(font) = &args.font {
        def.font_source = Some(font.clone());
    }
    Ok(playcards::RenderConfig::from_def(def)?)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let playlist = playcards::Playlist::from_path(&args.playlist_json)
        .with_context(|| format!("load playlist '{}'", args.playlist_json.display()))?;
    let config = load_config(&args)?;

    let opts = playcards::GenerateOpts {
        overwrite: args.overwrite,
        parallel: args.parallel,
        threads: args.threads,
    };
    let report = playcards::generate(&playlist, &config, &args.output_directory, opts)
        .with_context(|| format!("generate into '{}'", args.output_directory.display()))?;

    for w in &report.overflow {
        eprintln!("warning: {w}");
    }
    eprintln!(
        "wrote {} files for {} tracks to {}",
        report.files.len(),
        playlist.tracks().len(),
        args.output_directory.display()
    );
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let mut name = args.name.clone();
    let mut tracks = Vec::new();
    for path in &args.pages {
        let page = playcards::SpotifyPage::from_path(path)
            .with_context(|| format!("import page '{}'", path.display()))?;
        if name.is_none() {
            name = page.playlist_name.clone();
        }
        tracing::debug!(
            page = %path.display(),
            tracks = page.tracks.len(),
            skipped = page.skipped,
            "imported page"
        );
        tracks.extend(page.tracks);
    }

    let name = name.context("no playlist name: pass --name or a full playlist object")?;
    let playlist = playcards::Playlist::new(name, tracks);
    save_playlist(&playlist, &args.playlist_json)?;

    eprintln!(
        "wrote {} ({} tracks)",
        args.playlist_json.display(),
        playlist.tracks().len()
    );
    Ok(())
}

fn save_playlist(playlist: &playcards::Playlist, path: &Path) -> anyhow::Result<()> {
    playlist
        .save(path)
        .with_context(|| format!("write playlist '{}'", path.display()))
}
