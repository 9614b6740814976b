use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bingo-board", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known boards and the layers each one draws.
    Boards,
    /// Render a board as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Board identifier, e.g. `fullybooked25`.
    #[arg(long)]
    board: String,

    /// JSON file holding the cell list.
    #[arg(long)]
    cells: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Asset directory (templates, icons, font). Defaults to `BINGO_ASSETS_DIR` or `assets`.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Font file name inside the asset directory.
    #[arg(long)]
    font: Option<String>,

    /// Per-cover HTTP timeout in seconds.
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Print the family name of the loaded font.
    #[arg(long)]
    dump_font: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Boards => cmd_boards(),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_boards() -> anyhow::Result<()> {
    let registry = bingo_board::BoardConfigRegistry::builtin();
    for family in registry.families() {
        let cfg = family.configure(bingo_board::GRID_CELLS);
        let f = cfg.features();
        let mut layers = Vec::new();
        if f.show_stars {
            layers.push("stars");
        }
        if f.show_hard_mode {
            layers.push("hard-mode");
        }
        if f.show_cell_title {
            layers.push("titles");
        }
        if f.show_prompt_label {
            layers.push("labels");
        }
        if family.extra.is_some() {
            layers.push("extra-entries");
        }
        println!(
            "{:<14} {}x{}  {}",
            family.board_id,
            cfg.canvas.width,
            cfg.canvas.height,
            layers.join(", ")
        );
    }
    Ok(())
}

fn read_cells(path: &Path) -> anyhow::Result<Vec<bingo_board::PromptCell>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read cells '{}'", path.display()))?;
    let cells = bingo_board::parse_cells(&json)
        .with_context(|| format!("parse cells '{}'", path.display()))?;
    Ok(cells)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cells = read_cells(&args.cells)?;

    let mut opts = bingo_board::RendererOpts::from_env();
    if let Some(dir) = args.assets {
        opts.assets_root = dir;
    }
    if let Some(font) = args.font {
        opts.font_file = font;
    }

    let fetcher = bingo_board::HttpCoverFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let renderer = bingo_board::BoardRenderer::new(opts.clone(), Arc::new(fetcher));

    if args.dump_font {
        let bytes = renderer
            .assets()
            .font(&opts.font_file)
            .with_context(|| format!("load font '{}'", opts.font_file))?;
        let shaper = bingo_board::TextShaper::new(&bytes)?;
        eprintln!("font: {} ({} bytes)", shaper.family_name(), bytes.len());
    }

    let png = renderer
        .render_board(&args.board, &cells)
        .with_context(|| format!("render board '{}'", args.board))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
