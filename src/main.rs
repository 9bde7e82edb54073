//! Main CLI application for the minesweeper solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minesweeper_solver::{
    board::{
        create_example_states, load_view_from_file, save_view_to_file, BoardView, MineBoard,
        Minefield,
    },
    board_from_settings,
    config::{CliOverrides, FirstOpen, OutputFormat, Settings},
    linear,
    solver::{self, RunDisposition, RunOptions, RunSummary},
    utils::{BoardFormatter, ColorOutput},
};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minesweeper_solver")]
#[command(about = "Minesweeper linear constraint solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate or load a board and solve it
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Board columns (overrides config)
        #[arg(long)]
        cols: Option<usize>,

        /// Mine count (overrides config)
        #[arg(short, long)]
        mines: Option<usize>,

        /// Placement seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Mine layout file (overrides config)
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Maximum solve passes (overrides config)
        #[arg(long)]
        max_passes: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First open row (overrides config)
        #[arg(long)]
        first_row: Option<usize>,

        /// First open column (overrides config)
        #[arg(long)]
        first_col: Option<usize>,

        /// Verbose output with per-pass progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and board files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Inspect a board snapshot and report what one pass would conclude
    Analyze {
        /// Board snapshot file
        #[arg(short, long)]
        board: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            rows,
            cols,
            mines,
            seed,
            layout,
            max_passes,
            output,
            first_row,
            first_col,
            verbose,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                mines,
                seed,
                layout_file: layout,
                max_passes,
                output_dir: output,
            };
            solve_command(config, overrides, first_row, first_col, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Analyze { board } => analyze_command(board),
    }
}

fn solve_command(
    config_path: PathBuf,
    cli_overrides: CliOverrides,
    first_row: Option<usize>,
    first_col: Option<usize>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🧨 Starting minesweeper solver"));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    // Apply CLI overrides
    settings.merge_with_cli(&cli_overrides);
    if let Some(row) = first_row {
        settings.board.first_open.row = row;
    }
    if let Some(col) = first_col {
        settings.board.first_open.col = col;
    }

    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Board: {}x{}, {} mines", settings.board.rows, settings.board.cols, settings.board.mines);
        println!("  First open: ({}, {})", settings.board.first_open.row, settings.board.first_open.col);
        println!("  Max passes: {}", settings.solver.max_passes);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    // Build the board and make the first open
    let mut board = board_from_settings(&settings).context("Failed to build board")?;
    let first = settings.board.first_open;
    if first.row >= board.rows() || first.col >= board.cols() {
        anyhow::bail!(
            "First open ({}, {}) out of bounds for {}x{} board",
            first.row, first.col, board.rows(), board.cols()
        );
    }

    println!("{}", ColorOutput::info(&format!(
        "🧮 Solving {}x{} board with {} mines...",
        board.rows(), board.cols(), board.mine_count()
    )));
    if let Some(seed) = board.seed() {
        println!("Placement seed: {}", seed);
    }

    board.open(first.row, first.col);

    let options = RunOptions {
        max_passes: settings.solver.max_passes,
        forced_bypass_retry: settings.solver.forced_bypass_retry,
        keep_trace: settings.output.save_trace,
        verbose,
    };
    let summary = solver::run(&mut board, &options);

    println!();
    match summary.disposition {
        RunDisposition::Solved => println!("{}", ColorOutput::success(&format!(
            "✅ Solved in {} passes ({:.3}s)",
            summary.passes,
            summary.total_time.as_secs_f64()
        ))),
        RunDisposition::Detonated => println!("{}", ColorOutput::error("💥 A mine went off")),
        RunDisposition::Stalled => println!("{}", ColorOutput::warning(
            "❌ No further certain deduction exists"
        )),
        RunDisposition::PassLimit => println!("{}", ColorOutput::warning(&format!(
            "⏱ Pass limit of {} reached", settings.solver.max_passes
        ))),
    }

    println!("\nFinal board:");
    if summary.disposition == RunDisposition::Detonated {
        println!("{}", BoardFormatter::format_view_with_mines(&board.view(), &board.mine_positions()));
    } else {
        println!("{}", BoardFormatter::format_view_compact(&board.view()));
    }
    println!("{}", summary);

    // Save run artifacts
    println!("{}", ColorOutput::info("💾 Saving run artifacts..."));
    save_run_artifacts(&board, &summary, &settings)
        .context("Failed to save run artifacts")?;
    println!("{}", ColorOutput::success(&format!(
        "Artifacts saved to {}", settings.output.output_directory.display()
    )));

    Ok(())
}

fn save_run_artifacts(board: &Minefield, summary: &RunSummary, settings: &Settings) -> Result<()> {
    let dir = &settings.output.output_directory;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    match settings.output.format {
        OutputFormat::Text => {
            save_view_to_file(&board.view(), dir.join("final_board.txt"))?;
            std::fs::write(dir.join("run_summary.txt"), summary.to_string())?;
            if !summary.trace.is_empty() {
                let trace_text: String = summary
                    .trace
                    .iter()
                    .map(|report| report.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                std::fs::write(dir.join("trace.txt"), trace_text)?;
            }
        }
        OutputFormat::Json => {
            let view_json = serde_json::to_string_pretty(&board.view())?;
            std::fs::write(dir.join("final_board.json"), view_json)?;
            summary.save_to_file(dir.join("run_summary.json"))?;
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    // Create directories
    let config_dir = directory.join("config");
    let input_dir = directory.join("input/boards");
    let output_dir = directory.join("output/runs");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings.to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Create example boards
    create_example_states(&input_dir)
        .context("Failed to create example boards")?;
    println!("Created example boards in: {}", input_dir.display());

    // Create example configuration variants
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Expert-sized board
    let mut expert_config = Settings::default();
    expert_config.board.rows = 16;
    expert_config.board.cols = 30;
    expert_config.board.mines = 99;
    expert_config.board.first_open = FirstOpen { row: 8, col: 15 };
    expert_config.to_file(&examples_dir.join("expert.yaml"))?;

    // Reproducible beginner board
    let mut seeded_config = Settings::default();
    seeded_config.board.seed = Some(42);
    seeded_config.output.save_trace = true;
    seeded_config.to_file(&examples_dir.join("seeded.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve --config config/default.yaml");
    println!("3. Inspect positions with: cargo run -- analyze --board input/boards/ring.txt");

    Ok(())
}

fn analyze_command(board_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing board snapshot..."));

    let view = load_view_from_file(&board_path)
        .with_context(|| format!("Failed to load board from {}", board_path.display()))?;

    println!("Board ({}x{}):", view.rows, view.cols);
    println!("{}", BoardFormatter::format_view_with_coords(&view));

    println!("Board statistics:");
    println!("  Revealed: {}", view.revealed_count());
    println!("  Marked: {}", view.marked_count());
    println!("  Unrevealed: {}", view.unrevealed_count());

    let index = linear::index_frontier(&view);
    let equations = linear::build_equations(&view, &index)?;

    println!("\nConstraint system:");
    println!("  Frontier variables: {}", index.len());
    println!("  Equations: {}", equations.len());

    if equations.is_empty() {
        println!("\n{}", ColorOutput::warning("Nothing to deduce from this snapshot"));
        return Ok(());
    }

    // Dry-run both pass flavors against a recording double, leaving the
    // snapshot alone
    let (reduced_mines, reduced_safe) =
        dry_run_conclusions(&view, &index, linear::row_reduce(equations.clone()))?;
    let (raw_mines, raw_safe) = dry_run_conclusions(&view, &index, equations)?;

    println!("\nSingle-pass conclusions:");
    println!("  With reduction: {} mines, {} safe", reduced_mines, reduced_safe);
    println!("  Raw equations:  {} mines, {} safe", raw_mines, raw_safe);

    if reduced_mines + reduced_safe + raw_mines + raw_safe == 0 {
        println!("\n{}", ColorOutput::warning("This position needs more information"));
    }

    Ok(())
}

/// Count distinct cells one deduction pass over these rows would resolve
fn dry_run_conclusions(
    view: &BoardView,
    index: &linear::VariableIndex,
    rows: Vec<linear::Equation>,
) -> Result<(usize, usize)> {
    let mut recorder = DryRunBoard {
        view: view.clone(),
        marked: HashSet::new(),
        opened: HashSet::new(),
    };
    linear::process_equations(&rows, index, &mut recorder, view.cols)?;
    Ok((recorder.marked.len(), recorder.opened.len()))
}

/// Board stand-in that records conclusions instead of applying them
struct DryRunBoard {
    view: BoardView,
    marked: HashSet<(usize, usize)>,
    opened: HashSet<(usize, usize)>,
}

impl MineBoard for DryRunBoard {
    fn view(&self) -> BoardView {
        self.view.clone()
    }

    fn mark_mine(&mut self, row: usize, col: usize) {
        self.marked.insert((row, col));
    }

    fn open(&mut self, row: usize, col: usize) {
        self.opened.insert((row, col));
    }
}
