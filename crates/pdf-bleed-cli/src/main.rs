mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use logger::CliLogger;
use pdf_bleed::{DEFAULT_CONFIG_FILE, LayoutOptions, LayoutStatistics};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pdfb",
    about = "Add print bleed and crop marks to artwork and lay out copies on one PDF page",
    version
)]
struct Cli {
    /// Artwork image (PNG, JPEG, ...)
    #[arg(required_unless_present = "generate_config")]
    input_image: Option<PathBuf>,

    /// Output PDF file
    #[arg(required_unless_present = "generate_config")]
    output_pdf: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    generate_config: bool,

    /// Use the defaults without asking when the config file is missing
    #[arg(short = 'y', long)]
    yes: bool,

    /// Number of copies on the page
    #[arg(long)]
    copies: Option<usize>,

    /// Paper size (letter, legal, tabloid, a4, a5, ...)
    #[arg(long)]
    paper: Option<String>,

    /// Page orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Bleed size in pixels (0 disables bleed and crop marks)
    #[arg(long)]
    bleed: Option<u32>,

    /// How the bleed border is filled
    #[arg(long, value_enum)]
    bleed_mode: Option<BleedModeArg>,

    /// Leave out the cut marks around each copy
    #[arg(long)]
    no_cut_marks: bool,

    /// Show layout statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum BleedModeArg {
    Repeat,
    Mirror,
}

impl From<OrientationArg> for pdf_bleed::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<BleedModeArg> for pdf_bleed::BleedMode {
    fn from(arg: BleedModeArg) -> Self {
        match arg {
            BleedModeArg::Repeat => Self::Repeat,
            BleedModeArg::Mirror => Self::Mirror,
        }
    }
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }

    /// Command-line settings take precedence over the config file
    fn apply_overrides(&self, options: &mut LayoutOptions) {
        if let Some(copies) = self.copies {
            options.imposition.num_copies = copies;
        }
        if let Some(paper) = &self.paper {
            options.imposition.paper_size = paper.clone();
        }
        if let Some(orientation) = self.orientation {
            options.imposition.orientation =
                pdf_bleed::Orientation::from(orientation).name().to_string();
        }
        if let Some(bleed) = self.bleed {
            options.bleed.bleed_size = bleed;
        }
        if let Some(mode) = self.bleed_mode {
            options.bleed.bleed_mode = pdf_bleed::BleedMode::from(mode).name().to_string();
        }
        if self.no_cut_marks {
            options.imposition.cut_marks = false;
        }
    }
}

/// Ask whether to continue with the built-in defaults
fn confirm_defaults() -> Result<bool> {
    print!("Use defaults? (4 flyers on letter paper in portrait mode) [Y/n] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "" | "y" | "Y"))
}

async fn load_options(cli: &Cli) -> Result<LayoutOptions> {
    if tokio::fs::try_exists(&cli.config).await? {
        let options = LayoutOptions::load(&cli.config)
            .await
            .with_context(|| format!("Failed to load {}", cli.config.display()))?;
        log::info!("Using configuration from {}", cli.config.display());
        return Ok(options);
    }

    if !cli.yes && !confirm_defaults()? {
        bail!(
            "No configuration at {}. Run `pdfb --generate-config` to create one and edit it.",
            cli.config.display()
        );
    }
    Ok(LayoutOptions::default())
}

fn print_statistics(stats: &LayoutStatistics) {
    println!("Layout Statistics:");
    println!("  Copies: {}", stats.copies);
    println!(
        "  Grid: {} x {} ({} empty cells)",
        stats.columns, stats.rows, stats.empty_cells
    );
    println!("  Scale: {:.3}", stats.scale);
    println!(
        "  Copy size: {:.2} x {:.2} mm",
        stats.scaled_width_mm, stats.scaled_height_mm
    );
    println!("  Page coverage: {:.1}%", stats.page_coverage * 100.0);
}

async fn show_statistics(input: &Path, options: &LayoutOptions) -> Result<()> {
    let resolved = options.resolve()?;
    let source = pdf_bleed::load_image(input).await?;
    let request = pdf_bleed::layout_request_for(&source, &resolved)?;
    let plan = pdf_bleed::plan_layout(&request)?;
    print_statistics(&pdf_bleed::calculate_statistics(&request, &plan));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(cli.log_level())
        .init()
        .context("Failed to install logger")?;

    if cli.generate_config {
        LayoutOptions::default().save(&cli.config).await?;
        println!("Default configuration written to {}", cli.config.display());
        return Ok(());
    }

    let (Some(input), Some(output)) = (cli.input_image.as_deref(), cli.output_pdf.as_deref())
    else {
        bail!("Both an input image and an output PDF are required");
    };

    let mut options = load_options(&cli).await?;
    cli.apply_overrides(&mut options);

    if cli.stats_only {
        return show_statistics(input, &options).await;
    }

    let summary = pdf_bleed::create_imposition(input, output, &options).await?;
    print_statistics(&summary.statistics());
    println!("PDF created successfully: {}", output.display());

    Ok(())
}
