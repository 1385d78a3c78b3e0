mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quest_print::constants::pixels_for;
use quest_print::{
    BookOptions, CheckLevel, ComplianceEngine, CoverGeometry, GenerateRequest, PencilSketch,
    PrintPolicy, TrimSize, Verdict,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "qbook", about = "Print-ready quest book generator", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build interior and cover PDFs from photos
    Build {
        /// Input images, one per page, in page order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output directory for interior.pdf and cover.pdf
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output mode
        #[arg(long, default_value = "preview", value_enum)]
        mode: ModeArg,

        /// Square trim size in inches
        #[arg(long, default_value = "8.5")]
        trim: f32,

        /// Requested page count (raised to the print minimum and made even)
        #[arg(long, default_value = "24")]
        pages: u32,

        /// Interior paper stock
        #[arg(long, default_value = "white", value_enum)]
        paper: PaperArg,

        /// Policy JSON file (defaults to KDP values)
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Overlay CSV (columns: title, text), one row per page
        #[arg(long)]
        overlays: Option<PathBuf>,

        /// Convert photos to pencil sketches
        #[arg(long)]
        sketch: bool,

        /// Outline page edge, trim and safe area
        #[arg(long)]
        debug_overlay: bool,

        /// Cover title
        #[arg(long, default_value = "Quest Book")]
        title: String,

        /// Cover subtitle
        #[arg(long)]
        subtitle: Option<String>,

        /// Back cover text
        #[arg(long)]
        back_text: Option<String>,

        /// Show statistics only, don't generate PDFs
        #[arg(long)]
        stats_only: bool,
    },

    /// Compute spine width and cover size
    Spine {
        /// Page count
        #[arg(long)]
        pages: u32,

        /// Interior paper stock
        #[arg(long, default_value = "white", value_enum)]
        paper: PaperArg,

        /// Square trim size in inches
        #[arg(long, default_value = "8.5")]
        trim: f32,

        /// Policy JSON file
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    /// Check image resolution against the print page
    Preflight {
        /// Input images
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Square trim size in inches
        #[arg(long, default_value = "8.5")]
        trim: f32,

        /// Target resolution (overrides the policy)
        #[arg(long)]
        dpi: Option<f32>,

        /// Policy JSON file
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    /// Write the default policy as JSON for editing
    Policy {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Preview,
    Print,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    White,
    Cream,
    StandardColor,
    PremiumColor,
}

impl From<ModeArg> for quest_print::PrintMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Preview => Self::Preview,
            ModeArg::Print => Self::Print,
        }
    }
}

impl From<PaperArg> for quest_print::PaperType {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::White => Self::White,
            PaperArg::Cream => Self::Cream,
            PaperArg::StandardColor => Self::StandardColor,
            PaperArg::PremiumColor => Self::PremiumColor,
        }
    }
}

async fn load_policy(path: Option<&Path>) -> Result<PrintPolicy> {
    match path {
        Some(path) => PrintPolicy::load(path)
            .await
            .with_context(|| format!("loading policy {}", path.display())),
        None => Ok(PrintPolicy::default()),
    }
}

fn level_tag(level: CheckLevel) -> &'static str {
    match level {
        CheckLevel::Green => "[ok]  ",
        CheckLevel::Yellow => "[warn]",
        CheckLevel::Red => "[fail]",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Build {
            input,
            output,
            mode,
            trim,
            pages,
            paper,
            policy,
            overlays,
            sketch,
            debug_overlay,
            title,
            subtitle,
            back_text,
            stats_only,
        } => {
            let policy = load_policy(policy.as_deref()).await?;
            let options = BookOptions {
                trim: TrimSize::square(trim),
                mode: mode.into(),
                requested_pages: pages,
                paper: paper.into(),
                title,
                subtitle,
                back_text,
                debug_overlay,
            };

            // Calculate and show statistics
            let stats = quest_print::calculate_statistics(&options, input.len() as u32, &policy)?;
            println!("Book Statistics:");
            println!("  Content pages: {}", stats.content_pages);
            println!("  Filler pages added: {}", stats.filler_pages);
            println!("  Print page count: {}", stats.kdp_pages);
            println!(
                "  Spine: {:.4}\" on {} paper (title {})",
                stats.spine_width_in,
                stats.paper,
                if stats.spine_text_printed {
                    "printed"
                } else {
                    "omitted"
                }
            );
            println!(
                "  Cover: {:.3}\" x {:.3}\"",
                stats.cover_size_in.0, stats.cover_size_in.1
            );

            if stats_only {
                return Ok(());
            }

            let overlays = match overlays {
                Some(path) => quest_print::load_overlays(&path)
                    .await
                    .with_context(|| format!("loading overlays {}", path.display()))?,
                None => Vec::new(),
            };
            let bitmaps = quest_print::load_bitmaps(&input).await?;

            let mut request = GenerateRequest::from_images(options, policy, bitmaps, overlays);
            if sketch {
                request = request.with_filter(PencilSketch::default());
            }
            let book = quest_print::generate_book(request).await?;

            if let Some(notice) = &book.notice {
                println!("Notice: {}", notice);
            }
            for line in book.preflight.summary_lines() {
                println!("Preflight: {}", line);
            }

            tokio::fs::create_dir_all(&output).await?;
            let interior_path = output.join("interior.pdf");
            let cover_path = output.join("cover.pdf");
            quest_print::save_pdf(&book.interior_pdf, &interior_path).await?;
            quest_print::save_pdf(&book.cover_pdf, &cover_path).await?;

            println!("Print readiness:");
            for check in &book.readiness.checks {
                println!("  {} {}", level_tag(check.level), check.message);
            }
            println!(
                "Interior ({} pages) → {}",
                book.physical_pages,
                interior_path.display()
            );
            println!("Cover → {}", cover_path.display());
        }

        Commands::Spine {
            pages,
            paper,
            trim,
            policy,
        } => {
            let policy = load_policy(policy.as_deref()).await?;
            let engine = ComplianceEngine::new(&policy);
            let trim = TrimSize::square(trim);

            let adjustment = engine.enforce_page_count(pages);
            if let Some(notice) = adjustment.notice() {
                println!("Notice: {}", notice);
            }
            let spine = engine.compute_spine_for_paper(adjustment.forced, paper.into(), trim)?;
            let cover = CoverGeometry::resolve(
                trim,
                spine.width_in,
                quest_print::PrintMode::Print,
                &policy,
            );
            let (width, height) = cover.size_in();

            println!("Spine:");
            println!("  Pages: {}", spine.page_count);
            println!("  Thickness per page: {}\"", spine.thickness_per_page_in);
            println!("  Width: {:.4}\" ({:.2} pt)", spine.width_in, spine.width_pt());
            match spine.text_size_pt {
                Some(size) => println!("  Title on spine: yes ({:.1} pt)", size),
                None if spine.text_allowed => println!("  Title on spine: no (spine too narrow)"),
                None => println!("  Title on spine: no"),
            }
            println!("  Cover with bleed: {:.3}\" x {:.3}\"", width, height);
        }

        Commands::Preflight {
            input,
            trim,
            dpi,
            policy,
        } => {
            let mut policy = load_policy(policy.as_deref()).await?;
            if let Some(dpi) = dpi {
                policy.target_dpi = dpi;
            }
            policy.validate()?;

            let options = BookOptions {
                trim: TrimSize::square(trim),
                ..Default::default()
            };
            let frame_in = trim + 2.0 * policy.bleed_in;
            let needed = pixels_for(frame_in, policy.target_dpi);
            println!(
                "Full-bleed page {:.3}\" needs {}x{} px at {:.0} DPI",
                frame_in, needed, needed, policy.target_dpi
            );
            let bitmaps = quest_print::load_bitmaps(&input).await?;
            let report = quest_print::preflight_bitmaps(&bitmaps, &options, &policy);
            drop(bitmaps);

            for (result, path) in report.results().iter().zip(&input) {
                println!(
                    "{:<5} {:>6.0} DPI  {}x{}  {}",
                    result.verdict.label(),
                    result.achieved_dpi,
                    result.pixel_width,
                    result.pixel_height,
                    path.display()
                );
            }
            if report.worst() == Verdict::Fail {
                println!("Print export would be blocked.");
            }
        }

        Commands::Policy { output } => {
            PrintPolicy::default().save(&output).await?;
            println!("Default policy → {}", output.display());
        }
    }

    Ok(())
}
