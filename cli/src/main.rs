//! textorizer CLI - interactive text extraction from multi-column PDFs

mod paths;
mod tui;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use textorizer::render::save_png;
use textorizer::{DetectOptions, Document, ExportOptions, JsonFormat, PageSelection};

#[derive(Parser)]
#[command(name = "textorizer")]
#[command(version, disable_version_flag = true)]
#[command(about = "Interactively extract text from multi-column PDFs", long_about = None)]
struct Cli {
    /// PDF file to open
    #[arg(value_name = "PDF")]
    pdf: Option<PathBuf>,

    /// Regions file to load
    #[arg(value_name = "REGIONS")]
    regions: Option<PathBuf>,

    /// Print the version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    #[command(flatten)]
    detect: DetectArgs,

    /// Join lines ending in a space with the next line on export
    #[arg(long, env = "TEXTORIZER_CONCAT_PARAGRAPHS", global = true)]
    concat_paragraphs: bool,

    /// Write log messages to this file
    #[arg(long, value_name = "FILE", env = "TEXTORIZER_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Column detection settings shared by all commands.
#[derive(Args, Debug, Clone, Copy)]
struct DetectArgs {
    /// Points to ignore at the top of each page
    #[arg(long, value_name = "PT", default_value_t = 0, env = "TEXTORIZER_MARGIN_TOP", global = true)]
    margin_top: u32,

    /// Points to ignore at the bottom of each page
    #[arg(long, value_name = "PT", default_value_t = 0, env = "TEXTORIZER_MARGIN_BOTTOM", global = true)]
    margin_bottom: u32,

    /// Points to ignore at the left of each page
    #[arg(long, value_name = "PT", default_value_t = 0, env = "TEXTORIZER_MARGIN_LEFT", global = true)]
    margin_left: u32,

    /// Points to ignore at the right of each page
    #[arg(long, value_name = "PT", default_value_t = 0, env = "TEXTORIZER_MARGIN_RIGHT", global = true)]
    margin_right: u32,

    /// Do not let images split or bound columns
    #[arg(long, env = "TEXTORIZER_IGNORE_IMAGES", global = true)]
    ignore_images: bool,
}

impl DetectArgs {
    fn options(&self) -> DetectOptions {
        DetectOptions::new()
            .with_margins(
                self.margin_left,
                self.margin_top,
                self.margin_right,
                self.margin_bottom,
            )
            .with_ignore_images(self.ignore_images)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Detect regions and write a regions file
    Detect {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Export the text of a PDF region by region
    Export {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Regions file to use instead of detection
        #[arg(short, long, value_name = "FILE")]
        regions: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Separator between pages; \n, \t and \f escapes are understood
        #[arg(long, value_name = "TEXT")]
        separator: Option<String>,

        /// Apply Unicode NFKC normalization
        #[arg(long)]
        normalize: bool,
    },

    /// Render a page preview as PNG
    Render {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Pixels per point
        #[arg(short, long, default_value_t = 2.0)]
        scale: f32,

        /// Output file (next to the PDF if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information and detected regions
    Info {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Regions file to show instead of detection
        #[arg(short, long, value_name = "FILE")]
        regions: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref(), cli.command.is_none()) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }

    let detect = cli.detect.options();
    let export = ExportOptions::new().with_concat_paragraphs(cli.concat_paragraphs);

    let result = match cli.command {
        Some(Commands::Detect {
            input,
            output,
            pages,
            compact,
        }) => cmd_detect(&input, output.as_deref(), pages.as_deref(), compact, detect),
        Some(Commands::Export {
            input,
            regions,
            output,
            pages,
            separator,
            normalize,
        }) => {
            let mut options = export.with_normalize(normalize);
            if let Some(separator) = separator {
                options = options.with_page_separator(unescape(&separator));
            }
            cmd_export(
                &input,
                regions.as_deref(),
                output.as_deref(),
                pages.as_deref(),
                options,
                detect,
            )
        }
        Some(Commands::Render {
            input,
            page,
            scale,
            output,
        }) => cmd_render(&input, page, scale, output.as_deref()),
        Some(Commands::Info {
            input,
            regions,
            pages,
            json,
        }) => cmd_info(&input, regions.as_deref(), pages.as_deref(), json, detect),
        None => tui::run(cli.pdf.as_deref(), cli.regions.as_deref(), detect, export)
            .map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Set up `env_logger`. The interactive view owns the terminal, so its
/// logs go to the log file or nowhere.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::from_default_env();

    if let Some(path) = log_file {
        let file = fs::File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        if !rust_log {
            builder.filter_level(log::LevelFilter::Info);
        }
    } else if interactive && !rust_log {
        builder.filter_level(log::LevelFilter::Off);
    }

    builder.try_init()?;
    Ok(())
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
        None => Ok(PageSelection::All),
    }
}

fn progress_bar(len: usize) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Expand `\n`, `\t`, `\f` and `\\` in a separator given on the command line.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{c}'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn cmd_detect(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    compact: bool,
    detect: DetectOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = parse_pages(pages)?;
    let mut doc = Document::open(input)?;
    doc.set_detect_options(detect);

    let indices = selection.indices(doc.page_count());
    let pb = progress_bar(indices.len())?;
    pb.set_message("Detecting regions...");
    for page in indices {
        doc.regions(page)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let set = doc.region_set();
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = set.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} regions on {} pages to {}",
            "Saved".green(),
            set.region_count(),
            set.pages.len(),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_export(
    input: &Path,
    regions: Option<&Path>,
    output: Option<&Path>,
    pages: Option<&str>,
    options: ExportOptions,
    detect: DetectOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = options.with_pages(parse_pages(pages)?);
    let mut doc = Document::open(input)?;
    doc.set_detect_options(detect);
    if let Some(path) = regions {
        doc.load_regions(path)?;
    }

    let pb = progress_bar(0)?;
    pb.set_message("Exporting text...");
    let text = doc.document_text_with_progress(&options, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;
    pb.finish_and_clear();

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn cmd_render(
    input: &Path,
    page: u32,
    scale: f32,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::open(input)?;
    let count = doc.page_count();
    let index = (page as usize)
        .checked_sub(1)
        .filter(|&i| i < count)
        .ok_or(textorizer::Error::PageOutOfRange(page as usize, count))?;

    let img = doc.render_page(index, scale)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::preview_path(input, page));
    save_png(&img, &path)?;

    println!(
        "{} {} ({}x{})",
        "Saved to".green(),
        path.display(),
        img.width(),
        img.height()
    );
    Ok(())
}

fn cmd_info(
    input: &Path,
    regions: Option<&Path>,
    pages: Option<&str>,
    json: bool,
    detect: DetectOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = parse_pages(pages)?;
    let mut doc = Document::open(input)?;
    doc.set_detect_options(detect);
    if let Some(path) = regions {
        doc.load_regions(path)?;
    }

    let indices = selection.indices(doc.page_count());
    let mut page_regions = Vec::with_capacity(indices.len());
    for &page in &indices {
        let rect = doc.page_rect(page)?;
        let rects = doc.regions(page)?.rects();
        page_regions.push((page, rect, rects));
    }

    if json {
        let pages: Vec<_> = page_regions
            .iter()
            .map(|(page, rect, rects)| {
                serde_json::json!({
                    "page": page + 1,
                    "width": rect.width(),
                    "height": rect.height(),
                    "regions": rects
                        .iter()
                        .map(|r| serde_json::json!({
                            "x": r.x0,
                            "y": r.y0,
                            "w": r.width(),
                            "h": r.height(),
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "version": doc.version(),
            "pages": doc.page_count(),
            "checksum": doc.checksum(),
            "detection": doc.detect_options(),
            "regions": pages,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.version());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Checksum".bold(), doc.checksum());

    println!();
    println!("{}", "Regions".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (page, rect, rects) in &page_regions {
        println!(
            "{} {} ({}x{} pt): {} regions",
            "Page".bold(),
            page + 1,
            rect.width(),
            rect.height(),
            rects.len()
        );
        for (order, r) in rects.iter().enumerate() {
            println!(
                "  {} {}. x={} y={} {}x{}",
                "├─".dimmed(),
                order + 1,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            );
        }
    }

    let total: usize = page_regions.iter().map(|(_, _, rects)| rects.len()).sum();
    println!();
    println!("{}: {}", "Total regions".bold(), total);

    Ok(())
}
