//! papermorph CLI - apply one PDF's typography to another PDF's content

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use papermorph::{
    extract_style_with_options, group_spans_by_line, infer_role_for_span, to_json, ApplyOptions,
    ExtractOptions, JsonFormat, OutputFormat, PageSelection, PdfExtractor, RasterOptions,
    RenderOptions, Span, StructureOptions, StyleProfile, StyleTransfer, Structurer, TitleSource,
};

#[derive(Parser)]
#[command(name = "papermorph")]
#[command(version)]
#[command(about = "Re-render a PDF's content in the typography of a sample PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the style profile of a sample PDF as JSON
    Profile {
        /// Sample PDF file
        #[arg(value_name = "SAMPLE")]
        sample: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the content structure of a PDF as JSON
    Structure {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Sample PDF whose profile classifies headings
        #[arg(short, long, value_name = "SAMPLE")]
        sample: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Emit plain-text paragraphs without bold/italic runs
        #[arg(long)]
        plain: bool,
    },

    /// Show the role a font size gets under a sample's profile
    Role {
        /// Sample PDF file
        #[arg(value_name = "SAMPLE")]
        sample: PathBuf,

        /// Font size in points
        #[arg(value_name = "SIZE")]
        size: f64,
    },

    /// Restyle INPUT after SAMPLE
    Apply {
        /// Sample PDF file
        #[arg(value_name = "SAMPLE")]
        sample: PathBuf,

        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,

        /// Document title (defaults to the input's first heading)
        #[arg(long, conflicts_with = "no_title")]
        title: Option<String>,

        /// Emit no title heading
        #[arg(long)]
        no_title: bool,

        /// Input page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Page size for print CSS (e.g., "A4", "Letter")
        #[arg(long, default_value = "A4")]
        page_size: String,

        /// Path to the wkhtmltopdf binary
        #[arg(long, env = "PAPERMORPH_WKHTMLTOPDF", value_name = "PATH")]
        wkhtmltopdf: Option<PathBuf>,

        /// Read the sample and the input one after the other
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Styled HTML document
    Html,
    /// PDF via wkhtmltopdf
    Pdf,
    /// Profile, nodes and statistics as JSON
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Pdf => OutputFormat::Pdf,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profile {
            sample,
            output,
            compact,
        } => cmd_profile(&sample, output.as_deref(), compact),
        Commands::Structure {
            input,
            sample,
            output,
            compact,
            plain,
        } => cmd_structure(&input, sample.as_deref(), output.as_deref(), compact, plain),
        Commands::Role { sample, size } => cmd_role(&sample, size),
        Commands::Apply {
            sample,
            input,
            output,
            format,
            title,
            no_title,
            pages,
            page_size,
            wkhtmltopdf,
            sequential,
        } => {
            let title = match (title, no_title) {
                (Some(t), _) => TitleSource::Fixed(t),
                (None, true) => TitleSource::None,
                (None, false) => TitleSource::FirstHeading,
            };
            cmd_apply(ApplyArgs {
                sample: &sample,
                input: &input,
                output: output.as_deref(),
                format,
                title,
                pages: pages.as_deref(),
                page_size,
                wkhtmltopdf,
                sequential,
            })
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", String::from_utf8_lossy(content));
    }
    Ok(())
}

fn load_profile(sample: &Path) -> papermorph::Result<StyleProfile> {
    let profile = extract_style_with_options(sample, ExtractOptions::new().lenient())?;
    if profile.is_empty() {
        eprintln!(
            "{} {} has no usable text spans; every line will be a paragraph",
            "Warning:".yellow().bold(),
            sample.display()
        );
    }
    Ok(profile)
}

fn cmd_profile(
    sample: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load_profile(sample)?;
    let json = to_json(&profile, json_format(compact))?;
    write_output(output, json.as_bytes())
}

fn cmd_structure(
    input: &Path,
    sample: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    plain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = match sample {
        Some(sample) => load_profile(sample)?,
        None => StyleProfile::empty(),
    };

    let extractor = PdfExtractor::open_with_options(input, ExtractOptions::new().lenient())?;
    let spans = group_spans_by_line(&extractor.extract_spans()?);
    let blocks = extractor.extract_text_blocks()?;

    let options = if plain {
        StructureOptions::new().plain()
    } else {
        StructureOptions::new()
    };
    let structure = Structurer::new(options).structure(&spans, &blocks, &profile);

    let json = to_json(&structure.nodes, json_format(compact))?;
    write_output(output, json.as_bytes())?;

    let stats = structure.stats;
    eprintln!(
        "{} {} headings, {} paragraphs, {} lists ({} items) from {:?}",
        "Structured:".cyan().bold(),
        stats.headings,
        stats.paragraphs,
        stats.lists,
        stats.list_items,
        structure.source
    );
    Ok(())
}

fn cmd_role(sample: &Path, size: f64) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load_profile(sample)?;
    let role = infer_role_for_span(&Span::new("", size), &profile);

    println!("{}: {}", "Size".bold(), size);
    println!("{}: {}", "Role".bold(), role.to_string().green());

    if !profile.heading_rules.is_empty() {
        println!();
        println!("{}", "Heading Rules".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for rule in &profile.heading_rules {
            println!("  h{} {} {}pt", rule.level, ">=".dimmed(), rule.min_size);
        }
    }
    Ok(())
}

struct ApplyArgs<'a> {
    sample: &'a Path,
    input: &'a Path,
    output: Option<&'a Path>,
    format: Format,
    title: TitleSource,
    pages: Option<&'a str>,
    page_size: String,
    wkhtmltopdf: Option<PathBuf>,
    sequential: bool,
}

fn cmd_apply(args: ApplyArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from(args.format);
    if format == OutputFormat::Pdf && args.output.is_none() {
        return Err("PDF output needs an output file (-o)".into());
    }

    let page_selection = if let Some(p) = args.pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let mut raster = RasterOptions::new();
    if let Some(binary) = args.wkhtmltopdf {
        raster = raster.with_binary(binary);
    }

    // The page range applies to both documents
    let options = ApplyOptions::new()
        .with_extract_options(ExtractOptions::new().lenient().with_pages(page_selection))
        .with_render_options(RenderOptions::new().with_page_size(args.page_size))
        .with_raster_options(raster)
        .with_output(format)
        .with_title(args.title)
        .with_parallel(!args.sequential);
    log::debug!("Apply options: {:?}", options);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Restyling {} after {}...",
        args.input.display(),
        args.sample.display()
    ));

    let result = StyleTransfer::new(options).apply(args.sample, args.input);
    pb.finish_and_clear();
    let result = result?;

    write_output(args.output, &result.content)?;

    eprintln!(
        "{} {} nodes ({} headings, {} paragraphs, {} lists), {} bytes of {}",
        "Done!".green().bold(),
        result.nodes.len(),
        result.stats.headings,
        result.stats.paragraphs,
        result.stats.lists,
        result.content_len(),
        result.mime_type
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "papermorph".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF typography transfer tool");
    println!();
    println!("License: MIT");
}
