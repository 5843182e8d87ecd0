use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use aiseo_score::error::read_input;
use aiseo_score::{
    analyze_content, analyze_image_seo, analyze_permalink, analyze_readability, html_to_text,
    keyword_difficulty, suggest_slug, unified_report, ContentInput, ImageInput, Status,
    StatusTally,
};

#[derive(Parser)]
#[command(
    name = "aiseo-score",
    about = "Readability and SEO scoring for blog content",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Readability formulas for each file (reads stdin if none provided)
    Readability {
        files: Vec<String>,
        /// Strip HTML and shortcodes before analysis
        #[arg(long)]
        html: bool,
    },
    /// On-page SEO checklist for a post body (reads stdin if no file)
    Content {
        file: Option<String>,
        #[arg(long, env = "AISEO_KEYWORD", default_value = "")]
        keyword: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        slug: String,
        #[arg(long)]
        html: bool,
        /// Combine content, readability and permalink into one report
        #[arg(long)]
        report: bool,
    },
    /// Image attachment checklist
    Image {
        #[arg(long)]
        filename: String,
        #[arg(long)]
        alt: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// File size in bytes
        #[arg(long)]
        size: Option<u64>,
        #[arg(long, env = "AISEO_KEYWORD")]
        keyword: Option<String>,
    },
    /// Permalink checklist, or suggest a slug from a title
    Permalink {
        #[arg(required_unless_present = "suggest")]
        slug: Option<String>,
        #[arg(long, value_name = "TITLE")]
        suggest: Option<String>,
        #[arg(long, env = "AISEO_KEYWORD")]
        keyword: Option<String>,
    },
    /// Keyword difficulty estimate
    Keyword {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Readability status for many files plus a good/ok/poor tally
    Summary {
        #[arg(required = true)]
        files: Vec<String>,
        #[arg(long)]
        html: bool,
    },
}

#[derive(Serialize)]
struct FileReadability<T: Serialize> {
    path: String,
    #[serde(flatten)]
    report: T,
}

#[derive(Serialize)]
struct FileSummary {
    path: String,
    percentage: u32,
    status: Status,
    flesch_reading_ease: f64,
}

#[derive(Serialize)]
struct Summary {
    files: Vec<FileSummary>,
    tally: StatusTally,
}

#[derive(Serialize)]
struct SlugSuggestion {
    slug: String,
    score: aiseo_score::RubricScore,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_text(path: &str, html: bool) -> anyhow::Result<String> {
    let raw = read_input(path)?;
    Ok(if html { html_to_text(&raw) } else { raw })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Readability { files, html } => {
            if files.is_empty() {
                let text = load_text("-", html)?;
                print_json(&analyze_readability(&text))?;
            } else {
                for path in files {
                    let text = load_text(&path, html)?;
                    print_json(&FileReadability {
                        report: analyze_readability(&text),
                        path,
                    })?;
                }
            }
        }
        Command::Content {
            file,
            keyword,
            title,
            description,
            slug,
            html,
            report,
        } => {
            let path = file.as_deref().unwrap_or("-");
            let input = ContentInput {
                title,
                description,
                slug,
                content: load_text(path, html)?,
                keyword,
            };
            if report {
                print_json(&unified_report(&input, &[]))?;
            } else {
                print_json(&analyze_content(&input))?;
            }
        }
        Command::Image {
            filename,
            alt,
            title,
            size,
            keyword,
        } => {
            let image = ImageInput {
                filename,
                alt,
                title,
                file_size: size,
            };
            print_json(&analyze_image_seo(&image, keyword.as_deref()))?;
        }
        Command::Permalink {
            slug,
            suggest,
            keyword,
        } => {
            let keyword = keyword.as_deref();
            match (suggest, slug) {
                (Some(title), _) => {
                    let slug = suggest_slug(&title, keyword);
                    let score = analyze_permalink(&slug, keyword);
                    print_json(&SlugSuggestion { slug, score })?;
                }
                (None, Some(slug)) => print_json(&analyze_permalink(&slug, keyword))?,
                (None, None) => anyhow::bail!("a slug or --suggest TITLE is required"),
            }
        }
        Command::Keyword { keywords } => {
            let results: Vec<_> = keywords.iter().map(|k| keyword_difficulty(k)).collect();
            print_json(&results)?;
        }
        Command::Summary { files, html } => {
            let mut summaries = Vec::with_capacity(files.len());
            for path in files {
                let text = load_text(&path, html).with_context(|| format!("summarizing {path}"))?;
                let report = analyze_readability(&text);
                let score = report.score();
                summaries.push(FileSummary {
                    path,
                    percentage: score.percentage,
                    status: score.status,
                    flesch_reading_ease: report.flesch_reading_ease,
                });
            }
            let tally = summaries.iter().map(|s| s.status).collect();
            print_json(&Summary {
                files: summaries,
                tally,
            })?;
        }
    }
    Ok(())
}
