//! CLI for TubeRank - YouTube SEO metadata and thumbnail editing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use tuberank::{
    Gateway, ImageFormat, OperationState, SeoClient, SeoRecord, Studio, ThumbnailClient,
};

#[derive(Parser)]
#[command(name = "tuberank")]
#[command(about = "Generate YouTube SEO metadata and edit thumbnails via the Gemini API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate SEO metadata for a video topic
    Seo(SeoArgs),

    /// Edit a thumbnail image with a text instruction
    Edit(EditArgs),
}

#[derive(Args)]
struct SeoArgs {
    /// The video topic
    topic: String,

    /// Copy one section of the result to the clipboard
    #[arg(long, value_enum)]
    copy: Option<CopySection>,
}

#[derive(Args)]
struct EditArgs {
    /// Path to the source image
    input: PathBuf,

    /// The edit instruction
    #[arg(short, long)]
    instruction: String,

    /// Output file path (defaults to the fixed download filename)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CopySection {
    Titles,
    Description,
    Hashtags,
    Tags,
    Thumbnails,
    Hooks,
    ShortTitle,
    Queries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let gateway = Gateway::builder().build()?;

    match cli.command {
        Commands::Seo(args) => run_seo(gateway, args, cli.json).await,
        Commands::Edit(args) => run_edit(gateway, args, cli.json).await,
    }
}

async fn run_seo(gateway: Gateway, args: SeoArgs, json_output: bool) -> anyhow::Result<()> {
    let client = SeoClient::new(gateway);
    let mut studio = Studio::new();
    studio.set_topic(&args.topic);

    if let Err(e) = studio.run_generation(&client).await {
        anyhow::bail!("{e}");
    }

    match studio.metadata() {
        OperationState::Succeeded(record) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                render_record(record);
            }
            if let Some(section) = args.copy {
                copy_section(record, section)?;
            }
            Ok(())
        }
        OperationState::Failed(message) => anyhow::bail!("{message}"),
        _ => anyhow::bail!("generation did not complete"),
    }
}

async fn run_edit(gateway: Gateway, args: EditArgs, json_output: bool) -> anyhow::Result<()> {
    let data = std::fs::read(&args.input)?;
    let mime = ImageFormat::from_magic_bytes(&data)
        .or_else(|| {
            args.input
                .extension()
                .and_then(|e| e.to_str())
                .and_then(ImageFormat::from_extension)
        })
        .map(|f| f.mime_type())
        .unwrap_or("image/png");

    let client = ThumbnailClient::new(gateway);
    let mut studio = Studio::new();
    studio.attach_image(data, mime);
    studio.set_instruction(&args.instruction);

    if let Err(e) = studio.run_edit(&client).await {
        anyhow::bail!("{e}");
    }

    match studio.edited() {
        OperationState::Succeeded(image) => {
            let path = match &args.output {
                Some(path) => {
                    image.save(path)?;
                    path.clone()
                }
                None => studio.save_edited(Path::new("."))?,
            };

            if json_output {
                let result = serde_json::json!({
                    "success": true,
                    "output": path.display().to_string(),
                    "size_bytes": image.size(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "Edited thumbnail: {} ({} bytes)",
                    path.display(),
                    image.size()
                );
            }
            Ok(())
        }
        OperationState::Failed(message) => anyhow::bail!("{message}"),
        _ => anyhow::bail!("edit did not complete"),
    }
}

fn render_record(record: &SeoRecord) {
    println!("Titles:");
    for (i, title) in record.titles.iter().enumerate() {
        println!("  {}. {}", i + 1, title);
    }

    println!("\nDescription:\n{}", record.description);

    println!("\nHashtags:\n{}", record.hashtags.join(" "));
    println!("\nTags:\n{}", record.tags.join(", "));

    println!("\nThumbnail text ideas:");
    for text in &record.thumbnail_texts {
        println!("  - {text}");
    }

    println!("\nHooks:");
    for hook in &record.hooks {
        println!("  - {hook}");
    }

    println!("\nShort title: {}", record.short_title);

    println!("\nRelated queries:");
    for query in &record.related_queries {
        println!("  - {query}");
    }
}

fn section_text(record: &SeoRecord, section: CopySection) -> String {
    match section {
        CopySection::Titles => record.titles.join("\n"),
        CopySection::Description => record.description.clone(),
        CopySection::Hashtags => record.hashtags.join(" "),
        CopySection::Tags => record.tags.join(", "),
        CopySection::Thumbnails => record.thumbnail_texts.join("\n"),
        CopySection::Hooks => record.hooks.join("\n"),
        CopySection::ShortTitle => record.short_title.clone(),
        CopySection::Queries => record.related_queries.join("\n"),
    }
}

fn copy_section(record: &SeoRecord, section: CopySection) -> anyhow::Result<()> {
    let text = section_text(record, section);
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    println!("\nCopied {section:?} to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> SeoRecord {
        serde_json::from_value(serde_json::json!({
            "titles": ["t1", "t2"],
            "description": "desc",
            "hashtags": ["#a", "#b"],
            "tags": ["a", "b"],
            "thumbnailTexts": ["BIG"],
            "hooks": ["hook"],
            "shortTitle": "short",
            "relatedQueries": ["q"]
        }))
        .unwrap()
    }

    #[test]
    fn test_section_text() {
        let record = sample_record();
        assert_eq!(section_text(&record, CopySection::Titles), "t1\nt2");
        assert_eq!(section_text(&record, CopySection::Hashtags), "#a #b");
        assert_eq!(section_text(&record, CopySection::Tags), "a, b");
        assert_eq!(section_text(&record, CopySection::ShortTitle), "short");
    }

    #[test]
    fn test_default_output_is_fixed_filename() {
        assert_eq!(
            tuberank::session::DOWNLOAD_FILE_NAME,
            "tuberank-edited-thumbnail.png"
        );
    }
}
