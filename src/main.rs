use anyhow::{Context, Result};
use campaign_media::app::{App, UploadReport};
use campaign_media::image::mime::detect_image_mime;
use campaign_media::models::{Profile, SourceImage, VariantName};
use campaign_media::report::format_file_size;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "campaign-media")]
#[command(about = "Resize and store campaign site photos")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Process a photo into large/medium/small variants and store it.
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Content section the photo belongs to.
        #[arg(long, default_value = "hero_intro")]
        section: String,

        /// Override the resize profile picked from the section.
        #[arg(long)]
        profile: Option<Profile>,

        /// Alt text stored with the photo.
        #[arg(long)]
        alt: Option<String>,

        /// Print the stored record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the photo currently stored for a section.
    Show {
        #[arg(long)]
        section: String,
    },
}

fn print_summary(report: &UploadReport) {
    let sizes = &report.record.photo_metadata.processed_sizes;
    println!("{} ({} profile)", report.section, report.profile);
    for name in VariantName::ALL {
        let size = sizes.get(name);
        println!(
            "  {:<6} {}x{}  {}",
            name.as_str(),
            size.width,
            size.height,
            format_file_size(size.size as i64)
        );
    }
    println!(
        "  original {}, variants {}, saved {} ({})",
        report.savings.original,
        report.savings.processed,
        report.savings.savings,
        report.savings.savings_percent
    );
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Upload {
            file,
            section,
            profile,
            alt,
            json,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let source = SourceImage::new(name, detect_image_mime(&data), data);

            let profile = profile.unwrap_or_else(|| Profile::for_section(&section));
            let report = app
                .upload_with_profile(&section, &source, profile, alt)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report.record)?);
            } else {
                print_summary(&report);
            }
        }
        Command::Show { section } => match app.current_photo(&section).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record.photo_metadata)?),
            None => println!("No photo stored for {}", section),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_media=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match run(&app, args.command).await {
            Ok(_) => {
                info!("Done");
                Ok(())
            }
            Err(e) => {
                error!("Failed: {:#}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
