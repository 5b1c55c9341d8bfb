use anyhow::{Context, Result};
use clap::Parser;
use mkvfont_font::DefaultFont;
use mkvfont_server::config::{Cli, Command, ExtractorArgs, ServeArgs};
use mkvfont_server::ffmpeg::FfmpegExtractor;
use mkvfont_server::library::{self, JsonLibrary};
use mkvfont_server::resolve::FontResolver;
use mkvfont_server::routes::{self, AppState};
use mkvfont_server::{commands, logging};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::info;
use warp::Filter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Identify { files } => identify(&files),
        Command::Extract { video, position, output, extractor } => extract(&video, position, output, &extractor).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let default_font = match &args.default_font {
        Some(path) => DefaultFont::load(path).with_context(|| format!("loading default font {}", path.display()))?,
        None => DefaultFont::bundled(),
    };
    info!(bytes = default_font.len(), "default font loaded");

    let library = Arc::new(JsonLibrary::open(&args.library)?);
    info!(items = library.len(), path = %args.library.display(), "media library loaded");
    let _watcher = if args.watch {
        Some(library::watch(library.clone())?)
    } else {
        None
    };

    let settings = args.extractor.settings();
    info!(
        program = %settings.program.display(),
        timeout = ?settings.timeout,
        max_concurrent = settings.max_concurrent,
        "extractor configured"
    );
    let resolver = FontResolver::new(Arc::new(FfmpegExtractor::new(settings)), default_font);
    let state = AppState::new(library, Arc::new(resolver));

    let api = routes::routes(state).with(warp::trace::request());
    let (addr, server) = warp::serve(api).try_bind_with_graceful_shutdown(args.listen, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })?;
    info!(%addr, "font service listening");
    server.await;
    Ok(())
}

fn identify(files: &[PathBuf]) -> Result<()> {
    for path in files {
        let line = commands::identify_line(path).with_context(|| format!("reading {}", path.display()))?;
        println!("{}", line);
    }
    Ok(())
}

async fn extract(video: &Path, position: usize, output: Option<PathBuf>, extractor: &ExtractorArgs) -> Result<()> {
    let blob = commands::extract(extractor.settings(), video, position)
        .await
        .with_context(|| format!("extracting attachment {} from {}", position, video.display()))?;
    match output {
        Some(path) => {
            tokio::fs::write(&path, blob.as_bytes()).await?;
            info!(bytes = blob.len(), path = %path.display(), "attachment written");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(blob.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
