// src/bin/spaces-debug.rs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use spaces_render::{snapshot_store, snapshots_to_json, TreeRenderer};
use spaces_runtime::SpacesApp;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Space hierarchy
    Tree,
    /// Scoped style rules, one per space
    Css,
    /// Serialized spaces with their resolved rectangles
    Json,
    /// Hierarchy with every emitted edge and pixel rectangle
    Detailed,
}

#[derive(Parser)]
#[command(name = "spaces-debug")]
#[command(about = "Apply a layout document and dump the resulting spaces")]
struct Args {
    /// Path to the JSON layout document
    layout_file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: OutputFormat,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Window size used for the pixel preview, as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    viewport: Vec2,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn parse_viewport(value: &str) -> std::result::Result<Vec2, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid viewport dimension '{}': {}", part, e))
    };
    Ok(Vec2::new(parse(width)?, parse(height)?))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if !Path::new(&args.layout_file).exists() {
        anyhow::bail!("Layout file not found: {}", args.layout_file.display());
    }

    let mut app = SpacesApp::new();
    app.load(&args.layout_file)?;
    info!(
        "Loaded {} spaces in {} layouts from {}",
        app.space_count(),
        app.layouts().len(),
        args.layout_file.display()
    );

    let output_text = match args.format {
        OutputFormat::Tree => generate_tree_output(&app, args.viewport, false)?,
        OutputFormat::Detailed => generate_tree_output(&app, args.viewport, true)?,
        OutputFormat::Css => app.style_sheet()?.to_string(),
        OutputFormat::Json => generate_json_output(&app, args.viewport)?,
    };

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file.display()))?;
        info!("Output written to: {}", output_file.display());
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn generate_tree_output(app: &SpacesApp, viewport: Vec2, detailed: bool) -> Result<String> {
    let mut output = String::new();
    let layout = app.resolve(viewport);

    for root in app.layouts() {
        if let Some(host) = &root.host {
            output.push_str(&format!("(hosted by #{})\n", host));
        }

        let mut renderer = TreeRenderer::new().with_edges(detailed);
        if detailed {
            renderer = renderer.with_layout(&layout);
        }
        output.push_str(&renderer.render(&root.store)?);
    }

    if output.is_empty() {
        output.push_str("No spaces declared\n");
    }
    Ok(output)
}

fn generate_json_output(app: &SpacesApp, viewport: Vec2) -> Result<String> {
    let layout = app.resolve(viewport);
    let mut snapshots = Vec::new();
    for root in app.layouts() {
        snapshots.extend(snapshot_store(&root.store, Some(&layout))?);
    }
    Ok(snapshots_to_json(&snapshots)? + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1280x800"), Ok(Vec2::new(1280.0, 800.0)));
        assert_eq!(parse_viewport("640X480"), Ok(Vec2::new(640.0, 480.0)));
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("widexhigh").is_err());
    }
}
