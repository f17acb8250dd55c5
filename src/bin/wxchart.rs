use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wxchart::{ForecastChartRenderer, PageClient, RendererConfig};
use wxchart::{page, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wxchart",
    version,
    about = "Extract weekly forecast data from a rendered page and chart it"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the forecast chart for a page (and optionally export the data).
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Read the page from a local HTML file.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Fetch the page from a URL instead of a local file.
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,
    /// Id of the chart surface element to look for.
    #[arg(long, default_value = "chart")]
    surface: String,
    /// Create the chart at the given path (.svg).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Chart title.
    #[arg(long, default_value = "Weather Forecast")]
    title: String,
    /// Save extracted data to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load_page(args: &RenderArgs) -> Result<String> {
    if let Some(path) = args.input.as_ref() {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()));
    }
    if let Some(url) = args.url.as_ref() {
        let client = PageClient::default();
        return client.fetch_page(url).with_context(|| format!("GET {url}"));
    }
    bail!("either --input or --url is required")
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let page_html = load_page(&args)?;

    let series = page::extract_series(&page_html, &args.surface)
        .ok_or_else(|| anyhow::anyhow!("chart surface `#{}` not found in page", args.surface))?;
    if !series.is_chartable() {
        bail!("no forecast data found in page");
    }
    eprintln!("Extracted {} forecast entries", series.len());

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&series, path)?,
            "json" => storage::save_json(&series, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", series.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let mut renderer = ForecastChartRenderer::new(RendererConfig {
            surface_id: args.surface.clone(),
            width: args.width,
            height: args.height,
            title: args.title.clone(),
            out: Some(plot_path.clone()),
        });
        if renderer.render(&page_html).is_none() {
            bail!("no chart produced");
        }
        eprintln!("Wrote chart to {}", plot_path.display());
    }

    Ok(())
}
