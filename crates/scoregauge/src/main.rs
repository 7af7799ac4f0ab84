use anyhow::Context;
use clap::Parser;
use ringdraw::Document;
use scoregauge::{CanvasConfig, GaugeError, InitOptions, ScorePayload, config};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scoregauge", version, about, long_about = None)]
struct Cli {
    #[arg(long, required_unless_present = "write_theme")]
    lifestyle: Option<f64>,
    #[arg(long, required_unless_present = "write_theme")]
    mental: Option<f64>,
    #[arg(long, required_unless_present = "write_theme")]
    physical: Option<f64>,
    #[arg(long, required_unless_present = "write_theme")]
    nutrition: Option<f64>,
    /// Overall score shown on the outer ring and in the label
    #[arg(long, required_unless_present = "write_theme")]
    total: Option<f64>,

    /// Canvas width and height in pixels
    #[arg(short, long, default_value_t = config::DEFAULT_SIZE)]
    size: f64,

    /// Radius correction for the tick rings (defaults: 2 outer, 3 inner)
    #[arg(short, long, allow_hyphen_values = true)]
    compensation: Option<f64>,

    /// Render the total as plain markup instead of vector text
    #[arg(long)]
    mobile: bool,

    /// Theme file (defaults to the user's config directory)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Write the default theme to the config directory and exit
    #[arg(long)]
    write_theme: bool,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn payload(&self) -> Result<Option<ScorePayload>, GaugeError> {
        match (
            self.lifestyle,
            self.mental,
            self.physical,
            self.nutrition,
            self.total,
        ) {
            (Some(lifestyle), Some(mental), Some(physical), Some(nutrition), Some(total)) => {
                ScorePayload::new(lifestyle, mental, physical, nutrition, total).map(Some)
            }
            _ => Ok(None),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_theme {
        let path = config::write_default_theme()?;
        println!("{}", path.display());
        return Ok(());
    }

    let theme = match &cli.theme {
        Some(path) => config::load_theme(path)
            .with_context(|| format!("Failed to load theme {}", path.display()))?,
        None => config::load_or_default(),
    };
    let payload = cli.payload()?;

    let mut document = Document::with_svg();
    let container = document.create_container(config::DEFAULT_CONTAINER);

    let mut options = InitOptions::new(CanvasConfig::default().with_size(cli.size))
        .mobile_like(cli.mobile)
        .theme(theme);
    if let Some(compensation) = cli.compensation {
        options = options.error_compensation(compensation);
    }

    let mut gauge = scoregauge::init(&document, options)?;
    gauge.draw(payload.as_ref())?;

    let markup = container.lock().to_markup();
    match &cli.output {
        Some(path) => fs_err::write(path, markup)?,
        None => writeln!(std::io::stdout(), "{markup}")?,
    }
    Ok(())
}
