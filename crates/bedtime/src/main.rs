use bedtime::config;
use bedtime::gui::app::AppModel;
use bedtime::sys::runtime;
use circular_slider::slider::svg;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Pick bedtime and wake-up time on a circular slider", long_about = None)]
struct Cli {
    /// Render the configured slider at its initial value to an SVG file and exit
    #[arg(long, value_name = "PATH")]
    export_svg: Option<PathBuf>,

    /// Write the default configuration file (if none exists) and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();

    if let Some(path) = cli.export_svg {
        let markup = svg::render(&config.slider, config.initial, &config.icons.load());
        fs_err::write(&path, markup)?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.bedtime").with_args(Vec::new());

    app.run::<AppModel>((config, rx));
    Ok(())
}
