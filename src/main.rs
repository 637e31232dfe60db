use anyhow::Context;
use clap::Parser;
use plot_steps::{cli::Args, logger};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger();
    tracing::debug!(?args, "starting");

    let values = plot_steps::scan_file(&args.file)?;
    let plotfile = plot_steps::plot_path(&args.file);
    println!("plotfile = {:?}", plotfile);
    plot_steps::render(&values, &plotfile)
        .with_context(|| format!("cannot plot to {}", plotfile.display()))?;
    Ok(())
}
