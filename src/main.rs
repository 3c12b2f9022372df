//! dominant_hue - representative color of a set of box-art images
//!
//! CLI entry point

use clap::Parser;
use dominant_hue::cli::Cli;
use dominant_hue::output;
use dominant_hue::{ColorPipeline, ColorReport, ParallelPipeline, Result};
use std::io::Write;

/// Compact `[HH:MM:SS LEVEL file line] message` lines on stderr.
///
/// The level is `warn`, or `debug` with `--debug`; `RUST_LOG` overrides both.
fn init_logger(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = buf.timestamp_seconds();

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

async fn run(cli: &Cli) -> Result<ColorReport> {
    let config = cli.pipeline_config()?;

    if config.workers > 1 {
        let pipeline = ParallelPipeline::new(config);
        let report = pipeline.run_dir(&cli.path_to_images, &cli.rom_name).await;
        pipeline.shutdown().await;
        report
    } else {
        ColorPipeline::new(config).run_dir(&cli.path_to_images, &cli.rom_name)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let code = match run(&cli).await {
        Ok(report) => {
            println!("{}", output::render(&report, cli.output_format()));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}
