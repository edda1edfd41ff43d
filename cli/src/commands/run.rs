use anyhow::Result;
use convergencia::{io::{write_outputs, ShapefileSource}, run_with_source, Config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RunArgs) -> Result<()> {
    let config = Config::from_path(&args.config)?;
    let out_dir = args.out.clone().unwrap_or_else(|| config.output.dir.clone());

    println!("[run] loading layers from {}", args.config.display());
    let source = ShapefileSource::new(config.inputs.clone());
    let report = run_with_source(&source, &config.analysis)?;

    println!("[run] writing outputs to {}", out_dir.display());
    let written = write_outputs(&report, &config, &out_dir, args.force)?;

    println!(
        "[run] {} departments, {} outputs, {} anomalies",
        report.table.len(), written.len(), report.anomalies.len(),
    );
    if cli.verbose > 0 {
        for anomaly in &report.anomalies {
            eprintln!("  - {anomaly}");
        }
    }

    Ok(())
}
