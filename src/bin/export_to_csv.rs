use anyhow::Error;
use chrono::Local;
use clap::{App, Arg, ArgMatches};
use recommender_reports::{
    config_arg, connect, init_logger, load_config, verbose_arg, DEFAULT_CONFIG, VERSION,
};
use report::{banner, preview, Exporter, RULE_WIDTH};
use std::fs;
use std::io;
use std::process;

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let stdout = io::stdout();
    banner(&mut stdout.lock(), '=', "EXPORTING USER DATA TO CSV")?;

    let mut config = load_config(matches.value_of("config").unwrap_or(DEFAULT_CONFIG))?;
    if let Some(output) = matches.value_of("output") {
        config.export.output_dir = output.into();
    }

    let controller = connect(&config)?;
    let exporter = Exporter::with_controller(&controller, &config.export);
    exporter.export(Local::now().naive_local())?;

    let location = fs::canonicalize(exporter.output_dir())?;
    println!("\n[SUCCESS] All CSV files exported to: {}", location.display());

    preview::preview_dir(&location, &config.export, &mut stdout.lock())?;

    banner(
        &mut stdout.lock(),
        '=',
        "[SUCCESS] All data exported to CSV files!",
    )?;
    println!("Location: {}", location.display());
    println!("{}\n", "=".repeat(RULE_WIDTH));

    Ok(())
}

fn main() {
    let matches = App::new("export_to_csv")
        .version(VERSION)
        .about("Export all user and rating data to CSV files")
        .arg(config_arg())
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("Directory receiving the CSV files")
                .takes_value(true),
        )
        .arg(verbose_arg())
        .get_matches();

    if let Err(e) = init_logger(matches.is_present("verbose")) {
        eprintln!("{}", e);
    }

    if let Err(e) = run(&matches) {
        log::error!("Error during export: {}", e);
        // Debug formatting carries the cause chain and the backtrace if captured
        eprintln!("\n[ERROR] Error during export: {:?}", e);
        process::exit(1);
    }
}
