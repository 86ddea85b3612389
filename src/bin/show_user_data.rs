use anyhow::Error;
use clap::{App, Arg};
use recommender_reports::{
    config_arg, connect, init_logger, load_config, verbose_arg, DEFAULT_CONFIG, VERSION,
};
use report::{banner, Inspector, RULE_WIDTH};
use std::io::{self, Write};

fn main() -> Result<(), Error> {
    let matches = App::new("show_user_data")
        .version(VERSION)
        .about("Display user login and rating data from the recommender database")
        .arg(config_arg())
        .arg(
            Arg::with_name("user")
                .short("u")
                .long("user")
                .value_name("USERNAME")
                .help("Also show the profile of this user")
                .takes_value(true),
        )
        .arg(verbose_arg())
        .get_matches();

    init_logger(matches.is_present("verbose"))?;

    let config = load_config(matches.value_of("config").unwrap_or(DEFAULT_CONFIG))?;
    let controller = connect(&config)?;
    let inspector = Inspector::with_controller(&controller);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    banner(&mut out, '#', "# MOVIE RECOMMENDATION SYSTEM - USER DATA VIEWER")?;
    inspector.show_statistics(&mut out)?;
    inspector.show_all_users(&mut out)?;
    inspector.show_all_ratings(&mut out)?;

    match matches.value_of("user") {
        Some(username) => inspector.show_user_profile(username, &mut out)?,
        None => {
            writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
            writeln!(out, "To view a specific user profile, run:")?;
            writeln!(out, "  show_user_data --user <USERNAME>")?;
        }
    }

    writeln!(out, "{}\n", "=".repeat(RULE_WIDTH))?;
    Ok(())
}
