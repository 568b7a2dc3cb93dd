use std::path::PathBuf;

use clap::Command;
use svg2sfd::{BuildContext, FontOptions, Svg2SfdError};

fn command() -> Command {
    Command::new("svg2sfd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert an SVG glyph sheet to a FontForge SFD font")
        .arg(
            clap::Arg::new("input")
                .help("Path to the input SVG file")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("output")
                .help("Path to the output SFD file (defaults to the input with an .sfd extension)")
                .index(2),
        )
        .arg(
            clap::Arg::new("name")
                .short('n')
                .long("name")
                .help("Font name"),
        )
        .arg(
            clap::Arg::new("family")
                .short('f')
                .long("family")
                .help("Font family name"),
        )
        .arg(
            clap::Arg::new("copyright")
                .short('c')
                .long("copyright")
                .help("Copyright notice"),
        )
        .arg(
            clap::Arg::new("weight")
                .short('w')
                .long("weight")
                .help("Weight name, or a numeric weight class from 100 to 900"),
        )
        .arg(
            clap::Arg::new("font_version")
                .long("font-version")
                .help("Font version string"),
        )
        .arg(
            clap::Arg::new("options")
                .long("options")
                .help("JSON file of font options; explicit flags take precedence"),
        )
        .arg(
            clap::Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .action(clap::ArgAction::Count),
        )
}

fn run(args: &clap::ArgMatches) -> Result<(), Svg2SfdError> {
    let input_name = args
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();
    let output_name = args
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| input_name.with_extension("sfd"));

    let from_flags = FontOptions {
        name: args.get_one::<String>("name").cloned(),
        family: args.get_one::<String>("family").cloned(),
        copyright: args.get_one::<String>("copyright").cloned(),
        weight: args.get_one::<String>("weight").cloned(),
        version: args.get_one::<String>("font_version").cloned(),
    };
    let options = match args.get_one::<String>("options") {
        Some(path) => FontOptions::from_json_file(path)?.merge(from_flags),
        None => from_flags,
    };

    let before = std::time::Instant::now();
    let font = svg2sfd::convert_file(&input_name, &options, &BuildContext::from_environment())?;
    let after_convert = std::time::Instant::now();
    font.save(&output_name)?;
    log::info!(
        "Converted in {:.2?}, saved in {:.2?}",
        after_convert - before,
        after_convert.elapsed()
    );
    Ok(())
}

fn main() {
    let args = command().get_matches();
    env_logger::Builder::new()
        .filter_level(match args.get_count("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
