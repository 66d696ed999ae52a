use clap::{App, Arg};
use log::LevelFilter;
use regcalc::sink::Printer;
use regcalc::{Error, Options};
use std::io;
use std::process;

enum Outcome {
    Emitted,
    Result(f64),
}

fn main_result() -> Result<Outcome, Error> {
    let args = App::new("regcalc")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("SOURCE")
                .value_name("SOURCE")
                .help("Statements to compile, e.g. \"1 + 2 * 3;\"")
                .default_value("1 + 2 * 3 + 4;")
                .index(1),
        )
        .arg(
            Arg::with_name("reglimit")
                .short("r")
                .long("num-registers")
                .value_name("REG_LIMIT")
                .default_value("10")
                .help("Set the number of registers")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("emit")
                .short("e")
                .long("emit")
                .help("Print the generated instructions instead of running them"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Log code generation (-v) and execution (-vv)"),
        )
        .get_matches();

    let level = match args.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let source = args.value_of("SOURCE").unwrap_or_default();
    let reglimit = args.value_of("reglimit").unwrap_or_default();
    let options = Options {
        registers: reglimit
            .parse::<usize>()
            .map_err(|_| Error::Usage(format!("invalid number of registers: {}", reglimit)))?,
    };

    if args.is_present("emit") {
        let stdout = io::stdout();
        let mut printer = Printer::new(stdout.lock());
        regcalc::compile_into(source, &mut printer, &options)?;
        return Ok(Outcome::Emitted);
    }
    regcalc::compile_and_run(source, &options).map(Outcome::Result)
}

fn main() {
    match main_result() {
        Ok(Outcome::Emitted) => (),
        Ok(Outcome::Result(r)) => println!("Result = {}", r),
        Err(err) => {
            println!("An error occurred.\n{}", err);
            process::exit(1)
        }
    }
}
