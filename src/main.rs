use std::{env, fs, process};

use ltx::{Ltx, Options, WarningMode};

const USAGE: &str = "usage: ltx [-v...] [--coerce] [--strict] FILE...";

fn main() {
    let mut verbosity = 1;
    let mut options = Options::default();
    let mut paths = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--coerce" => options.auto_coerce = true,
            "--strict" => options.warning_mode = WarningMode::Raise,
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                verbosity += flag.len() - 1;
            }
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        eprintln!("{USAGE}");
        process::exit(2);
    }

    if let Err(err) = stderrlog::new()
        .module("ltx")
        .verbosity(verbosity)
        .init()
    {
        eprintln!("failed to initialise logging: {err}");
    }

    // Every file goes into the same store so parents can live in any of them.
    let mut ltx = Ltx::with_options(options);

    for path in &paths {
        let result = fs::File::open(path)
            .map_err(ltx::ParseError::from)
            .and_then(|mut file| ltx.parse_reader(&mut file));

        if let Err(err) = result {
            eprintln!("{path}: {err}");
            process::exit(1);
        }
    }

    for name in ltx.sections() {
        println!("[{name}]");

        for (key, value) in &ltx[name] {
            println!("{key} = {value}");
        }

        println!();
    }

    for (child, parents) in ltx.unresolved() {
        log::warn!("[{child}] never found: {}", parents.join(", "));
    }
}
