//! `unorm` binary entry point: Unicode normalization plus invalid-byte
//! repair over the multibyte-tolerant glyph stream.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use mbtext::cli::unorm_args::{self, UnormArgs};
use mbtext::config::DEFAULT_BLOCK_SIZE;
use mbtext::decoder::{Decoder, FdSource};
use mbtext::display;
use mbtext::normalize;

fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

fn run(args: UnormArgs) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = io::stderr();
    let mut clean = true;

    let files = if args.files.is_empty() {
        vec!["-".to_owned()]
    } else {
        args.files.clone()
    };

    for path in &files {
        let reader = open_input(path).with_context(|| format!("unorm: cannot open '{path}'"))?;
        let mut dec = Decoder::new(FdSource::new(reader), DEFAULT_BLOCK_SIZE);
        if !normalize::run(&mut dec, &args.config, &mut out, &mut err)
            .with_context(|| format!("unorm: error processing '{path}'"))?
        {
            clean = false;
        }
    }

    out.flush().context("unorm: failed to flush output")?;
    Ok(clean)
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match unorm_args::parse(&argv).map_err(anyhow::Error::from) {
        Ok(a) => a,
        Err(e) => {
            display!("unorm: {e}\n");
            return ExitCode::from(1);
        }
    };

    if parsed.config.verbose {
        mbtext::cli::constants::set_display_level(2);
    }

    match run(parsed) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            display!("unorm: {e:#}\n");
            ExitCode::from(1)
        }
    }
}
