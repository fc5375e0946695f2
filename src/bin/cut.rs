//! `cut` binary entry point: field/column/byte extraction over the
//! multibyte-tolerant glyph stream.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use mbtext::cli::cut_args::{self, CutArgs};
use mbtext::config::DEFAULT_BLOCK_SIZE;
use mbtext::decoder::{Decoder, FdSource, PushbackSource};
use mbtext::{cut, display};

fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

fn run(args: CutArgs) -> Result<bool> {
    let cfg = cut::Config {
        mode: args.mode,
        ranges: args.ranges,
        output_delim: args.output_delim,
        suppress_non_delimited: args.suppress_non_delimited,
        line_delim: args.line_delim,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut ok = true;

    let files = if args.files.is_empty() {
        vec!["-".to_owned()]
    } else {
        args.files.clone()
    };

    for path in &files {
        let attempt: Result<()> = (|| {
            let reader =
                open_input(path).with_context(|| format!("cut: cannot open '{path}'"))?;
            let mut dec = Decoder::new(
                PushbackSource::new(FdSource::new(reader)),
                DEFAULT_BLOCK_SIZE,
            );
            cut::run(&mut dec, &cfg, &mut out)
                .with_context(|| format!("cut: error reading '{path}'"))?;
            Ok(())
        })();
        if let Err(e) = attempt {
            display!("{e:#}\n");
            ok = false;
        }
    }

    out.flush().context("cut: failed to flush output")?;
    Ok(ok)
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match cut_args::parse(&argv).map_err(anyhow::Error::from) {
        Ok(a) => a,
        Err(e) => {
            display!("cut: {e}\n");
            return ExitCode::from(1);
        }
    };

    match run(parsed) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            display!("cut: {e:#}\n");
            ExitCode::from(1)
        }
    }
}
