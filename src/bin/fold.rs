//! `fold` binary entry point: display-width-aware line wrapping over the
//! multibyte-tolerant glyph stream.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use mbtext::cli::fold_args::{self, FoldArgs};
use mbtext::config::{DEFAULT_BLOCK_SIZE, DEFAULT_LINE_DELIM};
use mbtext::decoder::{Decoder, FdSource};
use mbtext::display;
use mbtext::fold::{self, Wrapper};

fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

fn run(args: FoldArgs) -> Result<bool> {
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
                open_input(path).with_context(|| format!("fold: cannot open '{path}'"))?;
            let mut dec = Decoder::new(FdSource::new(reader), DEFAULT_BLOCK_SIZE);
            let mut wrapper = Wrapper::new(
                args.width,
                args.byte_count,
                args.break_at_spaces,
                DEFAULT_LINE_DELIM,
            );
            fold::run(&mut dec, &mut wrapper, &mut out)
                .with_context(|| format!("fold: error reading '{path}'"))?;
            Ok(())
        })();
        if let Err(e) = attempt {
            display!("{e:#}\n");
            ok = false;
        }
    }

    out.flush().context("fold: failed to flush output")?;
    Ok(ok)
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match fold_args::parse(&argv).map_err(anyhow::Error::from) {
        Ok(a) => a,
        Err(e) => {
            display!("fold: {e}\n");
            return ExitCode::from(1);
        }
    };

    match run(parsed) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            display!("fold: {e:#}\n");
            ExitCode::from(1)
        }
    }
}
