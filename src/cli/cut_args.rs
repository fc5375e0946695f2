//! Argument parsing for the `cut`-like extractor binary.
//!
//! Hand-parsed, mirroring gnulib/coreutils `cut.c`'s `getopt_long` table:
//! `-b`/`-c`/`-f LIST` (mutually exclusive, list may be attached:
//! `-b1-3` or separate: `-b 1-3`), `-d DELIM`, `-s`, `--complement`,
//! `--output-delimiter=STRING`, `-n`, `-z`.

use crate::cut::{Mode, RangeSet};

/// Successfully parsed command line.
#[derive(Debug, Clone)]
pub struct CutArgs {
    pub mode: Mode,
    pub ranges: RangeSet,
    pub output_delim: Option<String>,
    pub suppress_non_delimited: bool,
    pub line_delim: u8,
    pub files: Vec<String>,
}

/// A conflicting or malformed command line, reported before any input is
/// read (distilled spec §7, "precondition violation").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    NoListSelected,
    ConflictingLists,
    MissingValue(String),
    DelimNotOneChar(String),
    Range(String),
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::NoListSelected => write!(f, "you must specify a list of bytes, characters, or fields"),
            ArgError::ConflictingLists => write!(f, "only one type of list may be specified"),
            ArgError::MissingValue(opt) => write!(f, "option '{opt}' requires an argument"),
            ArgError::DelimNotOneChar(d) => write!(f, "the delimiter must be a single character, got '{d}'"),
            ArgError::Range(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ArgError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bytes,
    Chars,
    Fields,
}

/// Parse `args` (not including argv[0]).
pub fn parse(args: &[String]) -> Result<CutArgs, ArgError> {
    let mut list_kind: Option<ListKind> = None;
    let mut list_spec: Option<String> = None;
    let mut delim = '\t';
    let mut suppress = false;
    let mut complement = false;
    let mut output_delim: Option<String> = None;
    let mut no_split = false;
    let mut line_delim = b'\n';
    let mut files = Vec::new();

    fn select_list(
        kind: ListKind,
        spec: String,
        list_kind: &mut Option<ListKind>,
        list_spec: &mut Option<String>,
    ) -> Result<(), ArgError> {
        if *list_kind == Some(kind) || list_kind.is_none() {
            *list_kind = Some(kind);
            *list_spec = Some(spec);
            Ok(())
        } else {
            Err(ArgError::ConflictingLists)
        }
    }

    let mut i = 0;
    let mut positional_only = false;
    while i < args.len() {
        let arg = &args[i];

        if positional_only || !arg.starts_with('-') || arg == "-" {
            files.push(arg.clone());
            i += 1;
            continue;
        }
        if arg == "--" {
            positional_only = true;
            i += 1;
            continue;
        }

        if let Some(rest) = arg.strip_prefix("--output-delimiter=") {
            output_delim = Some(rest.to_owned());
            i += 1;
            continue;
        }
        if arg == "--complement" {
            complement = true;
            i += 1;
            continue;
        }

        if let Some(stripped) = arg.strip_prefix("-b") {
            let spec = take_value(stripped, args, &mut i, "-b")?;
            select_list(ListKind::Bytes, spec, &mut list_kind, &mut list_spec)?;
            continue;
        }
        if let Some(stripped) = arg.strip_prefix("-c") {
            let spec = take_value(stripped, args, &mut i, "-c")?;
            select_list(ListKind::Chars, spec, &mut list_kind, &mut list_spec)?;
            continue;
        }
        if let Some(stripped) = arg.strip_prefix("-f") {
            let spec = take_value(stripped, args, &mut i, "-f")?;
            select_list(ListKind::Fields, spec, &mut list_kind, &mut list_spec)?;
            continue;
        }
        if let Some(stripped) = arg.strip_prefix("-d") {
            let d = take_value(stripped, args, &mut i, "-d")?;
            delim = if d.is_empty() {
                '\0'
            } else {
                let mut chars = d.chars();
                let c = chars.next().expect("checked non-empty");
                if chars.next().is_some() {
                    return Err(ArgError::DelimNotOneChar(d));
                }
                c
            };
            continue;
        }

        match arg.as_str() {
            "-s" => {
                suppress = true;
                i += 1;
            }
            "-n" => {
                no_split = true;
                i += 1;
            }
            "-z" => {
                line_delim = 0;
                i += 1;
            }
            _ => {
                files.push(arg.clone());
                i += 1;
            }
        }
    }

    let kind = list_kind.ok_or(ArgError::NoListSelected)?;
    let spec = list_spec.expect("set alongside list_kind");
    let ranges = RangeSet::parse(&spec, complement).map_err(|e| ArgError::Range(e.to_string()))?;

    let mode = match kind {
        ListKind::Bytes if no_split => Mode::CharBytes,
        ListKind::Bytes => Mode::Bytes,
        ListKind::Chars => Mode::Chars,
        ListKind::Fields => Mode::Fields { delim },
    };

    Ok(CutArgs {
        mode,
        ranges,
        output_delim,
        suppress_non_delimited: suppress,
        line_delim,
        files,
    })
}

/// Consume an option's value, either attached (`-b1-3`) or as the next
/// argument (`-b 1-3`), advancing `i` past whatever was consumed.
fn take_value(
    attached: &str,
    args: &[String],
    i: &mut usize,
    opt: &str,
) -> Result<String, ArgError> {
    if !attached.is_empty() {
        *i += 1;
        return Ok(attached.to_owned());
    }
    let next = args
        .get(*i + 1)
        .ok_or_else(|| ArgError::MissingValue(opt.to_owned()))?;
    *i += 2;
    Ok(next.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_field_mode_attached() {
        let a = parse(&v(&["-f2", "-d:"])).unwrap();
        assert!(matches!(a.mode, Mode::Fields { delim: ':' }));
    }

    #[test]
    fn parses_field_mode_separate_args() {
        let a = parse(&v(&["-f", "2", "-d", ":"])).unwrap();
        assert!(matches!(a.mode, Mode::Fields { delim: ':' }));
    }

    #[test]
    fn conflicting_lists_rejected() {
        let err = parse(&v(&["-b1", "-c2"])).unwrap_err();
        assert_eq!(err, ArgError::ConflictingLists);
    }

    #[test]
    fn missing_list_rejected() {
        assert_eq!(parse(&v(&["-d:"])).unwrap_err(), ArgError::NoListSelected);
    }

    #[test]
    fn byte_mode_with_no_split_becomes_char_bytes() {
        let a = parse(&v(&["-b2", "-n"])).unwrap();
        assert!(matches!(a.mode, Mode::CharBytes));
    }

    #[test]
    fn collects_trailing_files() {
        let a = parse(&v(&["-f1", "-d:", "a.txt", "b.txt"])).unwrap();
        assert_eq!(a.files, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn z_flag_sets_nul_line_delimiter() {
        let a = parse(&v(&["-f1", "-d:", "-z"])).unwrap();
        assert_eq!(a.line_delim, 0);
    }

    #[test]
    fn output_delimiter_long_flag() {
        let a = parse(&v(&["-f1,2", "-d:", "--output-delimiter=--"])).unwrap();
        assert_eq!(a.output_delim.as_deref(), Some("--"));
    }

    #[test]
    fn empty_delim_means_nul() {
        let a = parse(&v(&["-f1", "-d", ""])).unwrap();
        assert!(matches!(a.mode, Mode::Fields { delim: '\0' }));
    }

    #[test]
    fn multi_char_delim_rejected() {
        assert_eq!(
            parse(&v(&["-f1", "-d::"])).unwrap_err(),
            ArgError::DelimNotOneChar("::".to_owned())
        );
    }
}
