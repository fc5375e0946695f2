//! Argument parsing for the `fold`-like column wrapper binary.
//!
//! `-b` (count bytes), `-s` (break at blanks), `-w N` (width, default 80),
//! plus coreutils `fold`'s legacy digit-option syntax: `-N` is accepted as
//! an abbreviation for `-w N` only when it is the very first argument, and
//! further digits may accumulate onto it (`-1`, `-23`, ...).

use crate::config::DEFAULT_WIDTH;

#[derive(Debug, Clone)]
pub struct FoldArgs {
    pub width: usize,
    pub byte_count: bool,
    pub break_at_spaces: bool,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    MissingValue(String),
    InvalidWidth(String),
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::MissingValue(opt) => write!(f, "option '{opt}' requires an argument"),
            ArgError::InvalidWidth(w) => write!(f, "invalid width: '{w}'"),
        }
    }
}

impl std::error::Error for ArgError {}

pub fn parse(args: &[String]) -> Result<FoldArgs, ArgError> {
    let mut width: Option<usize> = None;
    let mut byte_count = false;
    let mut break_at_spaces = false;
    let mut files = Vec::new();

    // The digit-option abbreviation (`-N`) is only recognized as the first
    // argument, matching GNU `fold`'s historical `getopt` table where `-1`
    // through `-9` map to `width` before any other option has been seen.
    if let Some(first) = args.first() {
        if let Some(digits) = first.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                width = Some(
                    digits
                        .parse()
                        .map_err(|_| ArgError::InvalidWidth(first.clone()))?,
                );
            }
        }
    }

    let start = if width.is_some() { 1 } else { 0 };
    let mut i = start;
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

        if let Some(stripped) = arg.strip_prefix("-w") {
            let value = if !stripped.is_empty() {
                i += 1;
                stripped.to_owned()
            } else {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| ArgError::MissingValue("-w".to_owned()))?;
                i += 2;
                next.clone()
            };
            width = Some(
                value
                    .parse()
                    .map_err(|_| ArgError::InvalidWidth(value.clone()))?,
            );
            continue;
        }

        match arg.as_str() {
            "-b" => {
                byte_count = true;
                i += 1;
            }
            "-s" => {
                break_at_spaces = true;
                i += 1;
            }
            _ => {
                files.push(arg.clone());
                i += 1;
            }
        }
    }

    Ok(FoldArgs {
        width: width.unwrap_or(DEFAULT_WIDTH),
        byte_count,
        break_at_spaces,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_80() {
        let a = parse(&v(&[])).unwrap();
        assert_eq!(a.width, 80);
    }

    #[test]
    fn dash_w_sets_width() {
        let a = parse(&v(&["-w", "40"])).unwrap();
        assert_eq!(a.width, 40);
    }

    #[test]
    fn attached_w_sets_width() {
        let a = parse(&v(&["-w40"])).unwrap();
        assert_eq!(a.width, 40);
    }

    #[test]
    fn digit_abbreviation_as_first_arg() {
        let a = parse(&v(&["-40", "file.txt"])).unwrap();
        assert_eq!(a.width, 40);
        assert_eq!(a.files, vec!["file.txt"]);
    }

    #[test]
    fn digit_abbreviation_only_recognized_first() {
        // "-40" after "-s" is not a digit abbreviation: it's an unrecognized
        // option, which this lenient parser treats as a positional arg.
        let a = parse(&v(&["-s", "-40"])).unwrap();
        assert_eq!(a.width, 80);
        assert!(a.break_at_spaces);
    }

    #[test]
    fn flags_and_files() {
        let a = parse(&v(&["-b", "-s", "in.txt"])).unwrap();
        assert!(a.byte_count);
        assert!(a.break_at_spaces);
        assert_eq!(a.files, vec!["in.txt"]);
    }
}
