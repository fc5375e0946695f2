//! Argument parsing for the `unorm`-like normalizer/repair binary.
//!
//! `-n FORM` (NFD/NFC/NFKD/NFKC, plus abbreviated aliases), `-p POLICY`
//! (discard/abort/replace/recode), `--replace-char=N`, `--recode-format=FMT`,
//! `-A`/`-C`/`-D`/`-R` as policy synonyms, `-c` (check), `-v` (verbose),
//! `-z` (NUL line delimiter).
//!
//! Letter assignment for the single-letter policy synonyms (not specified
//! precisely beyond "synonyms for the four policies"): `-D` discard, `-A`
//! abort, `-R` replace, `-C` recode — the first letter of each policy name
//! except *recode*, which reuses `-R`'s leftover neighbor since *replace*
//! already claims `-R`.

use crate::config::DEFAULT_REPLACEMENT_CHAR;
use crate::normalize::{Config, Form, Policy};

#[derive(Debug, Clone)]
pub struct UnormArgs {
    pub config: Config,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    MissingValue(String),
    UnknownForm(String),
    UnknownPolicy(String),
    InvalidReplaceChar(String),
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::MissingValue(opt) => write!(f, "option '{opt}' requires an argument"),
            ArgError::UnknownForm(s) => write!(f, "unknown normalization form: '{s}'"),
            ArgError::UnknownPolicy(s) => write!(f, "unknown policy: '{s}'"),
            ArgError::InvalidReplaceChar(s) => write!(f, "invalid --replace-char value: '{s}'"),
        }
    }
}

impl std::error::Error for ArgError {}

fn parse_form(s: &str) -> Result<Form, ArgError> {
    match s.to_ascii_uppercase().as_str() {
        "NFD" | "D" => Ok(Form::Nfd),
        "NFC" | "C" => Ok(Form::Nfc),
        "NFKD" | "KD" => Ok(Form::Nfkd),
        "NFKC" | "KC" => Ok(Form::Nfkc),
        _ => Err(ArgError::UnknownForm(s.to_owned())),
    }
}

fn parse_policy(s: &str) -> Result<Policy, ArgError> {
    match s.to_ascii_lowercase().as_str() {
        "discard" => Ok(Policy::Discard),
        "abort" => Ok(Policy::Abort),
        "replace" => Ok(Policy::Replace(DEFAULT_REPLACEMENT_CHAR)),
        "recode" => Ok(Policy::Recode(Config::recode_format_or_default(None))),
        _ => Err(ArgError::UnknownPolicy(s.to_owned())),
    }
}

fn parse_replace_char(s: &str) -> Result<char, ArgError> {
    let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|_| ArgError::InvalidReplaceChar(s.to_owned()))?
    } else {
        s.parse::<u32>()
            .map_err(|_| ArgError::InvalidReplaceChar(s.to_owned()))?
    };
    if value == 0 || value > 0x10_FFFF {
        return Err(ArgError::InvalidReplaceChar(s.to_owned()));
    }
    char::from_u32(value).ok_or_else(|| ArgError::InvalidReplaceChar(s.to_owned()))
}

pub fn parse(args: &[String]) -> Result<UnormArgs, ArgError> {
    let mut form: Option<Form> = None;
    let mut policy: Option<Policy> = None;
    let mut replace_char: Option<char> = None;
    let mut recode_format: Option<String> = None;
    let mut check_mode = false;
    let mut verbose = false;
    let mut line_delim = b'\n';
    let mut files = Vec::new();

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

        if let Some(rest) = arg.strip_prefix("--replace-char=") {
            replace_char = Some(parse_replace_char(rest)?);
            i += 1;
            continue;
        }
        if let Some(rest) = arg.strip_prefix("--recode-format=") {
            recode_format = Some(rest.to_owned());
            i += 1;
            continue;
        }
        if let Some(stripped) = arg.strip_prefix("-n") {
            let value = take_value(stripped, args, &mut i, "-n")?;
            form = Some(parse_form(&value)?);
            continue;
        }
        if let Some(stripped) = arg.strip_prefix("-p") {
            let value = take_value(stripped, args, &mut i, "-p")?;
            policy = Some(parse_policy(&value)?);
            continue;
        }

        match arg.as_str() {
            "-A" => {
                policy = Some(Policy::Abort);
                i += 1;
            }
            "-C" => {
                policy = Some(Policy::Recode(Config::recode_format_or_default(None)));
                i += 1;
            }
            "-D" => {
                policy = Some(Policy::Discard);
                i += 1;
            }
            "-R" => {
                policy = Some(Policy::Replace(DEFAULT_REPLACEMENT_CHAR));
                i += 1;
            }
            "-c" => {
                check_mode = true;
                i += 1;
            }
            "-v" => {
                verbose = true;
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

    let mut policy = policy.unwrap_or_default();
    if let (Some(c), Policy::Replace(_)) = (replace_char, &policy) {
        policy = Policy::Replace(c);
    }
    if let (Some(fmt), Policy::Recode(_)) = (recode_format, &policy) {
        policy = Policy::Recode(fmt);
    }

    Ok(UnormArgs {
        config: Config {
            policy,
            form,
            line_delim,
            check_mode,
            verbose,
        },
        files,
    })
}

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
    fn parses_form_full_name() {
        let a = parse(&v(&["-n", "NFC"])).unwrap();
        assert_eq!(a.config.form, Some(Form::Nfc));
    }

    #[test]
    fn parses_form_attached_abbreviation() {
        let a = parse(&v(&["-nKD"])).unwrap();
        assert_eq!(a.config.form, Some(Form::Nfkd));
    }

    #[test]
    fn parses_policy_by_name() {
        let a = parse(&v(&["-p", "discard"])).unwrap();
        assert!(matches!(a.config.policy, Policy::Discard));
    }

    #[test]
    fn single_letter_synonyms() {
        assert!(matches!(parse(&v(&["-A"])).unwrap().config.policy, Policy::Abort));
        assert!(matches!(parse(&v(&["-D"])).unwrap().config.policy, Policy::Discard));
        assert!(matches!(parse(&v(&["-R"])).unwrap().config.policy, Policy::Replace(_)));
        assert!(matches!(parse(&v(&["-C"])).unwrap().config.policy, Policy::Recode(_)));
    }

    #[test]
    fn replace_char_overrides_default() {
        let a = parse(&v(&["-R", "--replace-char=65"])).unwrap();
        assert!(matches!(a.config.policy, Policy::Replace('A')));
    }

    #[test]
    fn replace_char_hex_form() {
        let a = parse(&v(&["-R", "--replace-char=0x41"])).unwrap();
        assert!(matches!(a.config.policy, Policy::Replace('A')));
    }

    #[test]
    fn recode_format_overrides_default() {
        let a = parse(&v(&["-C", "--recode-format=[%x]"])).unwrap();
        assert!(matches!(a.config.policy, Policy::Recode(ref f) if f == "[%x]"));
    }

    #[test]
    fn check_and_verbose_flags() {
        let a = parse(&v(&["-c", "-v"])).unwrap();
        assert!(a.config.check_mode);
        assert!(a.config.verbose);
    }

    #[test]
    fn z_flag_sets_nul_delim() {
        let a = parse(&v(&["-z"])).unwrap();
        assert_eq!(a.config.line_delim, 0);
    }

    #[test]
    fn unknown_form_rejected() {
        assert!(matches!(parse(&v(&["-n", "bogus"])), Err(ArgError::UnknownForm(_))));
    }

    #[test]
    fn trailing_files_collected() {
        let a = parse(&v(&["-D", "a.txt", "b.txt"])).unwrap();
        assert_eq!(a.files, vec!["a.txt", "b.txt"]);
    }
}
