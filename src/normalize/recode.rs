//! Minimal `printf`-style formatter for the *recode* policy's byte template.
//!
//! `unorm.c` accepts a user-supplied format string containing exactly one
//! `%x`/`%X`/`%o`/`%d`/`%u` conversion (with an optional field width and
//! zero-padding flag) and substitutes the invalid byte's value into it. A
//! full `printf` implementation is unwarranted for one conversion spec, so
//! this hand-rolls just the subset the original accepts.

/// Expand `fmt`'s single byte-valued conversion with `byte`'s value,
/// copying every other character through unchanged. An unrecognized or
/// absent conversion is treated as literal text (no substitution occurs),
/// matching the original's tolerance for a malformed `--recode-format`.
#[must_use]
pub fn format_recode(fmt: &str, byte: u8) -> String {
    let mut out = String::with_capacity(fmt.len() + 4);
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push('%');
            break;
        };
        if next == '%' {
            out.push('%');
            chars.next();
            continue;
        }

        let mut zero_pad = false;
        let mut width = 0usize;
        let mut peeked = next;
        if peeked == '0' {
            zero_pad = true;
            chars.next();
            peeked = *chars.peek().unwrap_or(&'\0');
        }
        while peeked.is_ascii_digit() {
            width = width * 10 + peeked.to_digit(10).unwrap() as usize;
            chars.next();
            peeked = *chars.peek().unwrap_or(&'\0');
        }

        match chars.next() {
            Some('x') => out.push_str(&pad(&format!("{byte:x}"), width, zero_pad)),
            Some('X') => out.push_str(&pad(&format!("{byte:X}"), width, zero_pad)),
            Some('o') => out.push_str(&pad(&format!("{byte:o}"), width, zero_pad)),
            Some('d') | Some('u') => out.push_str(&pad(&format!("{byte}"), width, zero_pad)),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }

    out
}

fn pad(digits: &str, width: usize, zero_pad: bool) -> String {
    if digits.len() >= width {
        return digits.to_owned();
    }
    let fill = if zero_pad { '0' } else { ' ' };
    let mut s: String = std::iter::repeat(fill).take(width - digits.len()).collect();
    s.push_str(digits);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format() {
        assert_eq!(format_recode("<0x%02x>", 0x80), "<0x80>");
        assert_eq!(format_recode("<0x%02x>", 0x05), "<0x05>");
    }

    #[test]
    fn uppercase_hex() {
        assert_eq!(format_recode("%X", 0xAB), "AB");
    }

    #[test]
    fn decimal_and_octal() {
        assert_eq!(format_recode("%d", 200), "200");
        assert_eq!(format_recode("%o", 8), "10");
    }

    #[test]
    fn literal_percent_passes_through() {
        assert_eq!(format_recode("100%% (%x)", 0x0A), "100% (a)");
    }

    #[test]
    fn no_conversion_is_literal() {
        assert_eq!(format_recode("???", 0x41), "???");
    }

    #[test]
    fn unpadded_width_left_as_is_when_digits_exceed_width() {
        assert_eq!(format_recode("%02x", 0xFFu8.wrapping_add(0)), "ff");
    }
}
