//! Formatting helpers shared by the layout routines: currency rendering,
//! notes splitting, and output file naming.

/// Render a monetary amount with a fixed `$` symbol and exactly two
/// fractional digits. No locale handling, no thousands separators.
pub fn currency(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Split a notes field into display lines.
///
/// A literal two-character `\n` escape marks a line break. Genuine
/// newline characters are normalized into the same escape first, so both
/// forms partition identically. Empty notes yield exactly one empty
/// line, which still advances the cursor when drawn.
pub fn split_notes(raw: &str) -> Vec<String> {
    raw.replace('\n', "\\n")
        .split("\\n")
        .map(str::to_string)
        .collect()
}

/// Derive the output file name from the receipt number and recipient
/// name, with spaces in the name replaced by hyphens.
pub fn output_filename(number: &str, recipient_name: &str) -> String {
    format!("{}-{}.pdf", number, recipient_name.replace(' ', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_pins_two_fractional_digits() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(1330.0), "$1330.00");
        assert_eq!(currency(5.0), "$5.00");
        assert_eq!(currency(28.0), "$28.00");
    }

    #[test]
    fn currency_rounds_to_nearest_cent() {
        assert_eq!(currency(99.999), "$100.00");
        assert_eq!(currency(0.004), "$0.00");
        assert_eq!(currency(1.006), "$1.01");
    }

    #[test]
    fn empty_notes_yield_one_empty_line() {
        assert_eq!(split_notes(""), vec![String::new()]);
    }

    #[test]
    fn escape_form_splits_into_lines() {
        assert_eq!(split_notes("a\\nb\\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn literal_newlines_partition_like_the_escape() {
        assert_eq!(split_notes("a\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_notes("a\nb\\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn single_line_notes_stay_whole() {
        assert_eq!(
            split_notes("Thank you for your business"),
            vec!["Thank you for your business"]
        );
    }

    #[test]
    fn filename_hyphenates_recipient_spaces() {
        assert_eq!(output_filename("083", "John Doe"), "083-John-Doe.pdf");
        assert_eq!(output_filename("7", "Ada"), "7-Ada.pdf");
    }
}
