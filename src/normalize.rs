//! Rewrites the convenience glyphs a calculator UI produces into the tokens
//! the grammar understands. One ordering constraint: `log(` must become
//! `log10(` before `ln(` becomes `log(`, or freshly rewritten natural logs
//! would be rewritten a second time.

/// Maps UI notation to canonical notation. Pure and infallible; an empty
/// input stays empty (whether an empty expression is an error is decided by
/// the caller, not here).
///
/// | input   | canonical |
/// |---------|-----------|
/// | `×`     | `*`       |
/// | `÷`     | `/`       |
/// | `π`     | `pi`      |
/// | `√(`    | `sqrt(`   |
/// | `log(`  | `log10(`  |
/// | `ln(`   | `log(`    |
///
/// The last two swap follow the usual calculator convention: the `log` button
/// means base 10 while the canonical `log` of the grammar is the natural
/// logarithm.
pub fn normalize(text: &str) -> String {
    text.replace('×', "*")
        .replace('÷', "/")
        .replace('π', "pi")
        .replace("√(", "sqrt(")
        .replace("log(", "log10(")
        .replace("ln(", "log(")
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn test_glyphs() {
        assert_eq!(normalize("2×3÷4"), "2*3/4");
        assert_eq!(normalize("π*2"), "pi*2");
        assert_eq!(normalize("√(2)"), "sqrt(2)");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_log_remapping() {
        // UI log is base 10, UI ln is the canonical natural log.
        assert_eq!(normalize("log(100)"), "log10(100)");
        assert_eq!(normalize("ln(2)"), "log(2)");
        assert_eq!(normalize("log(ln(5))"), "log10(log(5))");
    }

    #[test]
    fn test_canonical_input_untouched() {
        assert_eq!(normalize("sqrt(2)+log10(5)"), "sqrt(2)+log10(5)");
    }
}
