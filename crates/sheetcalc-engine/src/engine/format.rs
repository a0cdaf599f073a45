/// Canonical text for a numeric literal.
///
/// Uses the shortest representation that parses back to the same `f64`, so
/// "5.0000" becomes "5" and "6.7E-2" becomes "0.067". Never uses exponent
/// notation, which keeps the output inside the formula number grammar.
pub fn canonical_number(n: f64) -> String {
    n.to_string()
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}
