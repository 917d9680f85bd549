/// Format a number for display.
///
/// Whole numbers print without a fraction; other finite values use the
/// shortest representation that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n == f64::INFINITY {
        "#INF!".to_string()
    } else if n == f64::NEG_INFINITY {
        "-#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // Adding zero folds -0 into 0.
        format!("{:.0}", n + 0.0)
    } else {
        format!("{}", n)
    }
}
