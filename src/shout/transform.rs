//! Post-processing applied to the upstream output.

/// Upgrade shouted text: every `?` becomes `‽`, then every `.` becomes `!`.
///
/// The two replacements run in that order, one after the other.
pub fn proify(text: &str) -> String {
    text.replace('?', "‽").replace('.', "!")
}
