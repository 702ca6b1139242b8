use crate::validator::PLACEHOLDER;

use super::types::Padding;

/// Build the target name for one sequence position
pub fn build_sequence_name(pattern: &str, index: u64, padding: Padding, extension: &str) -> String {
    let number = format!("{:0width$}", index, width = padding.width());
    let mut name = pattern.replacen(PLACEHOLDER, &number, 1);
    name.push_str(extension);
    name
}
