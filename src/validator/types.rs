/// Token replaced by the sequence number in a naming pattern
pub const PLACEHOLDER: &str = "{number}";

/// Longest pattern accepted, in characters
pub const MAX_PATTERN_LENGTH: usize = 200;

/// Outcome of checking a naming pattern; every violated rule is listed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternValidation {
    pub errors: Vec<String>,
}

impl PatternValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn format_error_message(&self) -> String {
        let mut msg = String::from("The naming pattern is not valid:\n");
        for err in &self.errors {
            msg.push_str(&format!("  - {}\n", err));
        }
        msg
    }
}
