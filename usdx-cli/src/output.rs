//! Output abstraction for testable printing
//!
//! Command handlers print through the [`Output`] trait so tests can capture
//! what a command reports without touching stdout.

use crate::error::CliResult;

/// Output abstraction for printing results
pub trait Output {
    /// Print normal output
    fn print(&self, msg: &str) -> CliResult<()>;

    /// Print formatted JSON
    fn print_json(&self, data: &serde_json::Value) -> CliResult<()> {
        self.print(&serde_json::to_string_pretty(data)?)
    }

    /// Print error message
    fn error(&self, msg: &str) -> CliResult<()>;

    /// Print success message with checkmark
    fn success(&self, msg: &str) -> CliResult<()> {
        self.print(&format!("✅ {}", msg))
    }

    /// Print warning message
    fn warning(&self, msg: &str) -> CliResult<()> {
        self.print(&format!("⚠️  {}", msg))
    }

    /// Print info message
    fn info(&self, msg: &str) -> CliResult<()> {
        self.print(&format!("ℹ️  {}", msg))
    }

    /// Print a section header
    fn header(&self, title: &str) -> CliResult<()> {
        self.print(&format!("\n{}\n{}", title, "=".repeat(title.chars().count())))
    }
}

/// Standard console output implementation
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn print(&self, msg: &str) -> CliResult<()> {
        println!("{}", msg);
        Ok(())
    }

    fn error(&self, msg: &str) -> CliResult<()> {
        eprintln!("❌ {}", msg);
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Mock output for testing - captures all output
    #[derive(Default)]
    pub struct MockOutput {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl MockOutput {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn get_messages(&self) -> Vec<String> {
            self.messages.borrow().clone()
        }

        pub fn get_errors(&self) -> Vec<String> {
            self.errors.borrow().clone()
        }

        /// Everything printed, joined by newlines
        pub fn transcript(&self) -> String {
            self.get_messages().join("\n")
        }

        pub fn assert_contains_message(&self, substring: &str) {
            let messages = self.get_messages();
            assert!(
                messages.iter().any(|m| m.contains(substring)),
                "Expected message containing '{}', but got: {:?}",
                substring,
                messages
            );
        }
    }

    impl Output for MockOutput {
        fn print(&self, msg: &str) -> CliResult<()> {
            self.messages.borrow_mut().push(msg.to_string());
            Ok(())
        }

        fn error(&self, msg: &str) -> CliResult<()> {
            self.errors.borrow_mut().push(msg.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_mock_output_captures_messages_and_errors() {
        let output = MockOutput::new();
        output.print("first").unwrap();
        output.error("broken").unwrap();

        assert_eq!(output.get_messages(), vec!["first".to_string()]);
        assert_eq!(output.get_errors(), vec!["broken".to_string()]);
    }

    #[test]
    fn test_output_helper_methods() {
        let output = MockOutput::new();
        output.success("Deposited").unwrap();
        output.warning("Careful").unwrap();
        output.header("Tokens").unwrap();

        let messages = output.get_messages();
        assert!(messages[0].starts_with("✅"));
        assert!(messages[1].starts_with("⚠️"));
        assert!(messages[2].ends_with("======"));
    }

    #[test]
    fn test_print_json_is_pretty() {
        let output = MockOutput::new();
        output.print_json(&serde_json::json!({ "amount": "100" })).unwrap();
        assert!(output.transcript().contains("\"amount\": \"100\""));
    }
}
