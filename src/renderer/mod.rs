use colored::*;
use crate::api::CodeFix;

pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(fix: &CodeFix) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", "=== Code Fix Report ===".bright_cyan().bold()));
        output.push_str(&format!("{} {}\n", "Language:".bold(), fix.language.yellow()));
        output.push_str(&format!("{} {}\n", "Error Type:".bold(), fix.error_type.yellow()));

        output.push_str(&format!("\n{}\n", "Original Code:".red().bold()));
        output.push_str(&fix.original_code);
        if !fix.original_code.ends_with('\n') {
            output.push('\n');
        }

        output.push_str(&format!("\n{}\n", "Fixed Code:".green().bold()));
        output.push_str(&fix.fixed_code);
        if !fix.fixed_code.ends_with('\n') {
            output.push('\n');
        }

        output.push_str(&format!("\n{}\n", "Explanation:".bright_blue().bold()));
        output.push_str(&fix.explanation);
        output.push('\n');
        output
    }

    pub fn print(fix: &CodeFix) {
        print!("{}", Self::render(fix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sections_in_order() {
        colored::control::set_override(false);
        let fix = CodeFix {
            original_code: "print(1".into(),
            fixed_code: "print(1)".into(),
            explanation: "closed the call".into(),
            language: "python".into(),
            error_type: "syntax_error".into(),
        };

        let report = ReportRenderer::render(&fix);
        let positions: Vec<usize> = [
            "=== Code Fix Report ===",
            "Language: python",
            "Error Type: syntax_error",
            "Original Code:\nprint(1\n",
            "Fixed Code:\nprint(1)\n",
            "Explanation:\nclosed the call",
        ]
        .iter()
        .map(|s| report.find(s).unwrap_or_else(|| panic!("missing {:?} in {}", s, report)))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
