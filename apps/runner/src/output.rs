//! Rendering of a calculation outcome for stdout.

use rebate_core::CalculateRebateResult;

use crate::config::OutputFormat;

/// Renders `result` in the configured format, without a trailing newline.
///
/// ```text
/// Text:  Rebate Result: true          Json:  {"success":true,"rebateAmount":"200.0"}
///        Rebate Amount: 200.0
/// ```
pub fn render(result: &CalculateRebateResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = format!("Rebate Result: {}", result.success);
            if result.success {
                out.push_str(&format!("\nRebate Amount: {}", result.rebate_amount));
            }
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string(result),
    }
}
