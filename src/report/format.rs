//! Terminal output for a finished run.
//!
//! Formatting lives here so the pipeline only counts and the text can change in
//! one place.

use crate::domain::RunSummary;

const RULE: &str = "=============================================";

/// Framed, user-facing summary block.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str("=== NASA Mars Rover Image Download Summary ===\n");
    out.push_str(&format!("Total dates processed: {}\n", summary.tokens));
    out.push_str(&format!("Successfully downloaded images: {}\n", summary.succeeded));
    out.push_str(&format!("Invalid dates: {}\n", summary.invalid));
    out.push_str(&format!("Dates with no images: {}\n", summary.no_images));
    out.push_str(&format!("Failed dates: {}\n", summary.failed));
    out.push_str(&format!(
        "Photos: {} saved, {} failed\n",
        summary.photos_saved, summary.photos_failed
    ));
    out.push_str(RULE);

    out
}

/// Emit the summary counters as one structured log event.
pub fn log_summary(summary: &RunSummary) {
    tracing::info!(
        tokens = summary.tokens,
        succeeded = summary.succeeded,
        invalid = summary.invalid,
        no_images = summary.no_images,
        failed = summary.failed,
        photos_saved = summary.photos_saved,
        photos_failed = summary.photos_failed,
        "image download complete"
    );
}
