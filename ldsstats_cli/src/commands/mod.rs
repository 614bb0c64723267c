pub mod links;
pub mod region;
pub mod regions;
pub mod run;

use indicatif::{ProgressBar, ProgressStyle};
use ldsstats_lib::Progress;

/// Progress bar on stderr; its length is set by the first report.
pub(crate) fn progress_bar(label: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}",
    ) {
        pb.set_style(style);
    }
    pb.set_message(format!("scraping {}...", label));
    pb
}

pub(crate) fn track(pb: &ProgressBar) -> impl FnMut(Progress<'_>) + '_ {
    move |p| {
        pb.set_length(p.total as u64);
        pb.set_position(p.done as u64);
    }
}
