//! Terminal rendering of jobs, configuration and settings

use colored::*;
use heimdall_core::domain::config::ConfigResult;
use heimdall_core::domain::job::{FlinkJob, JobSnapshot, JobSummary};
use heimdall_core::domain::settings::{
    SHOW_JOB_FLINK_VERSION, SHOW_JOB_IMAGE, SHOW_JOB_PARALLELISM, Settings,
};
use std::ops::Range;

/// Column toggles and paging taken from the settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub cards: bool,
    pub show_parallelism: bool,
    pub show_flink_version: bool,
    pub show_image: bool,
    pub page_size: usize,
    pub page: usize,
}

impl View {
    /// Reads the view options, falling back to the defaults for anything
    /// missing or of the wrong type
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            cards: settings.display_mode() == Some("cards"),
            show_parallelism: settings.flag(SHOW_JOB_PARALLELISM).unwrap_or(true),
            show_flink_version: settings.flag(SHOW_JOB_FLINK_VERSION).unwrap_or(true),
            show_image: settings.flag(SHOW_JOB_IMAGE).unwrap_or(true),
            page_size: settings.page_size().map_or(20, |n| n as usize),
            page: settings.current_page().map_or(1, |n| n as usize),
        }
    }
}

/// Index range of the jobs shown on `page` (1-based)
///
/// A page size of zero shows everything. Pages past the end are empty.
pub fn page_bounds(total: usize, page_size: usize, page: usize) -> Range<usize> {
    if page_size == 0 {
        return 0..total;
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// Number of pages needed for `total` jobs
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Formats an epoch-milliseconds start time
pub fn format_start_time(millis: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Print a job snapshot as published by the poller
pub fn print_snapshot(snapshot: &JobSnapshot, view: &View) {
    if !snapshot.loaded {
        println!("{}", "Loading jobs...".dimmed());
        return;
    }

    if let Some(error) = &snapshot.error {
        println!("{}", format!("Failed to load jobs: {}", error).red());
        return;
    }

    print_jobs(&snapshot.items, view);
}

/// Print one page of jobs
pub fn print_jobs(jobs: &[JobSummary], view: &View) {
    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return;
    }

    let range = page_bounds(jobs.len(), view.page_size, view.page);
    let pages = page_count(jobs.len(), view.page_size);

    println!(
        "{}",
        format!(
            "Found {} job(s), page {}/{}:",
            jobs.len(),
            view.page.max(1),
            pages
        )
        .bold()
    );
    println!();

    for summary in &jobs[range] {
        match summary.as_flink_job() {
            Some(job) if view.cards => print_job_card(&job, view),
            Some(job) => print_job_row(&job, view),
            None => println!("  {} {}", "▸".cyan(), summary.as_value()),
        }
    }
}

fn print_job_row(job: &FlinkJob, view: &View) {
    let mut row = format!(
        "  {} {:<32} {:<16} {}",
        "▸".cyan(),
        job.name.as_deref().unwrap_or("-"),
        job.namespace.as_deref().unwrap_or("-").dimmed(),
        colorize_status(job.status.as_deref()),
    );

    if view.show_parallelism {
        let parallelism = job.parallelism.map_or("-".to_string(), |p| p.to_string());
        row.push_str(&format!("  p={}", parallelism));
    }
    if view.show_flink_version {
        row.push_str(&format!("  flink={}", job.flink_version.as_deref().unwrap_or("-")));
    }
    if view.show_image {
        row.push_str(&format!(
            "  {}",
            job.short_image.as_deref().unwrap_or("-").dimmed()
        ));
    }

    println!("{}", row);
}

fn print_job_card(job: &FlinkJob, view: &View) {
    println!(
        "  {} {}",
        "▸".cyan(),
        job.name.as_deref().unwrap_or("-").bold()
    );
    if let Some(id) = &job.id {
        println!("    ID:        {}", id.dimmed());
    }
    println!("    Namespace: {}", job.namespace.as_deref().unwrap_or("-"));
    println!("    Status:    {}", colorize_status(job.status.as_deref()));
    if let Some(kind) = &job.job_type {
        println!("    Type:      {}", kind);
    }
    if let Some(started) = job.start_time.and_then(format_start_time) {
        println!("    Started:   {}", started.dimmed());
    }
    if view.show_parallelism {
        if let Some(parallelism) = job.parallelism {
            println!("    Parallelism: {}", parallelism);
        }
    }
    if view.show_flink_version {
        if let Some(version) = &job.flink_version {
            println!("    Flink:     {}", version);
        }
    }
    if view.show_image {
        if let Some(image) = &job.short_image {
            println!("    Image:     {}", image.dimmed());
        }
    }
    for (component, resources) in &job.resources {
        println!(
            "    {:<9}  replicas={} cpu={} mem={}",
            format!("{}:", component),
            resources.replicas.map_or("-".to_string(), |r| r.to_string()),
            resources.cpu.as_deref().unwrap_or("-"),
            resources.mem.as_deref().unwrap_or("-"),
        );
    }
    println!();
}

/// Print the configuration load result
pub fn print_config(result: &ConfigResult) {
    match result {
        ConfigResult::Unresolved => println!("{}", "Configuration not loaded yet.".dimmed()),
        ConfigResult::Failed { message } => println!("{}", message.red()),
        ConfigResult::Resolved(doc) => {
            println!("{}", "Endpoint path patterns:".bold());
            for name in ["flinkUi", "flinkApi", "metrics", "logs"] {
                let pattern = result.endpoint_pattern(name).unwrap_or("-");
                println!("  {:<9} {}", name.cyan(), pattern);
            }
            if let Ok(pretty) = serde_json::to_string_pretty(doc) {
                println!("\n{}", "Raw document:".bold());
                println!("{}", pretty.dimmed());
            }
        }
    }
}

/// Print every preference
pub fn print_settings(settings: &Settings) {
    println!("{}", "Settings:".bold());
    for (key, value) in settings.iter() {
        println!("  {} = {}", key.cyan(), value);
    }
}

/// Colorize job status for display
fn colorize_status(status: Option<&str>) -> ColoredString {
    let status = status.unwrap_or("UNKNOWN");
    match status {
        "RUNNING" => status.green(),
        "FAILED" | "FAILING" => status.red(),
        "FINISHED" => status.cyan(),
        "CANCELED" | "CANCELLING" | "SUSPENDED" => status.dimmed(),
        _ => status.yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heimdall_core::domain::settings::{CURRENT_PAGE, DISPLAY_MODE, PAGE_SIZE};
    use serde_json::json;

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(45, 20, 1), 0..20);
        assert_eq!(page_bounds(45, 20, 3), 40..45);
        assert_eq!(page_bounds(45, 20, 4), 45..45);
        assert_eq!(page_bounds(45, 20, 0), 0..20);
        assert_eq!(page_bounds(45, 0, 7), 0..45);
        assert_eq!(page_bounds(0, 20, 1), 0..0);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn test_view_from_defaults() {
        let view = View::from_settings(&Settings::defaults());
        assert_eq!(
            view,
            View {
                cards: false,
                show_parallelism: true,
                show_flink_version: true,
                show_image: true,
                page_size: 20,
                page: 1,
            }
        );
    }

    #[test]
    fn test_view_tolerates_odd_values() {
        let settings = Settings::defaults()
            .with(DISPLAY_MODE, "cards")
            .with(PAGE_SIZE, "5")
            .with(CURRENT_PAGE, json!(null))
            .with(SHOW_JOB_IMAGE, "no");
        let view = View::from_settings(&settings);

        assert!(view.cards);
        assert_eq!(view.page_size, 5);
        assert_eq!(view.page, 1);
        assert!(view.show_image);
    }

    #[test]
    fn test_format_start_time() {
        assert_eq!(
            format_start_time(1687261027814).as_deref(),
            Some("2023-06-20 11:37:07")
        );
    }
}
