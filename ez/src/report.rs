//! Plain-text rendering for the CLI
//!
//! Colored with `colored`; color is dropped automatically when stdout is
//! not a terminal or `NO_COLOR` is set.

use std::fmt::Write;

use colored::Colorize;
use tracing::debug;

use crate::catalog::Tour;
use crate::itinerary::{DayPlan, ItineraryResult};

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.bright_cyan().bold());
}

fn render_day(out: &mut String, day: &DayPlan) {
    let _ = writeln!(
        out,
        "\n{} {}",
        format!("Day {}", day.day_number).bold(),
        day.theme.yellow()
    );
    for (label, activities) in day.slots() {
        if activities.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}", label.bold());
        for activity in activities {
            let _ = writeln!(
                out,
                "    {:<12} {} {}",
                activity.time.dimmed(),
                activity.description,
                format!("@ {}", activity.location).dimmed()
            );
        }
    }
    if !day.local_tip.is_empty() {
        let _ = writeln!(out, "  {} {}", "Local tip:".green(), day.local_tip);
    }
}

/// Full itinerary as terminal text
pub fn render_itinerary(result: &ItineraryResult) -> String {
    debug!(title = %result.title, "render_itinerary: called");
    let mut out = String::new();

    let _ = writeln!(out, "{}", result.title.bright_cyan().bold());
    let _ = writeln!(out, "{}", result.summary);

    heading(&mut out, "Getting There");
    let transport = &result.transport;
    let _ = writeln!(out, "  {} - {}", transport.mode.bold(), transport.options);
    let _ = writeln!(out, "  Duration: {}  Cost: {}", transport.duration, transport.approx_cost);

    heading(&mut out, "Daily Plan");
    let mut days: Vec<&DayPlan> = result.days.iter().collect();
    days.sort_by_key(|d| d.day_number);
    for day in days {
        render_day(&mut out, day);
    }

    heading(&mut out, "Where to Stay");
    for option in &result.accommodations {
        let _ = writeln!(
            out,
            "  {} ({}) {}",
            option.name.bold(),
            option.category,
            option.approx_cost_per_night.green()
        );
        let _ = writeln!(out, "    {}", option.rationale.dimmed());
    }

    heading(&mut out, "Budget Breakdown");
    for (label, amount) in result.budget.buckets() {
        let _ = writeln!(out, "  {:<12} {}", label, amount);
    }
    let _ = writeln!(
        out,
        "  {:<12} {}",
        "Total".bold(),
        result.budget.total_estimate.green().bold()
    );

    heading(&mut out, "Practical Tips");
    let tips = &result.practical_tips;
    let _ = writeln!(out, "  {} {}", "Weather:".bold(), tips.weather);
    let _ = writeln!(out, "  {} {}", "Safety:".bold(), tips.safety);
    let _ = writeln!(out, "  {} {}", "Packing:".bold(), tips.packing);

    out
}

/// Tour list as terminal text
pub fn render_tours(tours: &[&Tour]) -> String {
    debug!(count = tours.len(), "render_tours: called");
    if tours.is_empty() {
        return format!("{}\n", "No tours match.".dimmed());
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Popular Tours".bright_cyan().bold());
    for tour in tours {
        let _ = writeln!(
            out,
            "  {:>2}. {:<28} {:<12} {:<8} {:>7}  {} ({} reviews)  {}",
            tour.id,
            tour.title,
            tour.location,
            tour.duration,
            tour.price_display(),
            format!("{:.1}", tour.rating).yellow(),
            tour.reviews,
            tour.category.dimmed()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::itinerary::parse_itinerary;

    const PARIS: &str = include_str!("../tests/fixtures/paris_itinerary.json");

    #[test]
    fn test_render_itinerary_includes_every_section() {
        let result = parse_itinerary(PARIS).unwrap();
        let text = render_itinerary(&result);

        assert!(text.contains("Five Days of Art & Light in Paris"));
        for section in ["Getting There", "Daily Plan", "Where to Stay", "Budget Breakdown", "Practical Tips"] {
            assert!(text.contains(section), "missing section {}", section);
        }
        for day in &result.days {
            assert!(text.contains(&format!("Day {}", day.day_number)));
        }
        assert!(text.contains("2000 USD"));
    }

    #[test]
    fn test_render_tours() {
        let tours: Vec<&Tour> = catalog::all().iter().collect();
        let text = render_tours(&tours);
        assert!(text.contains("Santorini Sunset Dreams"));
        assert!(text.contains("$4,500"));
    }

    #[test]
    fn test_render_tours_empty() {
        assert!(render_tours(&[]).contains("No tours match."));
    }
}
