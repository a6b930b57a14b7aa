//! brickstats - Brick Catalog Analysis & Chart Generation
//!
//! One-shot exploratory analysis over a brick construction-set catalog
//! (colors, sets, themes): loads the CSV tables, answers the headline
//! questions on stdout and renders four descriptive charts.

mod analysis;
mod charts;
mod data;

use anyhow::Context as _;
use polars::prelude::*;
use std::fs;
use std::path::Path;

use analysis::{Aggregator, Joiner};
use charts::ChartRenderer;
use data::Catalog;
use plotters::style::{BLUE, GREEN, RED};

fn main() -> anyhow::Result<()> {
    let catalog = Catalog::load(Path::new("data")).context("failed to load catalog tables")?;
    println!(
        "Loaded catalog: {} colors, {} sets, {} themes",
        catalog.colors.height(),
        catalog.sets.height(),
        catalog.themes.height()
    );

    let (transparent, opaque) = Aggregator::transparency_counts(&catalog.colors)?;
    println!("Colors: {} transparent, {} opaque", transparent, opaque);

    let first_sets = Aggregator::top_n(&catalog.sets, "year", 5, false)?;
    println!("Earliest sets:");
    print_set_rows(&first_sets)?;

    let largest_sets = Aggregator::top_n(&catalog.sets, "num_parts", 5, true)?;
    println!("Largest sets by part count:");
    print_set_rows(&largest_sets)?;

    // Year-on-year release counts; 1949 is the launch year. The lookups are
    // deliberate direct accesses that abort on a missing year.
    let sets_by_year = Aggregator::count_by_year(&catalog.sets)?;
    println!("Sets released in 1949: {}", sets_by_year.get(1949)?);
    println!(
        "Sets released in 1955: {} vs 2019: {}",
        sets_by_year.get(1955)?,
        sets_by_year.get(2019)?
    );

    fs::create_dir_all("charts").context("failed to create chart directory")?;

    // Data past 2018 covers partial calendar years, so the line chart stops there.
    let sets_chart = Path::new("charts").join("sets_per_year.png");
    ChartRenderer::line_chart(
        &sets_by_year.slice(1949, 2018),
        "Number of Sets Released Over Time",
        "Year",
        "Number of Sets",
        &sets_chart,
    )?;

    let themes_by_year = Aggregator::distinct_themes_by_year(&catalog.sets)?;
    let dual_chart = Path::new("charts").join("sets_and_themes_per_year.png");
    ChartRenderer::dual_axis_line_chart(
        &sets_by_year.slice(1949, 2019),
        &themes_by_year.slice(1949, 2019),
        "Number of Sets and Themes Released by Year",
        "Year",
        "Number of Sets",
        "Number of Themes",
        GREEN,
        BLUE,
        &dual_chart,
    )?;

    // Did sets grow in size and complexity over time?
    let parts_per_year = Aggregator::mean_parts_by_year(&catalog.sets)?;
    println!(
        "Average parts per set in 1954: {:.1} vs 2017: {:.1}",
        parts_per_year.get(1954)?,
        parts_per_year.get(2017)?
    );

    // The trailing two years are incomplete and would drag the trend down.
    let parts_chart = Path::new("charts").join("mean_parts_per_year.png");
    ChartRenderer::scatter_chart(
        &parts_per_year.drop_last(2),
        "Average Number of Parts per Set Over Time",
        "Year",
        "Average Number of Parts",
        &parts_chart,
    )?;

    let star_wars_ids = Joiner::theme_ids_by_name(&catalog.themes, "Star Wars")?;
    let star_wars_sets = Joiner::sets_in_themes(&catalog.sets, &star_wars_ids)?;
    println!(
        "Star Wars: {} theme id(s) covering {} sets",
        star_wars_ids.len(),
        star_wars_sets.height()
    );

    // Sets per theme, joined with the themes table for readable labels.
    let mut theme_counts = Joiner::count_by_key(&catalog.sets, "theme_id")?;
    theme_counts.rename("theme_id", "id".into())?;
    let named_counts = Joiner::inner_join(&theme_counts, &catalog.themes, "id")?;
    // The join does not guarantee row order; restore largest-first before slicing.
    let named_counts = named_counts.sort(
        ["set_count"],
        SortMultipleOptions::default().with_order_descending(true),
    )?;
    let top_themes = named_counts.head(Some(10));

    let names: Vec<String> = top_themes
        .column("name")?
        .str()?
        .into_iter()
        .map(|name| name.unwrap_or_default().to_string())
        .collect();
    let counts = top_themes.column("set_count")?.cast(&DataType::Float64)?;
    let counts: Vec<f64> = counts.f64()?.into_iter().flatten().collect();

    let themes_chart = Path::new("charts").join("top_themes.png");
    ChartRenderer::bar_chart(
        &names,
        &counts,
        "Top 10 Themes with the Most Sets",
        "Theme Name",
        "Number of Sets",
        RED,
        (1400, 800),
        45,
        &themes_chart,
    )?;

    // Hand the rendered files to the system viewer; headless environments
    // just keep the PNGs on disk.
    for chart in [&sets_chart, &dual_chart, &parts_chart, &themes_chart] {
        match open::that(chart) {
            Ok(()) => println!("Chart rendered: {}", chart.display()),
            Err(err) => println!(
                "Chart rendered: {} (viewer unavailable: {})",
                chart.display(),
                err
            ),
        }
    }

    Ok(())
}

/// Print year, name and part count for each row of a sets selection.
fn print_set_rows(df: &DataFrame) -> anyhow::Result<()> {
    let years = df.column("year")?.cast(&DataType::Int32)?;
    let years = years.i32()?;
    let names = df.column("name")?.str()?;
    let parts = df.column("num_parts")?.cast(&DataType::Int64)?;
    let parts = parts.i64()?;

    for i in 0..df.height() {
        println!(
            "  {} - {} ({} parts)",
            years.get(i).unwrap_or_default(),
            names.get(i).unwrap_or_default(),
            parts.get(i).unwrap_or_default()
        );
    }
    Ok(())
}
