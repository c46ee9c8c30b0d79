use std::path::Path;

use breakdown::SceneRecord;

use crate::cli::OutputFormat;
use crate::shared::{csv_escape, open_schedule, parse_options, report, single_line};

pub fn run(
    schedule: &Path,
    tokens: bool,
    cast_split: f64,
    format: &OutputFormat,
) -> Result<(), i32> {
    let options = parse_options(cast_split)?;
    let source = open_schedule(schedule, tokens)?;
    let parse = breakdown::parse(&*source, &options).map_err(report)?;
    for warning in &parse.warnings {
        eprintln!("Warning: {warning}");
    }

    match format {
        OutputFormat::Text => write_text(&parse.records),
        OutputFormat::Json => write_json(&parse.records),
        OutputFormat::Csv => write_csv(&parse.records),
    }
}

fn write_text(records: &[SceneRecord]) -> Result<(), i32> {
    println!("day\tscene\ttiming\tsummary\tcast");
    for r in records {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            r.day,
            r.scene,
            r.timing,
            single_line(&r.summary),
            single_line(&r.cast),
        );
    }
    Ok(())
}

fn write_json(records: &[SceneRecord]) -> Result<(), i32> {
    let json = serde_json::to_string(records).map_err(report)?;
    println!("{json}");
    Ok(())
}

fn write_csv(records: &[SceneRecord]) -> Result<(), i32> {
    println!("day,scene,timing,summary,cast");
    for r in records {
        println!(
            "{},{},{},{},{}",
            csv_escape(&r.day),
            csv_escape(&r.scene),
            csv_escape(&r.timing),
            csv_escape(&r.summary),
            csv_escape(&r.cast),
        );
    }
    Ok(())
}
