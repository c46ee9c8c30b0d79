use std::path::{Path, PathBuf};

use breakdown::{BreakdownOutput, DEFAULT_OUTPUT_NAME, PageDiagnostics, SceneRecord};

use crate::shared::{open_schedule, parse_options, report, single_line};

/// Arguments of the build subcommand.
pub struct BuildArgs<'a> {
    pub schedule: &'a Path,
    pub template: &'a Path,
    pub output: Option<&'a Path>,
    pub cast_split: f64,
    pub tokens: bool,
    pub debug: bool,
    pub super_debug: bool,
    pub changelog: Option<&'a Path>,
}

pub fn run(args: &BuildArgs<'_>) -> Result<(), i32> {
    let options = parse_options(args.cast_split)?;
    let source = open_schedule(args.schedule, args.tokens)?;
    let output =
        breakdown::run_with_template_file(&*source, args.template, &options).map_err(report)?;

    let path = args
        .output
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME), Path::to_path_buf);
    output.save(&path).map_err(report)?;
    tracing::debug!(path = %path.display(), bytes = output.document.len(), "wrote breakdown");

    for warning in &output.schedule.warnings {
        eprintln!("Warning: {warning}");
    }
    if args.super_debug {
        print_diagnostics(output.diagnostics())?;
    }
    print_preview(output.preview(), output.schedule.records.len());
    print_changelog(&output);
    if let Some(changelog) = args.changelog {
        let mut text = output.changelog_lines().join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        std::fs::write(changelog, text).map_err(|e| {
            eprintln!("Error: cannot write {}: {e}", changelog.display());
            1
        })?;
    }
    if args.debug {
        let json = serde_json::to_string_pretty(&output.summary).map_err(report)?;
        println!("{json}");
    }
    println!("Saved: {}", path.display());
    Ok(())
}

fn print_preview(records: &[SceneRecord], total: usize) {
    println!("Preview ({} of {total} rows):", records.len());
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
}

fn print_changelog(output: &BreakdownOutput) {
    println!("Changes:");
    if output.changelog.is_empty() {
        println!("  (none)");
    }
    for line in output.changelog_lines() {
        println!("  {line}");
    }
}

fn print_diagnostics(pages: &[PageDiagnostics]) -> Result<(), i32> {
    let json = serde_json::to_string_pretty(pages).map_err(report)?;
    println!("{json}");
    Ok(())
}
