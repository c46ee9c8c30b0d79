use std::path::Path;

use breakdown::{TokenDump, TokenSource};

use crate::shared::{ProgressReporter, open_pdf, report, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>, output: Option<&Path>) -> Result<(), i32> {
    let pdf = open_pdf(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let progress = ProgressReporter::new(page_indices.len());

    let mut dump = TokenDump::default();
    for (i, &idx) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let page = pdf.page_tokens(idx).map_err(|e| {
            progress.finish();
            report(e)
        })?;
        dump.pages.push(page);
    }
    progress.finish();

    match output {
        Some(path) => dump.save(path).map_err(report),
        None => {
            let json = dump.to_json().map_err(report)?;
            println!("{json}");
            Ok(())
        }
    }
}
