use std::path::Path;

use breakdown::{ParseOptions, RoleMap};

use crate::cli::ListFormat;
use crate::shared::{open_schedule, report};

pub fn run(schedule: &Path, tokens: bool, format: &ListFormat) -> Result<(), i32> {
    let source = open_schedule(schedule, tokens)?;
    let (roles, warning) =
        breakdown::breakdown_core::build_role_map(&*source, &ParseOptions::default());
    if let Some(warning) = warning {
        eprintln!("Warning: {warning}");
    }

    match format {
        ListFormat::Text => {
            println!("id\tname");
            for (id, name) in roles.sorted_entries() {
                println!("{id}\t{name}");
            }
            Ok(())
        }
        ListFormat::Json => write_json(&roles),
    }
}

fn write_json(roles: &RoleMap) -> Result<(), i32> {
    let entries: Vec<serde_json::Value> = roles
        .sorted_entries()
        .into_iter()
        .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
        .collect();
    let json = serde_json::to_string(&entries).map_err(report)?;
    println!("{json}");
    Ok(())
}
