use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mavframe_frame::{message_name, CapacityTable};
use mavframe_system::load_capacity_table;
use serde::Serialize;

use crate::cmd::IdsArgs;
use crate::exit::{system_error, CliError, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct IdEntry {
    id: u32,
    name: Option<&'static str>,
    capacity: u8,
}

pub fn run(args: IdsArgs, format: OutputFormat) -> CliResult<i32> {
    let table = match &args.capacities {
        Some(path) => {
            load_capacity_table(path).map_err(|err| system_error("capacity table", err))?
        }
        None => CapacityTable::common(),
    };
    let entries = entries(&table);

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Table => {
            let mut out = Table::new();
            out.load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "CAPACITY"]);
            for entry in &entries {
                out.add_row(vec![
                    entry.id.to_string(),
                    entry.name.unwrap_or("-").to_string(),
                    entry.capacity.to_string(),
                ]);
            }
            println!("{out}");
        }
        OutputFormat::Pretty => {
            for entry in &entries {
                println!(
                    "{:>5}  {:<32} {}",
                    entry.id,
                    entry.name.unwrap_or("-"),
                    entry.capacity
                );
            }
        }
        OutputFormat::Raw => {
            return Err(CliError::usage(
                "ids has no raw form; use --format json, table or pretty",
            ));
        }
    }
    Ok(SUCCESS)
}

fn entries(table: &CapacityTable) -> Vec<IdEntry> {
    table
        .iter()
        .map(|(id, capacity)| IdEntry {
            id,
            name: message_name(id),
            capacity,
        })
        .collect()
}
