//! List command implementation.

use color_eyre::eyre::{Result, bail};
use protofilters_core::{FILTERS, FilterInfo};
use tabled::{Table, Tabled, settings::Style};

use crate::ListArgs;

#[derive(Tabled)]
struct FilterRow {
    #[tabled(rename = "Filter")]
    name: &'static str,
    #[tabled(rename = "Group")]
    group: &'static str,
    #[tabled(rename = "Description")]
    summary: &'static str,
}

impl From<&FilterInfo> for FilterRow {
    fn from(info: &FilterInfo) -> Self {
        Self { name: info.name, group: info.group, summary: info.summary }
    }
}

pub fn run(args: &ListArgs) -> Result<()> {
    let filters: Vec<&FilterInfo> = FILTERS
        .iter()
        .filter(|f| args.group.as_deref().is_none_or(|group| f.group == group))
        .collect();

    if filters.is_empty()
        && let Some(group) = &args.group
    {
        bail!("no filters in group '{group}'");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&filters)?);
        return Ok(());
    }

    let rows: Vec<FilterRow> = filters.into_iter().map(FilterRow::from).collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("-- {} filters --", rows.len());
    Ok(())
}
