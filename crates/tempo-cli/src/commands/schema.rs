use schemars::schema_for;
use tempo_core::entities::{Task, TimeLog};
use tempo_report::ReportSnapshot;
use tempo_report::listing::LogLine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `tempo schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Task => schema_for!(Task),
        SchemaType::TimeLog => schema_for!(TimeLog),
        SchemaType::LogLine => schema_for!(LogLine),
        SchemaType::Report => schema_for!(ReportSnapshot),
    };
    output(&schema, flags.format)
}
