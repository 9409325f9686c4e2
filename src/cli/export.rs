//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{SplitError, SplitResult};
use crate::export::{export_expenses_csv, export_settlement, ExportFormat};

use super::CliContext;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Group document (path or name in the groups directory)
    pub group: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export the expense ledger instead of the settlement (CSV only)
    #[arg(long)]
    pub expenses: bool,
}

/// Handle export
pub fn handle_export_command(ctx: &CliContext, args: ExportArgs) -> SplitResult<()> {
    if args.expenses && args.format != ExportFormat::Csv {
        return Err(SplitError::Validation(
            "--expenses is only available with --format csv".into(),
        ));
    }

    let group = ctx.load_group(&args.group)?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SplitError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if args.expenses {
        export_expenses_csv(&group, &mut writer)?;
    } else {
        export_settlement(&group, ctx.settings.tie_break, args.format, &mut writer)?;
    }
    writer
        .flush()
        .map_err(|e| SplitError::Export(e.to_string()))?;
    drop(writer);

    if let Some(path) = &args.output {
        eprintln!("Exported {} to: {}", group.name, path.display());
    }

    Ok(())
}
