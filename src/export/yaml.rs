//! YAML Export functionality
//!
//! Human-readable variant of the JSON settlement export.

use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::export::json::LedgerExport;

/// Export the settlement report to YAML
pub fn export_ledger_yaml<W: Write>(export: &LedgerExport, writer: &mut W) -> SplitResult<()> {
    let export_err = |e: std::io::Error| SplitError::Export(e.to_string());

    writeln!(writer, "# split-ledger settlement export").map_err(export_err)?;
    writeln!(writer, "# Group: {}", export.group_name).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(|e| SplitError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export for verification
pub fn import_from_yaml(yaml_str: &str) -> SplitResult<LedgerExport> {
    let export: LedgerExport =
        serde_yaml::from_str(yaml_str).map_err(|e| SplitError::Validation(e.to_string()))?;

    export.validate().map_err(SplitError::Validation)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Group, Member, Money, Split};
    use crate::services::TieBreak;
    use chrono::NaiveDate;

    fn export() -> LedgerExport {
        let mut group = Group::new("Rent", "GBP");
        let a = group.add_member(Member::new("Ana"));
        let b = group.add_member(Member::new("Ben"));
        group.add_expense(
            Expense::new(
                "March",
                Money::from_cents(120_000),
                b,
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            )
            .with_splits(vec![
                Split::new(a, Money::from_cents(70_000)),
                Split::new(b, Money::from_cents(50_000)),
            ]),
        );
        LedgerExport::from_group(&group, TieBreak::InputOrder).unwrap()
    }

    #[test]
    fn test_yaml_export() {
        let mut output = Vec::new();
        export_ledger_yaml(&export(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# split-ledger settlement export\n# Group: Rent"));
        assert!(yaml.contains("currency_code: GBP"));
        assert!(yaml.contains("amount: 70000"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut output = Vec::new();
        export_ledger_yaml(&export(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        // Comment lines are valid YAML, no stripping needed
        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.group_name, "Rent");
        assert_eq!(imported.settlements[0].from_name, "Ana");
        assert_eq!(imported.settlements[0].amount, Money::from_cents(70_000));
    }
}
