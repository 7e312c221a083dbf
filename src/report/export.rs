use std::path::Path;

use crate::error::Result;

use super::types::SuspiciousActivityReport;

pub const SAR_CSV_HEADERS: [&str; 6] = [
    "SAR ID",
    "Account ID",
    "Account Name",
    "Risk Score",
    "Flagged Transactions",
    "Description",
];

/// Encode one record as a single CSV line, without the terminator.
fn encode_line<I, T>(fields: I, style: csv::QuoteStyle) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(style)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Render SARs as CSV.
///
/// Lines are joined with `\n` without a trailing newline. The description is
/// always quoted; other fields are quoted only when they contain a delimiter,
/// quote or line break. The risk score has two decimals.
pub fn export_sars_csv(sars: &[SuspiciousActivityReport]) -> Result<String> {
    let mut lines = Vec::with_capacity(sars.len() + 1);
    lines.push(encode_line(SAR_CSV_HEADERS, csv::QuoteStyle::Necessary)?);

    for sar in sars {
        let risk_score = format!("{:.2}", sar.risk_score);
        let flagged = sar.flagged_transactions.to_string();
        let leading = encode_line(
            [
                sar.id.as_str(),
                sar.account_id.as_str(),
                sar.account_name.as_str(),
                risk_score.as_str(),
                flagged.as_str(),
            ],
            csv::QuoteStyle::Necessary,
        )?;
        let description = encode_line([sar.description.as_str()], csv::QuoteStyle::Always)?;
        lines.push(format!("{},{}", leading, description));
    }

    Ok(lines.join("\n"))
}

/// Write the SAR CSV export to `path`.
pub fn write_sars_csv(path: impl AsRef<Path>, sars: &[SuspiciousActivityReport]) -> Result<()> {
    let content = export_sars_csv(sars)?;
    std::fs::write(path.as_ref(), content)?;
    tracing::info!(
        reports = sars.len(),
        path = %path.as_ref().display(),
        "Exported suspicious activity reports"
    );
    Ok(())
}
