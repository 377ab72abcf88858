use crate::ai::AnalysisClient;
use crate::error::SellersolResult;
use crate::excel::{write_sample_workbook, ReportExporter, SalesImporter, SAMPLE_FILENAME};
use crate::history::HistoryStore;
use crate::types::AnalysisReport;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Rupiah display for CLI tables.
fn format_rupiah(n: f64) -> String {
    let whole = n.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Write the demo sales workbook.
pub fn sample(output: Option<PathBuf>) -> SellersolResult<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(SAMPLE_FILENAME));
    write_sample_workbook(&path)?;
    println!(
        "{} {}",
        "📄 Contoh data ditulis ke".green(),
        path.display().to_string().bold()
    );
    Ok(())
}

/// Import a sales export and print a preview of what the analyzer would see.
pub fn preview(file: PathBuf, limit: usize) -> SellersolResult<()> {
    let rows = SalesImporter::new(&file).import()?;
    println!(
        "{} {} ({} baris)",
        "📖 Membaca".cyan(),
        file.display().to_string().bold(),
        rows.len()
    );

    if let Some(first) = rows.first() {
        let headers: Vec<&str> = first.keys().collect();
        println!("   Kolom: {}", headers.join(", ").bright_blue());
    }

    for (idx, row) in rows.iter().take(limit).enumerate() {
        let cells: Vec<String> = row.iter().map(|(_, v)| v.as_text()).collect();
        println!("   {:>3}. {}", idx + 1, cells.join(" | "));
    }
    if rows.len() > limit {
        println!("   ... {} baris lagi", rows.len() - limit);
    }
    Ok(())
}

/// Offline export: spreadsheet + narrative file → report workbook.
pub fn export(
    file: PathBuf,
    platform: String,
    narrative_file: PathBuf,
    output: Option<PathBuf>,
) -> SellersolResult<()> {
    let rows = SalesImporter::new(&file).import()?;
    let narrative = fs::read_to_string(&narrative_file)?;
    let report = AnalysisReport::new(platform, narrative, rows);

    let exporter = ReportExporter::new(&report);
    let path = output.unwrap_or_else(|| PathBuf::from(exporter.filename()));
    exporter.export(&path)?;

    println!(
        "{} {}",
        "✅ Laporan ditulis ke".green(),
        path.display().to_string().bold()
    );
    Ok(())
}

/// Full pipeline: import, analyze via the hosted model, export, save history.
pub async fn analyze(
    file: PathBuf,
    platform: String,
    output: Option<PathBuf>,
    api_key: String,
    model: Option<String>,
    history_file: PathBuf,
) -> SellersolResult<()> {
    println!("{}", "🔎 SellerSol - Analisis Performa Toko".bold().green());
    println!("   File: {}", file.display());
    println!("   Platform: {}", platform.bright_yellow());
    println!();

    let rows = SalesImporter::new(&file).import()?;
    println!("{} {} baris data", "📖 Terbaca".cyan(), rows.len());

    let mut client = AnalysisClient::new(api_key);
    if let Some(model) = model {
        client = client.with_model(model);
    }

    println!("{}", "🤖 Menganalisa via AI...".cyan());
    let narrative = client.analyze(&rows, &platform).await?;

    let report = AnalysisReport::new(platform, narrative, rows);
    let exporter = ReportExporter::new(&report);
    let path = output.unwrap_or_else(|| PathBuf::from(exporter.filename()));
    exporter.export(&path)?;

    HistoryStore::new(&history_file).append(&report)?;

    println!();
    println!(
        "{} {}",
        "✅ Laporan ditulis ke".green().bold(),
        path.display().to_string().bold()
    );
    println!("   Riwayat disimpan di {}", history_file.display());
    Ok(())
}

/// List saved reports, or remove one by index.
pub fn history(history_file: PathBuf, remove: Option<usize>) -> SellersolResult<()> {
    let store = HistoryStore::new(&history_file);

    if let Some(index) = remove {
        return match store.remove(index)? {
            Some(report) => {
                println!(
                    "{} #{index} ({})",
                    "🗑️ Riwayat dihapus".yellow(),
                    report.platform
                );
                Ok(())
            }
            None => {
                println!("{}", format!("Tidak ada riwayat #{index}").red());
                Ok(())
            }
        };
    }

    let reports = store.load()?;
    if reports.is_empty() {
        println!("{}", "Belum ada riwayat analisa.".yellow());
        return Ok(());
    }

    println!("{}", "🗂️ Riwayat Analisa".bold().green());
    for (idx, report) in reports.iter().enumerate() {
        let summary = crate::core::summarize(&report.rows);
        println!(
            "   #{idx} {} | {} | {} baris | {}",
            report.platform.bright_blue().bold(),
            report.created_at.format("%d/%m/%Y %H:%M"),
            report.rows.len(),
            format_rupiah(summary.grand_total)
        );
    }
    Ok(())
}

/// One turn with the dashboard assistant.
pub async fn chat(message: String, api_key: String, model: Option<String>) -> SellersolResult<()> {
    let mut client = AnalysisClient::new(api_key);
    if let Some(model) = model {
        client = client.with_model(model);
    }

    let reply = client.chat(&message, &[]).await?;
    println!("{}", "💬 SellerSol Assistant".bold().green());
    println!("{reply}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_rupiah_groups_thousands() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(950.0), "Rp 950");
        assert_eq!(format_rupiah(180000.0), "Rp 180.000");
        assert_eq!(format_rupiah(1234567.0), "Rp 1.234.567");
        assert_eq!(format_rupiah(-5000.0), "-Rp 5.000");
    }
}
