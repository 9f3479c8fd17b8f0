use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::rankings::Leaderboard;

pub struct ExportReport {
    pub sheets: usize,
    pub rows: usize,
}

/// Writes one worksheet per leaderboard plus an Overview sheet with the
/// generation timestamp and per-board row counts.
pub fn export_leaderboards(path: &Path, boards: &[Leaderboard]) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut total_rows = 0usize;

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Overview")?;
        let mut rows = vec![
            vec!["Generated At".to_string(), Utc::now().to_rfc3339()],
            vec!["Leaderboard".to_string(), "Entries".to_string()],
        ];
        for board in boards {
            rows.push(vec![board.title.to_string(), board.rows.len().to_string()]);
        }
        write_rows(sheet, &rows)?;
    }

    for (idx, board) in boards.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(idx, board.title))?;

        let annotated = board.rows.iter().any(|r| r.team.is_some());
        let mut rows = Vec::with_capacity(board.rows.len() + 1);
        let mut header = vec![
            "Rank".to_string(),
            "Name".to_string(),
            board.metric_label.to_string(),
        ];
        if annotated {
            header.push("Team".to_string());
        }
        rows.push(header);
        for row in &board.rows {
            let mut cells = vec![
                row.rank.to_string(),
                row.name.clone(),
                row.value.to_string(),
            ];
            if annotated {
                cells.push(row.team.clone().unwrap_or_default());
            }
            rows.push(cells);
        }
        total_rows += board.rows.len();
        write_rows(sheet, &rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        sheets: boards.len() + 1,
        rows: total_rows,
    })
}

// Excel caps sheet names at 31 chars; the index prefix keeps them unique
// after truncation.
fn sheet_name(idx: usize, title: &str) -> String {
    let mut name = format!("{:02} {title}", idx + 1);
    name.truncate(31);
    name
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::sheet_name;

    #[test]
    fn sheet_names_fit_excel_limit_and_stay_unique() {
        let a = sheet_name(0, "Bowler Ranking by Least Runs Conceded");
        let b = sheet_name(1, "Bowler Ranking by Least Runs Conceded");
        assert!(a.len() <= 31);
        assert_ne!(a, b);
    }
}
