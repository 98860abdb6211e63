use agam_core::{FileSummary, Vault, VaultListing};
use chrono::{DateTime, Utc};

use crate::modules::files::format_file_size;

fn format_created(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| value.to_string())
}

pub(crate) fn print_vault_table(vaults: &[Vault]) {
    if vaults.is_empty() {
        println!("No vaults yet.");
        return;
    }
    let rows: Vec<[String; 4]> = vaults
        .iter()
        .map(|vault| {
            [
                vault.id.clone(),
                vault.name.clone(),
                vault.type_label().to_string(),
                format_created(&vault.created_timestamp),
            ]
        })
        .collect();
    print_table(["ID", "NAME", "TYPE", "CREATED"], &rows);
}

fn file_row(file: &FileSummary) -> [String; 4] {
    [
        file.file_id.clone(),
        file.name.clone(),
        format_file_size(file.size),
        file.thumbnail_url.clone().unwrap_or_else(|| "-".to_string()),
    ]
}

/// Prints a listing grouped by date, or as one table when `flat` is set.
pub(crate) fn print_listing(listing: &VaultListing, flat: bool) {
    if listing.is_empty() {
        println!("No files in this vault yet.");
        return;
    }
    let header = ["ID", "NAME", "SIZE", "THUMBNAIL"];
    if flat {
        let rows: Vec<_> = listing.files().map(file_row).collect();
        print_table(header, &rows);
        return;
    }
    for group in listing.thumbnails.iter().filter(|group| !group.objects.is_empty()) {
        println!("{}", group.date);
        let rows: Vec<_> = group.objects.iter().map(file_row).collect();
        print_table(header, &rows);
        println!();
    }
}

fn print_table<const N: usize>(header: [&str; N], rows: &[[String; N]]) {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<w$}", w = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    println!("{}", line(header.to_vec()));
    for row in rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}
