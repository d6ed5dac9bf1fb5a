use std::io::{self, Write};

use rna_adapters::canon::Conflict;
use rna_adapters::{BaseInteractions, DedupReport, RestoreTables, Structure, ToolKind};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_CONFLICT_ROWS: usize = 10;

pub fn print_structure_info(structure: &Structure, tables: &RestoreTables) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![
        ("Atoms", structure.atom_count().to_string()),
        ("Residues", structure.residues().len().to_string()),
        ("Chains", structure.chains().len().to_string()),
    ];

    if let Some(map) = &tables.chain_map {
        rows.push(("Packed Chains", map.len().to_string()));
    }
    if let Some(map) = &tables.number_map {
        rows.push(("Renumbered", format!("{} residues", map.len())));
    }

    print_kv_table(&mut out, &format!("Prepared for {}", tables.tool), &rows);
}

pub fn print_interaction_counts(interactions: &BaseInteractions, report: &DedupReport) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows = [
        ("Base Pairs", interactions.base_pairs.len().to_string()),
        ("Stackings", interactions.stackings.len().to_string()),
        (
            "Base-Ribose",
            interactions.base_ribose_interactions.len().to_string(),
        ),
        (
            "Base-Phosphate",
            interactions.base_phosphate_interactions.len().to_string(),
        ),
        ("Other", interactions.other_interactions.len().to_string()),
        ("Reversed", report.reversed.to_string()),
        ("Duplicates", report.duplicates.to_string()),
        ("Conflicts", report.conflicts.len().to_string()),
    ];

    print_kv_table(&mut out, "Canonical Interactions", &rows);
}

pub fn print_conflicts(conflicts: &[Conflict]) {
    if conflicts.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let sep_overhead = 7;
    let col_w = (SAFE_TABLE_WIDTH - sep_overhead) / 2;

    let _ = writeln!(out, "{}┌─ Classification Conflicts ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{line}┬{line}┐",
        INDENT,
        line = "─".repeat(col_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<col_w$} │ {:<col_w$} │",
        INDENT,
        "Reported First",
        "Reported Later",
        col_w = col_w
    );
    let _ = writeln!(
        out,
        "{}├{line}┼{line}┤",
        INDENT,
        line = "─".repeat(col_w + 2)
    );

    for conflict in conflicts.iter().take(MAX_CONFLICT_ROWS) {
        let _ = writeln!(
            out,
            "{}│ {:<col_w$} │ {:<col_w$} │",
            INDENT,
            truncate(&conflict.existing, col_w),
            truncate(&conflict.incoming, col_w),
            col_w = col_w
        );
    }

    if conflicts.len() > MAX_CONFLICT_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<col_w$} │ {:<col_w$} │",
            INDENT,
            "...",
            format!("({} more)", conflicts.len() - MAX_CONFLICT_ROWS),
            col_w = col_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{line}┴{line}┘",
        INDENT,
        line = "─".repeat(col_w + 2)
    );
}

/// Lists every supported tool with the rewrites `prepare` applies for it.
pub fn print_tools(out: &mut impl Write) -> io::Result<()> {
    let name_w = 12usize;
    let id_w = 12usize;
    let flag_w = 9usize;

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{left}{}{mid}{}{mid}{}{mid}{}{right}",
            "─".repeat(name_w + 2),
            "─".repeat(id_w + 2),
            "─".repeat(flag_w + 2),
            "─".repeat(flag_w + 2),
        )
    };
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(
        out,
        "│ {:<name_w$} │ {:<id_w$} │ {:<flag_w$} │ {:<flag_w$} │",
        "Tool", "Identifier", "Packs", "Renumbers"
    )?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;

    for tool in ToolKind::ALL {
        writeln!(
            out,
            "│ {:<name_w$} │ {:<id_w$} │ {:<flag_w$} │ {:<flag_w$} │",
            tool.to_string(),
            tool.as_str(),
            yes_no(tool.needs_packed_chains()),
            yes_no(tool.needs_renumbering()),
        )?;
    }

    writeln!(out, "{}", rule("└", "┴", "┘"))
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT,
        "Metric",
        "Value",
        key_w = key_w,
        val_w = val_w
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
