//! Plain-text tables for the shell.
//!
//! Every writer takes the currency unit explicitly so a configured unit shows
//! up in every amount.

use std::io::{self, Write};

use chrono::Local;
use foodshop_core::{HistoryEntry, MenuItem, OrderQuote, Promotion};

pub fn write_menu(out: &mut impl Write, items: &[MenuItem], unit: &str) -> io::Result<()> {
    writeln!(out, "{:<8} {:<16} {:>14}", "CODE", "NAME", "PRICE")?;
    for item in items {
        writeln!(
            out,
            "{:<8} {:<16} {:>14}",
            item.code.as_str(),
            item.name,
            item.price.display_with(unit)
        )?;
    }
    Ok(())
}

pub fn write_promotions(out: &mut impl Write, promotions: &[Promotion]) -> io::Result<()> {
    for promo in promotions {
        writeln!(out, "[{}] {}", promo.code, promo.title)?;
        writeln!(out, " - {}", promo.description)?;
    }
    Ok(())
}

/// Line table sorted by code, then the four totals.
pub fn write_quote(out: &mut impl Write, quote: &OrderQuote, unit: &str) -> io::Result<()> {
    let mut lines: Vec<_> = quote.lines.iter().collect();
    lines.sort_by(|a, b| a.code.cmp(&b.code).then(a.qty.cmp(&b.qty)));

    writeln!(
        out,
        "{:<8} {:<16} {:>5} {:>14} {:>14}",
        "CODE", "NAME", "QTY", "UNIT", "LINE TOTAL"
    )?;
    for line in lines {
        writeln!(
            out,
            "{:<8} {:<16} {:>5} {:>14} {:>14}",
            line.code.as_str(),
            line.name,
            line.qty,
            line.unit_price.display_with(unit),
            line.line_total.display_with(unit)
        )?;
    }

    writeln!(out, "{:<15}{:>14}", "Subtotal:", quote.subtotal.display_with(unit))?;
    writeln!(out, "{:<15}{:>14}", "Pair Discount:", quote.pair_discount.display_with(unit))?;
    writeln!(out, "{:<15}{:>14}", "Member Disc.:", quote.member_discount.display_with(unit))?;
    writeln!(out, "{:<15}{:>14}", "Total:", quote.total.display_with(unit))?;
    Ok(())
}

pub fn write_history(out: &mut impl Write, entries: &[HistoryEntry], unit: &str) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No orders yet.");
    }

    writeln!(out, "{:>5}  {:<19}  {:<6} {:>14}", "NO", "TIME", "MEMBER", "TOTAL")?;
    for entry in entries {
        writeln!(
            out,
            "{:>5}  {:<19}  {:<6} {:>14}",
            entry.order_no,
            entry
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            if entry.member { "yes" } else { "no" },
            entry.total.display_with(unit)
        )?;
    }
    Ok(())
}
