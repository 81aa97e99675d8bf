//! Output rendering — aligned text tables and pretty JSON.

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::SessionDetails;
use crate::domain::account::Account;
use crate::domain::instrument::{Instrument, Market};
use crate::domain::position::{DealConfirmation, Position};
use crate::domain::price::PriceHistory;

/// Output format for all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── Table rendering ─────────────────────────────────────────────────────────

/// Render rows as a left-aligned table with a dashed header rule.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(&format!("{cell:<width$}", width = widths[i]));
        }
        line.trim_end().to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    out.push_str(&render_row(&rule));
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}

fn opt_dec(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

// ─── Per-command formatters ──────────────────────────────────────────────────

pub fn accounts_table(accounts: &[Account]) -> String {
    let rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                a.account_type.to_string(),
                a.currency.clone(),
                a.balance.balance.to_string(),
                a.balance.available.to_string(),
                a.balance.profit_loss.to_string(),
                if a.preferred { "*".into() } else { String::new() },
            ]
        })
        .collect();
    render_table(
        &[
            "ID", "Name", "Type", "Ccy", "Balance", "Available", "P/L", "Pref",
        ],
        &rows,
    )
}

pub fn session_block(session: &SessionDetails) -> String {
    format!(
        "Session\n  account:   {}\n  client:    {}\n  locale:    {}\n  currency:  {}\n  tz offset: {}",
        session.account_id,
        session.client_id,
        session.locale,
        session.currency,
        session.timezone_offset,
    )
}

pub fn markets_table(markets: &[Market]) -> String {
    if markets.is_empty() {
        return "No matching instruments".to_string();
    }
    let rows: Vec<Vec<String>> = markets
        .iter()
        .map(|m| {
            vec![
                m.epic.to_string(),
                m.name.clone(),
                format!("{:?}", m.instrument_type),
                m.expiry.clone(),
                format!("{:?}", m.status),
                opt_dec(m.bid),
                opt_dec(m.offer),
                opt_dec(m.percentage_change),
            ]
        })
        .collect();
    render_table(
        &[
            "Epic", "Name", "Type", "Expiry", "Status", "Bid", "Offer", "Chg%",
        ],
        &rows,
    )
}

pub fn instrument_block(instrument: &Instrument) -> String {
    let snap = &instrument.snapshot;
    format!(
        "{name} ({epic})\n  type:       {itype:?}\n  expiry:     {expiry}\n  currencies: {ccys}\n  lot size:   {lot}\n  status:     {status:?}\n  bid/offer:  {bid} / {offer}\n  high/low:   {high} / {low}\n  change:     {chg} ({chg_pct}%)\n  updated:    {updated}",
        name = instrument.name,
        epic = instrument.epic,
        itype = instrument.instrument_type,
        expiry = instrument.expiry,
        ccys = if instrument.currencies.is_empty() {
            "-".to_string()
        } else {
            instrument.currencies.join(", ")
        },
        lot = opt_dec(instrument.lot_size),
        status = snap.status,
        bid = opt_dec(snap.bid),
        offer = opt_dec(snap.offer),
        high = opt_dec(snap.high),
        low = opt_dec(snap.low),
        chg = opt_dec(snap.net_change),
        chg_pct = opt_dec(snap.percentage_change),
        updated = opt_str(snap.update_time.as_deref()),
    )
}

pub fn candles_table(history: &PriceHistory) -> String {
    if history.candles.is_empty() {
        return "No price data".to_string();
    }
    let rows: Vec<Vec<String>> = history
        .candles
        .iter()
        .map(|c| {
            vec![
                c.time.format("%Y-%m-%d %H:%M:%S").to_string(),
                opt_dec(c.open.mid()),
                opt_dec(c.high.mid()),
                opt_dec(c.low.mid()),
                opt_dec(c.close.mid()),
                opt_dec(c.volume),
            ]
        })
        .collect();
    let mut out = render_table(&["Time", "Open", "High", "Low", "Close", "Volume"], &rows);
    if let Some(allowance) = &history.allowance {
        out.push_str(&format!(
            "\n\nAllowance: {}/{} remaining (resets in {}h)",
            allowance.remaining,
            allowance.total,
            allowance.expires_in_secs / 3600,
        ));
    }
    out
}

pub fn positions_table(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No open positions".to_string();
    }
    let rows: Vec<Vec<String>> = positions
        .iter()
        .map(|p| {
            vec![
                p.deal_id.to_string(),
                p.market.name.clone(),
                p.direction.to_string(),
                p.size.to_string(),
                p.open_level.to_string(),
                opt_dec(p.market.bid),
                opt_dec(p.market.offer),
                opt_dec(p.profit_loss_points()),
                p.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    render_table(
        &[
            "Deal ID", "Market", "Dir", "Size", "Open", "Bid", "Offer", "P/L pts", "Created",
        ],
        &rows,
    )
}

pub fn confirmation_block(confirmation: &DealConfirmation) -> String {
    let mut out = format!(
        "Deal {}: {:?}",
        confirmation.reference, confirmation.status
    );
    if let Some(deal_id) = &confirmation.deal_id {
        out.push_str(&format!("\n  deal id: {deal_id}"));
    }
    if let Some(level) = confirmation.level {
        out.push_str(&format!("\n  level:   {level}"));
    }
    if let Some(reason) = &confirmation.reason {
        out.push_str(&format!("\n  reason:  {reason}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_alignment() {
        let table = render_table(
            &["Epic", "Bid"],
            &[
                vec!["IX.D.FTSE.DAILY.IP".into(), "7433.1".into()],
                vec!["short".into(), "1".into()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Epic"));
        assert!(lines[1].starts_with("----"));
        // Both data rows pad the first column to the widest cell.
        assert!(lines[3].starts_with("short             "));
    }

    #[test]
    fn test_render_table_empty_rows() {
        let table = render_table(&["A"], &[]);
        assert_eq!(table, "A\n-");
    }

    #[test]
    fn test_positions_table_empty() {
        assert_eq!(positions_table(&[]), "No open positions");
    }

    #[test]
    fn test_opt_dec_dash_for_none() {
        assert_eq!(opt_dec(None), "-");
        assert_eq!(opt_dec(Some(Decimal::new(15, 1))), "1.5");
    }
}
