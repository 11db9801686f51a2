//! Presentation of check reports
//!
//! Amounts are grouped with thousands separators here and nowhere else.

use crate::engine::{CheckReport, LineItem};
use crate::errors::DltResult;
use serde::Serialize;
use std::fmt::Write;

/// JSON-facing view of one line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemView {
    pub draw_number: String,
    pub draw_date: String,
    pub ticket_index: usize,
    pub ticket: String,
    pub front_hits: usize,
    pub back_hits: usize,
    /// Canonical tier name, `None` for a losing ticket
    pub tier: Option<String>,
    /// Tier as the data source names it
    pub prize: Option<String>,
    pub base_amount: String,
    pub additional_amount: String,
}

/// JSON-facing view of a whole report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub draws_checked: usize,
    pub line_items: Vec<LineItemView>,
    pub tier_counts: Vec<(String, usize)>,
    pub total_winnings: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            draw_number: item.draw_number.to_string(),
            draw_date: item.draw_date.clone(),
            ticket_index: item.ticket_index,
            ticket: item.ticket.to_string(),
            front_hits: item.result.front_hits,
            back_hits: item.result.back_hits,
            tier: item.result.tier.map(|tier| tier.name().to_string()),
            prize: item.result.tier.map(|tier| tier.prize_key().to_string()),
            base_amount: item.result.base_amount.to_grouped_string(),
            additional_amount: item.result.additional_amount.to_grouped_string(),
        }
    }
}

impl From<&CheckReport> for ReportView {
    fn from(report: &CheckReport) -> Self {
        Self {
            draws_checked: report.draws_checked,
            line_items: report.line_items.iter().map(LineItemView::from).collect(),
            tier_counts: report
                .tier_counts()
                .into_iter()
                .map(|(tier, count)| (tier.name().to_string(), count))
                .collect(),
            total_winnings: report.total_winnings.to_grouped_string(),
        }
    }
}

/// Human-readable report, one header per draw and one line per ticket
pub fn render_text(report: &CheckReport) -> String {
    let mut out = String::new();
    let mut current_draw = None;

    for item in &report.line_items {
        if current_draw != Some(&item.draw_number) {
            let _ = writeln!(out, "--- 核对 第 {} 期 ({}) ---", item.draw_number, item.draw_date);
            current_draw = Some(&item.draw_number);
        }
        let _ = writeln!(out, "{}", render_line(item));
    }

    let _ = writeln!(out, "总奖金: {} 元", report.total_winnings.to_grouped_string());
    out
}

fn render_line(item: &LineItem) -> String {
    let result = &item.result;
    match result.tier {
        Some(tier) => {
            let mut line = format!(
                "号码 [{}]: 中奖！【{}】，奖金 {} 元",
                item.ticket,
                tier.prize_key(),
                result.base_amount.to_grouped_string()
            );
            if result.additional_amount.is_zero() {
                line.push('。');
            } else {
                let _ = write!(line, " + 追加 {} 元。", result.additional_amount.to_grouped_string());
            }
            line
        }
        None => format!("号码 [{}]: 未中奖。", item.ticket),
    }
}

/// Pretty-printed JSON of the report view
pub fn render_json(report: &CheckReport) -> DltResult<String> {
    Ok(serde_json::to_string_pretty(&ReportView::from(report))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::amount::Amount;
    use crate::draws::{Draw, DrawNumber, DrawStore, PrizeEntry};
    use crate::engine::Checker;
    use crate::ticket::Ticket;

    fn report(include_additional: bool) -> CheckReport {
        let store = DrawStore::new(vec![
            Draw::new("25001", "2025-01-01", &["01", "02", "03", "04", "05"], &["06", "07"])
                .with_prize("一等奖", PrizeEntry::new("10,000,000"))
                .with_prize("一等奖(追加)", PrizeEntry::new("8,000,000")),
            Draw::new("25002", "2025-01-04", &["01", "02", "03", "20", "21"], &["06", "11"])
                .with_prize("八等奖(追加)", PrizeEntry::new("---")),
        ])
        .unwrap();
        let tickets = vec![
            Ticket::new(&[1, 2, 3, 4, 5], &[6, 7]).unwrap(),
            Ticket::new(&[30, 31, 32, 33, 34], &[1, 2]).unwrap(),
        ];

        Checker::default()
            .check(&tickets, &store, &DrawNumber::from("25001"), 2, include_additional)
            .unwrap()
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&report(true));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "--- 核对 第 25001 期 (2025-01-01) ---",
                "号码 [01 02 03 04 05 | 06 07]: 中奖！【一等奖】，奖金 10,000,000.00 元 + 追加 8,000,000.00 元。",
                "号码 [30 31 32 33 34 | 01 02]: 未中奖。",
                "--- 核对 第 25002 期 (2025-01-04) ---",
                "号码 [01 02 03 04 05 | 06 07]: 中奖！【八等奖】，奖金 15.00 元。",
                "号码 [30 31 32 33 34 | 01 02]: 未中奖。",
                "总奖金: 18,000,015.00 元",
            ]
        );
    }

    #[test]
    fn test_render_text_without_additional() {
        let text = render_text(&report(false));
        assert!(text.contains("中奖！【一等奖】，奖金 10,000,000.00 元。"));
        assert!(!text.contains("追加"));
        assert!(text.ends_with("总奖金: 10,000,015.00 元\n"));
    }

    #[test]
    fn test_report_view() {
        let view = ReportView::from(&report(true));

        assert_eq!(view.draws_checked, 2);
        assert_eq!(view.total_winnings, "18,000,015.00");
        assert_eq!(
            view.tier_counts,
            vec![("tier1".to_string(), 1), ("tier8".to_string(), 1)]
        );

        let jackpot = &view.line_items[0];
        assert_eq!(jackpot.tier.as_deref(), Some("tier1"));
        assert_eq!(jackpot.prize.as_deref(), Some("一等奖"));
        assert_eq!(jackpot.additional_amount, "8,000,000.00");

        let loser = &view.line_items[1];
        assert_eq!(loser.tier, None);
        assert_eq!(loser.base_amount, Amount::ZERO.to_grouped_string());
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&report(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_winnings"], "10,000,015.00");
        assert_eq!(value["line_items"].as_array().unwrap().len(), 4);
        assert_eq!(value["line_items"][0]["ticket"], "01 02 03 04 05 | 06 07");
        assert_eq!(value["line_items"][1]["tier"], serde_json::Value::Null);
    }
}
