use crate::engine::DailyReport;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Render the daily slate as a single static HTML page.
pub fn render(report: &DailyReport, date: NaiveDate) -> String {
    let s = &report.summary;
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>CBB Minimum Totals</title>\n<style>\n");
    html.push_str(
        "body{font-family:sans-serif;margin:2em;background:#111;color:#eee}\n\
         table{border-collapse:collapse;width:100%}\n\
         th,td{border:1px solid #444;padding:6px 10px;text-align:left}\n\
         th{background:#222}\n\
         .yes{color:#4c4}.maybe{color:#cc4}.no{color:#c44}\n\
         .unverified,.skip,.invalid{color:#888}\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!("<h1>CBB Minimum Totals &mdash; {}</h1>\n", date));
    html.push_str(&format!(
        "<p>YES: {} (high {} / mid {} / low {}) &middot; MAYBE: {} &middot; NO: {} \
         &middot; UNVERIFIED: {} &middot; SKIP: {} &middot; INVALID: {}</p>\n",
        s.yes(),
        s.yes_high,
        s.yes_mid,
        s.yes_low,
        s.maybe,
        s.no,
        s.unverified,
        s.skip,
        s.invalid,
    ));

    html.push_str(
        "<table>\n<tr><th>Matchup</th><th>Min Line</th><th>Risk</th>\
         <th>Decision</th><th>Confidence</th><th>Factors</th></tr>\n",
    );
    for r in &report.results {
        let label = r.label();
        let class = label.to_lowercase();
        let line = r
            .matchup
            .minimum_total
            .map(|l| format!("{}", l))
            .unwrap_or_else(|| "&mdash;".to_string());
        let score = r
            .risk_score
            .map(|v| v.to_string())
            .unwrap_or_else(|| "&mdash;".to_string());
        let confidence = r
            .decision
            .and_then(|d| d.confidence_pct)
            .map(|c| format!("{}%", c))
            .unwrap_or_else(|| "&mdash;".to_string());
        let factors = r
            .factors
            .iter()
            .map(|f| escape(&f.name))
            .collect::<Vec<_>>()
            .join("<br>");
        html.push_str(&format!(
            "<tr><td>{} @ {}</td><td>{}</td><td>{}</td>\
             <td class=\"{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&r.matchup.away_team),
            escape(&r.matchup.home_team),
            line,
            score,
            class,
            label,
            confidence,
            factors,
        ));
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

pub fn write(report: &DailyReport, date: NaiveDate, path: &Path) -> Result<()> {
    std::fs::write(path, render(report, date))
        .with_context(|| format!("failed to write dashboard {}", path.display()))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
