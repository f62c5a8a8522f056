//! HTML page with every chart inlined as a base64 data URI.

use crate::dashboard::Dashboard;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "State Population Dashboard";

pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<section>` per chart, in dashboard order.
pub fn render_page(dashboard: &Dashboard) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    html.push_str(
        "<style>\
         body{font-family:sans-serif;margin:2rem;background:#fafafa}\
         section{margin-bottom:2.5rem}\
         img{max-width:100%;height:auto;border:1px solid #ddd;background:#fff}\
         </style>\n",
    );
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", PAGE_TITLE);

    for chart in dashboard.iter() {
        let title = escape(chart.title());
        let _ = writeln!(
            html,
            "<section id=\"{}\">\n<h2>{}</h2>\n<img src=\"{}\" alt=\"{}\">\n</section>",
            chart.kind.slug(),
            title,
            data_uri(&chart.png),
            title
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}
