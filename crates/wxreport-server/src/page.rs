//! Landing page rendering.

use wxreport_weather::icon_for;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Weather values shown on the page before the first search
#[derive(Debug, Clone, PartialEq)]
pub struct LandingSnapshot {
    pub temp_c: f64,
    pub main: String,
    pub icon: &'static str,
}

impl LandingSnapshot {
    /// Fixed snapshot; the page never shows live data on first load.
    pub fn placeholder() -> Self {
        let main = "Clear".to_string();
        let icon = icon_for(&main);
        Self {
            temp_c: 0.0,
            main,
            icon,
        }
    }
}

pub fn render_landing(app_name: &str, snapshot: &LandingSnapshot) -> String {
    INDEX_TEMPLATE
        .replace("{{app_name}}", &escape_html(app_name))
        .replace("{{temp_c}}", &format!("{:.0}", snapshot.temp_c))
        .replace("{{condition}}", &escape_html(&snapshot.main))
        .replace("{{icon}}", snapshot.icon)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
