//! Server-rendered HTML shell around the journal.
//!
//! Two pages: the registration form, and the portal with its five tabs
//! (AI support, symptom tracker, doctors, expert resources, logout). All
//! user text is escaped before it reaches the markup.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::chart::{ChartTheme, GraphOutcome};
use crate::models::{ChronicCondition, SymptomEntry, SEVERITY_MAX, SEVERITY_MIN};
use crate::resources::ResourceLinks;
use crate::session::SessionSummary;
use crate::trend::Suggestion;

const APP_TITLE: &str = "Compassionate Chronic Care Community";

/// Everything the portal page shows for the active session.
#[derive(Debug, Clone)]
pub struct PortalView {
    pub summary: SessionSummary,
    /// Insertion order.
    pub entries: Vec<SymptomEntry>,
    /// Present once the user asked for the graph.
    pub graph: Option<GraphOutcome>,
    pub suggestion: Option<Suggestion>,
    pub resources: ResourceLinks,
    pub notice: Option<String>,
}

fn page(title: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#fafaf9;color:#1c1917}}
main{{max-width:960px;margin:0 auto;padding:24px}}
nav a{{margin-right:16px}}
section{{background:#fff;border-radius:12px;box-shadow:0 2px 12px rgba(0,0,0,.06);padding:20px;margin:16px 0}}
table{{border-collapse:collapse;width:100%}}
th,td{{border-bottom:1px solid #e7e5e4;padding:6px 8px;text-align:left}}
.notice{{background:#f0fdf4;border:1px solid #bbf7d0;border-radius:8px;padding:12px}}
.warning{{background:#fffbeb;border:1px solid #fde68a;border-radius:8px;padding:12px}}
iframe{{border:none;width:100%;height:600px}}
</style>
</head>
<body>
<main>
<h1>{app}</h1>
<hr>
{body}
</main>
</body>
</html>"##,
        title = encode_text(title),
        app = APP_TITLE,
        body = body,
    )
}

fn notice_block(notice: Option<&str>, class: &str) -> String {
    notice
        .map(|n| format!(r#"<p class="{class}">{}</p>"#, encode_text(n)))
        .unwrap_or_default()
}

/// Registration form, shown while no session exists.
pub fn render_registration_page(notice: Option<&str>) -> String {
    let options: String = ChronicCondition::ALL
        .iter()
        .map(|c| {
            let label = c.as_str();
            format!(r#"<option value="{label}">{label}</option>"#)
        })
        .collect();

    let body = format!(
        r#"{notice}
<section id="register">
<h2>Register to Access Your Health Portal</h2>
<form method="post" action="/register">
<p><label>Username: <input name="username" placeholder="Enter your username" required></label></p>
<p><label>Password: <input name="password" type="password" placeholder="Enter your password"></label></p>
<p><label>Select Your Chronic Illness <select name="chronic_illness">{options}</select></label></p>
<p><label>Please specify your condition (if other): <input name="other_condition"></label></p>
<p><button type="submit">Register</button></p>
</form>
</section>"#,
        notice = notice_block(notice, "notice"),
    );
    page(APP_TITLE, &body)
}

fn render_log_table(entries: &[SymptomEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let rows: String = entries
        .iter()
        .map(|e| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                e.date,
                encode_text(&e.symptom),
                e.severity,
                encode_text(&e.notes)
            )
        })
        .collect();
    format!(
        "<h3>Symptom Log</h3>\n<table><thead><tr><th>date</th><th>symptom</th><th>severity</th><th>notes</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn render_graph_block(
    graph: &GraphOutcome,
    suggestion: Option<&Suggestion>,
    theme: &ChartTheme,
) -> String {
    let chart = match graph {
        GraphOutcome::Chart(chart) => chart.to_svg(theme),
        GraphOutcome::NoData(notice) => notice_block(Some(&notice.message), "warning"),
    };
    let advice = suggestion
        .map(|s| format!(r#"<p data-category="{}">{}</p>"#, s.category, encode_text(&s.message)))
        .unwrap_or_default();
    format!("<div id=\"graph\">{chart}</div>\n{advice}")
}

fn iframe(src: &str) -> String {
    format!(r#"<iframe src="{}"></iframe>"#, encode_double_quoted_attribute(src))
}

/// Portal page for the active session.
pub fn render_portal_page(view: &PortalView, theme: &ChartTheme) -> String {
    let summary = &view.summary;
    let illness = encode_text(&summary.chronic_illness);
    let graph = view
        .graph
        .as_ref()
        .map(|g| render_graph_block(g, view.suggestion.as_ref(), theme))
        .unwrap_or_default();

    let body = format!(
        r##"{notice}
<h2>{title}</h2>
<nav><a href="#ai">AI Support</a><a href="#tracker">Symptom Tracker</a><a href="#doctors">Find Doctors</a><a href="#resources">Expert Resources</a><a href="#logout">Logout</a></nav>

<section id="ai">
<h2>AI Support</h2>
<script>window.chtlConfig = {{ chatbotId: "{chatbot_id}", display: "page_inline" }};</script>
<div id="chatling-inline-bot" style="width: 100%; height: 500px;"></div>
<script async data-id="{chatbot_id}" id="chatling-embed-script" type="text/javascript" src="{chatbot_script}"></script>
</section>

<section id="tracker">
<h2>Log a New Symptom</h2>
<form method="post" action="/record">
<p><label>Symptom <input name="symptom"></label></p>
<p><label>Severity ({min}-{max}) <input name="severity" type="range" min="{min}" max="{max}" value="{min}"></label></p>
<p><label>Additional Notes <textarea name="notes"></textarea></label></p>
<p><button type="submit">Submit Symptom</button></p>
</form>
{table}
<form method="get" action="/"><input type="hidden" name="graph" value="true"><button type="submit">Generate Graph</button></form>
{graph}
</section>

<section id="doctors">
<h2>Find Doctors Near You</h2>
{doctor_frame}
</section>

<section id="resources">
<h2>Expert Resources</h2>
<p>Resources for {illness}</p>
{cdc_frame}
<h3>Learn More from Hinge Health</h3>
{education_frame}
<h3>Explore Videos on YouTube</h3>
<p><a href="{video_search}">Search videos</a></p>
{video_frame}
</section>

<section id="logout">
<h2>Logout</h2>
<p>You can log out from your account here.</p>
<form method="post" action="/logout"><button type="submit">Logout</button></form>
</section>"##,
        notice = notice_block(view.notice.as_deref(), "notice"),
        title = encode_text(&summary.portal_title),
        chatbot_id = encode_double_quoted_attribute(&view.resources.chatbot.chatbot_id),
        chatbot_script = encode_double_quoted_attribute(&view.resources.chatbot.script_url),
        min = SEVERITY_MIN,
        max = SEVERITY_MAX,
        table = render_log_table(&view.entries),
        graph = graph,
        doctor_frame = iframe(&view.resources.doctor_search),
        illness = illness,
        cdc_frame = iframe(&view.resources.cdc_search),
        education_frame = iframe(&view.resources.health_education),
        video_search = encode_double_quoted_attribute(&view.resources.video_search),
        video_frame = iframe(&view.resources.video_embed),
    );
    page(&summary.portal_title, &body)
}
