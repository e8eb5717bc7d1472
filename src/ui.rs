use crate::chart::{escape, BarChart, LineChart, Render};
use crate::models::ActivityReport;

const UNIT: &str = " km";

pub fn render_index(report: &ActivityReport) -> String {
    let timeline = LineChart { unit: UNIT }.render(&report.timeline, None);
    let totals = BarChart { unit: UNIT }.render(&report.timeline, report.totals.as_ref());

    let yearly = match &report.yearly {
        Some(yearly) if !yearly.is_empty() => YEARLY_SECTION.replace(
            "{{YEARLY_CHART}}",
            &LineChart { unit: UNIT }.render(yearly, None),
        ),
        _ => String::new(),
    };

    PAGE_HTML
        .replace("{{SUBTITLE}}", &subtitle(report))
        .replace(
            "{{BODY}}",
            &DASHBOARD_BODY
                .replace("{{TIMELINE_CHART}}", &timeline)
                .replace("{{YEARLY_SECTION}}", &yearly)
                .replace("{{TOTALS_CHART}}", &totals),
        )
}

pub fn render_unavailable(message: &str) -> String {
    PAGE_HTML
        .replace("{{SUBTITLE}}", "No chart could be drawn.")
        .replace(
            "{{BODY}}",
            &UNAVAILABLE_BODY.replace("{{MESSAGE}}", &escape(message)),
        )
}

fn subtitle(report: &ActivityReport) -> String {
    let labels = report.timeline.labels();
    match (labels.first(), labels.last()) {
        (Some(first), Some(last)) if labels.len() > 1 => format!(
            "{} periods from {} to {}.",
            labels.len(),
            escape(first),
            escape(last)
        ),
        (Some(only), _) => format!("1 period: {}.", escape(only)),
        _ => "No periods recorded yet.".to_string(),
    }
}

const YEARLY_SECTION: &str = r#"
    <section class="chart-area">
      <div class="chart-header">
        <h2>Per year</h2>
        <p class="subtitle">Distance per activity and year.</p>
      </div>
      <div class="chart-card">{{YEARLY_CHART}}</div>
    </section>"#;

const DASHBOARD_BODY: &str = r#"
    <section class="chart-area">
      <div class="chart-header">
        <h2>Timeline</h2>
        <p class="subtitle">Distance per activity and period.</p>
      </div>
      <div class="chart-card">{{TIMELINE_CHART}}</div>
    </section>
    {{YEARLY_SECTION}}
    <section class="chart-area">
      <div class="chart-header">
        <h2>Totals</h2>
        <p class="subtitle">Sum over all periods.</p>
      </div>
      <div class="chart-card">{{TOTALS_CHART}}</div>
    </section>"#;

const UNAVAILABLE_BODY: &str = r#"
    <section class="status error" role="alert">
      <h2>Data unavailable</h2>
      <p>{{MESSAGE}}</p>
    </section>"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Activity</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f6f8;
      --bg-2: #cfe3f5;
      --ink: #1f2933;
      --muted: #6b7280;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(31, 41, 51, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e6eef5 60%, #f7f9fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.25rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .chart-area {
      display: grid;
      gap: 14px;
    }

    .chart-header {
      display: flex;
      flex-direction: column;
      gap: 4px;
    }

    .chart-card {
      background: white;
      border-radius: 18px;
      padding: 12px;
      border: 1px solid rgba(31, 41, 51, 0.08);
    }

    .chart {
      width: 100%;
      height: auto;
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
      stroke-linecap: round;
      stroke-linejoin: round;
    }

    .chart-grid {
      stroke: rgba(31, 41, 51, 0.08);
    }

    .chart-label,
    .chart-legend,
    .chart-value {
      fill: var(--muted);
      font-size: 12px;
    }

    .chart-value {
      fill: var(--ink);
      font-weight: 600;
    }

    .status.error {
      border-radius: 18px;
      padding: 18px;
      background: #fdecea;
      color: #8a1c1c;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Activity</h1>
      <p class="subtitle">{{SUBTITLE}}</p>
    </header>
    {{BODY}}
  </main>
</body>
</html>
"#;
