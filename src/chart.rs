use crate::models::{Activity, ActivitySeries, ActivityTotals};
use std::fmt::Write;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 300.0;
const PADDING_X: f64 = 56.0;
const PADDING_Y: f64 = 36.0;
const TOP: f64 = 32.0;
const TICKS: usize = 4;

/// Turns normalized series into markup. Implementations own all presentation.
pub trait Render {
    fn render(&self, series: &ActivitySeries, totals: Option<&ActivityTotals>) -> String;
}

/// One line per activity over the series labels.
#[derive(Debug, Clone, Default)]
pub struct LineChart {
    pub unit: &'static str,
}

/// One bar per activity for the totals.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    pub unit: &'static str,
}

impl Render for LineChart {
    fn render(&self, series: &ActivitySeries, _totals: Option<&ActivityTotals>) -> String {
        if !has_any_value(series) {
            return placeholder();
        }

        let max = nice_max(
            Activity::ALL
                .iter()
                .flat_map(|activity| series.values(*activity).iter().flatten())
                .copied()
                .fold(0.0_f64, f64::max),
        );
        let count = series.len();
        let x_step = if count > 1 {
            (WIDTH - PADDING_X * 2.0) / (count - 1) as f64
        } else {
            0.0
        };
        let x = |index: usize| {
            if count > 1 {
                PADDING_X + index as f64 * x_step
            } else {
                WIDTH / 2.0
            }
        };
        let y = |value: f64| HEIGHT - PADDING_Y - value / max * (HEIGHT - TOP - PADDING_Y);

        let mut svg = open_svg();
        write_grid(&mut svg, max, self.unit, &y);

        for activity in Activity::ALL {
            let mut path = String::new();
            let mut pen_down = false;
            for (index, value) in series.values(activity).iter().enumerate() {
                match value {
                    Some(value) => {
                        let command = if pen_down { 'L' } else { 'M' };
                        let _ = write!(path, "{command} {:.2} {:.2} ", x(index), y(*value));
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }
            if path.is_empty() {
                continue;
            }
            let _ = write!(
                svg,
                r#"<path class="chart-line" data-activity="{}" stroke="{}" d="{}" />"#,
                activity.key(),
                activity.color(),
                path.trim_end()
            );
            for (index, value) in series.values(activity).iter().enumerate() {
                if let Some(value) = value {
                    let _ = write!(
                        svg,
                        r#"<circle class="chart-point" fill="{}" cx="{:.2}" cy="{:.2}" r="3" />"#,
                        activity.color(),
                        x(index),
                        y(*value)
                    );
                }
            }
        }

        let label_every = if count > 8 { count.div_ceil(8) } else { 1 };
        for (index, label) in series.labels().iter().enumerate() {
            if index % label_every != 0 {
                continue;
            }
            let _ = write!(
                svg,
                r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                x(index),
                HEIGHT - PADDING_Y + 18.0,
                escape(label)
            );
        }

        write_legend(&mut svg);
        svg.push_str("</svg>");
        svg
    }
}

impl Render for BarChart {
    fn render(&self, _series: &ActivitySeries, totals: Option<&ActivityTotals>) -> String {
        let Some(totals) = totals else {
            return placeholder();
        };

        let max = nice_max(
            Activity::ALL
                .iter()
                .map(|activity| totals.get(*activity))
                .fold(0.0_f64, f64::max),
        );
        let y = |value: f64| HEIGHT - PADDING_Y - value / max * (HEIGHT - TOP - PADDING_Y);

        let mut svg = open_svg();
        write_grid(&mut svg, max, self.unit, &y);

        let slot = (WIDTH - PADDING_X * 2.0) / Activity::ALL.len() as f64;
        let bar_width = slot * 0.5;
        for (index, activity) in Activity::ALL.iter().enumerate() {
            let value = totals.get(*activity);
            let left = PADDING_X + slot * index as f64 + (slot - bar_width) / 2.0;
            let top = y(value);
            let _ = write!(
                svg,
                r#"<rect class="chart-bar" data-activity="{}" fill="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="6" />"#,
                activity.key(),
                activity.color(),
                left,
                top,
                bar_width,
                (HEIGHT - PADDING_Y - top).max(0.0)
            );
            let _ = write!(
                svg,
                r#"<text class="chart-value" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                left + bar_width / 2.0,
                top - 8.0,
                format_value(value)
            );
            let _ = write!(
                svg,
                r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                left + bar_width / 2.0,
                HEIGHT - PADDING_Y + 18.0,
                activity.display_name()
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

fn has_any_value(series: &ActivitySeries) -> bool {
    Activity::ALL
        .iter()
        .any(|activity| series.values(*activity).iter().any(Option::is_some))
}

fn open_svg() -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" xmlns="http://www.w3.org/2000/svg">"#
    )
}

fn placeholder() -> String {
    format!(
        r#"{}<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#,
        open_svg()
    )
}

fn write_grid(svg: &mut String, max: f64, unit: &str, y: &impl Fn(f64) -> f64) {
    for tick in 0..=TICKS {
        let value = max * tick as f64 / TICKS as f64;
        let y_pos = y(value);
        let _ = write!(
            svg,
            r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y_pos:.2}" x2="{:.2}" y2="{y_pos:.2}" />"#,
            WIDTH - PADDING_X
        );
        let _ = write!(
            svg,
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="end">{}{}</text>"#,
            PADDING_X - 10.0,
            y_pos + 4.0,
            format_value(value),
            escape(unit)
        );
    }
}

fn write_legend(svg: &mut String) {
    for (index, activity) in Activity::ALL.iter().enumerate() {
        let left = PADDING_X + index as f64 * 110.0;
        let _ = write!(
            svg,
            r#"<rect fill="{}" x="{left:.2}" y="8" width="12" height="12" rx="3" /><text class="chart-legend" x="{:.2}" y="18">{}</text>"#,
            activity.color(),
            left + 18.0,
            activity.display_name()
        );
    }
}

/// Rounds the axis maximum up to 1, 2 or 5 times a power of ten.
fn nice_max(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powi(max.log10().floor() as i32);
    let scaled = max / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
