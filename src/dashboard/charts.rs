//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for the trailing week:
//! - **Expense By Category**: doughnut chart of the week's expenses per category
//! - **Income vs Expense**: smoothed daily income and expense lines
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    dashboard::aggregation::{CategoryExpense, DailyTotals},
    html::HeadElement,
};

const INCOME_COLOR: &str = "#16a34a";
const EXPENSE_COLOR: &str = "#dc2626";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The week's expenses split by category as a doughnut chart.
pub(super) fn expense_by_category_chart(expense_by_category: &[CategoryExpense]) -> Chart {
    let data: Vec<(f64, &str)> = expense_by_category
        .iter()
        .map(|entry| (to_chart_value(entry.amount), entry.label.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expense By Category").subtext("Last 7 days"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Expense")
                .radius(vec!["50%", "70%"])
                .data(data),
        )
}

/// Daily income and expense over the week as two smoothed lines.
pub(super) fn income_vs_expense_chart(daily_series: &[DailyTotals]) -> Chart {
    let labels: Vec<String> = daily_series.iter().map(|point| point.label.clone()).collect();
    let income: Vec<f64> = daily_series
        .iter()
        .map(|point| to_chart_value(point.income))
        .collect();
    let expense: Vec<f64> = daily_series
        .iter()
        .map(|point| to_chart_value(point.expense))
        .collect();

    Chart::new()
        .title(Title::new().text("Income vs Expense").subtext("Last 7 days"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%"))
        .color(vec![Color::from(INCOME_COLOR), Color::from(EXPENSE_COLOR)])
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .boundary_gap(false)
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Income").smooth(true).data(income))
        .series(Line::new().name("Expense").smooth(true).data(expense))
}

fn to_chart_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-ZA', {
              style: 'currency',
              currency: 'ZAR',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line))
}
