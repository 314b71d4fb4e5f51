//! Chart generation for the category breakdown.
//!
//! Builds the "Spending by Category" pie chart as an ECharts configuration
//! that presentation layers can hand to their chart runtime. Collaborators
//! that draw the chart themselves (e.g. with a conic gradient) should use
//! [pie_segments](crate::pie_segments) instead; both views are derived from
//! the same breakdown and agree on slice order and color.

use charming::{
    Chart,
    component::{Legend, Title},
    datatype::DataPointItem,
    element::{ItemStyle, Tooltip, Trigger},
    series::Pie,
};

use crate::aggregation::CategoryTotal;

/// Build the expense breakdown pie chart.
///
/// Slices appear in breakdown order and use the breakdown's display colors.
/// Returns `None` for an empty breakdown; the caller should render an
/// empty-state placeholder instead of an empty chart.
pub fn spending_chart(breakdown: &[CategoryTotal]) -> Option<Chart> {
    if breakdown.is_empty() {
        return None;
    }

    let slices: Vec<DataPointItem> = breakdown
        .iter()
        .map(|entry| {
            DataPointItem::new(entry.value)
                .name(entry.label.as_str())
                .item_style(ItemStyle::new().color(entry.color))
        })
        .collect();

    let chart = Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new())
        .series(Pie::new().name("Spending by Category").radius("60%").data(slices));

    Some(chart)
}
