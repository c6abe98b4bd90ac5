//! Step ladder page
//!
//! - Toolbar: Add Row, Restart Algo, link to the stock page
//! - Ladder table: one row per step, inline inputs while editing
//! - Test Steps panel: probe count form and the projected record

use super::{escape, page, refreshed_label};
use crate::models::{StepField, StepRecord};
use crate::views::steps::format_number;
use crate::views::{StepRow, StepTable};

/// Render the whole page.  `restarted` adds the restart confirmation alert.
pub fn render(base: &str, table: &StepTable, restarted: bool) -> String {
    let rows: String = table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| render_row(base, index, row))
        .collect();

    let headers: String = StepField::ALL
        .iter()
        .map(|f| format!("<th>{}</th>", f.label()))
        .collect();

    let alert = if restarted {
        r#"    <script>alert("Algo restarted");</script>"#
    } else {
        ""
    };

    let body = format!(
        r#"    <div class="container">
        <div class="toolbar">
            <div>
                <form method="post" action="{base}/steps"><button class="btn btn-primary">Add Row</button></form>
                <form method="post" action="{base}/algo/restart"><button class="btn btn-danger">Restart Algo</button></form>
            </div>
            <div>
                <span class="refresh-time">{refreshed}</span>
                <a href="{base}/stocks">Stock Dashboard</a>
            </div>
        </div>
        <table>
            <thead>
                <tr><th>Step</th>{headers}<th>Actions</th></tr>
            </thead>
            <tbody>
{rows}
            </tbody>
        </table>
{probe}
    </div>
{alert}"#,
        base = escape(base),
        refreshed = refreshed_label(table.last_refreshed()),
        headers = headers,
        rows = rows,
        probe = render_probe(base, table.probe_count(), table.probe()),
        alert = alert,
    );

    page("Algo Steps", &body)
}

fn render_row(base: &str, index: usize, row: &StepRow) -> String {
    let base = escape(base);
    let form_id = format!("save-{index}");

    let cells: String = StepField::ALL
        .iter()
        .map(|&field| {
            if row.editing {
                format!(
                    r#"<td><input type="text" form="{form_id}" name="{name}" value="{value}"></td>"#,
                    name = field.name(),
                    value = escape(&row.draft(field)),
                )
            } else {
                format!("<td>{}</td>", format_number(field.get(&row.record)))
            }
        })
        .collect();

    let id = row.record.id;
    let edit_actions = if row.editing {
        format!(
            r#"<form id="{form_id}" method="post" action="{base}/steps/{index}/save"><input type="hidden" name="id" value="{id}"><button class="btn btn-warn">Save</button></form>
                    <form method="post" action="{base}/steps/{index}/cancel"><button class="btn btn-primary">Cancel</button></form>"#
        )
    } else {
        format!(
            r#"<form method="post" action="{base}/steps/{index}/edit"><button class="btn btn-warn">Edit</button></form>"#
        )
    };

    format!(
        r#"                <tr>
                    <td>{step}</td>{cells}
                    <td class="actions">
                    {edit_actions}
                    <form method="post" action="{base}/steps/delete"><input type="hidden" name="id" value="{id}"><button class="btn btn-danger">Delete</button></form>
                    </td>
                </tr>
"#,
        step = row.record.step,
    )
}

fn render_probe(base: &str, count: i64, probe: Option<&StepRecord>) -> String {
    let cell = |value: Option<f64>| value.map(format_number).unwrap_or_default();
    let p = |get: fn(&StepRecord) -> f64| cell(probe.map(get));

    format!(
        r#"        <div class="panel">
            <p><strong>Test Steps</strong></p>
            <form method="post" action="{base}/steps/probe">
                <input type="text" name="count" value="{count}">
                <button class="btn btn-danger">Submit</button>
            </form>
            <table>
                <thead>
                    <tr>
                        <th>Step</th><th>Buy Price</th><th>Sell Price</th><th>Shares To Buy</th>
                        <th>Additional Shares</th><th>Total Shares</th><th>Cumulative Shares</th>
                        <th>More Shares Needed</th><th>Shares To Sell</th>
                    </tr>
                </thead>
                <tbody>
                    <tr>
                        <td>{step}</td><td>{buy}</td><td>{sell}</td><td>{to_buy}</td>
                        <td>{additional}</td><td>{total}</td><td>{cumulative}</td>
                        <td>{more}</td><td>{to_sell}</td>
                    </tr>
                </tbody>
            </table>
        </div>"#,
        base = escape(base),
        step = probe.map(|r| r.step.to_string()).unwrap_or_default(),
        buy = p(|r| r.buy_price),
        sell = p(|r| r.sell_price),
        to_buy = p(|r| r.shares_to_buy),
        additional = p(|r| r.additional_shares),
        total = p(|r| r.total_shares),
        cumulative = p(|r| r.cumulative_shares),
        more = p(|r| r.more_shares_needed),
        to_sell = p(|r| r.shares_to_sell),
    )
}
