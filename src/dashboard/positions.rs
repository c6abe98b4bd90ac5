//! Stock position page

use super::{escape, page, refreshed_label};
use crate::views::{PositionRow, PositionTable};

pub fn render(base: &str, table: &PositionTable) -> String {
    let base_attr = escape(base);

    let (button_text, notice) = if table.is_fetching() {
        (
            "Fetching Data...",
            r#"        <p class="notice">Fetching data can take up to 2 mins.</p>"#,
        )
    } else {
        ("Fetch Data", "")
    };

    let rows: String = table
        .rows()
        .iter()
        .map(|row| render_row(&base_attr, row))
        .collect();

    let body = format!(
        r#"    <div class="container">
        <div class="toolbar">
            <form method="post" action="{base_attr}/stocks/fetch"><button class="btn btn-primary">{button_text}</button></form>
            <div>
                <span class="refresh-time">{refreshed}</span>
                <a href="{base_attr}/">Step Dashboard</a>
            </div>
        </div>
{notice}
        <table>
            <thead>
                <tr>
                    <th>Symbol</th><th>Qty</th><th>Lot Size</th><th>Step Size</th>
                    <th>Last Fill</th><th>Current Bid</th><th>Difference</th>
                    <th>Buy Order</th><th>Sell Order</th><th>Actions</th>
                </tr>
            </thead>
            <tbody>
{rows}
            </tbody>
        </table>
    </div>"#,
        refreshed = refreshed_label(table.last_refreshed()),
    );

    page("Stock Positions", &body)
}

fn render_row(base_attr: &str, row: &PositionRow) -> String {
    let p = &row.record;
    let symbol = escape(&p.symbol);
    // An unknown quantity is not checked on submit.
    let qty_field = if p.qty.is_finite() {
        format!(r#"<input type="hidden" name="qty" value="{}">"#, p.qty)
    } else {
        String::new()
    };
    let disabled = if row.selling { " disabled" } else { "" };
    let label = if row.selling { "Selling..." } else { "Sell" };

    format!(
        r#"                <tr>
                    <td>{symbol}</td><td>{qty}</td><td>{lot}</td><td>{step}</td>
                    <td>{last_fill}</td><td>{bid}</td><td>{diff}</td>
                    <td>{buy_qty} @ {buy_price}</td><td>{sell_qty} @ {sell_price}</td>
                    <td class="actions">
                    <form method="post" action="{base_attr}/stocks/close"><input type="hidden" name="symbol" value="{symbol}">{qty_field}<button class="btn btn-danger"{disabled}>{label}</button></form>
                    </td>
                </tr>
"#,
        qty = amount(p.qty),
        lot = amount(p.lot_size),
        step = money(p.step_size),
        last_fill = money(p.last_fill),
        bid = money(p.bid_price),
        diff = money(p.diff),
        buy_qty = amount(p.buy_order_qty),
        buy_price = money(p.buy_order_price),
        sell_qty = amount(p.sell_order_qty),
        sell_price = money(p.sell_order_price),
    )
}

/// `-` stands in for a number the API left null.
fn money(value: f64) -> String {
    if value.is_finite() {
        format!("${value:.2}")
    } else {
        "-".to_string()
    }
}

fn amount(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "-".to_string()
    }
}
