//! Plain-text rendering of bills and history summaries
//!
//! The external "render as printable document" side of the core: the
//! presentation layer hands the returned text to whatever print or
//! download path it owns. Output is fixed-width (receipt-style, 48 cols
//! by default) with no printer control codes.

use chrono::{DateTime, Local};
use shared::models::Bill;

/// Default line width (80mm receipt paper)
pub const DEFAULT_WIDTH: usize = 48;

fn pad_to_width(s: &str, width: usize, align_right: bool) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    let spaces = " ".repeat(width - len);
    if align_right {
        format!("{}{}", spaces, s)
    } else {
        format!("{}{}", s, spaces)
    }
}

/// Fixed-width text builder for receipt-style output
pub struct TextBuilder {
    buf: String,
    width: usize,
}

impl TextBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    pub fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn write_line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// Text centered in the line width
    pub fn text_center(&mut self, s: &str) {
        let len = s.chars().count();
        if len >= self.width {
            self.write_line(s);
            return;
        }
        let pad = (self.width - len) / 2;
        self.write_line(&format!("{}{}", " ".repeat(pad), s));
    }

    /// Left and right text on one line, right-aligned remainder
    pub fn line_lr(&mut self, left: &str, right: &str) {
        let right_len = right.chars().count();
        let left_width = self.width.saturating_sub(right_len + 1);
        self.write_line(&format!(
            "{} {}",
            pad_to_width(left, left_width, false),
            right
        ));
    }

    pub fn eq_sep(&mut self) {
        self.write_line(&"=".repeat(self.width));
    }

    pub fn dash_sep(&mut self) {
        self.write_line(&"-".repeat(self.width));
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Render one bill as printable text
///
/// Layout follows the on-screen bill: shop header, contact line, id and
/// timestamp, item table, grand total, offer footer.
pub fn render_bill(bill: &Bill, width: usize) -> String {
    let mut b = TextBuilder::new(width);
    let profile = &bill.profile;

    let shop_name = if profile.shop_name.is_empty() {
        "Billing"
    } else {
        &profile.shop_name
    };
    b.text_center(shop_name);
    if !profile.phones.is_empty() {
        b.text_center(&format!("Phone: {}", profile.phones.join(" | ")));
    }
    if !profile.address.is_empty() {
        b.text_center(&profile.address);
    }
    b.text_center(&format!("{}  {}", bill.id, format_millis(bill.created_at)));
    b.eq_sep();

    // Item columns: name fills what qty/price/total and separators leave over
    let name_width = width.saturating_sub(23);
    b.write_line(&format!(
        "{} {} {} {}",
        pad_to_width("ITEM", name_width, false),
        pad_to_width("QTY", 4, true),
        pad_to_width("PRICE", 8, true),
        pad_to_width("TOTAL", 8, true),
    ));
    b.dash_sep();
    for item in &bill.items {
        let line_total = crate::money::to_f64(crate::money::line_total(item.price, item.qty));
        b.write_line(&format!(
            "{} {} {} {}",
            pad_to_width(&item.name, name_width, false),
            pad_to_width(&item.qty.to_string(), 4, true),
            pad_to_width(&format!("{:.2}", item.price), 8, true),
            pad_to_width(&format!("{:.2}", line_total), 8, true),
        ));
    }
    b.dash_sep();
    b.line_lr("TOTAL", &format!("{:.2}", bill.total));

    if !profile.offer.is_empty() {
        b.write("\n");
        b.text_center(&profile.offer);
    }

    b.into_string()
}

/// Render the history summary (id / date / total per bill)
pub fn render_history(bills: &[Bill], width: usize) -> String {
    let mut b = TextBuilder::new(width);
    b.text_center("BILLING HISTORY");
    b.eq_sep();

    let id_width = 10;
    let total_width = 10;
    let date_width = width.saturating_sub(id_width + total_width + 2);
    b.write_line(&format!(
        "{} {} {}",
        pad_to_width("ID", id_width, false),
        pad_to_width("DATE", date_width, false),
        pad_to_width("TOTAL", total_width, true),
    ));
    b.dash_sep();
    for bill in bills {
        b.write_line(&format!(
            "{} {} {}",
            pad_to_width(&bill.id, id_width, false),
            pad_to_width(&format_millis(bill.created_at), date_width, false),
            pad_to_width(&format!("{:.2}", bill.total), total_width, true),
        ));
    }
    b.dash_sep();

    let grand_total: f64 = crate::money::to_f64(
        bills
            .iter()
            .map(|bill| crate::money::to_decimal(bill.total))
            .sum(),
    );
    b.line_lr(&format!("{} bills", bills.len()), &format!("{:.2}", grand_total));

    b.into_string()
}
