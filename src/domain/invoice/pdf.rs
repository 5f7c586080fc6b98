use std::io::BufWriter;
use std::str::FromStr;

use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};
use rust_decimal::Decimal;

use super::calc::{percent_of, to_money};
use super::Invoice;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;
const BOTTOM_LIMIT: f32 = 30.0;
const ROW_HEIGHT: f32 = 7.0;

const COL_FEATURE: f32 = MARGIN;
const COL_HOURS: f32 = 118.0;
const COL_RATE: f32 = 142.0;
const COL_TOTAL: f32 = 168.0;

#[derive(Debug, thiserror::Error)]
#[error("failed to render invoice pdf: {0}")]
pub struct PdfRenderError(String);

/// Layout variants offered for download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceTemplate {
    #[default]
    Modern,
    Classic,
    Minimal,
    Corporate,
}

impl FromStr for InvoiceTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(InvoiceTemplate::Modern),
            "classic" => Ok(InvoiceTemplate::Classic),
            "minimal" => Ok(InvoiceTemplate::Minimal),
            "corporate" => Ok(InvoiceTemplate::Corporate),
            other => Err(format!(
                "Unknown template '{}'. Use modern, classic, minimal or corporate",
                other
            )),
        }
    }
}

struct TemplateStyle {
    accent: (f32, f32, f32),
    /// Solid accent band across the top with the title in white
    header_band: bool,
    /// Shade every other item row
    striped_rows: bool,
    /// Thin rule under every item row
    ruled_rows: bool,
    title: &'static str,
}

impl InvoiceTemplate {
    /// (regular, bold)
    fn fonts(self) -> (BuiltinFont, BuiltinFont) {
        match self {
            InvoiceTemplate::Modern | InvoiceTemplate::Corporate => {
                (BuiltinFont::Helvetica, BuiltinFont::HelveticaBold)
            }
            InvoiceTemplate::Classic => (BuiltinFont::TimesRoman, BuiltinFont::TimesBold),
            InvoiceTemplate::Minimal => (BuiltinFont::Courier, BuiltinFont::CourierBold),
        }
    }

    fn style(self) -> TemplateStyle {
        match self {
            InvoiceTemplate::Modern => TemplateStyle {
                accent: (0.31, 0.27, 0.90),
                header_band: true,
                striped_rows: true,
                ruled_rows: false,
                title: "INVOICE",
            },
            InvoiceTemplate::Classic => TemplateStyle {
                accent: (0.20, 0.20, 0.20),
                header_band: false,
                striped_rows: false,
                ruled_rows: true,
                title: "Invoice",
            },
            InvoiceTemplate::Minimal => TemplateStyle {
                accent: (0.45, 0.45, 0.45),
                header_band: false,
                striped_rows: false,
                ruled_rows: false,
                title: "invoice",
            },
            InvoiceTemplate::Corporate => TemplateStyle {
                accent: (0.06, 0.23, 0.42),
                header_band: true,
                striped_rows: false,
                ruled_rows: true,
                title: "TAX INVOICE",
            },
        }
    }
}

struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    style: TemplateStyle,
    y: f32,
}

impl Canvas<'_> {
    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    fn fill(&self, (r, g, b): (f32, f32, f32)) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn ink(&self) {
        self.fill((0.1, 0.1, 0.1));
    }

    fn rule(&self, y: f32) {
        let (r, g, b) = self.style.accent;
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn band(&self, bottom: f32, top: f32, color: (f32, f32, f32)) {
        self.fill(color);
        self.layer.add_rect(Rect::new(
            Mm(MARGIN - 2.0),
            Mm(bottom),
            Mm(PAGE_WIDTH - MARGIN + 2.0),
            Mm(top),
        ));
        self.ink();
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.ink();
    }

    /// Start a new page when fewer than `needed` mm remain
    fn ensure_space(&mut self, needed: f32) -> bool {
        if self.y - needed < BOTTOM_LIMIT {
            self.new_page();
            return true;
        }
        false
    }

    fn table_header(&mut self) {
        let accent = self.style.accent;
        if self.style.header_band {
            self.band(self.y - 2.5, self.y + 5.0, accent);
            self.fill((1.0, 1.0, 1.0));
        } else {
            self.fill(accent);
        }
        self.text("Item", 10.0, COL_FEATURE, self.y, true);
        self.text("Hours", 10.0, COL_HOURS, self.y, true);
        self.text("Rate", 10.0, COL_RATE, self.y, true);
        self.text("Amount", 10.0, COL_TOTAL, self.y, true);
        self.ink();
        if !self.style.header_band {
            self.rule(self.y - 2.5);
        }
        self.y -= ROW_HEIGHT + 1.5;
    }
}

/// Render an A4 invoice document and return the raw PDF bytes
pub fn render_invoice_pdf(
    invoice: &Invoice,
    template: InvoiceTemplate,
) -> Result<Vec<u8>, PdfRenderError> {
    let (regular_font, bold_font) = template.fonts();
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(regular_font)
        .map_err(|e| PdfRenderError(e.to_string()))?;
    let bold = doc
        .add_builtin_font(bold_font)
        .map_err(|e| PdfRenderError(e.to_string()))?;

    {
        let mut canvas = Canvas {
            doc: &doc,
            layer,
            regular,
            bold,
            style: template.style(),
            y: PAGE_HEIGHT - MARGIN,
        };

        draw_header(&mut canvas, invoice);
        draw_parties(&mut canvas, invoice);
        draw_items(&mut canvas, invoice);
        draw_totals(&mut canvas, invoice);
        draw_footer_notes(&mut canvas, invoice);
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| PdfRenderError(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| PdfRenderError(e.to_string()))
}

fn draw_header(canvas: &mut Canvas<'_>, invoice: &Invoice) {
    let top = canvas.y;
    let accent = canvas.style.accent;
    let title = canvas.style.title;

    if canvas.style.header_band {
        canvas.band(top - 16.0, top + 6.0, accent);
        canvas.fill((1.0, 1.0, 1.0));
        canvas.text(title, 22.0, MARGIN, top - 8.0, true);
        canvas.text(&invoice.invoice_id, 11.0, 140.0, top - 4.0, true);
        canvas.text(invoice.status.as_str(), 9.0, 140.0, top - 10.0, false);
        canvas.ink();
    } else {
        canvas.fill(accent);
        canvas.text(title, 22.0, MARGIN, top - 8.0, true);
        canvas.ink();
        canvas.text(&invoice.invoice_id, 11.0, 140.0, top - 4.0, true);
        canvas.text(invoice.status.as_str(), 9.0, 140.0, top - 10.0, false);
        canvas.rule(top - 14.0);
    }

    canvas.y = top - 26.0;
}

fn draw_parties(canvas: &mut Canvas<'_>, invoice: &Invoice) {
    let sender = &invoice.sender.0;
    let client = &invoice.client.0;
    let start = canvas.y;

    canvas.fill(canvas.style.accent);
    canvas.text("From", 10.0, MARGIN, start, true);
    canvas.text("Bill to", 10.0, 80.0, start, true);
    canvas.text("Details", 10.0, 140.0, start, true);
    canvas.ink();

    let mut y = start - 6.0;
    let sender_lines = [
        sender.name.as_deref(),
        sender.address.as_deref(),
        sender.email.as_deref(),
        sender.phone.as_deref(),
        sender.website.as_deref(),
    ];
    for line in sender_lines.into_iter().flatten() {
        canvas.text(line, 9.0, MARGIN, y, false);
        y -= 4.5;
    }
    let sender_bottom = y;

    let mut y = start - 6.0;
    canvas.text(&client.name, 9.0, 80.0, y, true);
    y -= 4.5;
    let client_lines = [
        client.company.as_deref(),
        client.address.as_deref(),
        client.email.as_deref(),
    ];
    for line in client_lines.into_iter().flatten() {
        canvas.text(line, 9.0, 80.0, y, false);
        y -= 4.5;
    }
    let client_bottom = y;

    let mut y = start - 6.0;
    canvas.text(&format!("Issued: {}", format_date(invoice.invoice_date)), 9.0, 140.0, y, false);
    y -= 4.5;
    canvas.text(&format!("Due: {}", format_date(invoice.due_date)), 9.0, 140.0, y, false);
    y -= 4.5;

    canvas.y = sender_bottom.min(client_bottom).min(y) - 8.0;
}

fn draw_items(canvas: &mut Canvas<'_>, invoice: &Invoice) {
    canvas.table_header();

    for (idx, item) in invoice.items.0.iter().enumerate() {
        let extra = if item.description.is_empty() { 0.0 } else { 4.0 };
        if canvas.ensure_space(ROW_HEIGHT + extra) {
            canvas.table_header();
        }

        let row_top = canvas.y + 4.5;
        let row_bottom = canvas.y - 2.5 - extra;
        if canvas.style.striped_rows && idx % 2 == 1 {
            canvas.band(row_bottom, row_top, (0.95, 0.95, 0.98));
        }

        canvas.text(&item.feature, 10.0, COL_FEATURE, canvas.y, false);
        canvas.text(&format_quantity(item.hours), 10.0, COL_HOURS, canvas.y, false);
        canvas.text(&format_money(item.rate), 10.0, COL_RATE, canvas.y, false);
        canvas.text(&format_money(item.total), 10.0, COL_TOTAL, canvas.y, true);
        if !item.description.is_empty() {
            canvas.fill((0.4, 0.4, 0.4));
            canvas.text(&item.description, 8.0, COL_FEATURE + 2.0, canvas.y - 4.0, false);
            canvas.ink();
        }
        if canvas.style.ruled_rows {
            canvas.rule(row_bottom);
        }

        canvas.y -= ROW_HEIGHT + extra;
    }

    if !canvas.style.ruled_rows {
        canvas.rule(canvas.y + 2.5);
    }
    canvas.y -= 6.0;
}

fn draw_totals(canvas: &mut Canvas<'_>, invoice: &Invoice) {
    canvas.ensure_space(4.0 * ROW_HEIGHT + 6.0);

    let tax_amount = percent_of(invoice.subtotal, invoice.tax);
    let discount_amount = percent_of(invoice.subtotal, invoice.discount);
    let rows = [
        ("Subtotal".to_string(), format_money(invoice.subtotal)),
        (
            format!("Tax ({}%)", invoice.tax.normalize()),
            format_money(tax_amount),
        ),
        (
            format!("Discount ({}%)", invoice.discount.normalize()),
            format!("-{}", format_money(discount_amount)),
        ),
    ];

    for (label, value) in rows.iter() {
        canvas.text(label, 10.0, COL_RATE - 12.0, canvas.y, false);
        canvas.text(value, 10.0, COL_TOTAL, canvas.y, false);
        canvas.y -= ROW_HEIGHT - 1.0;
    }

    canvas.y -= 2.0;
    let accent = canvas.style.accent;
    if canvas.style.header_band {
        canvas.band(canvas.y - 3.0, canvas.y + 5.5, accent);
        canvas.fill((1.0, 1.0, 1.0));
    } else {
        canvas.rule(canvas.y + 5.0);
        canvas.fill(accent);
    }
    canvas.text("Total", 12.0, COL_RATE - 12.0, canvas.y, true);
    canvas.text(&format_money(invoice.total), 12.0, COL_TOTAL, canvas.y, true);
    canvas.ink();
    canvas.y -= ROW_HEIGHT + 6.0;
}

fn draw_footer_notes(canvas: &mut Canvas<'_>, invoice: &Invoice) {
    for (heading, body) in [("Notes", &invoice.notes), ("Terms", &invoice.terms)] {
        if body.trim().is_empty() {
            continue;
        }
        canvas.ensure_space(12.0);
        canvas.fill(canvas.style.accent);
        canvas.text(heading, 10.0, MARGIN, canvas.y, true);
        canvas.ink();
        canvas.y -= 5.0;
        for line in body.lines() {
            canvas.ensure_space(5.0);
            canvas.text(line, 9.0, MARGIN, canvas.y, false);
            canvas.y -= 4.5;
        }
        canvas.y -= 4.0;
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// `1234.5` → `$1,234.50`
pub fn format_money(value: Decimal) -> String {
    let amount = to_money(value);
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let text = amount.abs().to_string();
    let (int_part, dec_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, dec_part)
}
