//! Paginated order document.
//!
//! Layout is done in millimetres from the top-left corner of an A4 page and
//! converted to PDF points when operations are emitted. Text uses the base-14
//! Helvetica fonts with WinAnsi encoding, so anything outside Latin-1 is
//! printed as `?`.

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::core::i18n::Translations;
use crate::domain::model::OrderSubmission;
use crate::utils::error::Result;
use crate::utils::money::format_yen;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_RIGHT: f32 = 14.0;
const CONTINUATION_TOP: f32 = 15.0;
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - 20.0;
const FOOTER_Y: f32 = PAGE_HEIGHT - 10.0;
const TABLE_MIN_START: f32 = 70.0;
const COMMENTS_WIDTH: f32 = 180.0;

const MM_TO_PT: f32 = 72.0 / 25.4;
const PT_TO_MM: f32 = 25.4 / 72.0;

const TABLE_FONT_SIZE: f32 = 9.0;
const CELL_PADDING: f32 = 1.5;

/// Fixed column widths in mm; `None` takes whatever width is left.
const COLUMN_WIDTHS: [Option<f32>; 7] = [
    Some(10.0),
    Some(25.0),
    None,
    Some(25.0),
    Some(25.0),
    Some(20.0),
    Some(25.0),
];

type Rgb = (f32, f32, f32);

const NAVY: Rgb = (26.0 / 255.0, 54.0 / 255.0, 93.0 / 255.0);
const BLACK: Rgb = (0.0, 0.0, 0.0);
const WHITE: Rgb = (1.0, 1.0, 1.0);
const GRAY: Rgb = (100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
const GRID: Rgb = (200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub brand: String,
    /// Centered line at the bottom of the last page.
    pub footer: Option<String>,
    pub compress: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            brand: "KONEXA".to_string(),
            footer: Some("KONEXA - Expo Osaka 2025".to_string()),
            compress: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

/// Encodes text for a WinAnsi font; Latin-1 maps one-to-one, the rest is `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Approximate Helvetica advance width, in thousandths of an em.
fn glyph_width(c: char) -> f32 {
    match c {
        ' ' | '.' | ',' | ':' | ';' | '!' | 'i' | 'j' | 'l' | 'I' | '\'' | '|' => 278.0,
        'f' | 't' => 278.0,
        'r' | '(' | ')' | '-' | '[' | ']' => 333.0,
        'm' | 'M' => 833.0,
        'w' => 722.0,
        'W' => 944.0,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500.0,
        'A'..='Z' => 667.0,
        _ => 556.0,
    }
}

fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().map(glyph_width).sum::<f32>() / 1000.0 * size_pt * PT_TO_MM
}

/// Greedy word wrap to `max_width` mm. Words wider than a line are broken
/// between characters; explicit line breaks are kept.
fn wrap_text(text: &str, max_width: f32, size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, size_pt) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, size_pt) <= max_width {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                let mut next = current.clone();
                next.push(ch);
                if !current.is_empty() && text_width(&next, size_pt) > max_width {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
        lines.push(current);
    }

    lines
}

/// Drawing operations for one page.
#[derive(Default)]
struct PageCanvas {
    operations: Vec<Operation>,
}

impl PageCanvas {
    fn set_fill(&mut self, color: Rgb) {
        self.operations.push(Operation::new(
            "rg",
            vec![real(color.0), real(color.1), real(color.2)],
        ));
    }

    fn set_stroke(&mut self, color: Rgb) {
        self.operations.push(Operation::new(
            "RG",
            vec![real(color.0), real(color.1), real(color.2)],
        ));
    }

    /// `y` is the text baseline, measured from the top of the page.
    fn text(&mut self, x: f32, y: f32, font: Font, size_pt: f32, color: Rgb, align: Align, text: &str) {
        let width = text_width(text, size_pt);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };

        self.set_fill(color);
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), real(size_pt)],
        ));
        self.operations.push(Operation::new(
            "Td",
            vec![real(left * MM_TO_PT), real((PAGE_HEIGHT - y) * MM_TO_PT)],
        ));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(text))],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    fn rect(&mut self, x: f32, top: f32, width: f32, height: f32, operator: &str) {
        self.operations.push(Operation::new(
            "re",
            vec![
                real(x * MM_TO_PT),
                real((PAGE_HEIGHT - top - height) * MM_TO_PT),
                real(width * MM_TO_PT),
                real(height * MM_TO_PT),
            ],
        ));
        self.operations.push(Operation::new(operator, vec![]));
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
        self.set_fill(color);
        self.rect(x, top, width, height, "f");
    }

    fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
        self.set_stroke(color);
        self.operations
            .push(Operation::new("w", vec![real(0.1 * MM_TO_PT)]));
        self.rect(x, top, width, height, "S");
    }
}

struct TableLayout {
    widths: Vec<f32>,
}

impl TableLayout {
    fn new() -> Self {
        let fixed: f32 = COLUMN_WIDTHS.iter().flatten().sum();
        let flexible = (PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT - fixed).max(20.0);
        Self {
            widths: COLUMN_WIDTHS.iter().map(|w| w.unwrap_or(flexible)).collect(),
        }
    }

    fn line_height() -> f32 {
        TABLE_FONT_SIZE * PT_TO_MM * 1.15
    }

    fn wrap_row(&self, cells: &[String]) -> Vec<Vec<String>> {
        cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| wrap_text(cell, width - 2.0 * CELL_PADDING, TABLE_FONT_SIZE))
            .collect()
    }

    fn row_height(wrapped: &[Vec<String>]) -> f32 {
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * Self::line_height() + 2.0 * CELL_PADDING
    }

    fn draw_row(&self, canvas: &mut PageCanvas, top: f32, wrapped: &[Vec<String>], header: bool) -> f32 {
        let height = Self::row_height(wrapped);
        let total_width: f32 = self.widths.iter().sum();
        let (font, color) = if header {
            canvas.fill_rect(MARGIN_LEFT, top, total_width, height, NAVY);
            (Font::Bold, WHITE)
        } else {
            (Font::Regular, BLACK)
        };

        let mut x = MARGIN_LEFT;
        for (lines, width) in wrapped.iter().zip(&self.widths) {
            canvas.stroke_rect(x, top, *width, height, GRID);
            for (i, line) in lines.iter().enumerate() {
                let baseline = top
                    + CELL_PADDING
                    + TABLE_FONT_SIZE * PT_TO_MM * 0.8
                    + i as f32 * Self::line_height();
                canvas.text(x + CELL_PADDING, baseline, font, TABLE_FONT_SIZE, color, Align::Left, line);
            }
            x += width;
        }

        height
    }
}

/// Accumulates finished pages and writes the page-number footer on each.
struct PageSet<'a> {
    translations: &'a Translations,
    finished: Vec<PageCanvas>,
    current: PageCanvas,
}

impl<'a> PageSet<'a> {
    fn new(translations: &'a Translations) -> Self {
        Self {
            translations,
            finished: Vec::new(),
            current: PageCanvas::default(),
        }
    }

    fn page_number(&self) -> usize {
        self.finished.len() + 1
    }

    fn write_page_footer(&mut self) {
        let label = format!("{} {}", self.translations.page, self.page_number());
        self.current
            .text(MARGIN_LEFT, FOOTER_Y, Font::Regular, 10.0, BLACK, Align::Left, &label);
    }

    fn break_page(&mut self) {
        self.write_page_footer();
        let page = std::mem::take(&mut self.current);
        self.finished.push(page);
    }

    fn finish(mut self) -> Vec<PageCanvas> {
        self.write_page_footer();
        self.finished.push(self.current);
        self.finished
    }
}

fn table_cells(order: &OrderSubmission, translations: &Translations) -> (Vec<String>, Vec<Vec<String>>) {
    let labels = &translations.table;
    let header = [
        labels.number,
        labels.sku,
        labels.product,
        labels.category,
        labels.unit_price,
        labels.quantity,
        labels.total,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let rows = order
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            vec![
                (index + 1).to_string(),
                entry.item.sku.clone(),
                entry.item.product_name.clone(),
                translations.category_name(entry.item.category).to_string(),
                entry.item.current_price.clone(),
                entry.quantity.to_string(),
                format_yen(entry.line_total()),
            ]
        })
        .collect();

    (header, rows)
}

/// Lays out the order header, customer block, item table and grand total.
/// Empty optional fields are left out and the following content moves up.
/// An empty cart renders a header-only table and a zero total.
pub fn generate_order(
    order: &OrderSubmission,
    translations: &Translations,
    options: &PdfOptions,
    date: NaiveDate,
) -> Result<OrderDocument> {
    let mut pages = PageSet::new(translations);

    let canvas = &mut pages.current;
    canvas.text(
        PAGE_WIDTH / 2.0,
        15.0,
        Font::Regular,
        20.0,
        NAVY,
        Align::Center,
        &translations.branded_title(&options.brand),
    );
    canvas.text(
        PAGE_WIDTH - 15.0,
        15.0,
        Font::Regular,
        10.0,
        GRAY,
        Align::Right,
        &format!("{}: {}", translations.date, translations.format_date(date)),
    );

    let customer_line = format!("{}: {}", translations.customer, order.customer_name.trim());
    let email_line = format!("{}: {}", translations.email, order.customer_email.trim());
    canvas.text(MARGIN_LEFT, 30.0, Font::Regular, 12.0, BLACK, Align::Left, &customer_line);
    canvas.text(MARGIN_LEFT, 37.0, Font::Regular, 12.0, BLACK, Align::Left, &email_line);

    let mut y = 44.0;
    let optional_lines = [
        (translations.company_name, order.company_name.trim()),
        (translations.company_address, order.company_address.trim()),
    ];
    for (label, value) in optional_lines {
        if value.is_empty() {
            continue;
        }
        canvas.text(MARGIN_LEFT, y, Font::Regular, 12.0, BLACK, Align::Left, &format!("{}: {}", label, value));
        y += 7.0;
    }

    let comments = order.comments.trim();
    if !comments.is_empty() {
        canvas.text(MARGIN_LEFT, y, Font::Regular, 12.0, BLACK, Align::Left, &format!("{}:", translations.comments));
        let lines = wrap_text(comments, COMMENTS_WIDTH, 10.0);
        for (i, line) in lines.iter().enumerate() {
            canvas.text(MARGIN_LEFT, y + 7.0 + i as f32 * 5.0, Font::Regular, 10.0, BLACK, Align::Left, line);
        }
        y += 7.0 + lines.len() as f32 * 5.0;
    }

    let table = TableLayout::new();
    let (header, rows) = table_cells(order, translations);
    let wrapped_header = table.wrap_row(&header);

    y = TABLE_MIN_START.max(y + 5.0);
    y += table.draw_row(&mut pages.current, y, &wrapped_header, true);

    for row in &rows {
        let wrapped = table.wrap_row(row);
        if y + TableLayout::row_height(&wrapped) > CONTENT_BOTTOM {
            pages.break_page();
            y = CONTINUATION_TOP;
            y += table.draw_row(&mut pages.current, y, &wrapped_header, true);
        }
        y += table.draw_row(&mut pages.current, y, &wrapped, false);
    }

    let mut total_y = y + 10.0;
    if total_y > CONTENT_BOTTOM {
        pages.break_page();
        total_y = CONTINUATION_TOP + 10.0;
    }
    let total_line = format!("{}: {}", translations.table.total, format_yen(order.grand_total()));
    pages
        .current
        .text(PAGE_WIDTH - 15.0, total_y, Font::Bold, 12.0, NAVY, Align::Right, &total_line);

    if let Some(footer) = options.footer.as_deref().filter(|f| !f.trim().is_empty()) {
        pages
            .current
            .text(PAGE_WIDTH / 2.0, FOOTER_Y, Font::Regular, 10.0, GRAY, Align::Center, footer);
    }

    let canvases = pages.finish();
    let page_count = canvases.len();
    let bytes = assemble(canvases, &translations.branded_title(&options.brand), options.compress)?;

    tracing::debug!(
        "Generated order document: {} entries, {} pages, {} bytes",
        order.entries.len(),
        page_count,
        bytes.len()
    );

    Ok(OrderDocument { bytes, page_count })
}

fn assemble(canvases: Vec<PageCanvas>, title: &str, compress: bool) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(canvases.len());
    for canvas in canvases {
        let content = Content {
            operations: canvas.operations,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            real(0.0),
            real(0.0),
            real(PAGE_WIDTH * MM_TO_PT),
            real(PAGE_HEIGHT * MM_TO_PT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(title)),
        "Producer" => Object::string_literal("supply-picker"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    if compress {
        doc.compress();
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::i18n::Language;
    use crate::domain::model::{CartEntry, CatalogItem, Category};

    fn contains(bytes: &[u8], needle: &str) -> bool {
        bytes
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 11).unwrap()
    }

    fn plain() -> PdfOptions {
        PdfOptions {
            compress: false,
            ..Default::default()
        }
    }

    fn entry(id: usize, name: &str, price: f64, quantity: u32) -> CartEntry {
        let mut item = CatalogItem::new(id.to_string(), name);
        item.price_value = price;
        item.current_price = format_yen(price);
        item.sku = format!("SKU-{:03}", id);
        item.category = Category::Cups;
        CartEntry { item, quantity }
    }

    fn order(entries: Vec<CartEntry>) -> OrderSubmission {
        OrderSubmission {
            customer_name: "Juan Perez".to_string(),
            customer_email: "juan@example.com".to_string(),
            entries,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_page_order() {
        let submission = order(vec![entry(1, "Vaso Frio", 16500.0, 5)]);
        let doc = generate_order(&submission, &Translations::default(), &plain(), date()).unwrap();

        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&doc.bytes, "KONEXA Supply Order"));
        assert!(contains(&doc.bytes, "Date: 4/11/2025"));
        assert!(contains(&doc.bytes, "Customer: Juan Perez"));
        assert!(contains(&doc.bytes, "SKU-001"));
        assert!(contains(&doc.bytes, "82,500"));
        assert!(contains(&doc.bytes, "Page 1"));
    }

    #[test]
    fn test_empty_optional_blocks_are_omitted() {
        let submission = order(vec![entry(1, "Vaso Frio", 16500.0, 1)]);
        let doc = generate_order(&submission, &Translations::default(), &plain(), date()).unwrap();

        assert!(!contains(&doc.bytes, "Company Name"));
        assert!(!contains(&doc.bytes, "Company Address"));
        assert!(!contains(&doc.bytes, "Comments"));
    }

    #[test]
    fn test_optional_blocks_are_rendered_when_present() {
        let mut submission = order(vec![entry(1, "Vaso Frio", 16500.0, 1)]);
        submission.company_name = "Cafe Osaka".to_string();
        submission.comments = "Entregar antes del lunes".to_string();

        let translations = Translations::for_language(Language::Es);
        let doc = generate_order(&submission, &translations, &plain(), date()).unwrap();

        assert!(contains(&doc.bytes, "Cafe Osaka"));
        assert!(contains(&doc.bytes, "Entregar antes del lunes"));
        assert!(contains(&doc.bytes, "Fecha: 11/4/2025"));
        assert!(contains(&doc.bytes, "Tazas"));
        assert!(!contains(&doc.bytes, "Company Address"));
    }

    /// Baseline (in points from the bottom) of the first-page line whose text is `needle`.
    fn first_page_baseline(bytes: &[u8], needle: &str) -> Option<f32> {
        let parsed = Document::load_mem(bytes).unwrap();
        let page_id = *parsed.get_pages().get(&1).unwrap();
        let content = Content::decode(&parsed.get_page_content(page_id).unwrap()).unwrap();

        let mut last_y = None;
        for op in &content.operations {
            match op.operator.as_str() {
                "Td" => last_y = op.operands.get(1).and_then(|o| o.as_float().ok()),
                "Tj" => {
                    let text = op.operands.first().and_then(|o| o.as_str().ok());
                    if text == Some(needle.as_bytes()) {
                        return last_y;
                    }
                }
                _ => {}
            }
        }
        None
    }

    #[test]
    fn test_comments_move_up_when_company_lines_are_empty() {
        let mut submission = order(vec![entry(1, "Vaso Frio", 16500.0, 1)]);
        submission.comments = "Entregar antes del lunes".to_string();

        let doc = generate_order(&submission, &Translations::default(), &plain(), date()).unwrap();
        let y = first_page_baseline(&doc.bytes, "Comments:").unwrap();
        assert!((y - (PAGE_HEIGHT - 44.0) * MM_TO_PT).abs() < 0.05);

        submission.company_name = "Cafe Osaka".to_string();
        submission.company_address = "1-2-3 Namba".to_string();
        let doc = generate_order(&submission, &Translations::default(), &plain(), date()).unwrap();
        let y = first_page_baseline(&doc.bytes, "Comments:").unwrap();
        assert!((y - (PAGE_HEIGHT - 58.0) * MM_TO_PT).abs() < 0.05);
    }

    #[test]
    fn test_empty_cart_does_not_fail() {
        let doc = generate_order(&order(Vec::new()), &Translations::default(), &plain(), date()).unwrap();
        assert_eq!(doc.page_count, 1);
        assert!(contains(&doc.bytes, "Total: "));
    }

    #[test]
    fn test_long_orders_paginate_with_page_numbers() {
        let entries = (1..=80)
            .map(|i| entry(i, "Torani Salsa De Chocolate Y Mocha 1890ml", 6696.0, 1))
            .collect();
        let doc = generate_order(&order(entries), &Translations::default(), &plain(), date()).unwrap();

        assert!(doc.page_count >= 2);
        for page in 1..=doc.page_count {
            assert!(contains(&doc.bytes, &format!("Page {}", page)));
        }

        let parsed = Document::load_mem(&doc.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), doc.page_count);
    }

    #[test]
    fn test_compressed_output_is_a_valid_document() {
        let submission = order(vec![entry(1, "Vaso Frio", 16500.0, 2)]);
        let doc = generate_order(
            &submission,
            &Translations::for_language(Language::Ja),
            &PdfOptions::default(),
            date(),
        )
        .unwrap();

        let parsed = Document::load_mem(&doc.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Torani Salsa De Chocolate Y Mocha 1890ml", 20.0, 9.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, 9.0) <= 20.0));

        assert_eq!(wrap_text("", 20.0, 9.0), vec![String::new()]);
        assert_eq!(wrap_text("a\nb", 50.0, 9.0), vec!["a", "b"]);
        assert!(wrap_text(&"x".repeat(200), 20.0, 9.0).len() > 1);
    }

    #[test]
    fn test_win_ansi_replaces_non_latin() {
        assert_eq!(win_ansi("¥1"), vec![0xA5, b'1']);
        assert_eq!(win_ansi("カップ"), b"???".to_vec());
    }
}
