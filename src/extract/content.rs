//! Content stream interpretation: text-showing operators to spans.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::Span;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};

/// TJ adjustments (thousandths of text space) beyond this read as word gaps.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// Leading used by T*, ' and " when none was set.
const DEFAULT_LEADING: f64 = 12.0;

/// Extract the spans of one page through a backend.
pub fn extract_page_spans<B: PdfBackend + ?Sized>(
    backend: &B,
    page_num: u32,
    page_id: PageId,
    normalize: bool,
) -> Result<Vec<Span>> {
    let fonts: HashMap<Vec<u8>, Option<String>> = backend
        .page_fonts(page_id)?
        .into_iter()
        .map(|f| (f.name, f.base_font))
        .collect();

    let content = backend.page_content(page_id)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let ops = backend.decode_content(&content)?;

    let mut interpreter = SpanInterpreter::new(page_num, normalize, &fonts);
    for op in &ops {
        interpreter.apply(op, |font, bytes| backend.decode_text(page_id, font, bytes));
    }
    Ok(interpreter.finish())
}

/// A PDF affine matrix `[a b c d e f]`, row-vector convention.
#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    fn from_operands(op: &ContentOp) -> Option<Self> {
        if op.operands.len() < 6 {
            return None;
        }
        let n = |i, default| op.number(i).unwrap_or(default);
        Some(Self {
            a: n(0, 1.0),
            b: n(1, 0.0),
            c: n(2, 0.0),
            d: n(3, 1.0),
            e: n(4, 0.0),
            f: n(5, 0.0),
        })
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed y axis.
    fn vertical_scale(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Colour, font and CTM survive across BT/ET; q/Q save and restore them.
#[derive(Debug, Clone, Default)]
struct GraphicsState {
    ctm: Matrix,
    fill_color: Option<String>,
    font_resource: Vec<u8>,
    font_size: f64,
    leading: f64,
}

struct SpanInterpreter<'a> {
    page: u32,
    normalize: bool,
    fonts: &'a HashMap<Vec<u8>, Option<String>>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    line_matrix: Matrix,
    text_matrix: Matrix,
    in_text: bool,
    /// Run still open on the current line; later shows in the same style extend it.
    pending: Option<Span>,
    spans: Vec<Span>,
}

impl<'a> SpanInterpreter<'a> {
    fn new(page: u32, normalize: bool, fonts: &'a HashMap<Vec<u8>, Option<String>>) -> Self {
        Self {
            page,
            normalize,
            fonts,
            state: GraphicsState {
                font_size: 12.0,
                leading: DEFAULT_LEADING,
                ..Default::default()
            },
            saved: Vec::new(),
            line_matrix: Matrix::default(),
            text_matrix: Matrix::default(),
            in_text: false,
            pending: None,
            spans: Vec::new(),
        }
    }

    fn apply<D>(&mut self, op: &ContentOp, decode: D)
    where
        D: Fn(&[u8], &[u8]) -> String,
    {
        match op.operator.as_str() {
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.state.ctm = m.then(&self.state.ctm);
                }
            }
            "BT" => {
                self.flush();
                self.in_text = true;
                self.line_matrix = Matrix::default();
                self.text_matrix = Matrix::default();
            }
            "ET" => {
                self.flush();
                self.in_text = false;
            }
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.font_resource = name.clone();
                }
                if let Some(size) = op.number(1) {
                    self.state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.state.leading = leading;
                }
            }
            "Td" | "TD" => {
                let (tx, ty) = (op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0));
                if op.operator == "TD" {
                    self.state.leading = -ty;
                }
                self.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.flush();
                    self.line_matrix = m;
                    self.text_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = decode(&self.state.font_resource, bytes);
                    self.emit(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.combine_tj(items, &decode);
                    self.emit(text);
                }
            }
            "'" | "\"" => {
                self.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                    let text = decode(&self.state.font_resource, bytes);
                    self.emit(text);
                }
            }
            "rg" => self.set_fill(rgb_hex(op.number(0), op.number(1), op.number(2))),
            "g" => {
                let gray = op.number(0);
                self.set_fill(rgb_hex(gray, gray, gray));
            }
            "k" => self.set_fill(cmyk_hex(
                op.number(0),
                op.number(1),
                op.number(2),
                op.number(3),
            )),
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.flush();
        self.line_matrix.translate(tx, ty);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.state.leading);
    }

    fn set_fill(&mut self, color: Option<String>) {
        if color.is_some() {
            self.state.fill_color = color;
        }
    }

    fn combine_tj<D>(&self, items: &[PdfValue], decode: &D) -> String
    where
        D: Fn(&[u8], &[u8]) -> String,
    {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&decode(&self.state.font_resource, bytes));
                }
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    // Negative adjustments advance the pen
                    let advance = -item.as_number().unwrap_or(0.0);
                    if advance > TJ_SPACE_THRESHOLD && needs_word_space(&combined) {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    /// Size of the current font on the page: Tf size through the text matrix and CTM.
    fn effective_size(&self) -> f64 {
        let rendering = self.text_matrix.then(&self.state.ctm);
        self.state.font_size.abs() * rendering.vertical_scale()
    }

    fn emit(&mut self, text: String) {
        if !self.in_text || text.is_empty() {
            return;
        }

        let font = self
            .fonts
            .get(&self.state.font_resource)
            .cloned()
            .unwrap_or_else(|| {
                // Undeclared resource: keep its name so spans still group by font
                Some(String::from_utf8_lossy(&self.state.font_resource).into_owned())
                    .filter(|n| !n.is_empty())
            });
        let size = Some(self.effective_size());
        let color = self.state.fill_color.clone();

        if let Some(open) = self.pending.as_mut() {
            if open.font == font && open.size == size && open.color == color {
                open.text.push_str(&text);
                return;
            }
        }
        self.flush();
        self.pending = Some(Span {
            page: self.page,
            font,
            size,
            text,
            color,
        });
    }

    fn flush(&mut self) {
        if let Some(mut span) = self.pending.take() {
            if self.normalize {
                span.text = span.text.nfc().collect();
            }
            self.spans.push(span);
        }
    }

    fn finish(mut self) -> Vec<Span> {
        self.flush();
        self.spans
    }
}

fn needs_word_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Scripts written without spaces between words.
///
/// Hangul is not included: Korean uses word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF        // CJK Unified Ideographs
            | 0x3400..=0x4DBF  // Extension A
            | 0x20000..=0x2EBEF // Extensions B-F
            | 0x3040..=0x309F  // Hiragana
            | 0x30A0..=0x30FF  // Katakana
            | 0x3000..=0x303F  // CJK Symbols and Punctuation
    )
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn rgb_hex(r: Option<f64>, g: Option<f64>, b: Option<f64>) -> Option<String> {
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        channel(r?),
        channel(g?),
        channel(b?)
    ))
}

fn cmyk_hex(c: Option<f64>, m: Option<f64>, y: Option<f64>, k: Option<f64>) -> Option<String> {
    let k = k?.clamp(0.0, 1.0);
    let convert = |v: f64| (1.0 - v.clamp(0.0, 1.0)) * (1.0 - k);
    rgb_hex(Some(convert(c?)), Some(convert(m?)), Some(convert(y?)))
}
