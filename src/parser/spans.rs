//! Positioned text spans from PDF content streams.
//!
//! Only the text-positioning operators are interpreted; graphics state
//! (`cm`, clipping, colors) is ignored. Positions are in unscaled PDF user
//! space with the origin at the bottom-left, so larger `y` is higher up the
//! page.

use lopdf::content::Operation;
use lopdf::Object;

/// A run of text placed at one position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span, estimating its width from the character count.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// Right edge of the span.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// TJ adjustments beyond this (thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Turns string operands into text for a given font resource.
pub trait GlyphDecoder {
    /// Decode `bytes` drawn with the font resource named `font`.
    fn decode(&self, font: &[u8], bytes: &[u8]) -> String;
}

/// Walk content stream operations and collect the text spans they draw.
pub fn collect_spans(operations: &[Operation], decoder: &dyn GlyphDecoder) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut state = TextState::default();
    let mut in_text = false;

    for op in operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                state.matrix = TextMatrix::default();
            }
            "ET" => in_text = false,
            "Tf" => {
                if let [Object::Name(name), size, ..] = operands.as_slice() {
                    state.font = name.clone();
                    state.font_size = number(size).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    state.leading = Some(leading);
                }
            }
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands.as_slice() {
                    let (tx, ty) = (number(tx).unwrap_or(0.0), number(ty).unwrap_or(0.0));
                    if op.operator == "TD" {
                        state.leading = Some(-ty);
                    }
                    state.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let v: Vec<f32> = operands[..6].iter().map(|o| number(o).unwrap_or(0.0)).collect();
                    state.matrix = TextMatrix {
                        a: v[0],
                        b: v[1],
                        c: v[2],
                        d: v[3],
                        e: v[4],
                        f: v[5],
                    };
                }
            }
            "T*" => state.next_line(),
            "Tj" if in_text => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = decoder.decode(&state.font, bytes);
                    state.emit(text, &mut spans);
                }
            }
            "TJ" if in_text => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = decode_tj_array(items, &state.font, decoder);
                    state.emit(text, &mut spans);
                }
            }
            "'" | "\"" => {
                state.next_line();
                let text_index = if op.operator == "\"" { 2 } else { 0 };
                if in_text {
                    if let Some(Object::String(bytes, _)) = operands.get(text_index) {
                        let text = decoder.decode(&state.font, bytes);
                        state.emit(text, &mut spans);
                    }
                }
            }
            _ => {}
        }
    }

    spans
}

/// Join a TJ array, inserting a space where a large negative kern suggests a word gap.
fn decode_tj_array(items: &[Object], font: &[u8], decoder: &dyn GlyphDecoder) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decoder.decode(font, bytes)),
            other => {
                let Some(adjustment) = number(other) else {
                    continue;
                };
                let needs_space = -adjustment > TJ_SPACE_THRESHOLD
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                if needs_space {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Group spans into lines top to bottom and join each line left to right.
pub fn spans_to_text(spans: &[TextSpan]) -> String {
    let mut sorted: Vec<&TextSpan> = spans.iter().collect();
    sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<&TextSpan>> = Vec::new();
    for span in sorted {
        let tolerance = (span.font_size * 0.5).max(1.0);
        match lines.last_mut() {
            Some(line) if (line[0].y - span.y).abs() <= tolerance => line.push(span),
            _ => lines.push(vec![span]),
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            line.iter()
                .map(|span| span.text.trim())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    font: Vec<u8>,
    font_size: f32,
    leading: Option<f32>,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font: Vec::new(),
            font_size: 12.0,
            leading: None,
        }
    }
}

impl TextState {
    fn next_line(&mut self) {
        // Without an explicit TL, assume single spacing.
        let leading = self.leading.unwrap_or(self.font_size * 1.2);
        self.matrix.translate(0.0, -leading);
    }

    fn emit(&self, text: String, spans: &mut Vec<TextSpan>) {
        if text.trim().is_empty() {
            return;
        }
        let size = self.font_size * self.matrix.scale();
        spans.push(TextSpan::new(text, self.matrix.e, self.matrix.f, size));
    }
}

#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
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

impl TextMatrix {
    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Chinese and Japanese scripts run words together; Korean does not.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}

/// Decode bytes without font information: UTF-16BE with BOM, then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
