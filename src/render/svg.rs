//! Small markup builders shared by the section renderers.

pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Auto,
    Middle,
}

impl Baseline {
    fn as_str(self) -> &'static str {
        match self {
            Baseline::Auto => "auto",
            Baseline::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font_size: f32,
    pub font_weight: u16,
    pub fill: &'a str,
    pub anchor: Anchor,
    pub baseline: Baseline,
}

impl<'a> TextStyle<'a> {
    pub fn new(font_size: f32, fill: &'a str) -> Self {
        Self {
            font_size,
            font_weight: 400,
            fill,
            anchor: Anchor::Start,
            baseline: Baseline::Auto,
        }
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn middle(mut self) -> Self {
        self.baseline = Baseline::Middle;
        self
    }
}

pub fn push_text(out: &mut String, content: &str, x: f32, y: f32, style: &TextStyle<'_>) {
    out.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\">{}</text>",
        style.font_size,
        style.font_weight,
        escape_xml(style.fill),
        style.anchor.as_str(),
        style.baseline.as_str(),
        escape_xml(content)
    ));
}

/// Plain rectangle; `stroke` is `(color, width)`.
pub fn push_rect(
    out: &mut String,
    (x, y, width, height): (f32, f32, f32, f32),
    fill: &str,
    stroke: Option<(&str, f32)>,
    rx: Option<f32>,
) {
    out.push_str(&format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"",
        escape_xml(fill)
    ));
    if let Some((color, stroke_width)) = stroke {
        out.push_str(&format!(
            " stroke=\"{}\" stroke-width=\"{stroke_width}\"",
            escape_xml(color)
        ));
    }
    if let Some(rx) = rx {
        out.push_str(&format!(" rx=\"{rx}\""));
    }
    out.push_str("/>");
}
