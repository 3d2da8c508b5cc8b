// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resume composer — lays `ResumeData` out as a single print column.
//
// The column is 794 px wide (A4 at 96 dpi) and at least 1123 px tall, padded
// 40 px vertically and 50 px horizontally. Text width is estimated from an
// average glyph width, the same approximation the text wrapper uses, so the
// result is a stable layout rather than a typeset one.

use cvpress_core::Rect;
use tracing::{debug, instrument};

use super::model::ResumeData;
use crate::layout::{LayoutNode, LayoutTree, NodeStyle};

/// Width of the print column in CSS pixels.
pub const COLUMN_WIDTH_PX: f64 = 794.0;
/// Minimum height of the print column in CSS pixels.
pub const MIN_COLUMN_HEIGHT_PX: f64 = 1123.0;

const PADDING_X: f64 = 50.0;
const PADDING_Y: f64 = 40.0;
const BODY_SIZE: f64 = 12.0;
const HEADING_SIZE: f64 = 14.0;
const NAME_SIZE: f64 = 18.0;
const LINE_HEIGHT: f64 = 1.3;
const ITEM_INDENT: f64 = 12.0;
const SECTION_GAP: f64 = 15.0;
/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_EM: f64 = 0.5;

const TEXT_COLOR: [u8; 3] = [0, 0, 0];
const LINK_COLOR: [u8; 3] = [0x00, 0x66, 0xcc];
const SEPARATOR: &str = " | ";

/// Builds the layout tree for a resume.
#[derive(Debug, Clone)]
pub struct ResumeComposer {
    /// Screen position of the column's top-left corner.
    origin: (f64, f64),
    font_family: String,
    role: String,
}

impl ResumeComposer {
    pub fn new() -> Self {
        Self {
            origin: (0.0, 0.0),
            font_family: "Times New Roman, serif".into(),
            role: "resume-preview".into(),
        }
    }

    /// Place the column at a screen offset, as an embedding page would.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    /// Marker given to the column root.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Lay `data` out into a layout snapshot.
    #[instrument(skip_all, fields(name = %data.full_name))]
    pub fn compose(&self, data: &ResumeData) -> LayoutTree {
        let (ox, oy) = self.origin;
        let mut column = Column::new(ox + PADDING_X, ox + COLUMN_WIDTH_PX - PADDING_X, oy + PADDING_Y);

        if data.has_personal_info() {
            header(&mut column, data);
        }
        if !data.summary.trim().is_empty() {
            column.heading("Professional Summary");
            column.paragraph(data.summary.trim(), 0.0);
            column.gap(SECTION_GAP);
        }
        if !data.education.is_empty() {
            education(&mut column, data);
        }
        let skill_rows = data.technical_skills.rows();
        if !skill_rows.is_empty() {
            column.heading("Technical Skills");
            for (label, value) in skill_rows {
                column.line(
                    vec![Run::bold(format!("{label}: ")), Run::plain(value)],
                    0.0,
                    Align::Left,
                );
            }
            column.gap(SECTION_GAP);
        }
        if !data.work_experience.is_empty() {
            work_experience(&mut column, data);
        }
        if !data.experience.is_empty() {
            projects(&mut column, data);
        }
        if !data.achievements.is_empty() {
            column.heading("Achievements");
            for achievement in &data.achievements {
                let mut runs = vec![Run::plain(format!("• {}", achievement.description))];
                if let Some(link) = non_empty(&achievement.verify_link) {
                    runs.push(Run::plain(" ("));
                    runs.push(Run::link("Certificate", link));
                    runs.push(Run::plain(")"));
                }
                column.line(runs, 0.0, Align::Left);
                column.gap(4.0);
            }
            column.gap(SECTION_GAP);
        }
        if !data.certificates.is_empty() {
            column.heading("Certifications");
            for cert in &data.certificates {
                let mut trailer = Vec::new();
                if let Some(link) = non_empty(&cert.verify_link) {
                    trailer.push(Run::link("(Verify)", link));
                    trailer.push(Run::plain(" "));
                }
                trailer.push(Run::plain(cert.issue_date.clone()));
                column.split_line(
                    vec![
                        Run::bold(format!("{}: ", cert.issuer)),
                        Run::plain(cert.name.clone()),
                    ],
                    trailer,
                );
                column.gap(4.0);
            }
        }

        let content_height = (column.y - oy + PADDING_Y).max(MIN_COLUMN_HEIGHT_PX).ceil();
        let mut root = LayoutNode::block(Rect::new(ox, oy, COLUMN_WIDTH_PX, content_height))
            .with_role(self.role.clone())
            .with_style(NodeStyle {
                font_family: self.font_family.clone(),
                font_size: Some(px(BODY_SIZE)),
                background: Some([255, 255, 255]),
                ..NodeStyle::default()
            });
        root.children = column.nodes;

        debug!(
            nodes = root.children.len(),
            height = content_height,
            "Resume layout composed"
        );

        LayoutTree::new(root, COLUMN_WIDTH_PX as u32, content_height as u32)
    }
}

impl Default for ResumeComposer {
    fn default() -> Self {
        Self::new()
    }
}

// -- Sections -----------------------------------------------------------------

fn header(column: &mut Column, data: &ResumeData) {
    let name = if data.full_name.trim().is_empty() {
        "Your Name"
    } else {
        data.full_name.trim()
    };
    column.line_sized(vec![Run::bold(name)], NAME_SIZE, 0.0, Align::Center);
    column.gap(6.0);

    let contact: Vec<&str> = [data.email.as_str(), data.phone.as_str()]
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect();
    if !contact.is_empty() {
        column.line(
            vec![Run::plain(contact.join(SEPARATOR)).colored(LINK_COLOR)],
            0.0,
            Align::Center,
        );
        column.gap(4.0);
    }

    let profiles = [
        ("LinkedIn", profile_url(&data.linkedin, "linkedin.com", "/in/")),
        ("GitHub", profile_url(&data.github, "github.com", "/")),
        ("LeetCode", profile_url(&data.leetcode, "leetcode.com", "/u/")),
    ];
    let mut runs = Vec::new();
    for (label, url) in profiles.into_iter().filter(|(_, url)| !url.is_empty()) {
        if !runs.is_empty() {
            runs.push(Run::plain(SEPARATOR));
        }
        runs.push(Run::link(label, url));
    }
    if !runs.is_empty() {
        column.line(runs, 0.0, Align::Center);
    }
    column.gap(18.0);
}

fn education(column: &mut Column, data: &ResumeData) {
    column.heading("Education");
    for edu in &data.education {
        let institution = if edu.institution.trim().is_empty() {
            "Institution Name".to_string()
        } else {
            edu.institution.clone()
        };
        let mut left = vec![Run::bold(institution)];
        if !edu.degree.trim().is_empty() {
            let field = if edu.field.trim().is_empty() {
                String::new()
            } else {
                format!(" in {}", edu.field)
            };
            left.push(Run::plain(format!(", {}{}", edu.degree, field)));
        }
        column.split_line(left, vec![Run::plain(date_range(&edu.start_date, &edu.end_date, edu.current))]);

        if let Some(gpa) = non_empty(&edu.gpa) {
            let mut runs = vec![Run::plain(format!("• GPA: {gpa}"))];
            if let Some(link) = non_empty(&edu.transcript_link) {
                runs.push(Run::plain(" ("));
                runs.push(Run::link("Transcript", link));
                runs.push(Run::plain(")"));
            }
            column.line(runs, ITEM_INDENT, Align::Left);
        }
        if let Some(coursework) = non_empty(&edu.coursework) {
            column.paragraph(&format!("• Coursework: {coursework}"), ITEM_INDENT);
        }
        column.gap(8.0);
    }
    column.gap(SECTION_GAP);
}

fn work_experience(column: &mut Column, data: &ResumeData) {
    column.heading("Work Experience");
    for job in &data.work_experience {
        let mut left = vec![
            Run::bold(or_placeholder(&job.position, "Position")),
            Run::plain(SEPARATOR),
            Run::plain(or_placeholder(&job.company, "Company")),
        ];
        if !job.location.trim().is_empty() {
            left.push(Run::plain(SEPARATOR));
            left.push(Run::plain(job.location.clone()));
        }
        column.split_line(left, vec![Run::plain(date_range(&job.start_date, &job.end_date, job.current))]);
        bullets(column, &job.description);
        column.gap(10.0);
    }
    column.gap(SECTION_GAP);
}

fn projects(column: &mut Column, data: &ResumeData) {
    column.heading("Projects");
    for project in &data.experience {
        let left = vec![
            Run::bold(or_placeholder(&project.position, "Project Title")),
            Run::plain(SEPARATOR),
            Run::plain(or_placeholder(&project.company, "Technology Stack")),
        ];
        let mut trailer = Vec::new();
        if let Some(link) = non_empty(&project.project_link) {
            trailer.push(Run::link("(GitHub)", link));
            trailer.push(Run::plain(" "));
        }
        let dates = if project.end_date.is_empty() || project.end_date == "Present" {
            project.start_date.clone()
        } else {
            format!("{} - {}", project.start_date, project.end_date)
        };
        trailer.push(Run::plain(dates));
        column.split_line(left, trailer);
        bullets(column, &project.description);
        column.gap(10.0);
    }
    column.gap(SECTION_GAP);
}

/// One bullet per sentence of `description`.
fn bullets(column: &mut Column, description: &str) {
    for sentence in description.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        column.paragraph(&format!("• {sentence}."), ITEM_INDENT);
    }
}

// -- Helpers ------------------------------------------------------------------

/// Expand a profile handle into a full URL on `host`.
///
/// Full URLs pass through; `host/...` gains a scheme; `/path` is joined to the
/// host; a bare handle is placed under `prefix`.
pub fn profile_url(handle: &str, host: &str, prefix: &str) -> String {
    let handle = handle.trim();
    if handle.is_empty() {
        String::new()
    } else if handle.starts_with("http") {
        handle.to_string()
    } else if handle.starts_with(&format!("{host}/")) {
        format!("https://{handle}")
    } else if handle.starts_with('/') {
        format!("https://{host}{handle}")
    } else {
        format!("https://{host}{prefix}{handle}")
    }
}

fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current { "Present" } else { end };
    format!("{start} - {end}")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn px(size: f64) -> String {
    format!("{size}px")
}

/// Estimated rendered width of `text` at `size`.
fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH_EM
}

// -- Column layout ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
}

/// A styled stretch of text, optionally a hyperlink.
struct Run {
    text: String,
    href: Option<String>,
    bold: bool,
    color: [u8; 3],
}

impl Run {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
            bold: false,
            color: TEXT_COLOR,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            color: LINK_COLOR,
            ..Self::plain(text)
        }
    }

    fn colored(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }
}

/// Top-to-bottom flow of lines between two horizontal bounds.
struct Column {
    left: f64,
    right: f64,
    y: f64,
    nodes: Vec<LayoutNode>,
}

impl Column {
    fn new(left: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            right,
            y: top,
            nodes: Vec::new(),
        }
    }

    fn gap(&mut self, amount: f64) {
        self.y += amount;
    }

    fn heading(&mut self, title: &str) {
        self.line_sized(vec![Run::bold(title)], HEADING_SIZE, 0.0, Align::Left);
        self.gap(10.0);
        let mut rule = LayoutNode::rule(Rect::new(self.left, self.y, self.right - self.left, 1.0));
        rule.style.background = Some(TEXT_COLOR);
        self.nodes.push(rule);
        self.gap(1.0 + 8.0);
    }

    fn line(&mut self, runs: Vec<Run>, indent: f64, align: Align) {
        self.line_sized(runs, BODY_SIZE, indent, align);
    }

    fn line_sized(&mut self, runs: Vec<Run>, size: f64, indent: f64, align: Align) {
        let width: f64 = runs.iter().map(|run| text_width(&run.text, size)).sum();
        let x = match align {
            Align::Left => self.left + indent,
            Align::Center => self.left + ((self.right - self.left) - width).max(0.0) / 2.0,
        };
        self.place_runs(runs, x, size);
        self.y += size * LINE_HEIGHT;
    }

    /// Left-aligned runs with a right-aligned trailer on the same line.
    fn split_line(&mut self, left: Vec<Run>, trailer: Vec<Run>) {
        let trailer_width: f64 = trailer
            .iter()
            .map(|run| text_width(&run.text, BODY_SIZE))
            .sum();
        self.place_runs(left, self.left, BODY_SIZE);
        self.place_runs(trailer, self.right - trailer_width, BODY_SIZE);
        self.y += BODY_SIZE * LINE_HEIGHT;
    }

    /// Word-wrapped plain text.
    fn paragraph(&mut self, text: &str, indent: f64) {
        let max_chars = ((self.right - self.left - indent) / (BODY_SIZE * GLYPH_WIDTH_EM)) as usize;
        for line in wrap_text(text, max_chars.max(1)) {
            self.line(vec![Run::plain(line)], indent, Align::Left);
        }
    }

    fn place_runs(&mut self, runs: Vec<Run>, mut x: f64, size: f64) {
        let height = size * LINE_HEIGHT;
        for run in runs {
            let width = text_width(&run.text, size);
            let rect = Rect::new(x, self.y, width, height);
            let node = match run.href {
                Some(href) => LayoutNode::link(rect, href, run.text),
                None => LayoutNode::text(rect, run.text),
            };
            self.nodes.push(node.with_style(NodeStyle {
                font_size: (size != BODY_SIZE).then(|| px(size)),
                bold: run.bold,
                color: run.color,
                ..NodeStyle::default()
            }));
            x += width;
        }
    }
}

/// Wrap a multi-line string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then performs simple word-wrap within each
/// paragraph. Words longer than `max_width` are force-broken.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_len = 0usize;

        for word in words {
            let word_len = word.chars().count();
            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        result.push(chunk.iter().collect());
                    } else {
                        current_line = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}
