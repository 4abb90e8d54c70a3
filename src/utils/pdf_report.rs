// PDF report rendering
// Lays out an analysis session on A4 pages, then writes it with printpdf

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use regex::Regex;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::session::AnalysisSession;
use crate::utils::formatters::{format_dollars, format_number, format_percent};
use crate::utils::helvetica::text_width_mm;

// A4 portrait, millimetres, y measured from the top edge
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const PAGE_BOTTOM: f32 = 277.0;
const CONTENT_WIDTH: f32 = 170.0;

const TITLE_SIZE: f32 = 20.0;
const SUBTITLE_SIZE: f32 = 14.0;
const HEADING_SIZE: f32 = 16.0;
const SECTION_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;

const CATEGORY_Y: f32 = 30.0;
const METRICS_Y: f32 = 45.0;
/// Line spacing of the metrics block: 1.15 × body size, in mm
const METRICS_LINE_HEIGHT: f32 = BODY_SIZE * 1.15 * 25.4 / 72.0;
const ANALYSIS_START_Y: f32 = 35.0;
/// Cursor advance per wrapped body line
const LINE_HEIGHT: f32 = 7.0;
/// Gap before and after each section heading
const SECTION_GAP: f32 = 10.0;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// One positioned line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font_size: f32,
    pub x: f32,
    /// Baseline, mm from the top of the page
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<TextLine>,
}

/// Finished document ready to be saved or offered for download
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    /// Write into `dir` and return the full path.
    /// Path separators from the channel title are replaced so the file stays inside `dir`.
    pub async fn save(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.filename.replace(['/', '\\'], "-"));
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// `youtube-<title>-<category>.pdf` with every whitespace run turned into one `-`
pub fn report_filename(title: &str, category: &str) -> String {
    format!(
        "youtube-{}-{}.pdf",
        WHITESPACE.replace_all(title, "-"),
        WHITESPACE.replace_all(category, "-")
    )
}

/// Greedy word wrap against Helvetica metrics.
/// Explicit newlines start a new line; words wider than the limit are split by character.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, font_size) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if fits(word) {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if !fits(&current) && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Vertical cursor over the analysis pages
struct Cursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl Cursor {
    fn new(y: f32) -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y,
        }
    }

    fn place(&mut self, text: String, font_size: f32, y: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                text,
                font_size,
                x: MARGIN_X,
                y,
            });
        }
    }

    /// Start a new page when `needed` mm below the cursor would cross the bottom margin
    fn ensure_room(&mut self, needed: f32) {
        if self.y + needed > PAGE_BOTTOM {
            self.pages.push(PageLayout::default());
            self.y = MARGIN_TOP;
        }
    }

    fn section_heading(&mut self, text: &str) {
        // Keep the heading together with its first body line
        self.ensure_room(SECTION_GAP);
        self.place(text.to_string(), SECTION_SIZE, self.y);
        self.y += SECTION_GAP;
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, CONTENT_WIDTH, BODY_SIZE) {
            self.ensure_room(0.0);
            self.place(line, BODY_SIZE, self.y);
            self.y += LINE_HEIGHT;
        }
    }
}

fn overview_page(session: &AnalysisSession) -> PageLayout {
    let metrics = &session.metrics;
    let counts = &metrics.counts;
    let earnings = &metrics.estimated_yearly_earnings;

    let mut lines = vec![
        TextLine {
            text: session.channel.title.clone(),
            font_size: TITLE_SIZE,
            x: MARGIN_X,
            y: MARGIN_TOP,
        },
        TextLine {
            text: format!("Category: {}", session.report.category),
            font_size: SUBTITLE_SIZE,
            x: MARGIN_X,
            y: CATEGORY_Y,
        },
    ];

    let block = [
        format!("Subscribers: {}", format_number(counts.subscribers)),
        format!("Total Views: {}", format_number(counts.views)),
        format!("Videos: {}", format_number(counts.videos)),
        format!("Engagement Rate: {}", format_percent(metrics.engagement_rate)),
        format!("Average Views: {}", format_number(metrics.average_views)),
        format!(
            "Estimated Yearly Earnings: {} - {}",
            format_dollars(earnings.min),
            format_dollars(earnings.max)
        ),
    ];

    for (i, text) in block.into_iter().enumerate() {
        lines.push(TextLine {
            text,
            font_size: BODY_SIZE,
            x: MARGIN_X,
            y: METRICS_Y + i as f32 * METRICS_LINE_HEIGHT,
        });
    }

    PageLayout { lines }
}

/// Position every line of the report. Page 1 is the overview; analysis follows.
pub fn layout_report(session: &AnalysisSession) -> Vec<PageLayout> {
    let report = &session.report;
    let mut cursor = Cursor::new(ANALYSIS_START_Y);
    cursor.place("AI Analysis Report".to_string(), HEADING_SIZE, MARGIN_TOP);

    let sections = [
        ("Channel Summary", &report.summary),
        ("Growth Analysis", &report.growth_analysis),
        ("Content Strategy", &report.content_strategy),
    ];

    for (i, (heading, body)) in sections.into_iter().enumerate() {
        if i > 0 {
            cursor.y += SECTION_GAP;
        }
        cursor.section_heading(heading);
        cursor.paragraph(body);
    }

    cursor.y += SECTION_GAP;
    cursor.section_heading("Key Recommendations");
    for (i, rec) in report.recommendations.iter().enumerate() {
        cursor.paragraph(&format!("{}. {}", i + 1, rec));
    }

    let mut pages = vec![overview_page(session)];
    pages.extend(cursor.pages);
    pages
}

/// Render the session to PDF bytes plus its download filename
pub fn render_report(session: &AnalysisSession) -> Result<RenderedReport> {
    let pages = layout_report(session);
    let filename = report_filename(&session.channel.title, &session.report.category);

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("YouTube Channel Report - {}", session.channel.title),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Page 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AnalysisError::Render(format!("Failed to load font: {:?}", e)))?;

    for (i, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", i + 1))
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        for line in &page.lines {
            layer.use_text(
                line.text.clone(),
                line.font_size,
                Mm(line.x),
                Mm(PAGE_HEIGHT - line.y),
                &font,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| AnalysisError::Render(format!("PDF encoding failed: {:?}", e)))?;

    debug!(filename = %filename, pages = pages.len(), size = bytes.len(), "Rendered report");

    Ok(RenderedReport { filename, bytes })
}
