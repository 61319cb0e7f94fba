//! Greedy line wrapping and pagination.
//!
//! Both steps are pure: the same text and layout always give the same lines
//! and pages.

use crate::helvetica::string_width;

/// Fixed page geometry, in PDF points (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    /// Baseline of the first line on each page.
    pub top: f64,
    /// A new page starts once the next baseline would fall below this.
    pub bottom: f64,
    pub line_spacing: f64,
    pub font_size: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            // US Letter
            page_width: 612.0,
            page_height: 792.0,
            left_margin: 50.0,
            right_margin: 550.0,
            top: 750.0,
            bottom: 50.0,
            line_spacing: 12.0,
            font_size: 10.0,
        }
    }
}

impl PageLayout {
    /// Horizontal room for a line: right margin minus left margin.
    pub fn usable_width(&self) -> f64 {
        self.right_margin - self.left_margin
    }

    /// How many lines fit on one page before a break.
    pub fn lines_per_page(&self) -> usize {
        if self.line_spacing <= 0.0 || self.top < self.bottom {
            return 1;
        }
        ((self.top - self.bottom) / self.line_spacing).floor() as usize + 1
    }
}

/// A line positioned on its page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Break `text` into lines that fit the usable width.
///
/// A word joins the current line while the running width (each word plus
/// one trailing space) stays strictly below the usable width. A word wider
/// than the whole line still gets a line of its own; it is never split.
pub fn wrap_words(text: &str, layout: &PageLayout) -> Vec<String> {
    let usable = layout.usable_width();
    let space = string_width(" ", layout.font_size);

    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut width = 0.0;

    for word in text.split_whitespace() {
        let word_width = string_width(word, layout.font_size);
        if width + word_width < usable {
            current.push(word);
            width += word_width + space;
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            width = word_width + space;
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

/// Place lines top to bottom at the left margin, starting a new page when
/// the baseline drops below the bottom margin. Never ends on an empty page;
/// no lines at all still gives one (blank) page.
pub fn paginate(lines: &[String], layout: &PageLayout) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut y = layout.top;
    let mut page_full = false;

    for line in lines {
        if page_full {
            pages.push(Page::default());
            y = layout.top;
            page_full = false;
        }
        if let Some(page) = pages.last_mut() {
            page.lines.push(PlacedLine {
                x: layout.left_margin,
                y,
                text: line.clone(),
            });
        }
        y -= layout.line_spacing;
        if y < layout.bottom {
            page_full = true;
        }
    }

    pages
}

/// Wrap and paginate in one step.
pub fn layout_summary(text: &str, layout: &PageLayout) -> Vec<Page> {
    paginate(&wrap_words(text, layout), layout)
}
