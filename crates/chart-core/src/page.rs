// File: crates/chart-core/src/page.rs
// Summary: Host page model: chart mount points by class, footer copyright year, HTML output.

use std::fmt::Write as _;

use chrono::Datelike;
use thiserror::Error;

use crate::text::escape_xml;

/// Container of the brand bar chart.
pub const BRAND_MOUNT: &str = "responsive-svg-container";
/// Container of the screen-size bar chart.
pub const SIZE_MOUNT: &str = "screen-size-container";
/// Container of the screen-technology pie chart.
pub const TECH_MOUNT: &str = "pie-container";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no element with class `{class}` on the page")]
    MissingMount { class: String },
}

/// A container element selected by class; charts are appended to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountPoint {
    class: String,
    children: Vec<String>,
}

impl MountPoint {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(), children: Vec::new() }
    }

    pub fn class(&self) -> &str { &self.class }
    pub fn children(&self) -> &[String] { &self.children }
    pub fn is_empty(&self) -> bool { self.children.is_empty() }

    pub fn append(&mut self, fragment: String) {
        self.children.push(fragment);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub mount: MountPoint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub sections: Vec<Section>,
    pub owner: String,
    pub year: i32,
}

/// Year used in the footer.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl Page {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self { title: title.into(), sections: Vec::new(), owner: String::new(), year }
    }

    /// The three-chart TV market page.
    pub fn dashboard(year: i32) -> Self {
        let mut page = Self::new("TV Market Overview", year);
        page.owner = "TV Market Overview".to_string();
        page.add_section("Brand market share", BRAND_MOUNT);
        page.add_section("Screen sizes", SIZE_MOUNT);
        page.add_section("Screen technologies", TECH_MOUNT);
        page
    }

    pub fn add_section(&mut self, heading: impl Into<String>, class: impl Into<String>) {
        self.sections.push(Section { heading: heading.into(), mount: MountPoint::new(class) });
    }

    pub fn mount(&mut self, class: &str) -> Result<&mut MountPoint, PageError> {
        self.sections
            .iter_mut()
            .map(|s| &mut s.mount)
            .find(|m| m.class == class)
            .ok_or_else(|| PageError::MissingMount { class: class.to_string() })
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html lang=\"en\">");
        let _ = writeln!(html, "<head>");
        let _ = writeln!(html, "  <meta charset=\"utf-8\">");
        let _ = writeln!(html, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
        let _ = writeln!(html, "  <title>{}</title>", escape_xml(&self.title));
        let _ = writeln!(html, "  <style>");
        let _ = writeln!(html, "    body {{ font-family: Arial, sans-serif; margin: 0; padding: 24px; background: #f4f5fb; }}");
        let _ = writeln!(html, "    section {{ margin: 0 auto 32px; max-width: 900px; }}");
        let _ = writeln!(html, "    section svg {{ max-width: 100%; height: auto; border-radius: 12px; box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1); }}");
        let _ = writeln!(html, "    footer {{ text-align: center; color: #667; font-size: 14px; }}");
        let _ = writeln!(html, "  </style>");
        let _ = writeln!(html, "</head>");
        let _ = writeln!(html, "<body>");
        let _ = writeln!(html, "  <h1>{}</h1>", escape_xml(&self.title));
        for section in &self.sections {
            let _ = writeln!(html, "  <section>");
            let _ = writeln!(html, "    <h2>{}</h2>", escape_xml(&section.heading));
            let _ = writeln!(html, "    <div class=\"{}\">", escape_xml(section.mount.class()));
            for child in section.mount.children() {
                html.push_str(child);
            }
            let _ = writeln!(html, "    </div>");
            let _ = writeln!(html, "  </section>");
        }
        let _ = writeln!(
            html,
            "  <footer>&copy; <span id=\"year\">{}</span> {}</footer>",
            self.year,
            escape_xml(&self.owner)
        );
        let _ = writeln!(html, "</body>");
        let _ = writeln!(html, "</html>");
        html
    }
}
