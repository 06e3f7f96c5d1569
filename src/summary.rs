use teloxide::utils::html;

use crate::i18n::Translations;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SummarySection {
    pub heading: String,
    #[serde(default)]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SummaryData {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SummarySection>,
}

impl SummaryData {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.points.is_empty())
    }

    /// Telegram HTML, one line per heading or point so pagination never splits a tag.
    pub fn render_html(&self, t: &Translations) -> String {
        let mut lines = vec![
            html::italic(t.summary_header),
            html::bold(&html::escape(&self.title)),
        ];
        for section in &self.sections {
            lines.push(String::new());
            lines.push(html::bold(&html::escape(&section.heading)));
            for point in &section.points {
                lines.push(format!("• {}", html::escape(point)));
            }
        }
        lines.join("\n")
    }
}
