use chrono::{Datelike, NaiveDate};
use rand::Rng;
use teloxide::utils::html;

use crate::i18n::Language;

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const AR_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
    "نوفمبر", "ديسمبر",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub student_name: String,
    pub score: u32,
    pub issued_on: NaiveDate,
    pub language: Language,
    pub serial: String,
}

impl Certificate {
    pub fn issue(student_name: &str, score: u32, language: Language) -> Self {
        let serial = format!("AVB-{:08X}", rand::thread_rng().gen::<u32>());
        Self::new(student_name, score, chrono::Local::now().date_naive(), language, serial)
    }

    pub fn new(
        student_name: &str,
        score: u32,
        issued_on: NaiveDate,
        language: Language,
        serial: String,
    ) -> Self {
        Self {
            student_name: student_name.trim().to_string(),
            score,
            issued_on,
            language,
            serial,
        }
    }

    pub fn date_text(&self) -> String {
        format_date(self.issued_on, self.language)
    }

    /// Short Telegram HTML version sent with the document.
    pub fn caption_html(&self) -> String {
        let t = self.language.t();
        format!(
            "🏆 {}\n{}\n\n{}\n{}\n\n{}: {}%\n{}\n{} {}",
            html::bold(t.cert_title),
            html::italic(t.brand_name),
            t.cert_present,
            html::bold(&html::escape(&self.student_name)),
            t.score,
            self.score,
            self.date_text(),
            t.cert_serial,
            html::code_inline(&self.serial),
        )
    }

    /// Standalone printable page.
    pub fn to_html_document(&self) -> String {
        let t = self.language.t();
        let (lang, dir) = match self.language {
            Language::En => ("en", "ltr"),
            Language::Ar => ("ar", "rtl"),
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
<meta charset="utf-8">
<title>{title} - {name}</title>
<style>
body {{ background: #000; color: #e4e4e7; font-family: {font}; margin: 0; }}
.certificate {{ border: 4px double #d4af37; margin: 2rem auto; max-width: 960px; padding: 3rem; text-align: center; }}
h1 {{ color: #d4af37; letter-spacing: 0.1em; }}
.name {{ color: #fff; font-size: 2.5rem; margin: 1.5rem 0; }}
.footer {{ display: flex; justify-content: space-between; margin-top: 3rem; }}
@media print {{ body {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }} }}
</style>
</head>
<body>
<div class="certificate">
<p>{brand}</p>
<h1>{title}</h1>
<p>{subtitle}</p>
<p>{present}</p>
<div class="name">{name}</div>
<p>{body}</p>
<div class="footer">
<span>{score_label}: {score}%</span>
<span>{date}</span>
<span>{serial_label}: {serial}</span>
</div>
</div>
</body>
</html>
"#,
            lang = lang,
            dir = dir,
            font = if self.language.is_rtl() { "\"Cairo\", sans-serif" } else { "\"Inter\", sans-serif" },
            title = t.cert_title,
            brand = t.brand_name,
            subtitle = t.cert_subtitle,
            present = t.cert_present,
            name = html::escape(&self.student_name),
            body = t.cert_body,
            score_label = t.score,
            score = self.score,
            date = self.date_text(),
            serial_label = t.cert_serial,
            serial = self.serial,
        )
    }

    pub fn file_name(&self) -> String {
        let name = self.student_name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("AVB_Certificate_{}.html", name)
    }
}

/// "October 19, 2026" or "١٩ أكتوبر ٢٠٢٦".
pub fn format_date(date: NaiveDate, language: Language) -> String {
    let month = date.month0() as usize;
    match language {
        Language::En => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
        Language::Ar => format!(
            "{} {} {}",
            arabic_digits(date.day()),
            AR_MONTHS[month],
            arabic_digits(date.year())
        ),
    }
}

fn arabic_digits(n: impl ToString) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32('٠' as u32 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn dates_are_localized() {
        assert_eq!(format_date(date(), Language::En), "October 19, 2026");
        assert_eq!(format_date(date(), Language::Ar), "١٩ أكتوبر ٢٠٢٦");
    }

    #[test]
    fn file_name_replaces_whitespace() {
        let cert = Certificate::new(" Layla  Hassan ", 80, date(), Language::En, "AVB-1".into());
        assert_eq!(cert.student_name, "Layla  Hassan");
        assert_eq!(cert.file_name(), "AVB_Certificate_Layla_Hassan.html");
    }

    #[test]
    fn document_is_rtl_for_arabic_and_escapes_the_name() {
        let cert = Certificate::new("<Omar>", 50, date(), Language::Ar, "AVB-2".into());
        let doc = cert.to_html_document();
        assert!(doc.contains(r#"<html lang="ar" dir="rtl">"#));
        assert!(doc.contains("&lt;Omar&gt;"));
        assert!(doc.contains("50%"));
        assert!(doc.contains("شهادة إنجاز"));
    }

    #[test]
    fn caption_carries_score_and_serial() {
        let cert = Certificate::new("Sam", 67, date(), Language::En, "AVB-00C0FFEE".into());
        let caption = cert.caption_html();
        assert!(caption.contains("<b>Sam</b>"));
        assert!(caption.contains("Score: 67%"));
        assert!(caption.contains("<code>AVB-00C0FFEE</code>"));
        assert!(caption.contains("October 19, 2026"));
    }

    #[test]
    fn issued_serials_look_right() {
        let cert = Certificate::issue("Sam", 100, Language::En);
        assert!(cert.serial.starts_with("AVB-"));
        assert_eq!(cert.serial.len(), 12);
    }
}
