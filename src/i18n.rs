#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// Name used when instructing the generation service.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "Arabic",
        }
    }

    /// Name shown on the language buttons.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "العربية",
        }
    }

    pub fn from_native_name(text: &str) -> Option<Language> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.native_name() == text.trim())
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    pub fn t(&self) -> &'static Translations {
        match self {
            Language::En => &EN,
            Language::Ar => &AR,
        }
    }
}

pub struct Translations {
    pub welcome: &'static str,
    pub choose_lang: &'static str,
    pub upload_title: &'static str,
    pub upload_subtitle: &'static str,
    pub file_type: &'static str,
    pub analyzing: &'static str,
    pub generating_summary: &'static str,
    pub crafting_quiz: &'static str,
    pub still_working: &'static str,
    pub error: &'static str,
    pub file_error: &'static str,
    pub choose_option: &'static str,
    pub summary: &'static str,
    pub quiz: &'static str,
    pub generator: &'static str,
    pub upload_new: &'static str,
    pub summary_header: &'static str,
    pub question: &'static str,
    pub of: &'static str,
    pub generate_more: &'static str,
    pub generating_more: &'static str,
    pub questions_added: &'static str,
    pub load_more_failed: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
    pub explanation: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub finish_quiz: &'static str,
    pub answer_first: &'static str,
    pub already_answered: &'static str,
    pub quiz_completed: &'static str,
    pub enter_name_prompt: &'static str,
    pub final_score: &'static str,
    pub current_accuracy: &'static str,
    pub cert_title: &'static str,
    pub cert_subtitle: &'static str,
    pub cert_present: &'static str,
    pub cert_body: &'static str,
    pub cert_serial: &'static str,
    pub score: &'static str,
    pub brand_name: &'static str,
    pub summary_style: &'static str,
    pub formal: &'static str,
    pub friendly: &'static str,
    pub choose_content_lang: &'static str,
    pub content_lang_desc: &'static str,
    pub settings_saved: &'static str,
    pub gen_title: &'static str,
    pub gen_subtitle: &'static str,
    pub gen_type_label: &'static str,
    pub gen_topic_label: &'static str,
    pub gen_placeholder: &'static str,
    pub gen_generating: &'static str,
    pub close: &'static str,
}

pub static EN: Translations = Translations {
    welcome: "Welcome to",
    choose_lang: "Choose Your Language",
    upload_title: "Smart Student Platform",
    upload_subtitle: "Upload your study files and AVB will summarize them and quiz you immediately.",
    file_type: "Supports PDF, DOCX, TXT",
    analyzing: "Reading file...",
    generating_summary: "Analyzing content & generating summary...",
    crafting_quiz: "Crafting 30+ custom questions...",
    still_working: "Still working on your file, please wait...",
    error: "Failed to process file. Please ensure the API key is valid and the file is not corrupted.",
    file_error: "Please upload a PDF, DOCX, or TXT file.",
    choose_option: "Please choose one of the options.",
    summary: "Summary",
    quiz: "Quiz",
    generator: "Pro Writer",
    upload_new: "Upload New File",
    summary_header: "Document Analysis",
    question: "Question",
    of: "of",
    generate_more: "Generate More",
    generating_more: "Generating more questions...",
    questions_added: "New questions added:",
    load_more_failed: "Could not generate more questions at this time.",
    correct: "Correct",
    incorrect: "Incorrect",
    explanation: "Explanation",
    previous: "Previous",
    next: "Next",
    finish_quiz: "Finish & Get Certificate",
    answer_first: "Choose an answer first.",
    already_answered: "You have already answered this question.",
    quiz_completed: "Quiz Completed!",
    enter_name_prompt: "Enter your name to generate your official certificate.",
    final_score: "Final Score",
    current_accuracy: "Current Accuracy",
    cert_title: "Certificate of Completion",
    cert_subtitle: "Official Completion Document",
    cert_present: "This certifies that",
    cert_body: "Has successfully completed the automated assessment based on the provided study material, demonstrating understanding of the core concepts.",
    cert_serial: "Certificate No.",
    score: "Score",
    brand_name: "AVB Education",
    summary_style: "Choose Summary Style",
    formal: "Formal & Professional",
    friendly: "Friendly & Casual",
    choose_content_lang: "Output Language",
    content_lang_desc: "Select language for Summary & Quiz",
    settings_saved: "Saved.",
    gen_title: "Content Studio",
    gen_subtitle: "AI Professional Writer",
    gen_type_label: "Choose Content Type",
    gen_topic_label: "Enter Topic / Main Idea",
    gen_placeholder: "e.g. The impact of artificial intelligence on modern education systems...",
    gen_generating: "Crafting your content...",
    close: "Close",
};

pub static AR: Translations = Translations {
    welcome: "مرحباً بك في",
    choose_lang: "اختر لغتك",
    upload_title: "منصة الطالب الذكية",
    upload_subtitle: "ارفع ملفاتك الدراسية وسيقوم AVB بتلخيصها واختبارك فيها فوراً",
    file_type: "يدعم PDF, DOCX, TXT",
    analyzing: "جاري قراءة الملف...",
    generating_summary: "جاري تحليل المحتوى وإنشاء الملخص...",
    crafting_quiz: "جاري إعداد أكثر من ٣٠ سؤال مخصص...",
    still_working: "ما زلنا نعمل على ملفك، يرجى الانتظار...",
    error: "فشل في معالجة الملف. يرجى التأكد من صلاحية مفتاح API وأن الملف غير تالف.",
    file_error: "يرجى رفع ملف بصيغة PDF أو DOCX أو TXT.",
    choose_option: "يرجى اختيار أحد الخيارات.",
    summary: "الملخص",
    quiz: "الاختبار",
    generator: "الكاتب المحترف",
    upload_new: "رفع ملف جديد",
    summary_header: "تحليل المستند",
    question: "سؤال",
    of: "من",
    generate_more: "توليد المزيد",
    generating_more: "جاري توليد المزيد من الأسئلة...",
    questions_added: "تمت إضافة أسئلة جديدة:",
    load_more_failed: "تعذر توليد المزيد من الأسئلة حالياً.",
    correct: "إجابة صحيحة",
    incorrect: "إجابة خاطئة",
    explanation: "التفسير",
    previous: "السابق",
    next: "التالي",
    finish_quiz: "إنهاء واستلام الشهادة",
    answer_first: "اختر إجابة أولاً.",
    already_answered: "لقد أجبت على هذا السؤال بالفعل.",
    quiz_completed: "تم إنهاء الاختبار!",
    enter_name_prompt: "أدخل اسمك لاستخراج شهادتك المعتمدة.",
    final_score: "النتيجة النهائية",
    current_accuracy: "الدقة الحالية",
    cert_title: "شهادة إنجاز",
    cert_subtitle: "وثيقة رسمية",
    cert_present: "تشهد هذه الوثيقة بأن",
    cert_body: "قد أتم بنجاح التقييم الآلي بناءً على المواد الدراسية المقدمة، مظهراً استيعاباً للمفاهيم الأساسية.",
    cert_serial: "رقم الشهادة",
    score: "الدرجة",
    brand_name: "منصة AVB التعليمية",
    summary_style: "اختر نمط الملخص",
    formal: "رسمي واحترافي",
    friendly: "ودي وبسيط",
    choose_content_lang: "لغة المخرجات",
    content_lang_desc: "اختر لغة الملخص والاختبار",
    settings_saved: "تم الحفظ.",
    gen_title: "استوديو المحتوى",
    gen_subtitle: "الكاتب الذكي المحترف",
    gen_type_label: "اختر نوع المحتوى",
    gen_topic_label: "أدخل الموضوع أو الفكرة الرئيسية",
    gen_placeholder: "مثال: تأثير الذكاء الاصطناعي على أنظمة التعليم الحديثة...",
    gen_generating: "جاري صياغة المحتوى...",
    close: "إغلاق",
};
