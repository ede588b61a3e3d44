use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ar,
}

pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Ar => &AR,
        }
    }

    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "Arabic",
        }
    }
}

#[derive(Debug)]
pub struct Strings {
    pub app_name: &'static str,
    pub app_title: &'static str,
    pub login: &'static str,
    pub logout: &'static str,
    pub welcome: &'static str,
    pub dashboard: &'static str,
    pub new_entry: &'static str,
    pub avg_duration: &'static str,
    pub avg_quality: &'static str,
    pub consistency: &'static str,
    pub sleep_trend: &'static str,
    pub quality_trend: &'static str,
    pub hours: &'static str,
    pub score: &'static str,
    pub save: &'static str,
    pub analyzing: &'static str,
    pub generate_insights: &'static str,
    pub refresh_analysis: &'static str,
    pub login_prompt: &'static str,
    pub demo_hint: &'static str,
    pub email_placeholder: &'static str,
    pub password_placeholder: &'static str,
    pub notes: &'static str,
    pub notes_placeholder: &'static str,
    pub bed_time: &'static str,
    pub wake_time: &'static str,
    pub quality: &'static str,
    pub quality_low: &'static str,
    pub quality_high: &'static str,
    pub analysis_title: &'static str,
    pub recommendations: &'static str,
    pub analysis_fallback: &'static str,
    pub language_name: &'static str,
    pub date_label: &'static str,
    pub saving: &'static str,
    pub saved: &'static str,
}

static EN: Strings = Strings {
    app_name: "Somnia",
    app_title: "Somnia Sleep Analyzer",
    login: "Log In",
    logout: "Log Out",
    welcome: "Welcome back",
    dashboard: "Dashboard",
    new_entry: "New Entry",
    avg_duration: "Avg Duration",
    avg_quality: "Avg Quality",
    consistency: "Consistency",
    sleep_trend: "Sleep Duration Trend",
    quality_trend: "Sleep Quality Trend",
    hours: "Hours",
    score: "Score",
    save: "Save Entry",
    analyzing: "Analyzing sleep patterns...",
    generate_insights: "Generate AI Insights",
    refresh_analysis: "Refresh Analysis",
    login_prompt: "Please log in to view your sleep analytics.",
    demo_hint: "Demo account: any email and password work.",
    email_placeholder: "Enter your email",
    password_placeholder: "Enter password",
    notes: "Notes",
    notes_placeholder: "How did you sleep?",
    bed_time: "Bed Time",
    wake_time: "Wake Time",
    quality: "Quality (1-10)",
    quality_low: "1 (Poor)",
    quality_high: "10 (Excellent)",
    analysis_title: "AI Sleep Coach",
    recommendations: "Recommendations",
    analysis_fallback: "Could not analyze data at this time.",
    language_name: "English",
    date_label: "Date",
    saving: "Saving...",
    saved: "Saved",
};

static AR: Strings = Strings {
    app_name: "سومنيا",
    app_title: "سومنيا - محلل النوم",
    login: "تسجيل الدخول",
    logout: "تسجيل الخروج",
    welcome: "أهلاً بك",
    dashboard: "لوحة التحكم",
    new_entry: "إدخال جديد",
    avg_duration: "متوسط المدة",
    avg_quality: "متوسط الجودة",
    consistency: "الاتساق",
    sleep_trend: "اتجاه مدة النوم",
    quality_trend: "اتجاه جودة النوم",
    hours: "ساعات",
    score: "النتيجة",
    save: "حفظ الإدخال",
    analyzing: "جارٍ تحليل أنماط النوم...",
    generate_insights: "توليد رؤى الذكاء الاصطناعي",
    refresh_analysis: "تحديث التحليل",
    login_prompt: "يرجى تسجيل الدخول لعرض تحليلات النوم.",
    demo_hint: "حساب تجريبي: أي بريد إلكتروني وكلمة مرور.",
    email_placeholder: "أدخل البريد الإلكتروني",
    password_placeholder: "أدخل كلمة المرور",
    notes: "ملاحظات",
    notes_placeholder: "كيف نمت؟",
    bed_time: "وقت النوم",
    wake_time: "وقت الاستيقاظ",
    quality: "الجودة (1-10)",
    quality_low: "1 (ضعيف)",
    quality_high: "10 (ممتاز)",
    analysis_title: "مدرب النوم الذكي",
    recommendations: "التوصيات",
    analysis_fallback: "تعذر تحليل البيانات في الوقت الحالي.",
    language_name: "العربية",
    date_label: "التاريخ",
    saving: "جارٍ الحفظ...",
    saved: "تم الحفظ",
};

pub fn short_date_label(date: NaiveDate, lang: Language) -> String {
    format!("{} {}", weekday_short(date.weekday(), lang), date.day())
}

fn weekday_short(weekday: Weekday, lang: Language) -> &'static str {
    match lang {
        Language::En => match weekday {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        },
        Language::Ar => match weekday {
            Weekday::Mon => "الاثنين",
            Weekday::Tue => "الثلاثاء",
            Weekday::Wed => "الأربعاء",
            Weekday::Thu => "الخميس",
            Weekday::Fri => "الجمعة",
            Weekday::Sat => "السبت",
            Weekday::Sun => "الأحد",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_is_rtl_english_is_not() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn language_round_trips_through_json() {
        let lang: Language = serde_json::from_str("\"ar\"").unwrap();
        assert_eq!(lang, Language::Ar);
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
    }

    #[test]
    fn date_label_uses_localized_weekday() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(short_date_label(date, Language::En), "Mon 5");
        assert_eq!(short_date_label(date, Language::Ar), "الاثنين 5");
    }
}
