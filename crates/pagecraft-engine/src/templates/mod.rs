//! Ready-made block sets that can be dropped into a page.
//!
//! A template's blocks are never inserted directly: [`BlockTemplate::instantiate`]
//! hands out a deep copy with fresh block and item ids, so a template can be
//! used any number of times on the same page.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::models::{
    Block, BlockContent, ColumnsContent, CtaStripContent, FaqAccordionContent, FaqItem,
    FormButtonContent, FormContainerContent, FormInputContent, FormTextareaContent,
    HeadingContent, HeroBasicContent, Language, RichTextContent, StatItem, StatsContent,
    reindex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TemplateCategory {
    Hero,
    About,
    Features,
    Testimonials,
    Cta,
    Stats,
    Complex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockTemplate {
    pub id: &'static str,
    pub name_ar: &'static str,
    pub name_en: &'static str,
    pub description_ar: &'static str,
    pub description_en: &'static str,
    pub category: TemplateCategory,
    pub tags: &'static [&'static str],
    pub blocks: Vec<Block>,
}

impl BlockTemplate {
    pub fn name(&self, language: Language) -> &'static str {
        match language {
            Language::Ar => self.name_ar,
            Language::En => self.name_en,
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        match language {
            Language::Ar => self.description_ar,
            Language::En => self.description_en,
        }
    }

    /// Copies of the template's blocks ready for insertion.
    pub fn instantiate(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self.blocks.iter().map(Block::fresh_copy).collect();
        reindex(&mut blocks);
        blocks
    }

    /// Case-insensitive match against id, names and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.id.contains(&query)
            || self.name_en.to_lowercase().contains(&query)
            || self.name_ar.contains(&query)
            || self.tags.iter().any(|tag| tag.contains(&query))
    }
}

/// The built-in template catalogue, in display order.
pub fn builtin_templates() -> Vec<BlockTemplate> {
    vec![
        hero_basic(),
        stats_section(),
        cta_strip(),
        faq_section(),
        two_column_intro(),
        contact_section(),
    ]
}

pub fn find_template(id: &str) -> Option<BlockTemplate> {
    builtin_templates().into_iter().find(|template| template.id == id)
}

pub fn templates_in(category: TemplateCategory) -> Vec<BlockTemplate> {
    builtin_templates()
        .into_iter()
        .filter(|template| template.category == category)
        .collect()
}

fn hero_basic() -> BlockTemplate {
    BlockTemplate {
        id: "hero-basic-modern",
        name_ar: "قسم رئيسي حديث",
        name_en: "Modern Hero Section",
        description_ar: "عنوان رئيسي مع وصف وزر دعوة",
        description_en: "Headline with a subtitle and a call to action",
        category: TemplateCategory::Hero,
        tags: &["hero", "cta", "modern"],
        blocks: vec![Block::with_content(BlockContent::HeroBasic(HeroBasicContent {
            eyebrow_ar: "مرحباً بكم".into(),
            eyebrow_en: Some("Welcome".into()),
            title_ar: "التميز في التعليم".into(),
            title_en: Some("Excellence in Education".into()),
            subtitle_ar: "نُنشئ قادة المستقبل".into(),
            subtitle_en: Some("Building tomorrow's leaders".into()),
            cta_label_ar: "سجل الآن".into(),
            cta_label_en: Some("Enroll now".into()),
            cta_href: Some("/admissions".into()),
            align: Some("center".into()),
            ..Default::default()
        }))],
    }
}

fn stat(value: &str, suffix: &str, label_ar: &str, label_en: &str) -> StatItem {
    StatItem {
        id: String::new(),
        value: value.into(),
        suffix: (!suffix.is_empty()).then(|| suffix.into()),
        label_ar: label_ar.into(),
        label_en: Some(label_en.into()),
    }
}

fn stats_section() -> BlockTemplate {
    let mut stats = Block::with_content(BlockContent::Stats(StatsContent {
        items: vec![
            stat("30", "+", "سنة من الخبرة", "Years of experience"),
            stat("1200", "", "طالب", "Students"),
            stat("85", "", "معلم", "Teachers"),
            stat("98", "%", "نسبة النجاح", "Success rate"),
        ],
    }));
    stats.content.regenerate_item_ids();
    BlockTemplate {
        id: "stats-section",
        name_ar: "قسم الإحصائيات",
        name_en: "Statistics Section",
        description_ar: "أرقام بارزة عن المؤسسة",
        description_en: "Key figures at a glance",
        category: TemplateCategory::Stats,
        tags: &["stats", "numbers", "about"],
        blocks: vec![stats],
    }
}

fn cta_strip() -> BlockTemplate {
    BlockTemplate {
        id: "cta-strip-modern",
        name_ar: "دعوة للعمل",
        name_en: "Call to Action",
        description_ar: "شريط دعوة للتسجيل أو التواصل",
        description_en: "Strip inviting visitors to enroll or get in touch",
        category: TemplateCategory::Cta,
        tags: &["cta", "banner"],
        blocks: vec![Block::with_content(BlockContent::CtaStrip(CtaStripContent {
            title_ar: "انضم إلينا اليوم".into(),
            title_en: Some("Join us today".into()),
            text_ar: "التسجيل مفتوح للعام الدراسي الجديد".into(),
            text_en: Some("Admissions are open for the new school year".into()),
            cta_label_ar: "تواصل معنا".into(),
            cta_label_en: Some("Contact us".into()),
            cta_href: Some("/contact".into()),
            variant: Some("primary".into()),
        }))],
    }
}

fn faq(question_ar: &str, question_en: &str, answer_ar: &str, answer_en: &str) -> FaqItem {
    FaqItem {
        id: String::new(),
        question_ar: question_ar.into(),
        question_en: Some(question_en.into()),
        answer_ar: answer_ar.into(),
        answer_en: Some(answer_en.into()),
    }
}

fn faq_section() -> BlockTemplate {
    let heading = Block::with_content(BlockContent::Heading(HeadingContent {
        title_ar: "الأسئلة الشائعة".into(),
        title_en: Some("Frequently asked questions".into()),
        level: Some(2),
        align: Some("center".into()),
        ..Default::default()
    }));
    let mut accordion = Block::with_content(BlockContent::FaqAccordion(FaqAccordionContent {
        items: vec![
            faq(
                "متى يبدأ التسجيل؟",
                "When do admissions open?",
                "يبدأ التسجيل في شهر مارس من كل عام.",
                "Admissions open every March.",
            ),
            faq(
                "هل تتوفر حافلات مدرسية؟",
                "Is school transport available?",
                "نعم، تغطي الحافلات معظم الأحياء.",
                "Yes, buses cover most neighbourhoods.",
            ),
        ],
    }));
    accordion.content.regenerate_item_ids();
    let mut blocks = vec![heading, accordion];
    reindex(&mut blocks);
    BlockTemplate {
        id: "faq-section",
        name_ar: "قسم الأسئلة الشائعة",
        name_en: "FAQ Section",
        description_ar: "عنوان مع قائمة أسئلة وأجوبة",
        description_en: "Heading followed by questions and answers",
        category: TemplateCategory::Complex,
        tags: &["faq", "questions", "accordion"],
        blocks,
    }
}

fn two_column_intro() -> BlockTemplate {
    let mut columns = Block::with_content(BlockContent::Columns(ColumnsContent {
        columns: 2,
        gap: Some("2rem".into()),
    }));
    columns.slots[0].push(Block::with_content(BlockContent::Heading(HeadingContent {
        eyebrow_ar: "من نحن".into(),
        eyebrow_en: Some("About us".into()),
        title_ar: "رسالتنا".into(),
        title_en: Some("Our mission".into()),
        ..Default::default()
    })));
    columns.slots[1].push(Block::with_content(BlockContent::RichText(RichTextContent {
        body_ar: "نقدم تعليماً عالي الجودة في بيئة **آمنة** ومحفزة.".into(),
        body_en: Some("We offer high quality education in a **safe**, inspiring setting.".into()),
    })));
    BlockTemplate {
        id: "about-two-columns",
        name_ar: "تعريف بعمودين",
        name_en: "Two Column Introduction",
        description_ar: "عنوان في عمود ونص في العمود الآخر",
        description_en: "Heading in one column, text in the other",
        category: TemplateCategory::About,
        tags: &["about", "columns", "text"],
        blocks: vec![columns],
    }
}

fn contact_section() -> BlockTemplate {
    let mut form = Block::with_content(BlockContent::FormContainer(FormContainerContent {
        title_ar: "تواصل معنا".into(),
        title_en: Some("Contact us".into()),
        submit_url: Some("/api/contact".into()),
        method: Some("post".into()),
        success_message_ar: "شكراً لتواصلك معنا".into(),
        success_message_en: Some("Thanks for reaching out".into()),
        ..Default::default()
    }));
    let fields = &mut form.slots[0];
    fields.push(Block::with_content(BlockContent::FormInput(FormInputContent {
        label_ar: "الاسم".into(),
        label_en: Some("Name".into()),
        name: "name".into(),
        required: true,
        ..Default::default()
    })));
    fields.push(Block::with_content(BlockContent::FormInput(FormInputContent {
        label_ar: "البريد الإلكتروني".into(),
        label_en: Some("Email".into()),
        name: "email".into(),
        input_type: Some("email".into()),
        required: true,
        ..Default::default()
    })));
    fields.push(Block::with_content(BlockContent::FormTextarea(FormTextareaContent {
        label_ar: "الرسالة".into(),
        label_en: Some("Message".into()),
        name: "message".into(),
        rows: Some(5),
        ..Default::default()
    })));
    fields.push(Block::with_content(BlockContent::FormButton(FormButtonContent {
        text_ar: "إرسال".into(),
        text_en: Some("Send".into()),
        button_type: Some("submit".into()),
        ..Default::default()
    })));
    reindex(fields);
    BlockTemplate {
        id: "contact-section-full",
        name_ar: "قسم التواصل مع النموذج",
        name_en: "Contact Section with Form",
        description_ar: "نموذج تواصل بالاسم والبريد والرسالة",
        description_en: "Contact form with name, email and message",
        category: TemplateCategory::Cta,
        tags: &["contact", "form"],
        blocks: vec![form],
    }
}
