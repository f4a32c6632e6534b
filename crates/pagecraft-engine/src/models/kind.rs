use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The closed set of block kinds the builder knows how to edit and render.
///
/// Documents may still contain kinds outside this set; those decode to
/// [`crate::models::BlockContent::Unknown`] and render as nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BlockKind {
    // Containers
    #[strum(to_string = "columns", serialize = "row")]
    Columns,
    Grid,
    FormContainer,

    // Text
    Heading,
    RichText,
    HeroBasic,
    CtaStrip,
    Stats,
    FaqAccordion,

    // Media and layout
    Image,
    VideoEmbed,
    Divider,
    Spacer,
    CustomHtml,

    // Form fields
    FormInput,
    FormTextarea,
    FormSelect,
    FormCheckbox,
    FormButton,
}

/// How a kind holds nested blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Leaf kind, never has children.
    None,
    /// A single ordered child list, persisted as `children`.
    Children,
    /// One child list per column, persisted as `columnSlots`.
    ColumnSlots,
}

impl BlockKind {
    pub fn containment(self) -> Containment {
        match self {
            BlockKind::Columns | BlockKind::Grid => Containment::ColumnSlots,
            BlockKind::FormContainer => Containment::Children,
            _ => Containment::None,
        }
    }

    pub fn is_container(self) -> bool {
        self.containment() != Containment::None
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
