use crate::models::{Block, BlockId, Containment, Language};

/// One line of a plain-text tree summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub depth: usize,
    /// Slot of the parent container holding this block, if nested
    pub slot: Option<usize>,
    pub id: BlockId,
    pub kind: String,
    pub summary: String,
}

impl OutlineLine {
    pub fn render(&self) -> String {
        let indent = "  ".repeat(self.depth);
        let slot = self
            .slot
            .map(|slot| format!("[{}] ", slot + 1))
            .unwrap_or_default();
        if self.summary.is_empty() {
            format!("{indent}{slot}{}", self.kind)
        } else {
            format!("{indent}{slot}{}: {}", self.kind, self.summary)
        }
    }
}

/// Depth-first summary of `blocks` as shown in `language`.
pub fn outline(blocks: &[Block], language: Language) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    walk(blocks, language, 0, None, &mut lines);
    lines
}

fn walk(
    blocks: &[Block],
    language: Language,
    depth: usize,
    slot: Option<usize>,
    lines: &mut Vec<OutlineLine>,
) {
    for block in blocks {
        lines.push(OutlineLine {
            depth,
            slot,
            id: block.id.clone(),
            kind: block.kind_name().to_string(),
            summary: block.content.summary(language),
        });
        let numbered = block.containment() == Containment::ColumnSlots;
        for (index, children) in block.slots.iter().enumerate() {
            walk(
                children,
                language,
                depth + 1,
                numbered.then_some(index),
                lines,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_tree;

    #[test]
    fn test_outline_of_sample_tree() {
        let text: Vec<String> = outline(&sample_tree(), Language::Ar)
            .iter()
            .map(OutlineLine::render)
            .collect();
        insta::assert_snapshot!(text.join("\n"), @r"
        heading: مرحبا
        columns: 2 columns
          [1] heading: العمود الأول
          [2] heading: العمود الثاني
        form-container
          form-input: الاسم
        ");
    }
}
