//! Display list: positioned, formatted lines for each page

use crate::document::{BlockId, BlockKind, TitleField, TitlePage};
use crate::layout::line_break::wrap_lines;
use crate::layout::units::mm_to_pt;
use crate::layout::{Alignment, Pagination, Paginator};
use crate::Point;
use serde::Serialize;

/// Contact block distance above the bottom of the content box
const CONTACT_FROM_BOTTOM_MM: f32 = 40.0;

/// Date distance above the bottom of the content box
const DATE_FROM_BOTTOM_MM: f32 = 20.0;

/// Identifies one rendered line of a block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItemId {
    pub block_id: BlockId,
    pub line_index: u32,
}

impl DisplayItemId {
    pub fn new(block_id: BlockId, line_index: usize) -> Self {
        Self {
            block_id,
            line_index: line_index as u32,
        }
    }
}

/// A display item to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayItem {
    /// One wrapped line of a block; `position` is the line box's top-left
    #[serde(rename_all = "camelCase")]
    TextLine {
        id: DisplayItemId,
        position: Point,
        text: String,
        kind: BlockKind,
        bold: bool,
        alignment: Alignment,
    },
    /// Page number in the top-right corner
    #[serde(rename_all = "camelCase")]
    PageNumber { position: Point, label: String },
    /// One line of the title page
    #[serde(rename_all = "camelCase")]
    TitleText {
        position: Point,
        text: String,
        field: TitleField,
        alignment: Alignment,
    },
}

impl DisplayItem {
    /// Get the ID of this item, if it has one
    pub fn id(&self) -> Option<&DisplayItemId> {
        match self {
            DisplayItem::TextLine { id, .. } => Some(id),
            DisplayItem::PageNumber { .. } | DisplayItem::TitleText { .. } => None,
        }
    }
}

/// Display list for a single page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPage {
    pub page_number: usize,
    pub width_pt: f32,
    pub height_pt: f32,
    pub items: Vec<DisplayItem>,
}

impl DisplayPage {
    /// Rendered text lines, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::TextLine { text, .. } | DisplayItem::TitleText { text, .. } => {
                Some(text.as_str())
            }
            DisplayItem::PageNumber { .. } => None,
        })
    }
}

/// Complete display list for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    pub pages: Vec<DisplayPage>,
}

/// Collapse whitespace runs the way the wrap estimate measures them
fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DisplayList {
    /// Lay out every page of `pagination` with `paginator`'s formatting
    pub fn build(pagination: &Pagination, paginator: &Paginator) -> Self {
        let geometry = paginator.geometry();
        let standards = paginator.standards();
        let font = standards.font();
        let line_height = standards.line_height_pt();

        let margin_left = geometry.margin_left_pt();
        let content_right = margin_left + standards.content_width_pt();

        let mut pages = Vec::with_capacity(pagination.page_count());

        if let Some(title) = &pagination.title_page {
            pages.push(Self::title_page(title, paginator));
        }

        for page in &pagination.pages {
            let mut items = Vec::new();
            let mut y = geometry.margin_top_pt();

            // Screenplays leave the title page and first script page unnumbered
            if page.page_number > pagination.first_content_page_number() {
                let label = format!("{}.", page.page_number);
                let x = geometry.page_width_pt() - geometry.margin_right_pt() - font.text_width(&label);
                items.push(DisplayItem::PageNumber {
                    position: Point::new(x, geometry.margin_top_pt() / 2.0),
                    label,
                });
            }

            for block in &page.blocks {
                let rule = standards.rules_for(block.kind);
                let margins = standards.margins_for(block.kind);

                y += rule.spacing_before_pt;

                let lines = wrap_lines(&block.content, margins.width_pt, font);
                for (line_index, line) in lines.iter().enumerate() {
                    let mut text = normalize(line);
                    if rule.uppercase {
                        text = text.to_uppercase();
                    }

                    let text_width = font.text_width(&text);
                    let x = match rule.alignment {
                        Alignment::Left => margin_left + margins.left_pt,
                        Alignment::Center => {
                            margin_left + margins.left_pt + (margins.width_pt - text_width).max(0.0) / 2.0
                        }
                        Alignment::Right => content_right - margins.right_pt - text_width,
                    };

                    items.push(DisplayItem::TextLine {
                        id: DisplayItemId::new(block.id.clone(), line_index),
                        position: Point::new(x, y),
                        text,
                        kind: block.kind,
                        bold: rule.bold,
                        alignment: rule.alignment,
                    });
                    y += line_height;
                }

                // Blank blocks still hold their line
                if lines.is_empty() {
                    y += line_height;
                }

                y += rule.spacing_after_pt;
            }

            pages.push(DisplayPage {
                page_number: page.page_number,
                width_pt: geometry.page_width_pt(),
                height_pt: geometry.page_height_pt(),
                items,
            });
        }

        DisplayList { pages }
    }

    /// Title centred in the upper half, contact and date near the bottom
    fn title_page(title: &TitlePage, paginator: &Paginator) -> DisplayPage {
        let geometry = paginator.geometry();
        let standards = paginator.standards();
        let font = standards.font();
        let line_height = standards.line_height_pt();

        let top = geometry.margin_top_pt();
        let left = geometry.margin_left_pt();
        let width = standards.content_width_pt();
        let height = standards.content_height_pt();

        let title_spacing = line_height * 3.0;
        let author_spacing = line_height * 2.0;
        let description_spacing = line_height * 4.0;

        let title_y = top + height / 2.0 - (title_spacing + author_spacing) / 2.0;
        let author_y = title_y + title_spacing;
        let placements = [
            (TitleField::Title, title_y, Alignment::Center),
            (TitleField::Author, author_y, Alignment::Center),
            (
                TitleField::Description,
                author_y + author_spacing + description_spacing,
                Alignment::Center,
            ),
            (
                TitleField::Contact,
                top + height - mm_to_pt(CONTACT_FROM_BOTTOM_MM),
                Alignment::Left,
            ),
            (
                TitleField::Date,
                top + height - mm_to_pt(DATE_FROM_BOTTOM_MM),
                Alignment::Right,
            ),
        ];

        let mut items = Vec::new();
        for (field, y, alignment) in placements {
            let Some(text) = title.display_text(field) else {
                continue;
            };
            for (index, line) in wrap_lines(&text, width, font).iter().enumerate() {
                let text = normalize(line);
                let text_width = font.text_width(&text);
                let x = match alignment {
                    Alignment::Left => left,
                    Alignment::Center => left + (width - text_width).max(0.0) / 2.0,
                    Alignment::Right => left + width - text_width,
                };
                items.push(DisplayItem::TitleText {
                    position: Point::new(x, y + index as f32 * line_height),
                    text,
                    field,
                    alignment,
                });
            }
        }

        DisplayPage {
            page_number: 1,
            width_pt: geometry.page_width_pt(),
            height_pt: geometry.page_height_pt(),
            items,
        }
    }

    pub fn page(&self, page_number: usize) -> Option<&DisplayPage> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ScreenplayBlock;

    fn build(blocks: &[ScreenplayBlock]) -> (DisplayList, Pagination, Paginator) {
        let paginator = Paginator::default();
        let pagination = paginator.paginate(blocks);
        (DisplayList::build(&pagination, &paginator), pagination, paginator)
    }

    #[test]
    fn test_display_item_id() {
        let id = DisplayItemId::new(BlockId::from("b5"), 3);
        assert_eq!(id.block_id.as_str(), "b5");
        assert_eq!(id.line_index, 3);
    }

    #[test]
    fn test_formatting_applied() {
        let (list, _, paginator) = build(&[
            ScreenplayBlock::scene_heading("s", "int. garage - night"),
            ScreenplayBlock::character("c", "lena"),
            ScreenplayBlock::dialogue("d", "Keys."),
            ScreenplayBlock::transition("t", "cut to:"),
        ]);
        let page = &list.pages[0];
        let lines: Vec<_> = page.lines().collect();
        assert_eq!(lines, vec!["INT. GARAGE - NIGHT", "LENA", "Keys.", "CUT TO:"]);

        let geometry = paginator.geometry();
        let standards = paginator.standards();
        let right_edge = geometry.margin_left_pt() + standards.content_width_pt();

        match &page.items[3] {
            DisplayItem::TextLine { position, alignment, .. } => {
                assert_eq!(*alignment, Alignment::Right);
                let width = standards.font().text_width("CUT TO:");
                assert!((position.x + width - right_edge).abs() < 1e-3);
            }
            other => panic!("expected text line, got {other:?}"),
        }
        match &page.items[2] {
            DisplayItem::TextLine { position, .. } => {
                let expected = geometry.margin_left_pt() + 72.0;
                assert!((position.x - expected).abs() < 1e-3);
            }
            other => panic!("expected text line, got {other:?}"),
        }
    }

    #[test]
    fn test_vertical_advance_matches_used_height() {
        let blocks = vec![
            ScreenplayBlock::scene_heading("s", "EXT. PIER - DAWN"),
            ScreenplayBlock::action("a", ""),
            ScreenplayBlock::character("c", "OSCAR"),
            ScreenplayBlock::dialogue("d", "Cold."),
        ];
        let (list, pagination, paginator) = build(&blocks);
        let page = &list.pages[0];

        // Dialogue line top = everything above it
        let last_y = match page.items.last() {
            Some(DisplayItem::TextLine { position, .. }) => position.y,
            other => panic!("expected text line, got {other:?}"),
        };
        let dialogue_tail = 12.0 + 12.0; // its line plus spacing after
        let top = paginator.geometry().margin_top_pt();
        assert!((last_y + dialogue_tail - top - pagination.pages[0].used_height_pt).abs() < 1e-3);
    }

    #[test]
    fn test_page_numbers_from_page_two() {
        let blocks: Vec<_> = (0..40)
            .map(|i| ScreenplayBlock::action(format!("a{i}"), "Waves."))
            .collect();
        let (list, pagination, _) = build(&blocks);
        assert_eq!(list.pages.len(), pagination.page_count());
        assert!(list.pages.len() >= 2);

        assert!(list.pages[0]
            .items
            .iter()
            .all(|item| !matches!(item, DisplayItem::PageNumber { .. })));
        assert!(matches!(
            &list.pages[1].items[0],
            DisplayItem::PageNumber { label, .. } if label == "2."
        ));
        assert!(list.page(2).is_some());
        assert!(list.page(99).is_none());
    }

    #[test]
    fn test_title_page_layout() {
        let paginator = Paginator::default();
        let blocks: Vec<_> = (0..40)
            .map(|i| ScreenplayBlock::action(format!("a{i}"), "Waves."))
            .collect();
        let title = TitlePage::new("The Long Night")
            .with_author("Ana Ruiz")
            .with_contact("ana@example.com");
        let pagination = paginator.paginate_with_title(&blocks, &title);
        let list = DisplayList::build(&pagination, &paginator);

        assert_eq!(list.pages.len(), pagination.page_count());
        let cover = &list.pages[0];
        assert_eq!(cover.page_number, 1);
        assert_eq!(
            cover.lines().collect::<Vec<_>>(),
            vec!["THE LONG NIGHT", "by Ana Ruiz", "ana@example.com"]
        );

        // Title centred in the content box, byline three lines below
        let left = paginator.geometry().margin_left_pt();
        let width = paginator.standards().content_width_pt();
        match (&cover.items[0], &cover.items[1]) {
            (
                DisplayItem::TitleText { position: title_at, .. },
                DisplayItem::TitleText { position: author_at, .. },
            ) => {
                let title_width = paginator.standards().font().text_width("THE LONG NIGHT");
                assert!((title_at.x - (left + (width - title_width) / 2.0)).abs() < 1e-3);
                assert!((author_at.y - title_at.y - 36.0).abs() < 1e-3);
            }
            other => panic!("expected title lines, got {other:?}"),
        }

        // First script page is page 2 and carries no number; page 3 does
        assert_eq!(list.pages[1].page_number, 2);
        assert!(list.pages[1]
            .items
            .iter()
            .all(|item| !matches!(item, DisplayItem::PageNumber { .. })));
        assert!(matches!(
            &list.pages[2].items[0],
            DisplayItem::PageNumber { label, .. } if label == "3."
        ));
    }
}
