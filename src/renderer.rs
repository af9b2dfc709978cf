//! Document rendering.
//!
//! Turns one row group into a finished PDF: fixed title line, one
//! `"label: value"` line per column, pagination on line-count or vertical
//! overflow, and an optional logo drawn top-right on the first page.
//!
//! Grouped rendering and the legacy single-row mode are one code path;
//! a group of one row simply skips the per-row subtitle.

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::logo::LogoAsset;
use crate::planner::RowGroup;
use crate::table::Table;
use crate::writer::DocBuilder;

/// Fixed page geometry, in PDF units.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Left margin for text.
    pub margin: f32,
    /// Baseline of the title line on the first page.
    pub title_y: f32,
    /// Baseline of the first content line on page one.
    pub body_start_y: f32,
    /// Baseline reset for continuation pages.
    pub continuation_y: f32,
    /// Lowest baseline before a page break.
    pub bottom_margin: f32,
    /// Vertical advance per line.
    pub line_height: f32,
    /// Extra gap after each row's lines.
    pub row_gap: f32,
    /// Title font size.
    pub title_size: f32,
    /// Body font size.
    pub font_size: f32,
    /// Maximum rendered logo width.
    pub logo_max_width: f32,
    /// Margin between the logo and the top-right page corner.
    pub logo_margin: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 600.0,
            page_height: 800.0,
            margin: 50.0,
            title_y: 760.0,
            body_start_y: 730.0,
            continuation_y: 760.0,
            bottom_margin: 50.0,
            line_height: 18.0,
            row_gap: 9.0,
            title_size: 16.0,
            font_size: 12.0,
            logo_max_width: 120.0,
            logo_margin: 50.0,
        }
    }
}

/// Renders row groups into standalone PDF documents.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    layout: PageLayout,
    lines_per_page: usize,
}

impl DocumentRenderer {
    /// Create a renderer from a coerced configuration.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            layout: PageLayout::default(),
            lines_per_page: config.coerced().lines_per_page as usize,
        }
    }

    /// Create a renderer with explicit layout, for callers that tune
    /// geometry.
    pub fn with_layout(layout: PageLayout, lines_per_page: usize) -> Self {
        Self {
            layout,
            lines_per_page,
        }
    }

    /// Render one row group into PDF bytes.
    ///
    /// A failing logo embed is logged and the document is rendered without
    /// a logo; it never aborts generation.
    pub fn render(&self, table: &Table, group: &RowGroup, logo: Option<&LogoAsset>) -> Result<Vec<u8>> {
        let layout = &self.layout;
        let mut builder = DocBuilder::new();

        // The embedded handle belongs to this document only.
        let embedded = logo.and_then(|asset| match builder.embed_image(asset) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("Could not embed logo, rendering without it: {}", e);
                None
            },
        });

        builder.add_page(layout.page_width, layout.page_height);

        if let Some(img) = &embedded {
            let iw = img.width as f32;
            let ih = img.height as f32;
            let scale = (layout.logo_max_width / iw).min(1.0);
            let w = iw * scale;
            let h = ih * scale;
            builder.draw_image(
                img,
                layout.page_width - layout.logo_margin - w,
                layout.page_height - layout.logo_margin - h,
                w,
                h,
            );
        }

        builder.text(layout.margin, layout.title_y, layout.title_size, "Datos del Excel:");

        let mut y = layout.body_start_y;
        let mut lines_on_page = 0usize;
        let with_subtitles = group.len() > 1;

        for row in group.rows() {
            if with_subtitles {
                self.break_page_if_needed(&mut builder, &mut y, &mut lines_on_page);
                builder.text(layout.margin, y, layout.font_size, &format!("Fila {}", row));
                y -= layout.line_height;
                lines_on_page += 1;
            }

            for col in 0..table.column_span(row) {
                self.break_page_if_needed(&mut builder, &mut y, &mut lines_on_page);
                let line = format!("{}: {}", table.label(col), table.value(row, col));
                builder.text(layout.margin, y, layout.font_size, &line);
                y -= layout.line_height;
                lines_on_page += 1;
            }

            // Gap between rows; overflow is handled by the next line's check,
            // so a trailing gap never produces a blank page.
            y -= layout.row_gap;
        }

        builder.finish()
    }

    /// Start a new page when the line budget is spent or the cursor fell
    /// below the bottom margin. Checked before every drawn line.
    fn break_page_if_needed(&self, builder: &mut DocBuilder, y: &mut f32, lines_on_page: &mut usize) {
        if *lines_on_page >= self.lines_per_page || *y < self.layout.bottom_margin {
            builder.add_page(self.layout.page_width, self.layout.page_height);
            *y = self.layout.continuation_y;
            *lines_on_page = 0;
        }
    }
}

/// Derive the output filename for one document.
///
/// Single-row documents are `{first_cell or "row{r}"}_{r}.pdf`; multi-row
/// documents are `{first_cell_of_start or "rows{start}"}_{start}_to_{end}.pdf`.
pub fn document_filename(table: &Table, group: &RowGroup) -> String {
    if group.len() == 1 {
        let row = group.start_row;
        let base = match table.first_cell(row) {
            Some(cell) => sanitize_filename(cell),
            None => format!("row{}", row),
        };
        format!("{}_{}.pdf", base, row)
    } else {
        let base = match table.first_cell(group.start_row) {
            Some(cell) => sanitize_filename(cell),
            None => format!("rows{}", group.start_row),
        };
        format!("{}_{}_to_{}.pdf", base, group.start_row, group.end_row)
    }
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_row_groups;

    fn table_with_rows(rows: usize, cols: usize) -> Table {
        let mut data = vec![(0..cols).map(|c| format!("H{}", c)).collect::<Vec<_>>()];
        for r in 1..=rows {
            data.push((0..cols).map(|c| format!("v{}_{}", r, c)).collect());
        }
        Table::from_rows(data)
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("José/García"), "Jos__Garc_a");
        assert_eq!(sanitize_filename("safe-name_1.txt"), "safe-name_1.txt");
        assert_eq!(sanitize_filename("a b\tc"), "a_b_c");
    }

    #[test]
    fn test_single_row_filename() {
        let table = Table::from_rows(vec![
            vec!["Name".to_string()],
            vec!["Ana".to_string()],
        ]);
        let group = RowGroup { start_row: 1, end_row: 1 };
        assert_eq!(document_filename(&table, &group), "Ana_1.pdf");
    }

    #[test]
    fn test_single_row_filename_fallback() {
        let table = Table::from_rows(vec![
            vec!["Name".to_string()],
            vec!["".to_string()],
        ]);
        let group = RowGroup { start_row: 1, end_row: 1 };
        assert_eq!(document_filename(&table, &group), "row1_1.pdf");
    }

    #[test]
    fn test_multi_row_filename() {
        let table = table_with_rows(6, 2);
        let group = RowGroup { start_row: 3, end_row: 5 };
        assert_eq!(document_filename(&table, &group), "v3_0_3_to_5.pdf");
    }

    #[test]
    fn test_render_produces_valid_pdf() {
        let table = table_with_rows(2, 3);
        let renderer = DocumentRenderer::new(&GenerationConfig::default());
        let groups = plan_row_groups(table.data_row_count(), 1);
        let bytes = renderer.render(&table, &groups[0], None).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
