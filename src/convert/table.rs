//! Table geometry: row and column counts computed before a table is emitted.

use crate::dom::role_map::is_table_cell;
use crate::dom::{ArenaDom, ArenaNodeId};

/// One source row and the cells found directly under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub row: ArenaNodeId,
    pub cells: Vec<ArenaNodeId>,
}

/// Shape of a source table.
///
/// Rows are the `tr` elements that belong to this table, in document order;
/// rows of nested tables are skipped. The column count is the largest
/// per-row count of `th` or `td` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGeometry {
    pub rows: Vec<RowCells>,
    pub row_count: usize,
    pub column_count: usize,
}

impl TableGeometry {
    /// Scan `table` and compute its geometry.
    pub fn resolve(dom: &ArenaDom, table: ArenaNodeId) -> Self {
        let rows: Vec<RowCells> = table_rows(dom, table)
            .into_iter()
            .map(|row| RowCells {
                row,
                cells: dom
                    .children(row)
                    .filter(|&c| dom.element_name(c).is_some_and(is_table_cell))
                    .collect(),
            })
            .collect();

        let column_count = rows
            .iter()
            .map(|r| {
                let headers = r
                    .cells
                    .iter()
                    .filter(|&&c| dom.element_name(c) == Some("th"))
                    .count();
                headers.max(r.cells.len() - headers)
            })
            .max()
            .unwrap_or(0);

        log::trace!("table geometry: {} rows, {} columns", rows.len(), column_count);
        Self {
            row_count: rows.len(),
            rows,
            column_count,
        }
    }

    /// A table without columns produces no output.
    pub fn is_empty(&self) -> bool {
        self.column_count == 0
    }
}

/// `tr` descendants of `table`, not descending into nested tables.
fn table_rows(dom: &ArenaDom, table: ArenaNodeId) -> Vec<ArenaNodeId> {
    let mut rows = Vec::new();
    let mut stack: Vec<ArenaNodeId> = dom.children(table).collect();
    stack.reverse();
    while let Some(id) = stack.pop() {
        match dom.element_name(id) {
            Some("tr") => rows.push(id),
            Some("table") | None => continue,
            Some(_) => {}
        }
        let mut children: Vec<ArenaNodeId> = dom.children(id).collect();
        children.reverse();
        stack.extend(children);
    }
    rows
}

/// Parse a `colspan` / `rowspan` value. Surrounding whitespace is ignored.
pub fn parse_span(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn geometry(html: &str) -> (ArenaDom, TableGeometry) {
        let dom = parse_html(html);
        let table = dom.find_by_tag("table").unwrap();
        let geometry = TableGeometry::resolve(&dom, table);
        (dom, geometry)
    }

    #[test]
    fn test_uneven_rows() {
        let (_, g) = geometry(
            "<table><tr><td>1</td><td>2</td><td>3</td></tr><tr><td>4</td><td>5</td></tr></table>",
        );
        assert_eq!(g.row_count, 2);
        assert_eq!(g.column_count, 3);
        assert_eq!(g.rows[0].cells.len(), 3);
        assert_eq!(g.rows[1].cells.len(), 2);
    }

    #[test]
    fn test_header_and_data_counted_separately() {
        let (_, g) = geometry("<table><tr><th>a</th><td>b</td><td>c</td></tr></table>");
        assert_eq!(g.column_count, 2);
        assert_eq!(g.rows[0].cells.len(), 3);
    }

    #[test]
    fn test_only_cells_are_collected() {
        let (dom, g) = geometry("<table><tr>\n  <td>a</td>\n  <th>b</th>\n</tr></table>");
        assert_eq!(g.rows[0].cells.len(), 2);
        assert!(dom.children(g.rows[0].row).any(|c| dom.is_text(c)));
        assert!(g.rows[0].cells.iter().all(|&c| dom.is_element(c)));
    }

    #[test]
    fn test_row_groups_are_flattened() {
        let (dom, g) = geometry(
            "<table><thead><tr><th>h</th></tr></thead><tbody><tr><td>b</td></tr></tbody>\
             <tfoot><tr><td>f</td></tr></tfoot></table>",
        );
        assert_eq!(g.row_count, 3);
        let texts: Vec<String> = g.rows.iter().map(|r| dom.inner_text(r.row)).collect();
        assert_eq!(texts, ["h", "b", "f"]);
    }

    #[test]
    fn test_nested_table_rows_excluded() {
        let (_, g) = geometry(
            "<table><tr><td><table><tr><td>x</td><td>y</td><td>z</td><td>w</td></tr></table></td></tr></table>",
        );
        assert_eq!(g.row_count, 1);
        assert_eq!(g.column_count, 1);
    }

    #[test]
    fn test_empty_table() {
        let (_, g) = geometry("<table></table>");
        assert!(g.is_empty());
        assert_eq!(g.row_count, 0);
    }

    #[test]
    fn test_parse_span() {
        assert_eq!(parse_span("2"), Some(2));
        assert_eq!(parse_span(" 3 "), Some(3));
        assert_eq!(parse_span("-1"), Some(-1));
        assert_eq!(parse_span("two"), None);
        assert_eq!(parse_span(""), None);
    }
}
