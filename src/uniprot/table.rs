//! Tab-separated UniProt search results

use serde::{Deserialize, Serialize};

/// Rows of a UniProt `format=tab` search, keyed by the header line
///
/// # Examples
///
/// ```
/// use ferro_overlap::uniprot::UniprotTable;
///
/// let tsv = "Entry\tEntry name\tOrganism\nP0A742\tMSCL_ECOLI\tEscherichia coli\n";
/// let table = UniprotTable::parse(tsv);
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get(0, "Entry name"), Some("MSCL_ECOLI"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniprotTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl UniprotTable {
    /// Parse tab-separated text whose first non-blank line is the header.
    ///
    /// Blank lines are skipped. Cells missing at the end of a short row read
    /// as `None` from [`UniprotTable::get`].
    pub fn parse(text: &str) -> Self {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let columns = match lines.next() {
            Some(header) => split_row(header),
            None => return Self::default(),
        };
        let rows = lines.map(split_row).collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by header name
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell at `row` under `column`; empty cells read as `None`
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows
            .get(row)?
            .get(idx)
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    /// All non-empty values of one column, in row order
    pub fn column_values(&self, column: &str) -> Vec<&str> {
        (0..self.rows.len())
            .filter_map(|row| self.get(row, column))
            .collect()
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split('\t').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV: &str = "Entry\tEntry name\tOrganism\tOrganism ID\n\
                       P0A742\tMSCL_ECOLI\tEscherichia coli (strain K12)\t83333\n\
                       \n\
                       P44708\tMSCL_HAEIN\tHaemophilus influenzae\t71421\n\
                       Q9XXXX\tSHORT\r\n";

    #[test]
    fn test_parse_header_and_rows() {
        let table = UniprotTable::parse(TSV);
        assert_eq!(
            table.columns,
            vec!["Entry", "Entry name", "Organism", "Organism ID"]
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_get() {
        let table = UniprotTable::parse(TSV);
        assert_eq!(table.get(1, "Entry"), Some("P44708"));
        assert_eq!(table.get(1, "Organism ID"), Some("71421"));
        assert_eq!(table.get(0, "Missing"), None);
        assert_eq!(table.get(99, "Entry"), None);
    }

    #[test]
    fn test_short_row() {
        let table = UniprotTable::parse(TSV);
        assert_eq!(table.get(2, "Entry name"), Some("SHORT"));
        assert_eq!(table.get(2, "Organism"), None);
    }

    #[test]
    fn test_column_values() {
        let table = UniprotTable::parse(TSV);
        assert_eq!(
            table.column_values("Entry"),
            vec!["P0A742", "P44708", "Q9XXXX"]
        );
    }

    #[test]
    fn test_empty_input() {
        let table = UniprotTable::parse("\n\n");
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }
}
