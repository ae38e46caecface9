use std::fmt;

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde::Serialize;

use transalg_world::Action;

use crate::EquivalenceClasses;
use crate::TableError;

/// The index of a label in a [CayleyTableActions].
pub type LabelIndex = usize;

/// The composition table of a transformation algebra.
///
/// Rows are the left operand and columns the right operand, the cell at
/// (x, y) is the label of `x ∘ y`: the class of the action that applies `y`
/// first and `x` second.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActionsTableData", into = "ActionsTableData")]
pub struct CayleyTableActions {
    labels: Vec<Action>,
    index: FxHashMap<Action, LabelIndex>,
    cells: Vec<Vec<LabelIndex>>,
}

/// Builds the composition table by looking up the class of every
/// concatenation of two labels.
pub fn generate_cayley_table_actions<O>(classes: &EquivalenceClasses<O>) -> Result<CayleyTableActions, TableError> {
    let labels: Vec<Action> = classes.labels().cloned().collect();

    let mut rows = Vec::with_capacity(labels.len());
    for left in &labels {
        let mut row = Vec::with_capacity(labels.len());
        for right in &labels {
            let composed = Action::compose(left, right);
            let label = classes.find_class(&composed).ok_or_else(|| TableError::Composition {
                left: left.clone(),
                right: right.clone(),
                composed: composed.clone(),
            })?;
            row.push(label.clone());
        }
        rows.push(row);
    }

    let table = CayleyTableActions::from_rows(labels.clone(), labels, rows)?;
    debug!("Generated the Cayley table of {} actions", table.len());
    Ok(table)
}

impl CayleyTableActions {
    /// Creates a table where `rows[i][j]` is the composition of
    /// `row_labels[i]` after `column_labels[j]`.
    ///
    /// Fails when the row and column labels differ as sets, or a cell is not
    /// one of the labels.
    pub fn from_rows(
        row_labels: Vec<Action>,
        column_labels: Vec<Action>,
        rows: Vec<Vec<Action>>,
    ) -> Result<CayleyTableActions, TableError> {
        let mut index = FxHashMap::default();
        for (position, label) in row_labels.iter().enumerate() {
            if index.insert(label.clone(), position).is_some() {
                return Err(TableError::validation("row labels", format!("duplicate label {}", label)));
            }
        }

        let mut columns = Vec::with_capacity(column_labels.len());
        let mut seen = FxHashSet::default();
        for label in &column_labels {
            if !seen.insert(label) {
                return Err(TableError::validation("column labels", format!("duplicate label {}", label)));
            }

            let column = index.get(label).ok_or_else(|| {
                TableError::validation("column labels", format!("{} is not a row label", label))
            })?;
            columns.push(*column);
        }

        if let Some(missing) = row_labels.iter().find(|label| !seen.contains(label)) {
            return Err(TableError::validation(
                "column labels",
                format!("row label {} has no column", missing),
            ));
        }

        if rows.len() != row_labels.len() {
            return Err(TableError::validation(
                "rows",
                format!("expected {} rows, found {}", row_labels.len(), rows.len()),
            ));
        }

        let mut cells = vec![vec![0; row_labels.len()]; row_labels.len()];
        for (row_label, (row, cells_row)) in row_labels.iter().zip(rows.iter().zip(cells.iter_mut())) {
            if row.len() != column_labels.len() {
                return Err(TableError::validation(
                    format!("row {}", row_label),
                    format!("expected {} cells, found {}", column_labels.len(), row.len()),
                ));
            }

            for ((cell, column_label), column) in row.iter().zip(column_labels.iter()).zip(columns.iter()) {
                cells_row[*column] = *index.get(cell).ok_or_else(|| {
                    TableError::validation(
                        format!("cell ({}, {})", row_label, column_label),
                        format!("{} is not a label of the table", cell),
                    )
                })?;
            }
        }

        let table = CayleyTableActions {
            labels: row_labels,
            index,
            cells,
        };
        table.validate()?;
        Ok(table)
    }

    /// Checks that the table is square and closed under composition.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.cells.len() != self.labels.len() || self.index.len() != self.labels.len() {
            return Err(TableError::validation("rows", "the rows do not match the labels"));
        }

        for (label, row) in self.labels.iter().zip(self.cells.iter()) {
            if row.len() != self.labels.len() {
                return Err(TableError::validation(format!("row {}", label), "the table is not square"));
            }

            if let Some(position) = row.iter().position(|cell| *cell >= self.labels.len()) {
                return Err(TableError::validation(
                    format!("cell ({}, {})", label, self.labels[position]),
                    "the composition is not a label of the table",
                ));
            }
        }

        Ok(())
    }

    /// The labels in the order of the rows and columns.
    pub fn labels(&self) -> &[Action] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: LabelIndex) -> &Action {
        &self.labels[index]
    }

    pub fn index_of(&self, label: &Action) -> Option<LabelIndex> {
        self.index.get(label).copied()
    }

    /// Returns the label of `left ∘ right`.
    pub fn compose(&self, left: &Action, right: &Action) -> Result<&Action, TableError> {
        let left = self.index_of(left).ok_or_else(|| TableError::UnknownLabel(left.clone()))?;
        let right = self.index_of(right).ok_or_else(|| TableError::UnknownLabel(right.clone()))?;
        Ok(&self.labels[self.cells[left][right]])
    }

    /// Returns the index of `left ∘ right`.
    #[inline]
    pub fn compose_index(&self, left: LabelIndex, right: LabelIndex) -> LabelIndex {
        self.cells[left][right]
    }

    /// The compositions with the given label as left operand.
    pub fn row(&self, label: &Action) -> Option<Vec<&Action>> {
        let left = self.index_of(label)?;
        Some(self.cells[left].iter().map(|cell| &self.labels[*cell]).collect())
    }

    /// The compositions with the given label as right operand.
    pub fn column(&self, label: &Action) -> Option<Vec<&Action>> {
        let right = self.index_of(label)?;
        Some(self.cells.iter().map(|row| &self.labels[row[right]]).collect())
    }
}

/// The serialized form of [CayleyTableActions], the cells hold labels.
#[derive(Serialize, Deserialize)]
struct ActionsTableData {
    labels: Vec<Action>,
    cells: Vec<Vec<Action>>,
}

impl TryFrom<ActionsTableData> for CayleyTableActions {
    type Error = TableError;

    fn try_from(data: ActionsTableData) -> Result<Self, Self::Error> {
        CayleyTableActions::from_rows(data.labels.clone(), data.labels, data.cells)
    }
}

impl From<CayleyTableActions> for ActionsTableData {
    fn from(table: CayleyTableActions) -> Self {
        let cells = table
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| table.labels[*cell].clone()).collect())
            .collect();

        ActionsTableData {
            labels: table.labels,
            cells,
        }
    }
}

impl fmt::Display for CayleyTableActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(|label| label.len()).max().unwrap_or(1).max(1);

        write!(f, "{:>width$} |", "")?;
        for label in &self.labels {
            write!(f, " {:>width$}", label.as_str())?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat((width + 1) * (self.labels.len() + 1) + 1))?;

        for (label, row) in self.labels.iter().zip(self.cells.iter()) {
            write!(f, "{:>width$} |", label.as_str())?;
            for cell in row {
                write!(f, " {:>width$}", self.labels[*cell].as_str())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for CayleyTableActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CayleyTableActions [{}]", self.labels.iter().format(", "))
    }
}
