use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use rustc_hash::FxHashMap;
use rustc_hash::FxHasher;
use serde::Deserialize;
use serde::Serialize;

use transalg_world::Action;

use crate::TableError;

/// The behaviour of an action relative to the labels of a [CayleyTableStates].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature<O> {
    /// The outcome of the action itself.
    pub outcome: O,

    /// The outcome of every label applied after the action.
    pub row: Vec<O>,

    /// The outcome of the action applied after every label.
    pub column: Vec<O>,
}

/// The outcomes of composing every pair of labels.
///
/// The row is the action applied first, the column the action applied second,
/// so the cell at (r, c) holds the outcome of `c ∘ r`. The table is always
/// square over its labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StatesTableData<O>", into = "StatesTableData<O>")]
#[serde(bound(serialize = "O: Serialize + Clone", deserialize = "O: Deserialize<'de> + Hash"))]
pub struct CayleyTableStates<O> {
    labels: Vec<Action>,
    index: FxHashMap<Action, usize>,

    /// The outcome of every label on its own.
    outcomes: Vec<O>,
    cells: Vec<Vec<O>>,

    /// The hash of the outcome and row of every label, and the labels per hash.
    fingerprints: Vec<u64>,
    by_fingerprint: FxHashMap<u64, Vec<usize>>,
}

impl<O> Default for CayleyTableStates<O> {
    fn default() -> Self {
        CayleyTableStates {
            labels: Vec::new(),
            index: FxHashMap::default(),
            outcomes: Vec::new(),
            cells: Vec::new(),
            fingerprints: Vec::new(),
            by_fingerprint: FxHashMap::default(),
        }
    }
}

/// Extends the fingerprint of a row by one more outcome.
fn extend_fingerprint<O: Hash>(fingerprint: u64, outcome: &O) -> u64 {
    let mut hasher = FxHasher::default();
    fingerprint.hash(&mut hasher);
    outcome.hash(&mut hasher);
    hasher.finish()
}

fn fingerprint<O: Hash>(outcome: &O, row: &[O]) -> u64 {
    row.iter()
        .fold(extend_fingerprint(0, outcome), |fingerprint, outcome| extend_fingerprint(fingerprint, outcome))
}

fn group_fingerprints(fingerprints: &[u64]) -> FxHashMap<u64, Vec<usize>> {
    let mut result: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
    for (index, fingerprint) in fingerprints.iter().enumerate() {
        result.entry(*fingerprint).or_default().push(index);
    }

    result
}

impl<O> CayleyTableStates<O> {
    pub fn new() -> CayleyTableStates<O> {
        Self::default()
    }

    pub fn labels(&self) -> &[Action] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &Action) -> bool {
        self.index.contains_key(label)
    }

    pub fn index_of(&self, label: &Action) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// The outcome of the label on its own.
    pub fn label_outcome(&self, label: &Action) -> Option<&O> {
        self.index_of(label).map(|index| &self.outcomes[index])
    }

    /// The outcome of applying `first` and then `second`.
    pub fn outcome(&self, first: &Action, second: &Action) -> Option<&O> {
        let row = self.index_of(first)?;
        let column = self.index_of(second)?;
        Some(&self.cells[row][column])
    }

    /// The outcomes of the labels applied after the given label.
    pub fn row(&self, label: &Action) -> Option<&[O]> {
        self.index_of(label).map(|index| self.cells[index].as_slice())
    }

    /// The outcomes of the given label applied after every label.
    pub fn column(&self, label: &Action) -> Option<Vec<&O>> {
        let column = self.index_of(label)?;
        Some(self.cells.iter().map(|row| &row[column]).collect())
    }
}

impl<O: Clone + Eq + Hash> CayleyTableStates<O> {
    /// Returns the labels whose outcome, row and column equal the signature.
    ///
    /// Only the labels with the same fingerprint of outcome and row are
    /// compared, so a lookup is linear in the number of labels.
    pub fn matching_labels(&self, signature: &Signature<O>) -> Vec<Action> {
        debug_assert_eq!(signature.row.len(), self.len(), "Signature computed for another label set");
        debug_assert_eq!(signature.column.len(), self.len(), "Signature computed for another label set");

        let key = fingerprint(&signature.outcome, &signature.row);
        self.by_fingerprint
            .get(&key)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&index| {
                self.outcomes[index] == signature.outcome
                    && self.cells[index] == signature.row
                    && self
                        .cells
                        .iter()
                        .zip(signature.column.iter())
                        .all(|(row, outcome)| row[index] == *outcome)
            })
            .map(|index| self.labels[index].clone())
            .collect()
    }

    /// Adds a row and column for a new label, where `diagonal` is the outcome
    /// of the label applied twice.
    pub fn push_label(&mut self, label: Action, signature: Signature<O>, diagonal: O) -> Result<(), TableError> {
        if self.contains(&label) {
            return Err(TableError::validation(
                format!("label {}", label),
                "the label already has a row and column",
            ));
        }

        if signature.row.len() != self.len() || signature.column.len() != self.len() {
            return Err(TableError::validation(
                format!("label {}", label),
                format!("the signature does not cover the {} labels of the table", self.len()),
            ));
        }

        for ((row, fingerprint), outcome) in self
            .cells
            .iter_mut()
            .zip(self.fingerprints.iter_mut())
            .zip(signature.column)
        {
            *fingerprint = extend_fingerprint(*fingerprint, &outcome);
            row.push(outcome);
        }

        let mut row = signature.row;
        row.push(diagonal);
        self.fingerprints.push(fingerprint(&signature.outcome, &row));
        self.cells.push(row);
        self.outcomes.push(signature.outcome);

        self.index.insert(label.clone(), self.labels.len());
        self.labels.push(label);

        // Every row gained a column, so all fingerprints changed.
        self.by_fingerprint = group_fingerprints(&self.fingerprints);
        Ok(())
    }

    /// Renames the labels in the mapping, other labels are kept.
    pub fn relabel(self, mapping: &FxHashMap<Action, Action>) -> Result<CayleyTableStates<O>, TableError> {
        let labels = self
            .labels
            .into_iter()
            .map(|label| mapping.get(&label).cloned().unwrap_or(label))
            .collect();

        CayleyTableStates::try_from(StatesTableData {
            labels,
            outcomes: self.outcomes,
            cells: self.cells,
        })
    }
}

/// The serialized form of [CayleyTableStates].
#[derive(Serialize, Deserialize)]
struct StatesTableData<O> {
    labels: Vec<Action>,
    outcomes: Vec<O>,
    cells: Vec<Vec<O>>,
}

impl<O: Hash> TryFrom<StatesTableData<O>> for CayleyTableStates<O> {
    type Error = TableError;

    fn try_from(data: StatesTableData<O>) -> Result<Self, Self::Error> {
        let size = data.labels.len();

        let mut index = FxHashMap::default();
        for (position, label) in data.labels.iter().enumerate() {
            if index.insert(label.clone(), position).is_some() {
                return Err(TableError::validation(format!("label {}", label), "duplicate label"));
            }
        }

        if data.outcomes.len() != size || data.cells.len() != size {
            return Err(TableError::validation("rows", format!("expected {} rows", size)));
        }

        if let Some(position) = data.cells.iter().position(|row| row.len() != size) {
            return Err(TableError::validation(
                format!("row {}", data.labels[position]),
                format!("expected {} columns", size),
            ));
        }

        let fingerprints: Vec<u64> = data
            .outcomes
            .iter()
            .zip(data.cells.iter())
            .map(|(outcome, row)| fingerprint(outcome, row))
            .collect();

        Ok(CayleyTableStates {
            labels: data.labels,
            index,
            outcomes: data.outcomes,
            cells: data.cells,
            by_fingerprint: group_fingerprints(&fingerprints),
            fingerprints,
        })
    }
}

impl<O> From<CayleyTableStates<O>> for StatesTableData<O> {
    fn from(table: CayleyTableStates<O>) -> Self {
        StatesTableData {
            labels: table.labels,
            outcomes: table.outcomes,
            cells: table.cells,
        }
    }
}

impl<O: fmt::Debug> fmt::Display for CayleyTableStates<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, row) in self.labels.iter().zip(self.cells.iter()) {
            write!(f, "{}:", label)?;
            for (column, outcome) in self.labels.iter().zip(row.iter()) {
                write!(f, " {}={:?}", column, outcome)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
