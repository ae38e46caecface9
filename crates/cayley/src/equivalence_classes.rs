use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Serialize;

use transalg_world::Action;

use crate::ClassError;

/// The index of a class in [EquivalenceClasses].
pub type ClassIndex = usize;

/// A set of actions that behave identically, represented by its label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceClass<O> {
    label: Action,
    elements: BTreeSet<Action>,
    outcome: O,
}

impl<O> EquivalenceClass<O> {
    /// Creates a class that only contains its label.
    pub fn new(label: Action, outcome: O) -> EquivalenceClass<O> {
        let mut elements = BTreeSet::new();
        elements.insert(label.clone());

        EquivalenceClass {
            label,
            elements,
            outcome,
        }
    }

    pub fn label(&self) -> &Action {
        &self.label
    }

    /// The members of this class in shortlex order, including the label.
    pub fn elements(&self) -> &BTreeSet<Action> {
        &self.elements
    }

    /// The outcome produced by the label.
    pub fn outcome(&self) -> &O {
        &self.outcome
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.elements.contains(action)
    }

    /// The shortlex smallest member.
    pub fn shortest_element(&self) -> &Action {
        self.elements.first().unwrap_or(&self.label)
    }

    /// Returns the same class labelled by another of its members.
    pub(crate) fn with_label(mut self, label: Action) -> EquivalenceClass<O> {
        debug_assert!(self.elements.contains(&label), "The new label must be a member of the class");
        self.elements.insert(label.clone());
        self.label = label;
        self
    }
}

/// A partition of actions into equivalence classes.
///
/// Every action belongs to at most one class, and every label belongs to its
/// own class for as long as the class exists. Classes are kept in the order in
/// which they were created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EquivalenceClass<O>>", into = "Vec<EquivalenceClass<O>>")]
#[serde(bound(serialize = "O: Serialize + Clone", deserialize = "O: Deserialize<'de>"))]
pub struct EquivalenceClasses<O> {
    classes: Vec<EquivalenceClass<O>>,

    /// Maps every label to the index of its class.
    labels: FxHashMap<Action, ClassIndex>,

    /// Maps every member to the index of its class.
    membership: FxHashMap<Action, ClassIndex>,
}

impl<O> Default for EquivalenceClasses<O> {
    fn default() -> Self {
        EquivalenceClasses {
            classes: Vec::new(),
            labels: FxHashMap::default(),
            membership: FxHashMap::default(),
        }
    }
}

impl<O> EquivalenceClasses<O> {
    pub fn new() -> EquivalenceClasses<O> {
        Self::default()
    }

    /// The number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The total number of actions over all classes.
    pub fn num_of_elements(&self) -> usize {
        self.membership.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquivalenceClass<O>> {
        self.classes.iter()
    }

    /// The labels in the order in which their classes were created.
    pub fn labels(&self) -> impl Iterator<Item = &Action> {
        self.classes.iter().map(|class| &class.label)
    }

    pub fn class(&self, label: &Action) -> Option<&EquivalenceClass<O>> {
        self.labels.get(label).map(|index| &self.classes[*index])
    }

    pub fn is_label(&self, action: &Action) -> bool {
        self.labels.contains_key(action)
    }

    /// Returns the label of the class containing the action.
    pub fn find_class(&self, action: &Action) -> Option<&Action> {
        self.membership.get(action).map(|index| &self.classes[*index].label)
    }

    /// Creates a new class containing only its label.
    pub fn create_class(&mut self, label: Action, outcome: O) -> Result<ClassIndex, ClassError> {
        self.insert_class(EquivalenceClass::new(label, outcome))
    }

    /// Adds a class of which none of the elements belong to an existing class.
    pub fn insert_class(&mut self, class: EquivalenceClass<O>) -> Result<ClassIndex, ClassError> {
        if self.labels.contains_key(&class.label) {
            return Err(ClassError::DuplicateLabel(class.label));
        }

        if !class.elements.contains(&class.label) {
            return Err(ClassError::MissingLabel(class.label));
        }

        if let Some(element) = class.elements.iter().find(|element| self.membership.contains_key(*element)) {
            return Err(ClassError::AlreadyMember {
                element: element.clone(),
                label: self.classes[self.membership[element]].label.clone(),
            });
        }

        let index = self.classes.len();
        self.labels.insert(class.label.clone(), index);
        for element in &class.elements {
            self.membership.insert(element.clone(), index);
        }
        self.classes.push(class);

        Ok(index)
    }

    /// Makes the action a member of the class with the given label, moving it
    /// out of its current class when necessary.
    pub fn assign(&mut self, action: Action, label: &Action) -> Result<(), ClassError> {
        let target = *self
            .labels
            .get(label)
            .ok_or_else(|| ClassError::UnknownLabel(label.clone()))?;

        if let Some(&current) = self.membership.get(&action) {
            if current == target {
                return Ok(());
            }

            if self.classes[current].label == action {
                return Err(ClassError::LabelRemoval(action));
            }

            self.classes[current].elements.remove(&action);
        }

        self.classes[target].elements.insert(action.clone());
        self.membership.insert(action, target);
        Ok(())
    }

    /// Removes the action from its class, returns false when it was not a member.
    pub fn detach(&mut self, action: &Action) -> Result<bool, ClassError> {
        if self.labels.contains_key(action) {
            return Err(ClassError::LabelRemoval(action.clone()));
        }

        match self.membership.remove(action) {
            Some(index) => {
                self.classes[index].elements.remove(action);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes all the given actions, or none of them when one is a label.
    pub fn remove_elements(&mut self, actions: &[Action]) -> Result<(), ClassError> {
        if let Some(label) = actions.iter().find(|action| self.labels.contains_key(*action)) {
            return Err(ClassError::LabelRemoval(label.clone()));
        }

        for action in actions {
            self.detach(action)?;
        }

        Ok(())
    }

    /// Moves all members of a class that is not part of this partition into
    /// the class with the given label.
    pub fn absorb(&mut self, class: EquivalenceClass<O>, label: &Action) -> Result<(), ClassError> {
        if !self.labels.contains_key(label) {
            return Err(ClassError::UnknownLabel(label.clone()));
        }

        for element in class.elements {
            if let Some(&current) = self.membership.get(&element) {
                return Err(ClassError::AlreadyMember {
                    element,
                    label: self.classes[current].label.clone(),
                });
            }

            self.assign(element, label)?;
        }

        Ok(())
    }

    pub fn into_classes(self) -> Vec<EquivalenceClass<O>> {
        self.classes
    }
}

impl<O> TryFrom<Vec<EquivalenceClass<O>>> for EquivalenceClasses<O> {
    type Error = ClassError;

    fn try_from(classes: Vec<EquivalenceClass<O>>) -> Result<Self, Self::Error> {
        let mut result = EquivalenceClasses::new();
        for class in classes {
            result.insert_class(class)?;
        }

        Ok(result)
    }
}

impl<O> From<EquivalenceClasses<O>> for Vec<EquivalenceClass<O>> {
    fn from(classes: EquivalenceClasses<O>) -> Self {
        classes.classes
    }
}

impl<O> fmt::Display for EquivalenceClasses<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            writeln!(f, "{}: {{{}}}", class.label, class.elements.iter().format(", "))?;
        }

        Ok(())
    }
}
