//! Ordered collections and their shape classification.
//!
//! An [`Array`] is only convertible when all of its items share one variant:
//!
//! | Shape                   | Items        | IR                          |
//! |-------------------------|--------------|-----------------------------|
//! | [`ArrayShape::Text`]    | all `Text`   | sequence of scalars         |
//! | [`ArrayShape::List`]    | all `Array`  | sequence of sequences       |
//! | [`ArrayShape::Pairs`]   | all `Pair`   | sequence of records         |
//!
//! Anything else (mixes, code snippets, the empty array) has no shape.
//! Items cannot be mutated after construction, so the shape is computed once
//! and cached.

use crate::value::Value;

/// The three homogeneous compositions an [`Array`] may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayShape {
    /// Every item is a `Text`.
    Text,
    /// Every item is an `Array`.
    List,
    /// Every item is a `Pair`.
    Pairs,
}

impl ArrayShape {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Text(_) => Some(ArrayShape::Text),
            Value::Array(_) => Some(ArrayShape::List),
            Value::Pair(_) => Some(ArrayShape::Pairs),
            Value::Code(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Array {
    items: Vec<Value>,
    shape: Option<ArrayShape>,
}

impl Array {
    pub fn new(items: Vec<Value>) -> Self {
        let shape = classify(&items);
        Self { items, shape }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The homogeneous shape, or `None` for mixed and empty arrays.
    pub fn shape(&self) -> Option<ArrayShape> {
        self.shape
    }

    pub fn is_text_array(&self) -> bool {
        self.shape == Some(ArrayShape::Text)
    }

    pub fn is_array_list(&self) -> bool {
        self.shape == Some(ArrayShape::List)
    }

    pub fn is_pair_array(&self) -> bool {
        self.shape == Some(ArrayShape::Pairs)
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The shape shared by every item; `None` if items disagree or there are none.
fn classify(items: &[Value]) -> Option<ArrayShape> {
    let (first, rest) = items.split_first()?;
    let shape = ArrayShape::of(first)?;
    rest.iter()
        .all(|item| ArrayShape::of(item) == Some(shape))
        .then_some(shape)
}
