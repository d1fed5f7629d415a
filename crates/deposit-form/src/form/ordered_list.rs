/*
 *  Copyright 2025-2026 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Index-keyed list editing for repeatable form fields.
//!
//! Every operation returns a new list and leaves `self` untouched, so a
//! rejected edit can never leave the form half-modified.

use serde::{Deserialize, Serialize};

use crate::error::ListError;

/// One user edit of a repeatable field.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEdit<T> {
    Push(T),
    Replace { index: usize, item: T },
    Remove { index: usize },
    Move { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for OrderedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Append an item at the end.
    pub fn push(&self, item: T) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// Insert an item before `index`; `index == len` appends.
    pub fn insert(&self, index: usize, item: T) -> Result<Self, ListError> {
        if index > self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        let mut items = self.items.clone();
        items.insert(index, item);
        Ok(Self { items })
    }

    /// Replace the item at `index`.
    pub fn replace(&self, index: usize, item: T) -> Result<Self, ListError> {
        self.check(index)?;
        let mut items = self.items.clone();
        items[index] = item;
        Ok(Self { items })
    }

    /// Remove the item at `index`.
    pub fn remove(&self, index: usize) -> Result<Self, ListError> {
        self.check(index)?;
        let mut items = self.items.clone();
        items.remove(index);
        Ok(Self { items })
    }

    /// Take the item at `from` out of the list and reinsert it at `to`.
    ///
    /// Both indices refer to the list as displayed before the move.
    pub fn move_item(&self, from: usize, to: usize) -> Result<Self, ListError> {
        self.check(from)?;
        self.check(to)?;
        let mut items = self.items.clone();
        let item = items.remove(from);
        items.insert(to, item);
        Ok(Self { items })
    }

    /// Apply a [`ListEdit`].
    pub fn apply(&self, edit: ListEdit<T>) -> Result<Self, ListError> {
        match edit {
            ListEdit::Push(item) => Ok(self.push(item)),
            ListEdit::Replace { index, item } => self.replace(index, item),
            ListEdit::Remove { index } => self.remove(index),
            ListEdit::Move { from, to } => self.move_item(from, to),
        }
    }

    fn check(&self, index: usize) -> Result<(), ListError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    fn out_of_bounds(&self, index: usize) -> ListError {
        ListError::IndexOutOfBounds {
            index,
            len: self.items.len(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
