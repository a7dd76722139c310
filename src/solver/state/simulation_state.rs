//! Named fields sharing one grid.

use std::collections::BTreeMap;

use crate::mesh::{Grid1D, GridError};

use super::field::StateField;

/// Name of the self-advecting velocity variable.
pub const VELOCITY_VAR: &str = "ux";

/// Grid plus one exclusively owned [`StateField`] per advected variable.
///
/// The velocity field ([`VELOCITY_VAR`]) is always present.
#[derive(Clone, Debug)]
pub struct SimulationState {
    grid: Grid1D,
    fields: BTreeMap<String, StateField>,
}

impl SimulationState {
    /// Create a state holding only a uniform velocity field.
    pub fn new(grid: Grid1D, velocity: f64) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            VELOCITY_VAR.to_string(),
            StateField::uniform_on(&grid, velocity),
        );
        Self { grid, fields }
    }

    /// Add (or replace) a uniform field.
    pub fn insert_uniform(&mut self, name: impl Into<String>, value: f64) {
        let field = StateField::uniform_on(&self.grid, value);
        self.fields.insert(name.into(), field);
    }

    /// Add (or replace) a field, checking its length against the grid.
    pub fn insert(&mut self, name: impl Into<String>, field: StateField) -> Result<(), GridError> {
        if field.len() != self.grid.len() {
            return Err(GridError::FieldLengthMismatch {
                expected: self.grid.len(),
                actual: field.len(),
            });
        }
        self.fields.insert(name.into(), field);
        Ok(())
    }

    /// The shared grid.
    pub fn grid(&self) -> &Grid1D {
        &self.grid
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&StateField> {
        self.fields.get(name)
    }

    /// Mutable field by name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut StateField> {
        self.fields.get_mut(name)
    }

    /// Shared grid together with one mutable field.
    pub fn grid_and_field_mut(&mut self, name: &str) -> Option<(&Grid1D, &mut StateField)> {
        let field = self.fields.get_mut(name)?;
        Some((&self.grid, field))
    }

    /// The velocity field.
    pub fn velocity(&self) -> &StateField {
        // Inserted by the constructor and never removed
        &self.fields[VELOCITY_VAR]
    }

    /// Variable names, velocity last.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .fields
            .keys()
            .map(String::as_str)
            .filter(|&name| name != VELOCITY_VAR)
            .collect();
        names.push(VELOCITY_VAR);
        names
    }

    /// Split into the read-only velocity field and mutable scalar fields.
    ///
    /// Lets every scalar consume the pre-step velocity before the velocity
    /// itself is advanced.
    pub fn split_velocity_mut(&mut self) -> (&StateField, Vec<(&str, &mut StateField)>) {
        let mut velocity = None;
        let mut scalars = Vec::with_capacity(self.fields.len().saturating_sub(1));
        for (name, field) in self.fields.iter_mut() {
            if name == VELOCITY_VAR {
                velocity = Some(&*field);
            } else {
                scalars.push((name.as_str(), field));
            }
        }
        match velocity {
            Some(v) => (v, scalars),
            None => unreachable!("velocity field is inserted at construction"),
        }
    }

    /// Mutable velocity field.
    pub fn velocity_mut(&mut self) -> &mut StateField {
        match self.fields.get_mut(VELOCITY_VAR) {
            Some(v) => v,
            None => unreachable!("velocity field is inserted at construction"),
        }
    }

    /// Number of fields, velocity included.
    pub fn n_fields(&self) -> usize {
        self.fields.len()
    }
}
