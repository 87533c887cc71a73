//! Campos de actualización parcial
//!
//! Un PUT con payload parcial distingue tres casos por campo: ausente
//! (no tocar), `null` (borrar) y valor (sobrescribir). Los campos deben
//! declararse con `#[serde(default)]` para que la ausencia funcione.

use serde::{Deserialize, Deserializer};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

// Manual para no exigir `T: Default`
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Aplicar sobre una columna nullable
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }

    /// Aplicar sobre una columna obligatoria; `null` se rechaza
    pub fn apply_required(self, current: T, field: &str) -> Result<T, AppError> {
        match self {
            Patch::Absent => Ok(current),
            Patch::Null => Err(AppError::BadRequest(format!("Field '{}' cannot be null", field))),
            Patch::Value(v) => Ok(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}
