use crate::{Value, encode::Encode, error::EncodeError};

/// Bound parameters, in placeholder order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Arguments {
    pub(crate) values: Vec<Value>,
}

impl Arguments {
    /// Encode and append a value.
    pub fn add<T>(&mut self, value: T) -> Result<(), EncodeError>
    where
        T: Encode,
    {
        self.values.push(value.encode()?);
        Ok(())
    }

    /// Append an already encoded value.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl Extend<Value> for Arguments {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}
