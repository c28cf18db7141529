//! Named numeric columns read from a table.

/// One named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the header name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values top to bottom.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the column, returning `(name, values)`.
    pub fn into_parts(self) -> (String, Vec<f64>) {
        (self.name, self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A measurement column whose cells could not all be read as numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedColumn {
    name: String,
    reason: String,
}

impl RejectedColumn {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the header name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every problem found in the column, joined with `"; "`.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Measurement channels in file column order. Columns may differ in length.
///
/// A column with bad cells is kept as a [`RejectedColumn`] in its place so
/// that one broken channel does not hide the others.
#[derive(Debug, Clone, Default)]
pub struct MeasurementTable {
    entries: Vec<Result<Column, RejectedColumn>>,
}

impl MeasurementTable {
    pub fn new(entries: Vec<Result<Column, RejectedColumn>>) -> Self {
        Self { entries }
    }

    /// Returns every channel in file order, readable or not.
    pub fn entries(&self) -> &[Result<Column, RejectedColumn>] {
        &self.entries
    }

    /// Returns the readable channels in file order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    /// Returns the rejected channels in file order.
    pub fn rejected(&self) -> impl Iterator<Item = &RejectedColumn> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }

    /// Returns the readable channel named `name`.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns().find(|c| c.name == name)
    }

    /// Returns all channel names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| match e {
            Ok(c) => c.name.as_str(),
            Err(r) => r.name.as_str(),
        })
    }

    /// Number of channels, rejected ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for MeasurementTable {
    type Item = Result<Column, RejectedColumn>;
    type IntoIter = std::vec::IntoIter<Result<Column, RejectedColumn>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
