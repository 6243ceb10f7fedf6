use std::borrow::Cow;

/// Schema qualified table name, as written after `INSERT INTO`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: Cow<'static, str>,
    pub schema: Cow<'static, str>,
}

impl TableRef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            schema: Cow::Borrowed(""),
        }
    }

    pub fn with_schema(mut self, schema: Option<impl Into<Cow<'static, str>>>) -> Self {
        self.schema = schema.map(Into::into).unwrap_or_default();
        self
    }

    pub fn full_name(&self) -> String {
        let mut result = String::new();
        if !self.schema.is_empty() {
            result.push_str(&self.schema);
            result.push('.');
        }
        result.push_str(&self.name);
        result
    }
}
