/// Statement section being rendered, lets dialects adjust literals and identifiers.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    SqlInsertInto,
    SqlInsertIntoValues,
    SqlInsertIntoReturning,
    ListLiteral,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteContext {
    pub fragment: Fragment,
}

impl WriteContext {
    pub fn new(fragment: Fragment) -> Self {
        Self { fragment }
    }

    pub fn switch_fragment(&self, fragment: Fragment) -> WriteContext {
        WriteContext { fragment, ..*self }
    }
}
