use serde::Serialize;

/// The three ordered fragment sequences a node owns.
///
/// Categories are kept apart until the final unit is rendered, where they
/// are laid out includes first, then declarations, then registrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragments {
    pub includes: Vec<String>,
    pub declarations: Vec<String>,
    pub registrations: Vec<String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.declarations.is_empty() && self.registrations.is_empty()
    }

    /// Total number of fragments across all categories.
    pub fn len(&self) -> usize {
        self.includes.len() + self.declarations.len() + self.registrations.len()
    }

    /// Move every fragment of `other` to the end of the matching sequence,
    /// leaving `other` empty.
    pub fn append(&mut self, other: &mut Fragments) {
        self.includes.append(&mut other.includes);
        self.declarations.append(&mut other.declarations);
        self.registrations.append(&mut other.registrations);
    }

    /// Every fragment, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.includes
            .iter()
            .chain(&self.declarations)
            .chain(&self.registrations)
    }
}
