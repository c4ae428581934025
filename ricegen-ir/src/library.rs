//! In-memory declaration hierarchy.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;

use crate::{
    Declaration, EntityId, EntityKind, Error, Hierarchy, Result,
    spec::{EntitySpec, LibrarySpec},
    validate::validate_declared_name,
};

#[derive(Debug, Clone)]
struct Entry {
    decl: Declaration,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    qualified: String,
}

/// An arena of declarations forming one wrapped library.
///
/// # Example
///
/// ```
/// use ricegen_ir::{Declaration, Hierarchy, Library};
///
/// let mut lib = Library::new("shapes");
/// let geo = lib.add(lib.root(), Declaration::namespace("geo")).unwrap();
/// let shape = lib.add(geo, Declaration::class("Shape")).unwrap();
/// let circle = lib
///     .add(geo, Declaration::class("Circle").with_superclass(shape))
///     .unwrap();
///
/// assert_eq!(lib.qualified_name(circle), "geo::Circle");
/// assert_eq!(lib.superclass(circle), Some(shape));
/// ```
#[derive(Debug, Clone)]
pub struct Library {
    entries: Vec<Entry>,
    headers: Vec<String>,
    /// Qualified name -> first entity declared with it
    index: IndexMap<String, EntityId>,
}

impl Library {
    /// Create an empty library whose root namespace carries the library name.
    pub fn new(name: impl Into<String>) -> Self {
        let root = Entry {
            decl: Declaration::namespace(name),
            parent: None,
            children: Vec::new(),
            qualified: String::new(),
        };
        Self {
            entries: vec![root],
            headers: Vec::new(),
            index: IndexMap::new(),
        }
    }

    /// Library name (the root namespace's name).
    pub fn library_name(&self) -> &str {
        &self.entries[0].decl.name
    }

    /// Add a header every generated unit includes.
    pub fn add_header(&mut self, header: impl Into<String>) {
        self.headers.push(header.into());
    }

    /// Number of entities, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Find an entity by its fully qualified name.
    pub fn lookup(&self, qualified: &str) -> Option<EntityId> {
        self.index.get(qualified).copied()
    }

    /// Add a declaration under `parent` and return its id.
    ///
    /// Constructors without a name take the name of their class.
    ///
    /// # Errors
    ///
    /// Fails if `parent` or the declared superclass is not part of this
    /// library, if the superclass is not a class, if a namespace, class or
    /// enum reuses a qualified name, or if a name is not a C++ identifier.
    /// Only constructors may be added without a name.
    pub fn add(&mut self, parent: EntityId, mut decl: Declaration) -> Result<EntityId> {
        self.check(parent)?;

        if decl.name.is_empty() {
            if decl.kind == EntityKind::Constructor {
                decl.name = self.entries[parent.0].decl.name.clone();
            } else {
                return Err(Error::validation(format!(
                    "{} declared in '{}' has no name",
                    decl.kind,
                    self.display_name(parent)
                )));
            }
        }

        let names = std::iter::once((decl.kind.as_str(), &decl.name))
            .chain(decl.values.iter().map(|value| ("enum value", value)));
        for (context, name) in names {
            if let Some(reason) = validate_declared_name(name) {
                return Err(Error::validation(format!(
                    "invalid {context} name '{name}' in '{}': {reason}",
                    self.display_name(parent)
                )));
            }
        }

        let qualified = match self.entries[parent.0].parent {
            None => decl.name.clone(),
            Some(_) => format!("{}::{}", self.entries[parent.0].qualified, decl.name),
        };

        if let Some(superclass) = decl.superclass {
            self.check_superclass(&qualified, superclass)?;
        }

        if decl.kind.is_type()
            && self
                .index
                .get(&qualified)
                .is_some_and(|&existing| self.entries[existing.0].decl.kind.is_type())
        {
            return Err(Box::new(Error::DuplicateName {
                kind: decl.kind,
                name: qualified,
            }));
        }

        let id = EntityId(self.entries.len());
        self.index.entry(qualified.clone()).or_insert(id);
        self.entries.push(Entry {
            decl,
            parent: Some(parent),
            children: Vec::new(),
            qualified,
        });
        self.entries[parent.0].children.push(id);

        Ok(id)
    }

    /// Link `class` to its direct superclass, which must be a class.
    pub fn set_superclass(&mut self, class: EntityId, superclass: EntityId) -> Result<()> {
        self.check(class)?;
        self.check_superclass(&self.entries[class.0].qualified, superclass)?;
        self.entries[class.0].decl.superclass = Some(superclass);
        Ok(())
    }

    /// Build a library from its serializable description.
    ///
    /// Superclasses are resolved by qualified name once every entity has been
    /// added, so a class may name a superclass declared after it.
    pub fn from_spec(spec: &LibrarySpec) -> Result<Self> {
        let mut lib = Library::new(spec.name.clone());
        for header in &spec.headers {
            lib.add_header(header.clone());
        }

        let mut pending = Vec::new();
        let root = lib.root();
        for entity in &spec.entities {
            lib.add_spec(root, entity, &mut pending)?;
        }

        for (class, superclass) in pending {
            let target = lib.lookup(&superclass).ok_or_else(|| {
                Box::new(Error::UnknownSuperclass {
                    class: lib.qualified_name(class).to_string(),
                    superclass: superclass.clone(),
                })
            })?;
            lib.set_superclass(class, target)?;
        }

        Ok(lib)
    }

    /// Parse a TOML library description, using `filename` in diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let spec = LibrarySpec::parse(content, filename)?;
        Self::from_spec(&spec)
    }

    /// Read and parse a TOML library description from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    fn add_spec(
        &mut self,
        parent: EntityId,
        spec: &EntitySpec,
        pending: &mut Vec<(EntityId, String)>,
    ) -> Result<()> {
        let id = self.add(parent, spec.to_declaration())?;
        if let Some(superclass) = &spec.superclass {
            pending.push((id, superclass.clone()));
        }
        for child in &spec.children {
            self.add_spec(id, child, pending)?;
        }
        Ok(())
    }

    fn check(&self, id: EntityId) -> Result<()> {
        if id.0 < self.entries.len() {
            Ok(())
        } else {
            Err(Box::new(Error::UnknownEntity { id }))
        }
    }

    fn check_superclass(&self, class: &str, superclass: EntityId) -> Result<()> {
        self.check(superclass)?;
        let target = &self.entries[superclass.0];
        if target.decl.kind == EntityKind::Class {
            Ok(())
        } else {
            Err(Box::new(Error::InvalidSuperclass {
                class: class.to_string(),
                superclass: self.display_name(superclass).to_string(),
                kind: target.decl.kind,
            }))
        }
    }

    fn display_name(&self, id: EntityId) -> &str {
        let entry = &self.entries[id.0];
        if entry.parent.is_none() {
            &entry.decl.name
        } else {
            &entry.qualified
        }
    }
}

impl FromStr for Library {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "library.toml")
    }
}

impl Hierarchy for Library {
    fn root(&self) -> EntityId {
        EntityId(0)
    }

    fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entries[id.0].parent
    }

    fn children(&self, id: EntityId) -> &[EntityId] {
        &self.entries[id.0].children
    }

    fn declaration(&self, id: EntityId) -> &Declaration {
        &self.entries[id.0].decl
    }

    fn qualified_name(&self, id: EntityId) -> &str {
        &self.entries[id.0].qualified
    }

    fn headers(&self) -> &[String] {
        &self.headers
    }
}
