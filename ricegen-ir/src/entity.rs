//! Entity definitions.
//!
//! An entity is one declaration of the wrapped C++ library: a namespace,
//! a class, a method and so on. Entities live in a [`Library`](crate::Library)
//! arena and are referred to by [`EntityId`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to an entity inside a [`Library`](crate::Library).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub(crate) usize);

impl EntityId {
    /// Position of the entity in its library's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of declaration an entity describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Namespace,
    Class,
    Constructor,
    Method,
    Function,
    Enum,
}

impl EntityKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Namespace => "namespace",
            EntityKind::Class => "class",
            EntityKind::Constructor => "constructor",
            EntityKind::Method => "method",
            EntityKind::Function => "function",
            EntityKind::Enum => "enum",
        }
    }

    /// Returns true for kinds that name a scope or a type, which must be
    /// unique within a library.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            EntityKind::Namespace | EntityKind::Class | EntityKind::Enum
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter of a callable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name, if the declaration names it.
    #[serde(default)]
    pub name: Option<String>,
    /// C++ type as written (e.g. `const std::string&`).
    #[serde(rename = "type")]
    pub ty: String,
}

impl Param {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
        }
    }

    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
        }
    }
}

/// One declaration of the wrapped library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: EntityKind,
    /// Unqualified C++ name.
    pub name: String,
    /// Direct superclass, for classes.
    pub superclass: Option<EntityId>,
    /// Return type, for methods and functions. `None` means `void`.
    pub returns: Option<String>,
    pub params: Vec<Param>,
    pub is_static: bool,
    /// Enumerator names, for enums.
    pub values: Vec<String>,
    /// Header that declares this entity, when it differs from the library's.
    pub header: Option<String>,
    /// Excluded from wrapping by the user.
    pub ignored: bool,
    /// Wrapped somewhere else than its declaring scope.
    pub moved: bool,
    /// Publicly accessible.
    pub public: bool,
}

impl Declaration {
    /// Create a public, wrappable declaration of the given kind.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            superclass: None,
            returns: None,
            params: Vec::new(),
            is_static: false,
            values: Vec::new(),
            header: None,
            ignored: false,
            moved: false,
            public: true,
        }
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Namespace, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Class, name)
    }

    /// A constructor. Its name is filled in from the owning class when added
    /// to a library.
    pub fn constructor() -> Self {
        Self::new(EntityKind::Constructor, "")
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Method, name)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Function, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Enum, name)
    }

    pub fn with_superclass(mut self, superclass: EntityId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn moved(mut self) -> Self {
        self.moved = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Return type as written in C++, `void` when absent.
    pub fn return_type(&self) -> &str {
        self.returns.as_deref().unwrap_or("void")
    }

    /// Comma-separated parameter types, as used in signatures and template
    /// argument lists.
    pub fn param_types(&self) -> String {
        self.params
            .iter()
            .map(|p| p.ty.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns true if the declaration should be wrapped at all.
    pub fn is_eligible(&self) -> bool {
        !self.ignored && !self.moved && self.public
    }
}
