//! Serializable library description.
//!
//! Libraries can be described in TOML, nesting entities under their scope:
//!
//! ```toml
//! name = "shapes"
//! headers = ["shapes.h"]
//!
//! [[entities]]
//! kind = "class"
//! name = "Shape"
//!
//! [[entities.children]]
//! kind = "method"
//! name = "getArea"
//! returns = "double"
//!
//! [[entities]]
//! kind = "class"
//! name = "Circle"
//! superclass = "Shape"
//! ```

use serde::Deserialize;

use crate::{
    Declaration, EntityKind, Error, Param, Result,
    validate::{find_name_span, validate_declared_name, validate_identifier},
};

fn default_true() -> bool {
    true
}

/// Top-level library description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibrarySpec {
    /// Library name, used as the extension name.
    pub name: String,
    /// Headers every generated unit includes.
    #[serde(default)]
    pub headers: Vec<String>,
    /// Top-level entities.
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
}

impl LibrarySpec {
    /// Parse a TOML description, using `filename` in diagnostics.
    ///
    /// The library name and every declared name are validated after parsing.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        let spec: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        spec.validate(content, filename)?;
        Ok(spec)
    }

    /// Validate names against the source they were parsed from.
    pub fn validate(&self, src: &str, filename: &str) -> Result<()> {
        // Only used as a suffix of `Init_`, so keywords are fine here
        if let Some(reason) = validate_identifier(&self.name) {
            return Err(Error::invalid_identifier(
                &self.name,
                "library",
                reason,
                src,
                filename,
                find_name_span(src, &self.name),
            ));
        }

        for entity in &self.entities {
            entity.validate(src, filename)?;
        }
        Ok(())
    }
}

/// One entity and the entities nested in it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpec {
    pub kind: EntityKind,
    /// May be omitted for constructors.
    #[serde(default)]
    pub name: String,
    /// Fully qualified name of the direct superclass.
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub moved: bool,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub children: Vec<EntitySpec>,
}

impl EntitySpec {
    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        // constructors may leave their name to the class
        if !(self.kind == EntityKind::Constructor && self.name.is_empty()) {
            validate_name(&self.name, self.kind.as_str(), src, filename)?;
        }
        for value in &self.values {
            validate_name(value, "enum value", src, filename)?;
        }
        for child in &self.children {
            child.validate(src, filename)?;
        }
        Ok(())
    }

    /// The declaration this spec describes, without its superclass link
    /// (resolved by the library once all entities exist).
    pub(crate) fn to_declaration(&self) -> Declaration {
        Declaration {
            kind: self.kind,
            name: self.name.clone(),
            superclass: None,
            returns: self.returns.clone(),
            params: self.params.clone(),
            is_static: self.is_static,
            values: self.values.clone(),
            header: self.header.clone(),
            ignored: self.ignored,
            moved: self.moved,
            public: self.public,
        }
    }
}

fn validate_name(name: &str, context: &str, src: &str, filename: &str) -> Result<()> {
    match validate_declared_name(name) {
        Some(reason) => Err(Error::invalid_identifier(
            name,
            context,
            reason,
            src,
            filename,
            find_name_span(src, name),
        )),
        None => Ok(()),
    }
}
