//! Type resolution between the internal, XForm and XLSForm vocabularies

use super::tables::VocabularyTables;
use super::type_names::{AuthoringType, Resolved, RuntimeType, GROUP, XSD_PREFIX};
use crate::error::{FormError, FormResult, Vocabulary};

/// Resolves question-type identifiers against a set of vocabulary tables
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    tables: &'a VocabularyTables,
}

impl TypeResolver<'static> {
    /// Resolver over the process-wide tables
    pub fn global() -> FormResult<Self> {
        Ok(Self::new(VocabularyTables::global()?))
    }
}

impl<'a> TypeResolver<'a> {
    pub fn new(tables: &'a VocabularyTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a VocabularyTables {
        self.tables
    }

    /// Find the XForm type corresponding to `type_id`.
    ///
    /// Lookup order, first hit wins:
    /// 1. an `xsd:` prefix is dropped
    /// 2. select-one / select-multiple synonyms
    /// 3. names that are already XForm types
    /// 4. registered XLSForm → XForm mappings
    /// 5. catalogued internal types with an XForm bind type
    /// 6. `group`
    ///
    /// Synonyms are consulted before XForm validity, so an ambiguous short name
    /// always resolves through the synonym tables.
    pub fn resolve_to_runtime(&self, type_id: &str) -> FormResult<Resolved<RuntimeType>> {
        let name = type_id.strip_prefix(XSD_PREFIX).unwrap_or(type_id);

        if self.tables.is_select_one(name) {
            return Ok(Resolved::Type(RuntimeType::SelectOne));
        }
        if self.tables.is_select_multiple(name) {
            return Ok(Resolved::Type(RuntimeType::SelectMultiple));
        }
        if let Some(runtime) = RuntimeType::parse(name) {
            return Ok(Resolved::Type(runtime));
        }
        if let Some(runtime) = self.tables.runtime_for(name) {
            return Ok(Resolved::Type(runtime));
        }
        if let Some(Some(runtime)) = self.tables.catalog_bind_type(name) {
            return Ok(Resolved::Type(runtime));
        }
        if name == GROUP {
            return Ok(Resolved::Group);
        }

        Err(FormError::unresolved(type_id, Vocabulary::Runtime))
    }

    /// Find the XLSForm type corresponding to `type_id`.
    ///
    /// XLSForm types (metadata included) and `group` pass through; XForm types
    /// map through the registered table; internal names with their own XLSForm
    /// type (`photo` → `image`) use it; anything else is first resolved to XForm
    /// and then mapped.
    pub fn resolve_to_authoring(&self, type_id: &str) -> FormResult<Resolved<AuthoringType>> {
        if let Some(authoring) = AuthoringType::parse(type_id) {
            return Ok(Resolved::Type(authoring));
        }
        if let Some(authoring) = RuntimeType::parse(type_id).and_then(|r| self.tables.authoring_for(r))
        {
            return Ok(Resolved::Type(authoring));
        }
        if type_id == GROUP {
            return Ok(Resolved::Group);
        }
        if let Some(authoring) = self.tables.authoring_alias(type_id) {
            return Ok(Resolved::Type(authoring));
        }

        match self.resolve_to_runtime(type_id)? {
            Resolved::Type(runtime) => self
                .tables
                .authoring_for(runtime)
                .map(Resolved::Type)
                .ok_or_else(|| FormError::unresolved(type_id, Vocabulary::Authoring)),
            Resolved::Group => Ok(Resolved::Group),
        }
    }
}

/// `TypeResolver::resolve_to_runtime` over the process-wide tables
pub fn resolve_to_runtime(type_id: &str) -> FormResult<Resolved<RuntimeType>> {
    TypeResolver::global()?.resolve_to_runtime(type_id)
}

/// `TypeResolver::resolve_to_authoring` over the process-wide tables
pub fn resolve_to_authoring(type_id: &str) -> FormResult<Resolved<AuthoringType>> {
    TypeResolver::global()?.resolve_to_authoring(type_id)
}
