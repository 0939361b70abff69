//! Closed type vocabularies: XForm (runtime) data types and XLSForm (authoring) question types

use std::fmt;

/// Structural container tag, valid in every vocabulary
pub const GROUP: &str = "group";

/// Prefix marking an identifier already namespaced as an XML Schema type
pub const XSD_PREFIX: &str = "xsd:";

/// Common behavior of a vocabulary's type tags
pub trait TypeTag: Copy {
    fn as_str(&self) -> &'static str;
}

/// XForm data types (bind `type` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeType {
    String,
    Int,
    Boolean,
    Decimal,
    Date,
    Time,
    DateTime,
    /// `select`, i.e. select-multiple
    SelectMultiple,
    /// `select1`
    SelectOne,
    Geopoint,
    Geotrace,
    Geoshape,
    Binary,
    Barcode,
}

impl RuntimeType {
    pub const ALL: [RuntimeType; 14] = [
        RuntimeType::String,
        RuntimeType::Int,
        RuntimeType::Boolean,
        RuntimeType::Decimal,
        RuntimeType::Date,
        RuntimeType::Time,
        RuntimeType::DateTime,
        RuntimeType::SelectMultiple,
        RuntimeType::SelectOne,
        RuntimeType::Geopoint,
        RuntimeType::Geotrace,
        RuntimeType::Geoshape,
        RuntimeType::Binary,
        RuntimeType::Barcode,
    ];

    /// Parse an exact XForm type name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(RuntimeType::String),
            "int" => Some(RuntimeType::Int),
            "boolean" => Some(RuntimeType::Boolean),
            "decimal" => Some(RuntimeType::Decimal),
            "date" => Some(RuntimeType::Date),
            "time" => Some(RuntimeType::Time),
            "dateTime" => Some(RuntimeType::DateTime),
            "select" => Some(RuntimeType::SelectMultiple),
            "select1" => Some(RuntimeType::SelectOne),
            "geopoint" => Some(RuntimeType::Geopoint),
            "geotrace" => Some(RuntimeType::Geotrace),
            "geoshape" => Some(RuntimeType::Geoshape),
            "binary" => Some(RuntimeType::Binary),
            "barcode" => Some(RuntimeType::Barcode),
            _ => None,
        }
    }
}

impl TypeTag for RuntimeType {
    fn as_str(&self) -> &'static str {
        match self {
            RuntimeType::String => "string",
            RuntimeType::Int => "int",
            RuntimeType::Boolean => "boolean",
            RuntimeType::Decimal => "decimal",
            RuntimeType::Date => "date",
            RuntimeType::Time => "time",
            RuntimeType::DateTime => "dateTime",
            RuntimeType::SelectMultiple => "select",
            RuntimeType::SelectOne => "select1",
            RuntimeType::Geopoint => "geopoint",
            RuntimeType::Geotrace => "geotrace",
            RuntimeType::Geoshape => "geoshape",
            RuntimeType::Binary => "binary",
            RuntimeType::Barcode => "barcode",
        }
    }
}

/// XLSForm question types, metadata types included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthoringType {
    Text,
    Integer,
    Decimal,
    Date,
    Time,
    DateTime,
    SelectMultiple,
    SelectOne,
    Geopoint,
    Geotrace,
    Geoshape,
    Image,
    Audio,
    Video,
    File,
    Barcode,
    Note,
    Calculation,
    Acknowledge,
    // Metadata
    Start,
    End,
    Today,
    DeviceId,
    SubscriberId,
    SimSerial,
    PhoneNumber,
}

impl AuthoringType {
    pub const ALL: [AuthoringType; 26] = [
        AuthoringType::Text,
        AuthoringType::Integer,
        AuthoringType::Decimal,
        AuthoringType::Date,
        AuthoringType::Time,
        AuthoringType::DateTime,
        AuthoringType::SelectMultiple,
        AuthoringType::SelectOne,
        AuthoringType::Geopoint,
        AuthoringType::Geotrace,
        AuthoringType::Geoshape,
        AuthoringType::Image,
        AuthoringType::Audio,
        AuthoringType::Video,
        AuthoringType::File,
        AuthoringType::Barcode,
        AuthoringType::Note,
        AuthoringType::Calculation,
        AuthoringType::Acknowledge,
        AuthoringType::Start,
        AuthoringType::End,
        AuthoringType::Today,
        AuthoringType::DeviceId,
        AuthoringType::SubscriberId,
        AuthoringType::SimSerial,
        AuthoringType::PhoneNumber,
    ];

    /// Parse an exact XLSForm type name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(AuthoringType::Text),
            "integer" => Some(AuthoringType::Integer),
            "decimal" => Some(AuthoringType::Decimal),
            "date" => Some(AuthoringType::Date),
            "time" => Some(AuthoringType::Time),
            "dateTime" => Some(AuthoringType::DateTime),
            "select_multiple" => Some(AuthoringType::SelectMultiple),
            "select_one" => Some(AuthoringType::SelectOne),
            "geopoint" => Some(AuthoringType::Geopoint),
            "geotrace" => Some(AuthoringType::Geotrace),
            "geoshape" => Some(AuthoringType::Geoshape),
            "image" => Some(AuthoringType::Image),
            "audio" => Some(AuthoringType::Audio),
            "video" => Some(AuthoringType::Video),
            "file" => Some(AuthoringType::File),
            "barcode" => Some(AuthoringType::Barcode),
            "note" => Some(AuthoringType::Note),
            "calculation" => Some(AuthoringType::Calculation),
            "acknowledge" => Some(AuthoringType::Acknowledge),
            "start" => Some(AuthoringType::Start),
            "end" => Some(AuthoringType::End),
            "today" => Some(AuthoringType::Today),
            "deviceid" => Some(AuthoringType::DeviceId),
            "subscriberid" => Some(AuthoringType::SubscriberId),
            "simserial" => Some(AuthoringType::SimSerial),
            "phonenumber" => Some(AuthoringType::PhoneNumber),
            _ => None,
        }
    }

    /// Metadata types (http://xlsform.org/#metadata)
    pub fn is_metadata(&self) -> bool {
        matches!(
            self,
            AuthoringType::Start
                | AuthoringType::End
                | AuthoringType::Today
                | AuthoringType::DeviceId
                | AuthoringType::SubscriberId
                | AuthoringType::SimSerial
                | AuthoringType::PhoneNumber
        )
    }

    pub fn is_select(&self) -> bool {
        matches!(self, AuthoringType::SelectOne | AuthoringType::SelectMultiple)
    }
}

impl TypeTag for AuthoringType {
    fn as_str(&self) -> &'static str {
        match self {
            AuthoringType::Text => "text",
            AuthoringType::Integer => "integer",
            AuthoringType::Decimal => "decimal",
            AuthoringType::Date => "date",
            AuthoringType::Time => "time",
            AuthoringType::DateTime => "dateTime",
            AuthoringType::SelectMultiple => "select_multiple",
            AuthoringType::SelectOne => "select_one",
            AuthoringType::Geopoint => "geopoint",
            AuthoringType::Geotrace => "geotrace",
            AuthoringType::Geoshape => "geoshape",
            AuthoringType::Image => "image",
            AuthoringType::Audio => "audio",
            AuthoringType::Video => "video",
            AuthoringType::File => "file",
            AuthoringType::Barcode => "barcode",
            AuthoringType::Note => "note",
            AuthoringType::Calculation => "calculation",
            AuthoringType::Acknowledge => "acknowledge",
            AuthoringType::Start => "start",
            AuthoringType::End => "end",
            AuthoringType::Today => "today",
            AuthoringType::DeviceId => "deviceid",
            AuthoringType::SubscriberId => "subscriberid",
            AuthoringType::SimSerial => "simserial",
            AuthoringType::PhoneNumber => "phonenumber",
        }
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AuthoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a resolution: a typed tag, or the untyped group container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolved<T> {
    Type(T),
    Group,
}

impl<T: TypeTag> Resolved<T> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolved::Type(tag) => tag.as_str(),
            Resolved::Group => GROUP,
        }
    }

    pub fn as_type(&self) -> Option<T> {
        match self {
            Resolved::Type(tag) => Some(*tag),
            Resolved::Group => None,
        }
    }
}

impl<T: TypeTag> fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_names_round_trip() {
        for tag in RuntimeType::ALL {
            assert_eq!(RuntimeType::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_authoring_names_round_trip() {
        for tag in AuthoringType::ALL {
            assert_eq!(AuthoringType::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(RuntimeType::parse("datetime"), None);
        assert_eq!(RuntimeType::parse(" string"), None);
        assert_eq!(AuthoringType::parse("select one"), None);
        assert_eq!(AuthoringType::parse("Text"), None);
    }

    #[test]
    fn test_metadata_types() {
        let metadata: Vec<_> = AuthoringType::ALL
            .iter()
            .filter(|t| t.is_metadata())
            .map(|t| t.as_str())
            .collect();
        assert_eq!(
            metadata,
            vec!["start", "end", "today", "deviceid", "subscriberid", "simserial", "phonenumber"]
        );
    }

    #[test]
    fn test_resolved_display() {
        assert_eq!(Resolved::Type(RuntimeType::SelectOne).to_string(), "select1");
        assert_eq!(Resolved::<AuthoringType>::Group.to_string(), "group");
        assert_eq!(Resolved::<RuntimeType>::Group.as_type(), None);
    }
}
