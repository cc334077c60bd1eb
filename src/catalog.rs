//! Names the parser is allowed to resolve.
//!
//! The system fields and metadata sub-fields are closed enumerations. A
//! [`FieldCatalog`] decides which of them a particular deployment accepts;
//! [`DefaultCatalog`] accepts all of them.

use serde::{Deserialize, Serialize};

/// Resolves identifiers found in query text.
pub trait FieldCatalog {
    fn lookup_field(&self, name: &str) -> Option<SearchField>;
    fn lookup_metadata_field(&self, name: &str) -> Option<MetadataField>;
}

/// Catalog accepting every [`SearchField`] and [`MetadataField`] by its index name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl FieldCatalog for DefaultCatalog {
    fn lookup_field(&self, name: &str) -> Option<SearchField> {
        SearchField::from_index(name)
    }

    fn lookup_metadata_field(&self, name: &str) -> Option<MetadataField> {
        MetadataField::from_index(name)
    }
}

impl<C: FieldCatalog + ?Sized> FieldCatalog for &C {
    fn lookup_field(&self, name: &str) -> Option<SearchField> {
        (**self).lookup_field(name)
    }

    fn lookup_metadata_field(&self, name: &str) -> Option<MetadataField> {
        (**self).lookup_metadata_field(name)
    }
}

/// System fields a [`Pair`](crate::Pair) can address (`title=cat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Any indexed text of an item.
    All,
    /// Extracted full text of the stored file.
    Fulltext,
    Title,
    Description,
    Filename,
    Fileextension,
    Filetype,
    Filesize,
    Checksum,
    Date,
    Created,
    Modified,
    Time,
    Collection,
    /// Collection URI (`col="http://.../collection/86"`).
    Col,
    License,
    Status,
    Visibility,
    Role,
    Read,
    Grant,
    GrantType,
    GrantFor,
    Hasgrant,
    Creator,
    CreatorId,
    Editor,
    Collaborator,
    Member,
    Email,
    Person,
    PersonId,
    PersonCompletename,
    PersonFamily,
    PersonGiven,
    PersonRole,
    PersonOrg,
    PersonOrgName,
    PersonOrgId,
    PersonOrgCity,
    PersonOrgCountry,
    PersonOrgDescription,
    Family,
    CollectionAuthor,
    CollectionAuthorOrganisation,
    ContPerson,
    ContPersonOrg,
    Prof,
    Index,
    Label,
    Statement,
    Metadatatype,
    Text,
    Number,
    Url,
    Location,
    /// Prefix of technical metadata pairs (`technical[label]=value`).
    Technical,
    /// Prefix of user metadata pairs (`md.statement.field=value`).
    Md,
}

impl SearchField {
    /// The name used for this field in query text.
    pub fn index(self) -> &'static str {
        match self {
            SearchField::All => "all",
            SearchField::Fulltext => "fulltext",
            SearchField::Title => "title",
            SearchField::Description => "description",
            SearchField::Filename => "filename",
            SearchField::Fileextension => "fileextension",
            SearchField::Filetype => "filetype",
            SearchField::Filesize => "filesize",
            SearchField::Checksum => "checksum",
            SearchField::Date => "date",
            SearchField::Created => "created",
            SearchField::Modified => "modified",
            SearchField::Time => "time",
            SearchField::Collection => "collection",
            SearchField::Col => "col",
            SearchField::License => "license",
            SearchField::Status => "status",
            SearchField::Visibility => "visibility",
            SearchField::Role => "role",
            SearchField::Read => "read",
            SearchField::Grant => "grant",
            SearchField::GrantType => "grant_type",
            SearchField::GrantFor => "grant_for",
            SearchField::Hasgrant => "hasgrant",
            SearchField::Creator => "creator",
            SearchField::CreatorId => "creator_id",
            SearchField::Editor => "editor",
            SearchField::Collaborator => "collaborator",
            SearchField::Member => "member",
            SearchField::Email => "email",
            SearchField::Person => "person",
            SearchField::PersonId => "person_id",
            SearchField::PersonCompletename => "person_completename",
            SearchField::PersonFamily => "person_family",
            SearchField::PersonGiven => "person_given",
            SearchField::PersonRole => "person_role",
            SearchField::PersonOrg => "person_org",
            SearchField::PersonOrgName => "person_org_name",
            SearchField::PersonOrgId => "person_org_id",
            SearchField::PersonOrgCity => "person_org_city",
            SearchField::PersonOrgCountry => "person_org_country",
            SearchField::PersonOrgDescription => "person_org_description",
            SearchField::Family => "family",
            SearchField::CollectionAuthor => "collection_author",
            SearchField::CollectionAuthorOrganisation => "collection_author_organisation",
            SearchField::ContPerson => "cont_person",
            SearchField::ContPersonOrg => "cont_person_org",
            SearchField::Prof => "prof",
            SearchField::Index => "index",
            SearchField::Label => "label",
            SearchField::Statement => "statement",
            SearchField::Metadatatype => "metadatatype",
            SearchField::Text => "text",
            SearchField::Number => "number",
            SearchField::Url => "url",
            SearchField::Location => "location",
            SearchField::Technical => "technical",
            SearchField::Md => "md",
        }
    }

    /// Exact, case-sensitive inverse of [`SearchField::index`].
    pub fn from_index(name: &str) -> Option<Self> {
        let field = match name {
            "all" => SearchField::All,
            "fulltext" => SearchField::Fulltext,
            "title" => SearchField::Title,
            "description" => SearchField::Description,
            "filename" => SearchField::Filename,
            "fileextension" => SearchField::Fileextension,
            "filetype" => SearchField::Filetype,
            "filesize" => SearchField::Filesize,
            "checksum" => SearchField::Checksum,
            "date" => SearchField::Date,
            "created" => SearchField::Created,
            "modified" => SearchField::Modified,
            "time" => SearchField::Time,
            "collection" => SearchField::Collection,
            "col" => SearchField::Col,
            "license" => SearchField::License,
            "status" => SearchField::Status,
            "visibility" => SearchField::Visibility,
            "role" => SearchField::Role,
            "read" => SearchField::Read,
            "grant" => SearchField::Grant,
            "grant_type" => SearchField::GrantType,
            "grant_for" => SearchField::GrantFor,
            "hasgrant" => SearchField::Hasgrant,
            "creator" => SearchField::Creator,
            "creator_id" => SearchField::CreatorId,
            "editor" => SearchField::Editor,
            "collaborator" => SearchField::Collaborator,
            "member" => SearchField::Member,
            "email" => SearchField::Email,
            "person" => SearchField::Person,
            "person_id" => SearchField::PersonId,
            "person_completename" => SearchField::PersonCompletename,
            "person_family" => SearchField::PersonFamily,
            "person_given" => SearchField::PersonGiven,
            "person_role" => SearchField::PersonRole,
            "person_org" => SearchField::PersonOrg,
            "person_org_name" => SearchField::PersonOrgName,
            "person_org_id" => SearchField::PersonOrgId,
            "person_org_city" => SearchField::PersonOrgCity,
            "person_org_country" => SearchField::PersonOrgCountry,
            "person_org_description" => SearchField::PersonOrgDescription,
            "family" => SearchField::Family,
            "collection_author" => SearchField::CollectionAuthor,
            "collection_author_organisation" => SearchField::CollectionAuthorOrganisation,
            "cont_person" => SearchField::ContPerson,
            "cont_person_org" => SearchField::ContPersonOrg,
            "prof" => SearchField::Prof,
            "index" => SearchField::Index,
            "label" => SearchField::Label,
            "statement" => SearchField::Statement,
            "metadatatype" => SearchField::Metadatatype,
            "text" => SearchField::Text,
            "number" => SearchField::Number,
            "url" => SearchField::Url,
            "location" => SearchField::Location,
            "technical" => SearchField::Technical,
            "md" => SearchField::Md,
            _ => return None,
        };
        Some(field)
    }
}

/// Sub-field of a user metadata statement (`md.author.familyname=Doe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Text,
    Number,
    Date,
    Time,
    /// Exact (non-tokenized) match on the statement value.
    Exact,
    Url,
    Person,
    Name,
    Title,
    Placename,
    Coordinates,
    Familyname,
    Givenname,
    Completename,
    Organisation,
}

impl MetadataField {
    pub fn index(self) -> &'static str {
        match self {
            MetadataField::Text => "text",
            MetadataField::Number => "number",
            MetadataField::Date => "date",
            MetadataField::Time => "time",
            MetadataField::Exact => "exact",
            MetadataField::Url => "url",
            MetadataField::Person => "person",
            MetadataField::Name => "name",
            MetadataField::Title => "title",
            MetadataField::Placename => "placename",
            MetadataField::Coordinates => "coordinates",
            MetadataField::Familyname => "familyname",
            MetadataField::Givenname => "givenname",
            MetadataField::Completename => "completename",
            MetadataField::Organisation => "organisation",
        }
    }

    pub fn from_index(name: &str) -> Option<Self> {
        let field = match name {
            "text" => MetadataField::Text,
            "number" => MetadataField::Number,
            "date" => MetadataField::Date,
            "time" => MetadataField::Time,
            "exact" => MetadataField::Exact,
            "url" => MetadataField::Url,
            "person" => MetadataField::Person,
            "name" => MetadataField::Name,
            "title" => MetadataField::Title,
            "placename" => MetadataField::Placename,
            "coordinates" => MetadataField::Coordinates,
            "familyname" => MetadataField::Familyname,
            "givenname" => MetadataField::Givenname,
            "completename" => MetadataField::Completename,
            "organisation" => MetadataField::Organisation,
            _ => return None,
        };
        Some(field)
    }
}
