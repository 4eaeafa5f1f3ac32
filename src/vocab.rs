//! Internal (LD model) vocabulary.
//!
//! Type, predicate, and property tags used by the resource graph. Tags are
//! opaque strings as far as the engine is concerned; the mapping profile
//! decides which wire terms they correspond to. The constants here are the
//! ones the built-in mapper units rely on.

/// Resource type tags.
pub mod types {
    /// A material embodiment of a work.
    pub const INSTANCE: &str = "INSTANCE";
    /// The conceptual essence of a resource.
    pub const WORK: &str = "WORK";
    /// Title of a work or instance.
    pub const TITLE: &str = "TITLE";
    /// Parallel title (title in another language or script).
    pub const PARALLEL_TITLE: &str = "PARALLEL_TITLE";
    /// Variant title.
    pub const VARIANT_TITLE: &str = "VARIANT_TITLE";
    /// Person agent.
    pub const PERSON: &str = "PERSON";
    /// Organization agent.
    pub const ORGANIZATION: &str = "ORGANIZATION";
    /// Family agent.
    pub const FAMILY: &str = "FAMILY";
    /// Meeting agent.
    pub const MEETING: &str = "MEETING";
    /// Jurisdiction agent.
    pub const JURISDICTION: &str = "JURISDICTION";
    /// Subject concept.
    pub const CONCEPT: &str = "CONCEPT";
    /// Topical term.
    pub const TOPIC: &str = "TOPIC";
    /// Geographic name.
    pub const PLACE: &str = "PLACE";
    /// Genre/form term.
    pub const FORM: &str = "FORM";
    /// Chronological term.
    pub const TEMPORAL: &str = "TEMPORAL";
    /// Generic identifier.
    pub const IDENTIFIER: &str = "IDENTIFIER";
    /// Library of Congress control number.
    pub const ID_LCCN: &str = "ID_LCCN";
    /// ISBN.
    pub const ID_ISBN: &str = "ID_ISBN";
    /// Publication, production, distribution or manufacture event.
    pub const PROVIDER_EVENT: &str = "PROVIDER_EVENT";
}

/// Edge predicate tags.
pub mod predicates {
    /// Resource → title.
    pub const TITLE: &str = "TITLE";
    /// Work → instance (stored as an incoming edge on the instance).
    pub const INSTANTIATES: &str = "INSTANTIATES";
    /// Work → primary contributor.
    pub const CREATOR: &str = "CREATOR";
    /// Work → other contributor.
    pub const CONTRIBUTOR: &str = "CONTRIBUTOR";
    /// Work → subject concept.
    pub const SUBJECT: &str = "SUBJECT";
    /// Concept → primary focus of a complex subject.
    pub const FOCUS: &str = "FOCUS";
    /// Concept → subdivision of a complex subject.
    pub const SUB_FOCUS: &str = "SUB_FOCUS";
    /// Resource → identifier.
    pub const MAP: &str = "MAP";
    /// Instance → publication event.
    pub const PE_PUBLICATION: &str = "PE_PUBLICATION";

    // Contributor roles
    /// Author role.
    pub const AUTHOR: &str = "AUTHOR";
    /// Editor role.
    pub const EDITOR: &str = "EDITOR";
    /// Illustrator role.
    pub const ILLUSTRATOR: &str = "ILLUSTRATOR";
    /// Translator role.
    pub const TRANSLATOR: &str = "TRANSLATOR";
    /// Composer role.
    pub const COMPOSER: &str = "COMPOSER";
    /// Photographer role.
    pub const PHOTOGRAPHER: &str = "PHOTOGRAPHER";
    /// Narrator role.
    pub const NARRATOR: &str = "NARRATOR";
    /// Author of introduction role.
    pub const AUTHOR_OF_INTRODUCTION: &str = "AUTHOR_OF_INTRODUCTION";
}

/// Property document keys.
pub mod properties {
    /// Display label carried in the document.
    pub const LABEL: &str = "LABEL";
    /// Name or value of an agent, term, or identifier.
    pub const NAME: &str = "NAME";
    /// Preferred-form marker.
    pub const PREFERRED: &str = "PREFERRED";
    /// Main title text.
    pub const MAIN_TITLE: &str = "MAIN_TITLE";
    /// Subtitle text.
    pub const SUBTITLE: &str = "SUBTITLE";
    /// Part name.
    pub const PART_NAME: &str = "PART_NAME";
    /// Part number.
    pub const PART_NUMBER: &str = "PART_NUMBER";
    /// Count of non-sorting leading characters.
    pub const NON_SORT_NUM: &str = "NON_SORT_NUM";
    /// Variant title type.
    pub const VARIANT_TYPE: &str = "VARIANT_TYPE";
    /// Generic date.
    pub const DATE: &str = "DATE";
    /// Date of origin.
    pub const DATE_START: &str = "DATE_START";
    /// Transcribed provider place.
    pub const SIMPLE_PLACE: &str = "SIMPLE_PLACE";
    /// Structured provider date.
    pub const PROVIDER_DATE: &str = "PROVIDER_DATE";
    /// Physical dimensions.
    pub const DIMENSIONS: &str = "DIMENSIONS";
    /// Edition statement.
    pub const EDITION_STATEMENT: &str = "EDITION_STATEMENT";
    /// Statement of responsibility.
    pub const RESPONSIBILITY_STATEMENT: &str = "RESPONSIBILITY_STATEMENT";
    /// Copyright date.
    pub const COPYRIGHT_DATE: &str = "COPYRIGHT_DATE";
    /// Language link.
    pub const LANGUAGE: &str = "LANGUAGE";
    /// Identifier qualifier.
    pub const QUALIFIER: &str = "QUALIFIER";
    /// Identifier status link.
    pub const STATUS: &str = "STATUS";
    /// Topical subdivision of a complex subject.
    pub const GENERAL_SUBDIVISION: &str = "GENERAL_SUBDIVISION";
    /// Geographic subdivision of a complex subject.
    pub const GEOGRAPHIC_SUBDIVISION: &str = "GEOGRAPHIC_SUBDIVISION";
    /// Form subdivision of a complex subject.
    pub const FORM_SUBDIVISION: &str = "FORM_SUBDIVISION";
    /// Chronological subdivision of a complex subject.
    pub const CHRONOLOGICAL_SUBDIVISION: &str = "CHRONOLOGICAL_SUBDIVISION";
}
