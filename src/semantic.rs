//! Semantic type taxonomy - the language-agnostic node classification.
//!
//! This module is the SINGLE SOURCE OF TRUTH for the 8-bit semantic type
//! encoding. Every consumer (adapter tables, predicates, the searchable set)
//! derives from the constants here; no adapter restates the encoding.
//!
//! Byte layout: `[ss kk tt ll]`
//! - `ss` (bits 6-7): super-kind — DATA_STRUCTURE, COMPUTATION,
//!   CONTROL_EFFECTS, META_EXTERNAL
//! - `kk` (bits 4-5): kind within the super-kind (four each)
//! - `tt` (bits 2-3): variant within the kind (four each, 64 named types)
//! - `ll` (bits 0-1): per-language refinement, only meaningful within the
//!   owning kind; masked off for name lookups

// Super kinds (bits 6-7)
pub const DATA_STRUCTURE: u8 = 0x00;
pub const COMPUTATION: u8 = 0x40;
pub const CONTROL_EFFECTS: u8 = 0x80;
pub const META_EXTERNAL: u8 = 0xC0;

// Kinds within DATA_STRUCTURE
pub const LITERAL: u8 = DATA_STRUCTURE;
pub const NAME: u8 = DATA_STRUCTURE | 0x10;
pub const PATTERN: u8 = DATA_STRUCTURE | 0x20;
pub const TYPE: u8 = DATA_STRUCTURE | 0x30;

// Kinds within COMPUTATION
pub const OPERATOR: u8 = COMPUTATION;
pub const COMPUTATION_NODE: u8 = COMPUTATION | 0x10;
pub const TRANSFORM: u8 = COMPUTATION | 0x20;
pub const DEFINITION: u8 = COMPUTATION | 0x30;

// Kinds within CONTROL_EFFECTS
pub const EXECUTION: u8 = CONTROL_EFFECTS;
pub const FLOW_CONTROL: u8 = CONTROL_EFFECTS | 0x10;
pub const ERROR_HANDLING: u8 = CONTROL_EFFECTS | 0x20;
pub const ORGANIZATION: u8 = CONTROL_EFFECTS | 0x30;

// Kinds within META_EXTERNAL
pub const METADATA: u8 = META_EXTERNAL;
pub const EXTERNAL: u8 = META_EXTERNAL | 0x10;
pub const PARSER_SPECIFIC: u8 = META_EXTERNAL | 0x20;
pub const RESERVED: u8 = META_EXTERNAL | 0x30;

// LITERAL variants
pub const LITERAL_NUMBER: u8 = LITERAL;
pub const LITERAL_STRING: u8 = LITERAL | 0x04;
pub const LITERAL_ATOMIC: u8 = LITERAL | 0x08;
pub const LITERAL_STRUCTURED: u8 = LITERAL | 0x0C;

// NAME variants
pub const NAME_KEYWORD: u8 = NAME;
pub const NAME_IDENTIFIER: u8 = NAME | 0x04;
pub const NAME_QUALIFIED: u8 = NAME | 0x08;
pub const NAME_SCOPED: u8 = NAME | 0x0C;

// PATTERN variants
pub const PATTERN_DESTRUCTURE: u8 = PATTERN;
pub const PATTERN_MATCH: u8 = PATTERN | 0x04;
pub const PATTERN_TEMPLATE: u8 = PATTERN | 0x08;
pub const PATTERN_GUARD: u8 = PATTERN | 0x0C;

// TYPE variants
pub const TYPE_PRIMITIVE: u8 = TYPE;
pub const TYPE_COMPOSITE: u8 = TYPE | 0x04;
pub const TYPE_REFERENCE: u8 = TYPE | 0x08;
pub const TYPE_GENERIC: u8 = TYPE | 0x0C;

// OPERATOR variants
pub const OPERATOR_ARITHMETIC: u8 = OPERATOR;
pub const OPERATOR_LOGICAL: u8 = OPERATOR | 0x04;
pub const OPERATOR_COMPARISON: u8 = OPERATOR | 0x08;
pub const OPERATOR_ASSIGNMENT: u8 = OPERATOR | 0x0C;

// COMPUTATION_NODE variants
pub const COMPUTATION_CALL: u8 = COMPUTATION_NODE;
pub const COMPUTATION_ACCESS: u8 = COMPUTATION_NODE | 0x04;
pub const COMPUTATION_EXPRESSION: u8 = COMPUTATION_NODE | 0x08;
pub const COMPUTATION_LAMBDA: u8 = COMPUTATION_NODE | 0x0C;

// TRANSFORM variants
pub const TRANSFORM_QUERY: u8 = TRANSFORM;
pub const TRANSFORM_ITERATION: u8 = TRANSFORM | 0x04;
pub const TRANSFORM_PROJECTION: u8 = TRANSFORM | 0x08;
pub const TRANSFORM_AGGREGATION: u8 = TRANSFORM | 0x0C;

// DEFINITION variants
pub const DEFINITION_FUNCTION: u8 = DEFINITION;
pub const DEFINITION_VARIABLE: u8 = DEFINITION | 0x04;
pub const DEFINITION_CLASS: u8 = DEFINITION | 0x08;
pub const DEFINITION_MODULE: u8 = DEFINITION | 0x0C;

// EXECUTION variants
pub const EXECUTION_STATEMENT: u8 = EXECUTION;
pub const EXECUTION_DECLARATION: u8 = EXECUTION | 0x04;
pub const EXECUTION_INVOCATION: u8 = EXECUTION | 0x08;
pub const EXECUTION_MUTATION: u8 = EXECUTION | 0x0C;

// FLOW_CONTROL variants
pub const FLOW_CONDITIONAL: u8 = FLOW_CONTROL;
pub const FLOW_LOOP: u8 = FLOW_CONTROL | 0x04;
pub const FLOW_JUMP: u8 = FLOW_CONTROL | 0x08;
pub const FLOW_SYNC: u8 = FLOW_CONTROL | 0x0C;

// ERROR_HANDLING variants
pub const ERROR_TRY: u8 = ERROR_HANDLING;
pub const ERROR_CATCH: u8 = ERROR_HANDLING | 0x04;
pub const ERROR_THROW: u8 = ERROR_HANDLING | 0x08;
pub const ERROR_FINALLY: u8 = ERROR_HANDLING | 0x0C;

// ORGANIZATION variants
pub const ORGANIZATION_BLOCK: u8 = ORGANIZATION;
pub const ORGANIZATION_LIST: u8 = ORGANIZATION | 0x04;
pub const ORGANIZATION_SECTION: u8 = ORGANIZATION | 0x08;
pub const ORGANIZATION_CONTAINER: u8 = ORGANIZATION | 0x0C;

// METADATA variants
pub const METADATA_COMMENT: u8 = METADATA;
pub const METADATA_ANNOTATION: u8 = METADATA | 0x04;
pub const METADATA_DIRECTIVE: u8 = METADATA | 0x08;
pub const METADATA_DEBUG: u8 = METADATA | 0x0C;

// EXTERNAL variants
pub const EXTERNAL_IMPORT: u8 = EXTERNAL;
pub const EXTERNAL_EXPORT: u8 = EXTERNAL | 0x04;
pub const EXTERNAL_FOREIGN: u8 = EXTERNAL | 0x08;
pub const EXTERNAL_EMBED: u8 = EXTERNAL | 0x0C;

// PARSER_SPECIFIC variants
pub const PARSER_PUNCTUATION: u8 = PARSER_SPECIFIC;
pub const PARSER_DELIMITER: u8 = PARSER_SPECIFIC | 0x04;
pub const PARSER_SYNTAX: u8 = PARSER_SPECIFIC | 0x08;
pub const PARSER_CONSTRUCT: u8 = PARSER_SPECIFIC | 0x0C;

// RESERVED variants. PARSE_ERROR is the reserved classification for
// synthesized error nodes, so a caller scanning for it can always detect
// recovered failures.
pub const RESERVED_FUTURE1: u8 = RESERVED;
pub const RESERVED_FUTURE2: u8 = RESERVED | 0x04;
pub const RESERVED_FUTURE3: u8 = RESERVED | 0x08;
pub const PARSE_ERROR: u8 = RESERVED | 0x0C;

/// All 64 assigned base codes, in encoding order.
const ASSIGNED: [(u8, &str); 64] = [
    (LITERAL_NUMBER, "LITERAL_NUMBER"),
    (LITERAL_STRING, "LITERAL_STRING"),
    (LITERAL_ATOMIC, "LITERAL_ATOMIC"),
    (LITERAL_STRUCTURED, "LITERAL_STRUCTURED"),
    (NAME_KEYWORD, "NAME_KEYWORD"),
    (NAME_IDENTIFIER, "NAME_IDENTIFIER"),
    (NAME_QUALIFIED, "NAME_QUALIFIED"),
    (NAME_SCOPED, "NAME_SCOPED"),
    (PATTERN_DESTRUCTURE, "PATTERN_DESTRUCTURE"),
    (PATTERN_MATCH, "PATTERN_MATCH"),
    (PATTERN_TEMPLATE, "PATTERN_TEMPLATE"),
    (PATTERN_GUARD, "PATTERN_GUARD"),
    (TYPE_PRIMITIVE, "TYPE_PRIMITIVE"),
    (TYPE_COMPOSITE, "TYPE_COMPOSITE"),
    (TYPE_REFERENCE, "TYPE_REFERENCE"),
    (TYPE_GENERIC, "TYPE_GENERIC"),
    (OPERATOR_ARITHMETIC, "OPERATOR_ARITHMETIC"),
    (OPERATOR_LOGICAL, "OPERATOR_LOGICAL"),
    (OPERATOR_COMPARISON, "OPERATOR_COMPARISON"),
    (OPERATOR_ASSIGNMENT, "OPERATOR_ASSIGNMENT"),
    (COMPUTATION_CALL, "COMPUTATION_CALL"),
    (COMPUTATION_ACCESS, "COMPUTATION_ACCESS"),
    (COMPUTATION_EXPRESSION, "COMPUTATION_EXPRESSION"),
    (COMPUTATION_LAMBDA, "COMPUTATION_LAMBDA"),
    (TRANSFORM_QUERY, "TRANSFORM_QUERY"),
    (TRANSFORM_ITERATION, "TRANSFORM_ITERATION"),
    (TRANSFORM_PROJECTION, "TRANSFORM_PROJECTION"),
    (TRANSFORM_AGGREGATION, "TRANSFORM_AGGREGATION"),
    (DEFINITION_FUNCTION, "DEFINITION_FUNCTION"),
    (DEFINITION_VARIABLE, "DEFINITION_VARIABLE"),
    (DEFINITION_CLASS, "DEFINITION_CLASS"),
    (DEFINITION_MODULE, "DEFINITION_MODULE"),
    (EXECUTION_STATEMENT, "EXECUTION_STATEMENT"),
    (EXECUTION_DECLARATION, "EXECUTION_DECLARATION"),
    (EXECUTION_INVOCATION, "EXECUTION_INVOCATION"),
    (EXECUTION_MUTATION, "EXECUTION_MUTATION"),
    (FLOW_CONDITIONAL, "FLOW_CONDITIONAL"),
    (FLOW_LOOP, "FLOW_LOOP"),
    (FLOW_JUMP, "FLOW_JUMP"),
    (FLOW_SYNC, "FLOW_SYNC"),
    (ERROR_TRY, "ERROR_TRY"),
    (ERROR_CATCH, "ERROR_CATCH"),
    (ERROR_THROW, "ERROR_THROW"),
    (ERROR_FINALLY, "ERROR_FINALLY"),
    (ORGANIZATION_BLOCK, "ORGANIZATION_BLOCK"),
    (ORGANIZATION_LIST, "ORGANIZATION_LIST"),
    (ORGANIZATION_SECTION, "ORGANIZATION_SECTION"),
    (ORGANIZATION_CONTAINER, "ORGANIZATION_CONTAINER"),
    (METADATA_COMMENT, "METADATA_COMMENT"),
    (METADATA_ANNOTATION, "METADATA_ANNOTATION"),
    (METADATA_DIRECTIVE, "METADATA_DIRECTIVE"),
    (METADATA_DEBUG, "METADATA_DEBUG"),
    (EXTERNAL_IMPORT, "EXTERNAL_IMPORT"),
    (EXTERNAL_EXPORT, "EXTERNAL_EXPORT"),
    (EXTERNAL_FOREIGN, "EXTERNAL_FOREIGN"),
    (EXTERNAL_EMBED, "EXTERNAL_EMBED"),
    (PARSER_PUNCTUATION, "PARSER_PUNCTUATION"),
    (PARSER_DELIMITER, "PARSER_DELIMITER"),
    (PARSER_SYNTAX, "PARSER_SYNTAX"),
    (PARSER_CONSTRUCT, "PARSER_CONSTRUCT"),
    (RESERVED_FUTURE1, "RESERVED_FUTURE1"),
    (RESERVED_FUTURE2, "RESERVED_FUTURE2"),
    (RESERVED_FUTURE3, "RESERVED_FUTURE3"),
    (PARSE_ERROR, "PARSE_ERROR"),
];

/// Extract the super-kind component (bits 6-7, unshifted).
pub const fn super_kind_of(code: u8) -> u8 {
    code & 0xC0
}

/// Extract the full kind value (bits 4-7, unshifted).
pub const fn kind_of(code: u8) -> u8 {
    code & 0xF0
}

/// Extract the variant within the kind, shifted to 0-3.
pub const fn variant_of(code: u8) -> u8 {
    (code & 0x0C) >> 2
}

/// Extract the per-language refinement bits (0-3).
pub const fn refinement_of(code: u8) -> u8 {
    code & 0x03
}

/// Name for a semantic type code. Total over `u8`: refinement bits are
/// masked off (they only refine within the owning kind), and every masked
/// code is one of the 64 assigned base types.
pub fn semantic_type_name(code: u8) -> &'static str {
    let base = code & 0xFC;
    ASSIGNED[(base >> 2) as usize].1
}

/// Reverse lookup: name to base code. `None` for unknown names.
pub fn semantic_type_code(name: &str) -> Option<u8> {
    ASSIGNED
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

pub fn super_kind_name(code: u8) -> &'static str {
    match super_kind_of(code) {
        DATA_STRUCTURE => "DATA_STRUCTURE",
        COMPUTATION => "COMPUTATION",
        CONTROL_EFFECTS => "CONTROL_EFFECTS",
        _ => "META_EXTERNAL",
    }
}

pub fn super_kind_code(name: &str) -> Option<u8> {
    match name {
        "DATA_STRUCTURE" => Some(DATA_STRUCTURE),
        "COMPUTATION" => Some(COMPUTATION),
        "CONTROL_EFFECTS" => Some(CONTROL_EFFECTS),
        "META_EXTERNAL" => Some(META_EXTERNAL),
        _ => None,
    }
}

pub fn kind_name(code: u8) -> &'static str {
    match kind_of(code) {
        LITERAL => "LITERAL",
        NAME => "NAME",
        PATTERN => "PATTERN",
        TYPE => "TYPE",
        OPERATOR => "OPERATOR",
        COMPUTATION_NODE => "COMPUTATION_NODE",
        TRANSFORM => "TRANSFORM",
        DEFINITION => "DEFINITION",
        EXECUTION => "EXECUTION",
        FLOW_CONTROL => "FLOW_CONTROL",
        ERROR_HANDLING => "ERROR_HANDLING",
        ORGANIZATION => "ORGANIZATION",
        METADATA => "METADATA",
        EXTERNAL => "EXTERNAL",
        PARSER_SPECIFIC => "PARSER_SPECIFIC",
        _ => "RESERVED",
    }
}

pub fn kind_code(name: &str) -> Option<u8> {
    match name {
        "LITERAL" => Some(LITERAL),
        "NAME" => Some(NAME),
        "PATTERN" => Some(PATTERN),
        "TYPE" => Some(TYPE),
        "OPERATOR" => Some(OPERATOR),
        "COMPUTATION_NODE" => Some(COMPUTATION_NODE),
        "TRANSFORM" => Some(TRANSFORM),
        "DEFINITION" => Some(DEFINITION),
        "EXECUTION" => Some(EXECUTION),
        "FLOW_CONTROL" => Some(FLOW_CONTROL),
        "ERROR_HANDLING" => Some(ERROR_HANDLING),
        "ORGANIZATION" => Some(ORGANIZATION),
        "METADATA" => Some(METADATA),
        "EXTERNAL" => Some(EXTERNAL),
        "PARSER_SPECIFIC" => Some(PARSER_SPECIFIC),
        "RESERVED" => Some(RESERVED),
        _ => None,
    }
}

/// Whether `code` falls inside the category named by a kind or super-kind.
pub fn is_in(code: u8, category: &str) -> bool {
    if let Some(kind) = kind_code(category) {
        return kind_of(code) == kind;
    }
    if let Some(sk) = super_kind_code(category) {
        return super_kind_of(code) == sk;
    }
    false
}

pub fn is_definition(code: u8) -> bool {
    kind_of(code) == DEFINITION
}

pub fn is_call(code: u8) -> bool {
    let base = code & 0xFC;
    base == COMPUTATION_CALL || base == EXECUTION_INVOCATION
}

pub fn is_control_flow(code: u8) -> bool {
    kind_of(code) == FLOW_CONTROL
}

pub fn is_identifier(code: u8) -> bool {
    let base = code & 0xFC;
    base == NAME_IDENTIFIER || base == NAME_QUALIFIED || base == NAME_SCOPED
}

pub fn is_literal(code: u8) -> bool {
    kind_of(code) == LITERAL
}

pub fn is_operator(code: u8) -> bool {
    kind_of(code) == OPERATOR
}

pub fn is_type(code: u8) -> bool {
    kind_of(code) == TYPE
}

pub fn is_external(code: u8) -> bool {
    kind_of(code) == EXTERNAL
}

pub fn is_metadata(code: u8) -> bool {
    kind_of(code) == METADATA
}

pub fn is_error(code: u8) -> bool {
    (code & 0xFC) == PARSE_ERROR
}

/// Codes the query surface typically filters on: definitions, calls,
/// and module boundary statements.
pub fn searchable_types() -> Vec<u8> {
    vec![
        DEFINITION_FUNCTION,
        DEFINITION_VARIABLE,
        DEFINITION_CLASS,
        DEFINITION_MODULE,
        COMPUTATION_CALL,
        EXECUTION_INVOCATION,
        EXTERNAL_IMPORT,
        EXTERNAL_EXPORT,
    ]
}

/// All definition-kind codes.
pub fn definition_types() -> Vec<u8> {
    vec![
        DEFINITION_FUNCTION,
        DEFINITION_VARIABLE,
        DEFINITION_CLASS,
        DEFINITION_MODULE,
    ]
}

/// All flow-control codes.
pub fn control_flow_types() -> Vec<u8> {
    vec![FLOW_CONDITIONAL, FLOW_LOOP, FLOW_JUMP, FLOW_SYNC]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_assigned_codes() {
        for (code, name) in ASSIGNED {
            assert_eq!(semantic_type_name(code), name);
            assert_eq!(semantic_type_code(name), Some(code));
        }
    }

    #[test]
    fn name_lookup_is_total_over_u8() {
        // Every byte value, including refined codes, resolves to an
        // assigned base name and round-trips to its base code.
        for code in 0..=u8::MAX {
            let name = semantic_type_name(code);
            assert_ne!(name, "");
            assert_eq!(semantic_type_code(name), Some(code & 0xFC));
        }
    }

    #[test]
    fn refinement_bits_do_not_change_classification() {
        for refinement in 0..4u8 {
            let code = DEFINITION_FUNCTION | refinement;
            assert_eq!(semantic_type_name(code), "DEFINITION_FUNCTION");
            assert!(is_definition(code));
            assert_eq!(kind_name(code), "DEFINITION");
            assert_eq!(super_kind_name(code), "COMPUTATION");
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(semantic_type_code("NOT_A_TYPE"), None);
        assert_eq!(kind_code("NOT_A_KIND"), None);
        assert_eq!(super_kind_code(""), None);
    }

    #[test]
    fn component_extraction() {
        assert_eq!(super_kind_of(DEFINITION_FUNCTION), COMPUTATION);
        assert_eq!(kind_of(DEFINITION_CLASS), DEFINITION);
        assert_eq!(variant_of(DEFINITION_CLASS), 2);
        assert_eq!(refinement_of(DEFINITION_FUNCTION | 0x03), 3);
    }

    #[test]
    fn category_membership() {
        assert!(is_in(FLOW_LOOP, "FLOW_CONTROL"));
        assert!(is_in(FLOW_LOOP, "CONTROL_EFFECTS"));
        assert!(!is_in(FLOW_LOOP, "DEFINITION"));
        assert!(!is_in(FLOW_LOOP, "no_such_category"));
    }

    #[test]
    fn predicates() {
        assert!(is_call(COMPUTATION_CALL));
        assert!(is_call(EXECUTION_INVOCATION));
        assert!(!is_call(DEFINITION_FUNCTION));
        assert!(is_error(PARSE_ERROR));
        assert!(!is_error(RESERVED_FUTURE1));
        assert!(is_identifier(NAME_QUALIFIED));
        assert!(!is_identifier(NAME_KEYWORD));
    }

    #[test]
    fn searchable_types_are_searchable_kinds() {
        for code in searchable_types() {
            assert!(is_definition(code) || is_call(code) || is_external(code));
        }
    }
}
