//! Fluent construction of MetaEd parse trees.
//!
//! The builders consume trees produced by an external parser. `TreeBuilder`
//! assembles the same shapes programmatically, one source line per call, so
//! callers can drive the builders without a grammar. It mirrors the textual
//! layout of the language:
//!
//! ```text
//! Begin Namespace EdFi core
//! Domain Entity Student
//!     documentation "A person enrolled in a school."
//!     string StudentUniqueId
//!         documentation "Identifier."
//!         is part of identity
//!         max length 32
//! End Namespace
//! ```
//!
//! Dotted names (`Namespace.Name`) produce the namespace-qualifier child of a
//! property name, extendee, base name or item. Text that starts with `<` is
//! passed through unchanged, which is how a recovering parser marks missing
//! tokens; [`TreeBuilder::mark_exception`] and
//! [`TreeBuilder::mark_last_exception`] flag productions the parser could not
//! match.

use super::production::{Production, TokenKind};
use super::tree::{ParseElement, ParseNode, Token};
use crate::base::Position;

const INDENT: usize = 4;

/// Builds a [`ParseNode`] tree rooted at [`Production::MetaEd`].
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: ParseNode,
    open: Vec<ParseNode>,
    line: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root: ParseNode::new(Production::MetaEd, Position::new(1, 0)),
            open: Vec::new(),
            line: 0,
        }
    }

    /// Close every open production and return the root.
    pub fn build(mut self) -> ParseNode {
        while !self.open.is_empty() {
            self.close();
        }
        self.root
    }

    // =========================================================================
    // NAMESPACES
    // =========================================================================

    /// `Begin Namespace <name> core` or `Begin Namespace <name> <EXTENSION>`.
    pub fn begin_namespace(mut self, name: &str, project_extension: Option<&str>) -> Self {
        let position = self.next_line();
        self.open_node(Production::Namespace, position);
        let name_position = self.keyword("Begin Namespace", position);
        self.push(id_node(Production::NamespaceName, name, name_position));

        let type_position = after(name_position, name);
        let mut namespace_type = ParseNode::new(Production::NamespaceType, type_position);
        match project_extension {
            Some(extension) => {
                namespace_type.push_token(Token::new(TokenKind::Id, extension, type_position))
            }
            None => namespace_type.push_token(Token::new(TokenKind::Core, "core", type_position)),
        }
        self.push(namespace_type);
        self
    }

    pub fn end_namespace(mut self) -> Self {
        self.close_to(Production::Namespace, "End Namespace");
        self
    }

    // =========================================================================
    // TOP LEVEL ENTITIES
    // =========================================================================

    pub fn start_abstract_entity(self, name: &str) -> Self {
        self.start_entity(
            Production::AbstractEntity,
            "Abstract Entity",
            Production::AbstractEntityName,
            name,
        )
    }

    pub fn start_association(self, name: &str) -> Self {
        self.start_entity(Production::Association, "Association", Production::AssociationName, name)
    }

    pub fn start_choice(self, name: &str) -> Self {
        self.start_entity(Production::Choice, "Choice", Production::ChoiceName, name)
    }

    pub fn start_common(self, name: &str) -> Self {
        self.start_entity(Production::Common, "Common", Production::CommonName, name)
    }

    pub fn start_descriptor(self, name: &str) -> Self {
        self.start_entity(Production::Descriptor, "Descriptor", Production::DescriptorName, name)
    }

    pub fn start_domain(self, name: &str) -> Self {
        self.start_entity(Production::Domain, "Domain", Production::DomainName, name)
    }

    pub fn start_domain_entity(self, name: &str) -> Self {
        self.start_entity(Production::DomainEntity, "Domain Entity", Production::EntityName, name)
    }

    pub fn start_enumeration(self, name: &str) -> Self {
        self.start_entity(Production::Enumeration, "Enumeration", Production::EnumerationName, name)
    }

    pub fn start_inline_common(self, name: &str) -> Self {
        self.start_entity(
            Production::InlineCommon,
            "Inline Common",
            Production::InlineCommonName,
            name,
        )
    }

    pub fn start_interchange(self, name: &str) -> Self {
        self.start_entity(Production::Interchange, "Interchange", Production::InterchangeName, name)
    }

    pub fn start_shared_decimal(self, name: &str) -> Self {
        self.start_entity(
            Production::SharedDecimal,
            "Shared Decimal",
            Production::SharedDecimalName,
            name,
        )
    }

    pub fn start_shared_integer(self, name: &str) -> Self {
        self.start_entity(
            Production::SharedInteger,
            "Shared Integer",
            Production::SharedIntegerName,
            name,
        )
    }

    pub fn start_shared_short(self, name: &str) -> Self {
        self.start_entity(
            Production::SharedShort,
            "Shared Short",
            Production::SharedShortName,
            name,
        )
    }

    pub fn start_shared_string(self, name: &str) -> Self {
        self.start_entity(
            Production::SharedString,
            "Shared String",
            Production::SharedStringName,
            name,
        )
    }

    pub fn start_association_subclass(self, name: &str, base: &str) -> Self {
        self.start_subclass(
            Production::AssociationSubclass,
            "Association",
            Production::AssociationName,
            name,
            base,
        )
    }

    pub fn start_common_subclass(self, name: &str, base: &str) -> Self {
        self.start_subclass(
            Production::CommonSubclass,
            "Common",
            Production::CommonName,
            name,
            base,
        )
    }

    pub fn start_domain_entity_subclass(self, name: &str, base: &str) -> Self {
        self.start_subclass(
            Production::DomainEntitySubclass,
            "Domain Entity",
            Production::EntityName,
            name,
            base,
        )
    }

    pub fn start_association_extension(self, extendee: &str) -> Self {
        self.start_extension(Production::AssociationExtension, "Association", extendee)
    }

    pub fn start_common_extension(self, extendee: &str) -> Self {
        self.start_extension(Production::CommonExtension, "Common", extendee)
    }

    pub fn start_domain_entity_extension(self, extendee: &str) -> Self {
        self.start_extension(Production::DomainEntityExtension, "Domain Entity", extendee)
    }

    pub fn start_interchange_extension(self, extendee: &str) -> Self {
        self.start_extension(Production::InterchangeExtension, "Interchange", extendee)
    }

    /// `Subdomain <name> of <parent>`.
    pub fn start_subdomain(mut self, name: &str, parent: &str) -> Self {
        self =
            self.start_entity(Production::Subdomain, "Subdomain", Production::SubdomainName, name);
        let position = self.current_line_after(name);
        let parent_position = self.keyword("of", position);
        self.push(id_node(Production::ParentDomainName, parent, parent_position));
        self
    }

    /// Close the innermost open top level entity.
    pub fn end_entity(mut self) -> Self {
        self.close_to(Production::TopLevelEntity, "");
        self
    }

    fn start_entity(
        mut self,
        production: Production,
        keyword: &str,
        name_production: Production,
        name: &str,
    ) -> Self {
        let position = self.next_line();
        self.open_node(Production::TopLevelEntity, position);
        self.open_node(production, position);
        let name_position = self.keyword(keyword, position);
        self.push(id_node(name_production, name, name_position));
        self
    }

    fn start_subclass(
        mut self,
        production: Production,
        keyword: &str,
        name_production: Production,
        name: &str,
        base: &str,
    ) -> Self {
        self = self.start_entity(production, keyword, name_production, name);
        let position = self.current_line_after(name);
        let base_position = self.keyword("based on", position);
        self.push(qualified_node(
            Production::BaseName,
            Production::BaseNamespace,
            Production::LocalBaseName,
            base,
            base_position,
        ));
        self
    }

    fn start_extension(mut self, production: Production, keyword: &str, extendee: &str) -> Self {
        let position = self.next_line();
        self.open_node(Production::TopLevelEntity, position);
        self.open_node(production, position);
        let extendee_position = self.keyword(keyword, position);
        self.push(qualified_node(
            Production::ExtendeeName,
            Production::ExtendeeNamespace,
            Production::LocalExtendeeName,
            extendee,
            extendee_position,
        ));
        self.keyword("additions", after(extendee_position, extendee));
        self
    }

    // =========================================================================
    // DOCUMENTATION, IDS, FLAGS
    // =========================================================================

    /// Documentation for whatever is open: a property, an enumeration item,
    /// a map type, or the entity itself.
    pub fn with_documentation(mut self, documentation: &str) -> Self {
        let position = self.next_line();
        let production = match self.top_production() {
            Some(Production::WithMapType) => Production::MapTypeDocumentation,
            Some(Production::EnumerationItem) => Production::EnumerationItemDocumentation,
            Some(production) if is_property_production(production) => {
                Production::PropertyDocumentation
            }
            _ => Production::Documentation,
        };
        let node = text_node(production, "documentation", documentation, position);
        if production == Production::PropertyDocumentation {
            self.push_component(node);
        } else {
            self.push(node);
        }
        self
    }

    /// `documentation inherited` on the open property.
    pub fn with_inherited_documentation(mut self) -> Self {
        let position = self.next_line();
        let mut node = ParseNode::new(Production::PropertyDocumentation, position);
        node.push_token(Token::new(TokenKind::Keyword, "documentation", position));
        node.push_token(Token::new(
            TokenKind::Inherited,
            "inherited",
            after(position, "documentation"),
        ));
        self.push_component(node);
        self
    }

    pub fn with_extended_documentation(mut self, documentation: &str) -> Self {
        let position = self.next_line();
        self.push(text_node(
            Production::ExtendedDocumentation,
            "extended documentation",
            documentation,
            position,
        ));
        self
    }

    pub fn with_use_case_documentation(mut self, documentation: &str) -> Self {
        let position = self.next_line();
        self.push(text_node(
            Production::UseCaseDocumentation,
            "use case documentation",
            documentation,
            position,
        ));
        self
    }

    pub fn with_footer_documentation(mut self, documentation: &str) -> Self {
        let position = self.next_line();
        self.push(text_node(
            Production::FooterDocumentation,
            "footer documentation",
            documentation,
            position,
        ));
        self
    }

    /// `deprecated "<reason>"` on the open property or entity.
    pub fn with_deprecated(mut self, reason: &str) -> Self {
        let position = self.next_line();
        if self.top_production().is_some_and(is_property_production) {
            self.push_component(text_node(
                Production::PropertyDeprecated,
                "deprecated",
                reason,
                position,
            ));
        } else {
            self.push(text_node(Production::Deprecated, "deprecated", reason, position));
        }
        self
    }

    /// `[<id>]` on whatever is open.
    pub fn with_metaed_id(mut self, id: &str) -> Self {
        let position = self.current_line_after("");
        let mut node = ParseNode::new(Production::MetaEdId, position);
        node.push_token(Token::new(TokenKind::MetaEdId, format!("[{id}]"), position));
        self.push(node);
        self
    }

    /// `allow primary key updates`
    pub fn with_cascade_update(mut self) -> Self {
        let position = self.next_line();
        let mut cascade = ParseNode::new(Production::CascadeUpdate, position);
        cascade.push_token(Token::new(TokenKind::Keyword, "allow primary key updates", position));
        let mut configuration = ParseNode::new(Production::EntityConfiguration, position);
        configuration.push_node(cascade);
        self.push(configuration);
        self
    }

    pub fn with_subdomain_position(mut self, position_value: u32) -> Self {
        let position = self.next_line();
        let value_position = self.keyword("position", position);
        let mut node = ParseNode::new(Production::SubdomainPosition, value_position);
        node.push_token(Token::new(
            TokenKind::UnsignedInt,
            position_value.to_string(),
            value_position,
        ));
        self.push(node);
        self
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    /// Open a property of the given kind (one of [`Production::PROPERTY_KINDS`]).
    ///
    /// For shared properties `name` is the referenced shared type; use
    /// [`TreeBuilder::with_shared_property_name`] for the optional `named`
    /// clause.
    pub fn start_property(mut self, kind: Production, name: &str) -> Self {
        let position = self.next_line();
        self.open_node(Production::Property, position);
        self.open_node(kind, position);
        let name_position = self.keyword(property_keyword(kind), position);
        self.push_property_name(kind, name, name_position);
        self
    }

    /// `common extension <name>`: a common property overriding a common
    /// extension.
    pub fn start_common_extension_override(mut self, name: &str) -> Self {
        let position = self.next_line();
        self.open_node(Production::Property, position);
        self.open_node(Production::CommonProperty, position);
        let mut marker = ParseNode::new(Production::CommonExtensionOverride, position);
        marker.push_token(Token::new(TokenKind::Keyword, "common extension", position));
        self.push(marker);
        self.push_property_name(
            Production::CommonProperty,
            name,
            after(position, "common extension"),
        );
        self
    }

    /// `domain entity <name>` as one of the two defining entities of an
    /// association.
    pub fn start_defining_domain_entity(mut self, name: &str) -> Self {
        let position = self.next_line();
        self.open_node(Production::DefiningDomainEntity, position);
        self.top()
            .push_token(Token::new(TokenKind::DomainEntityKeyword, "domain entity", position));
        self.push_property_name(
            Production::DomainEntityProperty,
            name,
            after(position, "domain entity"),
        );
        self
    }

    /// Close the innermost open property or defining domain entity.
    pub fn end_property(mut self) -> Self {
        let target = self
            .open
            .iter()
            .rev()
            .map(|node| node.production)
            .find(|production| {
                matches!(production, Production::Property | Production::DefiningDomainEntity)
            });
        if let Some(target) = target {
            self.close_to(target, "");
        }
        self
    }

    /// Open, document and close a property in one call.
    pub fn with_property(self, kind: Production, name: &str, documentation: &str) -> Self {
        self.start_property(kind, name)
            .with_documentation(documentation)
            .with_required()
            .end_property()
    }

    /// `named <name>` on an open shared property.
    pub fn with_shared_property_name(mut self, name: &str) -> Self {
        let position = self.current_line_after("");
        let name_position = self.keyword("named", position);
        self.push(id_node(Production::SharedPropertyName, name, name_position));
        self
    }

    pub fn with_identity(self) -> Self {
        self.with_annotation(Production::Identity, "is part of identity")
    }

    pub fn with_identity_rename(mut self, base_key_name: &str) -> Self {
        let position = self.next_line();
        let mut rename = ParseNode::new(Production::IdentityRename, position);
        rename.push_token(Token::new(TokenKind::Keyword, "renames identity property", position));
        let key_position = after(position, "renames identity property");
        rename.push_node(id_node(Production::BaseKeyName, base_key_name, key_position));
        let mut annotation = ParseNode::new(Production::PropertyAnnotation, position);
        annotation.push_node(rename);
        self.push_component(annotation);
        self
    }

    pub fn with_required(self) -> Self {
        self.with_annotation(Production::Required, "is required")
    }

    pub fn with_optional(self) -> Self {
        self.with_annotation(Production::Optional, "is optional")
    }

    pub fn with_required_collection(self) -> Self {
        self.with_collection(Production::RequiredCollection, "is required collection")
    }

    pub fn with_optional_collection(self) -> Self {
        self.with_collection(Production::OptionalCollection, "is optional collection")
    }

    pub fn with_queryable_only(self) -> Self {
        self.with_annotation(Production::IsQueryableOnly, "is queryable only")
    }

    pub fn with_queryable_field(mut self) -> Self {
        let position = self.next_line();
        let mut node = ParseNode::new(Production::IsQueryableField, position);
        node.push_token(Token::new(TokenKind::Keyword, "is queryable field", position));
        self.push_component(node);
        self
    }

    /// `role name <role>` with an optional `shorten to <name>`.
    pub fn with_role_name(mut self, role_name: &str, shorten_to: Option<&str>) -> Self {
        let position = self.next_line();
        let mut node = ParseNode::new(Production::RoleName, position);
        node.push_token(Token::new(TokenKind::Keyword, "role name", position));
        let role_position = after(position, "role name");
        node.push_node(id_node(Production::RoleNameName, role_name, role_position));
        if let Some(shorten_to) = shorten_to {
            let keyword_position = after(role_position, role_name);
            node.push_token(Token::new(TokenKind::Keyword, "shorten to", keyword_position));
            node.push_node(id_node(
                Production::ShortenToName,
                shorten_to,
                after(keyword_position, "shorten to"),
            ));
        }
        self.push_component(node);
        self
    }

    pub fn with_weak_reference(self) -> Self {
        self.with_flag(Production::IsWeakReference, "is weak")
    }

    pub fn with_potentially_logical(self) -> Self {
        self.with_flag(Production::PotentiallyLogical, "potentially logical")
    }

    // =========================================================================
    // RESTRICTIONS
    // =========================================================================

    pub fn with_min_length(self, value: &str) -> Self {
        self.with_unsigned(Production::MinLength, "min length", value)
    }

    pub fn with_max_length(self, value: &str) -> Self {
        self.with_unsigned(Production::MaxLength, "max length", value)
    }

    pub fn with_total_digits(self, value: &str) -> Self {
        self.with_unsigned(Production::TotalDigits, "total digits", value)
    }

    pub fn with_decimal_places(self, value: &str) -> Self {
        self.with_unsigned(Production::DecimalPlaces, "decimal places", value)
    }

    /// `min value <value>`, shaped for decimal, short or integer owners.
    pub fn with_min_value(self, value: &str) -> Self {
        self.with_range_bound(true, value)
    }

    /// `max value <value>`, shaped for decimal, short or integer owners.
    pub fn with_max_value(self, value: &str) -> Self {
        self.with_range_bound(false, value)
    }

    // =========================================================================
    // MERGE DIRECTIVES
    // =========================================================================

    /// `merge <source> with <target>`; paths are dot separated.
    pub fn with_merge_directive(mut self, source: &str, target: &str) -> Self {
        let position = self.next_line();
        let mut directive = ParseNode::new(Production::MergeDirective, position);
        directive.push_token(Token::new(TokenKind::Keyword, "merge", position));

        let source_position = after(position, "merge");
        let mut source_node = ParseNode::new(Production::SourcePropertyPath, source_position);
        source_node.push_node(path_node(source, source_position));
        directive.push_node(source_node);

        let with_position = after(source_position, source);
        directive.push_token(Token::new(TokenKind::Keyword, "with", with_position));

        let target_position = after(with_position, "with");
        let mut target_node = ParseNode::new(Production::TargetPropertyPath, target_position);
        target_node.push_node(path_node(target, target_position));
        directive.push_node(target_node);

        self.push(directive);
        self
    }

    // =========================================================================
    // ENUMERATIONS AND MAP TYPES
    // =========================================================================

    /// `with map type` or `with optional map type` inside a descriptor.
    pub fn start_map_type(mut self, required: bool) -> Self {
        let position = self.next_line();
        self.open_node(Production::WithMapType, position);
        let (production, keyword) = if required {
            (Production::RequiredMapType, "with map type")
        } else {
            (Production::OptionalMapType, "with optional map type")
        };
        let mut marker = ParseNode::new(production, position);
        marker.push_token(Token::new(TokenKind::Keyword, keyword, position));
        self.push(marker);
        self
    }

    pub fn end_map_type(mut self) -> Self {
        self.close_to(Production::WithMapType, "");
        self
    }

    /// `item "<short description>"`, left open for documentation and ids.
    pub fn start_enumeration_item(mut self, short_description: &str) -> Self {
        let position = self.next_line();
        self.open_node(Production::EnumerationItem, position);
        let text_position = self.keyword("item", position);
        let mut description = ParseNode::new(Production::ShortDescription, text_position);
        description.push_token(Token::new(
            TokenKind::Text,
            quoted(short_description),
            text_position,
        ));
        self.push(description);
        self
    }

    pub fn end_enumeration_item(mut self) -> Self {
        self.close_to(Production::EnumerationItem, "");
        self
    }

    pub fn with_enumeration_item(self, short_description: &str) -> Self {
        self.start_enumeration_item(short_description).end_enumeration_item()
    }

    // =========================================================================
    // DOMAIN AND INTERCHANGE ITEMS
    // =========================================================================

    /// `domain entity <name>` (or association, common, descriptor, inline
    /// common, chosen by `keyword`) inside a domain or subdomain.
    pub fn start_domain_item(mut self, keyword: TokenKind, name: &str) -> Self {
        let position = self.next_line();
        self.open_node(Production::DomainItem, position);
        let name_position = self.item_keyword(keyword, position);
        self.push_qualified_item(Production::LocalDomainItemName, name, name_position);
        self
    }

    pub fn with_domain_item(self, keyword: TokenKind, name: &str) -> Self {
        self.start_domain_item(keyword, name).end_item()
    }

    /// `domain entity <name>` (or association, descriptor) inside an
    /// interchange or interchange extension.
    pub fn start_interchange_element(self, keyword: TokenKind, name: &str) -> Self {
        self.start_interchange_item(Production::InterchangeElement, keyword, name)
    }

    pub fn with_interchange_element(self, keyword: TokenKind, name: &str) -> Self {
        self.start_interchange_element(keyword, name).end_item()
    }

    /// `domain entity identity <name>` or `association identity <name>`.
    pub fn start_interchange_identity(self, keyword: TokenKind, name: &str) -> Self {
        self.start_interchange_item(Production::InterchangeIdentity, keyword, name)
    }

    pub fn with_interchange_identity(self, keyword: TokenKind, name: &str) -> Self {
        self.start_interchange_identity(keyword, name).end_item()
    }

    /// Close the innermost open domain or interchange item.
    pub fn end_item(mut self) -> Self {
        let target = self.open.iter().rev().map(|node| node.production).find(|production| {
            matches!(
                production,
                Production::DomainItem
                    | Production::InterchangeElement
                    | Production::InterchangeIdentity
                    | Production::InterchangeComponent
                    | Production::InterchangeExtensionComponent
            )
        });
        if let Some(Production::DomainItem) = target {
            self.close_to(Production::DomainItem, "");
        } else if target.is_some() {
            while let Some(production) = self.top_production() {
                let is_component = matches!(
                    production,
                    Production::InterchangeComponent | Production::InterchangeExtensionComponent
                );
                self.close();
                if is_component {
                    break;
                }
            }
        }
        self
    }

    fn start_interchange_item(
        mut self,
        production: Production,
        keyword: TokenKind,
        name: &str,
    ) -> Self {
        let position = self.next_line();
        let component = if self.top_production() == Some(Production::InterchangeExtension) {
            Production::InterchangeExtensionComponent
        } else {
            Production::InterchangeComponent
        };
        self.open_node(component, position);
        self.open_node(production, position);
        let name_position = self.item_keyword(keyword, position);
        self.push_qualified_item(Production::LocalInterchangeItemName, name, name_position);
        self
    }

    // =========================================================================
    // MALFORMED INPUT
    // =========================================================================

    /// Flag the innermost open production as not cleanly matched.
    pub fn mark_exception(mut self) -> Self {
        if let Some(node) = self.open.last_mut() {
            node.exception = true;
        }
        self
    }

    /// Flag the most recently completed child production of the innermost
    /// open production.
    pub fn mark_last_exception(mut self) -> Self {
        let last = self.top().children.iter_mut().rev().find_map(|element| match element {
            ParseElement::Node(node) => Some(node),
            ParseElement::Token(_) => None,
        });
        if let Some(node) = last {
            node.exception = true;
        }
        self
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn next_line(&mut self) -> Position {
        self.line += 1;
        Position::new(self.line, self.open.len() * INDENT)
    }

    /// A position on the current line, used for clauses that continue it.
    fn current_line_after(&self, text: &str) -> Position {
        let column = self
            .open
            .last()
            .map(|node| node.position.column + text.len() + 1)
            .unwrap_or(0);
        Position::new(self.line.max(1), column)
    }

    fn top(&mut self) -> &mut ParseNode {
        match self.open.last_mut() {
            Some(node) => node,
            None => &mut self.root,
        }
    }

    fn top_production(&self) -> Option<Production> {
        self.open.last().map(|node| node.production)
    }

    fn open_node(&mut self, production: Production, position: Position) {
        self.open.push(ParseNode::new(production, position));
    }

    fn close(&mut self) {
        if let Some(node) = self.open.pop() {
            self.top().push_node(node);
        }
    }

    /// Close productions up to and including the innermost `production`,
    /// appending `keyword` to it first when not empty.
    fn close_to(&mut self, production: Production, keyword: &str) {
        if !self.open.iter().any(|node| node.production == production) {
            return;
        }
        while let Some(top) = self.top_production() {
            if top == production {
                if !keyword.is_empty() {
                    let position = self.next_line();
                    self.top().push_token(Token::new(TokenKind::Keyword, keyword, position));
                }
                self.close();
                return;
            }
            self.close();
        }
    }

    fn push(&mut self, node: ParseNode) {
        self.top().push_node(node);
    }

    fn keyword(&mut self, text: &str, position: Position) -> Position {
        self.top().push_token(Token::new(TokenKind::Keyword, text, position));
        after(position, text)
    }

    fn item_keyword(&mut self, keyword: TokenKind, position: Position) -> Position {
        let text = match keyword {
            TokenKind::AssociationKeyword => "association",
            TokenKind::CommonKeyword => "common",
            TokenKind::DomainEntityKeyword => "domain entity",
            TokenKind::DescriptorKeyword => "descriptor",
            TokenKind::InlineCommonKeyword => "inline common",
            TokenKind::AssociationIdentity => "association identity",
            TokenKind::DomainEntityIdentity => "domain entity identity",
            _ => "element",
        };
        self.top().push_token(Token::new(keyword, text, position));
        after(position, text)
    }

    /// `<namespace>.` prefix as a `baseNamespace` child, then the local name.
    fn push_qualified_item(&mut self, local: Production, name: &str, position: Position) {
        let (namespace, local_name) = split_qualified(name);
        let mut local_position = position;
        if let Some(namespace) = namespace {
            self.push(id_node(Production::BaseNamespace, namespace, position));
            let period_position = after(position, namespace);
            self.top().push_token(Token::new(
                TokenKind::Period,
                ".",
                Position::new(period_position.line, period_position.column - 1),
            ));
            local_position = period_position;
        }
        self.push(id_node(local, local_name, local_position));
    }

    fn push_property_name(&mut self, kind: Production, name: &str, position: Position) {
        let node = if kind.is_shared_property_kind() {
            qualified_node(
                Production::SharedPropertyType,
                Production::PropertyNamespace,
                Production::LocalPropertyType,
                name,
                position,
            )
        } else if kind.has_qualified_property_name() {
            qualified_node(
                Production::PropertyName,
                Production::PropertyNamespace,
                Production::LocalPropertyName,
                name,
                position,
            )
        } else {
            let mut simple = ParseNode::new(Production::SimplePropertyName, position);
            simple.push_node(id_node(Production::LocalPropertyName, name, position));
            simple
        };
        self.push(node);
    }

    /// Append to the `propertyComponents` of the open property, creating it
    /// on first use. Defining domain entities take components directly.
    fn push_component(&mut self, node: ParseNode) {
        let top = self.top();
        if top.production == Production::DefiningDomainEntity {
            top.push_node(node);
            return;
        }
        let existing = top.children.iter_mut().find_map(|element| match element {
            ParseElement::Node(child) if child.production == Production::PropertyComponents => {
                Some(child)
            }
            _ => None,
        });
        match existing {
            Some(components) => components.push_node(node),
            None => {
                let mut components = ParseNode::new(Production::PropertyComponents, node.position);
                components.push_node(node);
                top.push_node(components);
            }
        }
    }

    fn with_annotation(mut self, production: Production, keyword: &str) -> Self {
        let position = self.next_line();
        let mut marker = ParseNode::new(production, position);
        marker.push_token(Token::new(TokenKind::Keyword, keyword, position));
        let mut annotation = ParseNode::new(Production::PropertyAnnotation, position);
        annotation.push_node(marker);
        self.push_component(annotation);
        self
    }

    fn with_collection(mut self, production: Production, keyword: &str) -> Self {
        let position = self.next_line();
        let mut marker = ParseNode::new(production, position);
        marker.push_token(Token::new(TokenKind::Keyword, keyword, position));
        let mut collection = ParseNode::new(Production::Collection, position);
        collection.push_node(marker);
        let mut annotation = ParseNode::new(Production::PropertyAnnotation, position);
        annotation.push_node(collection);
        self.push_component(annotation);
        self
    }

    fn with_flag(mut self, production: Production, keyword: &str) -> Self {
        let position = self.next_line();
        let mut marker = ParseNode::new(production, position);
        marker.push_token(Token::new(TokenKind::Keyword, keyword, position));
        self.push(marker);
        self
    }

    fn with_unsigned(mut self, production: Production, keyword: &str, value: &str) -> Self {
        let position = self.next_line();
        let mut node = ParseNode::new(production, position);
        node.push_token(Token::new(TokenKind::Keyword, keyword, position));
        node.push_token(Token::new(TokenKind::UnsignedInt, value, after(position, keyword)));
        self.push(node);
        self
    }

    fn with_range_bound(mut self, is_min: bool, value: &str) -> Self {
        let position = self.next_line();
        let keyword = if is_min { "min value" } else { "max value" };
        let value_position = after(position, keyword);
        let decimal_owner = matches!(
            self.top_production(),
            Some(Production::DecimalProperty | Production::SharedDecimal)
        );
        let short_owner = self.top_production() == Some(Production::ShortProperty);

        let production = match (decimal_owner, short_owner, is_min) {
            (true, _, true) => Production::MinValueDecimal,
            (true, _, false) => Production::MaxValueDecimal,
            (false, true, true) => Production::MinValueShort,
            (false, true, false) => Production::MaxValueShort,
            (false, false, true) => Production::MinValue,
            (false, false, false) => Production::MaxValue,
        };

        let mut node = ParseNode::new(production, position);
        node.push_token(Token::new(TokenKind::Keyword, keyword, position));
        if decimal_owner {
            let mut decimal = ParseNode::new(Production::DecimalValue, value_position);
            decimal.push_token(Token::new(TokenKind::DecimalValue, value, value_position));
            node.push_node(decimal);
        } else {
            node.push_node(signed_int_node(value, value_position));
        }
        self.push(node);
        self
    }
}

fn after(position: Position, text: &str) -> Position {
    Position::new(position.line, position.column + text.len() + 1)
}

fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once('.') {
        Some((namespace, local)) if !namespace.is_empty() => (Some(namespace), local),
        _ => (None, name),
    }
}

fn is_property_production(production: Production) -> bool {
    production.is_property_kind() || production == Production::DefiningDomainEntity
}

fn property_keyword(kind: Production) -> &'static str {
    match kind {
        Production::AssociationProperty => "association",
        Production::BooleanProperty => "bool",
        Production::ChoiceProperty => "choice",
        Production::CommonProperty => "common",
        Production::CurrencyProperty => "currency",
        Production::DateProperty => "date",
        Production::DatetimeProperty => "datetime",
        Production::DecimalProperty => "decimal",
        Production::DescriptorProperty => "descriptor",
        Production::DomainEntityProperty => "domain entity",
        Production::DurationProperty => "duration",
        Production::EnumerationProperty => "enumeration",
        Production::InlineCommonProperty => "inline common",
        Production::IntegerProperty => "integer",
        Production::PercentProperty => "percent",
        Production::SharedDecimalProperty => "shared decimal",
        Production::SharedIntegerProperty => "shared integer",
        Production::SharedShortProperty => "shared short",
        Production::SharedStringProperty => "shared string",
        Production::ShortProperty => "short",
        Production::StringProperty => "string",
        Production::TimeProperty => "time",
        Production::YearProperty => "year",
        _ => "property",
    }
}

fn id_node(production: Production, text: &str, position: Position) -> ParseNode {
    let mut node = ParseNode::new(production, position);
    node.push_token(Token::new(TokenKind::Id, text, position));
    node
}

fn text_node(production: Production, keyword: &str, text: &str, position: Position) -> ParseNode {
    let mut node = ParseNode::new(production, position);
    node.push_token(Token::new(TokenKind::Keyword, keyword, position));
    node.push_token(Token::new(TokenKind::Text, quoted(text), after(position, keyword)));
    node
}

/// `outer: (namespace '.')? local`
fn qualified_node(
    outer: Production,
    namespace_production: Production,
    local_production: Production,
    name: &str,
    position: Position,
) -> ParseNode {
    let (namespace, local) = split_qualified(name);
    let mut node = ParseNode::new(outer, position);
    let mut local_position = position;
    if let Some(namespace) = namespace {
        node.push_node(id_node(namespace_production, namespace, position));
        let period_column = position.column + namespace.len();
        node.push_token(Token::new(
            TokenKind::Period,
            ".",
            Position::new(position.line, period_column),
        ));
        local_position = Position::new(position.line, period_column + 1);
    }
    node.push_node(id_node(local_production, local, local_position));
    node
}

fn path_node(path: &str, position: Position) -> ParseNode {
    let mut node = ParseNode::new(Production::PropertyPath, position);
    let mut column = position.column;
    for (index, segment) in path.split('.').enumerate() {
        if index > 0 {
            node.push_token(Token::new(
                TokenKind::Period,
                ".",
                Position::new(position.line, column),
            ));
            column += 1;
        }
        node.push_token(Token::new(TokenKind::Id, segment, Position::new(position.line, column)));
        column += segment.len();
    }
    node
}

fn signed_int_node(value: &str, position: Position) -> ParseNode {
    let mut node = ParseNode::new(Production::SignedInt, position);
    let digits = match value.strip_prefix(['-', '+']) {
        Some(digits) => {
            let (kind, sign) = if value.starts_with('-') {
                (TokenKind::NegSign, "-")
            } else {
                (TokenKind::PosSign, "+")
            };
            let mut operator = ParseNode::new(Production::UnaryOperator, position);
            operator.push_token(Token::new(kind, sign, position));
            node.push_node(operator);
            digits
        }
        None => value,
    };
    let digits_position =
        Position::new(position.line, position.column + value.len() - digits.len());
    node.push_token(Token::new(TokenKind::UnsignedInt, digits, digits_position));
    node
}
