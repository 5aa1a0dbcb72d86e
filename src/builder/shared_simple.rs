//! Shared string, integer, short and decimal declarations.
//!
//! Shared shorts land in the shared integer partition, flagged `is_short`.

use smol_str::SmolStr;

use super::commit::describe_by_type;
use super::declaration::DeclarationState;
use super::extract;
use crate::diagnostics::{ValidationFailure, validators};
use crate::model::{EntityDetail, EntityKind, MetaEdEnvironment, Restrictions};
use crate::syntax::{MetaEdListener, ParseNode, Production};

/// Builds every shared simple type declaration.
pub struct SharedSimpleBuilder<'a> {
    state: DeclarationState<'a>,
}

impl<'a> SharedSimpleBuilder<'a> {
    pub fn new(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
    ) -> Self {
        Self {
            state: DeclarationState::new(environment, failures, validators::SHARED_SIMPLE_BUILDER),
        }
    }

    fn entering_shared(&mut self, kind: EntityKind, is_short: bool, node: &ParseNode) {
        self.state.entering_entity(kind, node);
        if is_short && let Some(entity) = self.state.entity.as_open_mut() {
            entity.detail = EntityDetail::SharedSimple {
                restrictions: Restrictions::default(),
                is_short: true,
            };
        }
    }

    fn entering_restriction(
        &mut self,
        value: Option<SmolStr>,
        field: fn(&mut Restrictions) -> &mut Option<SmolStr>,
    ) {
        let Some(value) = value else {
            return;
        };
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::SharedSimple { restrictions, .. } = &mut entity.detail
        {
            *field(restrictions) = Some(value);
        }
    }
}

impl MetaEdListener for SharedSimpleBuilder<'_> {
    fn enter(&mut self, node: &ParseNode) {
        match node.production {
            Production::NamespaceName => self.state.entering_namespace_name(node),
            Production::SharedString => self.entering_shared(EntityKind::SharedString, false, node),
            Production::SharedInteger => {
                self.entering_shared(EntityKind::SharedInteger, false, node)
            }
            Production::SharedShort => self.entering_shared(EntityKind::SharedInteger, true, node),
            Production::SharedDecimal => {
                self.entering_shared(EntityKind::SharedDecimal, false, node)
            }
            Production::SharedStringName
            | Production::SharedIntegerName
            | Production::SharedShortName
            | Production::SharedDecimalName => self.state.entering_name(node),
            Production::Documentation => self.state.entering_documentation(node),
            Production::Deprecated => self.state.entering_deprecated(node),
            Production::MetaEdId => self.state.entering_metaed_id(node),

            Production::MinLength => {
                self.entering_restriction(extract::unsigned_int(node), |r| &mut r.min_length)
            }
            Production::MaxLength => {
                self.entering_restriction(extract::unsigned_int(node), |r| &mut r.max_length)
            }
            Production::TotalDigits => {
                self.entering_restriction(extract::unsigned_int(node), |r| &mut r.total_digits)
            }
            Production::DecimalPlaces => {
                self.entering_restriction(extract::unsigned_int(node), |r| &mut r.decimal_places)
            }
            Production::MinValue | Production::MinValueShort => self.entering_restriction(
                extract::child_literal(node, Production::SignedInt),
                |r| &mut r.min_value,
            ),
            Production::MaxValue | Production::MaxValueShort => self.entering_restriction(
                extract::child_literal(node, Production::SignedInt),
                |r| &mut r.max_value,
            ),
            Production::MinValueDecimal => self.entering_restriction(
                extract::child_literal(node, Production::DecimalValue),
                |r| &mut r.min_value,
            ),
            Production::MaxValueDecimal => self.entering_restriction(
                extract::child_literal(node, Production::DecimalValue),
                |r| &mut r.max_value,
            ),
            _ => {}
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        if matches!(
            node.production,
            Production::SharedString
                | Production::SharedInteger
                | Production::SharedShort
                | Production::SharedDecimal
        ) {
            self.state.exiting_entity(describe_by_type);
        }
    }
}
