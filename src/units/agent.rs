//! Contributions.
//!
//! On the wire an agent hangs off a work through an intermediate
//! `bf:Contribution` node that also carries relator roles and, for the
//! primary contributor, the `bflc:PrimaryContribution` type:
//!
//! ```text
//! work --bf:contribution--> _:c (bf:Contribution, bflc:PrimaryContribution)
//!                            |--bf:agent--> agent (bf:Person)
//!                            '--bf:role---> relators:aut
//! ```
//!
//! Internally the contribution node disappears: the work links to the agent
//! by `CREATOR` (primary) or `CONTRIBUTOR`, plus one link per role.

use tracing::trace;

use crate::bibframe::namespaces::{bflc, classes, properties as bf_props, BF, BFLC, RELATORS};
use crate::bibframe::rdf::RdfNode;
use crate::bibframe::to_ld::LdMapper;
use crate::bibframe::to_rdf::RdfMapper;
use crate::error::Result;
use crate::profile::EdgeMapping;
use crate::resource::Resource;
use crate::vocab::predicates;

use super::{authority_node, Direction, EdgeContext, EmitContext, MapperUnit};

const ROLES: [(&str, &str); 8] = [
    ("aut", predicates::AUTHOR),
    ("edt", predicates::EDITOR),
    ("ill", predicates::ILLUSTRATOR),
    ("trl", predicates::TRANSLATOR),
    ("cmp", predicates::COMPOSER),
    ("pht", predicates::PHOTOGRAPHER),
    ("nrt", predicates::NARRATOR),
    ("aui", predicates::AUTHOR_OF_INTRODUCTION),
];

fn role_predicate(role_iri: &str) -> Option<&'static str> {
    let code = role_iri.strip_prefix(RELATORS)?;
    ROLES
        .iter()
        .find(|(relator, _)| *relator == code)
        .map(|(_, predicate)| *predicate)
}

fn role_code(predicate: &str) -> Option<&'static str> {
    ROLES
        .iter()
        .find(|(_, role)| *role == predicate)
        .map(|(code, _)| *code)
}

/// Creators and contributors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentUnit;

impl AgentUnit {
    fn is_primary(edge: &EdgeMapping) -> bool {
        edge.ld_predicate() == Some(predicates::CREATOR)
    }
}

impl MapperUnit for AgentUnit {
    fn name(&self) -> &'static str {
        "agent"
    }

    fn map_edge_to_ld(
        &self,
        mapper: &mut LdMapper<'_>,
        ctx: &EdgeContext<'_>,
        draft: &mut Resource,
    ) -> Result<()> {
        let (Some(bf_predicate), Some(ld_predicate)) =
            (ctx.edge.bf_predicate(), ctx.edge.ld_predicate())
        else {
            return Ok(());
        };
        if ctx.direction != Direction::Outgoing {
            return mapper.map_edge_default(ctx, draft);
        }
        let contribution_type = format!("{BF}{}", classes::CONTRIBUTION);
        let primary_type = format!("{BFLC}{}", bflc::PRIMARY_CONTRIBUTION);
        let agent_predicate = format!("{BF}{}", bf_props::AGENT);
        let role_property = format!("{BF}{}", bf_props::ROLE);
        let want_primary = Self::is_primary(ctx.edge);

        let contributions: Vec<RdfNode> = mapper
            .index()
            .objects(ctx.node, bf_predicate)
            .into_iter()
            .cloned()
            .collect();
        for contribution in contributions {
            let contribution_types = mapper.index().types_of(&contribution);
            if !contribution_types.contains(&contribution_type)
                || contribution_types.contains(&primary_type) != want_primary
            {
                continue;
            }
            let agents: Vec<RdfNode> = mapper
                .index()
                .objects(&contribution, &agent_predicate)
                .into_iter()
                .cloned()
                .collect();
            let roles: Vec<&'static str> = mapper
                .index()
                .objects(&contribution, &role_property)
                .into_iter()
                .filter_map(|role| role.as_uri().and_then(role_predicate))
                .collect();
            for agent in agents {
                if !mapper.claims(ctx, &agent) {
                    continue;
                }
                let Some(id) = mapper.map_resource(&agent, ctx.edge)? else {
                    continue;
                };
                draft.add_outgoing(ld_predicate, id);
                for role in &roles {
                    draft.add_outgoing(*role, id);
                }
            }
        }
        Ok(())
    }

    fn emit_edge(&self, mapper: &mut RdfMapper<'_>, ctx: &EmitContext<'_>) -> Result<()> {
        let Some(bf_predicate) = ctx.edge.bf_predicate() else {
            return Ok(());
        };
        let Some(agent) = mapper.source().get(ctx.link.node) else {
            return mapper.emit_edge_default(ctx);
        };
        let agent_node = match authority_node_if_enabled(mapper, agent, ctx.edge) {
            Some(node) => node,
            None => mapper.emit_dispatched(ctx.link.node, ctx.edge)?,
        };

        let contribution = mapper.graph_mut().new_blank_node();
        mapper
            .graph_mut()
            .add_type(&contribution, format!("{BF}{}", classes::CONTRIBUTION));
        if ctx.link.predicate == predicates::CREATOR {
            mapper
                .graph_mut()
                .add_type(&contribution, format!("{BFLC}{}", bflc::PRIMARY_CONTRIBUTION));
        }
        mapper
            .graph_mut()
            .add(contribution.clone(), format!("{BF}{}", bf_props::AGENT), agent_node);

        // Roles ride on the first contribution emitted for this agent.
        let first_link = ctx.parent.outgoing.iter().find(|link| {
            link.node == ctx.link.node
                && (link.predicate == predicates::CREATOR
                    || link.predicate == predicates::CONTRIBUTOR)
        });
        if first_link == Some(ctx.link) {
            for link in ctx.parent.outgoing.iter().filter(|link| link.node == ctx.link.node) {
                if let Some(code) = role_code(&link.predicate) {
                    mapper.graph_mut().add(
                        contribution.clone(),
                        format!("{BF}{}", bf_props::ROLE),
                        RdfNode::uri(format!("{RELATORS}{code}")),
                    );
                }
            }
        }

        trace!(agent = %ctx.link.node, predicate = %ctx.link.predicate, "emitted contribution");
        mapper
            .graph_mut()
            .add(ctx.parent_node.clone(), bf_predicate, contribution);
        Ok(())
    }
}

fn authority_node_if_enabled(
    mapper: &mut RdfMapper<'_>,
    agent: &Resource,
    edge: &EdgeMapping,
) -> Option<RdfNode> {
    if mapper.converter().config().link_authorities {
        authority_node(mapper, agent, edge)
    } else {
        None
    }
}
