use bitflags::bitflags;
use hashbrown::HashMap as FastHashMap;

use crate::pattern::{ParamConstraint, SegmentPattern};
use crate::types::{HTTP_METHOD_COUNT, HttpMethod};

pub const PARAM_KEY: &str = ":param";
pub const OPTIONAL_KEY: &str = ":optional";
pub const REGEX_KEY_PREFIX: &str = ":regex:";
pub const WILDCARD_KEY: &str = "*";

pub type RouteId = usize;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        const PARAM = 0b0000_0001;
        const OPTIONAL = 0b0000_0010;
        const WILDCARD = 0b0000_0100;
        const END = 0b0000_1000;
    }
}

/// Node key for a pattern segment. Parameters collapse by class, so
/// `:id` and `:slug` at the same depth share one node.
pub fn segment_key(segment: &SegmentPattern) -> Box<str> {
    match segment {
        SegmentPattern::Static(literal) => literal.clone(),
        SegmentPattern::Param {
            constraint: Some(constraint),
            ..
        } => format!("{REGEX_KEY_PREFIX}{}", constraint.raw()).into_boxed_str(),
        SegmentPattern::Param { optional: true, .. } => OPTIONAL_KEY.into(),
        SegmentPattern::Param { .. } => PARAM_KEY.into(),
        SegmentPattern::Wildcard { .. } => WILDCARD_KEY.into(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    pub(crate) key: Box<str>,
    pub(crate) flags: NodeFlags,
    pub(crate) param_name: Box<str>,
    pub(crate) constraint: Option<ParamConstraint>,
    pub(crate) static_children: FastHashMap<Box<str>, TrieNode>,
    // insertion ordered; few per node
    pub(crate) param_children: Vec<TrieNode>,
    pub(crate) wildcard_child: Option<Box<TrieNode>>,
    pub(crate) routes: [Option<RouteId>; HTTP_METHOD_COUNT],
}

impl TrieNode {
    fn from_segment(key: Box<str>, segment: &SegmentPattern) -> Self {
        let mut node = TrieNode {
            key,
            ..Default::default()
        };
        match segment {
            SegmentPattern::Static(_) => {}
            SegmentPattern::Param {
                name,
                constraint,
                optional,
            } => {
                node.flags.insert(NodeFlags::PARAM);
                node.flags.set(NodeFlags::OPTIONAL, *optional);
                node.param_name = name.clone();
                node.constraint = constraint.clone();
            }
            SegmentPattern::Wildcard { name } => {
                node.flags.insert(NodeFlags::WILDCARD);
                node.param_name = name.clone();
            }
        }
        node
    }

    #[inline(always)]
    pub fn is_param(&self) -> bool {
        self.flags.contains(NodeFlags::PARAM)
    }

    #[inline(always)]
    pub fn is_optional(&self) -> bool {
        self.flags.contains(NodeFlags::OPTIONAL)
    }

    #[inline(always)]
    pub fn is_wildcard(&self) -> bool {
        self.flags.contains(NodeFlags::WILDCARD)
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.flags.contains(NodeFlags::END)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    pub fn route(&self, method: HttpMethod) -> Option<RouteId> {
        self.routes[method as usize]
    }

    pub(super) fn set_route(&mut self, method: HttpMethod, id: RouteId) {
        self.routes[method as usize] = Some(id);
        self.flags.insert(NodeFlags::END);
    }

    pub(super) fn descend_mut(&mut self, segment: &SegmentPattern) -> &mut TrieNode {
        let key = segment_key(segment);
        match segment {
            SegmentPattern::Static(_) => self
                .static_children
                .entry(key.clone())
                .or_insert_with(|| TrieNode::from_segment(key, segment)),
            SegmentPattern::Wildcard { .. } => self
                .wildcard_child
                .get_or_insert_with(|| Box::new(TrieNode::from_segment(key, segment)))
                .as_mut(),
            SegmentPattern::Param { optional, .. } => {
                let pos = match self.param_children.iter().position(|c| c.key == key) {
                    Some(pos) => pos,
                    None => {
                        self.param_children
                            .push(TrieNode::from_segment(key, segment));
                        self.param_children.len() - 1
                    }
                };
                let child = &mut self.param_children[pos];
                if *optional {
                    child.flags.insert(NodeFlags::OPTIONAL);
                }
                child
            }
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .static_children
            .values()
            .map(TrieNode::node_count)
            .sum::<usize>()
            + self
                .param_children
                .iter()
                .map(TrieNode::node_count)
                .sum::<usize>()
            + self
                .wildcard_child
                .as_ref()
                .map_or(0, |child| child.node_count())
    }
}
